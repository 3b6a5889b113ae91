// Collab Ledger
// Copyright (C) 2020 Monadic GmbH <radicle@monadic.xyz>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License version 3 as
// published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use core::convert::TryFrom;
use sp_runtime::ModuleError;

use crate::DispatchError;

/// Index of the ledger pallet in the runtime. Used to identify ledger errors in
/// [DispatchError::Module].
pub const LEDGER_ERROR_INDEX: u8 = 1;

/// Errors describing failed ledger transactions.
///
/// The discriminant of each variant is the error code exposed to callers and must not change.
/// It is carried as the first byte of [ModuleError::error].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LedgerError {
    OwnerOnly = 100,
    NotFound = 101,
    AlreadyVerified = 102,
    AlreadyInitialized = 103,
}

impl LedgerError {
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            100 => Some(LedgerError::OwnerOnly),
            101 => Some(LedgerError::NotFound),
            102 => Some(LedgerError::AlreadyVerified),
            103 => Some(LedgerError::AlreadyInitialized),
            _ => None,
        }
    }
}

impl From<LedgerError> for &'static str {
    fn from(error: LedgerError) -> &'static str {
        match error {
            LedgerError::OwnerOnly => "The sender lacks the privilege required for this call",
            LedgerError::NotFound => "The referenced contribution or contributor does not exist",
            LedgerError::AlreadyVerified => "The contribution has already been verified",
            LedgerError::AlreadyInitialized => "The ledger has already been initialized",
        }
    }
}

impl From<LedgerError> for DispatchError {
    fn from(error: LedgerError) -> Self {
        DispatchError::Module(ModuleError {
            index: LEDGER_ERROR_INDEX,
            error: [error as u8, 0, 0, 0],
            message: Some(error.into()),
        })
    }
}

impl TryFrom<DispatchError> for LedgerError {
    type Error = DispatchError;

    /// Recover the ledger error from a module error raised by the ledger pallet. Any other
    /// dispatch error is returned unchanged.
    fn try_from(dispatch_error: DispatchError) -> Result<Self, DispatchError> {
        match dispatch_error {
            DispatchError::Module(ModuleError {
                index,
                error: [code, 0, 0, 0],
                ..
            }) if index == LEDGER_ERROR_INDEX => {
                LedgerError::from_code(u32::from(code)).ok_or(dispatch_error)
            }
            _ => Err(dispatch_error),
        }
    }
}

impl core::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let message: &'static str = (*self).into();
        write!(f, "{} (error {})", message, self.code())
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod test {
    use super::*;

    const ALL: [LedgerError; 4] = [
        LedgerError::OwnerOnly,
        LedgerError::NotFound,
        LedgerError::AlreadyVerified,
        LedgerError::AlreadyInitialized,
    ];

    #[test]
    fn error_codes() {
        assert_eq!(LedgerError::OwnerOnly.code(), 100);
        assert_eq!(LedgerError::NotFound.code(), 101);
        assert_eq!(LedgerError::AlreadyVerified.code(), 102);
        assert_eq!(LedgerError::AlreadyInitialized.code(), 103);
    }

    #[test]
    fn dispatch_error_carries_code() {
        for error in ALL.iter() {
            let dispatch_error = DispatchError::from(*error);
            match dispatch_error {
                DispatchError::Module(module_error) => {
                    assert_eq!(module_error.index, LEDGER_ERROR_INDEX);
                    assert_eq!(u32::from(module_error.error[0]), error.code());
                }
                other => panic!("unexpected dispatch error {:?}", other),
            }
            assert_eq!(LedgerError::try_from(dispatch_error), Ok(*error));
        }
    }

    #[test]
    fn foreign_dispatch_errors_are_kept() {
        let foreign_module = DispatchError::Module(ModuleError {
            index: LEDGER_ERROR_INDEX + 1,
            error: [100, 0, 0, 0],
            message: None,
        });
        let unknown_code = DispatchError::Module(ModuleError {
            index: LEDGER_ERROR_INDEX,
            error: [7, 0, 0, 0],
            message: None,
        });
        for dispatch_error in vec![DispatchError::BadOrigin, foreign_module, unknown_code] {
            assert_eq!(LedgerError::try_from(dispatch_error), Err(dispatch_error));
        }
    }
}
