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

//! Function based interface to the runtime.
//!
//! Except for [genesis_storage] all functions must run with [sp_io] externalities that hold the
//! ledger state, for example inside [sp_io::TestExternalities::execute_with].
use frame_support::{ensure, fail};
use sp_core::storage::Storage;
use sp_runtime::transaction_validity::InvalidTransaction;
use sp_runtime::{ApplyExtrinsicResult, BuildStorage as _, Digest, StateVersion};

use super::{
    Block, Executive, Hash, Header, RuntimeCall, RuntimeGenesisConfig, UncheckedExtrinsic,
};

const FORBIDDEN_CALL_ERROR: InvalidTransaction = InvalidTransaction::Custom(1);
const UNSIGNED_CALL_ERROR: InvalidTransaction = InvalidTransaction::Custom(2);

/// Storage of a fresh ledger that has not been initialized.
pub fn genesis_storage() -> Result<Storage, String> {
    RuntimeGenesisConfig::default().build_storage()
}

/// Header of the genesis block for the state held by the current externalities.
///
/// Must be called before the first block is initialized.
pub fn genesis_header() -> Header {
    let state_root = sp_io::storage::root(StateVersion::V1);
    Header {
        parent_hash: Hash::zero(),
        number: 0,
        state_root: Hash::from_slice(&state_root),
        extrinsics_root: Hash::zero(),
        digest: Digest::default(),
    }
}

/// Start a new block with the given header. The header only needs the number and the parent
/// hash, the roots are computed by [finalize_block].
pub fn initialize_block(header: &Header) {
    Executive::initialize_block(header);
}

/// Apply an extrinsic in the current block.
///
/// Returns an error if the extrinsic is invalid and cannot be included in the block. If the
/// extrinsic was included, the result of the dispatched call is returned and also recorded in
/// the system events.
pub fn apply_extrinsic(extrinsic: UncheckedExtrinsic) -> ApplyExtrinsicResult {
    validate_extrinsic_call(&extrinsic)?;
    let result = Executive::apply_extrinsic(extrinsic);
    if let Err(error) = &result {
        log::debug!(target: "runtime", "Rejected extrinsic: {:?}", error);
    }
    result
}

/// Finish the current block and return its complete header.
pub fn finalize_block() -> Header {
    Executive::finalize_block()
}

/// Execute a block that was built with [initialize_block], [apply_extrinsic] and
/// [finalize_block] on the same state.
///
/// Panics if the block is invalid, for example if an extrinsic is rejected or if the state
/// root in the header does not match the state after the block was executed.
pub fn execute_block(block: Block) {
    log::debug!(target: "runtime", "Executing block #{}", block.header.number);
    Executive::execute_block(block)
}

/// Validate that the call of the extrinsic is allowed.
///
/// * We forbid any calls to the [super::System] pallet.
/// * We ensure that ledger calls are signed.
fn validate_extrinsic_call(xt: &UncheckedExtrinsic) -> Result<(), InvalidTransaction> {
    match xt.function {
        RuntimeCall::System(_) => fail!(FORBIDDEN_CALL_ERROR),
        RuntimeCall::Ledger(_) => ensure!(xt.signature.is_some(), UNSIGNED_CALL_ERROR),
    }

    Ok(())
}
