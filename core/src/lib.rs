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

//! Basic types used in the Collab Ledger.

use sp_core::{ed25519, H256};
use sp_runtime::traits::BlakeTwo256;

pub use sp_runtime::DispatchError;

pub mod message;
pub mod state;

mod contribution_details;
pub use contribution_details::ContributionDetails;

mod error;
pub use error::{LedgerError, LEDGER_ERROR_INDEX};

mod tier;
pub use tier::Tier;

/// The hashing algorightm to use
pub type Hashing = BlakeTwo256;

/// Identifier for accounts, an Ed25519 public key.
///
/// Every transaction is signed by the key pair of an account and the account becomes the
/// caller identity of the dispatched ledger call. Displayed and parsed as SS58 address.
pub type AccountId = ed25519::Public;

/// A hash of some data used by the ledger. Identifies blocks and transactions.
pub type Hash = H256;

/// Identifier of a contribution.
///
/// Identifiers are handed out in strictly increasing order starting at `1` and are never reused.
pub type ContributionId = u64;

/// Points awarded to a contribution when it is verified.
pub type Score = u128;
