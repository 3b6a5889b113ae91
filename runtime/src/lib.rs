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

//! The Collab Ledger runtime.
//!
//! The runtime is the state transition engine of the ledger. It is built from two pallets:
//!
//! * [ledger] holds the contribution ledger: access control, contributions, contributor
//!   profiles and tiers.
//! * [system] is `frame_system` and keeps account nonces, block numbers, block hashes and the
//!   events of the current block.
//!
//! [runtime_api] provides the entry points to build and execute blocks of signed
//! [UncheckedExtrinsic]s. They must run with [sp_io] externalities that hold the ledger state.

// `construct_runtime!` does a lot of recursion and requires us to increase the limit to 256.
#![recursion_limit = "256"]

use frame_support::{construct_runtime, derive_impl, traits::ConstU32};
use sp_core::ed25519;
use sp_runtime::{generic, traits::IdentityLookup};
use std::convert::{TryFrom, TryInto};

pub use collab_ledger_core::*;

pub mod ledger;
pub mod runtime_api;

pub use frame_system as system;

/// An index to a block.
pub type BlockNumber = u32;

/// Alias to 512-bit hash when used in the context of a transaction signature on the chain.
pub type Signature = ed25519::Signature;

pub type EventRecord = frame_system::EventRecord<RuntimeEvent, Hash>;

#[derive_impl(frame_system::config_preludes::TestDefaultConfig as frame_system::DefaultConfig)]
impl frame_system::Config for Runtime {
    /// The block type, see [Block].
    type Block = Block;
    /// The identifier used to distinguish between accounts.
    type AccountId = AccountId;
    /// The lookup mechanism to get account ID from whatever is passed in dispatchers.
    type Lookup = IdentityLookup<AccountId>;
    /// The index type for storing how many extrinsics an account has signed.
    type Nonce = state::AccountTransactionIndex;
    /// The type for hashing blocks and tries.
    type Hash = Hash;
    /// The hashing algorithm used.
    type Hashing = Hashing;
    /// Maximum number of block number to block hash mappings to keep (oldest pruned first).
    type BlockHashCount = ConstU32<250>;
}

impl ledger::Config for Runtime {
    type RuntimeEvent = RuntimeEvent;
}

construct_runtime!(
    pub enum Runtime {
        System: frame_system = 0,
        Ledger: ledger = 1,
    }
);

/// Block header type as expected by this runtime.
pub type Header = generic::Header<BlockNumber, Hashing>;
/// Block type as expected by this runtime.
pub type Block = generic::Block<Header, UncheckedExtrinsic>;
/// The SignedExtension to the basic transaction logic.
pub type SignedExtra = (
    frame_system::CheckGenesis<Runtime>,
    ledger::ProvideSenderAccount<Runtime>,
    frame_system::CheckNonce<Runtime>,
);
/// Unchecked extrinsic type as expected by this runtime.
pub type UncheckedExtrinsic =
    generic::UncheckedExtrinsic<AccountId, RuntimeCall, Signature, SignedExtra>;
/// The payload being signed in transactions.
pub type SignedPayload = generic::SignedPayload<RuntimeCall, SignedExtra>;
/// Extrinsic type that has already been checked.
pub type CheckedExtrinsic = generic::CheckedExtrinsic<AccountId, RuntimeCall, SignedExtra>;
/// Executive: handles dispatch to the various pallets.
pub type Executive = frame_executive::Executive<
    Runtime,
    Block,
    frame_system::ChainContext<Runtime>,
    Runtime,
    AllPalletsWithSystem,
>;

#[cfg(test)]
mod test {
    use super::*;
    use frame_support::traits::PalletInfo as _;

    #[test]
    fn ledger_pallet_index_matches_error_index() {
        let index = <Runtime as frame_system::Config>::PalletInfo::index::<Ledger>();
        assert_eq!(index, Some(usize::from(LEDGER_ERROR_INDEX)));
    }
}
