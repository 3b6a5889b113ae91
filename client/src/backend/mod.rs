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

//! Define trait for client backends and provide the emulator implementation
use futures::future::BoxFuture;

pub use collab_ledger_runtime::{Hash, UncheckedExtrinsic};

use crate::interface::*;

mod emulator;

pub use emulator::Emulator;

/// Indicator that a transaction has been included in a block and has run in the runtime.
///
/// Obtained after a transaction has been submitted and processed.
pub struct TransactionIncluded {
    pub tx_hash: TxHash,
    /// The hash of the block the transaction is included in.
    pub block: Hash,
    /// Events emitted by this transaction
    pub events: Vec<Event>,
}

/// Backend for talking to the ledger.
///
/// The interface is low-level and mostly agnostic of the ledger code.
#[async_trait::async_trait]
pub trait Backend {
    /// Submit a signed transaction to the ledger.
    ///
    /// Returns an error if the transaction is invalid. Otherwise returns a future that resolves
    /// when the transaction has been applied and included in a block.
    async fn submit(
        &self,
        xt: UncheckedExtrinsic,
    ) -> Result<BoxFuture<'static, Result<TransactionIncluded, Error>>, Error>;

    /// Fetch a value from the ledger state storage.
    async fn fetch(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    /// Fetch all keys with the given prefix from the ledger state storage.
    async fn fetch_keys(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, Error>;

    /// Fetch the header of the given block or of the latest block if `block_hash` is `None`.
    async fn block_header(&self, block_hash: Option<BlockHash>) -> Result<BlockHeader, Error>;

    /// Get the genesis hash of the ledger. This must be obtained on backend creation.
    fn get_genesis_hash(&self) -> Hash;

    /// Export the complete ledger so that it can be restored later.
    fn export_snapshot(&self) -> Result<Vec<u8>, Error>;
}
