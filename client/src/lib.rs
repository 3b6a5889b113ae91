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

//! Client for the Collab Ledger.
//!
//! The [Client] implements [ClientT] to submit ledger messages and read the ledger state. It
//! talks to the ledger through a [backend::Backend]. [Client::new_emulator] runs the ledger in
//! memory and [Client::snapshot] and [Client::from_snapshot] persist it.
//!
//! ```no_run
//! # use collab_ledger_client::*;
//! # async fn example() -> Result<(), Error> {
//! let client = Client::new_emulator()?;
//! let alice = ed25519::Pair::from_string("//Alice", None).expect("valid key URI");
//! client
//!     .sign_and_submit_message(&alice, message::Initialize)
//!     .await?
//!     .await?;
//! assert_eq!(client.get_owner().await?, Some(alice.public()));
//! # Ok(())
//! # }
//! ```
use std::sync::Arc;

use frame_support::storage::generator::{StorageMap, StorageValue};
use frame_support::storage::StoragePrefixedMap;
use parity_scale_codec::{Decode, FullCodec};

use collab_ledger_runtime::{ledger, system, Runtime};

mod backend;
mod error;
mod interface;
pub mod message;
mod transaction;

pub use crate::interface::*;

/// Client to interact with the ledger.
///
/// Implements [ClientT] for interacting with the ledger.
#[derive(Clone)]
pub struct Client {
    backend: Arc<dyn backend::Backend + Sync + Send>,
}

impl Client {
    /// Create a client that runs a fresh, uninitialized ledger in memory.
    ///
    /// Every submitted transaction is included in its own block.
    pub fn new_emulator() -> Result<Self, Error> {
        let emulator = backend::Emulator::new()?;
        Ok(Self::new(emulator))
    }

    /// Create a client that runs the ledger in memory starting from a state exported with
    /// [Client::snapshot].
    pub fn from_snapshot(data: &[u8]) -> Result<Self, Error> {
        let emulator = backend::Emulator::from_snapshot(data)?;
        Ok(Self::new(emulator))
    }

    /// Export the complete ledger so that it can be restored with [Client::from_snapshot].
    pub fn snapshot(&self) -> Result<Vec<u8>, Error> {
        self.backend.export_snapshot()
    }

    fn new(backend: impl backend::Backend + Sync + Send + 'static) -> Self {
        Client {
            backend: Arc::new(backend),
        }
    }

    /// Fetch a value from the state storage based on a [StorageValue] implementation.
    async fn fetch_value<S: StorageValue<Value>, Value: FullCodec>(
        &self,
    ) -> Result<Option<Value>, Error> {
        let maybe_data = self.backend.fetch(&S::storage_value_final_key()).await?;
        decode_optional(maybe_data)
    }

    /// Fetch a value from a [StorageMap] in the state storage.
    async fn fetch_map_value<S: StorageMap<Key, Value>, Key: FullCodec, Value: FullCodec>(
        &self,
        key: &Key,
    ) -> Result<Option<Value>, Error> {
        let maybe_data = self.backend.fetch(&S::storage_map_final_key(key)).await?;
        decode_optional(maybe_data)
    }

    /// Fetch all keys of a [StorageMap] hashed with `Blake2_128Concat` in the state storage.
    async fn fetch_map_keys<S: StoragePrefixedMap<Value>, Key: Decode, Value: FullCodec>(
        &self,
    ) -> Result<Vec<Key>, Error> {
        let prefix = S::final_prefix();
        let storage_keys = self.backend.fetch_keys(&prefix).await?;
        storage_keys
            .iter()
            .map(|storage_key| {
                let hashed_key = storage_key
                    .get(prefix.len() + BLAKE2_128_LEN..)
                    .ok_or_else(|| Error::from("Invalid storage key for map"))?;
                Ok(Key::decode(&mut &hashed_key[..])?)
            })
            .collect()
    }
}

/// Account information stored by the `frame_system` pallet. The runtime keeps no account data.
type AccountInfo = system::AccountInfo<state::AccountTransactionIndex, ()>;

/// Length of the hash prepended to the encoded key by `Blake2_128Concat`.
const BLAKE2_128_LEN: usize = 16;

fn decode_optional<T: Decode>(maybe_data: Option<Vec<u8>>) -> Result<Option<T>, Error> {
    match maybe_data {
        Some(data) => Ok(Some(T::decode(&mut &data[..])?)),
        None => Ok(None),
    }
}

#[async_trait::async_trait]
impl ClientT for Client {
    async fn submit_transaction<Message_: Message>(
        &self,
        transaction: Transaction<Message_>,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error> {
        let tx_included_future = self.backend.submit(transaction.extrinsic).await?;
        Ok(Box::pin(async move {
            let tx_included = tx_included_future.await?;
            let events = tx_included.events;
            let tx_hash = tx_included.tx_hash;
            let result = Message_::result_from_events(events.clone())
                .map_err(|error| Error::EventExtraction { error, tx_hash })?;
            Ok(TransactionIncluded {
                tx_hash,
                block: tx_included.block,
                events,
                result,
            })
        }))
    }

    async fn sign_and_submit_message<Message_: Message>(
        &self,
        author: &ed25519::Pair,
        message: Message_,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error> {
        let account_id = author.public();
        let nonce = self.account_nonce(&account_id).await?;
        let transaction_extra = TransactionExtra {
            nonce,
            genesis_hash: self.genesis_hash(),
        };
        let transaction = Transaction::new_signed(author, message, transaction_extra);
        log::debug!(
            "Submitting transaction {} from {} with nonce {}",
            transaction.hash(),
            account_id,
            nonce
        );
        self.submit_transaction(transaction).await
    }

    async fn account_nonce(
        &self,
        account_id: &AccountId,
    ) -> Result<state::AccountTransactionIndex, Error> {
        let account_info = self
            .fetch_map_value::<system::Account<Runtime>, _, AccountInfo>(account_id)
            .await?;
        Ok(account_info.map_or(0, |info| info.nonce))
    }

    async fn block_header(&self, block_hash: BlockHash) -> Result<BlockHeader, Error> {
        self.backend.block_header(Some(block_hash)).await
    }

    async fn block_header_best_chain(&self) -> Result<BlockHeader, Error> {
        self.backend.block_header(None).await
    }

    fn genesis_hash(&self) -> Hash {
        self.backend.get_genesis_hash()
    }

    async fn get_owner(&self) -> Result<Option<AccountId>, Error> {
        self.fetch_value::<ledger::Owner<Runtime>, _>().await
    }

    async fn is_project_admin(&self, account_id: &AccountId) -> Result<bool, Error> {
        if self.get_owner().await?.as_ref() == Some(account_id) {
            return Ok(true);
        }
        let is_admin = self
            .fetch_map_value::<ledger::ProjectAdmins<Runtime>, _, bool>(account_id)
            .await?;
        Ok(is_admin.unwrap_or(false))
    }

    async fn get_contribution(
        &self,
        contribution_id: ContributionId,
    ) -> Result<Option<Contribution>, Error> {
        let data = self
            .fetch_map_value::<ledger::Contributions<Runtime>, _, _>(&contribution_id)
            .await?;
        Ok(data.map(|data| Contribution::new(contribution_id, data)))
    }

    async fn list_contributions(&self) -> Result<Vec<ContributionId>, Error> {
        let mut ids = self
            .fetch_map_keys::<ledger::Contributions<Runtime>, ContributionId, state::Contributions1Data>()
            .await?;
        ids.sort_unstable();
        Ok(ids)
    }

    async fn get_contributor_profile(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ContributorProfile>, Error> {
        let data = self
            .fetch_map_value::<ledger::ContributorProfiles<Runtime>, _, _>(account_id)
            .await?;
        Ok(data.map(|data| ContributorProfile::new(*account_id, data)))
    }

    async fn get_contributor_tier(&self, account_id: &AccountId) -> Result<Tier, Error> {
        let profile = self.get_contributor_profile(account_id).await?;
        let tier = profile
            .map(|profile| profile.tier)
            .ok_or(LedgerError::NotFound)?;
        Ok(tier)
    }
}
