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

//! Provides [Emulator] backend to run the ledger in memory.

use futures::future::BoxFuture;
use parity_scale_codec::{Decode, DecodeAll as _, Encode};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use frame_support::storage::{unhashed, with_transaction, TransactionOutcome};
use sp_core::storage::Storage;
use sp_runtime::traits::{Hash as _, Header as _};
use sp_runtime::DispatchError;

use collab_ledger_runtime::{runtime_api, Hashing, Header, Runtime};

use crate::backend;
use crate::interface::*;

/// [backend::Backend] implementation using native runtime code and in memory state through
/// [sp_io::TestExternalities] to emulate the ledger.
///
/// Every [backend::Backend::submit] call creates a new block that only contains the submitted
/// transaction. If the transaction is invalid no block is created and the state is unchanged.
#[derive(Clone)]
pub struct Emulator {
    genesis_hash: Hash,
    state: Arc<Mutex<EmulatorState>>,
}

/// Mutable state of the emulator.
struct EmulatorState {
    test_ext: sp_io::TestExternalities,
    tip_header: Header,
    headers: HashMap<BlockHash, Header>,
}

/// Persisted form of the emulator state.
#[derive(Encode, Decode)]
struct Snapshot {
    /// All key-value pairs of the state storage.
    storage: Vec<(Vec<u8>, Vec<u8>)>,
    /// All block headers ordered by block number. The first header is the genesis header.
    headers: Vec<Header>,
}

impl Emulator {
    /// Create an emulator for a fresh ledger that has not been initialized.
    pub fn new() -> Result<Self, Error> {
        let mut test_ext = sp_io::TestExternalities::new(runtime_api::genesis_storage()?);
        let genesis_header = test_ext.execute_with(runtime_api::genesis_header);
        let genesis_hash = genesis_header.hash();
        let mut headers = HashMap::new();
        headers.insert(genesis_hash, genesis_header.clone());

        Ok(Emulator {
            genesis_hash,
            state: Arc::new(Mutex::new(EmulatorState {
                test_ext,
                tip_header: genesis_header,
                headers,
            })),
        })
    }

    /// Restore an emulator from data created with [backend::Backend::export_snapshot].
    ///
    /// Fails if `data` is not exactly one encoded snapshot.
    pub fn from_snapshot(data: &[u8]) -> Result<Self, Error> {
        let snapshot = Snapshot::decode_all(&mut &data[..])?;
        let tip_header = snapshot
            .headers
            .iter()
            .max_by_key(|header| header.number)
            .cloned()
            .ok_or("Snapshot does not contain any block headers")?;
        let genesis_hash = snapshot
            .headers
            .iter()
            .find(|header| header.number == 0)
            .map(|header| header.hash())
            .ok_or("Snapshot does not contain the genesis header")?;
        let headers = snapshot
            .headers
            .into_iter()
            .map(|header| (header.hash(), header))
            .collect::<HashMap<_, _>>();
        let storage = Storage {
            top: snapshot.storage.into_iter().collect::<BTreeMap<_, _>>(),
            children_default: Default::default(),
        };
        log::debug!(
            "Restored emulated ledger at block #{} ({})",
            tip_header.number,
            tip_header.hash()
        );

        Ok(Emulator {
            genesis_hash,
            state: Arc::new(Mutex::new(EmulatorState {
                test_ext: sp_io::TestExternalities::new(storage),
                tip_header,
                headers,
            })),
        })
    }

    /// Build a block containing only `extrinsic` on top of the current tip.
    fn apply(
        &self,
        extrinsic: backend::UncheckedExtrinsic,
    ) -> Result<backend::TransactionIncluded, Error> {
        let tx_hash = Hashing::hash_of(&extrinsic);
        let mut state = self.state.lock();
        let new_tip_header_init = Header::new(
            state.tip_header.number + 1,
            Default::default(),
            Default::default(),
            state.tip_header.hash(),
            Default::default(),
        );

        let block_result = state.test_ext.execute_with(move || {
            with_transaction::<_, DispatchError, _>(move || {
                runtime_api::initialize_block(&new_tip_header_init);
                // The dispatch result is provided through the system events.
                if let Err(error) = runtime_api::apply_extrinsic(extrinsic) {
                    return TransactionOutcome::Rollback(Ok(Err(error)));
                }
                let events = frame_system::Pallet::<Runtime>::events()
                    .into_iter()
                    .map(|event_record| event_record.event)
                    .collect::<Vec<Event>>();
                let header = runtime_api::finalize_block();
                TransactionOutcome::Commit(Ok(Ok((header, events))))
            })
        });
        let (header, events) = block_result
            .map_err(|error| Error::Other(format!("Failed to build block: {:?}", error)))??;

        let block_hash = header.hash();
        log::debug!(
            "Transaction {} included in block #{} ({})",
            tx_hash,
            header.number,
            block_hash
        );
        state.tip_header = header.clone();
        state.headers.insert(block_hash, header);

        Ok(backend::TransactionIncluded {
            tx_hash,
            block: block_hash,
            events,
        })
    }
}

/// All keys in the state storage of the current externalities that start with `prefix`.
fn keys_with_prefix(prefix: &[u8]) -> Vec<Vec<u8>> {
    let mut keys = Vec::new();
    if unhashed::exists(prefix) {
        keys.push(prefix.to_vec());
    }
    let mut previous_key = prefix.to_vec();
    while let Some(key) = sp_io::storage::next_key(&previous_key) {
        if !key.starts_with(prefix) {
            break;
        }
        keys.push(key.clone());
        previous_key = key;
    }
    keys
}

#[async_trait::async_trait]
impl backend::Backend for Emulator {
    async fn submit(
        &self,
        extrinsic: backend::UncheckedExtrinsic,
    ) -> Result<BoxFuture<'static, Result<backend::TransactionIncluded, Error>>, Error> {
        let tx_included = self.apply(extrinsic)?;
        Ok(Box::pin(futures::future::ready(Ok(tx_included))))
    }

    async fn fetch(&self, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        let mut state = self.state.lock();
        Ok(state.test_ext.execute_with(|| unhashed::get_raw(key)))
    }

    async fn fetch_keys(&self, prefix: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
        let mut state = self.state.lock();
        Ok(state.test_ext.execute_with(|| keys_with_prefix(prefix)))
    }

    async fn block_header(&self, block_hash_opt: Option<BlockHash>) -> Result<BlockHeader, Error> {
        let state = self.state.lock();
        let block_hash = match block_hash_opt {
            Some(block_hash) => block_hash,
            None => return Ok(state.tip_header.clone()),
        };
        state
            .headers
            .get(&block_hash)
            .cloned()
            .ok_or_else(|| format!("No block header found for hash {}", block_hash).into())
    }

    fn get_genesis_hash(&self) -> Hash {
        self.genesis_hash
    }

    fn export_snapshot(&self) -> Result<Vec<u8>, Error> {
        let mut state = self.state.lock();
        let storage = state.test_ext.execute_with(|| {
            keys_with_prefix(&[])
                .into_iter()
                .filter_map(|key| unhashed::get_raw(&key).map(|value| (key, value)))
                .collect::<Vec<_>>()
        });
        let mut headers = state.headers.values().cloned().collect::<Vec<_>>();
        headers.sort_by_key(|header| header.number);
        Ok(Snapshot { storage, headers }.encode())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::Backend as _;
    use crate::{message, Transaction};
    use collab_ledger_runtime::ledger;
    use frame_support::storage::StorageValue as _;

    fn initialize_extrinsic(emulator: &Emulator, nonce: u32) -> backend::UncheckedExtrinsic {
        let alice = ed25519::Pair::from_string("//Alice", None).unwrap();
        let transaction = Transaction::new_signed(
            &alice,
            message::Initialize,
            TransactionExtra {
                nonce,
                genesis_hash: emulator.get_genesis_hash(),
            },
        );
        transaction.extrinsic
    }

    #[async_std::test]
    async fn invalid_transaction_creates_no_block() {
        let emulator = Emulator::new().unwrap();
        let genesis_header = emulator.block_header(None).await.unwrap();
        let snapshot = emulator.export_snapshot().unwrap();

        let result = emulator.apply(initialize_extrinsic(&emulator, 1));
        assert!(matches!(
            result,
            Err(Error::InvalidTransaction(TransactionValidityError::Invalid(
                InvalidTransaction::Future
            )))
        ));
        assert_eq!(emulator.block_header(None).await.unwrap(), genesis_header);
        assert_eq!(emulator.export_snapshot().unwrap(), snapshot);
    }

    #[async_std::test]
    async fn blocks_extend_the_tip() {
        let emulator = Emulator::new().unwrap();
        let genesis_hash = emulator.get_genesis_hash();
        let included = emulator.apply(initialize_extrinsic(&emulator, 0)).unwrap();

        let tip = emulator.block_header(None).await.unwrap();
        assert_eq!(tip.number, 1);
        assert_eq!(tip.parent_hash, genesis_hash);
        assert_eq!(tip.hash(), included.block);
        assert_eq!(
            emulator.block_header(Some(genesis_hash)).await.unwrap().number,
            0
        );
    }

    #[async_std::test]
    async fn snapshot_restores_state() {
        let emulator = Emulator::new().unwrap();
        let included = emulator.apply(initialize_extrinsic(&emulator, 0)).unwrap();
        let owner_key = ledger::Owner::<Runtime>::hashed_key();

        let restored = Emulator::from_snapshot(&emulator.export_snapshot().unwrap()).unwrap();
        assert_eq!(restored.get_genesis_hash(), emulator.get_genesis_hash());
        let tip = restored.block_header(None).await.unwrap();
        assert_eq!(tip.number, 1);
        assert_eq!(tip.hash(), included.block);
        assert!(restored.fetch(&owner_key).await.unwrap().is_some());
        assert_eq!(
            restored.fetch(&owner_key).await.unwrap(),
            emulator.fetch(&owner_key).await.unwrap()
        );

        // The restored ledger accepts the next transaction of the same account.
        let next = restored.apply(initialize_extrinsic(&restored, 1)).unwrap();
        assert_eq!(restored.block_header(None).await.unwrap().hash(), next.block);
    }

    #[test]
    fn corrupt_snapshot() {
        assert!(Emulator::from_snapshot(&[1, 2, 3]).is_err());
    }

    #[test]
    fn snapshot_with_trailing_bytes_is_rejected() {
        let emulator = Emulator::new().unwrap();
        let mut data = emulator.export_snapshot().unwrap();
        assert!(Emulator::from_snapshot(&data).is_ok());

        data.extend_from_slice(b"garbage appended");
        assert!(Emulator::from_snapshot(&data).is_err());
    }
}
