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

//! Provide an abstract trait for the ledger client and the necessary types.
//!
//! The [ClientT] trait defines methods to submit ledger messages as well as methods to get the
//! ledger state.
use futures::future::BoxFuture;
use serde::Serialize;

pub use collab_ledger_core::*;

pub use collab_ledger_runtime::{BlockNumber, Hash, Header, RuntimeEvent as Event};
pub use sp_core::crypto::{Pair as CryptoPair, Public as CryptoPublic, Ss58Codec};
pub use sp_core::ed25519;
pub use sp_runtime::transaction_validity::{InvalidTransaction, TransactionValidityError};

/// Event emitted by the ledger pallet.
pub type LedgerEvent = collab_ledger_runtime::ledger::Event<collab_ledger_runtime::Runtime>;

/// Event emitted by the `frame_system` pallet.
pub type SystemEvent = collab_ledger_runtime::system::Event<collab_ledger_runtime::Runtime>;

pub use crate::error::Error;
pub use crate::message::Message;
pub use crate::transaction::{Transaction, TransactionExtra};

/// The hash of a block. Uniquely identifies a block.
#[doc(inline)]
pub type BlockHash = Hash;

/// The hash of a transaction. Uniquely identifies a transaction.
#[doc(inline)]
pub type TxHash = Hash;

/// The header of a block
#[doc(inline)]
pub type BlockHeader = Header;

/// Result of a transaction being included in a block.
///
/// Returned after submitting an transaction to the ledger.
#[derive(Clone, Debug)]
pub struct TransactionIncluded<Message_: Message> {
    pub tx_hash: TxHash,
    /// The hash of the block the transaction is included in.
    pub block: Hash,
    /// Events emitted by this transaction
    pub events: Vec<Event>,
    /// The result of the ledger message.
    ///
    /// See [Message::result_from_events].
    pub result: Result<Message_::Output, LedgerError>,
}

/// Return type for all [ClientT] methods.
pub type Response<T, Error> = BoxFuture<'static, Result<T, Error>>;

/// A contribution as returned by [ClientT::get_contribution].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Contribution {
    pub id: ContributionId,
    pub contributor: AccountId,
    pub details: ContributionDetails,
    pub score: Score,
    pub verified: bool,
}

impl Contribution {
    pub fn new(id: ContributionId, data: state::Contributions1Data) -> Self {
        Contribution {
            id,
            contributor: data.contributor(),
            details: data.details().clone(),
            score: data.score(),
            verified: data.verified(),
        }
    }
}

/// A contributor profile as returned by [ClientT::get_contributor_profile].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ContributorProfile {
    pub account_id: AccountId,
    pub total_score: Score,
    pub contribution_count: u64,
    pub tier: Tier,
    pub is_active: bool,
}

impl ContributorProfile {
    pub fn new(account_id: AccountId, data: state::ContributorProfiles1Data) -> Self {
        ContributorProfile {
            account_id,
            total_score: data.total_score(),
            contribution_count: data.contribution_count(),
            tier: data.tier(),
            is_active: data.is_active(),
        }
    }
}

/// Trait for ledger clients sending transactions and looking up state.
#[async_trait::async_trait]
pub trait ClientT {
    /// Submit a signed transaction.
    ///
    /// ```no_run
    /// # use collab_ledger_client::*;
    /// # async fn example<M: Message>(client: Client, tx: Transaction<M>) -> Result<(), Error> {
    ///
    /// // Submit the transaction to the ledger.
    /// //
    /// // This call fails if the transaction is invalid, for example because the nonce has
    /// // already been used.
    /// let tx_included_fut = client.submit_transaction(tx).await?;
    ///
    /// // We can now wait for the transaction to be included in a block.
    /// //
    /// // This will not error if the ledger rejected the message. See
    /// // TransactionIncluded::result for that.
    /// let tx_included = tx_included_fut.await?;
    ///
    /// Ok(())
    /// # }
    /// ```
    ///
    /// See the `getting_started` example for more details.
    async fn submit_transaction<Message_: Message>(
        &self,
        transaction: Transaction<Message_>,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error>;

    /// Sign and submit a ledger message as a transaction.
    ///
    /// Same as [ClientT::submit_transaction] but takes care of signing the message.
    async fn sign_and_submit_message<Message_: Message>(
        &self,
        author: &ed25519::Pair,
        message: Message_,
    ) -> Result<Response<TransactionIncluded<Message_>, Error>, Error>;

    /// Fetch the nonce for the given account from the ledger state
    async fn account_nonce(
        &self,
        account_id: &AccountId,
    ) -> Result<state::AccountTransactionIndex, Error>;

    /// Fetch the header of the given block hash
    async fn block_header(&self, block_hash: BlockHash) -> Result<BlockHeader, Error>;

    /// Fetch the header of the latest block
    async fn block_header_best_chain(&self) -> Result<BlockHeader, Error>;

    /// Return the gensis hash of the ledger we are communicating with.
    fn genesis_hash(&self) -> Hash;

    /// The owner of the ledger or `None` if the ledger has not been initialized.
    async fn get_owner(&self) -> Result<Option<AccountId>, Error>;

    /// True if the account is the owner or a project admin.
    async fn is_project_admin(&self, account_id: &AccountId) -> Result<bool, Error>;

    async fn get_contribution(
        &self,
        contribution_id: ContributionId,
    ) -> Result<Option<Contribution>, Error>;

    /// IDs of all contributions in ascending order.
    async fn list_contributions(&self) -> Result<Vec<ContributionId>, Error>;

    async fn get_contributor_profile(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<ContributorProfile>, Error>;

    /// The tier stored in the profile of the contributor.
    ///
    /// Fails with [LedgerError::NotFound] if the account has no contributor profile.
    async fn get_contributor_tier(&self, account_id: &AccountId) -> Result<Tier, Error>;
}
