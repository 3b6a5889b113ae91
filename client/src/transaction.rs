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

//! Provides [Transaction] and [TransactionExtra].
use core::marker::PhantomData;

use parity_scale_codec::Encode as _;
use sp_core::{ed25519, Pair as _};
use sp_runtime::traits::Hash as _;

use collab_ledger_core::{state::AccountTransactionIndex, Hash, Hashing};
use collab_ledger_runtime::{ledger, system, SignedExtra, SignedPayload, UncheckedExtrinsic};

use crate::{message::Message, TxHash};

#[derive(Clone, Debug)]
/// Transaction the can be submitted to the ledger.
///
/// A transaction includes
/// * the author
/// * the ledger message
/// * extra data like the gensis hash and account nonce
/// * a valid signature
///
/// The transaction type is generic over the ledger message parameter which must implement
/// [Message].
///
/// A transaction can be created with [Transaction::new_signed]. The necessary transaction data
/// must be obtained from the client with [crate::ClientT::account_nonce] and
/// [crate::ClientT::genesis_hash].
pub struct Transaction<Message_: Message> {
    _phantom_data: PhantomData<Message_>,
    pub(crate) extrinsic: UncheckedExtrinsic,
}

impl<Message_: Message> Transaction<Message_> {
    /// Create and sign a transaction for the given message.
    pub fn new_signed(
        signer: &ed25519::Pair,
        message: Message_,
        transaction_extra: TransactionExtra,
    ) -> Self {
        let extrinsic = signed_extrinsic(signer, message.into_runtime_call(), transaction_extra);
        Transaction {
            _phantom_data: PhantomData,
            extrinsic,
        }
    }

    pub fn hash(&self) -> TxHash {
        Hashing::hash_of(&self.extrinsic)
    }
}

/// The data that is required from the ledger to create and sign a transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TransactionExtra {
    pub nonce: AccountTransactionIndex,
    pub genesis_hash: Hash,
}

/// Return a properly signed [UncheckedExtrinsic] for the given parameters that passes all
/// validation checks. See the `Checkable` implementation of [UncheckedExtrinsic] for how
/// validation is performed.
fn signed_extrinsic(
    signer: &ed25519::Pair,
    call: collab_ledger_runtime::RuntimeCall,
    transaction_extra: TransactionExtra,
) -> UncheckedExtrinsic {
    let (runtime_extra, additional_signed) = transaction_extra_to_runtime_extra(transaction_extra);
    let raw_payload = SignedPayload::from_raw(call, runtime_extra, additional_signed);
    let signature = raw_payload.using_encoded(|payload| signer.sign(payload));
    let (call, extra, _) = raw_payload.deconstruct();
    UncheckedExtrinsic::new_signed(call, signer.public(), signature, extra)
}

/// Return the [SignedExtra] data that is part of [UncheckedExtrinsic] and the associated
/// `AdditionalSigned` data included in the signature.
fn transaction_extra_to_runtime_extra(
    extra: TransactionExtra,
) -> (SignedExtra, (Hash, (), ())) {
    let check_genesis = system::CheckGenesis::new();
    let provide_account = ledger::ProvideSenderAccount::new();
    let check_nonce = system::CheckNonce::from(extra.nonce);

    let additional_signed = (extra.genesis_hash, (), ());
    let runtime_extra = (check_genesis, provide_account, check_nonce);

    (runtime_extra, additional_signed)
}
