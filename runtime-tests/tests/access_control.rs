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

/// Runtime tests implemented with the emulated [Client].
///
/// High-level runtime tests that only use the emulated [Client] and treat the runtime as a black
/// box.
///
/// The tests in this module concern ledger initialization and project admins.
use collab_ledger_client::*;
use collab_ledger_test_utils::*;

#[async_std::test]
async fn initialize() {
    let client = Client::new_emulator().unwrap();
    let owner = random_key_pair();
    assert_eq!(client.get_owner().await.unwrap(), None);
    assert!(!client.is_project_admin(&owner.public()).await.unwrap());

    let tx_included = submit_ok(&client, &owner, message::Initialize).await;
    assert_eq!(tx_included.result, Ok(()));
    let event = LedgerEvent::LedgerInitialized {
        owner: owner.public(),
    };
    assert!(tx_included.events.contains(&event.into()));

    assert_eq!(client.get_owner().await.unwrap(), Some(owner.public()));
    assert!(client.is_project_admin(&owner.public()).await.unwrap());
    let other = random_key_pair();
    assert!(!client.is_project_admin(&other.public()).await.unwrap());
}

#[async_std::test]
async fn initialize_twice() {
    let (client, owner) = initialized_client().await;
    let intruder = random_key_pair();

    let tx_included = submit_ok(&client, &intruder, message::Initialize).await;
    assert_eq!(tx_included.result, Err(LedgerError::AlreadyInitialized));
    assert_eq!(client.get_owner().await.unwrap(), Some(owner.public()));

    // The failed transaction still uses up the nonce of the author.
    assert_eq!(client.account_nonce(&intruder.public()).await.unwrap(), 1);
}

#[async_std::test]
async fn add_project_admin() {
    let (client, owner) = initialized_client().await;
    let admin = random_key_pair();

    let tx_included = submit_ok(
        &client,
        &owner,
        message::AddProjectAdmin {
            account_id: admin.public(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));
    let event = LedgerEvent::ProjectAdminAdded {
        account_id: admin.public(),
    };
    assert!(tx_included.events.contains(&event.into()));
    assert!(client.is_project_admin(&admin.public()).await.unwrap());
}

#[async_std::test]
async fn add_project_admin_owner_only() {
    let (client, owner) = initialized_client().await;
    let admin = random_admin(&client, &owner).await;
    let candidate = random_key_pair();

    for author in &[&admin, &candidate] {
        let tx_included = submit_ok(
            &client,
            author,
            message::AddProjectAdmin {
                account_id: candidate.public(),
            },
        )
        .await;
        assert_eq!(tx_included.result, Err(LedgerError::OwnerOnly));
    }
    assert!(!client.is_project_admin(&candidate.public()).await.unwrap());
}

#[async_std::test]
async fn invalid_transaction_is_rejected() {
    let (client, owner) = initialized_client().await;
    let best_block = client.block_header_best_chain().await.unwrap();

    let stale_tx = Transaction::new_signed(
        &owner,
        message::Initialize,
        TransactionExtra {
            nonce: 0,
            genesis_hash: client.genesis_hash(),
        },
    );
    let result = client.submit_transaction(stale_tx).await;
    assert!(matches!(
        result,
        Err(Error::InvalidTransaction(TransactionValidityError::Invalid(
            InvalidTransaction::Stale
        )))
    ));
    assert_eq!(client.block_header_best_chain().await.unwrap(), best_block);
}
