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
/// The tests in this module concern submitting and verifying contributions.
use collab_ledger_client::*;
use collab_ledger_test_utils::*;

#[async_std::test]
async fn submit_contribution() {
    let client = Client::new_emulator().unwrap();
    let contributor = random_key_pair();
    let details = random_details();
    assert_eq!(
        client
            .get_contributor_profile(&contributor.public())
            .await
            .unwrap(),
        None
    );

    let tx_included = submit_ok(
        &client,
        &contributor,
        message::SubmitContribution {
            details: details.clone(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(1));
    let event = LedgerEvent::ContributionSubmitted {
        contribution_id: 1,
        contributor: contributor.public(),
    };
    assert!(tx_included.events.contains(&event.into()));

    let contribution = client.get_contribution(1).await.unwrap().unwrap();
    assert_eq!(
        contribution,
        Contribution {
            id: 1,
            contributor: contributor.public(),
            details,
            score: 0,
            verified: false,
        }
    );

    let profile = client
        .get_contributor_profile(&contributor.public())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        profile,
        ContributorProfile {
            account_id: contributor.public(),
            total_score: 0,
            contribution_count: 1,
            tier: Tier::Bronze,
            is_active: true,
        }
    );
}

#[async_std::test]
async fn contribution_ids_increase_across_contributors() {
    let (client, _) = initialized_client().await;
    let alice = random_key_pair();
    let bob = random_key_pair();

    assert_eq!(submit_random_contribution(&client, &alice).await, 1);
    assert_eq!(submit_random_contribution(&client, &bob).await, 2);
    assert_eq!(submit_random_contribution(&client, &alice).await, 3);
    assert_eq!(client.list_contributions().await.unwrap(), vec![1, 2, 3]);
    assert_eq!(client.get_contribution(4).await.unwrap(), None);

    let profile = client
        .get_contributor_profile(&alice.public())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.contribution_count, 2);
}

#[async_std::test]
async fn verify_contribution() {
    let (client, owner) = initialized_client().await;
    let contributor = random_key_pair();
    let contribution_id = submit_random_contribution(&client, &contributor).await;

    let tx_included = submit_ok(
        &client,
        &owner,
        message::VerifyContribution {
            contribution_id,
            score: 150,
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));
    let event = LedgerEvent::ContributionVerified {
        contribution_id,
        score: 150,
    };
    assert!(tx_included.events.contains(&event.into()));

    let contribution = client
        .get_contribution(contribution_id)
        .await
        .unwrap()
        .unwrap();
    assert!(contribution.verified);
    assert_eq!(contribution.score, 150);

    let profile = client
        .get_contributor_profile(&contributor.public())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.total_score, 150);
}

#[async_std::test]
async fn verify_contribution_by_admin() {
    let (client, owner) = initialized_client().await;
    let admin = random_admin(&client, &owner).await;
    let contributor = random_key_pair();
    let contribution_id = submit_random_contribution(&client, &contributor).await;

    verify(&client, &admin, contribution_id, 30).await;
    let contribution = client
        .get_contribution(contribution_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(contribution.score, 30);
}

#[async_std::test]
async fn verify_contribution_unauthorized() {
    let (client, _) = initialized_client().await;
    let contributor = random_key_pair();
    let contribution_id = submit_random_contribution(&client, &contributor).await;

    // Contributors cannot verify their own contributions.
    let tx_included = submit_ok(
        &client,
        &contributor,
        message::VerifyContribution {
            contribution_id,
            score: 1000,
        },
    )
    .await;
    assert_eq!(tx_included.result, Err(LedgerError::OwnerOnly));

    // Authorization is checked before the contribution is looked up.
    let tx_included = submit_ok(
        &client,
        &contributor,
        message::VerifyContribution {
            contribution_id: 99,
            score: 1000,
        },
    )
    .await;
    assert_eq!(tx_included.result, Err(LedgerError::OwnerOnly));

    let contribution = client
        .get_contribution(contribution_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!contribution.verified);
}

#[async_std::test]
async fn verify_unknown_contribution() {
    let (client, owner) = initialized_client().await;
    let tx_included = submit_ok(
        &client,
        &owner,
        message::VerifyContribution {
            contribution_id: 7,
            score: 10,
        },
    )
    .await;
    assert_eq!(tx_included.result, Err(LedgerError::NotFound));
}

#[async_std::test]
async fn verify_contribution_twice() {
    let (client, owner) = initialized_client().await;
    let contributor = random_key_pair();
    let contribution_id = submit_random_contribution(&client, &contributor).await;
    verify(&client, &owner, contribution_id, 40).await;

    let tx_included = submit_ok(
        &client,
        &owner,
        message::VerifyContribution {
            contribution_id,
            score: 80,
        },
    )
    .await;
    assert_eq!(tx_included.result, Err(LedgerError::AlreadyVerified));

    let contribution = client
        .get_contribution(contribution_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(contribution.score, 40);
    let profile = client
        .get_contributor_profile(&contributor.public())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.total_score, 40);
}
