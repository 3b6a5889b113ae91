//! Test the client against an emulated ledger that is persisted and restored between steps.

use collab_ledger_client::*;
use collab_ledger_test_utils::*;

#[async_std::test]
async fn snapshot_round_trip() {
    let _ = env_logger::try_init();
    let (client, owner) = initialized_client().await;
    let contributor = key_pair_from_string("Dave");
    let contribution_id = submit_random_contribution(&client, &contributor).await;
    verify(&client, &owner, contribution_id, 120).await;

    let restored = Client::from_snapshot(&client.snapshot().unwrap()).unwrap();
    assert_eq!(restored.genesis_hash(), client.genesis_hash());
    assert_eq!(
        restored.block_header_best_chain().await.unwrap(),
        client.block_header_best_chain().await.unwrap()
    );
    assert_eq!(
        restored.get_contribution(contribution_id).await.unwrap(),
        client.get_contribution(contribution_id).await.unwrap()
    );

    // The restored ledger continues with the nonces and IDs of the original ledger.
    let tx_included = submit_ok(
        &restored,
        &owner,
        message::UpdateContributorTier {
            contributor: contributor.public(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(Tier::Silver));
    assert_eq!(submit_random_contribution(&restored, &contributor).await, 2);

    // The original client is not affected.
    assert_eq!(
        client
            .get_contributor_tier(&contributor.public())
            .await
            .unwrap(),
        Tier::Bronze
    );
}

#[async_std::test]
async fn block_headers() {
    let (client, owner) = initialized_client().await;
    let genesis_header = client.block_header(client.genesis_hash()).await.unwrap();
    assert_eq!(genesis_header.number, 0);

    let tx_included = submit_ok(
        &client,
        &owner,
        message::AddProjectAdmin {
            account_id: random_key_pair().public(),
        },
    )
    .await;
    let header = client.block_header(tx_included.block).await.unwrap();
    assert_eq!(header.number, 2);
    assert_eq!(header, client.block_header_best_chain().await.unwrap());

    let parent = client.block_header(header.parent_hash).await.unwrap();
    assert_eq!(parent.number, 1);
    assert_eq!(parent.parent_hash, client.genesis_hash());
}

#[async_std::test]
async fn contribution_serializes_to_json() {
    let client = Client::new_emulator().unwrap();
    let contributor = key_pair_from_string("Dave");
    let details = ContributionDetails::from_string("Wrote docs".to_string()).unwrap();
    submit_ok(&client, &contributor, message::SubmitContribution { details }).await;

    let contribution = client.get_contribution(1).await.unwrap().unwrap();
    let json = serde_json::to_value(&contribution).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["details"], "Wrote docs");
    assert_eq!(json["verified"], false);
    assert_eq!(json["contributor"], contributor.public().to_string());

    let profile = client
        .get_contributor_profile(&contributor.public())
        .await
        .unwrap()
        .unwrap();
    let json = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["tier"], "BRONZE");
}
