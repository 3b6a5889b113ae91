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

//! Miscellaneous helpers used throughout ledger tests.

use rand::distributions::Alphanumeric;
use rand::Rng;

use collab_ledger_client::*;

/// Submit a transaction and wait for it to be successfully applied.
///
/// Panics if submission errors. The ledger result is returned as part of
/// [TransactionIncluded] and may still be an error.
pub async fn submit_ok<Message_: Message>(
    client: &Client,
    author: &ed25519::Pair,
    message: Message_,
) -> TransactionIncluded<Message_> {
    client
        .sign_and_submit_message(author, message)
        .await
        .unwrap()
        .await
        .unwrap()
}

/// Create a client with an emulated ledger that was initialized by the returned owner.
pub async fn initialized_client() -> (Client, ed25519::Pair) {
    let client = Client::new_emulator().unwrap();
    let owner = key_pair_from_string("Alice");
    let tx_included = submit_ok(&client, &owner, message::Initialize).await;
    assert_eq!(tx_included.result, Ok(()));
    (client, owner)
}

/// Add a random key pair as project admin.
pub async fn random_admin(client: &Client, owner: &ed25519::Pair) -> ed25519::Pair {
    let admin = random_key_pair();
    let tx_included = submit_ok(
        client,
        owner,
        message::AddProjectAdmin {
            account_id: admin.public(),
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));
    admin
}

/// Submit a contribution with random details and return its ID.
pub async fn submit_random_contribution(
    client: &Client,
    contributor: &ed25519::Pair,
) -> ContributionId {
    submit_ok(
        client,
        contributor,
        message::SubmitContribution {
            details: random_details(),
        },
    )
    .await
    .result
    .unwrap()
}

/// Verify a contribution with the given score. Panics if the verification fails.
pub async fn verify(
    client: &Client,
    admin: &ed25519::Pair,
    contribution_id: ContributionId,
    score: Score,
) {
    let tx_included = submit_ok(
        client,
        admin,
        message::VerifyContribution {
            contribution_id,
            score,
        },
    )
    .await;
    assert_eq!(tx_included.result, Ok(()));
}

/// Derive the key pair for the hard derivation path `//value`.
pub fn key_pair_from_string(value: impl AsRef<str>) -> ed25519::Pair {
    ed25519::Pair::from_string(&format!("//{}", value.as_ref()), None).unwrap()
}

pub fn random_key_pair() -> ed25519::Pair {
    ed25519::Pair::generate().0
}

/// Create [ContributionDetails] from a random alphanumeric string.
pub fn random_details() -> ContributionDetails {
    let size = rand::thread_rng().gen_range(1..=64);
    ContributionDetails::from_string(random_alnum_string(size))
        .expect("64 characters are below the maximum size")
}

pub fn random_alnum_string(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect::<String>()
}
