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

//! Getting started with the client by recording and verifying a contribution.
//!
//! Alice initializes the ledger, Dave submits a contribution and Alice verifies it. We then
//! inspect Dave’s contributor profile.

use collab_ledger_client::*;

#[async_std::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    // Key pairs are derived deterministically from a name.
    let alice = ed25519::Pair::from_string("//Alice", None)
        .map_err(|err| format!("Invalid key URI: {:?}", err))?;
    println!("Owner: Alice ({})", alice.public());
    let dave = ed25519::Pair::from_string("//Dave", None)
        .map_err(|err| format!("Invalid key URI: {:?}", err))?;
    println!("Contributor: Dave ({})", dave.public());

    // Run the ledger in memory.
    let client = Client::new_emulator()?;

    // Sign and submit the message. If successful, returns a future that
    // resolves when the transaction is included in a block.
    let initialized = client
        .sign_and_submit_message(&alice, message::Initialize)
        .await?
        .await?;
    println!("Ledger initialized in block {}", initialized.block);

    let details = ContributionDetails::from_string("Wrote the getting started guide".to_string())?;
    let submitted = client
        .sign_and_submit_message(&dave, message::SubmitContribution { details })
        .await?
        .await?;

    // The result tells us whether the ledger accepted the message.
    let contribution_id = match submitted.result {
        Ok(contribution_id) => contribution_id,
        Err(err) => {
            println!("Failed to submit contribution: {}", err);
            return Ok(());
        }
    };
    println!("Submitted contribution {}", contribution_id);

    let verified = client
        .sign_and_submit_message(
            &alice,
            message::VerifyContribution {
                contribution_id,
                score: 120,
            },
        )
        .await?
        .await?;
    match verified.result {
        Ok(()) => println!("Contribution verified"),
        Err(err) => println!("Failed to verify contribution: {}", err),
    }

    // The tier is only updated on request.
    let tier = client
        .sign_and_submit_message(
            &alice,
            message::UpdateContributorTier {
                contributor: dave.public(),
            },
        )
        .await?
        .await?
        .result;
    println!("Tier update: {:?}", tier);

    if let Some(profile) = client.get_contributor_profile(&dave.public()).await? {
        println!(
            "Dave: {} contribution(s), total score {}, tier {}",
            profile.contribution_count, profile.total_score, profile.tier
        );
    }

    Ok(())
}
