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

//! Define the commands supported by the CLI related to contributions.

use super::*;

/// Contribution related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Submit(Submit),
    Verify(Verify),
    Show(Show),
    List(List),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Submit(cmd) => cmd.run(command_context).await,
            Command::Verify(cmd) => cmd.run(command_context).await,
            Command::Show(cmd) => cmd.run(command_context).await,
            Command::List(cmd) => cmd.run(command_context).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Submit a contribution authored by the key pair given with `--author`.
pub struct Submit {
    /// Description of the contribution. At most 256 bytes.
    details: ContributionDetails,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Submit {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let contribution_id = submit(
            command_context,
            &self.tx_options,
            message::SubmitContribution {
                details: self.details.clone(),
            },
        )
        .await?;
        println!("✓ Contribution {} submitted", contribution_id);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Verify a contribution and award it a score.
/// The author needs to be the owner or a project admin.
pub struct Verify {
    contribution_id: ContributionId,

    score: Score,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Verify {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        submit(
            command_context,
            &self.tx_options,
            message::VerifyContribution {
                contribution_id: self.contribution_id,
                score: self.score,
            },
        )
        .await?;
        println!(
            "✓ Contribution {} verified with score {}",
            self.contribution_id, self.score
        );
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show a contribution as JSON.
pub struct Show {
    contribution_id: ContributionId,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let contribution = command_context
            .client
            .get_contribution(self.contribution_id)
            .await?
            .ok_or(CommandError::ContributionNotFound {
                contribution_id: self.contribution_id,
            })?;
        print_json(&contribution)
    }
}

#[derive(StructOpt, Debug, Clone)]
/// List the IDs of all contributions.
pub struct List {}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let contribution_ids = command_context.client.list_contributions().await?;
        println!("CONTRIBUTIONS ({})", contribution_ids.len());
        for contribution_id in contribution_ids {
            println!("{}", contribution_id)
        }
        Ok(())
    }
}
