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

//! Define the commands supported by the CLI related to contributors.

use super::*;

/// Contributor related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Show(Show),
    Tier(ShowTier),
    UpdateTier(UpdateTier),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Show(cmd) => cmd.run(command_context).await,
            Command::Tier(cmd) => cmd.run(command_context).await,
            Command::UpdateTier(cmd) => cmd.run(command_context).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show the profile of a contributor as JSON.
pub struct Show {
    /// Account ID of the contributor in SS58 format.
    #[structopt(parse(try_from_str = parse_account_id))]
    account_id: AccountId,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let profile = command_context
            .client
            .get_contributor_profile(&self.account_id)
            .await?
            .ok_or(CommandError::ContributorNotFound {
                account_id: self.account_id,
            })?;
        print_json(&profile)
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show the stored tier of a contributor.
///
/// The tier only changes when it is updated with `update-tier`.
pub struct ShowTier {
    /// Account ID of the contributor in SS58 format.
    #[structopt(parse(try_from_str = parse_account_id))]
    account_id: AccountId,
}

#[async_trait::async_trait]
impl CommandT for ShowTier {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let tier = command_context
            .client
            .get_contributor_tier(&self.account_id)
            .await?;
        println!("{} ({})", tier, tier.code());
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Recompute the tier of a contributor from their total score.
/// The author needs to be the owner or a project admin.
pub struct UpdateTier {
    /// Account ID of the contributor in SS58 format.
    #[structopt(parse(try_from_str = parse_account_id))]
    account_id: AccountId,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for UpdateTier {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let tier = submit(
            command_context,
            &self.tx_options,
            message::UpdateContributorTier {
                contributor: self.account_id,
            },
        )
        .await?;
        println!("✓ Contributor {} is now {}", self.account_id, tier);
        Ok(())
    }
}
