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

//! Define the commands supported by the CLI related to ledger ownership and administration.

use super::*;

/// Ledger related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    Initialize(Initialize),
    AddAdmin(AddAdmin),
    IsAdmin(IsAdmin),
    Owner(Owner),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Initialize(cmd) => cmd.run(command_context).await,
            Command::AddAdmin(cmd) => cmd.run(command_context).await,
            Command::IsAdmin(cmd) => cmd.run(command_context).await,
            Command::Owner(cmd) => cmd.run(command_context).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Initialize the ledger. The author becomes the owner.
pub struct Initialize {
    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for Initialize {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        submit(command_context, &self.tx_options, message::Initialize).await?;
        println!(
            "✓ Ledger initialized with owner {}",
            self.tx_options.author.public()
        );
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Grant an account the privilege to verify contributions and update tiers.
/// Only the owner can add admins.
pub struct AddAdmin {
    /// Account ID of the new admin in SS58 format.
    #[structopt(parse(try_from_str = parse_account_id))]
    account_id: AccountId,

    #[structopt(flatten)]
    tx_options: TxOptions,
}

#[async_trait::async_trait]
impl CommandT for AddAdmin {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        submit(
            command_context,
            &self.tx_options,
            message::AddProjectAdmin {
                account_id: self.account_id,
            },
        )
        .await?;
        println!("✓ {} is now a project admin", self.account_id);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Check whether an account is the owner or a project admin.
pub struct IsAdmin {
    /// Account ID in SS58 format.
    #[structopt(parse(try_from_str = parse_account_id))]
    account_id: AccountId,
}

#[async_trait::async_trait]
impl CommandT for IsAdmin {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        let is_admin = command_context
            .client
            .is_project_admin(&self.account_id)
            .await?;
        println!("{}", is_admin);
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
/// Show the owner of the ledger.
pub struct Owner {}

#[async_trait::async_trait]
impl CommandT for Owner {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        match command_context.client.get_owner().await? {
            Some(owner) => println!("{}", owner),
            None => println!("The ledger has not been initialized"),
        }
        Ok(())
    }
}
