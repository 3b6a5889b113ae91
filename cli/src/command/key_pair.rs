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

//! Define the commands supported by the CLI related to key-pairs.

use super::*;
use crate::key_pair_storage;

/// Key-pair related commands
#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Generate a random key-pair identified by `name` and
    /// store it on disk. Fail if there is already a key-pair
    /// with the given `name`.
    Generate(Generate),
    /// List all the local key pairs.
    List(List),
    /// Show the account ID of a local key pair.
    Show(Show),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::Generate(cmd) => cmd.run(command_context).await,
            Command::List(cmd) => cmd.run(command_context).await,
            Command::Show(cmd) => cmd.run(command_context).await,
        }
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Generate {
    /// The name that uniquely identifies the key-pair locally.
    name: String,
}

#[async_trait::async_trait]
impl CommandT for Generate {
    async fn run(&self, _command_context: &CommandContext) -> Result<(), CommandError> {
        let (key_pair, seed) = ed25519::Pair::generate();
        key_pair_storage::add(self.name.clone(), key_pair_storage::KeyPairData { seed })?;
        println!("✓ Key-pair generated successfully");
        println!("ⓘ Account ID: {}", key_pair.public().to_ss58check());
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct List {}

#[async_trait::async_trait]
impl CommandT for List {
    async fn run(&self, _command_context: &CommandContext) -> Result<(), CommandError> {
        let key_pairs = key_pair_storage::list()?;
        println!("Key-pairs ({})\n", key_pairs.len());
        for (name, data) in key_pairs {
            println!("  '{}'", name);
            println!(
                "  account id: {}\n",
                ed25519::Pair::from_seed(&data.seed).public().to_ss58check()
            );
        }
        Ok(())
    }
}

#[derive(StructOpt, Debug, Clone)]
pub struct Show {
    /// The name of the key-pair.
    name: String,

    /// Also print the hex encoded secret seed.
    #[structopt(long)]
    seed: bool,
}

#[async_trait::async_trait]
impl CommandT for Show {
    async fn run(&self, _command_context: &CommandContext) -> Result<(), CommandError> {
        let data = key_pair_storage::get(&self.name)?;
        println!("name: {}", self.name);
        println!(
            "account id: {}",
            ed25519::Pair::from_seed(&data.seed).public().to_ss58check()
        );
        if self.seed {
            println!("seed: {}", hex::encode(data.seed));
        }
        Ok(())
    }
}
