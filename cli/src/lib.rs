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

//! Define the command line parser and interface.

use collab_ledger_client::*;
use directories::BaseDirs;
use std::path::PathBuf;
use structopt::StructOpt;
use thiserror::Error as ThisError;

pub mod key_pair_storage;
pub mod ledger_storage;

mod command;
use command::{contribution, contributor, key_pair, ledger};

/// The type that captures the command line.
#[derive(StructOpt, Clone)]
#[structopt(max_term_width = 80)]
pub struct CommandLine {
    #[structopt(flatten)]
    pub ledger_options: LedgerOptions,

    #[structopt(subcommand)]
    pub command: Command,
}

impl CommandLine {
    /// Load the ledger, run the command and store the ledger again if the command added blocks.
    ///
    /// The ledger is stored even if the command fails because a failed transaction is still
    /// included in a block.
    pub async fn run(self) -> Result<(), CommandError> {
        let ledger_file = self.ledger_options.ledger_file()?;
        let client = ledger_storage::load(&ledger_file)?;
        let tip_before = client.block_header_best_chain().await?;

        let command_context = CommandContext { client };
        let result = self.command.run(&command_context).await;

        let tip_after = command_context.client.block_header_best_chain().await?;
        if tip_after != tip_before {
            ledger_storage::save(&ledger_file, &command_context.client)?;
        }
        result
    }
}

/// Options that determine where the ledger is stored.
#[derive(StructOpt, Clone, Debug)]
pub struct LedgerOptions {
    /// File the ledger is loaded from and stored to. Defaults to `ledger.scale` in the
    /// user data directory. A new ledger is created if the file does not exist.
    #[structopt(long, global = true, env = "COLLAB_LEDGER_FILE", value_name = "path")]
    pub ledger_file: Option<PathBuf>,
}

impl LedgerOptions {
    pub fn ledger_file(&self) -> Result<PathBuf, CommandError> {
        match &self.ledger_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()
                .ok_or(CommandError::NoDataDirectory)?
                .join(ledger_storage::FILE)),
        }
    }
}

/// Transaction-related command-line options
#[derive(StructOpt, Clone)]
pub struct TxOptions {
    /// The name of the local key pair to be used to sign transactions.
    #[structopt(
        long,
        env = "COLLAB_AUTHOR",
        value_name = "key_pair_name",
        parse(try_from_str = lookup_key_pair)
    )]
    pub author: ed25519::Pair,
}

/// Only shows the public key of the author.
impl std::fmt::Debug for TxOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxOptions")
            .field("author", &self.author.public())
            .finish()
    }
}

fn lookup_key_pair(name: &str) -> Result<ed25519::Pair, String> {
    key_pair_storage::get(name)
        .map(|data| ed25519::Pair::from_seed(&data.seed))
        .map_err(|e| format!("{}", e))
}

/// Directory under which the CLI keeps its files.
///
/// Returns `None` if the home directory of the user cannot be determined.
pub fn data_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.data_dir().join("collab-ledger-cli"))
}

/// Contextual data for running commands.
pub struct CommandContext {
    pub client: Client,
}

/// The supported [CommandLine] commands.
/// The commands are grouped by domain.
#[derive(StructOpt, Clone)]
pub enum Command {
    KeyPair(key_pair::Command),
    Ledger(ledger::Command),
    Contribution(contribution::Command),
    Contributor(contributor::Command),
}

#[async_trait::async_trait]
impl CommandT for Command {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError> {
        match self {
            Command::KeyPair(cmd) => cmd.run(command_context).await,
            Command::Ledger(cmd) => cmd.run(command_context).await,
            Command::Contribution(cmd) => cmd.run(command_context).await,
            Command::Contributor(cmd) => cmd.run(command_context).await,
        }
    }
}

/// The trait that every command must implement.
#[async_trait::async_trait]
pub trait CommandT {
    async fn run(&self, command_context: &CommandContext) -> Result<(), CommandError>;
}

/// Error returned by [CommandT::run].
///
/// Implements [From] for client errors and storage errors.
#[derive(Debug, ThisError)]
pub enum CommandError {
    #[error("client error")]
    ClientError(#[from] Error),

    #[error("transaction {tx_hash} failed in block {block_hash}")]
    FailedTransaction {
        #[source]
        error: LedgerError,
        tx_hash: TxHash,
        block_hash: BlockHash,
    },

    #[error("cannot find contribution {contribution_id}")]
    ContributionNotFound { contribution_id: ContributionId },

    #[error("cannot find contributor {account_id}")]
    ContributorNotFound { account_id: AccountId },

    #[error("cannot determine the user data directory")]
    NoDataDirectory,

    #[error(transparent)]
    KeyPairStorageError(#[from] key_pair_storage::Error),

    #[error(transparent)]
    LedgerStorageError(#[from] ledger_storage::Error),

    #[error("failed to serialize output")]
    Serialization(#[from] serde_json::Error),
}
