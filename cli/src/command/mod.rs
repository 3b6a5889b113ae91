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

//! Define the commands supported by the CLI.

use crate::{CommandContext, CommandError, CommandT, TxOptions};
use collab_ledger_client::*;

use structopt::StructOpt;

pub mod contribution;
pub mod contributor;
pub mod key_pair;
pub mod ledger;

/// Sign and submit `message` with the author from `tx_options` and wait for it to be included.
///
/// If the ledger rejected the message we return [CommandError::FailedTransaction]. Otherwise we
/// return the output of the message.
async fn submit<Message_: Message>(
    command_context: &CommandContext,
    tx_options: &TxOptions,
    message: Message_,
) -> Result<Message_::Output, CommandError> {
    let tx_included = command_context
        .client
        .sign_and_submit_message(&tx_options.author, message)
        .await?
        .await?;
    let tx_hash = tx_included.tx_hash;
    let block_hash = tx_included.block;
    tx_included
        .result
        .map_err(|error| CommandError::FailedTransaction {
            error,
            tx_hash,
            block_hash,
        })
}

fn parse_account_id(data: &str) -> Result<AccountId, String> {
    Ss58Codec::from_ss58check(data).map_err(|err| format!("{:?}", err))
}

fn print_json(value: &impl serde::Serialize) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
