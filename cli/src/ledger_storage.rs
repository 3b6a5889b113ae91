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

//! Persist the emulated ledger in a file between CLI invocations.

use collab_ledger_client::Client;
use std::io::Error as IOError;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

/// Name of the ledger file in the CLI data directory.
pub const FILE: &str = "ledger.scale";

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Failed to read the ledger file '{1}'")]
    FailedRead(#[source] IOError, PathBuf),

    #[error("Failed to write the ledger file '{1}'")]
    FailedWrite(#[source] IOError, PathBuf),

    #[error("Cannot create directory '{1}'")]
    CannotCreateDirectory(#[source] IOError, PathBuf),

    #[error("The ledger file '{1}' is invalid")]
    InvalidLedger(#[source] collab_ledger_client::Error, PathBuf),

    #[error("Failed to create a new ledger")]
    FailedCreate(#[source] collab_ledger_client::Error),

    #[error("Failed to export the ledger")]
    FailedExport(#[source] collab_ledger_client::Error),
}

/// Load the ledger stored at `path`.
///
/// Returns a client for a new, uninitialized ledger if the file does not exist.
pub fn load(path: &Path) -> Result<Client, Error> {
    if !path.exists() {
        log::debug!("No ledger at {}, starting a new one", path.display());
        return Client::new_emulator().map_err(Error::FailedCreate);
    }
    let data = std::fs::read(path).map_err(|err| Error::FailedRead(err, path.to_path_buf()))?;
    Client::from_snapshot(&data).map_err(|err| Error::InvalidLedger(err, path.to_path_buf()))
}

/// Store the ledger of `client` at `path`, creating parent directories as needed.
///
/// The data is written to a temporary file first which then replaces `path`.
pub fn save(path: &Path, client: &Client) -> Result<(), Error> {
    let data = client.snapshot().map_err(Error::FailedExport)?;
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .map_err(|err| Error::CannotCreateDirectory(err, dir.to_path_buf()))?;
        }
    }
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, &data).map_err(|err| Error::FailedWrite(err, tmp_path.clone()))?;
    std::fs::rename(&tmp_path, path).map_err(|err| Error::FailedWrite(err, path.to_path_buf()))?;
    log::debug!("Stored ledger at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use collab_ledger_client::{ed25519, message, ClientT, CryptoPair as _};

    fn test_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("collab-ledger-cli-test-{}", std::process::id()))
            .join(name)
            .join(FILE)
    }

    #[async_std::test]
    async fn missing_file_is_new_ledger() {
        let client = load(&test_path("missing")).unwrap();
        assert_eq!(client.block_header_best_chain().await.unwrap().number, 0);
        assert_eq!(client.get_owner().await.unwrap(), None);
    }

    #[async_std::test]
    async fn save_and_load() {
        let path = test_path("save_and_load");
        let client = Client::new_emulator().unwrap();
        let owner = ed25519::Pair::from_string("//Alice", None).unwrap();
        client
            .sign_and_submit_message(&owner, message::Initialize)
            .await
            .unwrap()
            .await
            .unwrap();

        save(&path, &client).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.genesis_hash(), client.genesis_hash());
        assert_eq!(loaded.get_owner().await.unwrap(), Some(owner.public()));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn invalid_file() {
        let path = test_path("invalid_file");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"not a ledger").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(Error::InvalidLedger(_, _))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
