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

//! Manages key pairs stored in the filesystem,
//! providing ways to store and retrieve them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use thiserror::Error as ThisError;

use std::io::Error as IOError;
use std::path::{Path, PathBuf};

/// The data that is stored in the filesystem relative
/// to a key pair. The name of the key pair is used as
/// the key to this value, therefore not included here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct KeyPairData {
    pub seed: Seed,
}

/// The seed from which a key pair
/// can be derived from.
type Seed = [u8; 32];

#[derive(Debug, ThisError)]
pub enum Error {
    /// A key pair with the given name already exists
    #[error("A key pair with the given name already exists")]
    AlreadyExists(),

    /// Failed to write to the key-pairs file
    #[error("Failed to write the key-pairs file '{1}'")]
    FailedWrite(#[source] WritingError, PathBuf),

    /// Failed to read the key-pairs file
    #[error("Failed to read the key-pairs file '{1}'")]
    FailedRead(#[source] ReadingError, PathBuf),

    /// Cannot create directory
    #[error("Cannot create directory '{1}'")]
    CannotCreateDirectory(#[source] IOError, PathBuf),

    /// Could not find a key pair with the given name
    #[error("Could not find a key pair with the given name")]
    NotFound(),

    #[error("Cannot determine the user data directory")]
    NoDataDirectory,
}

/// Possible errors when writing to the key-pairs file.
#[derive(Debug, ThisError)]
pub enum WritingError {
    #[error(transparent)]
    IO(IOError),

    #[error(transparent)]
    Serialization(serde_json::Error),
}

/// Possible errors when reading the key-pairs file.
#[derive(Debug, ThisError)]
pub enum ReadingError {
    #[error(transparent)]
    IO(IOError),

    #[error(transparent)]
    Deserialization(serde_json::Error),
}

/// Add a key pair to the storage.
///
/// Fails if a key pair with the given `name` already exists.
/// It can also fail from IO and Serde Json errors.
pub fn add(name: String, data: KeyPairData) -> Result<(), Error> {
    add_at(&path()?, name, data)
}

/// List all the stored key-pairs ordered by name.
pub fn list() -> Result<BTreeMap<String, KeyPairData>, Error> {
    list_at(&path()?)
}

/// Get a key pair by name.
///
/// It can fail from IO and Serde Json errors, or if no such
/// key pair is found.
pub fn get(name: &str) -> Result<KeyPairData, Error> {
    get_at(&path()?, name)
}

/// The file where the user key-pairs are stored.
const FILE: &str = "key-pairs.json";

fn path() -> Result<PathBuf, Error> {
    crate::data_dir()
        .map(|dir| dir.join(FILE))
        .ok_or(Error::NoDataDirectory)
}

fn add_at(path: &Path, name: String, data: KeyPairData) -> Result<(), Error> {
    let mut key_pairs = list_at(path)?;
    if key_pairs.contains_key(&name) {
        return Err(Error::AlreadyExists());
    }

    key_pairs.insert(name, data);
    update(path, key_pairs)
}

fn list_at(path: &Path) -> Result<BTreeMap<String, KeyPairData>, Error> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    match parse_file(path)? {
        VersionedFile::V1 { key_pairs } => Ok(key_pairs),
    }
}

fn get_at(path: &Path, name: &str) -> Result<KeyPairData, Error> {
    list_at(path)?.remove(name).ok_or(Error::NotFound())
}

fn update(path: &Path, key_pairs: BTreeMap<String, KeyPairData>) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|err| Error::CannotCreateDirectory(err, dir.to_path_buf()))?;
    }
    let data = VersionedFile::V1 { key_pairs };
    let new_content = serde_json::to_string_pretty(&data)
        .map_err(|err| Error::FailedWrite(WritingError::Serialization(err), path.to_path_buf()))?;
    std::fs::write(path, new_content.as_bytes())
        .map_err(|err| Error::FailedWrite(WritingError::IO(err), path.to_path_buf()))?;
    Ok(())
}

fn parse_file(path: &Path) -> Result<VersionedFile, Error> {
    let file = File::open(path)
        .map_err(|err| Error::FailedRead(ReadingError::IO(err), path.to_path_buf()))?;
    serde_json::from_reader(&file).map_err(|err| {
        Error::FailedRead(ReadingError::Deserialization(err), path.to_path_buf())
    })
}

/// Content of [FILE]. New versions are added as variants so that old files can still be read.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "version")]
enum VersionedFile {
    #[serde(rename = "1")]
    V1 {
        key_pairs: BTreeMap<String, KeyPairData>,
    },
}
