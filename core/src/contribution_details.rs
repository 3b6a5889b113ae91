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

/// `ContributionDetails` type, and its validation tests.
use core::convert::TryFrom;
use parity_scale_codec::{Decode, Encode, Error as CodecError, Input};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Free text describing a contribution, limited to [ContributionDetails::MAXIMUM_SIZE] bytes in
/// UTF-8 encoding.
///
/// ```rust
/// # use collab_ledger_core::ContributionDetails;
/// assert!(ContributionDetails::from_string("Fixed a bug".to_string()).is_ok());
/// let long_text = "x".repeat(ContributionDetails::MAXIMUM_SIZE + 1);
/// assert!(ContributionDetails::from_string(long_text).is_err());
/// ```
#[derive(Encode, TypeInfo, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ContributionDetails(String);

impl ContributionDetails {
    pub const MAXIMUM_SIZE: usize = 256;

    /// Returns an error if [String::len] of the provided string is greater than
    /// [ContributionDetails::MAXIMUM_SIZE].
    pub fn from_string(s: String) -> Result<Self, String> {
        if s.len() > Self::MAXIMUM_SIZE {
            Err(format!(
                "The provided details are {} bytes long while contribution details are limited to {} bytes",
                s.len(),
                Self::MAXIMUM_SIZE
            ))
        } else {
            Ok(ContributionDetails(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<ContributionDetails> for String {
    fn from(details: ContributionDetails) -> Self {
        details.0
    }
}

impl TryFrom<String> for ContributionDetails {
    type Error = String;

    fn try_from(input: String) -> Result<Self, Self::Error> {
        ContributionDetails::from_string(input)
    }
}

impl core::str::FromStr for ContributionDetails {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContributionDetails::from_string(s.to_string())
    }
}

impl core::fmt::Display for ContributionDetails {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Decode for ContributionDetails {
    fn decode<I: Input>(input: &mut I) -> Result<Self, CodecError> {
        let decoded: String = String::decode(input)?;
        if decoded.len() > Self::MAXIMUM_SIZE {
            Err(From::from("ContributionDetails exceeds the maximum size."))
        } else {
            Ok(ContributionDetails(decoded))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_limit() {
        fn details_of_size(n: usize) -> Result<ContributionDetails, String> {
            ContributionDetails::from_string("X".repeat(n))
        }

        assert!(details_of_size(ContributionDetails::MAXIMUM_SIZE).is_ok());
        assert!(
            details_of_size(ContributionDetails::MAXIMUM_SIZE + 1).is_err(),
            "Error: excessively long text converted to ContributionDetails"
        );
        assert!(details_of_size(0).is_ok());
    }

    #[test]
    fn limit_counts_bytes() {
        // "ä" is two bytes long in UTF-8.
        let text = "ä".repeat(ContributionDetails::MAXIMUM_SIZE / 2 + 1);
        assert!(ContributionDetails::from_string(text).is_err());
    }

    #[test]
    fn decode_rejects_oversized_text() {
        let encoded = "X".repeat(ContributionDetails::MAXIMUM_SIZE + 1).encode();
        assert!(ContributionDetails::decode(&mut &encoded[..]).is_err());
    }
}
