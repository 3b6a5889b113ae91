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

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::Score;

/// Reputation rank of a contributor, derived from the total verified score.
///
/// The numeric value of each variant is part of the public interface. See [Tier::code].
#[derive(Encode, Decode, TypeInfo, Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Bronze = 1,
    Silver = 2,
    Gold = 3,
    Platinum = 4,
}

impl Tier {
    /// Minimum total score for [Tier::Silver].
    pub const SILVER_THRESHOLD: Score = 100;
    /// Minimum total score for [Tier::Gold].
    pub const GOLD_THRESHOLD: Score = 250;
    /// Minimum total score for [Tier::Platinum].
    pub const PLATINUM_THRESHOLD: Score = 500;

    /// Derive the tier for the given total score.
    pub fn from_score(total_score: Score) -> Self {
        if total_score >= Self::PLATINUM_THRESHOLD {
            Tier::Platinum
        } else if total_score >= Self::GOLD_THRESHOLD {
            Tier::Gold
        } else if total_score >= Self::SILVER_THRESHOLD {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Bronze
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let name = match self {
            Tier::Bronze => "BRONZE",
            Tier::Silver => "SILVER",
            Tier::Gold => "GOLD",
            Tier::Platinum => "PLATINUM",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn thresholds() {
        let cases = vec![
            (0, Tier::Bronze),
            (99, Tier::Bronze),
            (100, Tier::Silver),
            (225, Tier::Silver),
            (249, Tier::Silver),
            (250, Tier::Gold),
            (499, Tier::Gold),
            (500, Tier::Platinum),
            (Score::MAX, Tier::Platinum),
        ];
        for (score, tier) in cases {
            assert_eq!(Tier::from_score(score), tier, "wrong tier for score {}", score);
        }
    }

    #[test]
    fn codes() {
        assert_eq!(Tier::Bronze.code(), 1);
        assert_eq!(Tier::Silver.code(), 2);
        assert_eq!(Tier::Gold.code(), 3);
        assert_eq!(Tier::Platinum.code(), 4);
    }

    #[test]
    fn tiers_are_ordered() {
        assert!(Tier::Bronze < Tier::Silver);
        assert!(Tier::Silver < Tier::Gold);
        assert!(Tier::Gold < Tier::Platinum);
        assert_eq!(Tier::default(), Tier::Bronze);
    }
}
