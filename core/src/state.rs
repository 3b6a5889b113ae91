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

//! Type definitions for all entities stored in the ledger state.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::{AccountId, ContributionDetails, Score, Tier};

/// A piece of work submitted by a contributor.
///
/// # Storage
///
/// Contributions are stored as a map with the key derived from [crate::ContributionId].
/// The contribution ID can be extracted from the storage key.
///
/// # Invariants
///
/// * `contributor` and `details` never change after submission.
/// * Once `verified` is `true` the contribution is immutable.
/// * A contributor profile exists for `contributor`.
///
/// # Relevant messages
///
/// * [crate::message::SubmitContribution]
/// * [crate::message::VerifyContribution]
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub enum Contributions1Data {
    V1(ContributionV1),
}

impl Contributions1Data {
    /// Creates a new, unverified contribution in the most up to date version.
    pub fn new(contributor: AccountId, details: ContributionDetails) -> Self {
        Self::V1(ContributionV1 {
            contributor,
            details,
            score: 0,
            verified: false,
        })
    }

    /// Account that submitted the contribution.
    pub fn contributor(&self) -> AccountId {
        match self {
            Self::V1(contribution) => contribution.contributor,
        }
    }

    pub fn details(&self) -> &ContributionDetails {
        match self {
            Self::V1(contribution) => &contribution.details,
        }
    }

    /// Score awarded on verification. Zero until the contribution is verified.
    pub fn score(&self) -> Score {
        match self {
            Self::V1(contribution) => contribution.score,
        }
    }

    pub fn verified(&self) -> bool {
        match self {
            Self::V1(contribution) => contribution.verified,
        }
    }

    /// Return the verified contribution with the given score.
    pub fn verify(self, score: Score) -> Self {
        match self {
            Self::V1(contribution) => Self::V1(ContributionV1 {
                score,
                verified: true,
                ..contribution
            }),
        }
    }
}

#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct ContributionV1 {
    pub contributor: AccountId,
    pub details: ContributionDetails,
    pub score: Score,
    pub verified: bool,
}

/// Aggregated contribution record of an account.
///
/// # Storage
///
/// Profiles are stored as a map with the key derived from the contributor [AccountId].
/// A profile is created by the first contribution submitted by an account and never removed.
///
/// # Invariants
///
/// * `contribution_count` is at least one.
/// * `total_score` is the sum of the scores of all verified contributions of the account.
/// * `tier` is the tier derived from `total_score` at the time of the last
///   [crate::message::UpdateContributorTier]. It is not updated when the score changes.
///
/// # Relevant messages
///
/// * [crate::message::SubmitContribution]
/// * [crate::message::VerifyContribution]
/// * [crate::message::UpdateContributorTier]
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub enum ContributorProfiles1Data {
    V1(ContributorProfileV1),
}

impl ContributorProfiles1Data {
    /// Creates the profile for the first submitted contribution of an account.
    pub fn new() -> Self {
        Self::V1(ContributorProfileV1 {
            total_score: 0,
            contribution_count: 1,
            tier: Tier::Bronze,
            is_active: true,
        })
    }

    pub fn total_score(&self) -> Score {
        match self {
            Self::V1(profile) => profile.total_score,
        }
    }

    pub fn contribution_count(&self) -> u64 {
        match self {
            Self::V1(profile) => profile.contribution_count,
        }
    }

    /// Tier stored by the last tier update.
    pub fn tier(&self) -> Tier {
        match self {
            Self::V1(profile) => profile.tier,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::V1(profile) => profile.is_active,
        }
    }

    /// Account for one more submitted contribution.
    pub fn with_submission(self) -> Self {
        match self {
            Self::V1(profile) => Self::V1(ContributorProfileV1 {
                contribution_count: profile.contribution_count.saturating_add(1),
                is_active: true,
                ..profile
            }),
        }
    }

    /// Add the score of a verified contribution to the total score.
    pub fn with_awarded_score(self, score: Score) -> Self {
        match self {
            Self::V1(profile) => Self::V1(ContributorProfileV1 {
                total_score: profile.total_score.saturating_add(score),
                ..profile
            }),
        }
    }

    pub fn with_tier(self, tier: Tier) -> Self {
        match self {
            Self::V1(profile) => Self::V1(ContributorProfileV1 { tier, ..profile }),
        }
    }
}

impl Default for ContributorProfiles1Data {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct ContributorProfileV1 {
    pub total_score: Score,
    pub contribution_count: u64,
    pub tier: Tier,
    pub is_active: bool,
}

/// Next index (nonce) for a transaction of an account.
///
/// The index for an [AccountId] increases whenever a transaction by the account owner is
/// included in a block, regardless of the outcome of the ledger call.
///
/// # Storage
///
/// Indices are part of the account information kept by the `frame_system` pallet.
pub type AccountTransactionIndex = u32;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verify_keeps_submission_data() {
        let contributor = AccountId::from_raw([1u8; 32]);
        let details = ContributionDetails::from_string("Wrote docs".to_string()).unwrap();
        let contribution = Contributions1Data::new(contributor, details.clone());
        assert_eq!(contribution.score(), 0);
        assert!(!contribution.verified());

        let verified = contribution.verify(42);
        assert_eq!(verified.contributor(), contributor);
        assert_eq!(verified.details(), &details);
        assert_eq!(verified.score(), 42);
        assert!(verified.verified());
    }

    #[test]
    fn profile_updates() {
        let profile = ContributorProfiles1Data::new()
            .with_submission()
            .with_awarded_score(150)
            .with_awarded_score(100);
        assert_eq!(profile.contribution_count(), 2);
        assert_eq!(profile.total_score(), 250);
        // The tier is only changed explicitly.
        assert_eq!(profile.tier(), Tier::Bronze);
        assert_eq!(profile.with_tier(Tier::Gold).tier(), Tier::Gold);
    }

    #[test]
    fn total_score_saturates() {
        let profile = ContributorProfiles1Data::new()
            .with_awarded_score(Score::MAX)
            .with_awarded_score(1);
        assert_eq!(profile.total_score(), Score::MAX);
    }
}
