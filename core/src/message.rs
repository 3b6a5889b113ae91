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

//! Transaction related types used in the Collab Ledger.
//!
//! Every message is authored by the account that signs the transaction. We call this account the
//! sender.

use crate::{AccountId, ContributionDetails, ContributionId, Score};
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

/// Make the sender the owner of the ledger.
///
/// # State changes
///
/// If successful, the sender is stored as the ledger owner.
///
/// # State-dependent validations
///
/// The ledger must not be initialized yet.
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct Initialize;

/// Grant project admin privileges to `account_id`.
///
/// # State-dependent validations
///
/// The sender must be the ledger owner.
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct AddProjectAdmin {
    pub account_id: AccountId,
}

/// Record a new contribution authored by the sender.
///
/// # State changes
///
/// If successful, a new unverified contribution with the next contribution ID is stored and the
/// sender's contributor profile is created or its contribution count is incremented.
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct SubmitContribution {
    pub details: ContributionDetails,
}

/// Verify a contribution and award `score` to its contributor.
///
/// # State changes
///
/// If successful, the contribution is marked as verified with the given score and the score is
/// added to the total score of the contributor.
///
/// # State-dependent validations
///
/// The sender must be the owner or a project admin. The contribution must exist and must not
/// be verified yet.
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct VerifyContribution {
    pub contribution_id: ContributionId,
    pub score: Score,
}

/// Recompute and store the tier of `contributor` from their total score.
///
/// # State-dependent validations
///
/// The sender must be the owner or a project admin. A contributor profile must exist for
/// `contributor`.
#[derive(Decode, Encode, TypeInfo, Clone, Debug, Eq, PartialEq)]
pub struct UpdateContributorTier {
    pub contributor: AccountId,
}
