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

//! The contribution ledger pallet: access control, the contribution registry, contributor
//! profiles and tier derivation.
//!
//! Every call runs its validations before the first write and is applied in its own storage
//! layer so that a failed call leaves the state untouched. Failed calls return a
//! [LedgerError] as [DispatchError::Module](crate::DispatchError::Module).

use codec::{Decode, Encode};
use core::marker::PhantomData;
use frame_support::dispatch::DispatchInfo;
use scale_info::TypeInfo;
use sp_runtime::traits::{DispatchInfoOf, Dispatchable, SignedExtension};
use sp_runtime::transaction_validity::TransactionValidityError;

pub use pallet::*;

const LOG_TARGET: &str = "runtime::ledger";

#[frame_support::pallet]
pub mod pallet {
    use frame_support::pallet_prelude::*;
    use frame_support::storage::with_storage_layer;
    use frame_support::traits::ConstU64;
    use frame_system::pallet_prelude::*;

    use super::LOG_TARGET;
    use crate::message;
    use crate::state::{Contributions1Data, ContributorProfiles1Data};
    use crate::{AccountId, ContributionId, LedgerError, Score, Tier};

    #[pallet::pallet]
    #[pallet::without_storage_info]
    pub struct Pallet<T>(_);

    #[pallet::config]
    pub trait Config: frame_system::Config<AccountId = AccountId> {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
    }

    /// The account that initialized the ledger. Never changes once set.
    #[pallet::storage]
    pub type Owner<T> = StorageValue<_, AccountId>;

    /// Accounts the owner granted admin privileges to.
    #[pallet::storage]
    pub type ProjectAdmins<T> = StorageMap<_, Blake2_128Concat, AccountId, bool, ValueQuery>;

    /// ID assigned to the next submitted contribution.
    #[pallet::storage]
    pub type NextContributionId<T> =
        StorageValue<_, ContributionId, ValueQuery, ConstU64<FIRST_CONTRIBUTION_ID>>;

    #[pallet::storage]
    pub type Contributions<T> =
        StorageMap<_, Blake2_128Concat, ContributionId, Contributions1Data>;

    #[pallet::storage]
    pub type ContributorProfiles<T> =
        StorageMap<_, Blake2_128Concat, AccountId, ContributorProfiles1Data>;

    /// The first ID handed out by a fresh ledger.
    pub const FIRST_CONTRIBUTION_ID: ContributionId = 1;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        LedgerInitialized {
            owner: T::AccountId,
        },
        ProjectAdminAdded {
            account_id: T::AccountId,
        },
        ContributionSubmitted {
            contribution_id: ContributionId,
            contributor: T::AccountId,
        },
        ContributionVerified {
            contribution_id: ContributionId,
            score: Score,
        },
        ContributorTierUpdated {
            contributor: T::AccountId,
            tier: Tier,
        },
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// See [message::Initialize].
        #[pallet::call_index(0)]
        #[pallet::weight(Weight::from_parts(10_000, 0))]
        pub fn initialize(origin: OriginFor<T>) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::apply_call(&sender, "initialize", || {
                if Owner::<T>::exists() {
                    return Err(LedgerError::AlreadyInitialized);
                }
                Owner::<T>::put(sender);
                Self::deposit_event(Event::LedgerInitialized { owner: sender });
                Ok(())
            })
        }

        /// See [message::AddProjectAdmin].
        #[pallet::call_index(1)]
        #[pallet::weight(Weight::from_parts(10_000, 0))]
        pub fn add_project_admin(
            origin: OriginFor<T>,
            message: message::AddProjectAdmin,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::apply_call(&sender, "add_project_admin", || {
                if Self::owner() != Some(sender) {
                    return Err(LedgerError::OwnerOnly);
                }
                ProjectAdmins::<T>::insert(message.account_id, true);
                Self::deposit_event(Event::ProjectAdminAdded {
                    account_id: message.account_id,
                });
                Ok(())
            })
        }

        /// See [message::SubmitContribution].
        #[pallet::call_index(2)]
        #[pallet::weight(Weight::from_parts(10_000, 0))]
        pub fn submit_contribution(
            origin: OriginFor<T>,
            message: message::SubmitContribution,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::apply_call(&sender, "submit_contribution", || {
                let contribution_id = Self::next_contribution_id();
                let contribution = Contributions1Data::new(sender, message.details);
                let profile = match ContributorProfiles::<T>::get(sender) {
                    Some(profile) => profile.with_submission(),
                    None => ContributorProfiles1Data::new(),
                };

                Contributions::<T>::insert(contribution_id, contribution);
                ContributorProfiles::<T>::insert(sender, profile);
                NextContributionId::<T>::put(contribution_id + 1);
                Self::deposit_event(Event::ContributionSubmitted {
                    contribution_id,
                    contributor: sender,
                });
                Ok(())
            })
        }

        /// See [message::VerifyContribution].
        #[pallet::call_index(3)]
        #[pallet::weight(Weight::from_parts(10_000, 0))]
        pub fn verify_contribution(
            origin: OriginFor<T>,
            message: message::VerifyContribution,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::apply_call(&sender, "verify_contribution", || {
                if !Self::has_admin_privilege(&sender) {
                    return Err(LedgerError::OwnerOnly);
                }
                let contribution = Contributions::<T>::get(message.contribution_id)
                    .ok_or(LedgerError::NotFound)?;
                if contribution.verified() {
                    return Err(LedgerError::AlreadyVerified);
                }
                let contributor = contribution.contributor();
                let profile = match ContributorProfiles::<T>::get(contributor) {
                    Some(profile) => profile,
                    None => {
                        log::error!(
                            target: LOG_TARGET,
                            "Contributor profile of {} is missing for contribution {}",
                            contributor,
                            message.contribution_id
                        );
                        return Err(LedgerError::NotFound);
                    }
                };

                Contributions::<T>::insert(
                    message.contribution_id,
                    contribution.verify(message.score),
                );
                ContributorProfiles::<T>::insert(
                    contributor,
                    profile.with_awarded_score(message.score),
                );
                Self::deposit_event(Event::ContributionVerified {
                    contribution_id: message.contribution_id,
                    score: message.score,
                });
                Ok(())
            })
        }

        /// See [message::UpdateContributorTier].
        #[pallet::call_index(4)]
        #[pallet::weight(Weight::from_parts(10_000, 0))]
        pub fn update_contributor_tier(
            origin: OriginFor<T>,
            message: message::UpdateContributorTier,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::apply_call(&sender, "update_contributor_tier", || {
                if !Self::has_admin_privilege(&sender) {
                    return Err(LedgerError::OwnerOnly);
                }
                let profile = ContributorProfiles::<T>::get(message.contributor)
                    .ok_or(LedgerError::NotFound)?;
                let tier = Tier::from_score(profile.total_score());
                ContributorProfiles::<T>::insert(message.contributor, profile.with_tier(tier));
                Self::deposit_event(Event::ContributorTierUpdated {
                    contributor: message.contributor,
                    tier,
                });
                Ok(())
            })
        }
    }

    impl<T: Config> Pallet<T> {
        /// Run `call` in a new storage layer that is discarded if the call fails.
        fn apply_call(
            sender: &AccountId,
            name: &str,
            call: impl FnOnce() -> Result<(), LedgerError>,
        ) -> DispatchResult {
            log::debug!(target: LOG_TARGET, "Dispatching {} from {}", name, sender);
            with_storage_layer(|| {
                call().map_err(|error| {
                    log::debug!(
                        target: LOG_TARGET,
                        "Call {} from {} failed: {}",
                        name,
                        sender,
                        error
                    );
                    DispatchError::from(error)
                })
            })
        }

        /// True iff `account_id` is the owner or was added as a project admin.
        pub fn has_admin_privilege(account_id: &AccountId) -> bool {
            Self::owner().as_ref() == Some(account_id) || ProjectAdmins::<T>::get(account_id)
        }

        /// The owner of the ledger or `None` if the ledger was not initialized.
        pub fn owner() -> Option<AccountId> {
            Owner::<T>::get()
        }

        /// Same as [Self::has_admin_privilege]. Never fails, also not before initialization.
        pub fn is_project_admin(account_id: &AccountId) -> bool {
            Self::has_admin_privilege(account_id)
        }

        pub fn get_contribution(contribution_id: ContributionId) -> Option<Contributions1Data> {
            Contributions::<T>::get(contribution_id)
        }

        /// IDs of all contributions in ascending order.
        pub fn list_contributions() -> Vec<ContributionId> {
            let mut ids = Contributions::<T>::iter_keys().collect::<Vec<_>>();
            ids.sort_unstable();
            ids
        }

        pub fn get_contributor_profile(
            contributor: &AccountId,
        ) -> Option<ContributorProfiles1Data> {
            ContributorProfiles::<T>::get(contributor)
        }

        /// The stored tier of `contributor`. This is the tier computed by the last
        /// [message::UpdateContributorTier] and may lag behind the total score.
        pub fn get_contributor_tier(contributor: &AccountId) -> Result<Tier, LedgerError> {
            Self::get_contributor_profile(contributor)
                .map(|profile| profile.tier())
                .ok_or(LedgerError::NotFound)
        }

        pub fn next_contribution_id() -> ContributionId {
            NextContributionId::<T>::get()
        }
    }
}

/// Makes sure the sender of a transaction has an account in `frame_system`.
///
/// `frame_system::CheckNonce` only accepts transactions from existing accounts. Ledger accounts
/// hold no balance so the account is created with a provider reference on the first transaction.
/// Must be placed before `frame_system::CheckNonce` in the signed extensions.
#[derive(Encode, Decode, Clone, Eq, PartialEq, TypeInfo)]
#[scale_info(skip_type_params(T))]
pub struct ProvideSenderAccount<T>(PhantomData<T>);

impl<T: Config + Send + Sync> ProvideSenderAccount<T> {
    pub fn new() -> Self {
        ProvideSenderAccount(PhantomData)
    }
}

impl<T: Config + Send + Sync> Default for ProvideSenderAccount<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Config + Send + Sync> core::fmt::Debug for ProvideSenderAccount<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "ProvideSenderAccount")
    }
}

impl<T: Config + Send + Sync> SignedExtension for ProvideSenderAccount<T>
where
    T::RuntimeCall: Dispatchable<Info = DispatchInfo>,
{
    const IDENTIFIER: &'static str = "ProvideSenderAccount";
    type AccountId = T::AccountId;
    type Call = T::RuntimeCall;
    type AdditionalSigned = ();
    type Pre = ();

    fn additional_signed(&self) -> Result<(), TransactionValidityError> {
        Ok(())
    }

    fn pre_dispatch(
        self,
        who: &Self::AccountId,
        _call: &Self::Call,
        _info: &DispatchInfoOf<Self::Call>,
        _len: usize,
    ) -> Result<(), TransactionValidityError> {
        if !frame_system::Pallet::<T>::account_exists(who) {
            log::debug!(target: LOG_TARGET, "Creating account {}", who);
            frame_system::Pallet::<T>::inc_providers(who);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        runtime_api, AccountId, ContributionDetails, ContributionId, DispatchError, LedgerError,
        Runtime, RuntimeCall, RuntimeOrigin, System,
    };
    use sp_core::{crypto::Pair as _, ed25519};
    use sp_runtime::StateVersion;

    type Ledger = Pallet<Runtime>;

    fn new_test_ext() -> sp_io::TestExternalities {
        let mut test_ext = sp_io::TestExternalities::new(runtime_api::genesis_storage().unwrap());
        // Events are only recorded after the genesis block.
        test_ext.execute_with(|| System::set_block_number(1));
        test_ext
    }

    fn account(name: &str) -> AccountId {
        ed25519::Pair::from_string(&format!("//{}", name), None)
            .unwrap()
            .public()
    }

    fn dispatch(sender: AccountId, call: Call<Runtime>) -> Result<(), DispatchError> {
        RuntimeCall::from(call)
            .dispatch(RuntimeOrigin::signed(sender))
            .map(|_| ())
            .map_err(|error| error.error)
    }

    fn submit(sender: AccountId) -> ContributionId {
        let details = ContributionDetails::from_string("work".to_string()).unwrap();
        let id = Ledger::next_contribution_id();
        dispatch(
            sender,
            Call::submit_contribution {
                message: crate::message::SubmitContribution { details },
            },
        )
        .unwrap();
        id
    }

    #[test]
    fn failed_call_changes_nothing() {
        new_test_ext().execute_with(|| {
            let owner = account("Alice");
            let contributor = account("Bob");
            dispatch(owner, Call::initialize {}).unwrap();
            let id = submit(contributor);
            let verify = Call::verify_contribution {
                message: crate::message::VerifyContribution {
                    contribution_id: id,
                    score: 10,
                },
            };
            dispatch(owner, verify.clone()).unwrap();

            let state_root = sp_io::storage::root(StateVersion::V1);
            assert_eq!(
                dispatch(owner, verify),
                Err(LedgerError::AlreadyVerified.into())
            );
            assert_eq!(sp_io::storage::root(StateVersion::V1), state_root);
        });
    }

    #[test]
    fn unsigned_call_is_bad_origin() {
        new_test_ext().execute_with(|| {
            let result = RuntimeCall::from(Call::<Runtime>::initialize {})
                .dispatch(RuntimeOrigin::none())
                .map_err(|error| error.error);
            assert_eq!(result, Err(DispatchError::BadOrigin));
            assert_eq!(Ledger::owner(), None);
        });
    }

    #[test]
    fn missing_profile_is_not_found() {
        new_test_ext().execute_with(|| {
            let owner = account("Alice");
            let contributor = account("Bob");
            dispatch(owner, Call::initialize {}).unwrap();
            let id = submit(contributor);
            ContributorProfiles::<Runtime>::remove(contributor);

            let result = dispatch(
                owner,
                Call::verify_contribution {
                    message: crate::message::VerifyContribution {
                        contribution_id: id,
                        score: 10,
                    },
                },
            );
            assert_eq!(result, Err(LedgerError::NotFound.into()));
            assert!(!Ledger::get_contribution(id).unwrap().verified());
        });
    }

    #[test]
    fn list_contributions_is_ordered() {
        new_test_ext().execute_with(|| {
            let contributor = account("Bob");
            for _ in 0..12 {
                submit(contributor);
            }
            let expected = (1..=12).collect::<Vec<ContributionId>>();
            assert_eq!(Ledger::list_contributions(), expected);
            assert_eq!(Ledger::next_contribution_id(), 13);
        });
    }

    #[test]
    fn events_describe_calls() {
        new_test_ext().execute_with(|| {
            let owner = account("Alice");
            dispatch(owner, Call::initialize {}).unwrap();
            let id = submit(owner);

            let events = System::events()
                .into_iter()
                .map(|record| record.event)
                .collect::<Vec<_>>();
            assert_eq!(
                events,
                vec![
                    Event::<Runtime>::LedgerInitialized { owner }.into(),
                    Event::<Runtime>::ContributionSubmitted {
                        contribution_id: id,
                        contributor: owner,
                    }
                    .into(),
                ]
            );
        });
    }
}
