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

//! Defines [Message] trait and implementations for all messages in `collab_ledger_core::message`.

use core::convert::TryFrom;

pub use collab_ledger_core::message::*;
use collab_ledger_core::*;
use collab_ledger_runtime::{ledger, system, Runtime, RuntimeCall, RuntimeEvent as Event};

type LedgerEvent = ledger::Event<Runtime>;

#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum EventExtractionError {
    #[error("ExtrinsicSuccess or ExtrinsicFailed event not found")]
    ExtrinsicStatusMissing,
    #[error("Required event is missing")]
    EventMissing,
    #[error("The transaction failed with an error not raised by the ledger: {0:?}")]
    ForeignDispatchError(DispatchError),
}

/// Trait implemented for every ledger message
///
/// For every [ledger::Call] that is exposed to the user we implement [Message] for the parameters
/// struct of the ledger message.
pub trait Message: Send + 'static {
    /// Output of a successfully applied message.
    ///
    /// This value is extracted from the events that are dispatched when the message is executed in
    /// a block.
    type Output: Send + 'static;

    /// Parse all events emitted by the message and return the appropriate message result.
    ///
    /// Returns an error if the event list is not well formed. For example if an expected event is
    /// missing.
    fn result_from_events(
        events: Vec<Event>,
    ) -> Result<Result<Self::Output, LedgerError>, EventExtractionError>;

    fn into_runtime_call(self) -> RuntimeCall;
}

impl Message for message::Initialize {
    type Output = ();

    fn result_from_events(
        events: Vec<Event>,
    ) -> Result<Result<Self::Output, LedgerError>, EventExtractionError> {
        extract_ledger_result(&events, |event| match event {
            LedgerEvent::LedgerInitialized { .. } => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        ledger::Call::initialize {}.into()
    }
}

impl Message for message::AddProjectAdmin {
    type Output = ();

    fn result_from_events(
        events: Vec<Event>,
    ) -> Result<Result<Self::Output, LedgerError>, EventExtractionError> {
        extract_ledger_result(&events, |event| match event {
            LedgerEvent::ProjectAdminAdded { .. } => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        ledger::Call::add_project_admin { message: self }.into()
    }
}

impl Message for message::SubmitContribution {
    /// ID of the new contribution.
    type Output = ContributionId;

    fn result_from_events(
        events: Vec<Event>,
    ) -> Result<Result<Self::Output, LedgerError>, EventExtractionError> {
        extract_ledger_result(&events, |event| match event {
            LedgerEvent::ContributionSubmitted {
                contribution_id, ..
            } => Some(*contribution_id),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        ledger::Call::submit_contribution { message: self }.into()
    }
}

impl Message for message::VerifyContribution {
    type Output = ();

    fn result_from_events(
        events: Vec<Event>,
    ) -> Result<Result<Self::Output, LedgerError>, EventExtractionError> {
        extract_ledger_result(&events, |event| match event {
            LedgerEvent::ContributionVerified { .. } => Some(()),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        ledger::Call::verify_contribution { message: self }.into()
    }
}

impl Message for message::UpdateContributorTier {
    /// The newly stored tier.
    type Output = Tier;

    fn result_from_events(
        events: Vec<Event>,
    ) -> Result<Result<Self::Output, LedgerError>, EventExtractionError> {
        extract_ledger_result(&events, |event| match event {
            LedgerEvent::ContributorTierUpdated { tier, .. } => Some(*tier),
            _ => None,
        })
    }

    fn into_runtime_call(self) -> RuntimeCall {
        ledger::Call::update_contributor_tier { message: self }.into()
    }
}

/// Run `f` on all events to extract a potential output after [get_dispatch_result] is successful.
/// If `f` returns `None` for all events an [EventExtractionError::EventMissing] error is returned.
fn extract_ledger_result<T>(
    events: &[Event],
    f: impl Fn(&LedgerEvent) -> Option<T>,
) -> Result<Result<T, LedgerError>, EventExtractionError> {
    let dispatch_result = get_dispatch_result(events)?;
    match dispatch_result {
        Ok(()) => {
            let output = events
                .iter()
                .find_map(|event| match event {
                    Event::Ledger(ledger_event) => f(ledger_event),
                    _ => None,
                })
                .ok_or(EventExtractionError::EventMissing)?;
            Ok(Ok(output))
        }
        Err(dispatch_error) => LedgerError::try_from(dispatch_error)
            .map(Err)
            .map_err(EventExtractionError::ForeignDispatchError),
    }
}

/// Looks for [system::Event::ExtrinsicSuccess] and [system::Event::ExtrinsicFailed] in the
/// events and constructs the inner result accordingly. Returns an
/// [EventExtractionError::ExtrinsicStatusMissing] error if none of these events is found.
fn get_dispatch_result(
    events: &[Event],
) -> Result<Result<(), DispatchError>, EventExtractionError> {
    events
        .iter()
        .find_map(|event| match event {
            Event::System(system::Event::ExtrinsicSuccess { .. }) => Some(Ok(())),
            Event::System(system::Event::ExtrinsicFailed { dispatch_error, .. }) => {
                Some(Err(*dispatch_error))
            }
            _ => None,
        })
        .ok_or(EventExtractionError::ExtrinsicStatusMissing)
}
