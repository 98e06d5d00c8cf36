//! Test helpers.

use std::sync::Arc;

use guestgate_app::{
    admissions::MockAdmissionsService, context::AppContext, guests::MockGuestsService,
    messages::MockMessagesService,
};
use salvo::{affix_state::inject, prelude::*};

use crate::{admin::AdminCredential, state::State};

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

pub(crate) fn strict_admissions_mock() -> MockAdmissionsService {
    let mut admissions = MockAdmissionsService::new();

    admissions.expect_validate().never();
    admissions.expect_confirm_entry().never();
    admissions.expect_lookup_token().never();

    admissions
}

pub(crate) fn strict_guests_mock() -> MockGuestsService {
    let mut guests = MockGuestsService::new();

    guests.expect_stats().never();
    guests.expect_list_validations().never();
    guests.expect_list_guests().never();
    guests.expect_add_guest().never();

    guests
}

pub(crate) fn strict_messages_mock() -> MockMessagesService {
    let mut messages = MockMessagesService::new();

    messages.expect_post_message().never();
    messages.expect_list_messages().never();

    messages
}

fn state(
    admissions: MockAdmissionsService,
    guests: MockGuestsService,
    messages: MockMessagesService,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            admissions: Arc::new(admissions),
            guests: Arc::new(guests),
            messages: Arc::new(messages),
        },
        AdminCredential::new(TEST_ADMIN_TOKEN),
    )
}

pub(crate) fn strict_state() -> Arc<State> {
    state(
        strict_admissions_mock(),
        strict_guests_mock(),
        strict_messages_mock(),
    )
}

pub(crate) fn admissions_service(admissions: MockAdmissionsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                admissions,
                strict_guests_mock(),
                strict_messages_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn guests_service(guests: MockGuestsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                strict_admissions_mock(),
                guests,
                strict_messages_mock(),
            )))
            .push(route),
    )
}

pub(crate) fn messages_service(messages: MockMessagesService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(
                strict_admissions_mock(),
                strict_guests_mock(),
                messages,
            )))
            .push(route),
    )
}
