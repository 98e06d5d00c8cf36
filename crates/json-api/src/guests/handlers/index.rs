//! Guest Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use guestgate_app::guests::GuestView;

use crate::extensions::*;

/// Roster entry with its admission state
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestResponse {
    /// Masked phone
    pub phone: String,

    /// Unmasked phone, admin-only
    pub real_phone: String,

    pub name: String,

    pub tickets: u32,

    pub newsletter: bool,

    pub validated: bool,

    /// RFC 3339, once validated
    pub validated_at: Option<String>,

    /// Door code, once validated
    pub token: Option<String>,

    pub entered: bool,

    /// RFC 3339, once entered
    pub entry_timestamp: Option<String>,

    pub entered_by: Option<String>,
}

impl From<GuestView> for GuestResponse {
    fn from(view: GuestView) -> Self {
        let validated = view.is_validated();
        let entered = view.is_entered();
        let admission = view.admission;

        Self {
            phone: view.phone,
            real_phone: view.real_phone.into(),
            name: view.name,
            tickets: view.ticket_count,
            newsletter: view.newsletter_opt_in,
            validated,
            validated_at: admission
                .as_ref()
                .map(|record| record.validated_at.to_string()),
            entered,
            entry_timestamp: admission
                .as_ref()
                .and_then(|record| record.entered_at())
                .map(|at| at.to_string()),
            entered_by: admission
                .as_ref()
                .and_then(|record| record.entered_by())
                .map(|by| by.to_string()),
            token: admission.map(|record| record.token.into()),
        }
    }
}

/// Guest Index Handler
///
/// Lists the roster joined with admissions, sorted by name.
#[endpoint(
    tags("guests"),
    summary = "List Guests",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<GuestResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    let guests = state.app.guests.list_guests().await;

    Ok(Json(guests.into_iter().map(Into::into).collect()))
}
