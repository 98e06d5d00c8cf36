//! Gate Status Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use guestgate_app::guests::GateStats;

use crate::extensions::*;

/// Gate Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusResponse {
    /// Guests on the roster
    pub total_guests: usize,

    /// Phones validated so far
    pub validated_count: usize,

    /// Validated guests confirmed at the door
    pub entered_count: usize,

    /// Tickets allotted across the roster
    pub total_tickets: u64,

    /// Tickets held by validated guests
    pub validated_tickets: u64,
}

impl From<GateStats> for StatusResponse {
    fn from(stats: GateStats) -> Self {
        Self {
            total_guests: stats.total_guests,
            validated_count: stats.validated_count,
            entered_count: stats.entered_count,
            total_tickets: stats.total_tickets,
            validated_tickets: stats.validated_tickets,
        }
    }
}

/// Gate Status Handler
///
/// Returns aggregate roster and admission counts.
#[endpoint(
    tags("guests"),
    summary = "Gate Status",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StatusResponse>, StatusError> {
    let state = depot.state_or_500()?;

    Ok(Json(state.app.guests.stats().await.into()))
}
