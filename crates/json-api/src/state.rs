//! State

use std::sync::Arc;

use guestgate_app::context::AppContext;

use crate::admin::AdminCredential;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin: AdminCredential,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin: AdminCredential) -> Self {
        Self { app, admin }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, admin: AdminCredential) -> Arc<Self> {
        Arc::new(Self::new(app, admin))
    }
}
