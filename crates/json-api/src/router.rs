//! App Router

use salvo::Router;

use crate::{admin, admissions, guests, healthcheck, messages, observability::metrics_handler};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(Router::with_path("validate").post(admissions::validate::handler))
        .push(Router::with_path("confirm-entry").post(admissions::confirm_entry::handler))
        .push(Router::with_path("validate-code").post(admissions::confirm_entry::handler))
        .push(Router::with_path("share-message").post(messages::create::handler))
        .push(
            Router::new()
                .hoop(admin::middleware::handler)
                .push(Router::with_path("status").get(guests::status::handler))
                .push(Router::with_path("validated").get(guests::validated::handler))
                .push(
                    Router::with_path("guests")
                        .get(guests::index::handler)
                        .post(guests::create::handler),
                )
                .push(
                    Router::with_path("validate-link/{token}")
                        .get(admissions::validate_link::get_handler)
                        .post(admissions::validate_link::confirm_handler),
                )
                .push(Router::with_path("messages").get(messages::index::handler)),
        )
}
