//! Admin middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::warn;

use crate::{envelope::reject, state::State};

pub(crate) const ADMIN_COOKIE: &str = "admin_token";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let authorized = extract_bearer_token(req)
        .or_else(|| req.cookie(ADMIN_COOKIE).map(|cookie| cookie.value()))
        .is_some_and(|secret| state.admin.verify(secret));

    if !authorized {
        warn!(path = %req.uri().path(), "admin credential missing or invalid");

        reject(res, StatusCode::FORBIDDEN, "Admin access required");
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        envelope::Failure,
        test_helpers::{TEST_ADMIN_TOKEN, strict_state},
    };

    use super::*;

    #[salvo::handler]
    async fn secret_area(res: &mut Response) {
        res.render("welcome");
    }

    fn make_service() -> Service {
        let router = Router::new()
            .hoop(inject(strict_state()))
            .hoop(handler)
            .push(Router::new().get(secret_area));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_credential_returns_403() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .send(&make_service())
            .await;

        let body: Failure = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert!(!body.success);

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_bearer_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer nope", true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_returns_403() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("Basic {TEST_ADMIN_TOKEN}"), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_bearer_passes() -> TestResult {
        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, format!("bearer {TEST_ADMIN_TOKEN}"), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "welcome");

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_cookie_passes() -> TestResult {
        let res = TestClient::get("http://example.com")
            .add_header(COOKIE, format!("theme=dark; {ADMIN_COOKIE}={TEST_ADMIN_TOKEN}"), true)
            .send(&make_service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
