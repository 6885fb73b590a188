//! Authentication extractor for admin routes.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};

use crate::state::AppState;

/// Extractor that requires a valid admin session.
///
/// The session gate is consulted on every request; a valid session also
/// counts as admin activity. Without one, the request is redirected to the
/// login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireAdminAuth) -> impl IntoResponse {
///     "staff only"
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdminAuth;

/// Rejection when no valid admin session exists.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.gate().is_authenticated() {
            state.gate().touch();
            Ok(Self)
        } else {
            Err(AdminAuthRejection)
        }
    }
}
