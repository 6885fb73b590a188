//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Login form body.
#[derive(Deserialize)]
pub struct LoginForm {
    pub passcode: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Render the passcode form, or skip straight to the dashboard when a valid
/// session already exists.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> Response {
    if state.gate().is_authenticated() {
        return Redirect::to("/").into_response();
    }
    LoginTemplate { error: None }.into_response()
}

/// Check the passcode against the orders API and open the session.
#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let passcode = SecretString::from(form.passcode);

    match state.gate().authenticate(state.api(), &passcode).await {
        Ok(true) => {
            tracing::info!("Admin logged in");
            Ok(Redirect::to("/").into_response())
        }
        Ok(false) => Ok(LoginTemplate {
            error: Some("Code d'accès incorrect.".to_string()),
        }
        .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "Passcode check failed");
            Ok(LoginTemplate {
                error: Some("Erreur du service de commandes. Veuillez réessayer.".to_string()),
            }
            .into_response())
        }
    }
}

/// Drop the session and return to the login page.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> Result<Redirect> {
    state.gate().logout()?;
    tracing::info!("Admin logged out");
    Ok(Redirect::to("/login"))
}
