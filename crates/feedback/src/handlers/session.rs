//! Sign-in and sign-out.
//!
//! Signing in exchanges an operator token for a session cookie holding it.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use feedback_core::access::{validate_return_to, SIGN_IN_PATH};

use super::pages::HtmlTemplate;
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct SignInQuery {
    pub return_to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub token: String,
    pub return_to: Option<String>,
}

#[derive(Template)]
#[template(path = "sign_in.html")]
struct SignInTemplate {
    return_to: String,
    error: Option<String>,
}

fn safe_return_to(return_to: Option<&str>) -> String {
    return_to
        .and_then(validate_return_to)
        .unwrap_or("/")
        .to_string()
}

/// Handler for GET /sign-in.
///
/// A visitor who already holds a valid session goes straight back.
pub async fn sign_in_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<SignInQuery>,
) -> Response {
    let return_to = safe_return_to(query.return_to.as_deref());

    let token = jar.get(&state.config.session_cookie).map(|c| c.value());
    if state.gate.is_authenticated(token).await {
        return Redirect::to(&return_to).into_response();
    }

    HtmlTemplate(SignInTemplate {
        return_to,
        error: None,
    })
    .into_response()
}

/// Handler for POST /sign-in.
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Response {
    let return_to = safe_return_to(form.return_to.as_deref());
    let token = form.token.trim();

    if !state.gate.is_authenticated(Some(token)).await {
        tracing::warn!("Rejected sign-in attempt");
        let page = HtmlTemplate(SignInTemplate {
            return_to,
            error: Some("Invalid access token".to_string()),
        });
        return (StatusCode::UNAUTHORIZED, page).into_response();
    }

    let cookie = Cookie::build((state.config.session_cookie.clone(), token.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!("Operator signed in");
    (jar.add(cookie), Redirect::to(&return_to)).into_response()
}

/// Handler for POST /sign-out.
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar) -> Response {
    let cookie = Cookie::build(state.config.session_cookie.clone())
        .path("/")
        .build();
    (jar.remove(cookie), Redirect::to(SIGN_IN_PATH)).into_response()
}
