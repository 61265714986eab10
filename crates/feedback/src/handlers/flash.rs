//! One-shot notices carried across a form redirect.
//!
//! The form handler stores the notice in a short-lived cookie, the next
//! dashboard view reads it once and expires the cookie.

use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash_message";

/// Safety net for a notice that is never displayed.
const FLASH_MAX_AGE_SECS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// Suffix of the `flash-*` CSS class.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FlashKind::Error
    }

    /// Reads the notice from the request cookies. Tampered values are ignored.
    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        let cookie = jar.get(FLASH_COOKIE)?;
        let decoded = urlencoding::decode(cookie.value()).ok()?;
        serde_json::from_str(&decoded).ok()
    }

    /// `Set-Cookie` value holding the URL-encoded JSON notice.
    pub fn to_set_cookie_header(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        format!(
            "{FLASH_COOKIE}={}; Path=/; SameSite=Lax; Max-Age={FLASH_MAX_AGE_SECS}",
            urlencoding::encode(&json)
        )
    }
}

/// `Set-Cookie` value that expires the flash cookie.
pub fn clear_flash_header() -> String {
    format!("{FLASH_COOKIE}=; Path=/; SameSite=Lax; Max-Age=0")
}

/// 303 to `url` carrying `flash` for the next view.
pub fn redirect_with_flash(url: &str, flash: FlashMessage) -> Response {
    (
        [(SET_COOKIE, flash.to_set_cookie_header())],
        Redirect::to(url),
    )
        .into_response()
}
