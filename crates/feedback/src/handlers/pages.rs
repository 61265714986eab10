//! Server-rendered dashboard.
//!
//! Every view drives a fresh `ListState` through the same transitions the
//! CLI dashboard uses, then renders the resulting state.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Deserialize;

use feedback_core::dashboard::{ListState, MessageEntry, LOAD_FAILED_MESSAGE, REPLY_SETTLE_DELAY};
use feedback_core::message::{relative_age, short_user_id};

use super::flash::{clear_flash_header, FlashMessage};
use crate::state::AppState;

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

/// One rendered feedback message.
struct MessageCard {
    id: String,
    email: String,
    message: String,
    age: String,
    user_id: String,
    reply_href: String,
    reply_open: bool,
    replied: bool,
    submitting: bool,
    draft: String,
    status_success: bool,
    status_message: Option<String>,
}

impl MessageCard {
    fn from_entry(entry: &MessageEntry) -> Self {
        let message = &entry.message;
        let reply = &entry.reply;
        let status = reply.status();

        Self {
            id: message.id.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
            age: relative_age(message.created_at, Utc::now()),
            user_id: short_user_id(&message.user_id),
            reply_href: format!(
                "/?reply={}#message-{}",
                urlencoding::encode(&message.id),
                message.id
            ),
            reply_open: reply.is_form_visible(),
            replied: reply.is_replied(),
            submitting: reply.is_submitting(),
            draft: reply.draft().unwrap_or_default().to_string(),
            status_success: status.is_some_and(|(success, _)| success),
            status_message: status.map(|(_, message)| message.to_string()),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    cards: Vec<MessageCard>,
    error: Option<String>,
    notice: Option<String>,
    flash: Option<FlashMessage>,
    refresh: Option<SettleRefresh>,
}

/// Reload that settles a sent reply into its replied state.
struct SettleRefresh {
    seconds: u64,
    /// Url-encoded id of the message that was replied to.
    replied: String,
}

/// Renders `list` as the dashboard page.
///
/// A sent reply schedules a reload after the settle delay. The reload
/// names the message so the next view shows it as replied.
pub fn render_dashboard(list: &ListState, flash: Option<FlashMessage>) -> Response {
    let (cards, notice): (Vec<MessageCard>, Option<String>) = match list.view() {
        Some(view) => (
            view.entries().iter().map(MessageCard::from_entry).collect(),
            view.notice().map(str::to_string),
        ),
        None => (Vec::new(), None),
    };

    let settling = list.view().and_then(|view| {
        view.entries()
            .iter()
            .find(|entry| entry.reply.status().is_some_and(|(success, _)| success))
    });

    HtmlTemplate(DashboardTemplate {
        cards,
        error: list.error_message().map(str::to_string),
        notice,
        flash,
        refresh: settling.map(|entry| SettleRefresh {
            seconds: REPLY_SETTLE_DELAY.as_secs(),
            replied: urlencoding::encode(&entry.message.id).into_owned(),
        }),
    })
    .into_response()
}

/// Runs the initial load: `Loading -> Loaded | Error`.
pub async fn load_list(state: &AppState) -> ListState {
    let mut list = ListState::new();
    match state.service.list_messages().await {
        Ok(messages) => list.load_messages(messages),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard failed to load messages");
            list.load_failed(LOAD_FAILED_MESSAGE);
        }
    }
    list
}

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    /// Message whose reply form should be open.
    pub reply: Option<String>,
    /// Message whose reply was sent by the previous view.
    pub replied: Option<String>,
}

/// Handler for the dashboard (GET /).
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let mut list = load_list(&state).await;

    let flash = FlashMessage::from_jar(&jar);
    let had_flash = flash.is_some();

    // A failed delete shows inline on the list instead of as a banner.
    let banner = match flash {
        Some(flash) if flash.is_error() => match list.delete_failed(flash.message.clone()) {
            Ok(()) => None,
            Err(_) => Some(flash),
        },
        other => other,
    };

    if let Some(id) = query.replied.as_deref() {
        if let Err(e) = list.mark_replied(id) {
            tracing::debug!(id = %id, error = %e, "Ignoring replied marker");
        }
    }

    if let Some(id) = query.reply.as_deref() {
        if let Err(e) = list.open_reply(id) {
            tracing::debug!(id = %id, error = %e, "Ignoring reply request");
        }
    }

    let page = render_dashboard(&list, banner);
    if had_flash {
        ([(SET_COOKIE, clear_flash_header())], page).into_response()
    } else {
        page
    }
}
