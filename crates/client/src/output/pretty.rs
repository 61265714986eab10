//! Pretty output formatting.

use chrono::{DateTime, Utc};

use feedback_core::dashboard::{ListState, MessageEntry};
use feedback_core::message::{relative_age, short_user_id, FeedbackMessage};
use feedback_core::notify::ReplyOutcome;

use crate::client::health::HealthReport;

/// Format a message for display.
pub fn format_message(message: &FeedbackMessage, now: DateTime<Utc>) -> String {
    format!(
        "{} ({})\n  ID: {}\n  User: {}\n  {}",
        message.email,
        relative_age(message.created_at, now),
        message.id,
        short_user_id(&message.user_id),
        message.message.replace('\n', "\n  ")
    )
}

/// Format messages for display.
pub fn format_messages(messages: &[FeedbackMessage], now: DateTime<Utc>) -> String {
    if messages.is_empty() {
        return "No feedback messages found.".to_string();
    }
    let mut output = format!("MESSAGES ({} total)\n", messages.len());
    output.push_str(&"-".repeat(40));
    for message in messages {
        output.push_str(&format!("\n{}", format_message(message, now)));
        output.push('\n');
    }
    output
}

fn format_entry(entry: &MessageEntry, now: DateTime<Utc>) -> String {
    let mut output = format_message(&entry.message, now);
    if let Some((success, status)) = entry.reply.status() {
        let marker = if success { "ok" } else { "error" };
        output.push_str(&format!("\n  [{marker}] {status}"));
    }
    if entry.reply.is_replied() {
        output.push_str("\n  Reply sent");
    }
    output
}

/// Format the dashboard state for display.
pub fn format_dashboard(state: &ListState, now: DateTime<Utc>) -> String {
    match state {
        ListState::Loading => "Loading...".to_string(),
        ListState::Error { message } => format!("{message}\nRun again with --retries to try again."),
        ListState::Loaded(view) => {
            let mut output = String::new();
            if let Some(notice) = view.notice() {
                output.push_str(&format!("! {notice}\n"));
            }
            if view.is_empty() {
                output.push_str("No feedback messages found.");
                return output;
            }
            output.push_str(&format!("MESSAGES ({} total)\n", view.len()));
            output.push_str(&"-".repeat(40));
            for entry in view.entries() {
                output.push_str(&format!("\n{}", format_entry(entry, now)));
                output.push('\n');
            }
            output
        }
    }
}

/// Format a reply outcome for display.
pub fn format_outcome(outcome: &ReplyOutcome) -> String {
    if outcome.success {
        outcome.message.clone()
    } else {
        format!("Reply failed: {}", outcome.message)
    }
}

/// Format the health report for display.
pub fn format_health(report: &HealthReport) -> String {
    format!(
        "Status: {}\n  Version: {}\n  Storage: {}\n  Notifier: {}\n  List cache: {}",
        report.status,
        report.version,
        report.storage,
        report.notifier,
        if report.list_cache_enabled { "on" } else { "off" }
    )
}
