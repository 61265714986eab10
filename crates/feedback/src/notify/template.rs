//! Reply email composition with askama templates.

use askama::Template;

use feedback_core::notify::{reply_subject, sender_address, NotificationError, ReplyEmail};

#[derive(Template)]
#[template(path = "email/reply.html")]
struct ReplyHtml<'a> {
    identity: &'a str,
    original: &'a str,
    reply_text: &'a str,
}

#[derive(Template)]
#[template(path = "email/reply.txt")]
struct ReplyText<'a> {
    identity: &'a str,
    original: &'a str,
    reply_text: &'a str,
}

/// Builds the reply email sent to `recipient` from the `identity` sender.
///
/// The HTML body escapes both the reply and the quoted original.
pub fn compose_reply(
    identity: &str,
    recipient: &str,
    original: &str,
    reply_text: &str,
) -> Result<ReplyEmail, NotificationError> {
    let html = ReplyHtml {
        identity,
        original,
        reply_text,
    }
    .render()
    .map_err(|e| NotificationError::Compose(e.to_string()))?;

    let text = ReplyText {
        identity,
        original,
        reply_text,
    }
    .render()
    .map_err(|e| NotificationError::Compose(e.to_string()))?;

    Ok(ReplyEmail {
        from: sender_address(identity),
        to: recipient.to_string(),
        subject: reply_subject(identity),
        html,
        text,
    })
}
