//! Amazon SES reply notifier.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_sesv2::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_sesv2::operation::send_email::SendEmailError;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;

use feedback_core::notify::{NotificationError, Notifier, ReplyEmail, ReplyOutcome};

use super::compose_reply;

const CHARSET: &str = "UTF-8";

/// Notifier that delivers replies through SES.
pub struct SesNotifier {
    client: Client,
    identity: String,
}

impl SesNotifier {
    pub fn new(client: Client, identity: impl Into<String>) -> Self {
        Self {
            client,
            identity: identity.into(),
        }
    }

    fn email_content(email: &ReplyEmail) -> Result<EmailContent, NotificationError> {
        let subject = utf8_content(&email.subject)?;
        let body = Body::builder()
            .html(utf8_content(&email.html)?)
            .text(utf8_content(&email.text)?)
            .build();

        let message = Message::builder().subject(subject).body(body).build();
        Ok(EmailContent::builder().simple(message).build())
    }
}

fn utf8_content(data: &str) -> Result<Content, NotificationError> {
    Content::builder()
        .data(data)
        .charset(CHARSET)
        .build()
        .map_err(|e| NotificationError::Compose(e.to_string()))
}

#[async_trait]
impl Notifier for SesNotifier {
    async fn send_reply(
        &self,
        recipient: &str,
        original: &str,
        reply_text: &str,
    ) -> Result<ReplyOutcome, NotificationError> {
        let email = compose_reply(&self.identity, recipient, original, reply_text)?;
        let content = Self::email_content(&email)?;

        let result = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(Destination::builder().to_addresses(&email.to).build())
            .content(content)
            .send()
            .await;

        match result {
            Ok(output) => {
                tracing::info!(
                    to = %email.to,
                    message_id = output.message_id().unwrap_or_default(),
                    "Reply sent"
                );
                Ok(ReplyOutcome::sent())
            }
            Err(err) => classify_send_error(err),
        }
    }
}

/// Splits SES failures into rejected deliveries and unexpected errors.
///
/// Rejections the operator can act on (unverified addresses, paused sending,
/// quotas) become a failed outcome carrying the service's message.
fn classify_send_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<SendEmailError, R>,
) -> Result<ReplyOutcome, NotificationError> {
    let err = err.into_service_error();
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());

    match err {
        SendEmailError::MessageRejected(_)
        | SendEmailError::MailFromDomainNotVerifiedException(_)
        | SendEmailError::SendingPausedException(_)
        | SendEmailError::AccountSuspendedException(_)
        | SendEmailError::LimitExceededException(_)
        | SendEmailError::TooManyRequestsException(_)
        | SendEmailError::BadRequestException(_)
        | SendEmailError::NotFoundException(_) => {
            tracing::warn!(error = %message, "SES rejected the reply");
            Ok(ReplyOutcome::failed(message))
        }
        _ => {
            tracing::error!(error = %message, "Failed to reach SES");
            Err(NotificationError::Transport(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_sesv2::error::ErrorMetadata;
    use aws_sdk_sesv2::types::error::MessageRejected;

    use super::*;

    fn service_error(err: SendEmailError) -> SdkError<SendEmailError, ()> {
        SdkError::service_error(err, ())
    }

    #[test]
    fn test_email_content_builds() {
        let email = compose_reply("qpply.me", "a@b.com", "hi", "hello").unwrap();
        assert!(SesNotifier::email_content(&email).is_ok());
    }

    #[test]
    fn test_rejected_message_is_failed_outcome() {
        let rejected = MessageRejected::builder()
            .message("Email address is not verified.")
            .build();

        let outcome =
            classify_send_error(service_error(SendEmailError::MessageRejected(rejected))).unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Email address is not verified.");
    }

    #[test]
    fn test_unmodeled_failure_is_transport_error() {
        let err = SendEmailError::generic(ErrorMetadata::builder().build());

        let result = classify_send_error(service_error(err));

        assert!(matches!(result, Err(NotificationError::Transport(_))));
    }
}
