/// Sending identity used when none is configured.
pub const DEFAULT_IDENTITY: &str = "qpply.me";

/// The fixed sender address for replies.
pub fn sender_address(identity: &str) -> String {
    format!("support@{identity}")
}

pub fn reply_subject(identity: &str) -> String {
    format!("Your {identity} Support Ticket")
}
