use super::FeedbackMessage;

/// Sorts messages newest first. Ties keep their incoming order.
pub fn sort_newest_first(messages: &mut [FeedbackMessage]) {
    messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
