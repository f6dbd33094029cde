//! Form-side state for a message being typed.

use crate::model::message::{author_initial, normalize_input, MAX_BODY_CHARS};

/// Unsubmitted author/body pair as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestbookDraft {
    pub author: String,
    pub body: String,
}

impl GuestbookDraft {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            body: body.into(),
        }
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        normalize_input(&self.author, &self.body).is_ok()
    }

    /// Character counter shown next to the body field, e.g. `42/500`.
    pub fn body_counter(&self) -> String {
        body_counter(&self.body)
    }

    /// Avatar letter for a live preview of the author.
    pub fn avatar_initial(&self) -> String {
        author_initial(&self.author)
    }

    /// Resets both fields after a successful submit.
    pub fn reset(&mut self) {
        self.author.clear();
        self.body.clear();
    }
}

/// `<chars>/500` counter for a raw body value (untrimmed, as typed).
pub fn body_counter(body: &str) -> String {
    format!("{}/{}", body.chars().count(), MAX_BODY_CHARS)
}

#[cfg(test)]
mod tests {
    use super::GuestbookDraft;

    #[test]
    fn can_submit_requires_both_fields() {
        assert!(!GuestbookDraft::default().can_submit());
        assert!(!GuestbookDraft::new("ada", "   ").can_submit());
        assert!(!GuestbookDraft::new("  ", "hello").can_submit());
        assert!(GuestbookDraft::new("ada", "hello").can_submit());
    }

    #[test]
    fn can_submit_rejects_oversized_body() {
        assert!(!GuestbookDraft::new("ada", "x".repeat(501)).can_submit());
    }

    #[test]
    fn counter_counts_raw_characters() {
        assert_eq!(GuestbookDraft::new("", " héllo ").body_counter(), "7/500");
    }

    #[test]
    fn reset_clears_fields() {
        let mut draft = GuestbookDraft::new("ada", "hello");
        draft.reset();
        assert_eq!(draft, GuestbookDraft::default());
    }
}
