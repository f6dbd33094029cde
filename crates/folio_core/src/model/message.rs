//! Guestbook message model.
//!
//! # Responsibility
//! - Define the record stored in the `portfolio-comments` slot.
//! - Validate and normalize visitor input before a message exists.
//!
//! # Invariants
//! - `author` is 1..=50 characters after trimming.
//! - `body` is 1..=500 characters after trimming.
//! - `created_at` is Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum author length in characters.
pub const MAX_AUTHOR_CHARS: usize = 50;
/// Maximum body length in characters.
pub const MAX_BODY_CHARS: usize = 500;

/// Identifier of one guestbook message.
///
/// Decimal epoch milliseconds in practice; kept as a string because that is
/// the persisted shape.
pub type MessageId = String;

/// One visitor message.
///
/// Field names on the wire (`name`, `message`, `timestamp`) predate this
/// crate and are kept as-is so stored guestbooks keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    #[serde(rename = "name")]
    pub author: String,
    #[serde(rename = "message")]
    pub body: String,
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

/// Validation error for visitor input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageValidationError {
    EmptyAuthor,
    EmptyBody,
    AuthorTooLong { chars: usize, max: usize },
    BodyTooLong { chars: usize, max: usize },
}

impl Display for MessageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthor => write!(f, "author cannot be empty"),
            Self::EmptyBody => write!(f, "message cannot be empty"),
            Self::AuthorTooLong { chars, max } => {
                write!(f, "author is {chars} characters; maximum is {max}")
            }
            Self::BodyTooLong { chars, max } => {
                write!(f, "message is {chars} characters; maximum is {max}")
            }
        }
    }
}

impl Error for MessageValidationError {}

impl Message {
    /// Creates a message from raw visitor input.
    ///
    /// Author and body are trimmed before validation and storage.
    ///
    /// # Errors
    /// - Returns `MessageValidationError` when either field is empty after
    ///   trimming or exceeds its character bound.
    pub fn new(
        id: impl Into<MessageId>,
        author: &str,
        body: &str,
        created_at: i64,
    ) -> Result<Self, MessageValidationError> {
        let (author, body) = normalize_input(author, body)?;
        Ok(Self {
            id: id.into(),
            author,
            body,
            created_at,
        })
    }

    /// First character of the author, uppercased, for avatar bubbles.
    pub fn author_initial(&self) -> String {
        author_initial(&self.author)
    }
}

/// Trims and validates an `(author, body)` pair.
///
/// Returns the trimmed values on success.
pub fn normalize_input(
    author: &str,
    body: &str,
) -> Result<(String, String), MessageValidationError> {
    let author = author.trim();
    let body = body.trim();

    if author.is_empty() {
        return Err(MessageValidationError::EmptyAuthor);
    }
    if body.is_empty() {
        return Err(MessageValidationError::EmptyBody);
    }

    let author_chars = author.chars().count();
    if author_chars > MAX_AUTHOR_CHARS {
        return Err(MessageValidationError::AuthorTooLong {
            chars: author_chars,
            max: MAX_AUTHOR_CHARS,
        });
    }
    let body_chars = body.chars().count();
    if body_chars > MAX_BODY_CHARS {
        return Err(MessageValidationError::BodyTooLong {
            chars: body_chars,
            max: MAX_BODY_CHARS,
        });
    }

    Ok((author.to_string(), body.to_string()))
}

/// First character of `author` uppercased; empty when `author` is blank.
pub fn author_initial(author: &str) -> String {
    author
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{author_initial, Message, MessageValidationError, MAX_AUTHOR_CHARS};

    #[test]
    fn new_trims_author_and_body() {
        let message = Message::new("1", "  ada ", "\thello\n", 10).unwrap();
        assert_eq!(message.author, "ada");
        assert_eq!(message.body, "hello");
    }

    #[test]
    fn new_rejects_whitespace_only_fields() {
        assert_eq!(
            Message::new("1", "   ", "hi", 0).unwrap_err(),
            MessageValidationError::EmptyAuthor
        );
        assert_eq!(
            Message::new("1", "ada", " \n ", 0).unwrap_err(),
            MessageValidationError::EmptyBody
        );
    }

    #[test]
    fn new_counts_characters_not_bytes() {
        let author = "é".repeat(MAX_AUTHOR_CHARS);
        assert!(Message::new("1", &author, "hi", 0).is_ok());

        let too_long = "é".repeat(MAX_AUTHOR_CHARS + 1);
        let err = Message::new("1", &too_long, "hi", 0).unwrap_err();
        assert!(matches!(err, MessageValidationError::AuthorTooLong { chars: 51, .. }));
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let message = Message::new("42", "ada", "hello", 1_700_000_000_000).unwrap();
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "name": "ada",
                "message": "hello",
                "timestamp": 1_700_000_000_000_i64
            })
        );
    }

    #[test]
    fn author_initial_uppercases_first_char() {
        assert_eq!(author_initial(" ada"), "A");
        assert_eq!(author_initial("ßen"), "SS");
        assert_eq!(author_initial("  "), "");
    }
}
