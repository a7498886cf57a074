use std::fmt::{Display, Formatter};

use crate::content::ContentId;

/// Result type used by the session crate.
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors produced by remote operations and the section synchronizer.
///
/// Remote-call failures never escape a coordinator: they are translated into
/// a phase revert plus a notification. `LessonIndexOutOfRange` is the one
/// error a host can receive directly, and it marks a contract violation on
/// the host's side, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Network or server failure, including non-2xx responses.
    Transport { message: String },
    /// The server rejected the payload shape or content.
    Validation { message: String },
    /// The referenced content object does not exist remotely.
    ContentNotFound { content_id: ContentId },
    /// An edit locator that does not resolve in the section list.
    LessonIndexOutOfRange {
        section_index: usize,
        lesson_index: usize,
    },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { message } => write!(f, "transport failure: {message}"),
            Self::Validation { message } => write!(f, "rejected by server: {message}"),
            Self::ContentNotFound { content_id } => {
                write!(f, "content not found: {content_id}")
            }
            Self::LessonIndexOutOfRange {
                section_index,
                lesson_index,
            } => write!(
                f,
                "lesson index out of range: section {section_index}, lesson {lesson_index}"
            ),
        }
    }
}

impl std::error::Error for SessionError {}
