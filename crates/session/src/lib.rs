//! Edit-session controller for video lessons.
//!
//! Coordinates the four remote operations of a lesson edit (fetch existing
//! content, upload with progress, remove, save) behind a phase-gated state
//! machine, and applies accepted edits back into the host's section list as
//! copy-on-write snapshots. Transport lives behind [`RemoteContentStore`];
//! user-facing messages go through [`Notifier`].

pub mod content;
pub mod error;
mod fetch;
pub mod lesson;
pub mod notify;
pub mod removal;
pub mod session;
pub mod store;
pub mod sync;
pub mod upload;

pub use content::{ContentDescriptor, ContentId, VideoFile};
pub use error::{Result, SessionError};
pub use lesson::{
    CourseId, EditedLesson, Lesson, LessonId, LessonLocator, Section, SectionId,
};
pub use notify::{NoticeKind, Notifier, TracingNotifier};
pub use removal::RemovalOutcome;
pub use session::{EditSession, Phase, SessionSnapshot, SubmitOutcome};
pub use store::{RemoteContentStore, SaveLessonRequest, VIDEO_CONTENT_TYPE};
pub use sync::apply_edit;
pub use upload::UploadOutcome;
