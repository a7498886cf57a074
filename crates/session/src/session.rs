use parking_lot::Mutex;
use tracing::{info, warn};

use crate::content::{ContentDescriptor, ContentId, VideoFile};
use crate::error::SessionError;
use crate::fetch::ContentFetcher;
use crate::lesson::{CourseId, EditedLesson, Lesson, LessonId, LessonLocator, SectionId};
use crate::notify::{NoticeKind, Notifier};
use crate::removal::{RemovalCoordinator, RemovalOutcome};
use crate::store::{RemoteContentStore, SaveLessonRequest, VIDEO_CONTENT_TYPE};
use crate::upload::{UploadCoordinator, UploadOutcome};

const TITLE_REQUIRED: &str = "A lesson title is required";
const CONTENT_REQUIRED: &str = "Upload a video before saving";

/// Lifecycle phase of one edit session.
///
/// The phase is the single source of truth for which operations are
/// currently permitted; every coordinator checks it at its gate before
/// touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving previously saved content on session start.
    Fetching,
    /// No content attached; upload is permitted.
    Empty,
    /// Saved content resolved; upload, removal and submit are permitted.
    Ready,
    /// Freshly uploaded content, not yet saved to the lesson record.
    UploadedReady,
    Uploading,
    Removing,
    Saving,
}

impl Phase {
    /// Phases from which a new upload may start.
    pub(crate) fn accepts_upload(self) -> bool {
        matches!(self, Phase::Empty | Phase::Ready)
    }

    /// Phases with content settled and no operation in flight.
    pub(crate) fn content_settled(self) -> bool {
        matches!(self, Phase::Ready | Phase::UploadedReady)
    }
}

/// Mutable display state shared between the session and its coordinators.
///
/// The lock around it is held only across synchronous transitions, never
/// across a store call.
#[derive(Debug, Clone)]
pub(crate) struct SessionState {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) for_preview: bool,
    pub(crate) content: Option<ContentDescriptor>,
    pub(crate) phase: Phase,
    pub(crate) progress: u8,
}

/// Immutable copy of the display state consumed by the host view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub progress: u8,
    pub title: String,
    pub description: String,
    pub for_preview: bool,
    pub content: Option<ContentDescriptor>,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The server accepted the edit; the host should apply it to its
    /// section list and close the session.
    Saved(EditedLesson),
    /// Rejected locally before any network call.
    Rejected,
    /// The save failed; the session stays open for a retry.
    Failed,
}

enum Staged {
    Busy,
    Invalid(&'static str),
    Go {
        prior: Phase,
        request: SaveLessonRequest,
    },
}

/// Edit session for a single video lesson.
///
/// Holds the authoritative in-memory state for the edit and arbitrates
/// which coordinator may run at any time. All operations take `&self`, so a
/// call arriving while another operation is in flight observes the
/// in-flight phase at its gate and is rejected instead of racing. Sessions
/// for different lessons share nothing and run fully independently.
pub struct EditSession<S, N> {
    store: S,
    notifier: N,
    course_id: CourseId,
    section_id: SectionId,
    lesson_id: LessonId,
    content_ref: Option<ContentId>,
    locator: LessonLocator,
    state: Mutex<SessionState>,
}

impl<S, N> EditSession<S, N>
where
    S: RemoteContentStore,
    N: Notifier,
{
    /// Opens a session for `lesson` and resolves its saved content, if any.
    ///
    /// A lesson without a content reference starts at `Empty`; one with a
    /// reference goes through `Fetching` here and lands on `Ready`
    /// (resolved) or `Empty` (fetch failed, the author must re-upload).
    pub async fn open(
        store: S,
        notifier: N,
        course_id: CourseId,
        section_id: SectionId,
        locator: LessonLocator,
        lesson: &Lesson,
    ) -> Self {
        let session = Self {
            store,
            notifier,
            course_id,
            section_id,
            lesson_id: lesson.id.clone(),
            content_ref: lesson.content_ref.clone(),
            locator,
            state: Mutex::new(SessionState {
                title: lesson.title.clone(),
                description: lesson.description.clone(),
                for_preview: lesson.for_preview,
                content: None,
                phase: Phase::Empty,
                progress: 0,
            }),
        };

        if let Some(content_id) = session.content_ref.clone() {
            ContentFetcher::new(&session.store, &session.notifier, &session.state)
                .resolve(&content_id, &session.course_id)
                .await;
        }
        session
    }

    /// Replaces the lesson title. Permitted in any phase.
    pub fn set_title(&self, title: impl Into<String>) {
        self.state.lock().title = title.into();
    }

    /// Replaces the lesson description. Permitted in any phase.
    pub fn set_description(&self, description: impl Into<String>) {
        self.state.lock().description = description.into();
    }

    /// Flips the preview flag. Permitted in any phase.
    pub fn set_for_preview(&self, for_preview: bool) {
        self.state.lock().for_preview = for_preview;
    }

    /// Uploads a new video asset, reporting progress into the session state.
    pub async fn start_upload(&self, file: VideoFile) -> UploadOutcome {
        UploadCoordinator::new(&self.store, &self.notifier, &self.state)
            .start(&self.course_id, &file)
            .await
    }

    /// Deletes the attached content object and clears the local descriptor.
    pub async fn remove_content(&self) -> RemovalOutcome {
        RemovalCoordinator::new(&self.store, &self.notifier, &self.state)
            .remove(&self.course_id)
            .await
    }

    /// Persists the edited fields to the lesson record.
    ///
    /// Validates locally before any network call: the title must be
    /// non-empty and a content descriptor must be attached; either miss is
    /// rejected without touching the store or the phase. The content phase
    /// from before the save comes back whether the save succeeds or fails,
    /// since saving never changes content state.
    pub async fn submit(&self) -> SubmitOutcome {
        let staged = {
            let mut state = self.state.lock();
            if matches!(
                state.phase,
                Phase::Fetching | Phase::Uploading | Phase::Removing | Phase::Saving
            ) {
                warn!(phase = ?state.phase, "submit rejected: operation in flight");
                Staged::Busy
            } else if state.title.trim().is_empty() {
                warn!("submit rejected: empty title");
                Staged::Invalid(TITLE_REQUIRED)
            } else if let Some(content) = state.content.clone() {
                let prior = state.phase;
                state.phase = Phase::Saving;
                Staged::Go {
                    prior,
                    request: SaveLessonRequest {
                        title: state.title.clone(),
                        description: state.description.clone(),
                        content_type: VIDEO_CONTENT_TYPE.to_string(),
                        content,
                        for_preview: state.for_preview,
                        course_id: self.course_id.clone(),
                        section_id: self.section_id.clone(),
                        lesson_id: self.lesson_id.clone(),
                        content_id: self.content_ref.clone(),
                    },
                }
            } else {
                warn!("submit rejected: no video attached");
                Staged::Invalid(CONTENT_REQUIRED)
            }
        };

        let (prior, request) = match staged {
            Staged::Go { prior, request } => (prior, request),
            Staged::Busy => return SubmitOutcome::Rejected,
            Staged::Invalid(text) => {
                self.notifier.notify(NoticeKind::Warning, text);
                return SubmitOutcome::Rejected;
            }
        };

        let saved = self.store.save_lesson(&request).await;
        self.state.lock().phase = prior;

        match saved {
            Ok(()) => {
                info!(lesson_id = %self.lesson_id, "lesson saved");
                self.notifier.notify(NoticeKind::Success, "Lesson modified");
                SubmitOutcome::Saved(EditedLesson {
                    locator: self.locator,
                    title: request.title,
                    description: request.description,
                    for_preview: request.for_preview,
                    content_ref: self.content_ref.clone(),
                })
            }
            Err(error) => {
                warn!(lesson_id = %self.lesson_id, %error, "lesson save failed");
                match &error {
                    SessionError::Validation { message } => {
                        self.notifier.notify(NoticeKind::Warning, message);
                    }
                    _ => {
                        self.notifier
                            .notify(NoticeKind::Error, "Couldn't save the lesson");
                    }
                }
                SubmitOutcome::Failed
            }
        }
    }

    /// Immutable copy of the display state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            phase: state.phase,
            progress: state.progress,
            title: state.title.clone(),
            description: state.description.clone(),
            for_preview: state.for_preview,
            content: state.content.clone(),
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    /// Latest upload percentage for display.
    pub fn progress(&self) -> u8 {
        self.state.lock().progress
    }

    /// Position of the edited lesson in the host's section list.
    pub fn locator(&self) -> LessonLocator {
        self.locator
    }
}
