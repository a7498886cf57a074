use parking_lot::Mutex;
use tracing::{info, warn};

use crate::content::VideoFile;
use crate::error::SessionError;
use crate::lesson::CourseId;
use crate::notify::{NoticeKind, Notifier};
use crate::session::{Phase, SessionState};
use crate::store::RemoteContentStore;

/// Result of an upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The asset is uploaded and attached; not yet saved to the lesson.
    Uploaded,
    /// Rejected at the gate: another operation is in flight.
    Rejected,
    /// The call failed; the pre-upload state is back in force.
    Failed,
}

/// Owns the upload-in-progress lifecycle: gate, progress, revert on failure.
pub(crate) struct UploadCoordinator<'a, S, N> {
    store: &'a S,
    notifier: &'a N,
    state: &'a Mutex<SessionState>,
}

impl<'a, S, N> UploadCoordinator<'a, S, N>
where
    S: RemoteContentStore,
    N: Notifier,
{
    pub(crate) fn new(store: &'a S, notifier: &'a N, state: &'a Mutex<SessionState>) -> Self {
        Self {
            store,
            notifier,
            state,
        }
    }

    /// Runs the upload lifecycle for one file.
    ///
    /// Permitted only from `Empty` or `Ready`; any other phase means an
    /// operation is in flight and the call is a no-op. A failed upload
    /// leaves the descriptor and phase exactly as they were before the call
    /// and resets progress to 0.
    pub(crate) async fn start(&self, course_id: &CourseId, file: &VideoFile) -> UploadOutcome {
        let prior = {
            let mut state = self.state.lock();
            if !state.phase.accepts_upload() {
                warn!(phase = ?state.phase, "upload rejected: operation in flight");
                return UploadOutcome::Rejected;
            }
            let prior = state.phase;
            state.phase = Phase::Uploading;
            state.progress = 0;
            prior
        };

        let mut on_progress = progress_writer(self.state);
        let uploaded = self
            .store
            .upload_video(course_id, file, &mut on_progress)
            .await;

        match uploaded {
            Ok(descriptor) => {
                info!(file_name = %file.file_name, location = %descriptor.location, "video uploaded");
                {
                    let mut state = self.state.lock();
                    state.content = Some(descriptor);
                    state.phase = Phase::UploadedReady;
                    state.progress = 100;
                }
                self.notifier.notify(NoticeKind::Success, "Video uploaded");
                UploadOutcome::Uploaded
            }
            Err(error) => {
                warn!(file_name = %file.file_name, %error, "video upload failed");
                {
                    let mut state = self.state.lock();
                    state.phase = prior;
                    state.progress = 0;
                }
                match &error {
                    SessionError::Validation { message } => {
                        self.notifier.notify(NoticeKind::Warning, message);
                    }
                    _ => {
                        self.notifier
                            .notify(NoticeKind::Error, "Couldn't upload the video");
                    }
                }
                UploadOutcome::Failed
            }
        }
    }
}

/// Builds the progress callback handed to the store.
///
/// Stores the latest percentage for display, clamped to 100 and never
/// regressing while the upload is in flight.
fn progress_writer<'s>(state: &'s Mutex<SessionState>) -> impl FnMut(u8) + Send + 's {
    move |percent| {
        let mut state = state.lock();
        let percent = percent.min(100);
        if percent > state.progress {
            state.progress = percent;
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::progress_writer;
    use crate::session::{Phase, SessionState};

    fn state_at(progress: u8) -> Mutex<SessionState> {
        Mutex::new(SessionState {
            title: "Untitled".to_string(),
            description: String::new(),
            for_preview: false,
            content: None,
            phase: Phase::Uploading,
            progress,
        })
    }

    #[test]
    fn progress_writer_stores_latest_percentage() {
        let state = state_at(0);
        let mut write = progress_writer(&state);

        write(10);
        assert_eq!(state.lock().progress, 10);
        write(40);
        assert_eq!(state.lock().progress, 40);
        write(100);
        assert_eq!(state.lock().progress, 100);
    }

    #[test]
    fn progress_writer_never_regresses_mid_flight() {
        let state = state_at(0);
        let mut write = progress_writer(&state);

        write(60);
        write(30);
        assert_eq!(state.lock().progress, 60);
    }

    #[test]
    fn progress_writer_clamps_to_one_hundred() {
        let state = state_at(0);
        let mut write = progress_writer(&state);

        write(250);
        assert_eq!(state.lock().progress, 100);
    }
}
