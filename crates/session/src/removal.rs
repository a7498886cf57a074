use parking_lot::Mutex;
use tracing::{info, warn};

use crate::lesson::CourseId;
use crate::notify::{NoticeKind, Notifier};
use crate::session::{Phase, SessionState};
use crate::store::RemoteContentStore;

/// Result of a removal attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The remote object is gone and the local descriptor is cleared.
    Removed,
    /// Rejected at the gate: no content attached or an operation in flight.
    Rejected,
    /// The call failed; content is still considered present.
    Failed,
}

/// Deletes an uploaded content object and clears local content state.
pub(crate) struct RemovalCoordinator<'a, S, N> {
    store: &'a S,
    notifier: &'a N,
    state: &'a Mutex<SessionState>,
}

impl<'a, S, N> RemovalCoordinator<'a, S, N>
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

    /// Runs the removal lifecycle for the attached descriptor.
    ///
    /// Permitted only from `Ready` or `UploadedReady` with a descriptor
    /// attached. On failure the prior phase comes back and the descriptor
    /// stays, since the remote object was not confirmed deleted; removal is
    /// never retried automatically.
    pub(crate) async fn remove(&self, course_id: &CourseId) -> RemovalOutcome {
        let (prior, descriptor) = {
            let mut state = self.state.lock();
            if !state.phase.content_settled() {
                warn!(phase = ?state.phase, "removal rejected: operation in flight");
                return RemovalOutcome::Rejected;
            }
            let Some(descriptor) = state.content.clone() else {
                warn!("removal rejected: no content attached");
                return RemovalOutcome::Rejected;
            };
            let prior = state.phase;
            state.phase = Phase::Removing;
            (prior, descriptor)
        };

        match self.store.delete_content(&descriptor, course_id).await {
            Ok(()) => {
                info!(storage_key = %descriptor.storage_key, "content deleted");
                {
                    let mut state = self.state.lock();
                    state.content = None;
                    state.progress = 0;
                    state.phase = Phase::Empty;
                }
                self.notifier.notify(NoticeKind::Success, "Video deleted");
                RemovalOutcome::Removed
            }
            Err(error) => {
                warn!(storage_key = %descriptor.storage_key, %error, "content removal failed");
                self.state.lock().phase = prior;
                self.notifier
                    .notify(NoticeKind::Error, "Couldn't delete the video");
                RemovalOutcome::Failed
            }
        }
    }
}
