use parking_lot::Mutex;
use tracing::{info, warn};

use crate::content::ContentId;
use crate::lesson::CourseId;
use crate::notify::{NoticeKind, Notifier};
use crate::session::{Phase, SessionState};
use crate::store::RemoteContentStore;

/// Resolves the lesson's saved content reference on session start.
pub(crate) struct ContentFetcher<'a, S, N> {
    store: &'a S,
    notifier: &'a N,
    state: &'a Mutex<SessionState>,
}

impl<'a, S, N> ContentFetcher<'a, S, N>
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

    /// Turns the saved content reference into a renderable descriptor.
    ///
    /// The session sits in `Fetching` while the call is in flight and lands
    /// on `Ready` with the descriptor populated, or on `Empty` when the
    /// content is missing or the call fails. A fetch failure is reported to
    /// the notification sink; the session stays usable and the author can
    /// re-upload.
    pub(crate) async fn resolve(&self, content_id: &ContentId, course_id: &CourseId) {
        self.state.lock().phase = Phase::Fetching;

        match self.store.fetch_content(content_id, course_id).await {
            Ok(descriptor) => {
                info!(%content_id, location = %descriptor.location, "saved content resolved");
                let mut state = self.state.lock();
                state.content = Some(descriptor);
                state.phase = Phase::Ready;
            }
            Err(error) => {
                warn!(%content_id, %error, "content fetch failed");
                {
                    let mut state = self.state.lock();
                    state.content = None;
                    state.phase = Phase::Empty;
                }
                self.notifier
                    .notify(NoticeKind::Error, "Couldn't load the saved video");
            }
        }
    }
}
