use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use session::{
    ContentDescriptor, ContentId, CourseId, RemoteContentStore, Result, SaveLessonRequest,
    SessionError, VideoFile,
};

use crate::wire::{AckResponse, ContentResponse, DeleteContentBody, FetchContentBody};

/// Upload body chunk size. Small enough that the progress callback gets
/// byte-accurate steps on typical lesson videos.
const UPLOAD_CHUNK_BYTES: usize = 64 * 1024;

/// `RemoteContentStore` backed by the instructor course API.
pub struct HttpContentStore {
    client: Client,
    base_url: String,
}

impl HttpContentStore {
    /// Creates a store for `base_url` with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a store with an injected client (timeouts, proxies, TLS).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

fn transport(error: reqwest::Error) -> SessionError {
    SessionError::Transport {
        message: error.to_string(),
    }
}

fn non_success(status: StatusCode) -> SessionError {
    SessionError::Transport {
        message: format!("HTTP {status}"),
    }
}

/// Checks the status line, then deserializes the JSON body.
async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "request failed");
        return Err(non_success(status));
    }
    response.json::<T>().await.map_err(transport)
}

/// Splits the payload into chunks and reports the running percentage into
/// `progress` as each chunk is handed to the transport.
fn progress_chunks(
    bytes: Bytes,
    progress: mpsc::UnboundedSender<u8>,
) -> impl Stream<Item = std::result::Result<Bytes, std::convert::Infallible>> + Send + 'static {
    let total = bytes.len();
    futures::stream::unfold(0usize, move |offset| {
        let bytes = bytes.clone();
        let progress = progress.clone();
        async move {
            if offset >= total {
                return None;
            }
            let end = (offset + UPLOAD_CHUNK_BYTES).min(total);
            let chunk = bytes.slice(offset..end);
            let percent = (end * 100 / total) as u8;
            let _ = progress.send(percent);
            Some((Ok(chunk), end))
        }
    })
}

#[async_trait]
impl RemoteContentStore for HttpContentStore {
    async fn fetch_content(
        &self,
        content_id: &ContentId,
        course_id: &CourseId,
    ) -> Result<ContentDescriptor> {
        debug!(%content_id, "fetching content");
        let response = self
            .client
            .post(self.endpoint("course/fetch-content"))
            .json(&FetchContentBody {
                content_id,
                course_id,
            })
            .send()
            .await
            .map_err(transport)?;

        let body: ContentResponse = read_json(response).await?;
        match (body.success, body.content) {
            (true, Some(content)) => Ok(content),
            _ => Err(SessionError::ContentNotFound {
                content_id: content_id.clone(),
            }),
        }
    }

    async fn upload_video(
        &self,
        course_id: &CourseId,
        file: &VideoFile,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<ContentDescriptor> {
        debug!(file_name = %file.file_name, size = file.bytes.len(), "uploading video");
        let (tx, mut rx) = mpsc::unbounded_channel::<u8>();
        let part = Part::stream(reqwest::Body::wrap_stream(progress_chunks(
            file.bytes.clone(),
            tx,
        )))
        .file_name(file.file_name.clone());
        let form = Form::new()
            .part("video", part)
            .text("course_id", course_id.clone());

        let request = self
            .client
            .post(self.endpoint("course/upload-video"))
            .multipart(form)
            .send();
        tokio::pin!(request);

        // Forward percentages while the request future streams the body.
        let sent = loop {
            tokio::select! {
                outcome = &mut request => break outcome,
                Some(percent) = rx.recv() => on_progress(percent),
            }
        };
        while let Ok(percent) = rx.try_recv() {
            on_progress(percent);
        }
        let response = sent.map_err(transport)?;

        let body: ContentResponse = read_json(response).await?;
        if !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "upload rejected".to_string());
            warn!(%message, "upload rejected by server");
            return Err(SessionError::Validation { message });
        }
        body.content.ok_or_else(|| SessionError::Transport {
            message: "upload response missing content".to_string(),
        })
    }

    async fn delete_content(
        &self,
        descriptor: &ContentDescriptor,
        course_id: &CourseId,
    ) -> Result<()> {
        debug!(storage_key = %descriptor.storage_key, "deleting content");
        let response = self
            .client
            .post(self.endpoint("course/delete-file"))
            .json(&DeleteContentBody {
                content: descriptor,
                course_id,
            })
            .send()
            .await
            .map_err(transport)?;

        let body: AckResponse = read_json(response).await?;
        if body.success {
            Ok(())
        } else {
            let message = body
                .message
                .unwrap_or_else(|| "delete rejected".to_string());
            warn!(%message, "delete rejected by server");
            Err(SessionError::Transport { message })
        }
    }

    async fn save_lesson(&self, request: &SaveLessonRequest) -> Result<()> {
        debug!(lesson_id = %request.lesson_id, "saving lesson");
        let response = self
            .client
            .put(self.endpoint("course/sections/lessons"))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let body: AckResponse = read_json(response).await?;
        if body.success {
            Ok(())
        } else {
            let message = body.message.unwrap_or_else(|| "save rejected".to_string());
            warn!(%message, "save rejected by server");
            Err(SessionError::Validation { message })
        }
    }
}
