//! Scripted walkthrough of one lesson edit session against an in-memory
//! store. Doubles as a smoke check of the crate wiring: it exits non-zero
//! if any step of the open/upload/submit/apply chain misbehaves.

use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use session::{
    ContentDescriptor, ContentId, CourseId, EditSession, Lesson, LessonLocator,
    RemoteContentStore, Result, SaveLessonRequest, Section, SubmitOutcome, TracingNotifier,
    UploadOutcome, VideoFile, apply_edit,
};

/// Store that accepts everything immediately, with scripted progress steps.
struct DemoStore;

#[async_trait]
impl RemoteContentStore for DemoStore {
    async fn fetch_content(
        &self,
        content_id: &ContentId,
        _course_id: &CourseId,
    ) -> Result<ContentDescriptor> {
        Ok(ContentDescriptor {
            storage_key: format!("vod/{content_id}"),
            location: format!("https://cdn.invalid/vod/{content_id}.mp4"),
            size_bytes: None,
        })
    }

    async fn upload_video(
        &self,
        _course_id: &CourseId,
        file: &VideoFile,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<ContentDescriptor> {
        for percent in [20, 45, 70, 95, 100] {
            on_progress(percent);
        }
        Ok(ContentDescriptor {
            storage_key: format!("vod/{}", file.file_name),
            location: format!("https://cdn.invalid/vod/{}", file.file_name),
            size_bytes: Some(file.bytes.len() as u64),
        })
    }

    async fn delete_content(
        &self,
        _descriptor: &ContentDescriptor,
        _course_id: &CourseId,
    ) -> Result<()> {
        Ok(())
    }

    async fn save_lesson(&self, _request: &SaveLessonRequest) -> Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt::try_init();

    let sections = vec![Arc::new(Section {
        id: "section-1".to_string(),
        lessons: vec![Lesson {
            id: "lesson-1".to_string(),
            title: "Untitled lesson".to_string(),
            description: String::new(),
            content_ref: None,
            for_preview: false,
        }],
    })];
    let locator = LessonLocator {
        section_index: 0,
        lesson_index: 0,
    };

    let session = EditSession::open(
        DemoStore,
        TracingNotifier,
        "course-1".to_string(),
        "section-1".to_string(),
        locator,
        &sections[0].lessons[0],
    )
    .await;
    info!(phase = ?session.phase(), "session opened");

    session.set_title("Intro");
    session.set_description("<p>Welcome to the course.</p>");
    session.set_for_preview(true);

    let uploaded = session
        .start_upload(VideoFile {
            file_name: "intro.mp4".to_string(),
            bytes: Bytes::from_static(b"demo video payload"),
        })
        .await;
    if uploaded != UploadOutcome::Uploaded {
        return ExitCode::FAILURE;
    }
    info!(
        phase = ?session.phase(),
        progress = session.progress(),
        "upload finished"
    );

    let SubmitOutcome::Saved(edit) = session.submit().await else {
        return ExitCode::FAILURE;
    };

    let updated = match apply_edit(&sections, &edit) {
        Ok(updated) => updated,
        Err(_) => return ExitCode::FAILURE,
    };
    info!(
        before = %sections[0].lessons[0].title,
        after = %updated[0].lessons[0].title,
        "edit applied"
    );
    ExitCode::SUCCESS
}
