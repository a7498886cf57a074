use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::{ContentDescriptor, ContentId, VideoFile};
use crate::error::Result;
use crate::lesson::{CourseId, LessonId, SectionId};

/// Content type tag carried by every lesson save.
pub const VIDEO_CONTENT_TYPE: &str = "Video";

/// Payload of the lesson save operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveLessonRequest {
    pub title: String,
    pub description: String,
    pub content_type: String,
    pub content: ContentDescriptor,
    pub for_preview: bool,
    pub course_id: CourseId,
    pub section_id: SectionId,
    pub lesson_id: LessonId,
    /// The lesson's pre-existing content reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_id: Option<ContentId>,
}

/// Remote operations consumed by the session coordinators.
///
/// All four operations are idempotent by id. Implementations report upload
/// progress through `on_progress` with monotonically non-decreasing
/// percentages in `0..=100`, reaching 100 only on success. Timeout behavior
/// belongs to the implementation; the session sees a timeout as a plain
/// transport failure.
#[async_trait]
pub trait RemoteContentStore: Send + Sync {
    /// Resolves a saved content reference into a renderable descriptor.
    async fn fetch_content(
        &self,
        content_id: &ContentId,
        course_id: &CourseId,
    ) -> Result<ContentDescriptor>;

    /// Uploads a video asset, reporting progress along the way.
    async fn upload_video(
        &self,
        course_id: &CourseId,
        file: &VideoFile,
        on_progress: &mut (dyn FnMut(u8) + Send),
    ) -> Result<ContentDescriptor>;

    /// Deletes an uploaded content object.
    async fn delete_content(
        &self,
        descriptor: &ContentDescriptor,
        course_id: &CourseId,
    ) -> Result<()>;

    /// Persists edited lesson fields to the lesson record.
    async fn save_lesson(&self, request: &SaveLessonRequest) -> Result<()>;
}
