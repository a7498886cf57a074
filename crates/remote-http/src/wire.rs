use serde::{Deserialize, Serialize};

use session::ContentDescriptor;

/// Body of `POST /course/fetch-content`.
#[derive(Debug, Serialize)]
pub(crate) struct FetchContentBody<'a> {
    pub content_id: &'a str,
    pub course_id: &'a str,
}

/// Body of `POST /course/delete-file`: descriptor fields plus the course id.
#[derive(Debug, Serialize)]
pub(crate) struct DeleteContentBody<'a> {
    #[serde(flatten)]
    pub content: &'a ContentDescriptor,
    pub course_id: &'a str,
}

/// Response envelope of fetch and upload.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentResponse {
    pub success: bool,
    #[serde(default)]
    pub content: Option<ContentDescriptor>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response envelope of delete and save.
#[derive(Debug, Deserialize)]
pub(crate) struct AckResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
