use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a stored content object.
pub type ContentId = String;

/// Reference to an uploaded media object.
///
/// Returned by upload and fetch, required by delete and save. The session
/// treats it as opaque beyond these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    /// Storage key identifying the object for deletion.
    pub storage_key: String,
    /// Playable URL handed to the player widget.
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// A video payload selected by the author for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub file_name: String,
    pub bytes: Bytes,
}
