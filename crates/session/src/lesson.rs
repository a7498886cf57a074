use serde::{Deserialize, Serialize};

use crate::content::ContentId;

/// Opaque identifier of a course.
pub type CourseId = String;
/// Opaque identifier of a section within a course.
pub type SectionId = String;
/// Opaque identifier of a lesson within a section.
pub type LessonId = String;

/// One lesson as stored in the host's section list.
///
/// Mutated only through an edit session; the host owns its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    /// Reference to previously saved content, if any.
    pub content_ref: Option<ContentId>,
    /// Whether the lesson is accessible without enrolling.
    pub for_preview: bool,
}

/// An ordered group of lessons owned by the host view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub lessons: Vec<Lesson>,
}

/// Position of the edited lesson inside the section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonLocator {
    pub section_index: usize,
    pub lesson_index: usize,
}

/// Accepted field set emitted by a successful submit, ready to be applied
/// back into the host's section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedLesson {
    pub locator: LessonLocator,
    pub title: String,
    pub description: String,
    pub for_preview: bool,
    pub content_ref: Option<ContentId>,
}
