use std::sync::Arc;

use tracing::error;

use crate::error::{Result, SessionError};
use crate::lesson::{EditedLesson, Section};

/// Applies an accepted edit into the host-owned section list.
///
/// Returns a new collection in which exactly one lesson's title,
/// description, preview flag and content reference are replaced. Every
/// other section is the same `Arc` as the input, so the host can detect the
/// changed entry by pointer identity. The input is never mutated.
///
/// An edit locator that does not resolve is a contract violation on the
/// host's side; it is logged and returned as an error, never retried.
pub fn apply_edit(sections: &[Arc<Section>], edit: &EditedLesson) -> Result<Vec<Arc<Section>>> {
    let section_index = edit.locator.section_index;
    let lesson_index = edit.locator.lesson_index;

    let Some(section) = sections.get(section_index) else {
        error!(section_index, lesson_index, "edit locator outside the section list");
        return Err(SessionError::LessonIndexOutOfRange {
            section_index,
            lesson_index,
        });
    };
    if lesson_index >= section.lessons.len() {
        error!(section_index, lesson_index, "edit locator outside the lesson list");
        return Err(SessionError::LessonIndexOutOfRange {
            section_index,
            lesson_index,
        });
    }

    let mut updated = Section::clone(section);
    let lesson = &mut updated.lessons[lesson_index];
    lesson.title = edit.title.clone();
    lesson.description = edit.description.clone();
    lesson.for_preview = edit.for_preview;
    lesson.content_ref = edit.content_ref.clone();

    let mut next = sections.to_vec();
    next[section_index] = Arc::new(updated);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::apply_edit;
    use crate::error::SessionError;
    use crate::lesson::{EditedLesson, Lesson, LessonLocator, Section};

    fn lesson(id: &str, title: &str) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            content_ref: None,
            for_preview: false,
        }
    }

    fn sample_sections() -> Vec<Arc<Section>> {
        vec![
            Arc::new(Section {
                id: "section-1".to_string(),
                lessons: vec![lesson("lesson-1", "One"), lesson("lesson-2", "Two")],
            }),
            Arc::new(Section {
                id: "section-2".to_string(),
                lessons: vec![lesson("lesson-3", "Three"), lesson("lesson-4", "Four")],
            }),
        ]
    }

    fn sample_edit() -> EditedLesson {
        EditedLesson {
            locator: LessonLocator {
                section_index: 1,
                lesson_index: 0,
            },
            title: "Three, revised".to_string(),
            description: "<p>Now with content</p>".to_string(),
            for_preview: true,
            content_ref: Some("content-3".to_string()),
        }
    }

    #[test]
    fn apply_replaces_only_the_targeted_lesson() {
        let sections = sample_sections();

        let updated = apply_edit(&sections, &sample_edit()).expect("locator resolves");

        let target = &updated[1].lessons[0];
        assert_eq!(target.title, "Three, revised");
        assert_eq!(target.description, "<p>Now with content</p>");
        assert!(target.for_preview);
        assert_eq!(target.content_ref, Some("content-3".to_string()));
        assert_eq!(target.id, "lesson-3");

        assert_eq!(updated[1].lessons[1], sections[1].lessons[1]);
        assert_eq!(updated[0], sections[0]);
        // Untouched input state is intact.
        assert_eq!(sections[1].lessons[0].title, "Three");
    }

    #[test]
    fn apply_shares_untouched_sections_by_pointer() {
        let sections = sample_sections();

        let updated = apply_edit(&sections, &sample_edit()).expect("locator resolves");

        assert!(Arc::ptr_eq(&updated[0], &sections[0]));
        assert!(!Arc::ptr_eq(&updated[1], &sections[1]));
    }

    #[test]
    fn apply_twice_yields_equal_results() {
        let sections = sample_sections();
        let edit = sample_edit();

        let first = apply_edit(&sections, &edit).expect("locator resolves");
        let second = apply_edit(&sections, &edit).expect("locator resolves");

        assert_eq!(first, second);
    }

    #[test]
    fn apply_rejects_section_index_out_of_range() {
        let sections = sample_sections();
        let edit = EditedLesson {
            locator: LessonLocator {
                section_index: 2,
                lesson_index: 0,
            },
            ..sample_edit()
        };

        assert_eq!(
            apply_edit(&sections, &edit),
            Err(SessionError::LessonIndexOutOfRange {
                section_index: 2,
                lesson_index: 0
            })
        );
    }

    #[test]
    fn apply_rejects_lesson_index_out_of_range() {
        let sections = sample_sections();
        let edit = EditedLesson {
            locator: LessonLocator {
                section_index: 0,
                lesson_index: 5,
            },
            ..sample_edit()
        };

        assert_eq!(
            apply_edit(&sections, &edit),
            Err(SessionError::LessonIndexOutOfRange {
                section_index: 0,
                lesson_index: 5
            })
        );
    }
}
