//! Lesson documents
//!
//! The engine consumes `(content, annotations)`; for the CLI and tests this
//! pair travels as a lesson JSON document. Loading is the only fallible
//! boundary in the crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::annotation::{Annotation, NormalizedAnnotation, normalize};
use crate::overlay::{OverlayLayout, build_layout};

/// Errors that can occur when loading a lesson document
#[derive(Debug, Error)]
pub enum LessonError {
    /// Could not read the lesson file
    #[error("Failed to read lesson from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was not valid lesson JSON
    #[error("Failed to parse lesson: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Generated lesson content plus its annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The lesson text
    pub content: String,
    /// Annotations over the content, as received
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Lesson {
    /// Parse a lesson from JSON
    pub fn from_json(json: &str) -> Result<Self, LessonError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a lesson from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LessonError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| LessonError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&contents)
    }

    /// Content length in chars
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Annotations normalized against the current content
    pub fn normalized(&self) -> Vec<NormalizedAnnotation> {
        normalize(self.content_len(), &self.annotations)
    }

    /// Full segmentation of the lesson content
    pub fn layout(&self) -> OverlayLayout {
        build_layout(&self.content, &self.normalized())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::overlay::Piece;

    const SAMPLE: &str = r#"{
        "title": "Photosynthesis",
        "content": "The quick brown fox",
        "annotations": [
            {"id": "a", "start": 4, "end": 15, "action": "explain", "text": "quick brown"},
            {"id": "b", "start": 10, "end": 20, "action": "ask", "text": "brown fox"}
        ]
    }"#;

    #[test]
    fn parses_lesson_json() {
        let lesson = Lesson::from_json(SAMPLE).unwrap();
        assert_eq!(lesson.title.as_deref(), Some("Photosynthesis"));
        assert_eq!(lesson.annotations.len(), 2);
    }

    #[test]
    fn layout_matches_worked_example() {
        let lesson = Lesson::from_json(SAMPLE).unwrap();
        let layout = lesson.layout();

        assert_eq!(layout.pieces.len(), 2);
        assert_eq!(layout.pieces[0].text(), "The ");

        let Piece::Block(block) = &layout.pieces[1] else {
            panic!("expected a block piece");
        };
        assert_eq!(block.highlight_ids, vec!["a", "b"]);
        let texts: Vec<&str> = block.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["quick ", "brown", " fox"]);
    }

    #[test]
    fn loads_lesson_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let lesson = Lesson::from_path(file.path()).unwrap();
        assert_eq!(lesson.content, "The quick brown fox");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = Lesson::from_path("/nonexistent/lesson.json").unwrap_err();
        assert!(matches!(err, LessonError::Io { .. }));
        assert!(err.to_string().contains("lesson.json"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = Lesson::from_json("not json").unwrap_err();
        assert!(matches!(err, LessonError::Parse(_)));
    }

    #[test]
    fn malformed_annotation_does_not_block_the_lesson() {
        let json = r#"{
            "content": "hello world",
            "annotations": [
                {"id": "bad", "start": "x", "end": 4},
                {"id": "ok", "start": 0, "end": 5}
            ]
        }"#;
        let lesson = Lesson::from_json(json).unwrap();
        let anns = lesson.normalized();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].id, "ok");
    }
}
