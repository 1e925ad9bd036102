//! A user's video library: per-video annotation lists plus display titles.
//!
//! Both maps live inside one user document and are only ever mutated through
//! [`VideoLibrary`], so a single document write always carries a consistent
//! pair. Keys are video ids (see [`crate::validation::validate_video_id`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A single timestamped note attached to a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Position in the video, as sent by the client (e.g. `"12"` or `"1:05"`).
    pub time_stamp: String,
    pub content: String,
}

impl Annotation {
    pub fn new(time_stamp: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            time_stamp: time_stamp.into(),
            content: content.into(),
        }
    }
}

/// Video id -> ordered annotations.
pub type AnnotationMap = BTreeMap<String, Vec<Annotation>>;

/// Video id -> display title.
pub type TitleMap = BTreeMap<String, String>;

/// The annotation map and title map of one user, mutated as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoLibrary {
    pub annotations: AnnotationMap,
    pub titles: TitleMap,
}

impl VideoLibrary {
    pub fn new(annotations: AnnotationMap, titles: TitleMap) -> Self {
        Self {
            annotations,
            titles,
        }
    }

    /// Whether the video is present in either map.
    pub fn contains_video(&self, video_id: &str) -> bool {
        self.annotations.contains_key(video_id) || self.titles.contains_key(video_id)
    }

    /// Annotations recorded for `video_id`, empty if the video is unknown.
    pub fn annotations_for(&self, video_id: &str) -> &[Annotation] {
        self.annotations
            .get(video_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Append an annotation and upsert the video's title.
    ///
    /// Entries are never deduplicated: appending twice at the same timestamp
    /// keeps both.
    pub fn append(&mut self, video_id: &str, annotation: Annotation, title: &str) {
        self.annotations
            .entry(video_id.to_string())
            .or_default()
            .push(annotation);
        self.titles.insert(video_id.to_string(), title.to_string());
    }

    /// Remove a video from both maps.
    ///
    /// Fails with [`CoreError::NotFound`] only when neither map knows the
    /// video; a video present in just one map is removed from it.
    pub fn remove_video(&mut self, video_id: &str) -> Result<(), CoreError> {
        if !self.contains_video(video_id) {
            return Err(video_not_found(video_id));
        }
        self.annotations.remove(video_id);
        self.titles.remove(video_id);
        Ok(())
    }

    /// Drop every annotation on `video_id` whose timestamp equals
    /// `time_stamp` exactly. Returns how many entries were removed.
    pub fn remove_annotations_at(
        &mut self,
        video_id: &str,
        time_stamp: &str,
    ) -> Result<usize, CoreError> {
        let list = self
            .annotations
            .get_mut(video_id)
            .ok_or_else(|| video_not_found(video_id))?;

        let before = list.len();
        list.retain(|a| a.time_stamp != time_stamp);
        Ok(before - list.len())
    }
}

fn video_not_found(video_id: &str) -> CoreError {
    CoreError::NotFound {
        entity: "video",
        key: video_id.to_string(),
    }
}
