// SPDX-License-Identifier: MPL-2.0
//! Per-session state: which asset is selected and where its load and
//! animation lifecycles stand.

use std::time::Instant;

/// Load lifecycle of the currently selected asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// A load has been requested and no outcome has arrived yet.
    #[default]
    Pending,
    /// The model is loaded and visible.
    Ready,
    /// The load failed; recoverable by retrying the selection.
    Failed,
}

/// Animation playback state. Only meaningful once the asset is
/// [`LoadPhase::Ready`], and tracks user intent: it flips even when the
/// surface rejects the underlying command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    #[default]
    Stopped,
    Playing,
}

/// Mutable record of one viewing session. Owned exclusively by the viewer;
/// everything else sees read-only snapshots.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) selected_id: String,
    pub(crate) load_phase: LoadPhase,
    pub(crate) animation_phase: AnimationPhase,
    /// Reason of the most recent load failure, for the retry affordance.
    pub(crate) failure: Option<String>,
    /// When the in-flight load started, while `load_phase` is `Pending`.
    pub(crate) load_started_at: Option<Instant>,
}

impl SessionState {
    pub(crate) fn starting_on(id: &str, now: Instant) -> Self {
        Self {
            selected_id: id.to_string(),
            load_phase: LoadPhase::Pending,
            animation_phase: AnimationPhase::Stopped,
            failure: None,
            load_started_at: Some(now),
        }
    }

    /// Resets the lifecycle for a fresh selection.
    pub(crate) fn begin_load(&mut self, id: &str, now: Instant) {
        self.selected_id = id.to_string();
        self.load_phase = LoadPhase::Pending;
        self.animation_phase = AnimationPhase::Stopped;
        self.failure = None;
        self.load_started_at = Some(now);
    }

    #[must_use]
    pub fn selected_id(&self) -> &str {
        &self.selected_id
    }

    #[must_use]
    pub fn load_phase(&self) -> LoadPhase {
        self.load_phase
    }

    #[must_use]
    pub fn animation_phase(&self) -> AnimationPhase {
        self.animation_phase
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// Read-only snapshot for presentation-layer rendering: the carousel
/// caption, the retry affordance, the playback button state.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryInfo {
    /// Position of the selected asset in catalog order (0-indexed).
    pub index: usize,
    /// Total number of assets in the catalog.
    pub total: usize,
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub load_phase: LoadPhase,
    pub animation_phase: AnimationPhase,
    /// Reason of the most recent load failure, if the selection is `Failed`.
    pub failure: Option<String>,
}

impl GalleryInfo {
    /// Carousel caption in the gallery's "2 of 3" form.
    #[must_use]
    pub fn position_caption(&self) -> String {
        format!("{} of {}", self.index + 1, self.total)
    }

    /// Whether the presentation layer should offer a retry control.
    #[must_use]
    pub fn offers_retry(&self) -> bool {
        self.load_phase == LoadPhase::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(phase: LoadPhase) -> GalleryInfo {
        GalleryInfo {
            index: 1,
            total: 3,
            id: "robot-expressive".to_string(),
            title: "Expressive Robot".to_string(),
            description: String::new(),
            poster_url: String::new(),
            load_phase: phase,
            animation_phase: AnimationPhase::Stopped,
            failure: None,
        }
    }

    #[test]
    fn begin_load_resets_lifecycle() {
        let mut session = SessionState::starting_on("a", Instant::now());
        session.load_phase = LoadPhase::Ready;
        session.animation_phase = AnimationPhase::Playing;
        session.failure = Some("old failure".to_string());

        session.begin_load("b", Instant::now());

        assert_eq!(session.selected_id(), "b");
        assert_eq!(session.load_phase(), LoadPhase::Pending);
        assert_eq!(session.animation_phase(), AnimationPhase::Stopped);
        assert_eq!(session.failure(), None);
        assert!(session.load_started_at.is_some());
    }

    #[test]
    fn position_caption_is_one_indexed() {
        assert_eq!(info(LoadPhase::Ready).position_caption(), "2 of 3");
    }

    #[test]
    fn retry_is_offered_only_after_failure() {
        assert!(info(LoadPhase::Failed).offers_retry());
        assert!(!info(LoadPhase::Pending).offers_retry());
        assert!(!info(LoadPhase::Ready).offers_retry());
    }
}
