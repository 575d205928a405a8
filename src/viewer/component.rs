// SPDX-License-Identifier: MPL-2.0
//! The viewer controller: the only writer of session state.
//!
//! All mutation happens on the session's single logical thread, either from
//! a user request or from a drained surface notification. Notifications are
//! matched to the selection that caused them by binding token, never by
//! arrival order, so holding the "next" key can never let a superseded load
//! overwrite the current asset's phase.

use super::session::{AnimationPhase, GalleryInfo, LoadPhase, SessionState};
use crate::catalog::{carousel, AssetDescriptor, Catalog};
use crate::error::{Error, Result};
use crate::surface::{
    BindingToken, RenderSurface, StageSettings, SurfaceBinding, SurfaceEvent, TaggedEvent,
};
use std::time::{Duration, Instant};

/// How long a load may stay pending before the viewer fails it.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for a viewing session.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Start animation playback as soon as a load settles in `Ready`.
    pub autoplay: bool,
    /// Pending loads older than this are failed with a timeout message.
    pub load_timeout: Duration,
    /// Presentation hints forwarded to the surface on every load.
    pub stage: StageSettings,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            autoplay: false,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            stage: StageSettings::default(),
        }
    }
}

/// User-input requests, one per viewer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Select(String),
    Next,
    Previous,
    Retry,
    ToggleAnimation,
    ResetCamera,
    ActivateAr,
}

/// Viewer state controller for one gallery session.
///
/// Owns the catalog, the surface binding, and the session state. Created
/// with the catalog's first asset selected and its load already requested.
pub struct Viewer<S> {
    catalog: Catalog,
    binding: SurfaceBinding<S>,
    session: SessionState,
    current_token: BindingToken,
    autoplay: bool,
    load_timeout: Duration,
}

impl<S: RenderSurface> Viewer<S> {
    /// Starts a session on the catalog's first asset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] when there is nothing to show.
    pub fn new(catalog: Catalog, surface: S, options: ViewerOptions) -> Result<Self> {
        let first = catalog.first().ok_or(Error::EmptyCatalog)?.clone();
        let mut binding = SurfaceBinding::new(surface, options.stage);
        let current_token = binding.attach(&first);
        Ok(Self {
            session: SessionState::starting_on(&first.id, Instant::now()),
            catalog,
            binding,
            current_token,
            autoplay: options.autoplay,
            load_timeout: options.load_timeout,
        })
    }

    /// Selects an asset and requests its load.
    ///
    /// The previous attachment is superseded within this call; its token
    /// stops being current before the new load is issued, so a late outcome
    /// from it can no longer change any phase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an unknown id, leaving the session
    /// state untouched.
    pub fn select_asset(&mut self, id: &str) -> Result<()> {
        let descriptor = self.catalog.get(id)?.clone();
        self.session.begin_load(&descriptor.id, Instant::now());
        self.current_token = self.binding.attach(&descriptor);
        Ok(())
    }

    /// Re-requests the selected asset's load; the recovery path after a
    /// failure.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::NotFound`], which cannot occur while the
    /// selected-id invariant holds.
    pub fn retry(&mut self) -> Result<()> {
        let id = self.session.selected_id.clone();
        self.select_asset(&id)
    }

    /// Selects the next asset in carousel order.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::NotFound`], which cannot occur while the
    /// selected-id invariant holds.
    pub fn next(&mut self) -> Result<()> {
        let id = carousel::next(&self.catalog, &self.session.selected_id)?;
        self.select_asset(&id)
    }

    /// Selects the previous asset in carousel order.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::NotFound`], which cannot occur while the
    /// selected-id invariant holds.
    pub fn previous(&mut self) -> Result<()> {
        let id = carousel::previous(&self.catalog, &self.session.selected_id)?;
        self.select_asset(&id)
    }

    /// Drains surface notifications and applies the ones that belong to the
    /// current attachment. The embedding host calls this from its event
    /// loop.
    pub fn pump_events(&mut self) {
        for TaggedEvent { token, event } in self.binding.poll() {
            match event {
                SurfaceEvent::Loaded => self.on_surface_loaded(token),
                SurfaceEvent::Failed(reason) => self.on_surface_failed(token, &reason),
            }
        }
    }

    /// Applies a load completion iff `token` identifies the current
    /// attachment; anything else is a stale callback and is discarded.
    pub fn on_surface_loaded(&mut self, token: BindingToken) {
        if token != self.current_token {
            log::debug!("discarding stale load notification for {token:?}");
            return;
        }
        self.session.load_phase = LoadPhase::Ready;
        self.session.failure = None;
        self.session.load_started_at = None;
        if self.autoplay {
            // Rejection swallowed: the phase reflects user intent even when
            // the model has no animation track.
            if !self.binding.play() {
                log::debug!("surface rejected autoplay for {:?}", self.session.selected_id);
            }
            self.session.animation_phase = AnimationPhase::Playing;
        }
    }

    /// Applies a load failure iff `token` identifies the current attachment;
    /// anything else is a stale callback and is discarded.
    pub fn on_surface_failed(&mut self, token: BindingToken, reason: &str) {
        if token != self.current_token {
            log::debug!("discarding stale failure notification for {token:?}");
            return;
        }
        self.session.load_phase = LoadPhase::Failed;
        self.session.failure = Some(reason.to_string());
        self.session.load_started_at = None;
    }

    /// Flips between playing and stopped. A no-op unless the selected asset
    /// is `Ready`; surface rejections are swallowed and the phase flips
    /// anyway.
    pub fn toggle_animation(&mut self) {
        if self.session.load_phase != LoadPhase::Ready {
            return;
        }
        match self.session.animation_phase {
            AnimationPhase::Stopped => {
                if !self.binding.play() {
                    log::debug!("surface rejected play for {:?}", self.session.selected_id);
                }
                self.session.animation_phase = AnimationPhase::Playing;
            }
            AnimationPhase::Playing => {
                if !self.binding.pause() {
                    log::debug!("surface rejected pause for {:?}", self.session.selected_id);
                }
                self.session.animation_phase = AnimationPhase::Stopped;
            }
        }
    }

    /// Restores the default camera framing. Forwarded unconditionally; no
    /// phase change.
    pub fn reset_camera(&mut self) {
        self.binding.reset_camera();
    }

    /// Asks the surface to enter an AR session. Advisory; a rejection is
    /// swallowed.
    pub fn activate_ar(&mut self) {
        if !self.binding.activate_ar() {
            log::debug!("surface rejected AR launch for {:?}", self.session.selected_id);
        }
    }

    /// Fails a load that has been pending longer than the configured
    /// timeout. Returns `true` when the timeout fired, so the host can show
    /// the retry affordance.
    pub fn check_load_timeout(&mut self) -> bool {
        if self.session.load_phase != LoadPhase::Pending {
            return false;
        }
        let Some(started) = self.session.load_started_at else {
            return false;
        };
        if started.elapsed() < self.load_timeout {
            return false;
        }
        self.session.load_phase = LoadPhase::Failed;
        self.session.failure = Some("model load timed out".to_string());
        self.session.load_started_at = None;
        true
    }

    /// Dispatches a user-input request to the matching operation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for `Select` with an unknown id.
    pub fn apply(&mut self, input: Input) -> Result<()> {
        match input {
            Input::Select(id) => self.select_asset(&id),
            Input::Next => self.next(),
            Input::Previous => self.previous(),
            Input::Retry => self.retry(),
            Input::ToggleAnimation => {
                self.toggle_animation();
                Ok(())
            }
            Input::ResetCamera => {
                self.reset_camera();
                Ok(())
            }
            Input::ActivateAr => {
                self.activate_ar();
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Descriptor of the selected asset.
    #[must_use]
    pub fn selected(&self) -> &AssetDescriptor {
        self.catalog
            .get(&self.session.selected_id)
            .expect("selected id is always present in the catalog")
    }

    #[must_use]
    pub fn selected_id(&self) -> &str {
        &self.session.selected_id
    }

    #[must_use]
    pub fn load_phase(&self) -> LoadPhase {
        self.session.load_phase
    }

    #[must_use]
    pub fn animation_phase(&self) -> AnimationPhase {
        self.session.animation_phase
    }

    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.session.failure.as_deref()
    }

    /// Identity of the current surface attachment. Only outcomes carrying
    /// this token are applied.
    #[must_use]
    pub fn current_token(&self) -> BindingToken {
        self.current_token
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.binding.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.binding.surface_mut()
    }

    /// Read-only snapshot for the presentation layer.
    #[must_use]
    pub fn gallery_info(&self) -> GalleryInfo {
        let selected = self.selected();
        GalleryInfo {
            index: self
                .catalog
                .index_of(&selected.id)
                .expect("selected id is always present in the catalog"),
            total: self.catalog.len(),
            id: selected.id.clone(),
            title: selected.title.clone(),
            description: selected.description.clone(),
            poster_url: selected.poster_url.clone(),
            load_phase: self.session.load_phase,
            animation_phase: self.session.animation_phase,
            failure: self.session.failure.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::headless::{Command, HeadlessSurface};

    fn viewer() -> Viewer<HeadlessSurface> {
        Viewer::new(
            Catalog::sample(),
            HeadlessSurface::new(),
            ViewerOptions::default(),
        )
        .expect("sample catalog should start a session")
    }

    fn viewer_with(surface: HeadlessSurface, options: ViewerOptions) -> Viewer<HeadlessSurface> {
        Viewer::new(Catalog::sample(), surface, options)
            .expect("sample catalog should start a session")
    }

    fn load_count(viewer: &Viewer<HeadlessSurface>) -> usize {
        viewer.surface().loaded_urls().len()
    }

    #[test]
    fn new_selects_first_asset_and_requests_its_load() {
        let viewer = viewer();
        assert_eq!(viewer.selected_id(), "astronaut");
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
        assert_eq!(viewer.animation_phase(), AnimationPhase::Stopped);
        assert_eq!(
            viewer.surface().loaded_urls(),
            vec!["https://modelviewer.dev/shared-assets/models/Astronaut.glb"]
        );
    }

    #[test]
    fn new_rejects_empty_catalog() {
        let catalog = Catalog::from_toml_str("").unwrap();
        let err = Viewer::new(catalog, HeadlessSurface::new(), ViewerOptions::default())
            .err()
            .expect("empty catalog should be rejected");
        assert!(matches!(err, Error::EmptyCatalog));
    }

    #[test]
    fn matching_load_event_settles_in_ready() {
        let mut viewer = viewer();
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();
        assert_eq!(viewer.load_phase(), LoadPhase::Ready);
        assert_eq!(viewer.failure(), None);
    }

    #[test]
    fn matching_failure_event_settles_in_failed_with_reason() {
        let mut viewer = viewer();
        viewer.surface_mut().settle_failed("glb truncated");
        viewer.pump_events();
        assert_eq!(viewer.load_phase(), LoadPhase::Failed);
        assert_eq!(viewer.failure(), Some("glb truncated"));
    }

    #[test]
    fn select_asset_resets_lifecycle_and_attaches_once() {
        let mut viewer = viewer();
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();
        viewer.toggle_animation();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Playing);

        viewer.select_asset("horse").expect("horse exists");

        assert_eq!(viewer.selected_id(), "horse");
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
        assert_eq!(viewer.animation_phase(), AnimationPhase::Stopped);
        assert_eq!(load_count(&viewer), 2);
    }

    #[test]
    fn select_asset_with_unknown_id_leaves_state_unchanged() {
        let mut viewer = viewer();
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();
        let token_before = viewer.current_token();

        let err = viewer.select_asset("teapot").unwrap_err();

        assert!(matches!(err, Error::NotFound(id) if id == "teapot"));
        assert_eq!(viewer.selected_id(), "astronaut");
        assert_eq!(viewer.load_phase(), LoadPhase::Ready);
        assert_eq!(viewer.current_token(), token_before);
        assert_eq!(load_count(&viewer), 1);
    }

    #[test]
    fn stale_completion_cannot_corrupt_the_new_selection() {
        let mut viewer = viewer();
        let stale_token = viewer.current_token();

        // Switch away before the first load settles.
        viewer.select_asset("horse").expect("horse exists");
        assert_ne!(viewer.current_token(), stale_token);

        viewer.on_surface_loaded(stale_token);
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);

        viewer.on_surface_failed(stale_token, "late failure");
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
        assert_eq!(viewer.failure(), None);
    }

    #[test]
    fn rapid_reselection_lands_only_the_newest_load() {
        let mut viewer = viewer();
        viewer.next().unwrap();
        viewer.next().unwrap();
        assert_eq!(viewer.selected_id(), "horse");
        assert_eq!(viewer.surface().pending_loads(), 3);

        // Settle the two superseded loads first, then the live one.
        viewer.surface_mut().settle_loaded();
        viewer.surface_mut().settle_failed("aborted");
        viewer.pump_events();
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);

        viewer.surface_mut().settle_loaded();
        viewer.pump_events();
        assert_eq!(viewer.load_phase(), LoadPhase::Ready);
    }

    #[test]
    fn retry_after_failure_returns_to_pending_with_one_new_attach() {
        let mut viewer = viewer();
        viewer.surface_mut().settle_failed("network unreachable");
        viewer.pump_events();
        assert_eq!(viewer.load_phase(), LoadPhase::Failed);
        let loads_before = load_count(&viewer);

        viewer.retry().expect("retry keeps the selected id");

        assert_eq!(viewer.selected_id(), "astronaut");
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
        assert_eq!(viewer.failure(), None);
        assert_eq!(load_count(&viewer), loads_before + 1);
    }

    #[test]
    fn next_and_previous_follow_carousel_order() {
        let mut viewer = viewer();
        viewer.next().unwrap();
        assert_eq!(viewer.selected_id(), "robot-expressive");
        viewer.next().unwrap();
        assert_eq!(viewer.selected_id(), "horse");
        viewer.next().unwrap();
        assert_eq!(viewer.selected_id(), "astronaut");
        viewer.previous().unwrap();
        assert_eq!(viewer.selected_id(), "horse");
    }

    #[test]
    fn toggle_animation_is_a_no_op_until_ready() {
        let mut viewer = viewer();
        viewer.toggle_animation();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Stopped);
        assert!(!viewer.surface().commands().contains(&Command::Play));
    }

    #[test]
    fn toggle_animation_round_trips_when_the_surface_accepts() {
        let mut viewer = viewer();
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();

        viewer.toggle_animation();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Playing);
        viewer.toggle_animation();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Stopped);

        let commands = viewer.surface().commands();
        assert!(commands.contains(&Command::Play));
        assert!(commands.contains(&Command::Pause));
    }

    #[test]
    fn toggle_animation_round_trips_when_the_surface_rejects() {
        let mut viewer = viewer_with(
            HeadlessSurface::new().without_animations(),
            ViewerOptions::default(),
        );
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();

        viewer.toggle_animation();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Playing);
        viewer.toggle_animation();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Stopped);
    }

    #[test]
    fn autoplay_starts_playback_on_ready() {
        let mut viewer = viewer_with(
            HeadlessSurface::new(),
            ViewerOptions {
                autoplay: true,
                ..ViewerOptions::default()
            },
        );
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();

        assert_eq!(viewer.animation_phase(), AnimationPhase::Playing);
        assert!(viewer.surface().commands().contains(&Command::Play));
    }

    #[test]
    fn reset_camera_forwards_without_phase_change() {
        let mut viewer = viewer();
        viewer.reset_camera();
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
        assert!(viewer.surface().commands().contains(&Command::ResetCamera));
    }

    #[test]
    fn activate_ar_forwards_configured_modes() {
        let mut viewer = viewer();
        viewer.activate_ar();
        assert!(viewer
            .surface()
            .commands()
            .iter()
            .any(|command| matches!(command, Command::ActivateAr(_))));
    }

    #[test]
    fn load_timeout_fails_a_stuck_pending_load() {
        let mut viewer = viewer_with(
            HeadlessSurface::new(),
            ViewerOptions {
                load_timeout: Duration::ZERO,
                ..ViewerOptions::default()
            },
        );

        assert!(viewer.check_load_timeout());
        assert_eq!(viewer.load_phase(), LoadPhase::Failed);
        assert_eq!(viewer.failure(), Some("model load timed out"));

        // Already failed; a second check does nothing.
        assert!(!viewer.check_load_timeout());

        viewer.retry().expect("retry recovers a timed-out load");
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
    }

    #[test]
    fn load_timeout_does_not_fire_before_the_deadline() {
        let mut viewer = viewer();
        assert!(!viewer.check_load_timeout());
        assert_eq!(viewer.load_phase(), LoadPhase::Pending);
    }

    #[test]
    fn apply_dispatches_inputs_to_operations() {
        let mut viewer = viewer();
        viewer.apply(Input::Next).unwrap();
        assert_eq!(viewer.selected_id(), "robot-expressive");
        viewer.apply(Input::Previous).unwrap();
        assert_eq!(viewer.selected_id(), "astronaut");
        viewer.apply(Input::Select("horse".to_string())).unwrap();
        assert_eq!(viewer.selected_id(), "horse");

        viewer.surface_mut().settle_loaded();
        viewer.surface_mut().settle_loaded();
        viewer.surface_mut().settle_loaded();
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();
        viewer.apply(Input::ToggleAnimation).unwrap();
        assert_eq!(viewer.animation_phase(), AnimationPhase::Playing);

        assert!(viewer.apply(Input::Select("teapot".to_string())).is_err());
    }

    #[test]
    fn gallery_info_snapshots_the_session() {
        let mut viewer = viewer();
        viewer.next().unwrap();
        viewer.surface_mut().settle_loaded();
        viewer.surface_mut().settle_loaded();
        viewer.pump_events();

        let info = viewer.gallery_info();
        assert_eq!(info.index, 1);
        assert_eq!(info.total, 3);
        assert_eq!(info.id, "robot-expressive");
        assert_eq!(info.title, "Expressive Robot");
        assert_eq!(info.position_caption(), "2 of 3");
        assert_eq!(info.animation_phase, AnimationPhase::Stopped);
        assert!(!info.offers_retry());
    }
}
