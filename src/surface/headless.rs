// SPDX-License-Identifier: MPL-2.0
//! In-memory surface for tests and the demo binary.
//!
//! Records every command it receives and lets the caller script when and how
//! loads settle. Unsettled loads queue up in arrival order, so a test can
//! attach twice and then settle the *older* load to exercise late-callback
//! handling.

use super::binding::EventSink;
use super::{ArMode, RenderSurface, StageSettings};
use std::collections::VecDeque;

/// What the headless surface does with each load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadBehavior {
    /// Hold the sink until [`HeadlessSurface::settle_loaded`] or
    /// [`HeadlessSurface::settle_failed`] is called.
    #[default]
    Manual,
    /// Report success before `load` returns.
    CompleteImmediately,
    /// Report failure before `load` returns.
    FailImmediately,
}

/// Record of one command issued to the surface, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String),
    Play,
    Pause,
    ResetCamera,
    ActivateAr(Vec<ArMode>),
}

pub struct HeadlessSurface {
    behavior: LoadBehavior,
    animations_supported: bool,
    commands: Vec<Command>,
    pending: VecDeque<EventSink>,
}

impl HeadlessSurface {
    /// A surface whose loads stay pending until settled by hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            behavior: LoadBehavior::Manual,
            animations_supported: true,
            commands: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// A surface whose loads succeed immediately.
    #[must_use]
    pub fn completing() -> Self {
        Self {
            behavior: LoadBehavior::CompleteImmediately,
            ..Self::new()
        }
    }

    /// A surface whose loads fail immediately.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            behavior: LoadBehavior::FailImmediately,
            ..Self::new()
        }
    }

    /// Rejects play/pause, like a model without an animation track.
    #[must_use]
    pub fn without_animations(mut self) -> Self {
        self.animations_supported = false;
        self
    }

    /// Settles the oldest pending load as successful. Returns `false` when
    /// nothing is pending.
    pub fn settle_loaded(&mut self) -> bool {
        match self.pending.pop_front() {
            Some(sink) => {
                sink.loaded();
                true
            }
            None => false,
        }
    }

    /// Settles the oldest pending load as failed. Returns `false` when
    /// nothing is pending.
    pub fn settle_failed(&mut self, reason: &str) -> bool {
        match self.pending.pop_front() {
            Some(sink) => {
                sink.failed(reason);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the oldest pending sink, for tests that need to
    /// drive it directly.
    pub fn take_pending_sink(&mut self) -> Option<EventSink> {
        self.pending.pop_front()
    }

    /// Number of loads that have not settled yet.
    #[must_use]
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Every command received so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// URLs of all load requests, in call order.
    #[must_use]
    pub fn loaded_urls(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Load(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for HeadlessSurface {
    fn load(&mut self, url: &str, _settings: &StageSettings, events: EventSink) {
        self.commands.push(Command::Load(url.to_string()));
        match self.behavior {
            LoadBehavior::Manual => self.pending.push_back(events),
            LoadBehavior::CompleteImmediately => events.loaded(),
            LoadBehavior::FailImmediately => events.failed("scripted load failure"),
        }
    }

    fn play(&mut self) -> bool {
        self.commands.push(Command::Play);
        self.animations_supported
    }

    fn pause(&mut self) -> bool {
        self.commands.push(Command::Pause);
        self.animations_supported
    }

    fn reset_camera(&mut self) {
        self.commands.push(Command::ResetCamera);
    }

    fn activate_ar(&mut self, modes: &[ArMode]) -> bool {
        self.commands.push(Command::ActivateAr(modes.to_vec()));
        !modes.is_empty()
    }
}
