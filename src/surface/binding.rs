// SPDX-License-Identifier: MPL-2.0
//! Ownership of the single live surface attachment.
//!
//! [`SurfaceBinding`] mints a fresh [`BindingToken`] each time it attaches
//! the surface to an asset and hands the surface an [`EventSink`] that stamps
//! every notification with that token. Attaching supersedes the previous
//! token within the same synchronous call, so there is never a window in
//! which two attachments could both produce events bearing the current
//! identity. A late notification from a superseded load still drains through
//! [`SurfaceBinding::poll`], but carries its dead token and is discarded by
//! the viewer's identity check.

use super::{ArMode, RenderSurface, StageSettings, SurfaceEvent};
use crate::catalog::AssetDescriptor;
use std::cell::Cell;
use std::sync::mpsc;

/// Opaque identity of one surface attachment.
///
/// Tokens are only ever compared for equality; the numbering is an internal
/// detail of the binding that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingToken(u64);

/// A surface notification stamped with the attachment that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedEvent {
    pub token: BindingToken,
    pub event: SurfaceEvent,
}

/// Outcome channel handed to the surface alongside each load request.
///
/// The sink enforces the at-most-once contract: only the first notification
/// per load is delivered, extras are dropped. Not `Clone`: one sink per
/// load, one notification per sink.
pub struct EventSink {
    token: BindingToken,
    tx: mpsc::Sender<TaggedEvent>,
    delivered: Cell<bool>,
}

impl EventSink {
    /// Reports that the load completed and the model is visible.
    pub fn loaded(&self) {
        self.send(SurfaceEvent::Loaded);
    }

    /// Reports that the load failed.
    pub fn failed(&self, reason: impl Into<String>) {
        self.send(SurfaceEvent::Failed(reason.into()));
    }

    fn send(&self, event: SurfaceEvent) {
        if self.delivered.replace(true) {
            log::debug!(
                "surface delivered a second notification for {:?}; dropping",
                self.token
            );
            return;
        }
        // A closed receiver means the session is over; drop the notification.
        let _ = self.tx.send(TaggedEvent {
            token: self.token,
            event,
        });
    }
}

/// Adapter between the viewer and one [`RenderSurface`] instance.
///
/// At most one attachment is live at a time. Commands forwarded while
/// nothing is attached are no-ops, not errors: they are advisory requests on
/// a best-effort visual surface.
pub struct SurfaceBinding<S> {
    surface: S,
    settings: StageSettings,
    events: mpsc::Receiver<TaggedEvent>,
    sink_tx: mpsc::Sender<TaggedEvent>,
    current: Option<BindingToken>,
    next_token: u64,
}

impl<S: RenderSurface> SurfaceBinding<S> {
    pub fn new(surface: S, settings: StageSettings) -> Self {
        let (sink_tx, events) = mpsc::channel();
        Self {
            surface,
            settings,
            events,
            sink_tx,
            current: None,
            next_token: 0,
        }
    }

    /// Supersedes any prior attachment and starts loading `descriptor`.
    ///
    /// The returned token is the only one the binding considers current from
    /// this point on.
    pub fn attach(&mut self, descriptor: &AssetDescriptor) -> BindingToken {
        self.detach();
        let token = BindingToken(self.next_token);
        self.next_token += 1;
        let sink = EventSink {
            token,
            tx: self.sink_tx.clone(),
            delivered: Cell::new(false),
        };
        self.surface.load(&descriptor.asset_url, &self.settings, sink);
        self.current = Some(token);
        log::debug!("attached asset {:?} as {token:?}", descriptor.id);
        token
    }

    /// Invalidates the current token without attaching a replacement.
    pub fn detach(&mut self) {
        if let Some(token) = self.current.take() {
            log::debug!("superseded attachment {token:?}");
        }
    }

    #[must_use]
    pub fn current_token(&self) -> Option<BindingToken> {
        self.current
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }

    /// Forwards a play command; `false` when unattached or rejected.
    pub fn play(&mut self) -> bool {
        self.is_attached() && self.surface.play()
    }

    /// Forwards a pause command; `false` when unattached or rejected.
    pub fn pause(&mut self) -> bool {
        self.is_attached() && self.surface.pause()
    }

    /// Forwards a camera reset; a no-op when unattached.
    pub fn reset_camera(&mut self) {
        if self.is_attached() {
            self.surface.reset_camera();
        }
    }

    /// Forwards an AR launch request; `false` when unattached or rejected.
    pub fn activate_ar(&mut self) -> bool {
        self.is_attached() && self.surface.activate_ar(&self.settings.ar_modes)
    }

    /// Drains notifications delivered since the last call, oldest first.
    ///
    /// Events are returned regardless of which attachment produced them;
    /// staleness is the caller's call, by token equality.
    pub fn poll(&mut self) -> Vec<TaggedEvent> {
        self.events.try_iter().collect()
    }

    #[must_use]
    pub fn settings(&self) -> &StageSettings {
        &self.settings
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// AR modes the binding offers when forwarding [`Self::activate_ar`].
    #[must_use]
    pub fn ar_modes(&self) -> &[ArMode] {
        &self.settings.ar_modes
    }
}
