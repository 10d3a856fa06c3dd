//! # Map Overlay State
//!
//! The full-screen knowledge graph. Opening subscribes one listener per
//! dismissal path; closing releases all of them. Closing an overlay that is
//! already closed does nothing.

use log::info;

use crate::core::listeners::{Listeners, Subscription, Trigger};
use crate::graph::GraphLayout;

const DISMISS_TRIGGERS: [Trigger; 3] = [
    Trigger::EscapeKey,
    Trigger::ClickOutside,
    Trigger::CloseControl,
];

#[derive(Debug, Default)]
pub enum MapPhase {
    #[default]
    Closed,
    /// Open, waiting for graph data.
    Loading,
    Open(GraphLayout),
}

#[derive(Debug, Default)]
pub struct MapOverlayState {
    phase: MapPhase,
    subscription: Subscription,
}

impl MapOverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &MapPhase {
        &self.phase
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, MapPhase::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, MapPhase::Loading)
    }

    pub fn layout(&self) -> Option<&GraphLayout> {
        match &self.phase {
            MapPhase::Open(layout) => Some(layout),
            _ => None,
        }
    }

    /// Shows the overlay in its loading phase. Returns `false` if it was
    /// already open.
    pub fn open(&mut self, listeners: &mut Listeners) -> bool {
        if self.is_open() {
            return false;
        }
        self.subscription = Subscription::subscribe_all(listeners, &DISMISS_TRIGGERS);
        self.phase = MapPhase::Loading;
        info!("Map overlay opened ({} listeners)", listeners.len());
        true
    }

    /// Hands the laid-out graph to an open overlay. Ignored when closed.
    pub fn show(&mut self, layout: GraphLayout) -> bool {
        if !self.is_open() {
            return false;
        }
        self.phase = MapPhase::Open(layout);
        true
    }

    /// Tears the overlay down. Returns `true` only if it was open.
    pub fn close(&mut self, listeners: &mut Listeners) -> bool {
        let released = self.subscription.release(listeners);
        let was_open = self.is_open();
        self.phase = MapPhase::Closed;
        if was_open {
            info!("Map overlay closed ({} listeners released)", released);
        }
        was_open
    }
}
