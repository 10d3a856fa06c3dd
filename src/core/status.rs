//! # Status Slot
//!
//! A single mutable label describing what the dispatcher is doing right now.
//! Last write wins. Every dispatch ends back on `OPERATIONAL`; the transient
//! labels written along the way are kept as a trail so the status bar can show
//! what the last command did.

use std::fmt;

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Operational,
    Processing,
    LoadingMap,
    MapLoaded,
    Error,
    HelpDisplayed,
    SearchComplete(usize),
    NoResults,
    ScreenCleared,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Operational => write!(f, "OPERATIONAL"),
            Status::Processing => write!(f, "PROCESSING"),
            Status::LoadingMap => write!(f, "LOADING MAP..."),
            Status::MapLoaded => write!(f, "MAP LOADED"),
            Status::Error => write!(f, "ERROR"),
            Status::HelpDisplayed => write!(f, "HELP DISPLAYED"),
            Status::SearchComplete(n) => write!(f, "SEARCH COMPLETE ({n})"),
            Status::NoResults => write!(f, "NO RESULTS"),
            Status::ScreenCleared => write!(f, "SCREEN CLEARED"),
        }
    }
}

impl Status {
    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error)
    }
}

pub struct StatusSlot {
    current: Status,
    /// Every label written since the last `begin()`, in order.
    trail: Vec<Status>,
}

impl Default for StatusSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSlot {
    pub fn new() -> Self {
        Self {
            current: Status::Operational,
            trail: Vec::new(),
        }
    }

    pub fn current(&self) -> &Status {
        &self.current
    }

    pub fn set(&mut self, status: Status) {
        debug!("Status: {} -> {}", self.current, status);
        self.trail.push(status.clone());
        self.current = status;
    }

    /// Starts a new dispatch: forgets the previous trail and enters `PROCESSING`.
    pub fn begin(&mut self) {
        self.trail.clear();
        self.set(Status::Processing);
    }

    pub fn trail(&self) -> &[Status] {
        &self.trail
    }

    /// The most recent label of the current trail that reports an outcome
    /// (anything other than `OPERATIONAL`/`PROCESSING`).
    pub fn last_outcome(&self) -> Option<&Status> {
        self.trail
            .iter()
            .rev()
            .find(|s| !matches!(s, Status::Operational | Status::Processing))
    }
}
