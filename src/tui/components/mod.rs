//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `StatusBar`: top line with site title and dispatcher status
//! - `MapOverlay`: knowledge graph canvas (its state lives in core)
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: single-line prompt
//! - `TranscriptView`: scrollable output with stick-to-bottom
//! - `SuggestionList`: autocomplete popup with click hit testing
//!
//! Persistent state (`*State`) lives in `TuiState`; the component itself is
//! created each frame around borrowed state and props, then rendered.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── status_bar.rs
//! ├── transcript_view.rs
//! ├── suggestion_list.rs
//! ├── map_overlay.rs
//! └── input_box/          (prompt + horizontal scrolling cursor)
//! ```

pub mod input_box;
pub mod map_overlay;
pub mod status_bar;
pub mod suggestion_list;
pub mod transcript_view;

pub use input_box::{InputBox, InputEvent};
pub use map_overlay::{MapOverlay, OverlayClick, classify_click, overlay_rect};
pub use status_bar::StatusBar;
pub use suggestion_list::{SuggestionList, SuggestionListState};
pub use transcript_view::{TranscriptView, TranscriptViewState};
