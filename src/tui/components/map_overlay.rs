//! # MapOverlay Component
//!
//! Full-screen knowledge graph, drawn on a braille canvas over the
//! transcript. Opened by `/map`.
//!
//! The overlay is stateless on the TUI side: the phase (loading / open) and
//! the layout live in `core::overlay`. This module owns the geometry shared
//! by rendering and click handling, so the two can never disagree.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::core::overlay::MapPhase;
use crate::graph::GraphLayout;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const CLOSE_CONTROL: &str = "[x]";
/// Labels are only drawn on canvases at least this wide.
const LABEL_MIN_WIDTH: u16 = 60;

/// Where a click landed relative to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayClick {
    Close,
    Outside,
    Node(usize),
    /// Inside the overlay but on nothing in particular
    Inside,
}

pub fn overlay_rect(area: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage(5),
        Constraint::Percentage(90),
        Constraint::Percentage(5),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage(5),
        Constraint::Percentage(90),
        Constraint::Percentage(5),
    ])
    .areas(center_v);
    center
}

/// The `[x]` control, drawn into the top border near the right corner.
pub fn close_control_rect(overlay: Rect) -> Rect {
    let width = CLOSE_CONTROL.len() as u16;
    Rect {
        x: (overlay.x + overlay.width).saturating_sub(width + 2).max(overlay.x),
        y: overlay.y,
        width: width.min(overlay.width),
        height: 1.min(overlay.height),
    }
}

/// The drawing surface inside the border.
pub fn canvas_area(overlay: Rect) -> Rect {
    Rect {
        x: overlay.x + 1,
        y: overlay.y + 1,
        width: overlay.width.saturating_sub(2),
        height: overlay.height.saturating_sub(2),
    }
}

/// Screen cell of a node's normalized position.
fn node_cell(canvas: Rect, x: f64, y: f64) -> (u16, u16) {
    let col = (x * f64::from(canvas.width.saturating_sub(1))).round() as u16;
    let row = (y * f64::from(canvas.height.saturating_sub(1))).round() as u16;
    (canvas.x + col, canvas.y + row)
}

/// The node closest to `(col, row)`, if one lies within one cell of it.
pub fn node_at(layout: &GraphLayout, canvas: Rect, col: u16, row: u16) -> Option<usize> {
    layout
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| {
            let (nx, ny) = node_cell(canvas, node.x, node.y);
            let (dx, dy) = (nx.abs_diff(col), ny.abs_diff(row));
            (dx <= 1 && dy <= 1).then_some((dx + dy, i))
        })
        .min()
        .map(|(_, i)| i)
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

pub fn classify_click(overlay: Rect, layout: Option<&GraphLayout>, col: u16, row: u16) -> OverlayClick {
    if contains(close_control_rect(overlay), col, row) {
        return OverlayClick::Close;
    }
    if !contains(overlay, col, row) {
        return OverlayClick::Outside;
    }
    layout
        .and_then(|layout| node_at(layout, canvas_area(overlay), col, row))
        .map_or(OverlayClick::Inside, OverlayClick::Node)
}

pub struct MapOverlay<'a> {
    pub phase: &'a MapPhase,
    pub palette: Palette,
}

impl<'a> MapOverlay<'a> {
    pub fn new(phase: &'a MapPhase, palette: Palette) -> Self {
        Self { phase, palette }
    }

    fn block(&self) -> Block<'static> {
        let base = self.palette.base();
        Block::bordered()
            .border_style(base.fg(self.palette.border))
            .style(base)
            .title(" Knowledge Graph ")
            .title_bottom(Line::from(" Click a node to open  Esc Close ").centered())
    }

    fn render_message(&self, frame: &mut Frame, overlay: Rect, message: &str) {
        let paragraph = Paragraph::new(format!("\n\n{message}"))
            .alignment(Alignment::Center)
            .style(self.palette.base().fg(self.palette.muted))
            .block(self.block());
        frame.render_widget(paragraph, overlay);
    }

    fn render_graph(&self, frame: &mut Frame, overlay: Rect, layout: &GraphLayout) {
        let canvas_rect = canvas_area(overlay);
        let show_labels = canvas_rect.width >= LABEL_MIN_WIDTH;
        let edge_color = self.palette.muted;
        let node_color = self.palette.accent;
        let label_color = self.palette.text;

        // Canvas y grows upwards; layout y grows downwards
        let points: Vec<(f64, f64)> = layout.nodes.iter().map(|n| (n.x, 1.0 - n.y)).collect();
        let edges: Vec<CanvasLine> = layout
            .edges
            .iter()
            .map(|&(from, to)| {
                let (a, b) = (&layout.nodes[from], &layout.nodes[to]);
                CanvasLine::new(a.x, 1.0 - a.y, b.x, 1.0 - b.y, edge_color)
            })
            .collect();
        let labels: Vec<(f64, f64, String)> = if show_labels {
            let width = f64::from(canvas_rect.width);
            layout
                .nodes
                .iter()
                .map(|n| {
                    // Keep labels near the right edge from being clipped
                    let max_x = 1.0 - n.label.chars().count() as f64 / width;
                    (n.x.min(max_x).max(0.0), 1.0 - n.y, n.label.clone())
                })
                .collect()
        } else {
            Vec::new()
        };

        let canvas = Canvas::default()
            .block(self.block())
            .background_color(self.palette.background)
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(move |ctx| {
                for edge in &edges {
                    ctx.draw(edge);
                }
                ctx.layer();
                ctx.draw(&Points {
                    coords: &points,
                    color: node_color,
                });
                for (x, y, label) in &labels {
                    ctx.print(*x, *y, Line::styled(label.clone(), label_color));
                }
            });
        frame.render_widget(canvas, overlay);
    }
}

impl<'a> Component for MapOverlay<'a> {
    /// `area` is the whole screen; the overlay takes most of it.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = overlay_rect(area);
        frame.render_widget(Clear, overlay);

        match self.phase {
            MapPhase::Closed => return,
            MapPhase::Loading => self.render_message(frame, overlay, "Loading graph..."),
            MapPhase::Open(layout) if layout.nodes.is_empty() => {
                self.render_message(frame, overlay, "No posts to show.")
            }
            MapPhase::Open(layout) => self.render_graph(frame, overlay, layout),
        }

        let close = close_control_rect(overlay);
        frame.render_widget(
            Paragraph::new(CLOSE_CONTROL).style(self.palette.base().fg(self.palette.error)),
            close,
        );
    }
}
