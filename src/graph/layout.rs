//! Force-directed layout.
//!
//! A direct O(n²) simulation with the same force model as a Barnes-Hut
//! physics engine: inverse-square repulsion between every pair, Hooke
//! springs along links, and a constant pull toward the origin. Initial
//! positions are a golden-angle spiral, so the result is deterministic.

use std::collections::HashMap;

use log::debug;

use super::GraphData;

#[derive(Debug, Clone, Copy)]
pub struct ForceParams {
    pub repulsion: f64,
    pub spring_constant: f64,
    pub spring_length: f64,
    pub central_gravity: f64,
    pub damping: f64,
    pub timestep: f64,
    pub max_velocity: f64,
    pub iterations: usize,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            repulsion: 8000.0,
            spring_constant: 0.04,
            spring_length: 200.0,
            central_gravity: 0.3,
            damping: 0.09,
            timestep: 0.5,
            max_velocity: 50.0,
            iterations: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub label: String,
    /// Normalized into `[0, 1]`.
    pub x: f64,
    pub y: f64,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphLayout {
    pub nodes: Vec<PlacedNode>,
    /// Index pairs into `nodes`.
    pub edges: Vec<(usize, usize)>,
}

impl GraphLayout {
    pub fn compute(graph: &GraphData, params: &ForceParams) -> Self {
        let n = graph.nodes.len();
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        let edges: Vec<(usize, usize)> = graph
            .links
            .iter()
            .filter_map(|link| {
                let from = *index.get(link.from.as_str())?;
                let to = *index.get(link.to.as_str())?;
                (from != to).then_some((from, to))
            })
            .collect();

        let positions = simulate(n, &edges, params);
        let normalized = normalize(&positions);

        let nodes = graph
            .nodes
            .iter()
            .zip(normalized)
            .map(|(node, (x, y))| PlacedNode {
                id: node.id.clone(),
                label: node.label().to_string(),
                x,
                y,
                group: node.group.as_ref().map(|g| match g {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                }),
            })
            .collect();

        debug!("Laid out graph: {} nodes, {} edges", n, edges.len());
        Self { nodes, edges }
    }
}

fn simulate(n: usize, edges: &[(usize, usize)], p: &ForceParams) -> Vec<(f64, f64)> {
    const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let r = p.spring_length * 0.5 * (i as f64).sqrt();
            let a = i as f64 * GOLDEN_ANGLE;
            (r * a.cos(), r * a.sin())
        })
        .collect();
    let mut vel = vec![(0.0f64, 0.0f64); n];

    for _ in 0..p.iterations {
        let mut force = vec![(0.0f64, 0.0f64); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1.0);
                let f = p.repulsion / (dist * dist);
                let (fx, fy) = (dx / dist * f, dy / dist * f);
                force[i].0 += fx;
                force[i].1 += fy;
                force[j].0 -= fx;
                force[j].1 -= fy;
            }
        }

        for &(a, b) in edges {
            let dx = pos[b].0 - pos[a].0;
            let dy = pos[b].1 - pos[a].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1.0);
            let f = p.spring_constant * (dist - p.spring_length);
            let (fx, fy) = (dx / dist * f, dy / dist * f);
            force[a].0 += fx;
            force[a].1 += fy;
            force[b].0 -= fx;
            force[b].1 -= fy;
        }

        for i in 0..n {
            let (x, y) = pos[i];
            let dist = (x * x + y * y).sqrt();
            if dist > 0.0 {
                force[i].0 -= x / dist * p.central_gravity;
                force[i].1 -= y / dist * p.central_gravity;
            }

            let ax = force[i].0 - p.damping * vel[i].0;
            let ay = force[i].1 - p.damping * vel[i].1;
            vel[i].0 = (vel[i].0 + ax * p.timestep).clamp(-p.max_velocity, p.max_velocity);
            vel[i].1 = (vel[i].1 + ay * p.timestep).clamp(-p.max_velocity, p.max_velocity);
            pos[i].0 += vel[i].0 * p.timestep;
            pos[i].1 += vel[i].1 * p.timestep;
        }
    }

    pos
}

/// Maps positions into the unit square, preserving aspect ratio.
fn normalize(positions: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for &(x, y) in positions {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let span = (max_x - min_x).max(max_y - min_y);
    if !span.is_finite() || span <= f64::EPSILON {
        return vec![(0.5, 0.5); positions.len()];
    }

    let off_x = (span - (max_x - min_x)) / 2.0;
    let off_y = (span - (max_y - min_y)) / 2.0;
    positions
        .iter()
        .map(|&(x, y)| {
            (
                ((x - min_x + off_x) / span).clamp(0.0, 1.0),
                ((y - min_y + off_y) / span).clamp(0.0, 1.0),
            )
        })
        .collect()
}
