use log::debug;

use crate::config::VennConfig;

use super::{EntityPosition, OverlapReport};

pub const DEFAULT_MAX_ITERATIONS: usize = 50;
const DEFAULT_MARGIN: f32 = 0.5;
const DEFAULT_BOUNDS: (f32, f32) = (5.0, 95.0);
const GOLDEN_ANGLE: f32 = 2.399_963_3;
const COINCIDENT_EPSILON: f32 = 1e-6;

/// Parameters of one overlap pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapParams {
    pub min_distance: f32,
    pub max_iterations: usize,
    pub margin: f32,
    pub bounds: (f32, f32),
}

impl OverlapParams {
    pub fn new(min_distance: f32, max_iterations: usize) -> Self {
        Self {
            min_distance,
            max_iterations,
            margin: DEFAULT_MARGIN,
            bounds: DEFAULT_BOUNDS,
        }
    }

    pub fn from_config(config: &VennConfig) -> Self {
        Self {
            min_distance: config.min_distance,
            max_iterations: config.max_iterations,
            margin: config.overlap_margin,
            bounds: (config.clamp_min, config.clamp_max),
        }
    }
}

/// Pushes markers closer than `min_distance` apart. Best effort: returns whatever
/// state is reached after `max_iterations` passes.
pub fn resolve_overlaps(
    positions: Vec<EntityPosition>,
    min_distance: f32,
    max_iterations: usize,
) -> Vec<EntityPosition> {
    resolve_overlaps_with_report(positions, &OverlapParams::new(min_distance, max_iterations)).0
}

/// Pairs are visited as `(i, j)` with `i < j` in input order; the order decides
/// how dense clusters break apart, so identical input gives identical output.
pub fn resolve_overlaps_with_report(
    mut positions: Vec<EntityPosition>,
    params: &OverlapParams,
) -> (Vec<EntityPosition>, OverlapReport) {
    let (lo, hi) = ordered_bounds(params.bounds);
    for position in positions.iter_mut() {
        position.x = position.x.clamp(lo, hi);
        position.y = position.y.clamp(lo, hi);
    }

    let count = positions.len();
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        iterations += 1;
        let mut moved = false;
        for i in 0..count {
            for j in (i + 1)..count {
                let dx = positions[j].x - positions[i].x;
                let dy = positions[j].y - positions[i].y;
                let distance = dx.hypot(dy);
                if distance >= params.min_distance {
                    continue;
                }
                let (ux, uy) = if distance > COINCIDENT_EPSILON {
                    (dx / distance, dy / distance)
                } else {
                    let angle = GOLDEN_ANGLE * (i * count + j) as f32;
                    (angle.cos(), angle.sin())
                };
                let push = (params.min_distance - distance) / 2.0 + params.margin;

                let first = &mut positions[i];
                first.x = (first.x - ux * push).clamp(lo, hi);
                first.y = (first.y - uy * push).clamp(lo, hi);
                let second = &mut positions[j];
                second.x = (second.x + ux * push).clamp(lo, hi);
                second.y = (second.y + uy * push).clamp(lo, hi);
                moved = true;
            }
        }
        if !moved {
            converged = true;
            break;
        }
    }
    let remaining_violations = count_violations(&positions, params.min_distance);
    converged = converged || remaining_violations == 0;
    if !converged {
        debug!(
            iterations = iterations,
            remaining_violations = remaining_violations;
            "Overlap budget exhausted before markers separated"
        );
    }
    (
        positions,
        OverlapReport {
            iterations,
            converged,
            remaining_violations,
        },
    )
}

/// Number of marker pairs closer than `min_distance`.
pub fn count_violations(positions: &[EntityPosition], min_distance: f32) -> usize {
    let mut violations = 0;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            if (b.x - a.x).hypot(b.y - a.y) < min_distance {
                violations += 1;
            }
        }
    }
    violations
}

fn ordered_bounds((a, b): (f32, f32)) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}
