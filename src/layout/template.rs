use log::{debug, warn};

use super::{CircleDescriptor, TemplateKind};

/// Largest group count with a hand-authored arrangement.
pub const MAX_FIXED_TEMPLATE: usize = 7;

const CENTER: f32 = 50.0;
const PLANE_SIZE: f32 = 100.0;
const GRID_RADIUS_FRACTION: f32 = 0.4;

/// Circle arrangement for `group_count` groups. Always returns exactly
/// `group_count` circles and depends on nothing but the count.
pub fn select_template(group_count: usize) -> Vec<CircleDescriptor> {
    select_template_with_kind(group_count).0
}

pub fn select_template_with_kind(group_count: usize) -> (Vec<CircleDescriptor>, TemplateKind) {
    let result = match group_count {
        0 => (Vec::new(), TemplateKind::Empty),
        1..=MAX_FIXED_TEMPLATE => (
            fixed_template(group_count),
            TemplateKind::Fixed { count: group_count },
        ),
        _ => {
            let (circles, cols, rows) = grid_template(group_count);
            warn!(
                group_count = group_count,
                cols = cols,
                rows = rows;
                "Too many groups for an intersecting layout, falling back to a grid"
            );
            (circles, TemplateKind::Grid { cols, rows })
        }
    };
    debug!(group_count = group_count, template:? = result.1; "Selected circle template");
    result
}

fn fixed_template(group_count: usize) -> Vec<CircleDescriptor> {
    match group_count {
        1 => vec![CircleDescriptor::new(CENTER, CENTER, 30.0)],
        2 => vec![
            CircleDescriptor::new(38.0, CENTER, 25.0),
            CircleDescriptor::new(62.0, CENTER, 25.0),
        ],
        3 => vec![
            CircleDescriptor::new(38.0, 38.0, 24.0),
            CircleDescriptor::new(62.0, 38.0, 24.0),
            CircleDescriptor::new(CENTER, 60.0, 24.0),
        ],
        4 => vec![
            CircleDescriptor::new(CENTER, 32.0, 22.0),
            CircleDescriptor::new(32.0, CENTER, 22.0),
            CircleDescriptor::new(68.0, CENTER, 22.0),
            CircleDescriptor::new(CENTER, 68.0, 22.0),
        ],
        5 => ring(5, 72.0, 18.0, 20.0),
        6 => ring(6, 60.0, 20.0, 17.0),
        7 => {
            let mut circles = vec![CircleDescriptor::new(CENTER, CENTER, 12.0)];
            circles.extend(ring(6, 60.0, 24.0, 15.0));
            circles
        }
        _ => Vec::new(),
    }
}

/// `count` circles around the plane center, the first one straight up.
fn ring(count: usize, step_degrees: f32, ring_radius: f32, radius: f32) -> Vec<CircleDescriptor> {
    (0..count)
        .map(|i| {
            let angle = (i as f32 * step_degrees - 90.0).to_radians();
            CircleDescriptor::new(
                CENTER + ring_radius * angle.cos(),
                CENTER + ring_radius * angle.sin(),
                radius,
            )
        })
        .collect()
}

fn grid_template(group_count: usize) -> (Vec<CircleDescriptor>, usize, usize) {
    let cols = (group_count as f64).sqrt().ceil() as usize;
    let cols = cols.max(1);
    let rows = group_count.div_ceil(cols);
    let cell_w = PLANE_SIZE / cols as f32;
    let cell_h = PLANE_SIZE / rows as f32;
    let radius = cell_w.min(cell_h) * GRID_RADIUS_FRACTION;

    let circles = (0..group_count)
        .map(|idx| {
            let col = idx % cols;
            let row = idx / cols;
            CircleDescriptor::new(
                (col as f32 + 0.5) * cell_w,
                (row as f32 + 0.5) * cell_h,
                radius,
            )
        })
        .collect();
    (circles, cols, rows)
}
