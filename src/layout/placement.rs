use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::VennConfig;

use super::CircleDescriptor;

const DIAGRAM_CENTER: (f32, f32) = (50.0, 50.0);

/// Where a zone's markers gather before spreading.
pub fn zone_anchor(member_circles: &[CircleDescriptor], config: &VennConfig) -> (f32, f32) {
    match member_circles {
        [] => (config.unassigned_anchor_x, config.unassigned_anchor_y),
        [circle] => circle.center(),
        circles => {
            let count = circles.len() as f32;
            let sum_x: f32 = circles.iter().map(|c| c.x).sum();
            let sum_y: f32 = circles.iter().map(|c| c.y).sum();
            (sum_x / count, sum_y / count)
        }
    }
}

/// Candidate position for the entity at `index_in_zone` of a zone of `zone_size`
/// entities whose effective membership resolves to `member_circles`.
///
/// * no circles: every entity lands on the unassigned anchor; the overlap pass
///   separates them.
/// * one circle: a ring inside the circle starting at the top and running
///   clockwise, or a fixed offset away from the diagram center for a lone entity.
/// * several circles: a ring of fixed radius around the mean of the centers,
///   starting at angle zero. A lone entity sits on the mean itself.
pub fn assign_position(
    member_circles: &[CircleDescriptor],
    index_in_zone: usize,
    zone_size: usize,
    config: &VennConfig,
) -> (f32, f32) {
    let zone_size = zone_size.max(1);
    let fraction = index_in_zone as f32 / zone_size as f32;
    match member_circles {
        [] => zone_anchor(member_circles, config),
        [circle] => {
            if zone_size == 1 {
                return solo_position(circle, config);
            }
            let angle = fraction * TAU - FRAC_PI_2;
            let radius = config.single_ring_radius(circle.r);
            (
                circle.x + radius * angle.cos(),
                circle.y + radius * angle.sin(),
            )
        }
        circles => {
            let (ax, ay) = zone_anchor(circles, config);
            if zone_size == 1 {
                return (ax, ay);
            }
            let angle = fraction * TAU;
            let radius = config.intersection_spread;
            (ax + radius * angle.cos(), ay + radius * angle.sin())
        }
    }
}

fn solo_position(circle: &CircleDescriptor, config: &VennConfig) -> (f32, f32) {
    let offset = circle.r * config.solo_offset_fraction;
    let dx = circle.x - DIAGRAM_CENTER.0;
    let dy = circle.y - DIAGRAM_CENTER.1;
    let len = dx.hypot(dy);
    if len <= f32::EPSILON {
        return (circle.x, circle.y - offset);
    }
    (circle.x + dx / len * offset, circle.y + dy / len * offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn config() -> VennConfig {
        VennConfig::default()
    }

    #[test]
    fn no_membership_uses_unassigned_anchor() {
        for idx in 0..4 {
            assert_eq!(assign_position(&[], idx, 4, &config()), (95.0, 95.0));
        }
    }

    #[test]
    fn single_ring_starts_at_top_and_runs_clockwise() {
        let circle = CircleDescriptor::new(50.0, 50.0, 30.0);
        let radius = config().single_ring_radius(30.0);

        let (x0, y0) = assign_position(&[circle], 0, 4, &config());
        assert_approx_eq!(f32, x0, 50.0, epsilon = 1e-4);
        assert_approx_eq!(f32, y0, 50.0 - radius, epsilon = 1e-4);

        // A quarter turn clockwise in screen coordinates is to the right.
        let (x1, y1) = assign_position(&[circle], 1, 4, &config());
        assert_approx_eq!(f32, x1, 50.0 + radius, epsilon = 1e-4);
        assert_approx_eq!(f32, y1, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn lone_single_member_is_offset_away_from_diagram_center() {
        let circle = CircleDescriptor::new(38.0, 50.0, 25.0);
        let (x, y) = assign_position(&[circle], 0, 1, &config());
        assert_approx_eq!(f32, x, 38.0 - 25.0 * 0.42, epsilon = 1e-4);
        assert_approx_eq!(f32, y, 50.0, epsilon = 1e-4);
        assert!(circle.contains(x, y));
    }

    #[test]
    fn lone_member_of_centered_circle_moves_up() {
        let circle = CircleDescriptor::new(50.0, 50.0, 30.0);
        let (x, y) = assign_position(&[circle], 0, 1, &config());
        assert_eq!(x, 50.0);
        assert!(y < 50.0);
    }

    #[test]
    fn intersection_ring_has_no_phase_offset() {
        let a = CircleDescriptor::new(38.0, 50.0, 25.0);
        let b = CircleDescriptor::new(62.0, 50.0, 25.0);
        let (x, y) = assign_position(&[a, b], 0, 3, &config());
        assert_approx_eq!(f32, x, 50.0 + 8.0, epsilon = 1e-4);
        assert_approx_eq!(f32, y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn lone_intersection_member_sits_on_mean_center() {
        let circles = [
            CircleDescriptor::new(38.0, 38.0, 24.0),
            CircleDescriptor::new(62.0, 38.0, 24.0),
            CircleDescriptor::new(50.0, 60.0, 24.0),
        ];
        let (x, y) = assign_position(&circles, 0, 1, &config());
        assert_approx_eq!(f32, x, 50.0, epsilon = 1e-4);
        assert_approx_eq!(f32, y, 136.0 / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn zero_zone_size_is_treated_as_one() {
        let circle = CircleDescriptor::new(50.0, 50.0, 30.0);
        assert_eq!(
            assign_position(&[circle], 0, 0, &config()),
            assign_position(&[circle], 0, 1, &config())
        );
    }
}
