use super::{CircleDescriptor, LabelCurve, LabelSide};

pub const DEFAULT_LABEL_OFFSET: f32 = 5.0;

/// Side of a circle its label goes on, judged by which part of the plane the
/// circle sits in relative to (50, 50). Neighboring labels may still collide.
pub fn best_label_side(circle: &CircleDescriptor) -> LabelSide {
    if circle.x < 40.0 && circle.y < 50.0 {
        LabelSide::Left
    } else if circle.x > 60.0 && circle.y < 50.0 {
        LabelSide::Right
    } else if circle.y > 60.0 {
        LabelSide::Bottom
    } else {
        LabelSide::Top
    }
}

pub fn label_path(circle: &CircleDescriptor, side: LabelSide) -> LabelCurve {
    label_path_with_offset(circle, side, DEFAULT_LABEL_OFFSET)
}

/// Half-turn arc `offset` units outside the circle on `side`. Top and bottom arcs
/// run left to right, the left arc runs upward and the right arc downward.
pub fn label_path_with_offset(circle: &CircleDescriptor, side: LabelSide, offset: f32) -> LabelCurve {
    let radius = (circle.r + offset).max(0.0);
    let (cx, cy) = circle.center();
    let (start, end, sweep) = match side {
        LabelSide::Top => ((cx - radius, cy), (cx + radius, cy), true),
        LabelSide::Bottom => ((cx - radius, cy), (cx + radius, cy), false),
        LabelSide::Left => ((cx, cy + radius), (cx, cy - radius), true),
        LabelSide::Right => ((cx, cy - radius), (cx, cy + radius), true),
    };
    LabelCurve {
        side,
        center: (cx, cy),
        radius,
        start,
        end,
        sweep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::template::select_template;

    #[test]
    fn side_follows_quadrant_rules() {
        let side = |x, y| best_label_side(&CircleDescriptor::new(x, y, 10.0));
        assert_eq!(side(30.0, 30.0), LabelSide::Left);
        assert_eq!(side(70.0, 30.0), LabelSide::Right);
        assert_eq!(side(50.0, 70.0), LabelSide::Bottom);
        assert_eq!(side(30.0, 70.0), LabelSide::Bottom);
        assert_eq!(side(50.0, 30.0), LabelSide::Top);
        assert_eq!(side(50.0, 50.0), LabelSide::Top);
        assert_eq!(side(30.0, 55.0), LabelSide::Top);
    }

    #[test]
    fn three_way_template_sides() {
        let sides: Vec<LabelSide> = select_template(3).iter().map(best_label_side).collect();
        assert_eq!(sides, vec![LabelSide::Left, LabelSide::Right, LabelSide::Top]);
    }

    #[test]
    fn curve_sits_outside_circle() {
        let circle = CircleDescriptor::new(40.0, 45.0, 20.0);
        for side in [LabelSide::Top, LabelSide::Bottom, LabelSide::Left, LabelSide::Right] {
            let curve = label_path(&circle, side);
            assert_eq!(curve.radius, 25.0);
            assert_eq!(curve.center, (40.0, 45.0));
            for (x, y) in [curve.start, curve.end, curve.midpoint()] {
                assert!((circle.distance_to_edge(x, y) - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn curves_read_left_to_right() {
        let circle = CircleDescriptor::new(50.0, 50.0, 20.0);
        let top = label_path(&circle, LabelSide::Top);
        assert!(top.start.0 < top.end.0 && top.sweep);
        assert!(top.midpoint().1 < 50.0);

        let bottom = label_path(&circle, LabelSide::Bottom);
        assert!(bottom.start.0 < bottom.end.0 && !bottom.sweep);
        assert!(bottom.midpoint().1 > 50.0);

        let left = label_path(&circle, LabelSide::Left);
        assert!(left.start.1 > left.end.1);
        let right = label_path(&circle, LabelSide::Right);
        assert!(right.start.1 < right.end.1);
    }

    #[test]
    fn custom_offset_is_applied() {
        let circle = CircleDescriptor::new(50.0, 50.0, 20.0);
        let curve = label_path_with_offset(&circle, LabelSide::Top, 2.0);
        assert_eq!(curve.to_svg_path(), "M 28.00 50.00 A 22.00 22.00 0 0 1 72.00 50.00");
    }
}
