use serde::Serialize;

/// A circle in the normalized 0-100 plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleDescriptor {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl CircleDescriptor {
    pub const fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (x - self.x).hypot(y - self.y) <= self.r
    }

    /// Distance from `(x, y)` to the circle's boundary, regardless of side.
    pub fn distance_to_edge(&self, x: f32, y: f32) -> f32 {
        ((x - self.x).hypot(y - self.y) - self.r).abs()
    }
}

/// How the circles of a layout were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateKind {
    Empty,
    Fixed { count: usize },
    Grid { cols: usize, rows: usize },
}

impl TemplateKind {
    /// Grid layouts lose intersection semantics; a caller should switch to a
    /// non-diagrammatic view when this is true.
    pub fn prefers_alternate_view(&self) -> bool {
        matches!(self, TemplateKind::Grid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityPosition {
    pub entity_id: String,
    pub x: f32,
    pub y: f32,
    pub zone_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl LabelSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSide::Top => "top",
            LabelSide::Bottom => "bottom",
            LabelSide::Left => "left",
            LabelSide::Right => "right",
        }
    }
}

/// A half-turn arc concentric with a circle, traversed so text placed along it
/// reads left to right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelCurve {
    pub side: LabelSide,
    pub center: (f32, f32),
    pub radius: f32,
    pub start: (f32, f32),
    pub end: (f32, f32),
    /// SVG arc sweep flag; `true` is clockwise in screen coordinates.
    pub sweep: bool,
}

impl LabelCurve {
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {:.2} {:.2} A {:.2} {:.2} 0 0 {} {:.2} {:.2}",
            self.start.0,
            self.start.1,
            self.radius,
            self.radius,
            if self.sweep { 1 } else { 0 },
            self.end.0,
            self.end.1
        )
    }

    /// The point halfway along the arc, where a centered label sits.
    pub fn midpoint(&self) -> (f32, f32) {
        let (cx, cy) = self.center;
        match self.side {
            LabelSide::Top => (cx, cy - self.radius),
            LabelSide::Bottom => (cx, cy + self.radius),
            LabelSide::Left => (cx - self.radius, cy),
            LabelSide::Right => (cx + self.radius, cy),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupLayout {
    pub id: String,
    pub label: String,
    pub color: String,
    pub circle: CircleDescriptor,
    pub label_curve: LabelCurve,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoneLayout {
    pub key: String,
    pub anchor: (f32, f32),
    /// Entity ids in index-within-zone order.
    pub members: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlapReport {
    pub iterations: usize,
    pub converged: bool,
    pub remaining_violations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityLayout {
    pub label: String,
    pub position: EntityPosition,
}

/// Everything a rendering layer needs: circles and label curves aligned with the
/// input groups, marker positions aligned with the input entities.
#[derive(Debug, Clone, Serialize)]
pub struct VennLayout {
    pub title: Option<String>,
    pub template: TemplateKind,
    pub groups: Vec<GroupLayout>,
    pub entities: Vec<EntityLayout>,
    pub zones: Vec<ZoneLayout>,
    pub overlap: OverlapReport,
}

impl VennLayout {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn circles(&self) -> Vec<CircleDescriptor> {
        self.groups.iter().map(|group| group.circle).collect()
    }

    pub fn positions(&self) -> Vec<EntityPosition> {
        self.entities
            .iter()
            .map(|entity| entity.position.clone())
            .collect()
    }
}
