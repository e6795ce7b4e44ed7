use serde::{Deserialize, Serialize};

const DEFAULT_GROUP_COLORS: [&str; 12] = [
    "#ECECFF", "#ffffde", "hsl(80, 100%, 56.2745098039%)", "hsl(240, 100%, 86.2745098039%)",
    "hsl(60, 100%, 63.5294117647%)", "hsl(80, 100%, 76.2745098039%)",
    "hsl(300, 100%, 76.2745098039%)", "hsl(180, 100%, 76.2745098039%)",
    "hsl(0, 100%, 76.2745098039%)", "hsl(300, 100%, 86.2745098039%)",
    "hsl(150, 100%, 76.2745098039%)", "hsl(30, 100%, 76.2745098039%)",
];

const MODERN_GROUP_COLORS: [&str; 12] = [
    "#6366f1", "#f59e0b", "#10b981", "#ef4444", "#8b5cf6", "#06b6d4", "#ec4899", "#84cc16",
    "#f97316", "#14b8a6", "#a855f7", "#64748b",
];

/// Visual styling. Sizes are in diagram units (the 0-100 plane), not pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub title_font_size: f32,
    pub primary_text_color: String,
    pub line_color: String,
    pub background: String,
    pub group_colors: Vec<String>,
    pub circle_fill_opacity: f32,
    pub circle_stroke_width: f32,
    pub marker_radius: f32,
    pub marker_fill: String,
    pub marker_stroke: String,
    pub marker_stroke_width: f32,
}

impl Theme {
    pub fn mermaid_default() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 4.0,
            title_font_size: 5.0,
            primary_text_color: "#333333".to_string(),
            line_color: "#9370DB".to_string(),
            background: "#FFFFFF".to_string(),
            group_colors: DEFAULT_GROUP_COLORS
                .iter()
                .map(|value| value.to_string())
                .collect(),
            circle_fill_opacity: 0.45,
            circle_stroke_width: 0.4,
            marker_radius: 1.6,
            marker_fill: "#333333".to_string(),
            marker_stroke: "#FFFFFF".to_string(),
            marker_stroke_width: 0.3,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 3.6,
            title_font_size: 4.6,
            primary_text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            background: "#FFFFFF".to_string(),
            group_colors: MODERN_GROUP_COLORS
                .iter()
                .map(|value| value.to_string())
                .collect(),
            circle_fill_opacity: 0.25,
            circle_stroke_width: 0.35,
            marker_radius: 1.4,
            marker_fill: "#1C2430".to_string(),
            marker_stroke: "#FFFFFF".to_string(),
            marker_stroke_width: 0.25,
        }
    }

    /// Palette color for the group at `index`, cycling through the palette.
    pub fn group_color(&self, index: usize) -> String {
        if self.group_colors.is_empty() {
            return self.line_color.clone();
        }
        self.group_colors[index % self.group_colors.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_color_cycles() {
        let theme = Theme::modern();
        let len = theme.group_colors.len();
        assert_eq!(theme.group_color(0), theme.group_color(len));
        assert_ne!(theme.group_color(0), theme.group_color(1));
    }

    #[test]
    fn empty_palette_falls_back_to_line_color() {
        let mut theme = Theme::mermaid_default();
        theme.group_colors.clear();
        assert_eq!(theme.group_color(3), theme.line_color);
    }
}
