use crate::theme::Theme;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the placement and overlap passes. All lengths are in the
/// normalized 0-100 plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VennConfig {
    pub min_distance: f32,
    pub max_iterations: usize,
    pub overlap_margin: f32,
    pub clamp_min: f32,
    pub clamp_max: f32,
    pub unassigned_anchor_x: f32,
    pub unassigned_anchor_y: f32,
    pub ring_radius_fraction: f32,
    pub ring_edge_fraction: f32,
    pub solo_offset_fraction: f32,
    pub intersection_spread: f32,
}

impl Default for VennConfig {
    fn default() -> Self {
        Self {
            min_distance: 6.0,
            max_iterations: 50,
            overlap_margin: 0.5,
            clamp_min: 5.0,
            clamp_max: 95.0,
            unassigned_anchor_x: 95.0,
            unassigned_anchor_y: 95.0,
            ring_radius_fraction: 0.6,
            ring_edge_fraction: 0.7,
            solo_offset_fraction: 0.42,
            intersection_spread: 8.0,
        }
    }
}

impl VennConfig {
    /// Radius of the ring single-group entities are spread on, for a circle of radius `r`.
    pub fn single_ring_radius(&self, r: f32) -> f32 {
        r * self.ring_radius_fraction * self.ring_edge_fraction
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub offset: f32,
    pub start_offset_percent: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            offset: 5.0,
            start_offset_percent: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub venn: VennConfig,
    pub labels: LabelConfig,
    pub empty_message: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            venn: VennConfig::default(),
            labels: LabelConfig::default(),
            empty_message: "No groups to display".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Extra room around the 0-100 plane so label curves outside the outer circles stay visible.
    pub viewport_padding: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            viewport_padding: 15.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::mermaid_default();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    title_font_size: Option<f32>,
    primary_text_color: Option<String>,
    line_color: Option<String>,
    background: Option<String>,
    group_colors: Option<Vec<String>>,
    circle_fill_opacity: Option<f32>,
    marker_radius: Option<f32>,
    marker_fill: Option<String>,
    marker_stroke: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct VennConfigFile {
    min_distance: Option<f32>,
    max_iterations: Option<usize>,
    overlap_margin: Option<f32>,
    unassigned_anchor: Option<[f32; 2]>,
    ring_radius_fraction: Option<f32>,
    ring_edge_fraction: Option<f32>,
    solo_offset_fraction: Option<f32>,
    intersection_spread: Option<f32>,
    label_offset: Option<f32>,
    empty_message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    venn: Option<VennConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    apply_config_file(&mut config, parsed);
    Ok(config)
}

/// Layers an init directive (`%%{init: {...}}%%`) on top of `config`.
/// Directives that do not match the config shape are ignored.
pub fn merge_init_config(mut config: Config, init: serde_json::Value) -> Config {
    match serde_json::from_value::<ConfigFile>(init) {
        Ok(parsed) => apply_config_file(&mut config, parsed),
        Err(err) => warn!(error:% = err; "Ignoring malformed init directive"),
    }
    config
}

fn apply_config_file(config: &mut Config, parsed: ConfigFile) {
    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "base" || theme_name == "default" || theme_name == "mermaid" {
            config.theme = Theme::mermaid_default();
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.title_font_size {
            config.theme.title_font_size = v;
        }
        if let Some(v) = vars.primary_text_color {
            config.theme.primary_text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
        if let Some(v) = vars.group_colors
            && !v.is_empty()
        {
            config.theme.group_colors = v;
        }
        if let Some(v) = vars.circle_fill_opacity {
            config.theme.circle_fill_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.marker_radius {
            config.theme.marker_radius = v;
        }
        if let Some(v) = vars.marker_fill {
            config.theme.marker_fill = v;
        }
        if let Some(v) = vars.marker_stroke {
            config.theme.marker_stroke = v;
        }
    }

    if let Some(venn) = parsed.venn {
        if let Some(v) = venn.min_distance {
            config.layout.venn.min_distance = v.max(0.0);
        }
        if let Some(v) = venn.max_iterations {
            config.layout.venn.max_iterations = v;
        }
        if let Some(v) = venn.overlap_margin {
            config.layout.venn.overlap_margin = v.max(0.0);
        }
        if let Some([x, y]) = venn.unassigned_anchor {
            config.layout.venn.unassigned_anchor_x = x;
            config.layout.venn.unassigned_anchor_y = y;
        }
        if let Some(v) = venn.ring_radius_fraction {
            config.layout.venn.ring_radius_fraction = v;
        }
        if let Some(v) = venn.ring_edge_fraction {
            config.layout.venn.ring_edge_fraction = v;
        }
        if let Some(v) = venn.solo_offset_fraction {
            config.layout.venn.solo_offset_fraction = v;
        }
        if let Some(v) = venn.intersection_spread {
            config.layout.venn.intersection_spread = v;
        }
        if let Some(v) = venn.label_offset {
            config.layout.labels.offset = v;
        }
        if let Some(v) = venn.empty_message {
            config.layout.empty_message = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_single_ring_radius() {
        let venn = VennConfig::default();
        assert!((venn.single_ring_radius(30.0) - 12.6).abs() < 1e-4);
    }

    #[test]
    fn init_directive_overrides_theme_and_venn() {
        let init = json!({
            "theme": "modern",
            "themeVariables": { "fontSize": 5.5, "groupColors": ["#111111"] },
            "venn": { "minDistance": 9, "maxIterations": 10, "unassignedAnchor": [90, 10] }
        });
        let config = merge_init_config(Config::default(), init);
        assert_eq!(config.theme.font_size, 5.5);
        assert_eq!(config.theme.group_colors, vec!["#111111".to_string()]);
        assert_eq!(config.layout.venn.min_distance, 9.0);
        assert_eq!(config.layout.venn.max_iterations, 10);
        assert_eq!(config.layout.venn.unassigned_anchor_x, 90.0);
        assert_eq!(config.layout.venn.unassigned_anchor_y, 10.0);
    }

    #[test]
    fn malformed_init_directive_is_ignored() {
        let config = merge_init_config(Config::default(), json!({ "venn": { "minDistance": "far" } }));
        assert_eq!(config.layout.venn.min_distance, VennConfig::default().min_distance);
    }

    #[test]
    fn load_config_without_path_is_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.venn.max_iterations, 50);
        assert_eq!(config.render.background, config.theme.background);
    }
}
