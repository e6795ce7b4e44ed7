//! Deterministic layout and rendering of Venn-style set-membership diagrams.
//!
//! Groups become circles picked from fixed templates (a grid above seven
//! groups), entities become markers placed by membership zone and pushed apart
//! until they no longer overlap. Every surface in this crate, SVG, PNG and the
//! JSON dump alike, goes through [`compute_layout`].

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, VennConfig, load_config, merge_init_config};
pub use ir::{Diagram, Entity, Group};
pub use layout::{
    CircleDescriptor, EntityPosition, LabelCurve, LabelSide, VennLayout, best_label_side,
    compute_layout, label_path, resolve_overlaps, select_template, zone_key,
};
pub use parser::{ParseError, parse_diagram, parse_json, parse_venn};
pub use render::render_svg;
pub use theme::Theme;

/// Theme and configuration for one-call rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn mermaid_default() -> Self {
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

    pub fn modern() -> Self {
        let theme = Theme::modern();
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

impl Default for RenderOptions {
    fn default() -> Self {
        Self::modern()
    }
}

impl From<Config> for RenderOptions {
    fn from(config: Config) -> Self {
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
        }
    }
}

impl From<RenderOptions> for Config {
    fn from(options: RenderOptions) -> Self {
        Self {
            theme: options.theme,
            layout: options.layout,
            render: options.render,
        }
    }
}

/// Parses `input` (text or JSON form) and renders it to SVG with the modern theme.
pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_options(input, RenderOptions::default())
}

/// Parses `input` and renders it to SVG. An init directive in the source is
/// layered over `options`.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let parsed = parse_diagram(input)?;
    let mut config: Config = options.into();
    if let Some(init) = parsed.init_config {
        config = merge_init_config(config, init);
    }
    let layout = compute_layout(&parsed.diagram, &config.theme, &config.layout);
    Ok(render_svg(
        &layout,
        &config.theme,
        &config.layout,
        &config.render,
    ))
}
