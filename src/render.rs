use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{GroupLayout, LabelSide, VennLayout};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

const LABEL_PATH_PREFIX: &str = "venn-label-";

/// Renders a layout as a standalone SVG document. The viewBox covers the
/// 0-100 plane plus `render.viewport_padding` on every side.
pub fn render_svg(
    layout: &VennLayout,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> String {
    let mut svg = String::new();
    let width = render.width.max(1.0);
    let height = render.height.max(1.0);
    let pad = render.viewport_padding.max(0.0);
    // 0.0 - pad keeps a zero padding from printing as "-0".
    let min = 0.0 - pad;
    let span = 100.0 + pad * 2.0;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{width}\" height=\"{height}\" viewBox=\"{min} {min} {span} {span}\">",
    ));
    svg.push_str(&format!(
        "<rect x=\"{min}\" y=\"{min}\" width=\"{span}\" height=\"{span}\" fill=\"{}\"/>",
        escape_xml(&render.background)
    ));

    if let Some(title) = &layout.title {
        svg.push_str(&format!(
            "<text class=\"venn-title\" x=\"50\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
            min + theme.title_font_size * 1.2,
            escape_xml(&theme.font_family),
            theme.title_font_size,
            escape_xml(&theme.primary_text_color),
            escape_xml(title)
        ));
    }

    if layout.is_empty() {
        svg.push_str(&format!(
            "<text class=\"venn-empty\" x=\"50\" y=\"50\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            escape_xml(&theme.font_family),
            theme.font_size,
            escape_xml(&theme.primary_text_color),
            escape_xml(&config.empty_message)
        ));
    } else {
        svg.push_str("<defs>");
        for (idx, group) in layout.groups.iter().enumerate() {
            svg.push_str(&format!(
                "<path id=\"{LABEL_PATH_PREFIX}{idx}\" d=\"{}\" fill=\"none\"/>",
                group.label_curve.to_svg_path()
            ));
        }
        svg.push_str("</defs>");

        for group in &layout.groups {
            svg.push_str(&circle_svg(group, theme));
        }
        for (idx, group) in layout.groups.iter().enumerate() {
            svg.push_str(&label_svg(idx, group, theme, config));
        }
    }

    for entity in &layout.entities {
        let position = &entity.position;
        svg.push_str(&format!(
            "<circle class=\"venn-marker\" data-zone=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"><title>{}</title></circle>",
            escape_xml(&position.zone_key),
            position.x,
            position.y,
            theme.marker_radius,
            escape_xml(&theme.marker_fill),
            escape_xml(&theme.marker_stroke),
            theme.marker_stroke_width,
            escape_xml(&entity.label)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn circle_svg(group: &GroupLayout, theme: &Theme) -> String {
    let circle = &group.circle;
    format!(
        "<circle class=\"venn-group\" data-group=\"{}\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        escape_xml(&group.id),
        circle.x,
        circle.y,
        circle.r,
        escape_xml(&group.color),
        theme.circle_fill_opacity,
        escape_xml(&group.color),
        theme.circle_stroke_width
    )
}

fn label_svg(idx: usize, group: &GroupLayout, theme: &Theme, config: &LayoutConfig) -> String {
    // Text sits on the left of the path direction; the bottom arc needs it below.
    let baseline = match group.label_curve.side {
        LabelSide::Bottom => " dominant-baseline=\"hanging\"",
        _ => "",
    };
    format!(
        "<text class=\"venn-label\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\"{baseline}><textPath href=\"#{LABEL_PATH_PREFIX}{idx}\" xlink:href=\"#{LABEL_PATH_PREFIX}{idx}\" startOffset=\"{}%\" text-anchor=\"middle\">{}</textPath></text>",
        escape_xml(&theme.font_family),
        theme.font_size,
        escape_xml(&theme.primary_text_color),
        config.labels.start_offset_percent,
        escape_xml(&group.label)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid output size {}x{}", render_cfg.width, render_cfg.height))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Diagram;
    use crate::layout::compute_layout;

    fn render(diagram: &Diagram) -> String {
        let theme = Theme::modern();
        let config = LayoutConfig::default();
        let layout = compute_layout(diagram, &theme, &config);
        render_svg(&layout, &theme, &config, &RenderConfig::default())
    }

    #[test]
    fn render_svg_basic() {
        let mut diagram = Diagram::new();
        diagram.title = Some("Friends & Family".to_string());
        diagram.ensure_group("fam", Some("Family".to_string()), None);
        diagram.ensure_group("fr", Some("Friends".to_string()), None);
        diagram.ensure_entity("a", Some("<Alice>".to_string()), vec!["fam".into(), "fr".into()]);
        let svg = render(&diagram);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("viewBox=\"-15 -15 130 130\""));
        assert_eq!(svg.matches("class=\"venn-group\"").count(), 2);
        assert_eq!(svg.matches("<textPath").count(), 2);
        assert!(svg.contains("href=\"#venn-label-1\""));
        assert!(svg.contains(">Family</textPath>"));
        assert!(svg.contains("Friends &amp; Family"));
        assert!(svg.contains("<title>&lt;Alice&gt;</title>"));
        assert!(svg.contains("data-zone=\"fam+fr\""));
    }

    #[test]
    fn empty_layout_renders_message() {
        let mut diagram = Diagram::new();
        diagram.ensure_entity("loner", None, Vec::new());
        let svg = render(&diagram);
        assert!(svg.contains("No groups to display"));
        assert!(!svg.contains("venn-group"));
        assert!(!svg.contains("<defs>"));
        assert_eq!(svg.matches("venn-marker").count(), 1);
    }

    #[test]
    fn bottom_labels_hang_below_arc() {
        let mut diagram = Diagram::new();
        for id in ["top", "left", "right", "bottom"] {
            diagram.ensure_group(id, None, None);
        }
        let svg = render(&diagram);
        assert_eq!(svg.matches("dominant-baseline=\"hanging\"").count(), 1);
    }

    #[test]
    fn theme_colors_are_escaped_in_attributes() {
        let mut diagram = Diagram::new();
        diagram.title = Some("T".to_string());
        diagram.ensure_group("a", None, None);
        diagram.ensure_entity("x", None, vec!["a".to_string()]);
        let mut theme = Theme::modern();
        theme.primary_text_color = "red\" onload=\"x".to_string();
        theme.marker_fill = "#fff\"".to_string();
        theme.marker_stroke = "<b>".to_string();
        let config = LayoutConfig::default();
        let render = RenderConfig {
            background: "white\"".to_string(),
            ..Default::default()
        };
        let layout = compute_layout(&diagram, &theme, &config);
        let svg = render_svg(&layout, &theme, &config, &render);
        assert!(!svg.contains("onload=\""));
        assert!(svg.contains("fill=\"red&quot; onload=&quot;x\""));
        assert!(svg.contains("fill=\"white&quot;\""));
        assert!(svg.contains("fill=\"#fff&quot;\""));
        assert!(svg.contains("stroke=\"&lt;b&gt;\""));
    }

    #[test]
    fn escape_xml_covers_markup() {
        assert_eq!(escape_xml("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
    }
}
