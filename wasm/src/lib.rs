use serde::Deserialize;
use venn_rs_renderer::{RenderOptions, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VennRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
}

fn build_render_options(options: VennRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("default") {
        RenderOptions::mermaid_default()
    } else {
        RenderOptions::modern()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_venn_svg(code: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<VennRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        VennRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(code, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}
