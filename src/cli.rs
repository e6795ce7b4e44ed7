use crate::config::{Config, load_config, merge_init_config};
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::{parse_diagram, parse_json};
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "vennr", version, about = "Venn-style set-membership diagram renderer")]
pub struct Args {
    /// Input file (.venn, .json or .md) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, venn)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width", default_value_t = 800.0)]
    pub width: f32,

    /// Height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f32,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "logLevel", default_value = "warn")]
    pub log_level: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    Source,
    Json,
    Markdown,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:? = args; "Parsed arguments");

    let mut base_config = load_config(args.config.as_deref())?;
    base_config.render.width = args.width;
    base_config.render.height = args.height;

    let (input, kind) = read_input(args.input.as_deref())?;
    let diagrams = match kind {
        InputKind::Markdown => extract_venn_blocks(&input),
        InputKind::Source | InputKind::Json => vec![input],
    };

    if diagrams.is_empty() {
        return Err(anyhow::anyhow!("No venn diagrams found in input"));
    }

    if diagrams.len() == 1 {
        return render_one(
            &diagrams[0],
            kind,
            &base_config,
            args.output_format,
            args.output.as_deref(),
        );
    }

    // Multiple diagrams (Markdown input)
    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, diagrams.len())?;
    for (idx, diagram) in diagrams.iter().enumerate() {
        render_one(
            diagram,
            kind,
            &base_config,
            args.output_format,
            Some(&outputs[idx]),
        )?;
    }
    info!(count = diagrams.len(); "Rendered markdown diagrams");

    Ok(())
}

fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    // A second init (tests, embedding) keeps the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .try_init();
}

fn render_one(
    source: &str,
    kind: InputKind,
    base_config: &Config,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let parsed = match kind {
        InputKind::Json => parse_json(source)?,
        InputKind::Source | InputKind::Markdown => parse_diagram(source)?,
    };
    let mut config = base_config.clone();
    if let Some(init_cfg) = parsed.init_config {
        config = merge_init_config(config, init_cfg);
    }
    let layout = compute_layout(&parsed.diagram, &config.theme, &config.layout);
    match format {
        OutputFormat::Json => match output {
            Some(path) => write_layout_dump(path, &layout)?,
            None => println!("{}", LayoutDump::from_layout(&layout).to_json()?),
        },
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
            write_output_svg(&svg, output)?;
        }
        OutputFormat::Png => {
            let output = output
                .ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
            write_png(&svg, output, &config)?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    crate::render::write_output_png(svg, output, &config.render)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<(String, InputKind)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, InputKind::Source));
        }
        let content = std::fs::read_to_string(path)?;
        let kind = match path.extension().and_then(|e| e.to_str()) {
            Some("md" | "markdown") => InputKind::Markdown,
            Some("json") => InputKind::Json,
            _ => InputKind::Source,
        };
        return Ok((content, kind));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, InputKind::Source))
}

fn extract_venn_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut in_block = false;
    let mut current = Vec::new();
    let mut fence = String::new();

    for line in input.lines() {
        let trimmed = line.trim();
        if !in_block {
            if let Some(start_fence) = detect_venn_fence(trimmed) {
                in_block = true;
                fence = start_fence;
                continue;
            }
        } else if is_fence_end(trimmed, &fence) {
            in_block = false;
            blocks.push(current.join("\n"));
            current.clear();
            continue;
        }

        if in_block {
            current.push(line.to_string());
        }
    }

    blocks
}

fn detect_venn_fence(line: &str) -> Option<String> {
    for marker in ["```", "~~~"] {
        if line.starts_with(marker) {
            let rest = line.trim_start_matches(marker.chars().next()?).trim();
            if rest.starts_with("venn") {
                return Some(marker.to_string());
            }
        }
    }
    None
}

fn is_fence_end(line: &str, fence: &str) -> bool {
    if !line.starts_with(fence) {
        return false;
    }
    line[fence.len()..].trim().is_empty()
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for markdown input"))?;
    if base.is_dir() {
        let mut outputs = Vec::new();
        for idx in 0..count {
            outputs.push(base.join(format!("diagram-{}.{}", idx + 1, ext)));
        }
        return Ok(outputs);
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("diagram");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    let mut outputs = Vec::new();
    for idx in 0..count {
        outputs.push(parent.join(format!("{}-{}.{}", stem, idx + 1, ext)));
    }
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_venn_blocks() {
        let input = r#"
text
``` venn
venn
  group a
```
```rust
fn main() {}
```
~~~venn
venn
  group b
~~~
"#;
        let blocks = extract_venn_blocks(input);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("group a"));
        assert!(blocks[1].contains("group b"));
    }

    #[test]
    fn multi_outputs_are_numbered() {
        let outputs =
            resolve_multi_outputs(Some(Path::new("out/diagram.svg")), OutputFormat::Json, 2)
                .unwrap();
        assert_eq!(
            outputs,
            vec![
                PathBuf::from("out/diagram-1.json"),
                PathBuf::from("out/diagram-2.json")
            ]
        );
        assert!(resolve_multi_outputs(None, OutputFormat::Svg, 2).is_err());
    }

    #[test]
    fn args_parse_formats_and_log_level() {
        let args = Args::try_parse_from([
            "vennr",
            "-i",
            "in.venn",
            "-e",
            "json",
            "--logLevel",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.log_level, "debug");
        assert_eq!(args.width, 800.0);
    }
}
