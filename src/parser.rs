use crate::ir::Diagram;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static INIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^%%\{\s*init\s*:\s*(\{.*\})\s*\}%%").unwrap());
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^venn(?:\s+title\s+(?P<title>.+))?\s*$").unwrap());
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^title\s+(?P<title>.+)$").unwrap());
static GROUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^group\s+(?P<id>[^\s"]+)(?:\s+"(?P<label>[^"]*)")?(?:\s+(?P<color>[^\s"]+))?\s*$"#,
    )
    .unwrap()
});
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^entity\s+(?P<id>[^\s":]+)(?:\s+"(?P<label>[^"]*)")?\s*(?::(?P<members>.*))?$"#,
    )
    .unwrap()
});

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input contains no diagram")]
    Empty,
    #[error("line {line}: expected `venn` header, found `{found}`")]
    MissingHeader { line: usize, found: String },
    #[error("line {line}: malformed {statement} statement `{text}`")]
    InvalidStatement {
        line: usize,
        statement: &'static str,
        text: String,
    },
    #[error("line {line}: unknown statement `{text}`")]
    UnknownStatement { line: usize, text: String },
    #[error("invalid JSON diagram: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub diagram: Diagram,
    pub init_config: Option<serde_json::Value>,
}

/// Parses either the JSON form (input starting with `{`) or the text form.
pub fn parse_diagram(input: &str) -> Result<ParseOutput, ParseError> {
    if input.trim_start().starts_with('{') {
        parse_json(input)
    } else {
        parse_venn(input)
    }
}

pub fn parse_json(input: &str) -> Result<ParseOutput, ParseError> {
    let diagram: Diagram = serde_json::from_str(input)?;
    Ok(ParseOutput {
        diagram,
        init_config: None,
    })
}

pub fn parse_venn(input: &str) -> Result<ParseOutput, ParseError> {
    let (lines, init_config) = preprocess_input(input);
    let mut lines = lines.into_iter();
    let Some((header_line, header)) = lines.next() else {
        return Err(ParseError::Empty);
    };
    let Some(caps) = HEADER_RE.captures(&header) else {
        return Err(ParseError::MissingHeader {
            line: header_line,
            found: header.clone(),
        });
    };

    let mut diagram = Diagram::new();
    if let Some(title) = caps.name("title") {
        diagram.title = Some(strip_quotes(title.as_str().trim()));
    }

    for (line_no, line) in lines {
        let keyword = line
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        match keyword.as_str() {
            "title" => {
                let caps = TITLE_RE
                    .captures(&line)
                    .ok_or_else(|| invalid(line_no, "title", &line))?;
                diagram.title = Some(strip_quotes(caps["title"].trim()));
            }
            "group" => {
                let caps = GROUP_RE
                    .captures(&line)
                    .ok_or_else(|| invalid(line_no, "group", &line))?;
                let label = caps.name("label").map(|m| m.as_str().to_string());
                let color = caps.name("color").map(|m| m.as_str().to_string());
                diagram.ensure_group(&caps["id"], label, color);
            }
            "entity" => {
                let caps = ENTITY_RE
                    .captures(&line)
                    .ok_or_else(|| invalid(line_no, "entity", &line))?;
                let label = caps.name("label").map(|m| m.as_str().to_string());
                let membership = caps
                    .name("members")
                    .map(|m| split_members(m.as_str()))
                    .unwrap_or_default();
                diagram.ensure_entity(&caps["id"], label, membership);
            }
            _ => {
                return Err(ParseError::UnknownStatement {
                    line: line_no,
                    text: line,
                });
            }
        }
    }

    Ok(ParseOutput {
        diagram,
        init_config,
    })
}

fn invalid(line: usize, statement: &'static str, text: &str) -> ParseError {
    ParseError::InvalidStatement {
        line,
        statement,
        text: text.to_string(),
    }
}

/// Significant lines with their 1-based line numbers, plus the last init directive.
fn preprocess_input(input: &str) -> (Vec<(usize, String)>, Option<serde_json::Value>) {
    let mut init_config: Option<serde_json::Value> = None;
    let mut lines = Vec::new();

    for (idx, raw_line) in input.lines().enumerate() {
        let trimmed_line = raw_line.trim();
        if trimmed_line.is_empty() {
            continue;
        }
        if let Some(caps) = INIT_RE.captures(trimmed_line) {
            if let Some(json_str) = caps.get(1).map(|m| m.as_str()) {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str) {
                    init_config = Some(value);
                } else {
                    match json5::from_str::<serde_json::Value>(json_str) {
                        Ok(value) => init_config = Some(value),
                        Err(err) => warn!(
                            line = idx + 1,
                            error:% = err;
                            "Ignoring init directive that is neither JSON nor JSON5"
                        ),
                    }
                }
            }
            continue;
        }
        if trimmed_line.starts_with("%%") {
            continue;
        }
        let without_comment = strip_trailing_comment(trimmed_line);
        if without_comment.is_empty() {
            continue;
        }
        lines.push((idx + 1, without_comment));
    }

    (lines, init_config)
}

fn strip_trailing_comment(line: &str) -> String {
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();
    let mut out = String::new();
    while let Some(ch) = chars.next() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            out.push(ch);
            continue;
        }
        if ch == '"' {
            quote = Some(ch);
            out.push(ch);
            continue;
        }
        if ch == '%'
            && let Some('%') = chars.peek().copied()
        {
            break;
        }
        out.push(ch);
    }
    out.trim_end().to_string()
}

fn split_members(raw: &str) -> Vec<String> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .map(|part| strip_quotes(part.trim()))
        .filter(|part| !part.is_empty())
        .collect()
}

fn strip_quotes(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        return trimmed[1..trimmed.len() - 1].to_string();
    }
    trimmed.to_string()
}
