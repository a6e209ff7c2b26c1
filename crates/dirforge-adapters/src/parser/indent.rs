//! Indentation-based tree descriptions.
//!
//! # Format
//!
//! ```text
//! # comments and blank lines are ignored
//! project/
//!     src
//!         bin
//!     docs        # trailing comments need whitespace before '#'
//! ```
//!
//! The first indented line fixes the indent unit (spaces or tabs, never
//! both). Every other indent must be a multiple of it, and a line may sit
//! at most one level deeper than the line before.

use tracing::trace;

use dirforge_core::{
    application::ports::TreeParser,
    domain::{ConfigFormat, DirectoryTree, DomainError, DomainValidator, TreeNode},
    error::DirforgeResult,
};

/// Parser for indentation-based text.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentParser;

impl IndentParser {
    pub fn new() -> Self {
        Self
    }
}

impl TreeParser for IndentParser {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Indent
    }

    fn parse(&self, source: &str) -> DirforgeResult<DirectoryTree> {
        Ok(parse_indented(source)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndentChar {
    Space,
    Tab,
}

impl IndentChar {
    fn of(c: char) -> Self {
        if c == '\t' { Self::Tab } else { Self::Space }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Space => "spaces",
            Self::Tab => "tabs",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct IndentStyle {
    ch: IndentChar,
    unit: usize,
}

fn parse_indented(source: &str) -> Result<DirectoryTree, DomainError> {
    let mut tree = DirectoryTree::new();
    // Open nodes from the current root down to the most recent line.
    let mut stack: Vec<TreeNode> = Vec::new();
    let mut style: Option<IndentStyle> = None;

    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;

        let content = line.trim_start_matches([' ', '\t']);
        let name = strip_comment(content).trim_end();
        if name.is_empty() {
            continue;
        }

        let indent = &line[..line.len() - content.len()];
        let depth = measure(indent, &mut style, line_no)?;

        if depth > stack.len() {
            return Err(DomainError::SyntaxAt {
                line: line_no,
                reason: if stack.is_empty() {
                    "the first entry must not be indented".into()
                } else {
                    format!("indented too deeply (level {depth}, expected at most {})", stack.len())
                },
            });
        }

        while stack.len() > depth {
            close_node(&mut stack, &mut tree);
        }

        let name = name.strip_suffix('/').unwrap_or(name).trim_end();
        DomainValidator::validate_name(name).map_err(|e| DomainError::SyntaxAt {
            line: line_no,
            reason: e.to_string(),
        })?;

        trace!(line = line_no, depth, name, "Parsed entry");
        stack.push(TreeNode::new(name));
    }

    while !stack.is_empty() {
        close_node(&mut stack, &mut tree);
    }

    Ok(tree)
}

/// Full-line comments start with `#`; trailing ones need whitespace first so
/// names like `C#` survive.
fn strip_comment(content: &str) -> &str {
    if content.starts_with('#') {
        return "";
    }
    let mut after_space = false;
    for (i, c) in content.char_indices() {
        if c == '#' && after_space {
            return &content[..i];
        }
        after_space = c.is_whitespace();
    }
    content
}

fn measure(
    indent: &str,
    style: &mut Option<IndentStyle>,
    line: usize,
) -> Result<usize, DomainError> {
    let Some(first) = indent.chars().next() else {
        return Ok(0);
    };

    let ch = IndentChar::of(first);
    if indent.chars().any(|c| IndentChar::of(c) != ch) {
        return Err(DomainError::SyntaxAt {
            line,
            reason: "indentation mixes tabs and spaces".into(),
        });
    }

    let width = indent.chars().count();
    let style = style.get_or_insert(IndentStyle { ch, unit: width });

    if style.ch != ch {
        return Err(DomainError::SyntaxAt {
            line,
            reason: format!(
                "indented with {} but the file is indented with {}",
                ch.describe(),
                style.ch.describe()
            ),
        });
    }

    if width % style.unit != 0 {
        return Err(DomainError::SyntaxAt {
            line,
            reason: format!(
                "indentation of {width} is not a multiple of {}",
                style.unit
            ),
        });
    }

    Ok(width / style.unit)
}

fn close_node(stack: &mut Vec<TreeNode>, tree: &mut DirectoryTree) {
    if let Some(node) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.add_child(node),
            None => tree.add_root(node),
        }
    }
}
