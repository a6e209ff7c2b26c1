//! YAML tree descriptions.
//!
//! ```yaml
//! project:
//!   permissions: "0755"
//!   owner: deploy:www
//!   default_files: [README.md, .gitkeep]
//!   subdirs:
//!     src:
//!     logs:
//!       permissions: 750
//! ```
//!
//! A node's value is either empty or a mapping of the four keys above.
//! `subdirs` may also be a list of names or single-entry mappings.

use tracing::trace;

use saphyr::{LoadableYamlNode, Scalar, Yaml};

use dirforge_core::{
    application::ports::TreeParser,
    domain::{ConfigFormat, DirectoryTree, DomainError, Mode, Owner, TreeNode},
    error::DirforgeResult,
};

const KEYS: &str = "permissions, owner, default_files, subdirs";

/// Parser for YAML tree descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlParser;

impl YamlParser {
    pub fn new() -> Self {
        Self
    }
}

impl TreeParser for YamlParser {
    fn format(&self) -> ConfigFormat {
        ConfigFormat::Yaml
    }

    fn parse(&self, source: &str) -> DirforgeResult<DirectoryTree> {
        Ok(parse_yaml(source)?)
    }
}

fn parse_yaml(source: &str) -> Result<DirectoryTree, DomainError> {
    let documents =
        Yaml::load_from_str(source).map_err(|e| DomainError::Syntax(e.to_string()))?;

    let mut tree = DirectoryTree::new();
    let Some(document) = documents.first() else {
        return Ok(tree);
    };
    if is_null(document) {
        return Ok(tree);
    }

    let top = document
        .as_mapping()
        .ok_or_else(|| syntax("the top level must map directory names to their settings"))?;

    for (key, value) in top.iter() {
        let name = node_name(key, "")?;
        let node = build_node(&name, value, &name)?;
        tree.add_root(node);
    }

    Ok(tree)
}

/// `path` is the slash-joined location used in error messages.
fn build_node(name: &str, body: &Yaml, path: &str) -> Result<TreeNode, DomainError> {
    let mut node = TreeNode::new(name);
    if is_null(body) {
        return Ok(node);
    }

    let settings = body.as_mapping().ok_or_else(|| {
        syntax(format!(
            "`{path}` must be empty or a mapping of {KEYS}, found {}",
            kind(body)
        ))
    })?;

    for (key, value) in settings.iter() {
        let key = key
            .as_str()
            .ok_or_else(|| syntax(format!("`{path}` has a non-string key")))?;

        match key {
            "permissions" => {
                let text = mode_text(value).ok_or_else(|| {
                    syntax(format!("`{path}`: permissions must be an octal string like \"0755\""))
                })?;
                node.set_permissions(text.parse::<Mode>()?);
            }
            "owner" => {
                let text = scalar_text(value).ok_or_else(|| {
                    syntax(format!("`{path}`: owner must be a string like \"user:group\""))
                })?;
                node.set_owner(text.parse::<Owner>()?);
            }
            "default_files" => {
                for file in file_names(value, path)? {
                    node.add_default_file(file);
                }
            }
            "subdirs" => {
                for child in children(value, path)? {
                    node.add_child(child);
                }
            }
            other => {
                return Err(syntax(format!(
                    "unknown key `{other}` under `{path}`; expected one of {KEYS}"
                )));
            }
        }
    }

    trace!(path, "Parsed node");
    Ok(node)
}

fn file_names(value: &Yaml, path: &str) -> Result<Vec<String>, DomainError> {
    if is_null(value) {
        return Ok(Vec::new());
    }
    if let Some(single) = scalar_text(value) {
        return Ok(vec![single]);
    }

    let items = value.as_sequence().ok_or_else(|| {
        syntax(format!(
            "`{path}`: default_files must be a list of file names, found {}",
            kind(value)
        ))
    })?;

    items
        .iter()
        .map(|item| {
            scalar_text(item).ok_or_else(|| {
                syntax(format!(
                    "`{path}`: default_files entries must be file names, found {}",
                    kind(item)
                ))
            })
        })
        .collect()
}

fn children(value: &Yaml, path: &str) -> Result<Vec<TreeNode>, DomainError> {
    if is_null(value) {
        return Ok(Vec::new());
    }

    if let Some(mapping) = value.as_mapping() {
        return mapping
            .iter()
            .map(|(key, body)| child(key, body, path))
            .collect();
    }

    let items = value.as_sequence().ok_or_else(|| {
        syntax(format!(
            "`{path}`: subdirs must be a mapping or a list, found {}",
            kind(value)
        ))
    })?;

    let mut nodes = Vec::with_capacity(items.len());
    for item in items {
        if let Some(entry) = item.as_mapping() {
            if entry.len() != 1 {
                return Err(syntax(format!(
                    "`{path}`: each subdirs list item must hold exactly one directory"
                )));
            }
            for (key, body) in entry.iter() {
                nodes.push(child(key, body, path)?);
            }
        } else {
            nodes.push(child(item, &Yaml::Value(Scalar::Null), path)?);
        }
    }
    Ok(nodes)
}

fn child(key: &Yaml, body: &Yaml, parent: &str) -> Result<TreeNode, DomainError> {
    let name = node_name(key, parent)?;
    let path = format!("{parent}/{name}");
    build_node(&name, body, &path)
}

fn node_name(key: &Yaml, parent: &str) -> Result<String, DomainError> {
    scalar_text(key).ok_or_else(|| {
        let location = if parent.is_empty() { "top level" } else { parent };
        syntax(format!(
            "directory names must be strings, found {} under {location}",
            kind(key)
        ))
    })
}

/// Strings and integers both stand for text; `750` and `"750"` mean the same.
fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::Value(Scalar::String(s)) => Some(s.to_string()),
        Yaml::Value(Scalar::Integer(i)) => Some(i.to_string()),
        _ => None,
    }
}

/// Unquoted `0070` loads as the integer 70; pad back to three digits so the
/// digits read as written.
fn mode_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::Value(Scalar::Integer(i)) if *i >= 0 => Some(format!("{i:03}")),
        Yaml::Value(Scalar::Integer(_)) => None,
        other => scalar_text(other),
    }
}

fn is_null(value: &Yaml) -> bool {
    matches!(value, Yaml::Value(Scalar::Null))
}

fn kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Value(Scalar::Null) => "nothing",
        Yaml::Value(Scalar::Boolean(_)) => "a boolean",
        Yaml::Value(Scalar::Integer(_)) => "an integer",
        Yaml::Value(Scalar::FloatingPoint(_)) => "a number",
        Yaml::Value(Scalar::String(_)) => "a string",
        Yaml::Sequence(_) => "a list",
        Yaml::Mapping(_) => "a mapping",
        _ => "an unsupported value",
    }
}

fn syntax(message: impl Into<String>) -> DomainError {
    DomainError::Syntax(message.into())
}
