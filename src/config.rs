//! # Seed File Parsing
//!
//! This module turns a YAML seed file into an ordered [`SeedConfig`].  The
//! document root is a mapping from block names (`organizations`, `teams`,
//! ...) to lists of entries, and every entry is a mapping of tw flag names
//! to values.  Both block order and flag order are preserved exactly as
//! written, because the calls derived from them must happen in file order.

use serde_yml::{Mapping, Value};

use crate::errors::{ConfigError, HandlerError};

/// One entry within a block: the flag/value pairs for a single tw call.
///
/// The wrapped mapping keeps insertion order, so flags render in the order
/// the author wrote them.
///
/// # Examples
///
/// ```rust
/// use seedkit::ArgSet;
///
/// let args: ArgSet = serde_yml::from_str("name: acme\nwave: true\n").unwrap();
/// let flags = args.to_flags("organizations").unwrap();
/// assert_eq!(flags, vec!["--name", "acme", "--wave"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ArgSet(
    /// The underlying insertion-ordered mapping.
    pub Mapping,
);

impl ArgSet {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        ArgSet(Mapping::new())
    }

    /// True when the entry carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes and returns the value for `key`, if present.
    ///
    /// Removal shifts instead of swapping so the relative order of the
    /// remaining flags is unchanged.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Removes `key` and returns its value as a string.
    ///
    /// Strings pass through; numbers and booleans render with their YAML
    /// spelling.  Errors if the value is a list or mapping.
    pub fn take_string(&mut self, block: &str, key: &str) -> Option<Result<String, HandlerError>> {
        let value = self.take(key)?;
        Some(scalar_to_string(&value).ok_or_else(|| HandlerError::InvalidField {
            block: block.to_string(),
            field: key.to_string(),
            reason: "expected a scalar value".to_string(),
        }))
    }

    /// Like [`ArgSet::take_string`] but leaves the field in place.
    pub fn get_string(&self, block: &str, key: &str) -> Option<Result<String, HandlerError>> {
        let value = self.get(key)?;
        Some(scalar_to_string(value).ok_or_else(|| HandlerError::InvalidField {
            block: block.to_string(),
            field: key.to_string(),
            reason: "expected a scalar value".to_string(),
        }))
    }

    /// Flattens the remaining fields into tw command line flags.
    ///
    /// Rendering rules, in field order:
    /// - strings and numbers become `--key value`
    /// - `true` becomes a bare `--key`
    /// - `false` and null are omitted entirely
    /// - lists of scalars become `--key a,b,c`
    /// - nested mappings are rejected
    ///
    /// `block` is only used for error context.
    pub fn to_flags(&self, block: &str) -> Result<Vec<String>, HandlerError> {
        let mut flags = Vec::new();
        for (key, value) in &self.0 {
            let name = scalar_to_string(key).ok_or_else(|| HandlerError::InvalidField {
                block: block.to_string(),
                field: "<non-scalar key>".to_string(),
                reason: "flag names must be scalars".to_string(),
            })?;
            match value {
                Value::Null | Value::Bool(false) => {}
                Value::Bool(true) => {
                    flags.push(format!("--{}", name));
                }
                Value::String(s) => {
                    flags.push(format!("--{}", name));
                    flags.push(s.clone());
                }
                Value::Number(n) => {
                    flags.push(format!("--{}", name));
                    flags.push(n.to_string());
                }
                Value::Sequence(items) => {
                    let mut rendered = Vec::with_capacity(items.len());
                    for item in items {
                        let item =
                            scalar_to_string(item).ok_or_else(|| HandlerError::InvalidField {
                                block: block.to_string(),
                                field: name.clone(),
                                reason: "list items must be strings or numbers".to_string(),
                            })?;
                        rendered.push(item);
                    }
                    flags.push(format!("--{}", name));
                    flags.push(rendered.join(","));
                }
                Value::Mapping(_) | Value::Tagged(_) => {
                    return Err(HandlerError::InvalidField {
                        block: block.to_string(),
                        field: name,
                        reason: "nested mappings are not supported here".to_string(),
                    });
                }
            }
        }
        Ok(flags)
    }
}

/// Renders a scalar YAML value as a string, or None for non-scalars.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A named block and its entries, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedBlock {
    /// The block name, e.g. `organizations`.
    pub name: String,
    /// The entries listed under the block, in file order.
    pub entries: Vec<ArgSet>,
}

/// A parsed seed file: every block, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedConfig {
    /// The blocks of the document, in file order.
    pub blocks: Vec<SeedBlock>,
}

impl SeedConfig {
    /// True when the document defines no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Total number of entries across all blocks.
    pub fn entry_count(&self) -> usize {
        self.blocks.iter().map(|b| b.entries.len()).sum()
    }
}

/// Parses a seed document from YAML text.
///
/// `origin` names the source (usually a path) for error messages.  An empty
/// document and an empty mapping both yield an empty config, and a block
/// whose value is null has zero entries.
pub fn parse_document(text: &str, origin: &str) -> Result<SeedConfig, ConfigError> {
    let root: Value = serde_yml::from_str(text).map_err(|e| ConfigError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    let mapping = match root {
        Value::Null => return Ok(SeedConfig::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(ConfigError::NotAMapping),
    };
    let mut blocks = Vec::with_capacity(mapping.len());
    for (index, (key, value)) in mapping.into_iter().enumerate() {
        let name = scalar_to_string(&key).ok_or(ConfigError::BlockNameNotScalar { index })?;
        let items = match value {
            // An emptied-out block (`launch:` with every entry removed)
            // is a block with zero entries, not an error.
            Value::Null => Vec::new(),
            Value::Sequence(items) => items,
            _ => return Err(ConfigError::BlockNotASequence { block: name }),
        };
        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let Value::Mapping(entry) = item else {
                return Err(ConfigError::EntryNotAMapping { block: name, index });
            };
            entries.push(ArgSet(entry));
        }
        blocks.push(SeedBlock { name, entries });
    }
    Ok(SeedConfig { blocks })
}

/// Loads and parses the seed file at `path`.
pub fn load_config(path: &str) -> Result<SeedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_document(&content, path)
}
