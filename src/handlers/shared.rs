//! # Shared Handler Utilities
//!
//! This module provides field extraction and params-file helpers used
//! across the block handlers to reduce code duplication.

use std::io::Write;

use serde_yml::{Mapping, Value};
use tempfile::NamedTempFile;

use crate::config::ArgSet;
use crate::errors::HandlerError;

/// Reads a required scalar field without removing it.
///
/// # Arguments
/// * `args` - The entry being handled
/// * `block` - Block name for error context
/// * `key` - The required field
pub fn require_get_string(args: &ArgSet, block: &str, key: &str) -> Result<String, HandlerError> {
    match args.get_string(block, key) {
        Some(value) => value,
        None => Err(HandlerError::MissingField {
            block: block.to_string(),
            field: key.to_string(),
        }),
    }
}

/// Removes an optional list-of-scalars field, e.g. `members`.
///
/// Absent fields yield an empty list.  A present field must be a sequence
/// of strings or numbers.
pub fn take_scalar_list(
    args: &mut ArgSet,
    block: &str,
    key: &str,
) -> Result<Vec<String>, HandlerError> {
    let invalid = |reason: &str| HandlerError::InvalidField {
        block: block.to_string(),
        field: key.to_string(),
        reason: reason.to_string(),
    };
    match args.take(key) {
        None => Ok(Vec::new()),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(invalid("list items must be strings or numbers")),
            })
            .collect(),
        Some(_) => Err(invalid("expected a list")),
    }
}

/// Removes an optional `params` mapping.
pub fn take_params(args: &mut ArgSet, block: &str) -> Result<Option<Mapping>, HandlerError> {
    match args.take("params") {
        None => Ok(None),
        Some(Value::Mapping(mapping)) => Ok(Some(mapping)),
        Some(_) => Err(HandlerError::InvalidField {
            block: block.to_string(),
            field: "params".to_string(),
            reason: "expected a mapping of parameter names to values".to_string(),
        }),
    }
}

/// Writes a params mapping to a temporary YAML file.
///
/// The returned handle deletes the file on drop, so callers must keep it
/// alive until the tw invocation referencing it has returned.
pub fn write_params_file(params: &Mapping) -> Result<NamedTempFile, HandlerError> {
    let rendered = serde_yml::to_string(params).map_err(|e| HandlerError::ParamsFile {
        message: e.to_string(),
    })?;
    let mut file = tempfile::Builder::new()
        .prefix("seedkit-params-")
        .suffix(".yml")
        .tempfile()
        .map_err(|e| HandlerError::ParamsFile {
            message: e.to_string(),
        })?;
    file.write_all(rendered.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| HandlerError::ParamsFile {
            message: e.to_string(),
        })?;
    Ok(file)
}
