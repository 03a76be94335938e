//! # Generic Add Handler
//!
//! Most blocks map one entry to one `tw <block> add` call.  Two fields get
//! positional treatment because the platform CLI takes them positionally:
//! `type` (provider subtype, e.g. `google-batch`, possibly several tokens)
//! and `file-path` (datasets upload their source file).  Everything else
//! flattens to flags.

use crate::client::TowerClient;
use crate::config::ArgSet;
use crate::errors::HandlerError;

/// Handles one entry of a generic-add block.
///
/// Issues `tw <block> add [<type>] [<file-path>] <flags...>`.
pub fn handle_add(
    client: &TowerClient,
    block: &str,
    mut args: ArgSet,
) -> Result<(), HandlerError> {
    let mut argv = vec![block.to_string(), "add".to_string()];
    if let Some(subtype) = args.take_string(block, "type").transpose()? {
        argv.extend(subtype.split_whitespace().map(|s| s.to_string()));
    }
    if let Some(path) = args.take_string(block, "file-path").transpose()? {
        argv.push(path);
    }
    argv.extend(args.to_flags(block)?);
    client.run(&argv)?;
    Ok(())
}
