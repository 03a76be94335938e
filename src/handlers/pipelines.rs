//! # Pipelines Handler
//!
//! A pipeline entry names a workflow repository and optionally carries a
//! `params` mapping.  Params cannot be passed inline, so they are written
//! to a temporary YAML file referenced with `--params-file`.

use crate::client::TowerClient;
use crate::config::ArgSet;
use crate::errors::HandlerError;
use crate::handlers::shared::{take_params, write_params_file};

const BLOCK: &str = "pipelines";

/// Handles one `pipelines` entry.
///
/// Issues `tw pipelines add <url> <flags...> [--params-file <tmp>]`.
pub fn handle_pipelines(client: &TowerClient, mut args: ArgSet) -> Result<(), HandlerError> {
    let url = match args.take_string(BLOCK, "url").transpose()? {
        Some(url) => url,
        None => {
            return Err(HandlerError::MissingField {
                block: BLOCK.to_string(),
                field: "url".to_string(),
            });
        }
    };
    let params = take_params(&mut args, BLOCK)?;

    let mut argv = vec![BLOCK.to_string(), "add".to_string(), url];
    argv.extend(args.to_flags(BLOCK)?);
    // The handle must stay alive until the invocation returns; tw reads
    // the file while running.
    let _params_file = match params {
        Some(mapping) => {
            let file = write_params_file(&mapping)?;
            argv.push("--params-file".to_string());
            argv.push(file.path().display().to_string());
            Some(file)
        }
        None => None,
    };
    client.run(&argv)?;
    Ok(())
}
