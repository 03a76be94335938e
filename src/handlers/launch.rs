//! # Launch Handler
//!
//! Launch entries start a workflow run from a saved pipeline (`pipeline`)
//! or straight from a repository (`url`).  Params files work exactly as in
//! the pipelines handler.

use crate::client::TowerClient;
use crate::config::ArgSet;
use crate::errors::HandlerError;
use crate::handlers::shared::{take_params, write_params_file};

const BLOCK: &str = "launch";

/// Handles one `launch` entry.
///
/// Issues `tw launch <pipeline|url> <flags...> [--params-file <tmp>]`.
pub fn handle_launch(client: &TowerClient, mut args: ArgSet) -> Result<(), HandlerError> {
    let pipeline = args.take_string(BLOCK, "pipeline").transpose()?;
    let url = args.take_string(BLOCK, "url").transpose()?;
    let target = match pipeline.or(url) {
        Some(target) => target,
        None => {
            return Err(HandlerError::MissingField {
                block: BLOCK.to_string(),
                field: "pipeline".to_string(),
            });
        }
    };
    let params = take_params(&mut args, BLOCK)?;

    let mut argv = vec![BLOCK.to_string(), target];
    argv.extend(args.to_flags(BLOCK)?);
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
