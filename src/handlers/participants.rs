//! # Participants Handler
//!
//! The platform CLI cannot set a participant's role at add time, so a
//! `role` field turns into a second `tw participants update` call.

use crate::client::TowerClient;
use crate::config::ArgSet;
use crate::errors::HandlerError;

const BLOCK: &str = "participants";

/// Handles one `participants` entry.
///
/// Issues `tw participants add <flags...>`, then, when a role was given,
/// `tw participants update <flags...> --role <role>` with the same flags.
pub fn handle_participants(client: &TowerClient, mut args: ArgSet) -> Result<(), HandlerError> {
    let role = args.take_string(BLOCK, "role").transpose()?;
    let flags = args.to_flags(BLOCK)?;

    let mut argv = vec![BLOCK.to_string(), "add".to_string()];
    argv.extend(flags.iter().cloned());
    client.run(&argv)?;

    if let Some(role) = role {
        let mut update = vec![BLOCK.to_string(), "update".to_string()];
        update.extend(flags);
        update.push("--role".to_string());
        update.push(role);
        client.run(&update)?;
    }
    Ok(())
}
