//! # Compute Environments Handler
//!
//! Compute environments arrive two ways: exported JSON taken by
//! `tw compute-envs import <path>`, or inline platform parameters taken by
//! `tw compute-envs add <type>`.  An entry picks its route with `file-path`
//! or `type`; `file-path` wins when both are present.

use crate::client::TowerClient;
use crate::config::ArgSet;
use crate::errors::HandlerError;

const BLOCK: &str = "compute-envs";

/// Handles one `compute-envs` entry.
pub fn handle_compute_envs(client: &TowerClient, mut args: ArgSet) -> Result<(), HandlerError> {
    let file_path = args.take_string(BLOCK, "file-path").transpose()?;
    let subtype = args.take_string(BLOCK, "type").transpose()?;

    let mut argv = vec![BLOCK.to_string()];
    match (file_path, subtype) {
        (Some(path), _) => {
            argv.push("import".to_string());
            argv.push(path);
        }
        (None, Some(subtype)) => {
            argv.push("add".to_string());
            argv.extend(subtype.split_whitespace().map(|s| s.to_string()));
        }
        (None, None) => {
            return Err(HandlerError::MissingField {
                block: BLOCK.to_string(),
                field: "type".to_string(),
            });
        }
    }
    argv.extend(args.to_flags(BLOCK)?);
    client.run(&argv)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecordingRunner;

    fn run(yaml: &str) -> Result<Vec<Vec<String>>, HandlerError> {
        let runner = RecordingRunner::new();
        let client = TowerClient::new(Box::new(runner.clone()));
        let args: ArgSet = serde_yml::from_str(yaml).unwrap();
        handle_compute_envs(&client, args)?;
        Ok(runner.commands())
    }

    #[test]
    fn file_path_routes_to_import() {
        let commands =
            run("file-path: ./ce.json\nname: my-ce\nworkspace: acme/showcase\n").unwrap();
        assert_eq!(
            commands[0],
            vec![
                "tw",
                "compute-envs",
                "import",
                "./ce.json",
                "--name",
                "my-ce",
                "--workspace",
                "acme/showcase"
            ]
        );
    }

    #[test]
    fn type_routes_to_add_with_positional_tokens() {
        let commands = run("type: aws-batch forge\nname: my-ce\nmax-cpus: 8\n").unwrap();
        assert_eq!(
            commands[0],
            vec![
                "tw",
                "compute-envs",
                "add",
                "aws-batch",
                "forge",
                "--name",
                "my-ce",
                "--max-cpus",
                "8"
            ]
        );
    }

    #[test]
    fn file_path_wins_over_type() {
        let commands = run("file-path: ./ce.json\ntype: aws-batch\nname: my-ce\n").unwrap();
        assert_eq!(
            commands[0],
            vec!["tw", "compute-envs", "import", "./ce.json", "--name", "my-ce"]
        );
    }

    #[test]
    fn neither_route_is_an_error_with_no_calls() {
        let runner = RecordingRunner::new();
        let client = TowerClient::new(Box::new(runner.clone()));
        let args: ArgSet = serde_yml::from_str("name: my-ce\n").unwrap();
        let err = handle_compute_envs(&client, args).unwrap_err();
        assert!(matches!(err, HandlerError::MissingField { .. }));
        assert!(runner.commands().is_empty());
    }
}
