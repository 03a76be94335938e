//! # Teams Handler
//!
//! A team entry creates the team and then enrolls each listed member with
//! a separate `tw teams members add` call, because the platform CLI has no
//! way to pass members at creation time.

use crate::client::TowerClient;
use crate::config::ArgSet;
use crate::errors::HandlerError;
use crate::handlers::shared::{require_get_string, take_scalar_list};

const BLOCK: &str = "teams";

/// Handles one `teams` entry.
///
/// Issues `tw teams add <flags...>`, then one
/// `tw teams members add --team <name> --organization <org> --member <m>`
/// per member.  When members are listed, `name` and `organization` are
/// required before anything is issued; a half-created team with no way to
/// address its members is worse than a clean failure.
pub fn handle_teams(client: &TowerClient, mut args: ArgSet) -> Result<(), HandlerError> {
    let members = take_scalar_list(&mut args, BLOCK, "members")?;
    let context = if members.is_empty() {
        None
    } else {
        let team = require_get_string(&args, BLOCK, "name")?;
        let organization = require_get_string(&args, BLOCK, "organization")?;
        Some((team, organization))
    };

    let mut argv = vec![BLOCK.to_string(), "add".to_string()];
    argv.extend(args.to_flags(BLOCK)?);
    client.run(&argv)?;

    if let Some((team, organization)) = context {
        for member in members {
            let member_argv: Vec<String> = [
                "teams",
                "members",
                "add",
                "--team",
                team.as_str(),
                "--organization",
                organization.as_str(),
                "--member",
                member.as_str(),
            ]
            .iter()
            .map(|s| s.to_string())
            .collect();
            client.run(&member_argv)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecordingRunner;

    fn harness() -> (RecordingRunner, TowerClient) {
        let runner = RecordingRunner::new();
        let client = TowerClient::new(Box::new(runner.clone()));
        (runner, client)
    }

    #[test]
    fn team_without_members_is_a_single_add() {
        let (runner, client) = harness();
        let args: ArgSet = serde_yml::from_str("name: devs\norganization: acme\n").unwrap();
        handle_teams(&client, args).unwrap();
        assert_eq!(
            runner.commands(),
            vec![vec!["tw", "teams", "add", "--name", "devs", "--organization", "acme"]]
        );
    }

    #[test]
    fn members_become_follow_up_calls_in_order() {
        let (runner, client) = harness();
        let args: ArgSet = serde_yml::from_str(
            "name: devs\norganization: acme\nmembers:\n  - ada@acme.io\n  - grace@acme.io\n",
        )
        .unwrap();
        handle_teams(&client, args).unwrap();
        let commands = runner.commands();
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[0],
            vec!["tw", "teams", "add", "--name", "devs", "--organization", "acme"]
        );
        assert_eq!(
            commands[1],
            vec![
                "tw",
                "teams",
                "members",
                "add",
                "--team",
                "devs",
                "--organization",
                "acme",
                "--member",
                "ada@acme.io"
            ]
        );
        assert_eq!(
            commands[2],
            vec![
                "tw",
                "teams",
                "members",
                "add",
                "--team",
                "devs",
                "--organization",
                "acme",
                "--member",
                "grace@acme.io"
            ]
        );
    }

    #[test]
    fn members_without_organization_issue_nothing() {
        let (runner, client) = harness();
        let args: ArgSet =
            serde_yml::from_str("name: devs\nmembers:\n  - ada@acme.io\n").unwrap();
        let err = handle_teams(&client, args).unwrap_err();
        assert!(matches!(
            err,
            HandlerError::MissingField { field, .. } if field == "organization"
        ));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn failed_member_add_stops_remaining_members() {
        let (runner, client) = harness();
        runner.fail_matching("ada@acme.io");
        let args: ArgSet = serde_yml::from_str(
            "name: devs\norganization: acme\nmembers:\n  - ada@acme.io\n  - grace@acme.io\n",
        )
        .unwrap();
        assert!(handle_teams(&client, args).is_err());
        // The team add and the failing member call, nothing after.
        assert_eq!(runner.commands().len(), 2);
    }
}
