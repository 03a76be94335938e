use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use seedkit::cli_utils::{self, LogLevel};
use seedkit::{
    Dispatcher, DryRun, FixedDelay, NoDelay, Pacer, TowerClient, TwProcess, format_cli_error,
    load_config, standard_registry,
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "Path to the YAML seed file")]
    config: Option<String>,
    #[arrrg(optional, "Log level: CRITICAL, ERROR, WARNING, INFO, or DEBUG")]
    log_level: Option<String>,
    #[arrrg(flag, "Print the tw commands without executing them")]
    dryrun: bool,
    #[arrrg(flag, "Pass '-o json' to every tw call")]
    json: bool,
    #[arrrg(optional, "Extra global options inserted into every tw call")]
    cli: Option<String>,
}

const USAGE: &str = "USAGE: seedkit [OPTIONS] --config <seed.yml>";

const HELP_TEXT: &str = r#"seedkit - seed a Nextflow Tower environment from YAML

USAGE:
    seedkit [OPTIONS] --config <seed.yml>

OPTIONS:
    --config <PATH>       YAML seed file describing the resources to create
    --log-level <LEVEL>   CRITICAL, ERROR, WARNING, INFO, or DEBUG [default: INFO]
    --dryrun              Print the tw commands without executing them
    --json                Pass '-o json' to every tw call
    --cli <OPTS>          Extra global options for every tw call, e.g. --cli "--insecure"

DESCRIPTION:
    Reads the seed file and creates each resource through the tw CLI, in
    file order, pausing between calls.  Authentication is tw's business:
    set TOWER_ACCESS_TOKEN (and TOWER_API_ENDPOINT when not on Tower
    cloud) before running.

    Block names map to tw subcommands.  organizations, workspaces,
    credentials, secrets, actions, and datasets use a plain 'tw <block>
    add'; teams, participants, compute-envs, pipelines, and launch have
    dedicated handling.  Entries that fail are logged and skipped; the
    run continues with the next entry."#;

fn main() {
    let (args, free) = Args::from_command_line(USAGE);

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return;
    }
    if !free.is_empty() {
        cli_utils::exit_with_usage_error(
            &format!("unexpected positional argument '{}'", free[0]),
            USAGE,
        );
    }

    let level = match &args.log_level {
        Some(name) => name
            .parse::<LogLevel>()
            .unwrap_or_else(|e| cli_utils::exit_with_usage_error(&e, USAGE)),
        None => LogLevel::default(),
    };
    cli_utils::init_logging(level);

    let Some(path) = args.config else {
        tracing::error!("No config file provided. Use --config <seed.yml>");
        return;
    };

    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", format_cli_error(&e));
            std::process::exit(1);
        }
    };

    let mut global_opts = Vec::new();
    if args.json {
        global_opts.push("-o".to_string());
        global_opts.push("json".to_string());
    }
    if let Some(cli) = &args.cli {
        global_opts.extend(cli.split_whitespace().map(|s| s.to_string()));
    }

    let client = if args.dryrun {
        TowerClient::new(Box::new(DryRun::new()))
    } else {
        TowerClient::new(Box::new(TwProcess::new()))
    }
    .with_global_opts(global_opts);

    // A dry run has no rate limit to respect, so it walks the file at
    // full speed.
    let pacer: Box<dyn Pacer> = if args.dryrun {
        Box::new(NoDelay)
    } else {
        Box::new(FixedDelay::default())
    };

    tracing::info!(
        "Seeding from '{}': {} blocks, {} entries",
        path,
        config.blocks.len(),
        config.entry_count()
    );
    let dispatcher = Dispatcher::new(standard_registry(), pacer);
    dispatcher.run(&client, &config);
}
