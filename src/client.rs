//! # Tower CLI Client
//!
//! This module wraps invocations of the platform's `tw` command line client.
//! All remote effects go through [`TowerClient`], which prepends the global
//! options shared by every call and delegates the actual execution to a
//! [`CommandRunner`].
//!
//! Three runners are provided:
//!
//! - **TwProcess**: spawns the real `tw` binary and captures its output
//! - **DryRun**: logs the command that would run and reports success
//! - **RecordingRunner**: captures argv for inspection, used by tests

use std::sync::{Arc, Mutex};

use crate::errors::ClientError;

/// Captured output of one tw invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    /// Exit status, if the process exited normally.
    pub status: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl RunOutput {
    /// A successful invocation that produced no output.
    pub fn empty_success() -> Self {
        RunOutput {
            status: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Renders a command line for logs and error messages.
///
/// Arguments containing whitespace are single-quoted so the rendered string
/// can be pasted back into a shell while debugging.
pub fn render_command(binary: &str, args: &[String]) -> String {
    let mut rendered = String::from(binary);
    for arg in args {
        rendered.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            rendered.push('\'');
            rendered.push_str(arg);
            rendered.push('\'');
        } else {
            rendered.push_str(arg);
        }
    }
    rendered
}

/// Executes one command invocation.
///
/// Implementors must be thread-safe; the dispatcher itself is sequential but
/// runners are shared by reference with test harnesses.
pub trait CommandRunner: Send + Sync {
    /// Runs `binary` with `args` and captures its output.
    ///
    /// # Returns
    /// * `Ok(RunOutput)` - The process exited with status zero
    /// * `Err(ClientError::Spawn)` - The process could not be started
    /// * `Err(ClientError::NonZeroExit)` - The process reported failure
    fn run(&self, binary: &str, args: &[String]) -> Result<RunOutput, ClientError>;
}

/// Runs commands by spawning a real subprocess.
#[derive(Debug, Default)]
pub struct TwProcess;

impl TwProcess {
    /// Creates a new subprocess runner.
    pub fn new() -> Self {
        TwProcess
    }
}

impl CommandRunner for TwProcess {
    fn run(&self, binary: &str, args: &[String]) -> Result<RunOutput, ClientError> {
        let rendered = render_command(binary, args);
        tracing::debug!("running {}", rendered);
        let output = std::process::Command::new(binary)
            .args(args)
            .output()
            .map_err(|e| ClientError::Spawn {
                command: rendered.clone(),
                message: e.to_string(),
            })?;
        let run = RunOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !output.status.success() {
            return Err(ClientError::NonZeroExit {
                command: rendered,
                status: run.status,
                stderr: run.stderr,
            });
        }
        if !run.stdout.is_empty() {
            tracing::debug!("{}", run.stdout.trim_end());
        }
        Ok(run)
    }
}

/// Logs commands instead of running them.
///
/// Every invocation is reported at info level and succeeds, so a dry run
/// walks the whole seed file and shows exactly what a real run would do.
#[derive(Debug, Default)]
pub struct DryRun;

impl DryRun {
    /// Creates a new dry-run runner.
    pub fn new() -> Self {
        DryRun
    }
}

impl CommandRunner for DryRun {
    fn run(&self, binary: &str, args: &[String]) -> Result<RunOutput, ClientError> {
        tracing::info!("DRYRUN: {}", render_command(binary, args));
        Ok(RunOutput::empty_success())
    }
}

/// Records every invocation without spawning anything.
///
/// Used by the test suites to assert on exact argv sequences, and by the
/// doctests in this crate.  A substring-based failure can be injected to
/// exercise error paths.  Clones share the same recording, so a test can
/// hand one clone to a [`TowerClient`] and inspect the other afterwards.
#[derive(Clone, Default)]
pub struct RecordingRunner {
    commands: Arc<Mutex<Vec<Vec<String>>>>,
    fail_matching: Arc<Mutex<Option<String>>>,
}

impl RecordingRunner {
    /// Creates a new recorder with no recorded commands.
    pub fn new() -> Self {
        RecordingRunner {
            commands: Arc::new(Mutex::new(Vec::new())),
            fail_matching: Arc::new(Mutex::new(None)),
        }
    }

    /// Makes every subsequent invocation whose argv contains `needle` fail.
    pub fn fail_matching(&self, needle: &str) {
        *self.fail_matching.lock().unwrap() = Some(needle.to_string());
    }

    /// Returns all recorded invocations, binary included, in call order.
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, binary: &str, args: &[String]) -> Result<RunOutput, ClientError> {
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(binary.to_string());
        argv.extend(args.iter().cloned());
        let needle = self.fail_matching.lock().unwrap().clone();
        self.commands.lock().unwrap().push(argv.clone());
        if let Some(needle) = needle {
            if argv.iter().any(|a| a.contains(&needle)) {
                return Err(ClientError::NonZeroExit {
                    command: render_command(binary, args),
                    status: Some(1),
                    stderr: "injected failure".to_string(),
                });
            }
        }
        Ok(RunOutput::empty_success())
    }
}

/// Client handle for the tw CLI.
///
/// Owns the binary name, the global options prepended to every call, and
/// the runner that executes commands.  Handlers never touch the runner
/// directly; they pass subcommand argv to [`TowerClient::run`].
pub struct TowerClient {
    binary: String,
    global_opts: Vec<String>,
    runner: Box<dyn CommandRunner>,
}

impl TowerClient {
    /// Creates a client that invokes `tw` with no global options.
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        TowerClient {
            binary: "tw".to_string(),
            global_opts: Vec::new(),
            runner,
        }
    }

    /// Replaces the binary name, e.g. for a pinned path to tw.
    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    /// Sets global options inserted before every subcommand.
    pub fn with_global_opts(mut self, opts: Vec<String>) -> Self {
        self.global_opts = opts;
        self
    }

    /// Runs one tw subcommand.
    ///
    /// `args` is the subcommand argv, e.g. `["organizations", "add",
    /// "--name", "acme"]`.  Global options are prepended before dispatch.
    pub fn run(&self, args: &[String]) -> Result<RunOutput, ClientError> {
        let mut full = Vec::with_capacity(self.global_opts.len() + args.len());
        full.extend(self.global_opts.iter().cloned());
        full.extend(args.iter().cloned());
        self.runner.run(&self.binary, &full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn render_plain_arguments() {
        assert_eq!(
            render_command("tw", &argv(&["organizations", "add", "--name", "acme"])),
            "tw organizations add --name acme"
        );
    }

    #[test]
    fn render_quotes_whitespace_and_empty() {
        assert_eq!(
            render_command("tw", &argv(&["--description", "my lab", ""])),
            "tw --description 'my lab' ''"
        );
    }

    #[test]
    fn client_prepends_global_opts() {
        let runner = RecordingRunner::new();
        let client =
            TowerClient::new(Box::new(runner.clone())).with_global_opts(argv(&["-o", "json"]));
        client.run(&argv(&["datasets", "add"])).unwrap();
        assert_eq!(
            runner.commands(),
            vec![argv(&["tw", "-o", "json", "datasets", "add"])]
        );
    }

    #[test]
    fn recorder_injects_failures() {
        let runner = RecordingRunner::new();
        runner.fail_matching("boom");
        assert!(runner.run("tw", &argv(&["ok"])).is_ok());
        let err = runner.run("tw", &argv(&["boom"])).unwrap_err();
        assert!(matches!(err, ClientError::NonZeroExit { .. }));
        // Failed invocations are still recorded.
        assert_eq!(runner.commands().len(), 2);
    }

    #[test]
    fn custom_binary_name() {
        let runner = RecordingRunner::new();
        let client = TowerClient::new(Box::new(runner.clone())).with_binary("/opt/tw/tw");
        client.run(&argv(&["info"])).unwrap();
        assert_eq!(runner.commands(), vec![argv(&["/opt/tw/tw", "info"])]);
    }
}
