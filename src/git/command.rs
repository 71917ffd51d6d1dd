use crate::error::{Result, ScmError};
use crate::git::{ScmBackend, DESCRIBE_MATCH};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Exit status of `git remote get-url` for an unknown remote
const NO_SUCH_REMOTE: i32 = 2;

/// Queries git by spawning the `git` executable
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: String,
}

impl GitCommand {
    /// Use `git` from `PATH`
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific executable
    pub fn with_program(program: impl Into<String>) -> Self {
        GitCommand {
            program: program.into(),
        }
    }

    fn output(&self, root: &Path, args: &[&str]) -> Result<Output> {
        tracing::debug!("running git command: {}", args.join(" "));

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(root)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        Ok(output)
    }

    fn failure(&self, args: &[&str], output: &Output) -> ScmError {
        ScmError::Command {
            command: format!("{} {}", self.program, args.join(" ")),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Run a git command, returning stdout without its trailing newline
    ///
    /// Any non-zero exit code is an error carrying the command's stderr.
    fn run(&self, root: &Path, args: &[&str]) -> Result<String> {
        let output = self.output(root, args)?;

        if !output.status.success() {
            return Err(self.failure(args, &output));
        }

        stdout_text(args, output.stdout)
    }
}

/// Decode command output, rejecting bytes that are not UTF-8
fn stdout_text(args: &[&str], stdout: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(stdout).map_err(|e| {
        ScmError::descriptor(format!(
            "git {} printed invalid UTF-8: {}",
            args.join(" "),
            e
        ))
    })?;

    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}

impl Default for GitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ScmBackend for GitCommand {
    fn is_available(&self) -> bool {
        let status = Command::new(&self.program)
            .arg("help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!("cannot run {}: {}", self.program, e);
                false
            }
        }
    }

    fn describe(&self, root: &Path) -> Result<String> {
        self.run(
            root,
            &[
                "describe",
                "--dirty",
                "--tags",
                "--long",
                "--match",
                DESCRIBE_MATCH,
            ],
        )
    }

    fn revision(&self, root: &Path) -> Result<String> {
        self.run(root, &["rev-parse", "HEAD"])
    }

    fn remote_url(&self, root: &Path, remote: &str) -> Result<Option<String>> {
        let args = ["remote", "get-url", remote];
        let output = self.output(root, &args)?;

        match output.status.code() {
            Some(0) => stdout_text(&args, output.stdout).map(Some),
            Some(NO_SUCH_REMOTE) => {
                tracing::debug!(
                    "no url for remote '{}': {}",
                    remote,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Ok(None)
            }
            _ => Err(self.failure(&args, &output)),
        }
    }

    fn branch(&self, root: &Path) -> Result<String> {
        self.run(root, &["rev-parse", "--abbrev-ref", "HEAD"])
    }
}
