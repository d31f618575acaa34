use crate::error::{BashUtilsError, Result};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Anything that can produce the help text of a program.
pub trait HelpSource {
    fn capture(&self, program: &str, help_flag: &str) -> Result<String>;
}

/// Runs the program and captures its standard output. Blocks until the
/// child exits; no timeout is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandHelpSource;

impl CommandHelpSource {
    pub fn new() -> Self {
        Self
    }
}

impl HelpSource for CommandHelpSource {
    fn capture(&self, program: &str, help_flag: &str) -> Result<String> {
        log::info!("running {} {}", program, help_flag);

        let output = Command::new(program)
            .arg(help_flag)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => BashUtilsError::ProgramNotFound {
                    program: program.to_string(),
                },
                _ => BashUtilsError::Io(e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            if stdout.trim().is_empty() {
                return Err(BashUtilsError::ProgramFailed {
                    program: program.to_string(),
                    status: output.status.to_string(),
                });
            }
            log::warn!(
                "{} {} exited with {}; parsing its output anyway",
                program,
                help_flag,
                output.status
            );
        }

        log::debug!("captured {} bytes of help text", stdout.len());
        Ok(stdout)
    }
}

/// Fixed help text, for callers that already hold the output.
#[derive(Debug, Clone)]
pub struct StaticHelpSource {
    text: String,
}

impl StaticHelpSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl HelpSource for StaticHelpSource {
    fn capture(&self, _program: &str, _help_flag: &str) -> Result<String> {
        Ok(self.text.clone())
    }
}
