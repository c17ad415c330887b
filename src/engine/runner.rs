use duct::cmd;
use std::io::{ErrorKind, Read};
use thiserror::Error;

/// Why a single update step did not succeed.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read the output of {program}: {source}")]
    Read {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("exited with {}: {}", describe_code(.code), .stderr.trim())]
    Failed { code: Option<i32>, stderr: String },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "a signal".to_string(),
    }
}

/// Captured result of one subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutput {
    pub stdout: String,
}

/// Runs one command to completion. Stdout is handed to `on_output` as it
/// arrives, so prompts are visible while the command waits on stdin, and is
/// also returned whole, even when the command fails.
pub trait CommandRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_output: &mut dyn FnMut(&str),
    ) -> (StepOutput, Option<StepError>);
}

/// Runner backed by real subprocesses. Stdin stays attached to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_output: &mut dyn FnMut(&str),
    ) -> (StepOutput, Option<StepError>) {
        let mut reader = match cmd(program, args).stderr_capture().unchecked().reader() {
            Ok(reader) => reader,
            Err(source) => {
                return (
                    StepOutput::default(),
                    Some(StepError::Spawn {
                        program: program.to_string(),
                        source,
                    }),
                );
            }
        };

        let mut stdout = String::new();
        let mut pending = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    pending.extend_from_slice(&buf[..n]);
                    let text = take_utf8(&mut pending);
                    if !text.is_empty() {
                        on_output(&text);
                        stdout.push_str(&text);
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(source) => {
                    let error = StepError::Read {
                        program: program.to_string(),
                        source,
                    };
                    return (StepOutput { stdout }, Some(error));
                }
            }
        }
        if !pending.is_empty() {
            let text = String::from_utf8_lossy(&pending).into_owned();
            on_output(&text);
            stdout.push_str(&text);
        }

        // EOF on stdout means duct has already reaped the child
        let error = match reader.try_wait() {
            Ok(Some(output)) => (!output.status.success()).then(|| StepError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(None) => Some(StepError::Read {
                program: program.to_string(),
                source: std::io::Error::other("output closed before the process exited"),
            }),
            Err(source) => Some(StepError::Read {
                program: program.to_string(),
                source,
            }),
        };
        (StepOutput { stdout }, error)
    }
}

/// Drain the longest valid UTF-8 prefix of `pending`, keeping a trailing
/// incomplete character for the next read.
fn take_utf8(pending: &mut Vec<u8>) -> String {
    let valid = match std::str::from_utf8(pending) {
        Ok(_) => pending.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(_) => {
            let text = String::from_utf8_lossy(pending).into_owned();
            pending.clear();
            return text;
        }
    };
    let rest = pending.split_off(valid);
    let text = String::from_utf8_lossy(pending).into_owned();
    *pending = rest;
    text
}
