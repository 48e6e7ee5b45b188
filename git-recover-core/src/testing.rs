//! Scripted [`GitBackend`] for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::backend::GitBackend;
use crate::error::BackendError;

/// Answers git invocations from a table keyed by the joined argument list and
/// records every call it receives.
///
/// Unscripted commands fail with a non-zero exit, like an unknown revision would.
#[derive(Default)]
pub struct ScriptedGit {
    responses: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, args: &str, stdout: &str) -> Self {
        self.responses.insert(args.to_owned(), Ok(stdout.to_owned()));
        self
    }

    pub fn fail(mut self, args: &str, stderr: &str) -> Self {
        self.responses.insert(args.to_owned(), Err(stderr.to_owned()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl GitBackend for ScriptedGit {
    fn run(&self, args: &[&str]) -> Result<String, BackendError> {
        let command = args.join(" ");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }
        match self.responses.get(&command) {
            Some(Ok(stdout)) => Ok(stdout.trim().to_owned()),
            Some(Err(stderr)) => Err(BackendError::Failed {
                command,
                status: "exit status: 128".to_owned(),
                output: stderr.clone(),
            }),
            None => Err(BackendError::Failed {
                command,
                status: "exit status: 128".to_owned(),
                output: "fatal: unscripted command".to_owned(),
            }),
        }
    }
}
