//! Federator Service Layer
//!
//! The service holds the authenticated directory client and exposes the role and schema
//! operations used by the CLI. Each operation fetches the current remote state, works on
//! it in memory and submits the result; nothing is cached between calls.

use crate::google::DirectoryClient;
use log::debug;
use std::fmt;

/// Main service struct that holds the directory client and provides business logic operations
pub struct FederatorService<C> {
    pub(crate) directory: C,
}

impl<C: DirectoryClient> FederatorService<C> {
    pub fn new(directory: C) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &C {
        &self.directory
    }

    // role operations are implemented in user.rs
    // schema operations are implemented in schema.rs
}

/// Progress of a single mutating command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandState {
    Validating,
    Fetching,
    Mutating,
    Patching,
    Done,
    Failed,
}

impl fmt::Display for CommandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Fetching => "fetching",
            Self::Mutating => "mutating",
            Self::Patching => "patching",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub(crate) fn transition(operation: &str, user_key: &str, state: CommandState) {
    debug!("{operation} [{user_key}]: {state}");
}
