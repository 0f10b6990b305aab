//! Remote actions
//!
//! A single step of a bootstrap plan, consumed in order by an external
//! executor.

use serde::{Deserialize, Serialize};

/// One remote step with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Human readable description shown by the executor
    pub name: String,

    #[serde(flatten)]
    pub kind: ActionKind,
}

/// What an action does on the remote node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionKind {
    /// Run a shell command
    Command {
        command: String,

        /// User to escalate to before running the command
        #[serde(
            rename = "commandSudo",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        sudo: Option<String>,
    },

    /// Copy a file from the remote node to the local machine
    Download { source: String, destination: String },
}

impl Action {
    /// Creates a command action run as the connecting user.
    pub fn command(name: impl Into<String>, command: impl Into<String>) -> Self {
        let command = command.into();
        debug_assert!(!command.is_empty(), "command action requires command text");
        Self {
            name: name.into(),
            kind: ActionKind::Command { command, sudo: None },
        }
    }

    /// Creates a command action run as `user`.
    pub fn sudo_command(
        name: impl Into<String>,
        command: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        let command = command.into();
        debug_assert!(!command.is_empty(), "command action requires command text");
        Self {
            name: name.into(),
            kind: ActionKind::Command {
                command,
                sudo: Some(user.into()),
            },
        }
    }

    /// Creates a download action retrieving `source` to `destination`.
    pub fn download(
        name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        let (source, destination) = (source.into(), destination.into());
        debug_assert!(
            !source.is_empty() && !destination.is_empty(),
            "download action requires a source and destination"
        );
        Self {
            name: name.into(),
            kind: ActionKind::Download { source, destination },
        }
    }

    /// Command text, `None` for downloads.
    #[must_use]
    pub fn command_text(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Command { command, .. } => Some(command),
            ActionKind::Download { .. } => None,
        }
    }

    /// Whether this action copies a file back instead of running a command.
    #[must_use]
    pub fn is_download(&self) -> bool {
        matches!(self.kind, ActionKind::Download { .. })
    }
}
