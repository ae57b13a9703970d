//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use gwconf_config::ConfigError;
use gwconf_core::{CoreError, StoreError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const STORE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(gwconf::not_found),
        help("Run: gwconf {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(
        code(gwconf::conflict),
        help("Pick a different identifier, or edit the existing one with: gwconf gateways edit {identifier} identity")
    )]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── Store ────────────────────────────────────────────────────────
    #[error("Store rejected the request: {message}")]
    #[diagnostic(code(gwconf::store))]
    Store { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gwconf::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gwconf::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: gwconf config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(gwconf::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write configuration: {0}")]
    #[diagnostic(code(gwconf::config_write))]
    ConfigWrite(String),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' needs an interactive terminal")]
    #[diagnostic(
        code(gwconf::not_interactive),
        help("Pass the values with --set KEY=VALUE to run without prompts.")
    )]
    NotInteractive { action: String },

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(gwconf::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(gwconf::prompt))]
    Prompt(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(gwconf::render))]
    Render(String),

    #[error("Invalid inventory file {path}: {reason}")]
    #[diagnostic(
        code(gwconf::inventory),
        help("The inventory is a JSON object with \"gateways\" and \"enodebs\" maps.")
    )]
    Inventory { path: String, reason: String },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Store { .. } => exit_code::STORE,
            Self::Validation { .. }
            | Self::NotInteractive { .. }
            | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::GatewayExists { id } => Self::Conflict {
                resource_type: "gateway".into(),
                identifier: id,
            },
            CoreError::GatewayNotFound { id } => Self::NotFound {
                resource_type: "gateway".into(),
                identifier: id,
                list_command: "gateways list".into(),
            },
            CoreError::ValidationFailed { field, reason } => Self::Validation { field, reason },
            CoreError::SectionLocked { section } => Self::Validation {
                field: "section".into(),
                reason: format!("{section} is not available in this session"),
            },
            CoreError::SessionClosed => Self::Validation {
                field: "session".into(),
                reason: "the edit session is already closed".into(),
            },
            CoreError::Store(err) => err.into(),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Store {
            message: err.user_message(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Figment(err) => Self::Config(err),
            ConfigError::Io(err) => Self::Io(err),
            ConfigError::Serialization(err) => Self::ConfigWrite(err.to_string()),
        }
    }
}
