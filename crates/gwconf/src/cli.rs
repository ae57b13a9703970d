//! Clap derive structures for the `gwconf` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gwconf -- view and edit cellular gateway configuration
#[derive(Debug, Parser)]
#[command(
    name = "gwconf",
    version,
    about = "View and edit cellular gateway configuration",
    long_about = "Inspect gateway identity, EPC, RAN and aggregation settings, and\n\
        edit them section by section against a JSON inventory snapshot.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "GWCONF_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Inventory snapshot file (overrides profile)
    #[arg(long, short = 'i', env = "GWCONF_INVENTORY", global = true)]
    pub inventory: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GWCONF_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// View and edit gateways
    #[command(alias = "gw", alias = "g")]
    Gateways(GatewaysArgs),

    /// View the radio-unit (eNodeB) inventory
    #[command(alias = "enb")]
    Enodebs(EnodebsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Gateways ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GatewaysArgs {
    #[command(subcommand)]
    pub command: GatewaysCommand,
}

/// Configuration section of a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    /// Name, identifier, hardware and version
    Identity,
    /// Log and event aggregation
    Aggregation,
    /// Core network (NAT, IP block, DNS)
    Epc,
    /// Radio (PCI, transmit, eNodeBs)
    Ran,
}

#[derive(Debug, Subcommand)]
pub enum GatewaysCommand {
    /// List gateways
    #[command(alias = "ls")]
    List,

    /// Show the configuration panels of one gateway
    Show {
        /// Gateway ID
        id: String,
    },

    /// Add a gateway, walking through every section
    Add(EditFields),

    /// Edit a single section of a gateway
    Edit {
        /// Gateway ID
        id: String,

        /// Section to edit
        #[arg(value_enum)]
        section: SectionArg,

        #[command(flatten)]
        fields: EditFields,
    },

    /// Print the editable JSON document of a gateway
    Json {
        /// Gateway ID
        id: String,
    },

    /// Replace a gateway with an edited JSON document
    Apply {
        /// Gateway ID
        id: String,

        /// Path to the edited document
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct EditFields {
    /// Set a field without prompting (repeatable), e.g. --set dns_primary=8.8.8.8
    ///
    /// Keys: id, name, description, hardware_id, version, challenge_key,
    /// key_type, log_aggregation, event_aggregation, nat, ip_block,
    /// dns_primary, dns_secondary, pci, transmit, enodebs
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

// ── Enodebs ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EnodebsArgs {
    #[command(subcommand)]
    pub command: EnodebsCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnodebsCommand {
    /// List radio units
    #[command(alias = "ls")]
    List,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a value on the active profile
    Set {
        /// Profile key: inventory or network
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
