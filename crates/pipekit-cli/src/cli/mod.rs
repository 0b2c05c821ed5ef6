//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pipekit",
    bin_name = "pipekit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f9f0} Pipeline component registry",
    long_about = "pipekit tracks the modules and subworkflows installed into a \
                  pipeline project and removes them with dependency-aware cascades.",
    after_help = "EXAMPLES:\n\
        \x20 pipekit modules list\n\
        \x20 pipekit modules remove fastqc\n\
        \x20 pipekit subworkflows remove align_reads\n\
        \x20 pipekit check --fix\n\
        \x20 pipekit completions bash > /usr/share/bash-completion/completions/pipekit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage installed pipeline modules.
    #[command(
        subcommand,
        visible_alias = "m",
        about = "Manage installed modules",
        after_help = "EXAMPLES:\n\
            \x20 pipekit modules list\n\
            \x20 pipekit modules info fastqc\n\
            \x20 pipekit modules remove fastqc"
    )]
    Modules(ComponentCommands),

    /// Manage installed pipeline subworkflows.
    #[command(
        subcommand,
        visible_alias = "sw",
        about = "Manage installed subworkflows",
        after_help = "EXAMPLES:\n\
            \x20 pipekit subworkflows list\n\
            \x20 pipekit subworkflows remove align_reads"
    )]
    Subworkflows(ComponentCommands),

    /// Audit registry and component-tree consistency.
    #[command(
        about = "Check registry/filesystem consistency",
        after_help = "EXAMPLES:\n\
            \x20 pipekit check\n\
            \x20 pipekit check --fix"
    )]
    Check(CheckArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pipekit completions bash > ~/.local/share/bash-completion/completions/pipekit\n\
            \x20 pipekit completions zsh  > ~/.zfunc/_pipekit\n\
            \x20 pipekit completions fish > ~/.config/fish/completions/pipekit.fish"
    )]
    Completions(CompletionsArgs),
}

/// Subcommands shared by `modules` and `subworkflows`.
#[derive(Debug, Subcommand)]
pub enum ComponentCommands {
    /// Remove an installed component and its unreferenced dependents.
    #[command(
        visible_alias = "rm",
        about = "Remove a component (cascades through dependents)"
    )]
    Remove(RemoveArgs),

    /// List installed components.
    #[command(visible_alias = "ls", about = "List installed components")]
    List(ListArgs),

    /// Show one component's registry record.
    #[command(about = "Show a component's registry record")]
    Info(InfoArgs),
}

// ── remove ────────────────────────────────────────────────────────────────────

/// Arguments for `pipekit {modules,subworkflows} remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Component to remove.  Prompted interactively when omitted.
    #[arg(value_name = "NAME", help = "Component name")]
    pub name: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation and remove immediately")]
    pub yes: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `pipekit {modules,subworkflows} list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── info ──────────────────────────────────────────────────────────────────────

/// Arguments for `pipekit {modules,subworkflows} info`.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Component name.
    #[arg(value_name = "NAME", help = "Component name")]
    pub name: String,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `pipekit check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Drop registry entries whose files are gone.
    #[arg(long = "fix", help = "Purge stale registry entries")]
    pub fix: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pipekit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
