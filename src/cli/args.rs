use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the typeheal binary.
#[derive(Parser, Debug)]
#[command(
    name = "typeheal",
    version,
    about = "Parse, canonicalize and heal serialized type identifiers"
)]
pub struct CliArgs {
    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the descriptor tree of each identifier as JSON.
    Parse(IdentifierArgs),
    /// Print each identifier in canonical form.
    Canonicalize(IdentifierArgs),
    /// Resolve identifiers against a universe manifest and print the healed form.
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
pub struct IdentifierArgs {
    /// Serialized type identifiers, e.g. "System.Int32, mscorlib".
    #[arg(required = true, value_name = "ID")]
    pub identifiers: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// JSON manifest describing the loaded modules and types.
    #[arg(short = 'u', long, value_name = "FILE")]
    pub universe: PathBuf,

    /// Match type names case-insensitively when scanning modules.
    #[arg(long = "ignore-case", alias = "ignoreCase")]
    pub ignore_case: bool,

    /// Stop at the first unresolved node of an identifier and report it as an error.
    #[arg(long = "fail-on-miss")]
    pub fail_on_miss: bool,

    /// Do not report type names found in more than one module.
    #[arg(long = "no-ambiguity-warnings")]
    pub no_ambiguity_warnings: bool,

    /// Print results as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Number of worker threads (defaults to one per core).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    #[arg(required = true, value_name = "ID")]
    pub identifiers: Vec<String>,
}
