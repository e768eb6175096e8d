//! Command execution. Everything here returns the lines to print so the
//! binary stays a thin wrapper and commands can be tested directly.

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info_span};
use typeheal_common::{Diagnostic, DiagnosticCategory};
use typeheal_parser::{parse_identifier, stringify};
use typeheal_resolver::{
    DiagnosticCollector, OnMiss, Resolution, ResolveError, ResolveOptions, TracingLogger,
};

use crate::cli::args::{CliArgs, Command, ResolveArgs};
use crate::cli::config::load_universe;
use crate::cli::reporter::Reporter;

pub const EXIT_SUCCESS: i32 = 0;
/// Some identifier failed to parse or resolve.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Default)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub exit_code: i32,
}

impl CommandOutput {
    fn fail(&mut self) {
        self.exit_code = EXIT_FAILURE;
    }
}

/// Per-identifier result of `typeheal resolve --json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub input: String,
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    pub rewrites: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolveReport {
    fn new(input: &str, result: &Result<Resolution, ResolveError>) -> Self {
        match result {
            Ok(resolution) => ResolveReport {
                input: input.to_string(),
                resolved: resolution.is_resolved(),
                canonical: Some(resolution.canonical.clone()),
                rewrites: resolution.rewrites,
                error: None,
            },
            Err(err) => ResolveReport {
                input: input.to_string(),
                resolved: false,
                canonical: None,
                rewrites: 0,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Serialize)]
struct JsonResolveOutput<'a> {
    results: &'a [ResolveReport],
    warnings: &'a [Diagnostic],
}

pub fn run(args: &CliArgs, color: bool) -> Result<CommandOutput> {
    let reporter = Reporter::new(color);
    match &args.command {
        Command::Parse(ids) => parse_identifiers(&ids.identifiers, &reporter),
        Command::Canonicalize(ids) => Ok(canonicalize(&ids.identifiers, &reporter)),
        Command::Resolve(resolve_args) => resolve(resolve_args, &reporter),
    }
}

pub fn parse_identifiers(identifiers: &[String], reporter: &Reporter) -> Result<CommandOutput> {
    let mut output = CommandOutput::default();
    for raw in identifiers {
        match parse_identifier(raw) {
            Ok(descriptor) => output.lines.push(
                serde_json::to_string_pretty(&descriptor)
                    .context("failed to serialize descriptor")?,
            ),
            Err(err) => {
                output
                    .lines
                    .push(reporter.format_diagnostic(&err.to_diagnostic(raw)));
                output.fail();
            }
        }
    }
    Ok(output)
}

pub fn canonicalize(identifiers: &[String], reporter: &Reporter) -> CommandOutput {
    let mut output = CommandOutput::default();
    for raw in identifiers {
        match parse_identifier(raw) {
            Ok(descriptor) => output.lines.push(stringify(&descriptor)),
            Err(err) => {
                output
                    .lines
                    .push(reporter.format_diagnostic(&err.to_diagnostic(raw)));
                output.fail();
            }
        }
    }
    output
}

pub fn resolve(args: &ResolveArgs, reporter: &Reporter) -> Result<CommandOutput> {
    let loaded = load_universe(&args.universe)?;
    debug!(
        modules = loaded.universe.module_count(),
        types = loaded.universe.type_count(),
        "universe loaded"
    );

    let mut options =
        ResolveOptions::default().with_ambiguity_reports(!args.no_ambiguity_warnings);
    if args.ignore_case {
        options = options.ignore_case();
    }
    let on_miss = if args.fail_on_miss {
        OnMiss::Fail
    } else {
        OnMiss::Absent
    };

    let collector = Arc::new(DiagnosticCollector::new());
    let engine = loaded
        .engine(options)
        .with_logger(Arc::new((TracingLogger, Arc::clone(&collector))));

    let resolve_all = || -> Vec<Result<Resolution, ResolveError>> {
        let _span = info_span!("resolve_batch", identifiers = args.identifiers.len()).entered();
        args.identifiers
            .par_iter()
            .map(|raw| engine.parse_and_resolve(raw, on_miss))
            .collect()
    };
    let results = match args.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to start resolver worker pool")?
            .install(resolve_all),
        None => resolve_all(),
    };

    let mut warnings: Vec<Diagnostic> = collector
        .take()
        .into_iter()
        .filter(|d| d.category == DiagnosticCategory::Warning)
        .collect();
    warnings.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    warnings.dedup();

    let mut output = CommandOutput::default();
    if results
        .iter()
        .any(|result| !matches!(result, Ok(resolution) if resolution.is_resolved()))
    {
        output.fail();
    }

    if args.json {
        let reports: Vec<ResolveReport> = args
            .identifiers
            .iter()
            .zip(&results)
            .map(|(raw, result)| ResolveReport::new(raw, result))
            .collect();
        let json = serde_json::to_string_pretty(&JsonResolveOutput {
            results: &reports,
            warnings: &warnings,
        })
        .context("failed to serialize resolve results")?;
        output.lines.push(json);
        return Ok(output);
    }

    for (raw, result) in args.identifiers.iter().zip(&results) {
        output.lines.push(match result {
            Ok(resolution) => reporter.format_resolution(raw, resolution),
            Err(err) => reporter.format_failure(raw, err),
        });
    }
    output
        .lines
        .extend(warnings.iter().map(|d| reporter.format_diagnostic(d)));
    Ok(output)
}
