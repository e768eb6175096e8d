use colored::Colorize;
use typeheal_common::{Diagnostic, DiagnosticCategory};
use typeheal_resolver::{Resolution, ResolveError};

/// Renders command results as terminal lines.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// `ok`, `healed` or `miss`, followed by the identifier.
    pub fn format_resolution(&self, raw: &str, resolution: &Resolution) -> String {
        if !resolution.is_resolved() {
            return format!("{} {raw}", self.paint("miss", Tone::Error));
        }
        if resolution.was_rewritten() {
            format!(
                "{} {raw} -> {}",
                self.paint("healed", Tone::Warning),
                resolution.canonical
            )
        } else {
            format!("{} {}", self.paint("ok", Tone::Success), resolution.canonical)
        }
    }

    pub fn format_failure(&self, raw: &str, err: &ResolveError) -> String {
        self.format_diagnostic(&err.to_diagnostic(raw))
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let label = match diagnostic.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };
        let tone = match diagnostic.category {
            DiagnosticCategory::Error => Tone::Error,
            DiagnosticCategory::Warning => Tone::Warning,
            DiagnosticCategory::Message => Tone::Info,
        };
        let code = format!("TH{}", diagnostic.code);
        let code = if self.color {
            code.bright_blue().to_string()
        } else {
            code
        };
        format!(
            "{} - {} {code}: {}",
            diagnostic.identifier,
            self.paint(label, tone),
            diagnostic.message_text
        )
    }

    fn paint(&self, label: &str, tone: Tone) -> String {
        if !self.color {
            return label.to_string();
        }
        match tone {
            Tone::Success => label.green().bold().to_string(),
            Tone::Warning => label.yellow().bold().to_string(),
            Tone::Error => label.red().bold().to_string(),
            Tone::Info => label.cyan().bold().to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Error,
    Info,
}
