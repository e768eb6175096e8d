use super::reporter::Reporter;
use typeheal_common::{Diagnostic, diagnostic_codes};
use typeheal_parser::parse_identifier;
use typeheal_resolver::{Resolution, ResolveError, ResolvedType, TypeId};

fn resolution(canonical: &str, resolved: bool, rewrites: usize) -> Resolution {
    Resolution {
        ty: resolved.then_some(ResolvedType::Named(TypeId(0))),
        descriptor: parse_identifier(canonical).expect("parse"),
        canonical: canonical.to_string(),
        rewrites,
    }
}

#[test]
fn resolutions_are_labelled_by_outcome() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_resolution("Foo, A", &resolution("Foo, A", true, 0)),
        "ok Foo, A"
    );
    assert_eq!(
        reporter.format_resolution("Old.Foo, A", &resolution("New.Foo, A", true, 1)),
        "healed Old.Foo, A -> New.Foo, A"
    );
    assert_eq!(
        reporter.format_resolution("Ghost, A", &resolution("Ghost, A", false, 0)),
        "miss Ghost, A"
    );
}

#[test]
fn failures_render_as_diagnostics() {
    let reporter = Reporter::new(false);
    let err = ResolveError::NotFound {
        identifier: "Ghost".to_string(),
        module: "A".to_string(),
    };
    assert_eq!(
        reporter.format_failure("Ghost, A", &err),
        "Ghost, A - error TH2001: Cannot find type 'Ghost' in module 'A' or any other loaded module."
    );
}

#[test]
fn color_only_changes_decoration() {
    let diagnostic = Diagnostic::error("Foo", "broken", diagnostic_codes::PARSE_ERROR);
    let plain = Reporter::new(false).format_diagnostic(&diagnostic);
    assert_eq!(plain, "Foo - error TH1001: broken");

    colored::control::set_override(true);
    let colored = Reporter::new(true).format_diagnostic(&diagnostic);
    colored::control::unset_override();
    assert!(colored.contains("\u{1b}["));
    assert!(colored.ends_with("broken"));
}
