use super::*;
use typeheal_common::diagnostic_codes;

fn miss(identifier: &str) -> Diagnostic {
    Diagnostic::error(identifier, "not found", diagnostic_codes::RESOLUTION_MISS)
}

#[test]
fn collector_keeps_arrival_order() {
    let collector = DiagnosticCollector::new();
    collector.log(&miss("A"));
    collector.log(&miss("B"));
    assert_eq!(collector.len(), 2);

    let snapshot = collector.snapshot();
    assert_eq!(snapshot[0].identifier, "A");
    assert_eq!(snapshot[1].identifier, "B");
    assert_eq!(collector.len(), 2);

    assert_eq!(collector.take().len(), 2);
    assert!(collector.is_empty());
}

#[test]
fn collector_keeps_logging_after_a_poisoned_lock() {
    let collector = Arc::new(DiagnosticCollector::new());
    collector.log(&miss("A"));

    let poisoner = Arc::clone(&collector);
    let joined = std::thread::spawn(move || {
        let _guard = poisoner.diagnostics.lock();
        panic!("panic while holding the collector lock");
    })
    .join();
    assert!(joined.is_err());
    assert!(collector.diagnostics.is_poisoned());

    collector.log(&miss("B"));
    assert_eq!(collector.len(), 2);
    let identifiers: Vec<String> = collector
        .take()
        .into_iter()
        .map(|d| d.identifier)
        .collect();
    assert_eq!(identifiers, ["A", "B"]);
    assert!(collector.is_empty());
}

#[test]
fn pair_logger_forwards_to_both_sides() {
    let left = Arc::new(DiagnosticCollector::new());
    let right = Arc::new(DiagnosticCollector::new());
    let pair = (Arc::clone(&left), Arc::clone(&right));
    pair.log(&miss("A"));
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 1);
}

#[test]
fn tracing_logger_accepts_every_category() {
    let _guard = crate::test_fixtures::init_test_tracing();
    let logger = TracingLogger;
    logger.log(&miss("A"));
    logger.log(&Diagnostic {
        category: DiagnosticCategory::Message,
        ..miss("B")
    });
}
