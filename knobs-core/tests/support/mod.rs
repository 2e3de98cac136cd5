use knobs_core::{ExampleSelection, KnobRegistry, TurnQueue};
use std::sync::Arc;

/// Initialize tracing for tests with proper test output handling
#[allow(dead_code)]
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// Registry on a manually drained queue, showing `example`
#[allow(dead_code)]
pub fn queued_registry(example: &str) -> (Arc<ExampleSelection>, TurnQueue, KnobRegistry) {
    let selection = Arc::new(ExampleSelection::with_example(example));
    let queue = TurnQueue::new();
    let registry = KnobRegistry::new(selection.clone(), Arc::new(queue.clone()));
    (selection, queue, registry)
}
