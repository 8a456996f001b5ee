use tracing::warn;

/// Sink for non-fatal discovery notices. Unresolvable dependencies do
/// not abort a run; they degrade the graph and get reported here.
pub trait Diagnostics {
    fn unresolved_dependency(&mut self, module_path: &str, target: &str);
}

/// Default sink routing notices to the log.
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn unresolved_dependency(&mut self, module_path: &str, target: &str) {
        warn!("{module_path}: unresolvable dependency {target}");
    }
}

/// Accumulating sink for tests and for CLI summaries.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    pub unresolved: Vec<(String, String)>,
}

impl Diagnostics for CollectedDiagnostics {
    fn unresolved_dependency(&mut self, module_path: &str, target: &str) {
        self.unresolved
            .push((module_path.to_string(), target.to_string()));
    }
}
