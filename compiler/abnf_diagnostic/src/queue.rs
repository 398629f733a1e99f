//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Deduplication of identical diagnostics at the same position
//! - Position-ordered flushing

use abnf_ir::{LineCol, LineIndex};
use rustc_hash::FxHashSet;

use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors before further errors are dropped (0 = unlimited).
    pub error_limit: usize,
    /// Drop a diagnostic whose code, position, and message repeat an earlier one.
    pub deduplicate: bool,
    /// Drop warnings entirely.
    pub suppress_warnings: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 50,
            deduplicate: true,
            suppress_warnings: false,
        }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
            suppress_warnings: false,
        }
    }
}

#[derive(Clone, Debug)]
struct QueuedDiagnostic {
    diagnostic: Diagnostic,
    position: LineCol,
    order: usize,
}

/// Queue for collecting, deduplicating, and sorting diagnostics.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// queue.add(diagnostic, &line_index);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<QueuedDiagnostic>,
    seen: FxHashSet<(ErrorCode, u32, u32, String)>,
    error_count: usize,
    warning_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::with_config(DiagnosticConfig::default())
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            diagnostics: Vec::new(),
            seen: FxHashSet::default(),
            error_count: 0,
            warning_count: 0,
            config,
        }
    }

    /// Add a diagnostic, computing its sort position from `index`.
    ///
    /// Returns `true` if the diagnostic was kept, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic, index: &LineIndex) -> bool {
        let position = diag
            .primary_span()
            .map_or(LineCol { line: 1, col: 1 }, |span| index.line_col(span.start));

        if diag.is_error() && self.limit_reached() {
            return false;
        }
        if diag.is_warning() && self.config.suppress_warnings {
            return false;
        }
        if self.config.deduplicate {
            let key = (diag.code, position.line, position.col, diag.message.clone());
            if !self.seen.insert(key) {
                return false;
            }
        }

        if diag.is_error() {
            self.error_count += 1;
        } else if diag.is_warning() {
            self.warning_count += 1;
        }

        let order = self.diagnostics.len();
        self.diagnostics.push(QueuedDiagnostic {
            diagnostic: diag,
            position,
            order,
        });
        true
    }

    /// Add every diagnostic from an iterator.
    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>, index: &LineIndex) {
        for diag in diags {
            self.add(diag, index);
        }
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Sort diagnostics by position and return them.
    ///
    /// Diagnostics at the same position keep insertion order. Clears the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.diagnostics
            .sort_by_key(|d| (d.position.line, d.position.col, d.order));
        self.seen.clear();
        self.error_count = 0;
        self.warning_count = 0;
        self.diagnostics.drain(..).map(|d| d.diagnostic).collect()
    }
}

#[cfg(test)]
mod tests;
