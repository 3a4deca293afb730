//! Helper functions: error type and journal replay.

use batch_engine::FlowError;
use star_host::{HostCall, HostOp};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("invalid design name: {name}")]
    InvalidName { name: String },

    #[error("no report recorded yet")]
    NoReport,

    #[error("flow error: {0}")]
    Flow(#[from] FlowError),
}

pub(crate) fn fail(ctx: &str, detail: impl std::fmt::Display) -> HarnessError {
    HarnessError::AssertionFailed {
        detail: format!("[{ctx}] {detail}"),
    }
}

// ── Journal Replay ──────────────────────────────────────────────────────────

/// Number of open edit sessions after each journaled call.
///
/// Assumes every journaled begin succeeded. When failures are injected
/// into `BeginEdit`, check `MockHost::peak_open_sessions` instead.
pub fn session_depths(journal: &[HostCall]) -> Vec<usize> {
    let mut depth = 0usize;
    journal
        .iter()
        .map(|call| {
            match call.op {
                HostOp::BeginEdit => depth += 1,
                HostOp::CommitEdit | HostOp::RollbackEdit => depth = depth.saturating_sub(1),
                _ => {}
            }
            depth
        })
        .collect()
}

/// Design names in the order their bodies were renamed.
pub fn renamed_bodies(journal: &[HostCall]) -> Vec<&str> {
    journal
        .iter()
        .filter(|c| c.op == HostOp::RenameBody)
        .map(|c| c.detail.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(op: HostOp) -> HostCall {
        HostCall {
            op,
            detail: String::new(),
        }
    }

    #[test]
    fn depths_follow_begin_and_close() {
        let journal = vec![
            call(HostOp::CreateScene),
            call(HostOp::BeginEdit),
            call(HostOp::ImportCadFile),
            call(HostOp::CommitEdit),
            call(HostOp::BeginEdit),
            call(HostOp::RollbackEdit),
        ];
        assert_eq!(session_depths(&journal), vec![0, 1, 1, 0, 1, 0]);
    }
}
