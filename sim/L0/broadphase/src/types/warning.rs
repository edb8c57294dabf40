//! Warning tracking for collision diagnostics.
//!
//! Overflow of the candidate or contact buffer is not an error: the step
//! still completes with truncated output. Each overflow is recorded in
//! `Data.warnings` and can be queried after the step.

use super::data::Data;

/// Warning types.
/// `repr(u8)` for compact storage; cast to `usize` for array indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Warning {
    /// Candidate buffer full: pairs past `nconmax` were dropped.
    CandidateFull = 0,
    /// Contact buffer full: a narrow-phase stage reported more than `nconmax`.
    ContactFull = 1,
}

/// Number of warning types.
pub const NUM_WARNINGS: usize = 2;

/// Per-warning statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarningStat {
    /// Count that triggered the warning (e.g., `ncollision` for `CandidateFull`).
    pub last_info: usize,
    /// Cumulative count since last reset.
    pub count: usize,
}

/// Format a warning message for display.
fn warning_text(warning: Warning, info: usize, nconmax: usize) -> String {
    match warning {
        Warning::CandidateFull => {
            format!("Warning: collision candidate buffer full (ncollision={info}, nconmax={nconmax}).")
        }
        Warning::ContactFull => {
            format!("Warning: contact buffer full (ncon={info}, nconmax={nconmax}).")
        }
    }
}

/// Record a warning and log (on first occurrence only).
pub fn mj_warning(data: &mut Data, warning: Warning, info: usize) {
    let nconmax = data.nconmax();
    let w = &mut data.warnings[warning as usize];
    if w.count == 0 {
        tracing::warn!("{}", warning_text(warning, info, nconmax));
    }
    w.last_info = info;
    w.count += 1;
}
