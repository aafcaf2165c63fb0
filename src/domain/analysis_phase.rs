use std::fmt;

/// Lifecycle of one analysis request. `Polling` is the only phase that repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisPhase {
    Created,
    Staged,
    Dispatched,
    Polling,
    Resolved,
    TimedOut,
    Malformed,
    DispatchFailed,
    StageFailed,
    CleanedUp,
    Done,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPhase::Created => "CREATED",
            AnalysisPhase::Staged => "STAGED",
            AnalysisPhase::Dispatched => "DISPATCHED",
            AnalysisPhase::Polling => "POLLING",
            AnalysisPhase::Resolved => "RESOLVED",
            AnalysisPhase::TimedOut => "TIMED_OUT",
            AnalysisPhase::Malformed => "MALFORMED",
            AnalysisPhase::DispatchFailed => "DISPATCH_FAILED",
            AnalysisPhase::StageFailed => "STAGE_FAILED",
            AnalysisPhase::CleanedUp => "CLEANED_UP",
            AnalysisPhase::Done => "DONE",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AnalysisPhase::Resolved
                | AnalysisPhase::TimedOut
                | AnalysisPhase::Malformed
                | AnalysisPhase::DispatchFailed
                | AnalysisPhase::StageFailed
        )
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
