#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub accepted: bool,
    pub error: Option<String>,
}

impl DispatchOutcome {
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            accepted: false,
            error: Some(error.into()),
        }
    }
}
