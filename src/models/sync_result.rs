use serde::Serialize;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncResult {
    pub fn completed(updated: usize, errors: usize) -> Self {
        Self {
            success: true,
            updated: Some(updated),
            errors: Some(errors),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            updated: None,
            errors: None,
            error: Some(error.into()),
        }
    }
}
