use serde::{Deserialize, Serialize};

/// Envelope wrapping every Hostaway resource response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status: String,
    pub result: Option<T>,
    /// Failure reason, present when `status` is not "success"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// An explicit non-"success" status. A missing status is not a failure.
    pub fn is_failure(&self) -> bool {
        !self.status.is_empty() && !self.status.eq_ignore_ascii_case("success")
    }
}
