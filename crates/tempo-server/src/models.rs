//! Response payload types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current server time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TimeDto {
    /// Local date-time with sub-second precision.
    #[schema(value_type = String, example = "2025-09-30T11:32:16.4693641")]
    pub time: NaiveDateTime,
}

impl From<NaiveDateTime> for TimeDto {
    fn from(time: NaiveDateTime) -> Self {
        Self { time }
    }
}

/// Body served by `/test/small`; below the compression threshold by
/// construction.
pub const SMALL_PAYLOAD: &str = r#"{"msg":"small"}"#;

/// Body served by `/test/large`; roughly 2000 bytes, above the
/// compression threshold.
pub fn large_payload() -> String {
    "x".repeat(2000)
}
