use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Possible states of a compilation or an experiment execution.
///
/// Parsed case-insensitively from the lower-case names the server uses and
/// displayed with upper-case names.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Running,
    Stopping,
    Cancelled,
    Done,
}

/// Possible states of an import, export or conversion.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AsyncOperationStatus {
    Running,
    Ready,
    Error,
}

impl AsyncOperationStatus {
    /// Both success and failure are terminal.
    pub fn done(self) -> bool {
        matches!(self, AsyncOperationStatus::Ready | AsyncOperationStatus::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("pending", Status::Pending)]
    #[case("running", Status::Running)]
    #[case("stopping", Status::Stopping)]
    #[case("cancelled", Status::Cancelled)]
    #[case("done", Status::Done)]
    fn parses_wire_status(#[case] value: &str, #[case] expected: Status) {
        assert_eq!(Status::from_str(value).unwrap(), expected);
    }

    #[test]
    fn displays_upper_case() {
        assert_eq!(Status::Cancelled.to_string(), "CANCELLED");
        assert_eq!(AsyncOperationStatus::Ready.to_string(), "READY");
    }

    #[test]
    fn rejects_unknown_status() {
        assert!(Status::from_str("exploded").is_err());
        assert!(AsyncOperationStatus::from_str("done").is_err());
    }

    #[rstest]
    #[case(AsyncOperationStatus::Running, false)]
    #[case(AsyncOperationStatus::Ready, true)]
    #[case(AsyncOperationStatus::Error, true)]
    fn async_done(#[case] status: AsyncOperationStatus, #[case] done: bool) {
        assert_eq!(status.done(), done);
    }

    #[test]
    fn serde_uses_lower_case() {
        let json = serde_json::to_string(&Status::Done).unwrap();
        assert_eq!(json, "\"done\"");
        let status: AsyncOperationStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(status, AsyncOperationStatus::Error);
    }
}
