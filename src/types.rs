use std::str::FromStr;

use serde::Deserialize;

/// Behaviour when an external packaging tool exits nonzero.
///
/// - `Lenient`: log the failure and treat the stage as complete. This is the
///   historical behaviour of the pipeline: some tools emit warnings with a
///   nonzero status and the run is expected to carry on.
/// - `Strict`: fail the stage, which aborts the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Lenient,
    Strict,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        FailurePolicy::Lenient
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(FailurePolicy::Lenient),
            "strict" => Ok(FailurePolicy::Strict),
            other => Err(format!(
                "invalid failure_policy: {other} (expected \"lenient\" or \"strict\")"
            )),
        }
    }
}
