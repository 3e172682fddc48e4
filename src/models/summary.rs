// Quartile summary over a closed set of sample values.
// Serialized field names match the original daily-report email body.

use serde::{Deserialize, Serialize};

/// Statistics over one closed window of throughput values (Mbps).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub q3: f64,
    pub median: f64,
    pub q1: f64,
    pub min: f64,
}
