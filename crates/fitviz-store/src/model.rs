//! Trace report records as reported by the injecting proxies.

use std::fmt;

use serde::{Deserialize, Serialize};

use fitviz_error::{Error, Result};

/// Identity of one potential fault injection point within a trace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultUid {
    pub origin: String,
    pub destination: String,
    pub signature: String,
    /// Invocation count of this call within the trace.
    pub count: i64,
}

impl fmt::Display for FaultUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.destination, self.signature, self.count)
    }
}

/// Kind of fault and its arguments, e.g. `HTTP_ERROR(503)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaultMode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl fmt::Display for FaultMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.args.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fault {
    pub uid: FaultUid,
    pub mode: FaultMode,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[uid={}, mode={}]", self.uid, self.mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResponse {
    pub status: u16,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub duration_ms: u64,
}

impl TraceResponse {
    /// Anything outside the 2xx range.
    pub fn is_erroneous(&self) -> bool {
        !(200..300).contains(&self.status)
    }
}

/// One span reported back by a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceReport {
    pub trace_id: String,
    pub span_id: String,
    pub uid: FaultUid,
    #[serde(default)]
    pub injected_fault: Option<Fault>,
    #[serde(default)]
    pub is_initial: bool,
    #[serde(default)]
    pub response: Option<TraceResponse>,
}

impl TraceReport {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|err| {
            Error::deserialization_failed("invalid trace report JSON")
                .with_operation("model::from_json_str")
                .set_source(err)
        })
    }
}
