//! Indexed store for trace reports collected during a fault-injection run.

pub mod model;
pub mod store;

pub use model::{Fault, FaultMode, FaultUid, TraceReport, TraceResponse};
pub use store::ReportStore;
