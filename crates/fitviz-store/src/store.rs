//! Multi-key index over trace reports.

use std::collections::HashMap;

use tracing::trace;

use crate::model::{FaultUid, TraceReport};

/// Trace reports indexed by span id, by trace id, and by
/// (trace id, fault uid).
///
/// Reports are owned by the span index; the other indices hold span ids.
/// Every mutation keeps all four indices consistent with each other.
#[derive(Debug, Default)]
pub struct ReportStore {
    /// Span ids in insertion order.
    order: Vec<String>,
    by_span_id: HashMap<String, TraceReport>,
    by_trace_id: HashMap<String, Vec<String>>,
    by_trace_and_fault_uid: HashMap<String, HashMap<FaultUid, String>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `report`. A report with the same span id is replaced.
    pub fn add(&mut self, report: TraceReport) -> &TraceReport {
        if self.by_span_id.contains_key(&report.span_id) {
            self.remove_span(&report.span_id);
        }
        trace!(trace_id = %report.trace_id, span_id = %report.span_id, "report added");

        let span_id = report.span_id.clone();
        self.order.push(span_id.clone());
        self.by_trace_id
            .entry(report.trace_id.clone())
            .or_default()
            .push(span_id.clone());
        self.by_trace_and_fault_uid
            .entry(report.trace_id.clone())
            .or_default()
            .insert(report.uid.clone(), span_id.clone());
        self.by_span_id.entry(span_id).or_insert(report)
    }

    pub fn get_by_span_id(&self, span_id: &str) -> Option<&TraceReport> {
        self.by_span_id.get(span_id)
    }

    pub fn has_fault_uid_for_trace(&self, trace_id: &str, uid: &FaultUid) -> bool {
        self.by_trace_and_fault_uid
            .get(trace_id)
            .is_some_and(|by_uid| by_uid.contains_key(uid))
    }

    pub fn get_by_trace_and_fault_uid(&self, trace_id: &str, uid: &FaultUid) -> Option<&TraceReport> {
        self.by_trace_and_fault_uid
            .get(trace_id)?
            .get(uid)
            .and_then(|span_id| self.by_span_id.get(span_id))
    }

    /// All reports of a trace, in insertion order.
    pub fn get_by_trace_id(&self, trace_id: &str) -> Vec<&TraceReport> {
        self.by_trace_id
            .get(trace_id)
            .map(|span_ids| {
                span_ids
                    .iter()
                    .filter_map(|span_id| self.by_span_id.get(span_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove every report of a trace from all indices and return them.
    pub fn remove_by_trace_id(&mut self, trace_id: &str) -> Vec<TraceReport> {
        let Some(span_ids) = self.by_trace_id.remove(trace_id) else {
            return Vec::new();
        };
        self.by_trace_and_fault_uid.remove(trace_id);
        self.order.retain(|span_id| !span_ids.contains(span_id));

        let removed: Vec<TraceReport> = span_ids
            .iter()
            .filter_map(|span_id| self.by_span_id.remove(span_id))
            .collect();
        trace!(trace_id, removed = removed.len(), "trace reports removed");
        removed
    }

    /// Reset all four indices.
    pub fn clear(&mut self) {
        self.order.clear();
        self.by_span_id.clear();
        self.by_trace_id.clear();
        self.by_trace_and_fault_uid.clear();
    }

    pub fn len(&self) -> usize {
        self.by_span_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_span_id.is_empty()
    }

    /// All reports, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TraceReport> {
        self.order
            .iter()
            .filter_map(|span_id| self.by_span_id.get(span_id))
    }

    fn remove_span(&mut self, span_id: &str) -> Option<TraceReport> {
        let report = self.by_span_id.remove(span_id)?;
        self.order.retain(|id| id != span_id);

        if let Some(span_ids) = self.by_trace_id.get_mut(&report.trace_id) {
            span_ids.retain(|id| id != span_id);
            if span_ids.is_empty() {
                self.by_trace_id.remove(&report.trace_id);
            }
        }
        if let Some(by_uid) = self.by_trace_and_fault_uid.get_mut(&report.trace_id) {
            if by_uid.get(&report.uid).is_some_and(|id| id == span_id) {
                by_uid.remove(&report.uid);
            }
            if by_uid.is_empty() {
                self.by_trace_and_fault_uid.remove(&report.trace_id);
            }
        }
        Some(report)
    }
}
