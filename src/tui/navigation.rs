//! Navigation stack for destination screens and the session's remark log.

use std::collections::HashMap;

use tracing::info;

use crate::tui::enums::Destination;

/// Stack of destination screens pushed on top of the task list.
/// An empty stack means the task list is in front.
#[derive(Debug, Default)]
pub struct Navigator {
    stack: Vec<Destination>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, destination: Destination) {
        info!(
            destination = destination.name(),
            case_id = %destination.record().case_id,
            "navigate"
        );
        self.stack.push(destination);
    }

    /// Pop the front screen. Returns false when already at the task list.
    pub fn pop(&mut self) -> bool {
        match self.stack.pop() {
            Some(destination) => {
                info!(destination = destination.name(), "navigate back");
                true
            }
            None => false,
        }
    }

    pub fn current(&self) -> Option<&Destination> {
        self.stack.last()
    }
}

/// Remarks written during this session, keyed by case id.
#[derive(Debug, Default)]
pub struct RemarkLog {
    remarks: HashMap<String, Vec<String>>,
}

impl RemarkLog {
    /// Record a remark for `case_id`. Blank remarks are ignored.
    pub fn add(&mut self, case_id: &str, remark: &str) -> bool {
        let remark = remark.trim();
        if remark.is_empty() {
            return false;
        }
        self.remarks
            .entry(case_id.to_string())
            .or_default()
            .push(remark.to_string());
        info!(case_id, "remark recorded");
        true
    }

    pub fn for_case(&self, case_id: &str) -> &[String] {
        self.remarks.get(case_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
