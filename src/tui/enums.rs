//! Enumerations for TUI state management.

use crate::task::TaskRecord;

/// Which surface currently receives input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    ActionSheet,
    Remark,
    ShowRemark,
}

/// A screen reachable from the action sheet, carrying the record in context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Remark(TaskRecord),
    ShowRemark(TaskRecord),
}

impl Destination {
    pub fn name(&self) -> &'static str {
        match self {
            Destination::Remark(_) => "Remark",
            Destination::ShowRemark(_) => "Show Remark",
        }
    }

    pub fn record(&self) -> &TaskRecord {
        match self {
            Destination::Remark(record) | Destination::ShowRemark(record) => record,
        }
    }
}

/// Actions offered by the action sheet, in display order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SheetAction {
    Remark,
    ShowRemark,
}

impl SheetAction {
    pub const ALL: [SheetAction; 2] = [SheetAction::Remark, SheetAction::ShowRemark];

    pub fn label(self) -> &'static str {
        match self {
            SheetAction::Remark => "Remark",
            SheetAction::ShowRemark => "Show Remark",
        }
    }

    /// Leading glyph: edit for Remark, visibility for Show Remark.
    pub fn icon(self) -> &'static str {
        match self {
            SheetAction::Remark => "✎",
            SheetAction::ShowRemark => "◉",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            SheetAction::Remark => 'r',
            SheetAction::ShowRemark => 's',
        }
    }

    /// The destination this action navigates to for `record`.
    pub fn destination(self, record: TaskRecord) -> Destination {
        match self {
            SheetAction::Remark => Destination::Remark(record),
            SheetAction::ShowRemark => Destination::ShowRemark(record),
        }
    }
}
