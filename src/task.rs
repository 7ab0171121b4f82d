//! Task record shown on the task page.
//!
//! A record is a case with an instruction, who assigned it, and the dates it
//! was assigned and is due. Records are display-only: nothing here validates
//! them, and `due_date` may precede `assigned_date`.

use chrono::NaiveDate;
use serde::Deserialize;

/// Value of `assigned_by` for a case nobody has been assigned to.
pub const UNASSIGNED: &str = "N/A";

/// Display format for every date on a card.
pub const DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";

pub const CASE_LABEL: &str = "Case No";
pub const INSTRUCTION_LABEL: &str = "Instruction";
pub const ASSIGNED_BY_LABEL: &str = "Alloted By";
pub const ASSIGNED_DATE_LABEL: &str = "Alloted Date";
pub const DUE_DATE_LABEL: &str = "End Date";

/// A single case card's data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    pub case_id: String,
    pub instruction: String,
    pub assigned_by: String,
    pub assigned_date: NaiveDate,
    pub due_date: NaiveDate,
}

impl TaskRecord {
    pub fn new(
        case_id: &str,
        instruction: &str,
        assigned_by: &str,
        assigned_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        TaskRecord {
            case_id: case_id.to_string(),
            instruction: instruction.to_string(),
            assigned_by: assigned_by.to_string(),
            assigned_date,
            due_date,
        }
    }

    /// True when `assigned_by` holds the unassigned sentinel.
    pub fn is_unassigned(&self) -> bool {
        self.assigned_by == UNASSIGNED
    }

    /// The text lines of this record's card, top to bottom.
    pub fn card_lines(&self) -> [String; 5] {
        [
            format!("{}: {}", CASE_LABEL, self.case_id),
            format!("{}: {}", INSTRUCTION_LABEL, self.instruction),
            format!("{}: {}", ASSIGNED_BY_LABEL, self.assigned_by),
            format!("{}: {}", ASSIGNED_DATE_LABEL, format_date(self.assigned_date)),
            format!("{}: {}", DUE_DATE_LABEL, format_date(self.due_date)),
        ]
    }
}

/// Format a date as `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}
