//! Bottom action sheet opened by a long-press on a card.

use crossterm::event::KeyCode;

use crate::tui::enums::SheetAction;

/// What a key press did to an open sheet.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SheetOutcome {
    Stay,
    Dismissed,
    Selected(SheetAction),
}

/// An open action sheet scoped to one card.
///
/// The sheet only exists while open; closing it means dropping it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSheet {
    record: usize,
    highlighted: usize,
}

impl ActionSheet {
    /// Open a sheet for the card at `record`, with the first action highlighted.
    pub fn open(record: usize) -> Self {
        ActionSheet { record, highlighted: 0 }
    }

    /// Index of the card this sheet belongs to.
    pub fn record(&self) -> usize {
        self.record
    }

    pub fn highlighted(&self) -> SheetAction {
        SheetAction::ALL[self.highlighted]
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlight(&mut self, index: usize) {
        if index < SheetAction::ALL.len() {
            self.highlighted = index;
        }
    }

    /// Rows needed to draw the sheet, borders included.
    pub fn height() -> u16 {
        SheetAction::ALL.len() as u16 + 2
    }

    pub fn handle_key(&mut self, key: KeyCode) -> SheetOutcome {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => SheetOutcome::Dismissed,
            KeyCode::Up | KeyCode::Char('k') => {
                self.highlighted = self.highlighted.saturating_sub(1);
                SheetOutcome::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.highlighted + 1 < SheetAction::ALL.len() {
                    self.highlighted += 1;
                }
                SheetOutcome::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => SheetOutcome::Selected(self.highlighted()),
            KeyCode::Char(c) => SheetAction::ALL
                .iter()
                .find(|action| action.shortcut() == c)
                .map(|&action| SheetOutcome::Selected(action))
                .unwrap_or(SheetOutcome::Stay),
            _ => SheetOutcome::Stay,
        }
    }
}
