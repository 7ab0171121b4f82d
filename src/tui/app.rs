//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task list, the
//! action sheet overlay and the navigation stack, handles keyboard and mouse
//! input, and renders whichever screen is in front.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::source::TaskSource;
use crate::task::TaskRecord;
use crate::tui::{
    colors::{CARD_BG, GOLD, INK, PAGE_BG, SHEET_HIGHLIGHT},
    enums::{AppState, Destination, SheetAction},
    gesture::PressTracker,
    input::InputField,
    navigation::{Navigator, RemarkLog},
    sheet::{ActionSheet, SheetOutcome},
    utils::{bottom_rect, centered_rect},
};

/// Card height: five text lines plus top and bottom border.
const CARD_HEIGHT: u16 = 7;
/// Blank rows between cards.
const CARD_GAP: u16 = 1;
const CARD_MARGIN_X: u16 = 2;

/// The task page and the screens reachable from it.
pub struct App {
    tasks: Vec<TaskRecord>,
    selected: Option<usize>,
    scroll: usize,
    sheet: Option<ActionSheet>,
    navigator: Navigator,
    remarks: RemarkLog,
    remark_input: InputField,
    press: PressTracker,
    card_areas: Vec<(usize, Rect)>,
    sheet_area: Option<Rect>,
    status_message: String,
}

impl App {
    /// Create the page over a fixed task list.
    pub fn new(tasks: Vec<TaskRecord>, long_press: Duration) -> Self {
        let selected = if tasks.is_empty() { None } else { Some(0) };
        App {
            tasks,
            selected,
            scroll: 0,
            sheet: None,
            navigator: Navigator::new(),
            remarks: RemarkLog::default(),
            remark_input: InputField::new(),
            press: PressTracker::new(long_press),
            card_areas: Vec::new(),
            sheet_area: None,
            status_message: String::new(),
        }
    }

    /// Fetch the task list once from `source` and build the page over it.
    pub fn from_source(source: &dyn TaskSource, long_press: Duration) -> Result<Self> {
        let tasks = source.fetch_tasks()?;
        info!(source = %source.describe(), count = tasks.len(), "tasks loaded");
        Ok(Self::new(tasks, long_press))
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn sheet(&self) -> Option<&ActionSheet> {
        self.sheet.as_ref()
    }

    pub fn current_destination(&self) -> Option<&Destination> {
        self.navigator.current()
    }

    pub fn remarks(&self) -> &RemarkLog {
        &self.remarks
    }

    pub fn state(&self) -> AppState {
        match (self.navigator.current(), &self.sheet) {
            (Some(Destination::Remark(_)), _) => AppState::Remark,
            (Some(Destination::ShowRemark(_)), _) => AppState::ShowRemark,
            (None, Some(_)) => AppState::ActionSheet,
            (None, None) => AppState::TaskList,
        }
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn select_prev(&mut self) {
        if let Some(selected) = self.selected {
            self.selected = Some(selected.saturating_sub(1));
        }
    }

    fn select_next(&mut self) {
        if let Some(selected) = self.selected {
            if selected + 1 < self.tasks.len() {
                self.selected = Some(selected + 1);
            }
        }
    }

    /// Open the action sheet for the card at `index`. Ignored for indices
    /// with no card, which covers the empty list.
    pub fn long_press(&mut self, index: usize) {
        if index >= self.tasks.len() || self.state() != AppState::TaskList {
            return;
        }
        self.press.cancel();
        self.selected = Some(index);
        self.sheet = Some(ActionSheet::open(index));
        info!(case_id = %self.tasks[index].case_id, "action sheet opened");
    }

    /// Close the sheet, then navigate to the action's destination.
    fn choose(&mut self, action: SheetAction) {
        let Some(sheet) = self.sheet.take() else {
            return;
        };
        let Some(record) = self.tasks.get(sheet.record()).cloned() else {
            return;
        };
        if action == SheetAction::Remark {
            self.remark_input = InputField::new();
        }
        self.navigator.push(action.destination(record));
    }

    fn dismiss_sheet(&mut self) {
        if self.sheet.take().is_some() {
            info!("action sheet dismissed");
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home => {
                if !self.tasks.is_empty() {
                    self.selected = Some(0);
                }
            }
            KeyCode::End => {
                if !self.tasks.is_empty() {
                    self.selected = Some(self.tasks.len() - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(selected) = self.selected {
                    self.long_press(selected);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_sheet_input(&mut self, key: KeyCode) {
        let Some(sheet) = self.sheet.as_mut() else {
            return;
        };
        match sheet.handle_key(key) {
            SheetOutcome::Selected(action) => self.choose(action),
            SheetOutcome::Dismissed => self.dismiss_sheet(),
            SheetOutcome::Stay => {}
        }
    }

    fn handle_remark_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.remark_input.take();
                self.navigator.pop();
            }
            KeyCode::Enter => {
                let text = self.remark_input.take();
                let case_id = self.navigator.current().map(|d| d.record().case_id.clone());
                if let Some(case_id) = case_id {
                    if self.remarks.add(&case_id, &text) {
                        self.set_status_message(format!("Remark saved for {}", case_id));
                    }
                }
                self.navigator.pop();
            }
            KeyCode::Char(c) => self.remark_input.handle_char(c),
            KeyCode::Backspace => self.remark_input.handle_backspace(),
            KeyCode::Delete => self.remark_input.handle_delete(),
            KeyCode::Left => self.remark_input.move_cursor_left(),
            KeyCode::Right => self.remark_input.move_cursor_right(),
            _ => {}
        }
    }

    fn handle_show_remark_input(&mut self, key: KeyCode) {
        if let KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace | KeyCode::Left = key {
            self.navigator.pop();
        }
    }

    /// Dispatch a key press to the surface in front.
    ///
    /// Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();

        match self.state() {
            AppState::TaskList => return self.handle_task_list_input(key.code),
            AppState::ActionSheet => self.handle_sheet_input(key.code),
            AppState::Remark => self.handle_remark_input(key.code),
            AppState::ShowRemark => self.handle_show_remark_input(key.code),
        }
        false
    }

    fn card_at(&self, column: u16, row: u16) -> Option<usize> {
        self.card_areas
            .iter()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|&(index, _)| index)
    }

    fn sheet_action_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.sheet_area?;
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = (row - inner.y) as usize;
        (index < SheetAction::ALL.len()).then_some(index)
    }

    /// Feed a mouse event observed at `now`.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        match self.state() {
            AppState::ActionSheet => {
                if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
                    return;
                }
                if let Some(index) = self.sheet_action_at(column, row) {
                    if let Some(sheet) = self.sheet.as_mut() {
                        sheet.highlight(index);
                    }
                    self.choose(SheetAction::ALL[index]);
                } else if !self.sheet_area.is_some_and(|area| area.contains(Position::new(column, row))) {
                    self.dismiss_sheet();
                }
            }
            AppState::TaskList => {
                let card = self.card_at(column, row);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Some(index) = card {
                            self.selected = Some(index);
                            self.press.press(index, now);
                            debug!(card = index, "press started");
                        }
                    }
                    MouseEventKind::Drag(MouseButton::Left) => self.press.drag(card),
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some(index) = self.press.release(card, now) {
                            self.long_press(index);
                        }
                    }
                    MouseEventKind::ScrollUp => self.select_prev(),
                    MouseEventKind::ScrollDown => self.select_next(),
                    _ => {}
                }
            }
            AppState::Remark | AppState::ShowRemark => {}
        }
    }

    /// Fire a held mouse press once it passes the long-press threshold.
    pub fn tick(&mut self, now: Instant) {
        if self.state() == AppState::TaskList {
            if let Some(index) = self.press.tick(now) {
                self.long_press(index);
            }
        }
    }

    /// Poll for and handle terminal events.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        return Ok(true);
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
        self.tick(Instant::now());
        Ok(false)
    }

    /// Keep the selected card inside the window of `visible` cards.
    fn adjust_scroll(&mut self, visible: usize) {
        let Some(selected) = self.selected else {
            self.scroll = 0;
            return;
        };
        if selected < self.scroll {
            self.scroll = selected;
        } else if selected >= self.scroll + visible {
            self.scroll = selected + 1 - visible;
        }
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(Span::styled("Task Page", Style::default().add_modifier(Modifier::BOLD)))
            .style(Style::default().bg(PAGE_BG).fg(INK))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(title, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        f.render_widget(Block::default().style(Style::default().bg(PAGE_BG)), area);
        self.card_areas.clear();

        if self.tasks.is_empty() {
            let empty = Paragraph::new("No tasks")
                .style(Style::default().bg(PAGE_BG).fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(empty, centered_rect(60, 20, area));
            return;
        }

        let slot = CARD_HEIGHT + CARD_GAP;
        let visible = ((area.height + CARD_GAP) / slot).max(1) as usize;
        self.adjust_scroll(visible);

        let bottom = area.y + area.height;
        for (offset, index) in (self.scroll..self.tasks.len()).take(visible).enumerate() {
            let y = area.y + offset as u16 * slot;
            let height = CARD_HEIGHT.min(bottom.saturating_sub(y));
            if height == 0 {
                break;
            }
            let card_area = Rect::new(
                area.x + CARD_MARGIN_X,
                y,
                area.width.saturating_sub(CARD_MARGIN_X * 2),
                height,
            );
            let highlighted = self.selected == Some(index);
            f.render_widget(card(&self.tasks[index], highlighted), card_area);
            self.card_areas.push((index, card_area));
        }
    }

    fn render_sheet(&mut self, f: &mut Frame, area: Rect) {
        let Some(sheet) = self.sheet.as_ref() else {
            return;
        };
        let case_id = self
            .tasks
            .get(sheet.record())
            .map(|t| t.case_id.as_str())
            .unwrap_or("");

        let lines: Vec<Line> = SheetAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let style = if i == sheet.highlighted_index() {
                    Style::default().bg(SHEET_HIGHLIGHT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Line::from(format!(" {}  {}", action.icon(), action.label())).style(style)
            })
            .collect();

        let sheet_area = bottom_rect(ActionSheet::height(), area);
        f.render_widget(Clear, sheet_area);
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(format!(" {} ", case_id))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(CARD_BG).fg(INK)),
        );
        f.render_widget(paragraph, sheet_area);
        self.sheet_area = Some(sheet_area);
    }

    fn render_remark(&self, f: &mut Frame, area: Rect, record: &TaskRecord) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(CARD_HEIGHT), Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        f.render_widget(card(record, false), chunks[0]);

        let block = Block::default()
            .title("Remark")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let inner = block.inner(chunks[1]);
        // Columns, not chars: wide glyphs take two cells.
        let cursor_col = Span::raw(self.remark_input.before_cursor()).width() as u16;
        let scroll = cursor_col.saturating_sub(inner.width.saturating_sub(1));
        let input = Paragraph::new(self.remark_input.value.clone())
            .scroll((0, scroll))
            .block(block);
        f.render_widget(input, chunks[1]);
        f.set_cursor_position((inner.x + cursor_col - scroll, inner.y));
    }

    fn render_show_remark(&self, f: &mut Frame, area: Rect, record: &TaskRecord) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(CARD_HEIGHT), Constraint::Min(0)])
            .split(area);

        f.render_widget(card(record, false), chunks[0]);

        let remarks = self.remarks.for_case(&record.case_id);
        let lines: Vec<Line> = if remarks.is_empty() {
            vec![Line::from(Span::styled("No remarks yet", Style::default().fg(Color::DarkGray)))]
        } else {
            remarks
                .iter()
                .enumerate()
                .map(|(i, remark)| Line::from(format!("{}. {}", i + 1, remark)))
                .collect()
        };
        let list = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!("Remarks ({})", remarks.len()))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(list, chunks[1]);
    }

    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state() {
                AppState::TaskList => format!(
                    "Tasks: {} | ↑↓ select | Enter or long-press for actions | q quit",
                    self.tasks.len()
                ),
                AppState::ActionSheet => "↑↓ choose | Enter select | r/s shortcut | Esc dismiss".to_string(),
                AppState::Remark => "Type a remark | Enter save | Esc back".to_string(),
                AppState::ShowRemark => "Esc back".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(INK).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the screen in front.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_title(f, chunks[0]);
        self.sheet_area = None;

        match self.navigator.current().cloned() {
            None => {
                self.render_task_list(f, chunks[1]);
                self.render_sheet(f, chunks[1]);
            }
            Some(Destination::Remark(record)) => self.render_remark(f, chunks[1], &record),
            Some(Destination::ShowRemark(record)) => self.render_show_remark(f, chunks[1], &record),
        }

        self.render_status_bar(f, chunks[2]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// One bordered, rounded card showing every field of `record`.
fn card(record: &TaskRecord, highlighted: bool) -> Paragraph<'static> {
    let [case, instruction, assigned_by, assigned_date, due_date] = record.card_lines();
    let assigned_by = if record.is_unassigned() {
        Line::from(Span::styled(assigned_by, Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(assigned_by)
    };
    let lines = vec![
        Line::from(Span::styled(case, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(instruction),
        assigned_by,
        Line::from(assigned_date),
        Line::from(due_date),
    ];

    let border = if highlighted {
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(INK)
    };
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(CARD_BG).fg(INK)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    use crate::source::SampleSource;
    use crate::task::UNASSIGNED;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_app() -> App {
        App::from_source(&SampleSource, Duration::from_millis(500)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE }
    }

    fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    fn draw_with_cursor(app: &mut App, width: u16, height: u16) -> (Vec<String>, Position) {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        let buffer = terminal.backend().buffer();
        let rows = (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect();
        (rows, cursor)
    }

    fn screen_contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn test_single_card_dates() {
        let record = TaskRecord::new("case-777", "work fast", UNASSIGNED, ymd(2024, 11, 25), ymd(2024, 11, 25));
        let mut app = App::new(vec![record], Duration::from_millis(500));
        let rows = draw(&mut app, 60, 20);
        assert!(screen_contains(&rows, "Task Page"));
        assert!(screen_contains(&rows, "Case No: case-777"));
        assert!(screen_contains(&rows, "Alloted By: N/A"));
        assert!(screen_contains(&rows, "Alloted Date: 25/11/2024"));
        assert!(screen_contains(&rows, "End Date: 25/11/2024"));
        assert_eq!(app.card_areas.len(), 1);
    }

    #[test]
    fn test_one_card_per_record_in_order() {
        let tasks: Vec<TaskRecord> = (1..=3)
            .map(|i| TaskRecord::new(&format!("case-{}", i), "do it", "Admin", ymd(2024, 1, i), ymd(2024, 2, i)))
            .collect();
        let mut app = App::new(tasks, Duration::from_millis(500));
        let rows = draw(&mut app, 60, 40);

        let cases: Vec<&String> = rows.iter().filter(|row| row.contains("Case No:")).collect();
        assert_eq!(cases.len(), 3);
        for (i, row) in cases.iter().enumerate() {
            assert!(row.contains(&format!("case-{}", i + 1)));
        }
        let indices: Vec<usize> = app.card_areas.iter().map(|&(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(app.card_areas.windows(2).all(|w| w[0].1.y + CARD_HEIGHT + CARD_GAP == w[1].1.y));
    }

    #[test]
    fn test_empty_list() {
        let mut app = App::new(Vec::new(), Duration::from_millis(500));
        let rows = draw(&mut app, 40, 12);
        assert!(app.card_areas.is_empty());
        assert!(screen_contains(&rows, "No tasks"));

        assert!(!app.handle_key(key(KeyCode::Enter)));
        app.long_press(0);
        assert!(app.sheet().is_none());
        assert_eq!(app.state(), AppState::TaskList);
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        let tasks: Vec<TaskRecord> = (1..=6)
            .map(|i| TaskRecord::new(&format!("case-{}", i), "", "", ymd(2024, 1, i), ymd(2024, 1, i)))
            .collect();
        let mut app = App::new(tasks, Duration::from_millis(500));
        app.handle_key(key(KeyCode::End));
        let rows = draw(&mut app, 60, 20);
        assert!(screen_contains(&rows, "case-6"));
        assert!(!screen_contains(&rows, "case-1 "));
        assert_eq!(app.card_areas.last().map(|&(i, _)| i), Some(5));
    }

    #[test]
    fn test_keyboard_long_press_and_remark() {
        let mut app = sample_app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), AppState::ActionSheet);
        assert_eq!(app.sheet().map(|s| s.record()), Some(1));

        let rows = draw(&mut app, 60, 30);
        assert!(screen_contains(&rows, "✎  Remark"));
        assert!(screen_contains(&rows, "◉  Show Remark"));

        app.handle_key(key(KeyCode::Enter));
        assert!(app.sheet().is_none());
        let expected = app.tasks()[1].clone();
        assert_eq!(app.current_destination(), Some(&Destination::Remark(expected)));
    }

    #[test]
    fn test_show_remark_selection() {
        let mut app = sample_app();
        app.long_press(0);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        let expected = app.tasks()[0].clone();
        assert_eq!(app.current_destination(), Some(&Destination::ShowRemark(expected)));
        assert_eq!(app.state(), AppState::ShowRemark);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::TaskList);
    }

    #[test]
    fn test_dismiss_without_navigation() {
        let mut app = sample_app();
        app.long_press(1);
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(app.sheet().is_none());
        assert!(app.current_destination().is_none());
        assert_eq!(app.state(), AppState::TaskList);
    }

    #[test]
    fn test_remark_round_trip_through_screens() {
        let mut app = sample_app();
        app.long_press(0);
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.state(), AppState::Remark);
        for c in "call back".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let rows = draw(&mut app, 60, 20);
        assert!(screen_contains(&rows, "call back"));

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state(), AppState::TaskList);
        assert_eq!(app.remarks().for_case("case-777"), ["call back"]);
        let rows = draw(&mut app, 60, 30);
        assert!(screen_contains(&rows, "Remark saved for case-777"));

        app.long_press(0);
        app.handle_key(key(KeyCode::Char('s')));
        let rows = draw(&mut app, 60, 20);
        assert!(screen_contains(&rows, "Remarks (1)"));
        assert!(screen_contains(&rows, "1. call back"));
    }

    #[test]
    fn test_remark_cursor_counts_display_columns() {
        let mut app = sample_app();
        app.long_press(0);
        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('b')));
        let (_, cursor) = draw_with_cursor(&mut app, 60, 20);
        assert_eq!(cursor, Position::new(3, 10));

        app.handle_key(key(KeyCode::Esc));
        app.long_press(0);
        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Char('漢')));
        app.handle_key(key(KeyCode::Char('字')));
        let (rows, cursor) = draw_with_cursor(&mut app, 60, 20);
        assert_eq!(cursor, Position::new(5, 10));
        assert!(rows[10].contains('漢'));
    }

    #[test]
    fn test_long_remark_scrolls_to_cursor() {
        let mut app = sample_app();
        app.long_press(0);
        app.handle_key(key(KeyCode::Char('r')));
        for _ in 0..40 {
            app.handle_key(key(KeyCode::Char('a')));
        }
        app.handle_key(key(KeyCode::Char('Z')));
        let (rows, cursor) = draw_with_cursor(&mut app, 30, 20);
        // Inner width is 28, so the cursor sits on the last inner column.
        assert_eq!(cursor, Position::new(28, 10));
        assert!(rows[10].contains('Z'), "{:?}", rows[10]);

        for _ in 0..41 {
            app.handle_key(key(KeyCode::Left));
        }
        let (rows, cursor) = draw_with_cursor(&mut app, 30, 20);
        assert_eq!(cursor, Position::new(1, 10));
        assert!(!rows[10].contains('Z'));
    }

    #[test]
    fn test_remark_escape_discards_text() {
        let mut app = sample_app();
        app.long_press(1);
        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state(), AppState::TaskList);
        assert!(app.remarks().for_case("case-123").is_empty());
    }

    #[test]
    fn test_mouse_long_press_opens_sheet() {
        let mut app = sample_app();
        draw(&mut app, 60, 30);
        let (_, area) = app.card_areas[1];
        let (x, y) = (area.x + 3, area.y + 2);
        let start = Instant::now();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), start);
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), start + Duration::from_millis(100));
        assert!(app.sheet().is_none());
        assert_eq!(app.selected, Some(1));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), start);
        app.tick(start + Duration::from_millis(200));
        assert!(app.sheet().is_none());
        app.tick(start + Duration::from_millis(600));
        assert_eq!(app.sheet().map(|s| s.record()), Some(1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), start + Duration::from_millis(700));
        assert_eq!(app.state(), AppState::ActionSheet);
    }

    #[test]
    fn test_mouse_on_sheet() {
        let mut app = sample_app();
        app.long_press(0);
        draw(&mut app, 60, 30);
        let area = app.sheet_area.unwrap();
        let now = Instant::now();

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), area.x + 4, area.y + 2), now);
        let expected = app.tasks()[0].clone();
        assert_eq!(app.current_destination(), Some(&Destination::ShowRemark(expected)));

        app.handle_key(key(KeyCode::Esc));
        app.long_press(0);
        draw(&mut app, 60, 30);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 3), now);
        assert!(app.sheet().is_none());
        assert!(app.current_destination().is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));

        app.long_press(0);
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.sheet().is_none());
    }
}
