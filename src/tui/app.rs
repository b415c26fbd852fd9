//! Kanban board application for the terminal user interface.
//!
//! This module implements the `BoardApp`, which holds the task board and lays
//! the filtered view out as three columns (To Do, In Progress, Completed). It
//! handles user input, renders the board, and coordinates the add-task form,
//! search, the detail popup and delete confirmation.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::board::{format_due_relative, Board};
use crate::fields::*;
use crate::task::Task;
use crate::tui::{
    colors::{priority_color, status_color, DARK_RED, GOLD},
    enums::AppState,
    input::InputField,
    task_form::{
        DraftForm, ASSIGNEE_FIELD, DESCRIPTION_FIELD, DUE_FIELD, PRIORITY_FIELD, TAGS_FIELD,
        TITLE_FIELD,
    },
    utils::centered_rect,
};
use crate::view::{group_by_status, is_overdue, workload, FilterSpec};

const CARD_HEIGHT: usize = 5;

/// Main kanban application state.
pub struct BoardApp {
    board: Board,
    state: AppState,
    filter: FilterSpec,
    columns: [Vec<u64>; 3],
    selected_column: usize,
    selected_card: usize,
    column_scroll_offsets: [usize; 3],
    form: DraftForm,
    default_priority: Priority,
    search_input: InputField,
    status_message: String,
    show_stats: bool,
    show_team: bool,
    pending_delete: Option<u64>,
}

impl BoardApp {
    /// Create the application over a board.
    pub fn new(board: Board, default_priority: Priority) -> Self {
        let form = DraftForm::new(board.roster(), default_priority);
        let mut app = BoardApp {
            board,
            state: AppState::Board,
            filter: FilterSpec::default(),
            columns: Default::default(),
            selected_column: 0,
            selected_card: 0,
            column_scroll_offsets: [0; 3],
            form,
            default_priority,
            search_input: InputField::new(),
            status_message: String::new(),
            show_stats: true,
            show_team: false,
            pending_delete: None,
        };
        app.update_columns();
        app
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Rebuild the column ids from the current filter.
    fn update_columns(&mut self) {
        let view = self.board.view(&self.filter);
        let buckets = group_by_status(&view);
        for status in Status::ALL {
            self.columns[status.column()] = buckets.column(status).iter().map(|t| t.id).collect();
        }
        self.clamp_selection();
    }

    /// Ensure selected column and card indices are valid
    fn clamp_selection(&mut self) {
        if self.selected_column >= self.columns.len() {
            self.selected_column = 0;
        }
        let column_len = self.columns[self.selected_column].len();
        if column_len == 0 {
            self.selected_card = 0;
            self.column_scroll_offsets[self.selected_column] = 0;
        } else if self.selected_card >= column_len {
            self.selected_card = column_len - 1;
        }
    }

    /// Id of the highlighted card, if the column has any.
    pub fn selected_task_id(&self) -> Option<u64> {
        self.columns[self.selected_column]
            .get(self.selected_card)
            .copied()
    }

    fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.board.get(id))
    }

    /// Select a card by task id, switching column if needed.
    pub fn select_task(&mut self, id: u64) -> bool {
        for (column, ids) in self.columns.iter().enumerate() {
            if let Some(card) = ids.iter().position(|&t| t == id) {
                self.selected_column = column;
                self.selected_card = card;
                return true;
            }
        }
        false
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    /// Start or complete the selected task.
    fn advance_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id;
        let Some(label) = task.status.advance_label() else {
            self.set_status_message(format!("Task #{} is already completed", id));
            return;
        };
        if self.board.advance_status(id) {
            let verb = if label == "Start" { "Started" } else { "Completed" };
            self.set_status_message(format!("{} task #{}", verb, id));
            self.update_columns();
        }
    }

    fn request_delete(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.pending_delete = Some(id);
            self.state = AppState::Confirm;
        }
    }

    fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if self.board.delete_task(id) {
                self.set_status_message(format!("Deleted task #{}", id));
            }
            self.update_columns();
        }
        self.state = AppState::Board;
    }

    /// Cycle the selected task's priority low -> medium -> high -> low.
    fn cycle_selected_priority(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, next) = (task.id, task.priority.cycle());
        if self.board.set_priority(id, next) {
            self.set_status_message(format!("Task #{} priority: {}", id, format_priority(next)));
            self.update_columns();
        }
    }

    fn cycle_status_filter(&mut self) {
        self.filter.status = match self.filter.status {
            None => Some(Status::Todo),
            Some(s) => s.next(),
        };
        self.filter_changed();
    }

    fn cycle_priority_filter(&mut self) {
        self.filter.priority = match self.filter.priority {
            None => Some(Priority::High),
            Some(Priority::High) => Some(Priority::Medium),
            Some(Priority::Medium) => Some(Priority::Low),
            Some(Priority::Low) => None,
        };
        self.filter_changed();
    }

    fn cycle_assignee_filter(&mut self) {
        let names: Vec<&str> = self.board.roster().iter().map(|m| m.name.as_str()).collect();
        let next = match self.filter.assignee.as_deref() {
            None => names.first().copied(),
            Some(current) => names
                .iter()
                .position(|&n| n == current)
                .and_then(|i| names.get(i + 1).copied()),
        };
        self.filter.assignee = next.map(str::to_string);
        self.filter_changed();
    }

    fn clear_filters(&mut self) {
        self.filter = FilterSpec::default();
        self.search_input.clear();
        self.filter_changed();
    }

    fn filter_changed(&mut self) {
        self.update_columns();
        let shown: usize = self.columns.iter().map(|c| c.len()).sum();
        self.set_status_message(format!("Showing {} ({} tasks)", self.filter.describe(), shown));
    }

    /// Submit the draft form. A blank title creates nothing and keeps the form open.
    fn submit_form(&mut self) {
        let today = Local::now().date_naive();
        let due_ok = self.form.sync_draft(today);
        match self.board.create_task(&mut self.form.draft) {
            Some(id) => {
                self.form.reset(self.default_priority);
                self.update_columns();
                self.select_task(id);
                self.state = AppState::Board;
                let note = if due_ok { "" } else { " (due date not understood)" };
                self.set_status_message(format!("Created task #{}{}", id, note));
            }
            None => self.set_status_message("Title is required".to_string()),
        }
    }

    /// Apply one key event. Returns true when the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.state {
            AppState::Board => return self.handle_board_key(key),
            AppState::AddTask => self.handle_form_key(key),
            AppState::Search => self.handle_search_key(key),
            AppState::TaskDetail => self.handle_detail_key(key),
            AppState::Confirm => self.handle_confirm_key(key),
            AppState::Help => self.state = AppState::Board,
        }
        false
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        self.clear_status_message();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Right => {
                if self.selected_column < self.columns.len() - 1 {
                    self.selected_column += 1;
                    self.clamp_selection();
                }
            }
            KeyCode::Up => {
                if self.selected_card > 0 {
                    self.selected_card -= 1;
                }
            }
            KeyCode::Down => {
                let column_len = self.columns[self.selected_column].len();
                if column_len > 0 && self.selected_card < column_len - 1 {
                    self.selected_card += 1;
                }
            }
            KeyCode::Enter => {
                if self.selected_task_id().is_some() {
                    self.state = AppState::TaskDetail;
                }
            }
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.state = AppState::AddTask;
            }
            KeyCode::Char('s') | KeyCode::Char(' ') => self.advance_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char('p') => self.cycle_selected_priority(),
            KeyCode::Char('/') => {
                self.search_input = InputField::with_value(&self.filter.search);
                self.state = AppState::Search;
            }
            KeyCode::Char('f') => self.cycle_status_filter(),
            KeyCode::Char('r') => self.cycle_priority_filter(),
            KeyCode::Char('m') => self.cycle_assignee_filter(),
            KeyCode::Char('x') => self.clear_filters(),
            KeyCode::Char('i') => self.show_stats = !self.show_stats,
            KeyCode::Char('t') => self.show_team = !self.show_team,
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.submit_form();
            return;
        }
        match key.code {
            KeyCode::Esc => {
                // The draft stays as typed for when the form is reopened.
                self.state = AppState::Board;
                self.clear_status_message();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Enter => {
                if self.form.current_field == TAGS_FIELD && !self.form.tag_input.is_empty() {
                    self.form.add_current_tag();
                } else {
                    self.submit_form();
                }
            }
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_input.clear();
                self.filter.search.clear();
                self.state = AppState::Board;
                self.filter_changed();
                return;
            }
            KeyCode::Enter => {
                self.state = AppState::Board;
                self.filter_changed();
                return;
            }
            KeyCode::Backspace => self.search_input.handle_backspace(),
            KeyCode::Left => self.search_input.move_cursor_left(),
            KeyCode::Right => self.search_input.move_cursor_right(),
            KeyCode::Char(c) => self.search_input.handle_char(c),
            _ => return,
        }
        self.filter.search = self.search_input.value.clone();
        self.update_columns();
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => self.state = AppState::Board,
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                let id = self.selected_task_id();
                self.advance_selected();
                // Keep the popup on the same task after it changes column.
                if let Some(id) = id {
                    self.select_task(id);
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.pending_delete = None;
                self.state = AppState::Board;
            }
            _ => {}
        }
    }

    /// Poll the terminal for input and apply it.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    /// Main render function.
    pub fn render(&mut self, f: &mut Frame) {
        let mut constraints = vec![Constraint::Length(3)];
        if self.show_stats {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(0));
        if self.show_team {
            constraints.push(Constraint::Length(self.board.roster().len() as u16 + 2));
        }
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.area());

        let mut next = 0;
        self.render_header(f, chunks[next]);
        next += 1;
        if self.show_stats {
            self.render_stats(f, chunks[next]);
            next += 1;
        }
        self.render_board(f, chunks[next]);
        next += 1;
        if self.show_team {
            self.render_team(f, chunks[next]);
            next += 1;
        }
        self.render_status_bar(f, chunks[next]);

        match self.state {
            AppState::TaskDetail => self.render_task_detail(f),
            AppState::AddTask => self.render_form(f),
            AppState::Help => self.render_help(f),
            AppState::Confirm => self.render_confirm(f),
            AppState::Board | AppState::Search => {}
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Showing {}", self.filter.describe()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]);
        let block = Paragraph::new(header)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(block, area);
    }

    fn render_stats(&self, f: &mut Frame, area: Rect) {
        let stats = self.board.stats();
        let item = |label: &str, value: usize, color: Color| {
            vec![
                Span::styled(value.to_string(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {}   ", label)),
            ]
        };
        let mut spans = Vec::new();
        spans.extend(item("Total Tasks", stats.total, Color::Cyan));
        spans.extend(item("Completed", stats.completed, status_color(Status::Completed)));
        spans.extend(item("In Progress", stats.in_progress, status_color(Status::InProgress)));
        spans.extend(item("To Do", stats.todo, status_color(Status::Todo)));
        spans.extend(item("Overdue", stats.overdue, DARK_RED));
        let widget = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Statistics"))
            .alignment(Alignment::Center);
        f.render_widget(widget, area);
    }

    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let columns_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for status in Status::ALL {
            self.render_column(f, columns_layout[status.column()], status);
        }
    }

    fn render_column(&mut self, f: &mut Frame, area: Rect, status: Status) {
        let column_index = status.column();
        let is_selected = column_index == self.selected_column;
        let color = status_color(status);
        let border_style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", format_status(status), self.columns[column_index].len()))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cards = &self.columns[column_index];
        if cards.is_empty() {
            return;
        }

        let available_height = inner.height as usize;
        let visible_cards = (available_height / CARD_HEIGHT).max(1);

        // Keep the selected card in view.
        let scroll_offset = if is_selected {
            let start = self.column_scroll_offsets[column_index];
            let offset = if self.selected_card < start {
                self.selected_card
            } else if self.selected_card >= start + visible_cards {
                self.selected_card + 1 - visible_cards
            } else {
                start
            };
            self.column_scroll_offsets[column_index] = offset;
            offset
        } else {
            self.column_scroll_offsets[column_index].min(cards.len().saturating_sub(1))
        };

        let now = Local::now().naive_local();
        let mut current_y = 0;
        let mut rendered = 0;
        for (card_index, &task_id) in cards.iter().enumerate().skip(scroll_offset) {
            if current_y + CARD_HEIGHT > available_height {
                break;
            }
            if let Some(task) = self.board.get(task_id) {
                let card_area = Rect {
                    x: inner.x,
                    y: inner.y + current_y as u16,
                    width: inner.width,
                    height: CARD_HEIGHT as u16,
                };
                let selected = is_selected && card_index == self.selected_card;
                render_card(f, card_area, task, selected, is_overdue(task, now));
                current_y += CARD_HEIGHT;
                rendered += 1;
            }
        }

        if scroll_offset > 0 {
            let indicator = Paragraph::new(format!("▲ +{} above", scroll_offset))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(indicator, Rect { height: 1, ..inner });
        }
        let remaining = cards.len().saturating_sub(scroll_offset + rendered);
        if remaining > 0 && inner.height > 0 {
            let indicator = Paragraph::new(format!("▼ +{} below", remaining))
                .style(Style::default().fg(Color::Cyan));
            f.render_widget(
                indicator,
                Rect {
                    y: inner.y + inner.height - 1,
                    height: 1,
                    ..inner
                },
            );
        }
    }

    fn render_team(&self, f: &mut Frame, area: Rect) {
        let load = workload(self.board.tasks(), self.board.roster());
        let lines: Vec<Line> = load
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", entry.member.avatar),
                        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!(
                        " {}  {}  {} tasks",
                        entry.member.name, entry.member.role, entry.tasks
                    )),
                ])
            })
            .collect();
        let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Team Members"));
        f.render_widget(widget, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.state == AppState::Search {
            format!("Search: {} | Enter to apply, Esc to clear", self.search_input.value)
        } else if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let shown: usize = self.columns.iter().map(|c| c.len()).sum();
            let action = self
                .selected_task()
                .and_then(|t| t.status.advance_label())
                .map(|label| format!(" | s: {}", label))
                .unwrap_or_default();
            format!(
                "Tasks: {}{} | a: Add | d: Delete | /: Search | f/r/m: Filter | x: Clear | h: Help",
                shown, action
            )
        };
        let color = status_color(Status::ALL[self.selected_column]);
        let text_color = if color == GOLD { Color::Rgb(20, 20, 20) } else { Color::White };
        let bar = Paragraph::new(text).style(Style::default().bg(color).fg(text_color));
        f.render_widget(bar, area);
    }

    fn render_task_detail(&self, f: &mut Frame) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let area = centered_rect(70, 70, f.area());
        f.render_widget(Clear, area);

        let now = Local::now().naive_local();
        let due = match task.due {
            Some(d) => format!("{} ({})", d, format_due_relative(Some(d), now.date())),
            None => "-".to_string(),
        };
        let due_style = if is_overdue(task, now) {
            Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let updated = chrono::DateTime::from_timestamp(task.updated_at_utc, 0)
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let action = match task.status.advance_label() {
            Some(label) => format!("Press 's' to {}, Enter to close", label),
            None => "Press Enter to close".to_string(),
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("Task #{}: {}", task.id, task.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Status:    "),
                Span::styled(format_status(task.status), Style::default().fg(status_color(task.status))),
            ]),
            Line::from(vec![
                Span::raw("Priority:  "),
                Span::styled(format_priority(task.priority), Style::default().fg(priority_color(task.priority))),
            ]),
            Line::from(format!("Assignee:  {}", task.assignee.as_deref().unwrap_or("-"))),
            Line::from(vec![Span::raw("Due:       "), Span::styled(due, due_style)]),
            Line::from(format!(
                "Tags:      {}",
                if task.tags.is_empty() { "-".to_string() } else { task.tags.join(", ") }
            )),
            Line::from(format!("Updated:   {}", updated)),
            Line::from(""),
            Line::from("Description:"),
            Line::from(if task.description.is_empty() { "-" } else { task.description.as_str() }),
            Line::from(""),
            Line::from(Span::styled(action, Style::default().fg(Color::Cyan))),
        ];

        let popup = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Task Details")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(status_color(task.status)).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, area);
    }

    fn render_form(&self, f: &mut Frame) {
        let area = centered_rect(70, 90, f.area());
        f.render_widget(Clear, area);
        let outer = Block::default()
            .borders(Borders::ALL)
            .title("Add New Task")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black));
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(4), // Description
                Constraint::Length(3), // Assignee
                Constraint::Length(3), // Priority
                Constraint::Length(3), // Due
                Constraint::Length(3), // Tag entry
                Constraint::Length(2), // Tags
                Constraint::Min(0),    // Instructions
            ])
            .split(inner);

        let form = &self.form;
        let field_style = |field: usize| {
            if form.current_field == field {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            }
        };
        let input = |text: &str, title: &'static str, field: usize| {
            Paragraph::new(text.to_string()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(field_style(field)),
            )
        };

        f.render_widget(input(&form.title.value, "Title *", TITLE_FIELD), rows[0]);
        f.render_widget(
            input(&form.description.value, "Description", DESCRIPTION_FIELD).wrap(Wrap { trim: true }),
            rows[1],
        );
        let assignee = form.selected_assignee().unwrap_or("Unassigned");
        f.render_widget(input(&format!("< {} >", assignee), "Assignee", ASSIGNEE_FIELD), rows[2]);
        let priority = form.selected_priority();
        f.render_widget(
            input(&format!("< {} >", format_priority(priority)), "Priority", PRIORITY_FIELD)
                .style(Style::default().fg(priority_color(priority))),
            rows[3],
        );
        f.render_widget(
            input(&form.due.value, "Due (YYYY-MM-DD, today, friday, in 3d)", DUE_FIELD),
            rows[4],
        );
        f.render_widget(input(&form.tag_input.value, "Add Tag (Enter)", TAGS_FIELD), rows[5]);

        let tags: Vec<Span> = if form.draft.tags.is_empty() {
            vec![Span::styled(" no tags", Style::default().fg(Color::DarkGray))]
        } else {
            form.draft
                .tags
                .iter()
                .flat_map(|t| {
                    vec![
                        Span::raw(" "),
                        Span::styled(format!("[{}]", t), Style::default().fg(Color::Cyan)),
                    ]
                })
                .collect()
        };
        f.render_widget(Paragraph::new(Line::from(tags)), rows[6]);

        let help = Paragraph::new(vec![
            Line::from("Tab/↑↓: Move  ←→: Change selection  Enter: Add tag / Create  Ctrl+S: Create"),
            Line::from("Backspace on empty tag entry: Remove last tag  Esc: Back to board"),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
        f.render_widget(help, rows[7]);

        // Cursor for the active text field.
        let cursor_target = match form.current_field {
            TITLE_FIELD => Some((rows[0], form.title.cursor)),
            DESCRIPTION_FIELD => Some((rows[1], form.description.cursor)),
            DUE_FIELD => Some((rows[4], form.due.cursor)),
            TAGS_FIELD => Some((rows[5], form.tag_input.cursor)),
            _ => None,
        };
        if let Some((rect, cursor)) = cursor_target {
            let x = rect.x + 1 + (cursor as u16).min(rect.width.saturating_sub(3));
            f.set_cursor_position((x, rect.y + 1));
        }
    }

    fn render_help(&self, f: &mut Frame) {
        let area = centered_rect(60, 70, f.area());
        f.render_widget(Clear, area);
        let lines = vec![
            Line::from(Span::styled("Board", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("←/→        Move between columns"),
            Line::from("↑/↓        Move between cards"),
            Line::from("Enter      Task details"),
            Line::from("a          Add a new task"),
            Line::from("s / Space  Start or complete the selected task"),
            Line::from("p          Cycle the selected task's priority"),
            Line::from("d          Delete the selected task"),
            Line::from(""),
            Line::from(Span::styled("Filters", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("/          Search title and description"),
            Line::from("f          Cycle status filter"),
            Line::from("r          Cycle priority filter"),
            Line::from("m          Cycle assignee filter"),
            Line::from("x          Clear all filters"),
            Line::from(""),
            Line::from(Span::styled("View", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("i          Toggle statistics"),
            Line::from("t          Toggle team members"),
            Line::from("q / Esc    Quit"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];
        let popup = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .style(Style::default().bg(Color::Black));
        f.render_widget(popup, area);
    }

    fn render_confirm(&self, f: &mut Frame) {
        let area = centered_rect(50, 25, f.area());
        f.render_widget(Clear, area);
        let title = self
            .pending_delete
            .and_then(|id| self.board.get(id))
            .map(|t| format!("#{} {}", t.id, t.title))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Delete this task?", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(title),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(Block::default().title("Confirm Action").borders(Borders::ALL))
            .style(Style::default().bg(DARK_RED))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Main event loop
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

/// Render a single task card.
fn render_card(f: &mut Frame, area: Rect, task: &Task, selected: bool, overdue: bool) {
    let style = if selected {
        Style::default().bg(status_color(task.status)).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let mut lines = vec![Line::from(vec![
        Span::raw(format!("#{} ", task.id)),
        Span::styled(
            format_priority(task.priority),
            Style::default().fg(priority_color(task.priority)).add_modifier(Modifier::BOLD),
        ),
    ])];

    // Word-wrap the title to at most two lines.
    let available_width = area.width.saturating_sub(2) as usize;
    let mut current = String::new();
    let mut title_lines = Vec::new();
    for word in task.title.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= available_width {
            current.push(' ');
            current.push_str(word);
        } else {
            title_lines.push(std::mem::take(&mut current));
            current = word.to_string();
            if title_lines.len() >= 2 {
                current.clear();
                break;
            }
        }
    }
    if !current.is_empty() && title_lines.len() < 2 {
        title_lines.push(current);
    }
    lines.extend(title_lines.into_iter().map(Line::from));

    let today = Local::now().date_naive();
    let due_style = if overdue {
        Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    lines.push(Line::from(vec![
        Span::raw(format!("{} | ", task.assignee.as_deref().unwrap_or("-"))),
        Span::styled(format_due_relative(task.due, today), due_style),
    ]));

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(card, area);
}
