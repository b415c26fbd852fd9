//! Draft form handling for the terminal user interface.
//!
//! This module provides the `DraftForm` structure the add-task screen edits:
//! text inputs for title, description, due date and tag entry, selectors for
//! assignee and priority, and the `Draft` whose tag list the tag entry feeds.

use chrono::NaiveDate;

use crate::board::parse_due_input_from;
use crate::fields::Priority;
use crate::task::{Draft, TeamMember};
use crate::tui::input::InputField;

/// Field order in the draft form.
pub const TITLE_FIELD: usize = 0;
pub const DESCRIPTION_FIELD: usize = 1;
pub const ASSIGNEE_FIELD: usize = 2;
pub const PRIORITY_FIELD: usize = 3;
pub const DUE_FIELD: usize = 4;
pub const TAGS_FIELD: usize = 5;

const FIELD_COUNT: usize = 6;

/// Form state for composing a new task.
pub struct DraftForm {
    pub title: InputField,
    pub description: InputField,
    pub due: InputField,
    pub tag_input: InputField,
    /// Index into `assignees`; 0 is "unassigned".
    pub assignee: usize,
    /// Index into `Priority::ALL`.
    pub priority: usize,
    pub current_field: usize,
    pub assignees: Vec<Option<String>>,
    /// The draft buffer. Tags live here; the other fields are copied in on submit.
    pub draft: Draft,
}

impl DraftForm {
    /// Create an empty form offering the roster as assignees.
    pub fn new(roster: &[TeamMember], default_priority: Priority) -> Self {
        let mut assignees = vec![None];
        assignees.extend(roster.iter().map(|m| Some(m.name.clone())));
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            due: InputField::new(),
            tag_input: InputField::new(),
            assignee: 0,
            priority: priority_index(default_priority),
            current_field: TITLE_FIELD,
            assignees,
            draft: Draft {
                priority: default_priority,
                ..Draft::default()
            },
        };
        form.update_active_field();
        form
    }

    /// Clear every field back to a fresh form.
    pub fn reset(&mut self, default_priority: Priority) {
        self.title.clear();
        self.description.clear();
        self.due.clear();
        self.tag_input.clear();
        self.assignee = 0;
        self.priority = priority_index(default_priority);
        self.current_field = TITLE_FIELD;
        self.draft.clear();
        self.draft.priority = default_priority;
        self.update_active_field();
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL[self.priority % Priority::ALL.len()]
    }

    pub fn selected_assignee(&self) -> Option<&str> {
        self.assignees.get(self.assignee).and_then(|a| a.as_deref())
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_FIELD;
        self.description.active = self.current_field == DESCRIPTION_FIELD;
        self.due.active = self.current_field == DUE_FIELD;
        self.tag_input.active = self.current_field == TAGS_FIELD;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_FIELD => Some(&mut self.title),
            DESCRIPTION_FIELD => Some(&mut self.description),
            DUE_FIELD => Some(&mut self.due),
            TAGS_FIELD => Some(&mut self.tag_input),
            _ => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    /// Backspace edits the active text field. On an empty tag entry it removes
    /// the last tag instead.
    pub fn handle_backspace(&mut self) {
        if self.current_field == TAGS_FIELD && self.tag_input.is_empty() {
            self.remove_last_tag();
            return;
        }
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    /// Handle left/right arrow keys for cursor movement or selector changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            ASSIGNEE_FIELD => {
                let len = self.assignees.len();
                self.assignee = if right {
                    (self.assignee + 1) % len
                } else if self.assignee == 0 {
                    len - 1
                } else {
                    self.assignee - 1
                };
            }
            PRIORITY_FIELD => {
                let len = Priority::ALL.len();
                self.priority = if right {
                    (self.priority + 1) % len
                } else if self.priority == 0 {
                    len - 1
                } else {
                    self.priority - 1
                };
            }
            _ => {
                if let Some(field) = self.active_input() {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }

    /// Move the tag entry text onto the draft. Duplicates are dropped silently.
    pub fn add_current_tag(&mut self) -> bool {
        let added = self.draft.add_tag(&self.tag_input.value);
        self.tag_input.clear();
        added
    }

    pub fn remove_last_tag(&mut self) -> bool {
        match self.draft.tags.last().cloned() {
            Some(tag) => self.draft.remove_tag(&tag),
            None => false,
        }
    }

    /// Copy the form inputs into the draft buffer. Returns false when due date
    /// text was given but not understood; the draft then has no due date.
    pub fn sync_draft(&mut self, today: NaiveDate) -> bool {
        self.draft.title = self.title.value.clone();
        self.draft.description = self.description.value.clone();
        self.draft.priority = self.selected_priority();
        self.draft.assignee = self.selected_assignee().map(str::to_string);
        let due_text = self.due.value.trim();
        if due_text.is_empty() {
            self.draft.due = None;
            true
        } else {
            self.draft.due = parse_due_input_from(due_text, today);
            self.draft.due.is_some()
        }
    }
}

fn priority_index(priority: Priority) -> usize {
    Priority::ALL.iter().position(|&p| p == priority).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_roster;

    fn form() -> DraftForm {
        DraftForm::new(&default_roster(), Priority::Medium)
    }

    fn type_text(form: &mut DraftForm, text: &str) {
        for c in text.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn test_selectors_wrap() {
        let mut f = form();
        f.current_field = ASSIGNEE_FIELD;
        assert_eq!(f.selected_assignee(), None);
        f.handle_left_right(true);
        assert_eq!(f.selected_assignee(), Some("John Doe"));
        f.handle_left_right(false);
        f.handle_left_right(false);
        assert_eq!(f.selected_assignee(), Some("Sarah Wilson"));

        f.current_field = PRIORITY_FIELD;
        assert_eq!(f.selected_priority(), Priority::Medium);
        f.handle_left_right(true);
        assert_eq!(f.selected_priority(), Priority::High);
        f.handle_left_right(true);
        assert_eq!(f.selected_priority(), Priority::Low);
    }

    #[test]
    fn test_tag_entry_adds_and_removes() {
        let mut f = form();
        f.current_field = TAGS_FIELD;
        type_text(&mut f, "backend");
        assert!(f.add_current_tag());
        type_text(&mut f, "backend");
        assert!(!f.add_current_tag());
        type_text(&mut f, "api");
        f.add_current_tag();
        assert_eq!(f.draft.tags, vec!["backend", "api"]);
        assert!(f.tag_input.is_empty());

        f.handle_backspace();
        assert_eq!(f.draft.tags, vec!["backend"]);
    }

    #[test]
    fn test_sync_draft_copies_fields() {
        let mut f = form();
        type_text(&mut f, "Ship it");
        f.next_field();
        type_text(&mut f, "release notes");
        f.next_field();
        f.handle_left_right(true);
        f.next_field();
        f.handle_left_right(false);
        f.next_field();
        type_text(&mut f, "tomorrow");

        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(f.sync_draft(today));
        assert_eq!(f.draft.title, "Ship it");
        assert_eq!(f.draft.description, "release notes");
        assert_eq!(f.draft.assignee.as_deref(), Some("John Doe"));
        assert_eq!(f.draft.priority, Priority::Low);
        assert_eq!(f.draft.due, NaiveDate::from_ymd_opt(2024, 2, 2));
    }

    #[test]
    fn test_bad_due_text_leaves_no_due_date() {
        let mut f = form();
        f.current_field = DUE_FIELD;
        type_text(&mut f, "eventually");
        assert!(!f.sync_draft(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert_eq!(f.draft.due, None);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut f = DraftForm::new(&default_roster(), Priority::High);
        type_text(&mut f, "x");
        f.current_field = TAGS_FIELD;
        type_text(&mut f, "t");
        f.add_current_tag();
        f.reset(Priority::High);
        assert!(f.title.is_empty());
        assert!(f.draft.tags.is_empty());
        assert_eq!(f.selected_priority(), Priority::High);
        assert_eq!(f.current_field, TITLE_FIELD);
        assert!(f.title.active);
    }
}
