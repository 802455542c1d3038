//! Application state management for the adoption terminal UI.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface. All data changes go through the
//! [`AppointmentStore`]; the state here only tracks what is on screen.

use crate::domain::{
    AppointmentPatch, AppointmentStatus, AppointmentStore, ApplicationForm, DomainResult, FieldKind, FormField, Pet,
    StoragePort,
};
use crate::infrastructure::CsvExporter;
use log::{info, warn};
use std::collections::HashSet;

/// The store as used by the UI, with storage chosen at startup.
pub type Store = AppointmentStore<Box<dyn StoragePort>>;

/// Which list is shown in the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Pets,
    Appointments,
}

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and which overlay is
/// displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Browsing pets or appointments
    Normal,
    /// The adoption application is open
    Form,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use pawbook::application::{App, Tab};
/// use pawbook::domain::{AppointmentStore, PetSeeding, StoragePort};
/// use pawbook::infrastructure::MemoryStorage;
///
/// let storage: Box<dyn StoragePort> = Box::new(MemoryStorage::default());
/// let mut store = AppointmentStore::new(storage, PetSeeding::ResetOnStart);
/// store.initialize().unwrap();
/// let app = App::new(store, "appointments.csv");
/// assert_eq!(app.tab, Tab::Pets);
/// assert!(app.selected_pet().is_none());
/// ```
#[derive(Debug)]
pub struct App {
    /// Source of truth for pets and appointments
    pub store: Store,
    pub tab: Tab,
    pub mode: AppMode,
    /// Highlighted row in the pet list
    pub pet_cursor: usize,
    /// Pet shown in the spotlight, by id
    pub selected_pet_id: Option<String>,
    /// The open application, if any
    pub form: Option<ApplicationForm>,
    /// Highlighted field among the current step's fields
    pub field_cursor: usize,
    /// Cursor position (in characters) within the highlighted text field
    pub cursor_position: usize,
    /// Highlighted row in the appointment list
    pub appointment_cursor: usize,
    /// Appointment ids whose details are expanded
    pub expanded: HashSet<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Where Ctrl+E writes the CSV export
    pub export_file: String,
}

impl App {
    pub fn new(store: Store, export_file: impl Into<String>) -> Self {
        Self {
            store,
            tab: Tab::Pets,
            mode: AppMode::Normal,
            pet_cursor: 0,
            selected_pet_id: None,
            form: None,
            field_cursor: 0,
            cursor_position: 0,
            appointment_cursor: 0,
            expanded: HashSet::new(),
            help_scroll: 0,
            status_message: None,
            export_file: export_file.into(),
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            AppMode::Help => AppMode::Normal,
            _ => {
                self.help_scroll = 0;
                AppMode::Help
            }
        };
    }

    // --- pets -----------------------------------------------------------

    pub fn selected_pet(&self) -> Option<&Pet> {
        self.selected_pet_id.as_deref().and_then(|id| self.store.pet(id))
    }

    /// The pet under the cursor in the available-pets list.
    pub fn pet_under_cursor(&self) -> Option<&Pet> {
        self.store.available_pets().get(self.pet_cursor).copied()
    }

    pub fn move_pet_cursor(&mut self, delta: isize) {
        self.pet_cursor = step_cursor(self.pet_cursor, delta, self.store.available_pets().len());
    }

    /// Puts the pet under the cursor in the spotlight.
    pub fn select_pet_under_cursor(&mut self) {
        if let Some(id) = self.pet_under_cursor().map(|pet| pet.id.clone()) {
            self.selected_pet_id = Some(id);
            self.status_message = None;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_pet_id = None;
    }

    /// Flips the availability of the pet booked by the appointment under the
    /// cursor. Adopted pets drop out of the pets list.
    pub fn toggle_pet_availability(&mut self) {
        let Some(pet) = self
            .store
            .appointments()
            .get(self.appointment_cursor)
            .and_then(|a| self.store.pet(&a.pet_id))
        else {
            return;
        };
        let (id, name, available) = (pet.id.clone(), pet.name.clone(), !pet.available);

        let result = self.store.update_pet_availability(&id, available);
        if !available && self.selected_pet_id.as_deref() == Some(id.as_str()) {
            self.selected_pet_id = None;
        }
        self.move_pet_cursor(0);
        let state = if available { "available" } else { "adopted" };
        self.report(result, format!("{} marked {}", name, state));
    }

    // --- application form -----------------------------------------------

    /// Opens the adoption application for the selected pet.
    pub fn open_form(&mut self) {
        match self.selected_pet().cloned() {
            Some(pet) => {
                info!("opening application for pet {}", pet.id);
                self.form = Some(ApplicationForm::new(pet));
                self.mode = AppMode::Form;
                self.focus_field(0);
                self.status_message = None;
            }
            None => {
                self.status_message = Some("Select a pet first (Enter)".to_string());
            }
        }
    }

    pub fn cancel_form(&mut self) {
        if let Some(form) = self.form.take() {
            form.cancel();
        }
        self.mode = AppMode::Normal;
        self.field_cursor = 0;
        self.cursor_position = 0;
        self.status_message = Some("Application discarded".to_string());
    }

    pub fn current_field(&self) -> Option<FormField> {
        let form = self.form.as_ref()?;
        form.current_fields().get(self.field_cursor).copied()
    }

    pub fn next_field(&mut self) {
        let count = self.form.as_ref().map_or(0, |f| f.current_fields().len());
        if self.field_cursor + 1 < count {
            self.focus_field(self.field_cursor + 1);
        }
    }

    pub fn previous_field(&mut self) {
        if self.field_cursor > 0 {
            self.focus_field(self.field_cursor - 1);
        }
    }

    fn focus_field(&mut self, index: usize) {
        self.field_cursor = index;
        self.cursor_position = self
            .current_field()
            .zip(self.form.as_ref())
            .map_or(0, |(field, form)| form.value(field).chars().count());
    }

    /// Validates the current step and moves to the next one.
    pub fn form_next_step(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.next() {
            self.focus_field(0);
            self.status_message = None;
        } else {
            self.focus_first_error();
            self.status_message = Some("Please fix the highlighted fields".to_string());
        }
    }

    pub fn form_previous_step(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.previous();
            self.focus_field(0);
        }
    }

    /// Enter in the form: advance to the next field, then the next step, and
    /// submit from the last field of the last step.
    pub fn form_advance(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        if self.field_cursor + 1 < form.current_fields().len() {
            self.next_field();
        } else if form.step().is_last() {
            self.submit_form();
        } else {
            self.form_next_step();
        }
    }

    /// Submits the application and books the appointment if it validates.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let draft = match form.submit() {
            Ok(Some(draft)) => draft,
            Ok(None) => {
                self.focus_first_error();
                self.status_message = Some("Please fix the highlighted fields".to_string());
                return;
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
                return;
            }
        };

        let summary = format!("Appointment booked for {} on {} at {}", draft.pet_name, draft.date, draft.time);
        let result = self.store.add_appointment(draft).map(|_| ());
        self.form = None;
        self.mode = AppMode::Normal;
        self.selected_pet_id = None;
        self.field_cursor = 0;
        self.cursor_position = 0;
        self.report(result, summary);
    }

    fn focus_first_error(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        if let Some(index) = form
            .current_fields()
            .iter()
            .position(|f| form.error(*f).is_some())
        {
            self.focus_field(index);
        }
    }

    fn edit_current_text(&mut self, edit: impl FnOnce(&mut Vec<char>, &mut usize)) {
        let Some(field) = self.current_field() else {
            return;
        };
        if field.kind() != FieldKind::Text {
            return;
        }
        let Some(form) = self.form.as_mut() else {
            return;
        };
        let mut chars: Vec<char> = form.value(field).chars().collect();
        let mut cursor = self.cursor_position.min(chars.len());
        edit(&mut chars, &mut cursor);
        let value: String = chars.into_iter().collect();
        if form.set(field, &value).is_ok() {
            self.cursor_position = cursor;
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit_current_text(|chars, cursor| {
            chars.insert(*cursor, c);
            *cursor += 1;
        });
    }

    pub fn delete_char_before_cursor(&mut self) {
        self.edit_current_text(|chars, cursor| {
            if *cursor > 0 {
                chars.remove(*cursor - 1);
                *cursor -= 1;
            }
        });
    }

    pub fn delete_char_at_cursor(&mut self) {
        self.edit_current_text(|chars, cursor| {
            if *cursor < chars.len() {
                chars.remove(*cursor);
            }
        });
    }

    /// Left/Right: cycles a choice field, or moves the cursor in a text field.
    pub fn form_horizontal(&mut self, forward: bool) {
        let Some(field) = self.current_field() else {
            return;
        };
        match field.kind() {
            FieldKind::Choice(options) => self.cycle_choice(field, options, forward),
            FieldKind::Text => {
                let len = self.form.as_ref().map_or(0, |f| f.value(field).chars().count());
                if forward && self.cursor_position < len {
                    self.cursor_position += 1;
                } else if !forward && self.cursor_position > 0 {
                    self.cursor_position -= 1;
                }
            }
        }
    }

    pub fn cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_to_end(&mut self) {
        self.focus_field(self.field_cursor);
    }

    fn cycle_choice(&mut self, field: FormField, options: &[&str], forward: bool) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        // Position 0 is "unanswered", options follow.
        let current = form.value(field);
        let slots = options.len() + 1;
        let index = options.iter().position(|o| *o == current).map_or(0, |i| i + 1);
        let next = if forward { (index + 1) % slots } else { (index + slots - 1) % slots };
        let value = if next == 0 { "" } else { options[next - 1] };
        if let Err(e) = form.set(field, value) {
            warn!("choice update rejected: {}", e);
        }
        let visible = form.current_fields().len();
        if self.field_cursor >= visible {
            self.field_cursor = visible.saturating_sub(1);
        }
    }

    // --- appointments ---------------------------------------------------

    pub fn move_appointment_cursor(&mut self, delta: isize) {
        self.appointment_cursor = step_cursor(self.appointment_cursor, delta, self.store.appointments().len());
    }

    fn appointment_id_under_cursor(&self) -> Option<String> {
        self.store.appointments().get(self.appointment_cursor).map(|a| a.id.clone())
    }

    pub fn toggle_expanded(&mut self) {
        if let Some(id) = self.appointment_id_under_cursor() {
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
            }
        }
    }

    pub fn set_status_under_cursor(&mut self, status: AppointmentStatus) {
        if let Some(id) = self.appointment_id_under_cursor() {
            let result = self.store.update_appointment(&id, AppointmentPatch::status(status));
            self.report(result, format!("Appointment marked {}", status));
        }
    }

    pub fn delete_under_cursor(&mut self) {
        if let Some(id) = self.appointment_id_under_cursor() {
            let result = self.store.delete_appointment(&id);
            self.expanded.remove(&id);
            let len = self.store.appointments().len();
            if self.appointment_cursor >= len {
                self.appointment_cursor = len.saturating_sub(1);
            }
            self.report(result, "Appointment deleted".to_string());
        }
    }

    pub fn export_appointments(&mut self) {
        let result = CsvExporter::export_appointments(self.store.appointments(), &self.export_file);
        self.status_message = Some(match result {
            Ok(filename) => format!("Exported {} appointment(s) to {}", self.store.appointments().len(), filename),
            Err(error) => format!("Export failed: {}", error),
        });
    }

    fn report(&mut self, result: DomainResult<()>, success: String) {
        self.status_message = Some(match result {
            Ok(()) => success,
            Err(e) => format!("{} (not saved: {})", success, e),
        });
    }
}

fn step_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    cursor.saturating_add_signed(delta).min(len - 1)
}
