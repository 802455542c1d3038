use crate::application::{App, AppMode, Tab};
use crate::domain::AppointmentStatus;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if key == KeyCode::Char('e') {
                app.export_appointments();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Tab => {
                let next = match app.tab {
                    Tab::Pets => Tab::Appointments,
                    Tab::Appointments => Tab::Pets,
                };
                app.switch_tab(next);
            }
            KeyCode::Char('1') => app.switch_tab(Tab::Pets),
            KeyCode::Char('2') => app.switch_tab(Tab::Appointments),
            KeyCode::F(1) | KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => match app.tab {
                Tab::Pets => Self::handle_pets_tab(app, key),
                Tab::Appointments => Self::handle_appointments_tab(app, key),
            },
        }
    }

    fn handle_pets_tab(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_pet_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_pet_cursor(1),
            KeyCode::Enter => app.select_pet_under_cursor(),
            KeyCode::Char('a') => app.open_form(),
            KeyCode::Esc => app.clear_selection(),
            _ => {}
        }
    }

    fn handle_appointments_tab(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_appointment_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_appointment_cursor(1),
            KeyCode::Enter => app.toggle_expanded(),
            KeyCode::Char('s') => app.set_status_under_cursor(AppointmentStatus::Scheduled),
            KeyCode::Char('c') => app.set_status_under_cursor(AppointmentStatus::Completed),
            KeyCode::Char('x') => app.set_status_under_cursor(AppointmentStatus::Cancelled),
            KeyCode::Char('n') => app.set_status_under_cursor(AppointmentStatus::NoShow),
            KeyCode::Char('d') | KeyCode::Delete => app.delete_under_cursor(),
            KeyCode::Char('v') => app.toggle_pet_availability(),
            _ => {}
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('n') => app.form_next_step(),
                KeyCode::Char('p') => app.form_previous_step(),
                KeyCode::Char('s') => app.submit_form(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Esc => app.cancel_form(),
            KeyCode::Enter => app.form_advance(),
            KeyCode::Tab | KeyCode::Down => app.next_field(),
            KeyCode::BackTab | KeyCode::Up => app.previous_field(),
            KeyCode::Left => app.form_horizontal(false),
            KeyCode::Right => app.form_horizontal(true),
            KeyCode::Home => app.cursor_to_start(),
            KeyCode::End => app.cursor_to_end(),
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentStore, FormField, FormStep, PetSeeding, StoragePort};
    use crate::infrastructure::MemoryStorage;

    fn create_test_app() -> App {
        let storage: Box<dyn StoragePort> = Box::new(MemoryStorage::default());
        let mut store = AppointmentStore::new(storage, PetSeeding::ResetOnStart);
        store.initialize().unwrap();
        App::new(store, "appointments.csv")
    }

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_tab_switching() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Appointments);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.tab, Tab::Pets);
    }

    #[test]
    fn test_select_pet_and_open_form() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));

        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.form.as_ref().unwrap().pet().name, "Shadow");
    }

    #[test]
    fn test_form_typing_goes_to_field_not_shortcuts() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));

        type_str(&mut app, "q?1 jack");
        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.form.as_ref().unwrap().value(FormField::FullName), "q?1 jack");
    }

    #[test]
    fn test_form_step_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('a'));

        for text in ["Ada", "Somewhere 1", "555", "ada@example.com"] {
            type_str(&mut app, text);
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.form.as_ref().unwrap().step(), FormStep::Housing);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(app.form.as_ref().unwrap().step(), FormStep::Basics);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert_eq!(app.form.as_ref().unwrap().step(), FormStep::Housing);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.form.is_none());
    }

    #[test]
    fn test_status_message_clears_on_next_key() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.status_message.as_deref(), Some("Select a pet first (Enter)"));

        press(&mut app, KeyCode::Down);
        assert!(app.status_message.is_none());
        assert_eq!(app.pet_cursor, 1);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode, AppMode::Help);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.help_scroll, 5);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
    }
}
