use crate::application::{detail_sections, App, AppMode, Tab};
use crate::domain::{choice_label, Appointment, AppointmentStatus, FieldKind, FormStep, Pet};
use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.tab {
        Tab::Pets => render_pets(f, app, chunks[1]),
        Tab::Appointments => render_appointments(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Form => render_form_popup(f, app),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal => {}
    }
}

fn tab_style(active: bool) -> Style {
    if active {
        Style::default().bg(Color::LightRed).fg(Color::Black)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled("pawbook - Pet Adoption ", Style::default().fg(Color::Cyan)),
        Span::styled(" 1 Featured Pets ", tab_style(app.tab == Tab::Pets)),
        Span::raw(" "),
        Span::styled(" 2 Appointments ", tab_style(app.tab == Tab::Appointments)),
        Span::styled(
            format!("  | {} appointments", app.store.appointments().len()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_pets(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let rows: Vec<Row> = app
        .store
        .available_pets()
        .into_iter()
        .enumerate()
        .map(|(i, pet)| {
            let selected = app.selected_pet_id.as_deref() == Some(pet.id.as_str());
            let marker = if selected { "*" } else { " " };
            let style = if i == app.pet_cursor {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(pet.name.clone()),
                Cell::from(pet.breed.clone()),
                Cell::from(format!("{}", pet.age)),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec!["", "Name", "Breed", "Age"]).style(Style::default().fg(Color::Yellow));
    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Length(10),
            Constraint::Min(12),
            Constraint::Length(3),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Featured Pets"))
    .column_spacing(1);
    f.render_widget(table, chunks[0]);

    let spotlight = app.selected_pet().or_else(|| app.pet_under_cursor());
    render_spotlight(f, spotlight, app.selected_pet().is_some(), chunks[1]);
}

fn render_spotlight(f: &mut Frame, pet: Option<&Pet>, selected: bool, area: Rect) {
    let lines = match pet {
        None => vec![
            Line::from("No pets available"),
            Line::from("All our pets have found their forever homes!"),
        ],
        Some(pet) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    pet.name.clone(),
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{} | {} | Age: {}", pet.breed, pet.pet_type.as_str(), pet.age)),
                Line::from(""),
                Line::from(pet.description.clone()),
                Line::from(""),
                Line::from(Span::styled(pet.image_url.clone(), Style::default().fg(Color::DarkGray))),
                Line::from(""),
            ];
            lines.push(if selected {
                Line::from("a: Adopt this pet | Esc: clear selection")
            } else {
                Line::from("Enter: select this pet")
            });
            lines
        }
    };

    let title = if selected { "Spotlight" } else { "Preview" };
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn status_color(status: AppointmentStatus) -> Color {
    match status {
        AppointmentStatus::Scheduled => Color::LightRed,
        AppointmentStatus::Completed => Color::Green,
        AppointmentStatus::Cancelled => Color::Red,
        AppointmentStatus::NoShow => Color::Yellow,
    }
}

/// Formats a stored date and time as `Jan 02, 2030 at 2:30 PM`, falling back
/// to the raw values when either does not parse.
pub fn format_date_time(date: &str, time: &str) -> String {
    match (
        NaiveDate::parse_from_str(date, "%Y-%m-%d"),
        NaiveTime::parse_from_str(time, "%H:%M"),
    ) {
        (Ok(d), Ok(t)) => format!("{} at {}", d.format("%b %d, %Y"), t.format("%-I:%M %p")),
        _ => format!("{} at {}", date, time),
    }
}

fn appointment_lines(appointment: &Appointment, highlighted: bool, expanded: bool) -> Vec<Line<'static>> {
    let base = if highlighted {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(if expanded { "v " } else { "> " }, base),
        Span::styled(format!("{:<10}", appointment.pet_name), base.add_modifier(Modifier::BOLD)),
        Span::styled(format!("{:<22}", appointment.customer_name), base),
        Span::styled(format!("{:<30}", format_date_time(&appointment.date, &appointment.time)), base),
        Span::styled(
            appointment.status.as_str().to_uppercase(),
            base.fg(status_color(appointment.status)),
        ),
    ])];

    if expanded {
        lines.push(Line::from(format!(
            "    {} | {}",
            appointment.customer_email, appointment.customer_phone
        )));
        match &appointment.form_data {
            None => lines.push(Line::from("    No detailed form data available")),
            Some(answers) => {
                for section in detail_sections(answers) {
                    if section.entries.is_empty() {
                        continue;
                    }
                    lines.push(Line::from(Span::styled(
                        format!("    {}", section.title),
                        Style::default().fg(Color::Yellow),
                    )));
                    for (label, value) in section.entries {
                        lines.push(Line::from(format!("      {}: {}", label, value)));
                    }
                }
            }
        }
        lines.push(Line::from(""));
    }
    lines
}

fn render_appointments(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let counts = app.store.status_counts();
    let stats = Paragraph::new(format!(
        "Total: {}   Scheduled: {}   Completed: {}",
        counts.total, counts.scheduled, counts.completed
    ))
    .block(Block::default().borders(Borders::ALL).title("Appointment Management"));
    f.render_widget(stats, chunks[0]);

    let appointments = app.store.appointments();
    if appointments.is_empty() {
        let empty = Paragraph::new("No appointments yet. Pick a pet and press 'a' to apply.")
            .block(Block::default().borders(Borders::ALL).title("Appointments"));
        f.render_widget(empty, chunks[1]);
        return;
    }

    let mut lines = Vec::new();
    let mut cursor_line = 0;
    for (i, appointment) in appointments.iter().enumerate() {
        if i == app.appointment_cursor {
            cursor_line = lines.len();
        }
        let expanded = app.expanded.contains(&appointment.id);
        lines.extend(appointment_lines(appointment, i == app.appointment_cursor, expanded));
    }

    let visible = chunks[1].height.saturating_sub(2) as usize;
    let scroll = cursor_line.saturating_sub(visible.saturating_sub(1));
    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Appointments"))
        .scroll((scroll as u16, 0));
    f.render_widget(list, chunks[1]);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.tab {
                    Tab::Pets => "↑↓: browse | Enter: select | a: adopt | Tab: appointments | ?: help | q: quit".to_string(),
                    Tab::Appointments => "↑↓: browse | Enter: details | s/c/x/n: status | d: delete | v: pet adopted | Ctrl+E: export CSV | ?: help | q: quit".to_string(),
                }
            }
        }
        AppMode::Form => app
            .status_message
            .clone()
            .unwrap_or_else(|| "Tab/↑↓: field | ←→: choose | Enter: next | Ctrl+N/P: step | Ctrl+S: submit | Esc: cancel".to_string()),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(widget, area);
}

fn popup_area(area: Rect) -> Rect {
    Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    }
}

fn with_cursor(value: &str, cursor: usize) -> String {
    let mut out: String = value.chars().take(cursor).collect();
    out.push('|');
    out.extend(value.chars().skip(cursor));
    out
}

fn render_form_popup(f: &mut Frame, app: &App) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let area = popup_area(f.area());
    f.render_widget(Clear, area);

    let step = form.step();
    let pet = form.pet();
    let progress = "#".repeat(step.number() * 5) + &"-".repeat((FormStep::COUNT - step.number()) * 5);

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} ({})", pet.name, pet.breed),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("[{}] Step {} of {}", progress, step.number(), FormStep::COUNT)),
        Line::from(Span::styled(step.title(), Style::default().fg(Color::Yellow))),
        Line::from(""),
    ];

    let focused = app.current_field();
    let mut focus_line = 0;
    for field in form.current_fields() {
        let is_focused = focused == Some(field);
        if is_focused {
            focus_line = lines.len();
        }
        let required = if field.is_required() { " *" } else { "" };
        let label_style = if is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("{}{}", field.label(), required), label_style)));

        let value = form.value(field);
        let shown = match field.kind() {
            FieldKind::Choice(_) => format!("< {} >", choice_label(&value)),
            FieldKind::Text if is_focused => with_cursor(&value, app.cursor_position),
            FieldKind::Text => value,
        };
        let value_style = if form.error(field).is_some() {
            Style::default().fg(Color::Red)
        } else if is_focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(format!("  {}", shown), value_style)));

        if let Some(error) = form.error(field) {
            lines.push(Line::from(Span::styled(format!("  {}", error), Style::default().fg(Color::Red))));
        }
    }

    let footer = if step.is_last() {
        "Esc: cancel | Ctrl+P: previous | Ctrl+S: submit application"
    } else if step.previous().is_some() {
        "Esc: cancel | Ctrl+P: previous | Ctrl+N: next"
    } else {
        "Esc: cancel | Ctrl+N: next"
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(footer, Style::default().fg(Color::DarkGray))));

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 3).saturating_sub(visible);
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Adoption Application")
                .style(Style::default().fg(Color::White)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    f.render_widget(widget, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let popup_area = popup_area(f.area());
    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("pawbook Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"PAWBOOK - PET ADOPTION

=== BROWSING PETS ===
1 / Tab         Show the featured pets
↑↓ or j/k       Move through the pet list
Enter           Put the highlighted pet in the spotlight
a               Start an adoption application for the spotlighted pet
Esc             Clear the spotlight
Only pets still looking for a home are listed.

=== ADOPTION APPLICATION ===
The application has four steps:
  1. Basic Information    name, address, phone, email
  2. Housing & Household  own or rent, lease, household, allergies
  3. Pets & Experience    current pets, previous cats
  4. Care & Commitment    care plans, commitment, appointment date and time

Tab / ↓         Next field
Shift+Tab / ↑   Previous field
←→              Choose an option (choice fields) or move the cursor (text)
Enter           Next field; on the last field, next step or submit
Ctrl+N          Next step (checks the current step first)
Ctrl+P          Previous step (answers are kept)
Ctrl+S          Submit from the last step
Esc             Discard the application

Fields marked * are required. Follow-up questions appear when they apply,
e.g. the lease question when you rent. Dates use YYYY-MM-DD and must be
today or later; times use HH:MM.

=== APPOINTMENTS ===
2 / Tab         Show appointments
↑↓ or j/k       Move through appointments
Enter           Show or hide the application details
s               Mark scheduled
c               Mark completed
x               Mark cancelled
n               Mark no-show
d / Delete      Delete the appointment
v               Mark the appointment's pet adopted / available again
Ctrl+E          Export all appointments to CSV

=== DATA ===
Appointments and pets are saved to JSON files after every change
(PAWBOOK_DATA_DIR, default ".pawbook"). Logs go to PAWBOOK_LOG_FILE.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentStore, PetSeeding, StoragePort};
    use crate::infrastructure::MemoryStorage;
    use ratatui::{backend::TestBackend, Terminal};

    fn create_test_app() -> App {
        let storage: Box<dyn StoragePort> = Box::new(MemoryStorage::default());
        let mut store = AppointmentStore::new(storage, PetSeeding::ResetOnStart);
        store.initialize().unwrap();
        App::new(store, "appointments.csv")
    }

    fn rendered_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2030-01-02", "14:30"), "Jan 02, 2030 at 2:30 PM");
        assert_eq!(format_date_time("2030-01-02", "09:05"), "Jan 02, 2030 at 9:05 AM");
        assert_eq!(format_date_time("soon", "14:30"), "soon at 14:30");
    }

    #[test]
    fn test_with_cursor() {
        assert_eq!(with_cursor("abc", 1), "a|bc");
        assert_eq!(with_cursor("", 0), "|");
    }

    #[test]
    fn test_render_pets_tab() {
        let app = create_test_app();
        let text = rendered_text(&app);
        assert!(text.contains("Featured Pets"));
        assert!(text.contains("Mittens"));
        assert!(text.contains("Tiger"));
    }

    #[test]
    fn test_render_pets_tab_hides_adopted_pets() {
        let mut app = create_test_app();
        app.store.update_pet_availability("6", false).unwrap();
        let text = rendered_text(&app);
        assert!(text.contains("Mittens"));
        assert!(!text.contains("Tiger"));
    }

    #[test]
    fn test_render_form_popup() {
        let mut app = create_test_app();
        app.select_pet_under_cursor();
        app.open_form();
        let text = rendered_text(&app);
        assert!(text.contains("Adoption Application"));
        assert!(text.contains("Step 1 of 4"));
    }

    #[test]
    fn test_render_empty_appointments() {
        let mut app = create_test_app();
        app.switch_tab(Tab::Appointments);
        let text = rendered_text(&app);
        assert!(text.contains("Total: 0"));
        assert!(text.contains("No appointments yet"));
    }
}
