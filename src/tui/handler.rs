//! Key handling for the TUI
//!
//! Routes key presses to the open dialog, the search box, the sidebar or
//! the active view. Dashboard navigation goes through the pure reducers;
//! mutations go through `MarketplaceCommand`s and end in a notification.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, FocusedPanel, InputMode};
use super::dashboards::{reduce, DashboardAction, Section};
use super::dialogs::booking::WizardOutcome;
use super::widgets::Notification;

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Editing => handle_search_input_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return;
        }
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return;
        }
        KeyCode::Tab => {
            app.toggle_panel_focus();
            return;
        }
        KeyCode::Char('n') => {
            app.start_booking(None);
            return;
        }
        KeyCode::Esc => {
            app.notifications.dismiss();
            return;
        }
        KeyCode::Char(c) if app.focused_panel == FocusedPanel::Sidebar || !app.active_view.is_dashboard() => {
            if let Some(view) = ActiveView::from_hotkey(c) {
                app.switch_view(view);
                app.sync_dashboard_rows();
                return;
            }
        }
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Sidebar => handle_sidebar_key(app, key),
        FocusedPanel::Main => match app.active_view {
            ActiveView::Catalog => handle_catalog_key(app, key),
            ActiveView::Search => handle_search_key(app, key),
            ActiveView::UserDashboard => handle_user_dashboard_key(app, key),
            ActiveView::ProviderDashboard => handle_provider_dashboard_key(app, key),
            ActiveView::AdminDashboard => handle_admin_dashboard_key(app, key),
        },
    }
}

fn handle_sidebar_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_category(app.category_index + 1),
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_category(app.category_index.saturating_sub(1))
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.switch_view(ActiveView::Catalog);
        }
        _ => {}
    }
}

fn handle_catalog_key(app: &mut App, key: KeyEvent) {
    let count = app.catalog_providers().len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.provider_index + 1 < count {
                app.provider_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.provider_index = app.provider_index.saturating_sub(1);
        }
        KeyCode::Char('g') => app.provider_index = 0,
        KeyCode::Char('G') => app.provider_index = count.saturating_sub(1),
        KeyCode::Char('h') | KeyCode::Left => app.focused_panel = FocusedPanel::Sidebar,
        KeyCode::Enter | KeyCode::Char('b') => {
            if let Some(provider) = app.selected_provider() {
                app.start_booking(Some(provider));
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    let count = app.search_results().len();
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('i') => app.input_mode = InputMode::Editing,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.search.selected + 1 < count {
                app.search.selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.search.selected = app.search.selected.saturating_sub(1);
        }
        KeyCode::Char('s') => app.search.cycle_sort(),
        KeyCode::Char('v') => app.search.toggle_verified(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.search.raise_min_rating(),
        KeyCode::Char('-') => app.search.lower_min_rating(),
        KeyCode::Char('[') => app.search.lower_max_rate(),
        KeyCode::Char(']') => app.search.raise_max_rate(),
        KeyCode::Char('c') => {
            let category = app.selected_category().map(|c| c.name);
            app.search.toggle_category(category);
        }
        KeyCode::Char('x') => app.search.clear(),
        KeyCode::Enter | KeyCode::Char('b') => {
            if let Some(provider) = app.selected_provider() {
                app.start_booking(Some(provider));
            }
        }
        _ => {}
    }
}

fn handle_search_input_key(app: &mut App, key: KeyEvent) {
    let input = &mut app.search.input;
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            return;
        }
        KeyCode::Char(c) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => return,
    }
    // Results follow the text as it is typed
    app.search.sync_text();
}

/// Keys every dashboard shares, mapped onto reducer actions
fn dashboard_action<S: Section>(key: KeyEvent) -> Option<DashboardAction<S>> {
    match key.code {
        KeyCode::Char('l') | KeyCode::Right => Some(DashboardAction::NextSection),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(DashboardAction::PrevSection),
        KeyCode::Char('j') | KeyCode::Down => Some(DashboardAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(DashboardAction::MoveUp),
        KeyCode::Char(c) => S::from_hotkey(c).map(DashboardAction::Select),
        _ => None,
    }
}

fn handle_user_dashboard_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = dashboard_action(key) {
        app.sync_dashboard_rows();
        app.user_dashboard = reduce(app.user_dashboard, action);
        app.sync_dashboard_rows();
        return;
    }

    if key.code == KeyCode::Char('c') {
        match app.user_view() {
            Ok(view) => {
                if let Some(command) = view.cancel_command(&app.user_dashboard) {
                    app.request_command(command);
                }
            }
            Err(e) => app.notify(Notification::error(e.to_string())),
        }
    }
}

fn handle_provider_dashboard_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = dashboard_action(key) {
        app.sync_dashboard_rows();
        app.provider_dashboard = reduce(app.provider_dashboard, action);
        app.sync_dashboard_rows();
        return;
    }

    if key.code == KeyCode::Char('p') {
        app.cycle_dashboard_provider();
        app.sync_dashboard_rows();
        return;
    }

    let view = match app.provider_view() {
        Ok(view) => view,
        Err(e) => {
            app.notify(Notification::error(e.to_string()));
            return;
        }
    };
    let state = app.provider_dashboard;
    let command = match key.code {
        KeyCode::Char('a') => view.accept_command(&state),
        KeyCode::Char('d') => view.decline_command(&state),
        KeyCode::Char('c') => view.complete_command(&state),
        _ => None,
    };
    if let Some(command) = command {
        app.request_command(command);
    }
}

fn handle_admin_dashboard_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = dashboard_action(key) {
        app.sync_dashboard_rows();
        app.admin_dashboard = reduce(app.admin_dashboard, action);
        app.sync_dashboard_rows();
        return;
    }

    let view = match app.admin_view() {
        Ok(view) => view,
        Err(e) => {
            app.notify(Notification::error(e.to_string()));
            return;
        }
    };
    let state = app.admin_dashboard;
    let command = match key.code {
        KeyCode::Char('v') => view.verify_command(&state),
        KeyCode::Char('s') => view.suspend_command(&state),
        KeyCode::Char('r') => view.reinstate_command(&state),
        KeyCode::Char('c') => view.cancel_command(&state),
        _ => None,
    };
    if let Some(command) = command {
        app.request_command(command);
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog.clone() {
        ActiveDialog::None => {}
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::Confirm(command) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.close_dialog();
                app.execute_command(command);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::BookingWizard => handle_wizard_key(app, key),
    }
}

fn handle_wizard_key(app: &mut App, key: KeyEvent) {
    let categories: Vec<String> = app.categories().into_iter().map(|c| c.name).collect();
    let at_confirm = app.wizard.wizard.is_at_confirm();

    let outcome = match key.code {
        KeyCode::Enter => app.wizard.next(&categories),
        KeyCode::Tab if !at_confirm => app.wizard.next(&categories),
        KeyCode::BackTab => {
            app.wizard.back(&categories);
            WizardOutcome::Continue
        }
        KeyCode::Esc => app.wizard.escape(&categories),
        KeyCode::Up => {
            app.wizard.previous_field(&categories);
            WizardOutcome::Continue
        }
        KeyCode::Down => {
            if app.wizard.current_field().is_some()
                && app.wizard.field_index + 1 < crate::wizard::DraftField::for_step(app.wizard.step()).len()
            {
                app.wizard.next(&categories)
            } else {
                WizardOutcome::Continue
            }
        }
        _ if at_confirm => WizardOutcome::Continue,
        KeyCode::Char(c) => {
            app.wizard.input.insert(c);
            WizardOutcome::Continue
        }
        KeyCode::Backspace => {
            app.wizard.input.backspace();
            WizardOutcome::Continue
        }
        KeyCode::Delete => {
            app.wizard.input.delete();
            WizardOutcome::Continue
        }
        KeyCode::Left => {
            app.wizard.input.move_left();
            WizardOutcome::Continue
        }
        KeyCode::Right => {
            app.wizard.input.move_right();
            WizardOutcome::Continue
        }
        _ => WizardOutcome::Continue,
    };

    match outcome {
        WizardOutcome::Continue => {}
        WizardOutcome::Cancelled => {
            app.close_dialog();
            app.notify(Notification::info("Booking discarded"));
        }
        WizardOutcome::Confirmed(confirmed) => {
            app.close_dialog();
            app.submit_booking(confirmed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HubPaths;
    use crate::config::settings::Settings;
    use crate::storage::{initialize_storage, Storage};
    use crate::tui::dashboards::{AdminSection, UserSection};
    use crate::wizard::BookingStep;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key_event(app, key(*code));
        }
    }

    fn fixture() -> (TempDir, HubPaths, Settings, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        (temp_dir, paths, Settings::default(), storage)
    }

    #[test]
    fn test_view_switching_and_quit() {
        let (_dir, paths, settings, storage) = fixture();
        let mut app = App::new(&storage, &settings, &paths);

        press(&mut app, &[KeyCode::Char('5')]);
        assert_eq!(app.active_view, ActiveView::AdminDashboard);

        // Digits select sections inside a dashboard
        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.active_view, ActiveView::AdminDashboard);
        assert_eq!(app.admin_dashboard.section, AdminSection::Users);

        press(&mut app, &[KeyCode::Tab, KeyCode::Char('1')]);
        assert_eq!(app.active_view, ActiveView::Catalog);

        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.should_quit);
    }

    #[test]
    fn test_dashboard_keys_use_reducer() {
        let (_dir, paths, settings, storage) = fixture();
        let mut app = App::new(&storage, &settings, &paths);
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.user_dashboard.section, UserSection::Upcoming);
        assert_eq!(app.user_dashboard.rows, 2);

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Char('j')]);
        assert_eq!(app.user_dashboard.selected, 1);

        press(&mut app, &[KeyCode::Char('h')]);
        assert_eq!(app.user_dashboard.section, UserSection::Profile);
        assert_eq!(app.user_dashboard.selected, 0);
    }

    #[test]
    fn test_cancel_needs_confirmation() {
        let (_dir, paths, settings, storage) = fixture();
        let mut app = App::new(&storage, &settings, &paths);
        press(&mut app, &[KeyCode::Char('3'), KeyCode::Char('c')]);
        assert!(matches!(app.active_dialog, ActiveDialog::Confirm(_)));

        press(&mut app, &[KeyCode::Char('n')]);
        assert!(!app.has_dialog());
        assert!(app.notifications.is_empty());

        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('y')]);
        assert!(!app.has_dialog());
        assert_eq!(app.user_dashboard.rows, 1);
    }

    #[test]
    fn test_search_typing_filters() {
        let (_dir, paths, settings, storage) = fixture();
        let mut app = App::new(&storage, &settings, &paths);
        press(&mut app, &[KeyCode::Char('2'), KeyCode::Char('/')]);
        assert_eq!(app.input_mode, InputMode::Editing);

        // 'q' is text while typing, not quit
        press(&mut app, &[KeyCode::Char('q'), KeyCode::Backspace]);
        for c in "spark".chars() {
            press(&mut app, &[KeyCode::Char(c)]);
        }
        press(&mut app, &[KeyCode::Enter]);
        assert!(!app.should_quit);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.search.query.text, "spark");

        let results = app.search_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Spark Electric");
    }

    #[test]
    fn test_wizard_through_keys() {
        let (_dir, paths, settings, storage) = fixture();
        let mut app = App::new(&storage, &settings, &paths);
        let before = storage.bookings.count().unwrap();

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.active_dialog, ActiveDialog::BookingWizard);
        assert!(app.wizard.provider_name.is_some());

        press(&mut app, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(app.wizard.step(), BookingStep::Time);

        press(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.wizard.step(), BookingStep::Service);

        for _ in 0..13 {
            press(&mut app, &[KeyCode::Tab]);
        }
        assert_eq!(app.wizard.step(), BookingStep::Confirm);

        // Tab does nothing on the summary; Enter submits
        press(&mut app, &[KeyCode::Tab]);
        assert!(app.has_dialog());
        press(&mut app, &[KeyCode::Enter]);
        assert!(!app.has_dialog());
        assert_eq!(storage.bookings.count().unwrap(), before + 1);
    }

    #[test]
    fn test_wizard_escape_discards() {
        let (_dir, paths, settings, storage) = fixture();
        let mut app = App::new(&storage, &settings, &paths);
        press(&mut app, &[KeyCode::Char('n'), KeyCode::Esc]);
        assert!(!app.has_dialog());
        assert_eq!(app.notifications.current().unwrap().message, "Booking discarded");
    }
}
