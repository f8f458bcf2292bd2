//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Marketplace data is read from storage on demand; only cursors, dialog
//! state and notifications live here.

use chrono::Local;

use crate::config::paths::HubPaths;
use crate::config::settings::Settings;
use crate::error::{HubError, HubResult};
use crate::models::{Provider, ServiceCategory};
use crate::services::{BookingService, CatalogService, MarketplaceCommand};
use crate::storage::init::DEMO_ADMIN_EMAIL;
use crate::storage::Storage;
use crate::wizard::{BookingWizard, ConfirmedBooking};

use super::dashboards::{
    reduce, AdminDashboard, AdminView, DashboardAction, ProviderDashboard, ProviderView,
    UserDashboard, UserView,
};
use super::dialogs::booking::WizardDialogState;
use super::views::search::SearchState;
use super::widgets::{Notification, NotificationQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Catalog,
    Search,
    UserDashboard,
    ProviderDashboard,
    AdminDashboard,
}

impl ActiveView {
    pub fn all() -> &'static [Self] {
        &[
            Self::Catalog,
            Self::Search,
            Self::UserDashboard,
            Self::ProviderDashboard,
            Self::AdminDashboard,
        ]
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Catalog => "Catalog",
            Self::Search => "Search",
            Self::UserDashboard => "My Bookings",
            Self::ProviderDashboard => "Provider",
            Self::AdminDashboard => "Admin",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Self::Catalog => '1',
            Self::Search => '2',
            Self::UserDashboard => '3',
            Self::ProviderDashboard => '4',
            Self::AdminDashboard => '5',
        }
    }

    pub fn from_hotkey(c: char) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.hotkey() == c)
    }

    pub fn is_dashboard(self) -> bool {
        matches!(
            self,
            Self::UserDashboard | Self::ProviderDashboard | Self::AdminDashboard
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    Sidebar,
    #[default]
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    /// Destructive command waiting for y/n
    Confirm(MarketplaceCommand),
    BookingWizard,
}

pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub paths: &'a HubPaths,

    pub should_quit: bool,
    pub active_view: ActiveView,
    pub focused_panel: FocusedPanel,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Sidebar cursor: 0 is "All", n is the nth category
    pub category_index: usize,

    /// Catalog table cursor
    pub provider_index: usize,

    pub search: SearchState,

    pub user_dashboard: UserDashboard,
    pub provider_dashboard: ProviderDashboard,
    pub admin_dashboard: AdminDashboard,

    /// Which provider the provider dashboard shows, index into the provider list
    pub dashboard_provider: usize,

    pub wizard: WizardDialogState,

    pub notifications: NotificationQueue,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings, paths: &'a HubPaths) -> Self {
        Self {
            storage,
            settings,
            paths,
            should_quit: false,
            active_view: ActiveView::default(),
            focused_panel: FocusedPanel::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            category_index: 0,
            provider_index: 0,
            search: SearchState::new(),
            user_dashboard: UserDashboard::new(),
            provider_dashboard: ProviderDashboard::new(),
            admin_dashboard: AdminDashboard::new(),
            dashboard_provider: 0,
            wizard: WizardDialogState::new(),
            notifications: NotificationQueue::new(),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.focused_panel = FocusedPanel::Main;
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_panel_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Sidebar => FocusedPanel::Main,
            FocusedPanel::Main => FocusedPanel::Sidebar,
        };
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    // Catalog

    pub fn categories(&self) -> Vec<ServiceCategory> {
        CatalogService::new(self.storage)
            .list_categories()
            .unwrap_or_default()
    }

    /// Category picked in the sidebar, `None` for "All"
    pub fn selected_category(&self) -> Option<ServiceCategory> {
        self.category_index
            .checked_sub(1)
            .and_then(|i| self.categories().into_iter().nth(i))
    }

    /// Providers listed in the catalog view for the sidebar category
    pub fn catalog_providers(&self) -> Vec<Provider> {
        let catalog = CatalogService::new(self.storage);
        let result = match self.selected_category() {
            Some(category) => catalog.providers_in_category(&category.name),
            None => catalog.list_providers(),
        };
        result.unwrap_or_default()
    }

    pub fn search_results(&self) -> Vec<Provider> {
        CatalogService::new(self.storage)
            .search(&self.search.query)
            .unwrap_or_default()
    }

    /// Provider under the cursor in the catalog or search view
    pub fn selected_provider(&self) -> Option<Provider> {
        match self.active_view {
            ActiveView::Catalog => self.catalog_providers().into_iter().nth(self.provider_index),
            ActiveView::Search => self.search_results().into_iter().nth(self.search.selected),
            _ => None,
        }
    }

    pub fn select_category(&mut self, index: usize) {
        self.category_index = index.min(self.categories().len());
        self.provider_index = 0;
    }

    // Dashboards

    pub fn user_view(&self) -> HubResult<UserView> {
        UserView::load(
            self.storage,
            &self.settings.current_user_email,
            Local::now().date_naive(),
        )
    }

    pub fn provider_view(&self) -> HubResult<ProviderView> {
        let providers = CatalogService::new(self.storage).list_providers()?;
        if providers.is_empty() {
            return Err(HubError::provider_not_found("any provider"));
        }
        let provider = providers[self.dashboard_provider % providers.len()].clone();
        ProviderView::load(self.storage, provider)
    }

    pub fn admin_view(&self) -> HubResult<AdminView> {
        AdminView::load(self.storage)
    }

    /// Show the next provider's dashboard
    pub fn cycle_dashboard_provider(&mut self) {
        self.dashboard_provider = self.dashboard_provider.wrapping_add(1);
        self.provider_dashboard = ProviderDashboard::new();
    }

    /// Tell the active dashboard how many rows its section has now
    pub fn sync_dashboard_rows(&mut self) {
        match self.active_view {
            ActiveView::UserDashboard => {
                let rows = self
                    .user_view()
                    .map(|v| v.rows(self.user_dashboard.section))
                    .unwrap_or(0);
                self.user_dashboard = reduce(self.user_dashboard, DashboardAction::RowsLoaded(rows));
            }
            ActiveView::ProviderDashboard => {
                let rows = self
                    .provider_view()
                    .map(|v| v.rows(self.provider_dashboard.section))
                    .unwrap_or(0);
                self.provider_dashboard =
                    reduce(self.provider_dashboard, DashboardAction::RowsLoaded(rows));
            }
            ActiveView::AdminDashboard => {
                let rows = self
                    .admin_view()
                    .map(|v| v.rows(self.admin_dashboard.section))
                    .unwrap_or(0);
                self.admin_dashboard =
                    reduce(self.admin_dashboard, DashboardAction::RowsLoaded(rows));
            }
            ActiveView::Catalog | ActiveView::Search => {}
        }
    }

    // Commands

    /// Name recorded in the activity log for commands run from the active view
    pub fn actor(&self) -> String {
        match self.active_view {
            ActiveView::ProviderDashboard => self
                .provider_view()
                .map(|v| v.provider.name)
                .unwrap_or_else(|_| "provider".into()),
            ActiveView::AdminDashboard => DEMO_ADMIN_EMAIL.to_string(),
            _ => self.settings.current_user_email.clone(),
        }
    }

    /// Run a command, asking for confirmation first when it is destructive
    pub fn request_command(&mut self, command: MarketplaceCommand) {
        if command.is_destructive() {
            self.open_dialog(ActiveDialog::Confirm(command));
        } else {
            self.execute_command(command);
        }
    }

    pub fn execute_command(&mut self, command: MarketplaceCommand) {
        let actor = self.actor();
        let result = command.execute(self.storage, &actor);
        if let Err(e) = &result {
            tracing::warn!(command = %command, error = %e, "command failed");
        }
        self.notify(Notification::from_result(result));
        self.sync_dashboard_rows();
    }

    // Booking

    pub fn start_booking(&mut self, provider: Option<Provider>) {
        let (wizard, provider_name) = match provider {
            Some(p) => (BookingWizard::for_provider(p.id, p.category.clone()), Some(p.name)),
            None => (BookingWizard::new(), None),
        };
        self.wizard.start(wizard, provider_name);
        self.open_dialog(ActiveDialog::BookingWizard);
    }

    pub fn submit_booking(&mut self, confirmed: ConfirmedBooking) {
        let result = self.submit_confirmed(confirmed);
        self.notify(Notification::from_result(result));
        self.sync_dashboard_rows();
    }

    fn submit_confirmed(&self, confirmed: ConfirmedBooking) -> HubResult<String> {
        let customer = self
            .storage
            .users
            .get_by_email(&self.settings.current_user_email)?
            .ok_or_else(|| HubError::user_not_found(&self.settings.current_user_email))?;
        let booking = BookingService::new(self.storage).submit(confirmed.draft, &customer)?;
        Ok(format!("Booked {}: {}", booking.id, booking.headline()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::initialize_storage;
    use crate::storage::init::DEMO_CUSTOMER_EMAIL;
    use crate::tui::dashboards::{AdminSection, UserSection};
    use crate::tui::widgets::NotificationKind;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, HubPaths, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HubPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let settings = Settings {
            current_user_email: DEMO_CUSTOMER_EMAIL.to_string(),
            ..Settings::default()
        };
        (temp_dir, paths, settings)
    }

    fn storage(paths: &HubPaths) -> Storage {
        let storage = Storage::new(paths.clone()).unwrap();
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_view_hotkeys() {
        assert_eq!(ActiveView::from_hotkey('5'), Some(ActiveView::AdminDashboard));
        assert_eq!(ActiveView::from_hotkey('0'), None);
        assert!(ActiveView::UserDashboard.is_dashboard());
        assert!(!ActiveView::Search.is_dashboard());
    }

    #[test]
    fn test_category_filter() {
        let (_dir, paths, settings) = fixture();
        let storage = storage(&paths);
        let mut app = App::new(&storage, &settings, &paths);

        let all = app.catalog_providers().len();
        app.select_category(1);
        let plumbing = app.catalog_providers();
        assert!(plumbing.len() < all);
        assert!(plumbing.iter().all(|p| p.category == "Plumbing"));

        app.select_category(99);
        assert_eq!(app.category_index, app.categories().len());
    }

    #[test]
    fn test_destructive_command_asks_first() {
        let (_dir, paths, settings) = fixture();
        let storage = storage(&paths);
        let mut app = App::new(&storage, &settings, &paths);
        app.switch_view(ActiveView::UserDashboard);

        let view = app.user_view().unwrap();
        let command = view.cancel_command(&app.user_dashboard).unwrap();
        app.request_command(command);
        assert_eq!(app.active_dialog, ActiveDialog::Confirm(command));
        assert!(app.notifications.is_empty());

        app.close_dialog();
        app.execute_command(command);
        assert_eq!(
            app.notifications.current().unwrap().kind,
            NotificationKind::Success
        );
    }

    #[test]
    fn test_failed_command_notifies_error() {
        let (_dir, paths, settings) = fixture();
        let storage = storage(&paths);
        let mut app = App::new(&storage, &settings, &paths);
        app.switch_view(ActiveView::AdminDashboard);
        app.admin_dashboard = reduce(
            app.admin_dashboard,
            DashboardAction::Select(AdminSection::Providers),
        );

        let view = app.admin_view().unwrap();
        let verified = view.providers.iter().position(|p| p.verified).unwrap();
        app.admin_dashboard = reduce(app.admin_dashboard, DashboardAction::RowsLoaded(view.providers.len()));
        for _ in 0..verified {
            app.admin_dashboard = reduce(app.admin_dashboard, DashboardAction::MoveDown);
        }

        let command = view.verify_command(&app.admin_dashboard).unwrap();
        app.request_command(command);
        assert!(!app.has_dialog());
        assert_eq!(
            app.notifications.current().unwrap().kind,
            NotificationKind::Error
        );
    }

    #[test]
    fn test_submit_booking_from_wizard() {
        let (_dir, paths, settings) = fixture();
        let storage = storage(&paths);
        let mut app = App::new(&storage, &settings, &paths);
        let before = storage.bookings.count().unwrap();

        app.start_booking(app.catalog_providers().into_iter().next());
        assert_eq!(app.active_dialog, ActiveDialog::BookingWizard);

        let mut wizard = app.wizard.wizard.clone();
        for _ in 0..4 {
            wizard.advance();
        }
        let confirmed = wizard.confirm().unwrap();
        app.submit_booking(confirmed);

        assert_eq!(storage.bookings.count().unwrap(), before + 1);
        assert_eq!(
            app.notifications.current().unwrap().kind,
            NotificationKind::Success
        );

        app.switch_view(ActiveView::UserDashboard);
        app.user_dashboard = reduce(app.user_dashboard, DashboardAction::Select(UserSection::Upcoming));
        app.sync_dashboard_rows();
        assert!(app.user_dashboard.rows >= 1);
    }
}
