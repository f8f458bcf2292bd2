use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use servicehub::cli::{
    handle_admin_command, handle_book_command, handle_booking_command, handle_bootstrap_command,
    handle_catalog_command, handle_deploy_guide, handle_provider_command, handle_smoke_test,
};
use servicehub::config::{paths::HubPaths, settings::Settings};
use servicehub::logging::init_logging;
use servicehub::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "servicehub",
    author = "ServiceHub Contributors",
    version,
    about = "Terminal marketplace for local services",
    long_about = "ServiceHub lets customers browse local service providers and book \
                  jobs through a guided wizard, while providers and administrators \
                  manage bookings from their dashboards. It also ships the operator \
                  tooling for the backend: environment bootstrap, API smoke test \
                  and deployment guide."
)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Browse categories and providers
    #[command(subcommand)]
    Catalog(servicehub::cli::CatalogCommands),

    /// Book a service through the step-by-step wizard
    Book {
        /// Provider name or ID to preselect
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Manage your bookings
    #[command(subcommand)]
    Bookings(servicehub::cli::BookingCommands),

    /// Provider dashboard commands
    #[command(subcommand)]
    Provider(servicehub::cli::ProviderCommands),

    /// Administrator dashboard commands
    #[command(subcommand)]
    Admin(servicehub::cli::AdminCommands),

    /// Prepare a backend checkout: .env file, upload directories, dependencies
    Bootstrap {
        /// Backend project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Do not run the dependency install command
        #[arg(long)]
        skip_install: bool,
    },

    /// Run the API smoke test against a running backend
    SmokeTest {
        /// API base URL (defaults to the configured one)
        #[arg(env = "SERVICEHUB_API_URL")]
        base_url: Option<String>,
    },

    /// Print the deployment guide
    DeployGuide,

    /// Initialize the data directory with the demo catalog
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The guide reads nothing from disk
    if matches!(cli.command, Some(Commands::DeployGuide)) {
        handle_deploy_guide();
        return Ok(());
    }

    // Initialize paths and settings
    let paths = HubPaths::new()?;
    let operator_command = matches!(
        cli.command,
        Some(Commands::Bootstrap { .. }) | Some(Commands::SmokeTest { .. })
    );
    let (settings, settings_error) = match Settings::load_or_create(&paths) {
        Ok(settings) => (settings, None),
        Err(e) if operator_command => (Settings::default(), Some(e)),
        Err(e) => return Err(e.into()),
    };

    let is_tui = matches!(cli.command, Some(Commands::Tui));
    let _logging = init_logging(&paths.logs_dir(), &settings.log_level, is_tui, cli.verbose)?;
    if let Some(e) = settings_error {
        tracing::warn!(error = %e, "ignoring unreadable settings, using defaults");
    }
    tracing::debug!(data_dir = %paths.data_dir().display(), "starting servicehub");

    match cli.command {
        Some(Commands::Tui) => {
            let storage = open_storage(&paths)?;
            servicehub::tui::run_tui(&storage, &settings, &paths)?;
        }
        Some(Commands::Catalog(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_catalog_command(&storage, cmd)?;
        }
        Some(Commands::Book { provider }) => {
            let storage = open_storage(&paths)?;
            handle_book_command(&storage, &settings, provider)?;
        }
        Some(Commands::Bookings(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_booking_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Provider(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_provider_command(&storage, cmd)?;
        }
        Some(Commands::Admin(cmd)) => {
            let storage = open_storage(&paths)?;
            handle_admin_command(&storage, cmd)?;
        }
        Some(Commands::Bootstrap { dir, skip_install }) => {
            let code = handle_bootstrap_command(&settings, dir, skip_install)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Some(Commands::SmokeTest { base_url }) => {
            let base_url = base_url.unwrap_or_else(|| settings.api_base_url.clone());
            let code = handle_smoke_test(&base_url)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Some(Commands::DeployGuide) => handle_deploy_guide(),
        Some(Commands::Init) => {
            println!("Initializing ServiceHub at: {}", paths.data_dir().display());
            let written = initialize_storage(&paths)?;
            let mut settings = settings;
            settings.setup_completed = true;
            settings.save(&paths)?;
            if written == 0 {
                println!("Data files already present, nothing to seed.");
            } else {
                println!("Initialization complete! Seeded {} data files.", written);
                println!();
                println!("The demo catalog contains providers for plumbing, electrical,");
                println!("cleaning, catering, beauty, home repair, moving and tutoring.");
            }
            println!();
            println!("Run 'servicehub catalog providers' to browse providers.");
        }
        Some(Commands::Config) => {
            println!("ServiceHub Configuration");
            println!("========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Logs directory:  {}", paths.logs_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:     {}", settings.api_base_url);
            println!("  Current user:     {}", settings.current_user_email);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Log level:        {}", settings.log_level);
            println!("  Install command:  {}", settings.install_command.join(" "));
        }
        None => {
            println!("ServiceHub - Terminal marketplace for local services");
            println!();
            println!("Run 'servicehub --help' for usage information.");
            println!("Run 'servicehub tui' to launch the interactive interface.");
        }
    }

    Ok(())
}

/// Load storage, seeding the demo catalog on first use
fn open_storage(paths: &HubPaths) -> Result<Storage> {
    if needs_initialization(paths) {
        tracing::info!("data directory not initialized, seeding demo catalog");
        initialize_storage(paths)?;
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    Ok(storage)
}
