//! Admin CLI commands

use clap::Subcommand;

use crate::display::{format_activity, format_stats, format_user_table};
use crate::error::HubResult;
use crate::services::{AdminService, MarketplaceCommand, MarketplaceSource};
use crate::storage::init::DEMO_ADMIN_EMAIL;
use crate::storage::Storage;

/// Admin subcommands
#[derive(Subcommand)]
pub enum AdminCommands {
    /// Platform statistics
    Stats,
    /// List all users
    Users,
    /// Mark a provider as verified
    Verify {
        /// Provider name or ID
        provider: String,
    },
    /// Suspend a user account
    Suspend {
        /// E-mail or user ID
        user: String,
    },
    /// Lift a suspension
    Reinstate {
        /// E-mail or user ID
        user: String,
    },
    /// Recent marketplace activity
    Activity {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an admin command
pub fn handle_admin_command(storage: &Storage, cmd: AdminCommands) -> HubResult<()> {
    let admin = AdminService::new(storage);

    match cmd {
        AdminCommands::Stats => println!("{}", format_stats(&admin.stats()?)),

        AdminCommands::Users => println!("{}", format_user_table(&storage.list_users()?)),

        AdminCommands::Verify { provider } => {
            let provider = admin.find_provider(&provider)?;
            let message =
                MarketplaceCommand::VerifyProvider(provider.id).execute(storage, DEMO_ADMIN_EMAIL)?;
            println!("{}", message);
        }

        AdminCommands::Suspend { user } => {
            let user = admin.find_user(&user)?;
            let message = MarketplaceCommand::SuspendUser(user.id).execute(storage, DEMO_ADMIN_EMAIL)?;
            println!("{}", message);
        }

        AdminCommands::Reinstate { user } => {
            let user = admin.find_user(&user)?;
            let message =
                MarketplaceCommand::ReinstateUser(user.id).execute(storage, DEMO_ADMIN_EMAIL)?;
            println!("{}", message);
        }

        AdminCommands::Activity { limit } => {
            println!("{}", format_activity(&storage.recent_activity(limit)?));
        }
    }

    Ok(())
}
