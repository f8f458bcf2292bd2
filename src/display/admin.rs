//! Admin and provider dashboard formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::activity::ActivityEntry;
use crate::models::{Provider, UserAccount};
use crate::services::{EarningsSummary, PlatformStats};

pub fn format_stats(stats: &PlatformStats) -> String {
    let mut output = String::new();

    output.push_str("Platform overview\n");
    output.push_str("=================\n");
    output.push_str(&format!(
        "Users:      {:>5}  ({} customers, {} providers, {} admins, {} suspended)\n",
        stats.users, stats.customers, stats.provider_accounts, stats.admins, stats.suspended_users
    ));
    output.push_str(&format!(
        "Providers:  {:>5}  ({} verified, {} awaiting verification)\n",
        stats.providers,
        stats.verified_providers,
        stats.unverified_providers()
    ));
    output.push_str(&format!("Bookings:   {:>5}\n", stats.total_bookings()));
    for (status, count) in &stats.bookings_by_status {
        output.push_str(&format!("  {:<10} {:>5}\n", status.to_string(), count));
    }
    output.push_str(&format!("Revenue:    {} (completed bookings)\n", stats.completed_revenue));

    output
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Joined")]
    joined: String,
}

pub fn format_user_table(users: &[UserAccount]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        id: u.id.to_string(),
        name: u.name.clone(),
        email: u.email.clone(),
        role: u.role.to_string(),
        status: u.status.to_string(),
        joined: u.joined_at.format("%Y-%m-%d").to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_activity(entries: &[ActivityEntry]) -> String {
    if entries.is_empty() {
        return "No activity recorded yet.".to_string();
    }
    entries
        .iter()
        .map(|e| e.format_human_readable())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_earnings(provider: &Provider, summary: &EarningsSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Earnings for {}\n", provider.name));
    output.push_str(&format!(
        "  Completed jobs:   {:>3}  {}\n",
        summary.completed_jobs, summary.earned
    ));
    output.push_str(&format!(
        "  Scheduled jobs:   {:>3}  {}\n",
        summary.scheduled_jobs, summary.scheduled_value
    ));
    output.push_str(&format!("  Open requests:    {:>3}\n", summary.open_requests));
    output
}
