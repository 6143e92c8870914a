//! Console formatter for hub output

use colored::Colorize;
use hub_domain::{AgentStatus, QueueStatus, Room, User};

/// Formats hub data for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One-line error rendering.
    pub fn error_line(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    /// Post-login summary.
    pub fn user_line(user: &User) -> String {
        format!(
            "{} {} - {} / {}",
            "Logged in:".green().bold(),
            user.name,
            user.department,
            user.role
        )
    }

    /// Room listing, one line per room.
    pub fn rooms(rooms: &[Room]) -> String {
        if rooms.is_empty() {
            return "No rooms.".dimmed().to_string();
        }
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Company chat rooms".cyan().bold()));
        for room in rooms {
            match &room.last_message {
                Some(last) => {
                    out.push_str(&format!(
                        "  {}  {}  {}\n",
                        room.id.dimmed(),
                        room.name.bold(),
                        last.dimmed()
                    ));
                }
                None => {
                    out.push_str(&format!("  {}  {}\n", room.id.dimmed(), room.name.bold()));
                }
            }
        }
        out
    }

    /// Queue monitor snapshot: counters plus agent rows.
    pub fn queue(status: &QueueStatus, agents: &[AgentStatus]) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Queue Monitor".cyan().bold()));
        out.push_str(&format!(
            "  Inbound:  {} waiting, {}/{} agents available\n",
            status.inbound_waiting.to_string().bold(),
            status.inbound_agents_available,
            status.inbound_agents_total,
        ));
        out.push_str(&format!(
            "  Outbound: {} campaigns, {} calls in progress, {} today\n",
            status.outbound_active_campaigns,
            status.outbound_calls_in_progress,
            status.outbound_calls_today,
        ));

        if !agents.is_empty() {
            out.push('\n');
            for agent in agents {
                let status_label = match agent.status {
                    hub_domain::Availability::Available => agent.status.label().green(),
                    hub_domain::Availability::Busy => agent.status.label().red(),
                    _ => agent.status.label().dimmed(),
                };
                match (&agent.current_call, agent.call_duration) {
                    (Some(number), Some(secs)) => {
                        out.push_str(&format!(
                            "  {:<20} {:<10} {} ({}s)\n",
                            agent.name, status_label, number, secs
                        ));
                    }
                    _ => {
                        out.push_str(&format!("  {:<20} {}\n", agent.name, status_label));
                    }
                }
            }
        }
        out
    }
}
