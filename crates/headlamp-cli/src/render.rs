//! Terminal rendering of turns, drafts and application listings.

use chrono::{DateTime, Local, NaiveDateTime};
use colored::Colorize;
use headlamp_core::application::{ApplicationStatus, SubmittedApplication};
use headlamp_core::chat::{ConversationTurn, OrganizationRef};
use headlamp_core::draft::DraftEditor;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn print_assistant_turn(turn: &ConversationTurn) {
    println!(
        "{}",
        format!("Headlamp, {}", format_timestamp(Some(turn.created_at()))).bright_black()
    );
    for line in turn.content().lines() {
        println!("{}", line.bright_blue());
    }
    if let Some(orgs) = turn.organizations() {
        println!();
        for org in orgs {
            println!("{}", organization_card(org));
        }
        println!(
            "{}",
            "Use /select <id,id,...> <message> to pick organizations.".bright_black()
        );
    }
    if turn.draft().is_some() {
        println!(
            "{}",
            "An application draft is ready. Type /review to check it.".bright_yellow()
        );
    }
    println!();
}

fn organization_card(org: &OrganizationRef) -> String {
    if org.description.is_empty() {
        format!("  [{}] {}", org.id, org.name.bold())
    } else {
        format!("  [{}] {} - {}", org.id, org.name.bold(), org.description)
    }
}

pub fn print_draft(editor: &DraftEditor) {
    println!("{}", "Application draft".bright_magenta().bold());
    println!("  name:    {}", editor.name());
    println!("  phone:   {}", editor.phone());
    println!("  email:   {}", editor.email().unwrap_or("-"));
    println!("  summary: {}", editor.summary());
    println!("  organizations:");
    for org in editor.offered() {
        let mark = if editor.is_selected(org.id) { "[x]" } else { "[ ]" };
        println!("    {mark} {} {}", org.id, org.name);
    }
    let consent = if editor.has_consent() { "given" } else { "not given" };
    println!("  consent: {consent}");
    match editor.validation_issue() {
        Some(issue) => println!("{}", issue.to_string().yellow()),
        None => println!("{}", "Ready to submit.".green()),
    }
}

pub fn print_applications(applications: &[SubmittedApplication]) {
    if applications.is_empty() {
        println!("{}", "No applications yet.".bright_black());
        return;
    }
    for app in applications {
        let urgent = if app.urgent {
            format!(" {}", "URGENT".red().bold())
        } else {
            String::new()
        };
        println!(
            "{} organization {}{}",
            status_label(app.status()),
            app.organization_id,
            urgent
        );
        println!("    submitted {}", format_timestamp(Some(&app.submitted_at)));
        println!("    opened    {}", format_timestamp(app.opened_at.as_deref()));
        println!("    accepted  {}", format_timestamp(app.accepted_at.as_deref()));
        println!("    denied    {}", format_timestamp(app.denied_at.as_deref()));
    }
}

fn status_label(status: ApplicationStatus) -> String {
    let label = format!("[{}]", status.label());
    match status {
        ApplicationStatus::Submitted => label.normal().to_string(),
        ApplicationStatus::Opened => label.yellow().to_string(),
        ApplicationStatus::Accepted => label.green().to_string(),
        ApplicationStatus::Denied => label.red().to_string(),
    }
}

/// Local time when the value parses, the raw text otherwise, `-` when absent.
///
/// Values without an offset are already local.
pub fn format_timestamp(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}
