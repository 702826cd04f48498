//! # Team Reminders
//!
//! Staff roster and the reminder emails sent to it.
//!
//! Reminders are built here as plain [`TeamMessage`] values; delivering them
//! is the email client's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::TeamMember;
use crate::validation::{validate_email, validate_required};

/// Subject of a reminder sent to one member.
pub const INDIVIDUAL_SUBJECT: &str = "Individual Reminder from TriPUS";

/// Subject of a bulk reminder.
pub const TEAM_SUBJECT: &str = "Team Reminder from TriPUS";

/// Body used when a bulk reminder has no custom message.
pub const DEFAULT_TEAM_MESSAGE: &str = "This is a team reminder from TriPUS.";

/// A custom email addressed to a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TeamMessage {
    pub to: String,
    pub member_name: String,
    pub subject: String,
    pub html: String,
}

/// The roster a fresh install starts with.
pub fn default_team() -> Vec<TeamMember> {
    let member = |id: &str, name: &str, email: &str, role: &str, (y, m, d): (i32, u32, u32)| {
        TeamMember {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            join_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        }
    };

    vec![
        member("1", "John Doe", "john@example.com", "Manager", (2024, 1, 15)),
        member("2", "Jane Smith", "jane@example.com", "Sales Associate", (2024, 2, 1)),
        member("3", "Mike Johnson", "mike@example.com", "Inventory Specialist", (2024, 1, 20)),
    ]
}

/// Validates and builds a team member.
pub fn new_member(
    id: String,
    name: &str,
    email: &str,
    role: &str,
    join_date: NaiveDate,
) -> CoreResult<TeamMember> {
    validate_required("name", name)?;
    validate_email(email)?;
    validate_required("role", role)?;

    Ok(TeamMember {
        id,
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        role: role.trim().to_string(),
        join_date,
    })
}

/// Personal reminder for one member.
pub fn individual_reminder(member: &TeamMember) -> TeamMessage {
    let html = format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
            "<h2 style=\"color: #333446;\">Hello {name}!</h2>",
            "<p>This is a personal reminder from the TriPUS team.</p>",
            "<p>Role: {role}</p>",
            "<p>Please check your tasks and updates.</p>",
            "<p>Best regards,<br>TriPUS Team</p>",
            "</div>"
        ),
        name = escape_html(&member.name),
        role = escape_html(&member.role),
    );

    TeamMessage {
        to: member.email.clone(),
        member_name: member.name.clone(),
        subject: INDIVIDUAL_SUBJECT.to_string(),
        html,
    }
}

/// Bulk reminder for one member, with an optional custom message.
pub fn team_reminder(member: &TeamMember, message: Option<&str>) -> TeamMessage {
    let body = message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_TEAM_MESSAGE);

    let html = format!(
        concat!(
            "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
            "<h2 style=\"color: #333446;\">Hello {name}!</h2>",
            "<p>{body}</p>",
            "<p>Role: {role}</p>",
            "<p>Best regards,<br>TriPUS Team</p>",
            "</div>"
        ),
        name = escape_html(&member.name),
        body = escape_html(body),
        role = escape_html(&member.role),
    );

    TeamMessage {
        to: member.email.clone(),
        member_name: member.name.clone(),
        subject: TEAM_SUBJECT.to_string(),
        html,
    }
}

/// Bulk reminders for the selected members, in roster order.
///
/// ## Errors
/// - `Validation` when nothing (or nothing known) is selected
pub fn bulk_reminders(
    roster: &[TeamMember],
    selected_ids: &[String],
    message: Option<&str>,
) -> CoreResult<Vec<TeamMessage>> {
    let messages: Vec<TeamMessage> = roster
        .iter()
        .filter(|m| selected_ids.contains(&m.id))
        .map(|m| team_reminder(m, message))
        .collect();

    if messages.is_empty() {
        return Err(ValidationError::Required {
            field: "selected members".to_string(),
        }
        .into());
    }

    Ok(messages)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
