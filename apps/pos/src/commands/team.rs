//! # Team Commands
//!
//! Team roster and reminder emails. The roster lives only in the session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::SessionState;
use crate::AppContext;
use tripus_core::team::{bulk_reminders, individual_reminder};
use tripus_core::TeamMember;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Result of a bulk team reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReminderResponse {
    pub attempted: usize,
    pub delivered: usize,
    /// Addresses whose send failed.
    pub failed: Vec<String>,
}

pub fn list_team(session: &SessionState) -> Vec<TeamMember> {
    debug!("list_team command");
    session.with_session(|s| s.team().to_vec())
}

/// Adds a member joining on `join_date`.
pub fn add_team_member(
    session: &SessionState,
    member: NewTeamMember,
    join_date: NaiveDate,
) -> Result<TeamMember, ApiError> {
    debug!(email = %member.email, "add_team_member command");

    let added = session
        .apply(|s| s.add_team_member(&member.name, &member.email, &member.role, join_date))?;

    info!(id = %added.id, name = %added.name, "Team member added");
    Ok(added)
}

/// Sends a personal reminder to one member.
pub async fn send_individual_reminder(ctx: &AppContext, member_id: &str) -> Result<(), ApiError> {
    debug!(member_id = %member_id, "send_individual_reminder command");

    let member = ctx
        .session
        .with_session(|s| s.team().iter().find(|m| m.id == member_id).cloned())
        .ok_or_else(|| ApiError::not_found("Team member", member_id))?;

    ctx.mailer.send_custom(&individual_reminder(&member)).await?;
    info!(member_id = %member_id, to = %member.email, "Individual reminder sent");
    Ok(())
}

/// Sends the team reminder to each selected member, one after another.
///
/// ## Errors
/// - `INVALID_INPUT` when no known member is selected
///
/// Individual send failures are counted, not returned as errors.
pub async fn send_team_reminder(
    ctx: &AppContext,
    member_ids: &[String],
    message: Option<&str>,
) -> Result<TeamReminderResponse, ApiError> {
    debug!(selected = member_ids.len(), "send_team_reminder command");

    let messages = ctx
        .session
        .with_session(|s| bulk_reminders(s.team(), member_ids, message))?;
    let report = ctx.mailer.send_team_messages(&messages).await;

    Ok(TeamReminderResponse {
        attempted: report.attempted,
        delivered: report.delivered,
        failed: report.failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;

    fn ids(ctx: &AppContext) -> Vec<String> {
        list_team(&ctx.session).into_iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn test_add_member_gets_next_id() {
        let (ctx, _) = testing::context().await;

        let member = add_team_member(
            &ctx.session,
            NewTeamMember {
                name: "Priya".to_string(),
                email: "priya@example.com".to_string(),
                role: "Cashier".to_string(),
            },
            testing::today(),
        )
        .unwrap();

        assert_eq!(member.id, "4");
        assert_eq!(list_team(&ctx.session).len(), 4);
    }

    #[tokio::test]
    async fn test_add_member_requires_valid_email() {
        let (ctx, _) = testing::context().await;

        let err = add_team_member(
            &ctx.session,
            NewTeamMember {
                name: "Priya".to_string(),
                email: "priya.example.com".to_string(),
                role: "Cashier".to_string(),
            },
            testing::today(),
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(list_team(&ctx.session).len(), 3);
    }

    #[tokio::test]
    async fn test_individual_reminder() {
        let (ctx, transport) = testing::context().await;

        send_individual_reminder(&ctx, "2").await.unwrap();

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient(), "jane@example.com");

        let err = send_individual_reminder(&ctx, "42").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_team_reminder_counts_deliveries() {
        let (ctx, transport) = testing::context().await;
        transport.fail_for("mike@example.com").await;

        let response = send_team_reminder(&ctx, &ids(&ctx), Some("Stock take at 6pm"))
            .await
            .unwrap();

        assert_eq!(response.attempted, 3);
        assert_eq!(response.delivered, 2);
        assert_eq!(response.failed, vec!["mike@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_team_reminder_requires_selection() {
        let (ctx, transport) = testing::context().await;

        let err = send_team_reminder(&ctx, &[], None).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(transport.sent().await.is_empty());
    }
}
