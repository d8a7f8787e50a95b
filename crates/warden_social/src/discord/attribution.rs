//! Audit-log attribution of guild events.

use super::conversions::{actor_id, member_profile, user_profile};
use serenity::all::{GuildId, Http, Timestamp};
use serenity::model::guild::audit_log::{
    Action, ChannelAction, MemberAction, RoleAction, WebhookAction,
};
use std::sync::Arc;
use tracing::{debug, instrument};
use warden_core::{ActionCategory, ActorProfile};
use warden_error::AttributionError;

/// Audit entries older than this are not attributed to a new event.
///
/// Webhook update events also fire for edits and deletions, so the newest
/// creation entry may belong to an earlier, unrelated event.
const MAX_ENTRY_AGE_SECS: i64 = 10;

/// Whether an audit entry created at `created` can explain an event seen at `now`.
///
/// Entries stamped slightly ahead of `now` count as recent.
pub fn is_recent(created: Timestamp, now: Timestamp) -> bool {
    now.unix_timestamp() - created.unix_timestamp() <= MAX_ENTRY_AGE_SECS
}

/// Audit-log action matching an audit-attributed category.
pub fn audit_action(category: ActionCategory) -> Option<Action> {
    match category {
        ActionCategory::BotAdded => None,
        ActionCategory::WebhookCreated => Some(Action::Webhook(WebhookAction::Create)),
        ActionCategory::MemberBanned => Some(Action::Member(MemberAction::BanAdd)),
        ActionCategory::ChannelCreated => Some(Action::Channel(ChannelAction::Create)),
        ActionCategory::ChannelDeleted => Some(Action::Channel(ChannelAction::Delete)),
        ActionCategory::RoleCreated => Some(Action::Role(RoleAction::Create)),
    }
}

/// Resolves the account behind a guild event from the audit log.
#[derive(Clone)]
pub struct AuditAttributor {
    http: Arc<Http>,
}

impl AuditAttributor {
    /// Create an attributor over an HTTP client.
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Profile of the account behind the latest audit entry for `category`.
    ///
    /// The member is fetched so the profile carries current roles; if the account
    /// has already left, the profile falls back to the audit log's user record
    /// with no roles.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not audit-attributed, the audit log
    /// cannot be read, or it holds no recent matching entry.
    #[instrument(skip(self), fields(guild = guild.get()))]
    pub async fn resolve(
        &self,
        guild: GuildId,
        category: ActionCategory,
    ) -> Result<ActorProfile, AttributionError> {
        let action = audit_action(category).ok_or_else(|| {
            AttributionError::new(format!("{} is not recorded in the audit log", category))
        })?;

        let logs = guild
            .audit_logs(&self.http, Some(action), None, None, Some(1))
            .await
            .map_err(|e| AttributionError::new(format!("Failed to read audit log: {}", e)))?;

        let entry = logs
            .entries
            .first()
            .ok_or_else(|| AttributionError::new(format!("No audit entry for {}", category)))?;

        let created = entry.id.created_at();
        if !is_recent(created, Timestamp::now()) {
            return Err(AttributionError::new(format!(
                "Latest audit entry for {} is stale (created {})",
                category, created
            )));
        }

        match guild.member(&self.http, entry.user_id).await {
            Ok(member) => Ok(member_profile(&member)),
            Err(e) => {
                debug!(user = entry.user_id.get(), error = %e, "Member lookup failed, using audit user");
                logs.users
                    .get(&entry.user_id)
                    .map(user_profile)
                    .ok_or_else(|| {
                        AttributionError::new(format!(
                            "Audit user {} not resolvable",
                            actor_id(entry.user_id)
                        ))
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::AuditLogEntryId;

    #[test]
    fn test_channel_categories_use_distinct_audit_actions() {
        assert!(matches!(
            audit_action(ActionCategory::ChannelCreated),
            Some(Action::Channel(ChannelAction::Create))
        ));
        assert!(matches!(
            audit_action(ActionCategory::ChannelDeleted),
            Some(Action::Channel(ChannelAction::Delete))
        ));
    }

    #[test]
    fn test_bot_added_is_not_audit_attributed() {
        assert!(audit_action(ActionCategory::BotAdded).is_none());
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_unix_timestamp(secs).unwrap()
    }

    #[test]
    fn test_recent_entries_are_attributed() {
        assert!(is_recent(at(1_700_000_000), at(1_700_000_003)));
        assert!(is_recent(at(1_700_000_000), at(1_700_000_010)));
        // Discord's clock may run slightly ahead of ours
        assert!(is_recent(at(1_700_000_002), at(1_700_000_000)));
    }

    #[test]
    fn test_stale_entries_are_rejected() {
        assert!(!is_recent(at(1_700_000_000), at(1_700_000_011)));
        assert!(!is_recent(at(1_700_000_000), at(1_700_003_600)));
    }

    #[test]
    fn test_entry_age_comes_from_snowflake() {
        // Discord epoch plus 100 seconds, in milliseconds, shifted into the id
        let id = AuditLogEntryId::new(100_000 << 22);
        assert_eq!(id.created_at().unix_timestamp(), 1_420_070_400 + 100);
        assert!(!is_recent(id.created_at(), at(1_700_000_000)));
    }
}
