//! Conversions between Serenity models and Warden types.

use serenity::all::{Colour, CreateEmbed, Member, ModelError, Timestamp, User, UserId};
use serenity::http::HttpError;
use warden_core::{ActorId, ActorProfile, LogEntry, RoleId, Severity};
use warden_error::{DispatchError, DispatchErrorKind};

/// Warden id for a Discord user.
pub fn actor_id(user: UserId) -> ActorId {
    ActorId::new(user.get())
}

/// Discord user id for a Warden actor.
pub fn user_id(actor: ActorId) -> UserId {
    UserId::new(actor.get())
}

/// Profile of a guild member, carrying their roles and bot flag.
pub fn member_profile(member: &Member) -> ActorProfile {
    let roles = member
        .roles
        .iter()
        .map(|role| RoleId::new(role.get()))
        .collect();
    profile(&member.user, roles)
}

/// Profile of a user whose guild membership could not be resolved.
pub fn user_profile(user: &User) -> ActorProfile {
    profile(user, Vec::new())
}

fn profile(user: &User, roles: Vec<RoleId>) -> ActorProfile {
    if user.bot {
        ActorProfile::bot(actor_id(user.id), roles)
    } else {
        ActorProfile::member(actor_id(user.id), roles)
    }
}

/// Classify an HTTP status returned by a ban request.
///
/// # Examples
///
/// ```
/// use warden_error::DispatchErrorKind;
/// use warden_social::dispatch_kind_for_status;
///
/// assert!(matches!(
///     dispatch_kind_for_status(403, "Missing Permissions".into()),
///     DispatchErrorKind::PermissionDenied(_)
/// ));
/// ```
pub fn dispatch_kind_for_status(status: u16, message: String) -> DispatchErrorKind {
    match status {
        401 | 403 => DispatchErrorKind::PermissionDenied(message),
        404 => DispatchErrorKind::TargetUnavailable(message),
        _ => DispatchErrorKind::Transport(format!("HTTP {}: {}", status, message)),
    }
}

/// Classify a failed ban request.
#[track_caller]
pub fn dispatch_error(err: serenity::Error) -> DispatchError {
    let kind = match &err {
        serenity::Error::Model(ModelError::InvalidPermissions { .. } | ModelError::Hierarchy) => {
            DispatchErrorKind::PermissionDenied(err.to_string())
        }
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) => {
            dispatch_kind_for_status(response.status_code.as_u16(), response.error.message.clone())
        }
        _ => DispatchErrorKind::Transport(err.to_string()),
    };
    DispatchError::new(kind)
}

/// Embed for a log entry.
pub fn embed(entry: &LogEntry) -> CreateEmbed {
    let timestamp = Timestamp::from_unix_timestamp(entry.timestamp().timestamp())
        .unwrap_or_else(|_| Timestamp::now());
    CreateEmbed::new()
        .title(entry.title())
        .description(entry.description())
        .colour(colour(*entry.severity()))
        .timestamp(timestamp)
}

/// Embed colour for a severity.
pub fn colour(severity: Severity) -> Colour {
    Colour::new(severity.colour())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            dispatch_kind_for_status(403, "Missing Permissions".into()),
            DispatchErrorKind::PermissionDenied(_)
        ));
        assert!(matches!(
            dispatch_kind_for_status(404, "Unknown Member".into()),
            DispatchErrorKind::TargetUnavailable(_)
        ));
        assert!(matches!(
            dispatch_kind_for_status(500, "Internal".into()),
            DispatchErrorKind::Transport(msg) if msg == "HTTP 500: Internal"
        ));
    }

    #[test]
    fn test_id_round_trip() {
        let actor = ActorId::new(80_351_110_224_678_912);
        assert_eq!(actor_id(user_id(actor)), actor);
    }

    #[test]
    fn test_severity_colours() {
        assert_eq!(colour(Severity::Alert), Colour::new(0xE7_4C_3C));
        assert_ne!(colour(Severity::Failure), colour(Severity::Alert));
    }
}
