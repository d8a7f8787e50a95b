//! Tests for policy evaluation.

use std::sync::Arc;
use std::time::{Duration, Instant};
use warden_config::{ConfigStore, GuardConfig, MemoryBackend};
use warden_core::{ActionCategory, ActorId, ActorProfile, AttributedAction, RoleId};
use warden_rate_limit::WindowTracker;
use warden_security::PolicyEngine;

const SELF_ID: ActorId = ActorId::new(1);
const TRUSTED: RoleId = RoleId::new(900);

fn engine_with(config: GuardConfig) -> PolicyEngine {
    let store = ConfigStore::load(Arc::new(MemoryBackend::with_config(config))).unwrap();
    PolicyEngine::new(SELF_ID, Arc::new(store), Arc::new(WindowTracker::new()))
}

fn engine() -> PolicyEngine {
    engine_with(GuardConfig::default())
}

fn member(id: u64) -> ActorProfile {
    ActorProfile::member(ActorId::new(id), vec![])
}

fn trusted(id: u64) -> ActorProfile {
    ActorProfile::member(ActorId::new(id), vec![RoleId::new(5), TRUSTED])
}

fn action(actor: ActorProfile, category: ActionCategory, t0: Instant, secs: u64) -> AttributedAction {
    AttributedAction::new(actor, category, t0 + Duration::from_secs(secs))
}

#[test]
fn test_bans_at_0_3_5_8_fire_first_at_5() {
    let engine = engine();
    let t0 = Instant::now();

    let fired: Vec<(u64, Option<usize>)> = [0, 3, 5, 8]
        .into_iter()
        .map(|t| {
            let decision = engine.evaluate(&action(member(10), ActionCategory::MemberBanned, t0, t));
            (t, decision.map(|d| *d.observed_count()))
        })
        .collect();

    assert_eq!(fired, vec![(0, None), (3, None), (5, Some(3)), (8, Some(4))]);
}

#[test]
fn test_exactly_threshold_actions_do_not_fire() {
    let engine = engine_with(GuardConfig::default().with_role_threshold(2));
    let t0 = Instant::now();

    assert!(engine.evaluate(&action(member(10), ActionCategory::RoleCreated, t0, 0)).is_none());
    assert!(engine.evaluate(&action(member(10), ActionCategory::RoleCreated, t0, 1)).is_none());

    let decision = engine
        .evaluate(&action(member(10), ActionCategory::RoleCreated, t0, 2))
        .expect("third role creation should fire");
    assert_eq!(*decision.actor(), ActorId::new(10));
    assert_eq!(*decision.category(), ActionCategory::RoleCreated);
    assert_eq!(*decision.observed_count(), 3);
    assert_eq!(*decision.window_secs(), 10);
    assert_eq!(decision.reason(), "Anti-nuke: Rapid role creation");
}

#[test]
fn test_actions_outside_the_window_do_not_accumulate() {
    let engine = engine_with(GuardConfig::default().with_ban_threshold(1));
    let t0 = Instant::now();

    assert!(engine.evaluate(&action(member(10), ActionCategory::MemberBanned, t0, 0)).is_none());
    assert!(engine.evaluate(&action(member(10), ActionCategory::MemberBanned, t0, 11)).is_none());
    assert!(engine.evaluate(&action(member(10), ActionCategory::MemberBanned, t0, 12)).is_some());
}

#[test]
fn test_whitelisted_actors_never_produce_decisions() {
    let mut config = GuardConfig::default();
    config.set_whitelist(TRUSTED);
    let engine = engine_with(config);
    let t0 = Instant::now();

    for category in [
        ActionCategory::BotAdded,
        ActionCategory::WebhookCreated,
        ActionCategory::MemberBanned,
        ActionCategory::ChannelCreated,
        ActionCategory::ChannelDeleted,
        ActionCategory::RoleCreated,
    ] {
        for t in 0..50 {
            assert!(
                engine.evaluate(&action(trusted(10), category, t0, t / 10)).is_none(),
                "{category} at t={t}"
            );
        }
    }
    assert!(engine.tracker().is_empty());
}

#[test]
fn test_bot_added_fires_unless_whitelisted() {
    let mut config = GuardConfig::default();
    config.set_whitelist(TRUSTED);
    let engine = engine_with(config);

    let added_by_stranger = AttributedAction::now(
        ActorProfile::bot(ActorId::new(20), vec![]),
        ActionCategory::BotAdded,
    );
    let decision = engine.evaluate(&added_by_stranger).expect("unauthorized bot");
    assert_eq!(*decision.actor(), ActorId::new(20));
    assert_eq!(decision.reason(), "Anti-nuke: Unauthorized bot added");

    let added_with_role = AttributedAction::now(
        ActorProfile::bot(ActorId::new(21), vec![TRUSTED]),
        ActionCategory::BotAdded,
    );
    assert!(engine.evaluate(&added_with_role).is_none());
}

#[test]
fn test_webhook_creation_fires_on_first_occurrence() {
    let engine = engine();
    let decision = engine
        .evaluate(&AttributedAction::now(member(10), ActionCategory::WebhookCreated))
        .expect("webhook creation");
    assert_eq!(*decision.observed_count(), 1);
    assert!(engine.tracker().is_empty());
}

#[test]
fn test_own_actions_are_skipped() {
    let engine = engine_with(GuardConfig::default().with_ban_threshold(0));
    let own = ActorProfile::member(SELF_ID, vec![]);

    for category in [ActionCategory::MemberBanned, ActionCategory::WebhookCreated] {
        assert!(engine.evaluate(&AttributedAction::now(own.clone(), category)).is_none());
    }
}

#[test]
fn test_automated_actors_are_skipped_for_audit_attributed_categories() {
    let engine = engine_with(GuardConfig::default().with_channel_threshold(0));
    let integration = ActorProfile::bot(ActorId::new(30), vec![]);

    assert!(
        engine
            .evaluate(&AttributedAction::now(integration.clone(), ActionCategory::ChannelDeleted))
            .is_none()
    );
    assert!(
        engine
            .evaluate(&AttributedAction::now(integration, ActionCategory::WebhookCreated))
            .is_none()
    );
}

#[test]
fn test_channel_creation_and_deletion_share_a_counter() {
    let engine = engine_with(GuardConfig::default().with_channel_threshold(2));
    let t0 = Instant::now();

    assert!(engine.evaluate(&action(member(10), ActionCategory::ChannelCreated, t0, 0)).is_none());
    assert!(engine.evaluate(&action(member(10), ActionCategory::ChannelDeleted, t0, 1)).is_none());

    let decision = engine
        .evaluate(&action(member(10), ActionCategory::ChannelCreated, t0, 2))
        .expect("mixed churn should fire");
    assert_eq!(*decision.observed_count(), 3);
    assert_eq!(*decision.category(), ActionCategory::ChannelCreated);
}

#[test]
fn test_evaluation_is_repeatable_after_reset() {
    let engine = engine_with(GuardConfig::default().with_ban_threshold(0));
    let repeated = AttributedAction::now(member(10), ActionCategory::MemberBanned);

    let first = engine.evaluate(&repeated);
    engine.tracker().reset();
    let second = engine.evaluate(&repeated);

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_config_updates_apply_to_the_next_evaluation() {
    let engine = engine();
    let t0 = Instant::now();

    assert!(engine.evaluate(&action(member(10), ActionCategory::RoleCreated, t0, 0)).is_none());

    engine
        .config()
        .update(|config| {
            config.set_whitelist(TRUSTED);
            *config = config.clone().with_role_threshold(0);
        })
        .unwrap();

    assert!(engine.evaluate(&action(member(11), ActionCategory::RoleCreated, t0, 1)).is_some());
    assert!(engine.evaluate(&action(trusted(12), ActionCategory::RoleCreated, t0, 1)).is_none());
}

#[test]
fn test_sweep_uses_configured_windows() {
    let engine = engine_with(GuardConfig::default().with_ban_window(10).with_role_window(60));
    let t0 = Instant::now();

    engine.evaluate(&action(member(10), ActionCategory::MemberBanned, t0, 0));
    engine.evaluate(&action(member(10), ActionCategory::RoleCreated, t0, 0));

    assert_eq!(engine.sweep(t0 + Duration::from_secs(30)), 1);
    assert_eq!(engine.tracker().len(), 1);
}
