use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::domain::rules::{Role, Side};
use crate::domain::session::{Session, SessionId};
use crate::domain::snapshot::{PhasePublic, SessionStatus};
use crate::domain::test_fixtures::{ban, pick, sample_catalog};
use crate::errors::domain::DraftError;

fn t0() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::days(20_000)
}

fn pending(creator: Uuid, side: Side) -> Session {
    Session::new(SessionId::generate(), "scrim", creator, side, t0()).unwrap()
}

#[test]
fn new_session_is_pending_with_trimmed_name() {
    let creator = Uuid::new_v4();
    let session = Session::new(SessionId::generate(), "  scrim  ", creator, Side::Second, t0()).unwrap();

    assert_eq!(session.name(), "scrim");
    assert!(!session.is_active());
    assert_eq!(session.version(), 0);
    assert_eq!(session.side_of(creator), Some(Side::Second));
    assert_eq!(session.open_side(), Some(Side::First));

    let snap = session.snapshot();
    assert_eq!(snap.status, SessionStatus::Pending);
    assert!(snap.draft.is_none());
    assert_eq!(snap.participants.len(), 1);
}

#[test]
fn name_is_validated() {
    let creator = Uuid::new_v4();
    let blank = Session::new(SessionId::generate(), "   ", creator, Side::First, t0());
    assert!(matches!(blank, Err(DraftError::Validation(_))));

    let long = "x".repeat(65);
    let too_long = Session::new(SessionId::generate(), &long, creator, Side::First, t0());
    assert!(matches!(too_long, Err(DraftError::Validation(_))));

    let exact = "x".repeat(64);
    assert!(Session::new(SessionId::generate(), &exact, creator, Side::First, t0()).is_ok());
}

#[test]
fn join_on_open_side_activates_draft() {
    let creator = Uuid::new_v4();
    let joiner = Uuid::new_v4();
    let mut session = pending(creator, Side::First);

    session.join(joiner, Side::Second).unwrap();

    assert!(session.is_active());
    assert_eq!(session.version(), 1);
    assert_eq!(session.open_side(), None);
    let snap = session.snapshot();
    assert_eq!(snap.status, SessionStatus::Active);
    let draft = snap.draft.unwrap();
    assert_eq!(draft.turn_cursor, 0);
    assert_eq!(draft.phase, PhasePublic::Banning);
    assert_eq!(draft.scores.first, 0);
    assert_eq!(draft.scores.second, 0);
}

#[test]
fn join_rejections() {
    let creator = Uuid::new_v4();
    let mut session = pending(creator, Side::First);
    let before_version = session.version();

    // Side already held by the creator.
    let err = session.join(Uuid::new_v4(), Side::First).unwrap_err();
    assert_eq!(err, DraftError::SideUnavailable(Side::First));

    // Creator cannot take the other seat too.
    let err = session.join(creator, Side::Second).unwrap_err();
    assert_eq!(err, DraftError::SideUnavailable(Side::Second));
    assert_eq!(session.version(), before_version);
    assert!(!session.is_active());

    session.join(Uuid::new_v4(), Side::Second).unwrap();

    // Full.
    let err = session.join(Uuid::new_v4(), Side::Second).unwrap_err();
    assert_eq!(err, DraftError::SideUnavailable(Side::Second));
}

#[test]
fn actions_require_participant_and_active_draft() {
    let catalog = sample_catalog();
    let creator = Uuid::new_v4();
    let joiner = Uuid::new_v4();
    let mut session = pending(creator, Side::First);

    let err = session.apply(creator, ban(&catalog, "item00")).unwrap_err();
    assert_eq!(err, DraftError::NotStarted);
    let err = session.reset(creator).unwrap_err();
    assert_eq!(err, DraftError::NotStarted);

    session.join(joiner, Side::Second).unwrap();

    let stranger = Uuid::new_v4();
    let err = session.apply(stranger, ban(&catalog, "item00")).unwrap_err();
    assert_eq!(err, DraftError::NotParticipant);
    let err = session.reset(stranger).unwrap_err();
    assert_eq!(err, DraftError::NotParticipant);
    assert_eq!(session.version(), 1);
}

#[test]
fn side_is_derived_from_connection() {
    let catalog = sample_catalog();
    let creator = Uuid::new_v4();
    let joiner = Uuid::new_v4();
    let mut session = pending(creator, Side::Second);
    session.join(joiner, Side::First).unwrap();

    // Creator holds Second; the first ban belongs to First.
    let err = session.apply(creator, ban(&catalog, "item00")).unwrap_err();
    assert!(matches!(err, DraftError::OutOfTurn { .. }));

    let applied = session.apply(joiner, ban(&catalog, "item00")).unwrap();
    assert_eq!(applied.entry.side, Side::First);
    session.apply(creator, ban(&catalog, "item01")).unwrap();
    assert_eq!(session.version(), 3);
}

#[test]
fn rejected_actions_do_not_bump_version() {
    let catalog = sample_catalog();
    let creator = Uuid::new_v4();
    let joiner = Uuid::new_v4();
    let mut session = pending(creator, Side::First);
    session.join(joiner, Side::Second).unwrap();

    let before = session.snapshot();
    let _ = session
        .apply(creator, pick(&catalog, "Garen", Role::Top))
        .unwrap_err();
    assert_eq!(session.snapshot(), before);
}

#[test]
fn reset_bumps_version_and_clears_draft() {
    let catalog = sample_catalog();
    let creator = Uuid::new_v4();
    let joiner = Uuid::new_v4();
    let mut session = pending(creator, Side::First);
    session.join(joiner, Side::Second).unwrap();
    session.apply(creator, ban(&catalog, "item00")).unwrap();

    session.reset(joiner).unwrap();

    assert_eq!(session.version(), 3);
    let draft = session.snapshot().draft.unwrap();
    assert_eq!(draft.turn_cursor, 0);
    assert!(draft.used_items.is_empty());
    // Participants survive a reset.
    assert_eq!(session.participants().len(), 2);
}

#[test]
fn only_pending_sessions_expire() {
    let creator = Uuid::new_v4();
    let max_age = Duration::minutes(10);
    let mut session = pending(creator, Side::First);

    assert!(!session.is_expired(t0() + Duration::minutes(10), max_age));
    assert!(session.is_expired(t0() + Duration::minutes(11), max_age));

    session.join(Uuid::new_v4(), Side::Second).unwrap();
    assert!(!session.is_expired(t0() + Duration::hours(5), max_age));
}

#[test]
fn closed_session_rejects_everything() {
    let catalog = sample_catalog();
    let creator = Uuid::new_v4();
    let mut session = pending(creator, Side::First);
    let id = session.id();
    session.close();

    assert!(session.is_closed());
    assert_eq!(session.open_side(), None);
    let err = session.join(Uuid::new_v4(), Side::Second).unwrap_err();
    assert_eq!(err, DraftError::InvalidSession(id.to_string()));
    let err = session.apply(creator, ban(&catalog, "item00")).unwrap_err();
    assert_eq!(err, DraftError::InvalidSession(id.to_string()));
}

#[test]
fn session_id_parses_and_serializes_as_string() {
    let id = SessionId::generate();
    let parsed: SessionId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);

    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));

    let err = "not-a-ulid".parse::<SessionId>().unwrap_err();
    assert_eq!(err, DraftError::InvalidSession("not-a-ulid".into()));
    assert!(serde_json::from_str::<SessionId>("\"nope\"").is_err());
}

#[test]
fn snapshot_serializes_side_keyed_maps() {
    let catalog = sample_catalog();
    let creator = Uuid::new_v4();
    let mut session = pending(creator, Side::First);
    session.join(Uuid::new_v4(), Side::Second).unwrap();
    session.apply(creator, ban(&catalog, "Garen")).unwrap();

    let value = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(value["status"], "active");
    assert_eq!(value["version"], 2);
    assert_eq!(value["draft"]["phase"], "banning");
    assert_eq!(value["draft"]["bans"]["first"][0]["id"], "Garen");
    assert_eq!(value["draft"]["to_act"]["side"], "second");
    assert_eq!(value["draft"]["to_act"]["kind"], "ban");
    assert_eq!(value["draft"]["teams"]["first"][0]["role"], "TOP");
    assert!(value["draft"]["winner"].is_null());
}
