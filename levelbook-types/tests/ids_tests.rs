use levelbook_types::{Clock, FixedClock, IdClock, LevelId, SystemClock};
use std::rc::Rc;

// ── LevelId ──────────────────────────────────────────────────────

#[test]
fn level_id_display_roundtrip() {
    let id = LevelId::new(1_700_000_000_123);
    let parsed: LevelId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn level_id_from_str_invalid() {
    assert!("abc".parse::<LevelId>().is_err());
    assert!("-5".parse::<LevelId>().is_err());
}

#[test]
fn level_id_serializes_as_number() {
    let id = LevelId::new(42);
    assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    let parsed: LevelId = serde_json::from_str("42").unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn level_id_ordering_follows_raw_value() {
    assert!(LevelId::new(1) < LevelId::new(2));
}

// ── IdClock ──────────────────────────────────────────────────────

#[test]
fn next_id_uses_wall_time_when_ahead() {
    let mut ids = IdClock::new(FixedClock::new(1_000));
    assert_eq!(ids.next_id(), LevelId::new(1_000));
}

#[test]
fn next_id_strictly_increases_within_same_millisecond() {
    let mut ids = IdClock::new(FixedClock::new(1_000));
    let a = ids.next_id();
    let b = ids.next_id();
    let c = ids.next_id();
    assert!(a < b && b < c);
    assert_eq!(c, LevelId::new(1_002));
}

#[test]
fn next_id_survives_clock_stepping_back() {
    let clock = Rc::new(FixedClock::new(5_000));
    let mut ids = IdClock::new(Rc::clone(&clock));
    let a = ids.next_id();
    clock.set(10);
    let b = ids.next_id();
    assert!(b > a);
}

#[test]
fn next_id_jumps_forward_with_clock() {
    let clock = Rc::new(FixedClock::new(100));
    let mut ids = IdClock::new(Rc::clone(&clock));
    ids.next_id();
    clock.advance(900);
    assert_eq!(ids.next_id(), LevelId::new(1_000));
}

#[test]
fn observe_seeds_above_existing_ids() {
    let mut ids = IdClock::new(FixedClock::new(10));
    ids.observe(LevelId::new(500));
    ids.observe(LevelId::new(20));
    assert_eq!(ids.last(), 500);
    assert_eq!(ids.next_id(), LevelId::new(501));
}

#[test]
fn system_clock_is_after_epoch() {
    assert!(SystemClock.now_millis() > 0);
}

#[test]
fn system_id_clock_issues_increasing_ids() {
    let mut ids = IdClock::system();
    let a = ids.next_id();
    let b = ids.next_id();
    assert!(b > a);
}
