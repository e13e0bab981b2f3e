use super::*;
use crate::state::session_guard::SessionGuard;
use crate::state::timeline::{Message, Sender};
use time::OffsetDateTime;

// =============================================================
// Helpers
// =============================================================

fn timeline_with(id: i64, content: &str) -> Timeline {
    let mut timeline = Timeline::default();
    timeline.append(Message {
        id: 1,
        sender: Sender::User,
        content: "question".to_owned(),
        timestamp: OffsetDateTime::UNIX_EPOCH,
    });
    timeline.append(Message {
        id,
        sender: Sender::Assistant,
        content: content.to_owned(),
        timestamp: OffsetDateTime::UNIX_EPOCH,
    });
    timeline
}

fn content_of(timeline: &Timeline, id: i64) -> String {
    timeline.get(id).map(|m| m.content.clone()).unwrap_or_default()
}

fn generation() -> Generation {
    SessionGuard::default().current()
}

// =============================================================
// char_prefix
// =============================================================

#[test]
fn char_prefix_counts_scalar_values() {
    assert_eq!(char_prefix("héllo", 2), "hé");
    assert_eq!(char_prefix("héllo", 0), "");
    assert_eq!(char_prefix("héllo", 5), "héllo");
    assert_eq!(char_prefix("héllo", 50), "héllo");
}

// =============================================================
// Reveal playback
// =============================================================

#[test]
fn start_clears_target_content() {
    let mut timeline = timeline_with(2, "hi there");
    let mut animator = TypingAnimator::default();
    animator.start(2, "hi there".to_owned(), generation(), &mut timeline);
    assert!(animator.is_active());
    assert_eq!(animator.target_id(), Some(2));
    assert_eq!(animator.revealed(), Some(0));
    assert_eq!(content_of(&timeline, 2), "");
}

#[test]
fn reveal_produces_every_prefix_in_order() {
    let full = "hi there";
    let mut timeline = timeline_with(2, full);
    let mut animator = TypingAnimator::default();
    let ticket = animator.start(2, full.to_owned(), generation(), &mut timeline);

    let mut states = vec![content_of(&timeline, 2)];
    loop {
        let outcome = animator.tick(ticket, &mut timeline);
        states.push(content_of(&timeline, 2));
        if outcome == TickOutcome::Finished {
            break;
        }
        assert_eq!(outcome, TickOutcome::Continue);
    }

    let expected = (0..=full.chars().count()).map(|n| char_prefix(full, n).to_owned()).collect::<Vec<_>>();
    assert_eq!(states, expected);
    assert!(!animator.is_active());
    assert_eq!(content_of(&timeline, 2), full);
}

#[test]
fn reveal_of_multibyte_text_never_splits_code_points() {
    let full = "日本語 ✓";
    let mut timeline = timeline_with(2, full);
    let mut animator = TypingAnimator::default();
    let ticket = animator.start(2, full.to_owned(), generation(), &mut timeline);
    let mut ticks = 0;
    while animator.tick(ticket, &mut timeline) == TickOutcome::Continue {
        ticks += 1;
        assert!(full.starts_with(&content_of(&timeline, 2)));
    }
    assert_eq!(ticks + 1, full.chars().count());
    assert_eq!(content_of(&timeline, 2), full);
}

#[test]
fn empty_content_finishes_on_first_tick() {
    let mut timeline = timeline_with(2, "");
    let mut animator = TypingAnimator::default();
    let ticket = animator.start(2, String::new(), generation(), &mut timeline);
    assert_eq!(animator.tick(ticket, &mut timeline), TickOutcome::Finished);
    assert!(!animator.is_active());
}

#[test]
fn tick_after_finish_is_inert() {
    let mut timeline = timeline_with(2, "a");
    let mut animator = TypingAnimator::default();
    let ticket = animator.start(2, "a".to_owned(), generation(), &mut timeline);
    assert_eq!(animator.tick(ticket, &mut timeline), TickOutcome::Finished);
    assert_eq!(animator.tick(ticket, &mut timeline), TickOutcome::Inert);
    assert_eq!(content_of(&timeline, 2), "a");
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn cancel_at_any_length_shows_full_content() {
    let full = "abcdefghijklmnopqrst";
    for stop_at in 0..=full.len() {
        let mut timeline = timeline_with(2, full);
        let mut animator = TypingAnimator::default();
        let ticket = animator.start(2, full.to_owned(), generation(), &mut timeline);
        for _ in 0..stop_at {
            animator.tick(ticket, &mut timeline);
        }
        animator.cancel(&mut timeline);
        assert_eq!(content_of(&timeline, 2), full, "cancelled after {stop_at} ticks");
        assert!(!animator.is_active());
        assert_eq!(animator.tick(ticket, &mut timeline), TickOutcome::Inert);
        assert_eq!(content_of(&timeline, 2), full);
    }
}

#[test]
fn cancel_when_idle_returns_none() {
    let mut timeline = Timeline::default();
    let mut animator = TypingAnimator::default();
    assert_eq!(animator.cancel(&mut timeline), None);
}

#[test]
fn new_start_finalizes_previous_run_and_old_ticket_goes_inert() {
    let mut timeline = timeline_with(2, "first reply");
    timeline.append(Message {
        id: 3,
        sender: Sender::Assistant,
        content: "second".to_owned(),
        timestamp: OffsetDateTime::UNIX_EPOCH,
    });
    let mut animator = TypingAnimator::default();
    let first = animator.start(2, "first reply".to_owned(), generation(), &mut timeline);
    animator.tick(first, &mut timeline);
    let second = animator.start(3, "second".to_owned(), generation(), &mut timeline);

    assert_eq!(content_of(&timeline, 2), "first reply");
    assert_eq!(content_of(&timeline, 3), "");
    assert_eq!(animator.tick(first, &mut timeline), TickOutcome::Inert);
    assert_eq!(content_of(&timeline, 3), "");
    assert_eq!(animator.tick(second, &mut timeline), TickOutcome::Continue);
    assert_eq!(content_of(&timeline, 3), "s");
}

#[test]
fn ticket_from_other_generation_is_inert() {
    let mut guard = SessionGuard::default();
    let old = guard.current();
    let mut timeline = timeline_with(2, "abc");
    let mut animator = TypingAnimator::default();
    let ticket = animator.start(2, "abc".to_owned(), old, &mut timeline);
    let forged = RevealTicket { run: ticket.run, generation: guard.advance() };
    assert_eq!(animator.tick(forged, &mut timeline), TickOutcome::Inert);
    assert_eq!(content_of(&timeline, 2), "");
}

#[test]
fn tick_stops_when_target_was_replaced() {
    let mut timeline = timeline_with(2, "abc");
    let mut animator = TypingAnimator::default();
    let ticket = animator.start(2, "abc".to_owned(), generation(), &mut timeline);
    timeline.replace_all(Vec::new());
    assert_eq!(animator.tick(ticket, &mut timeline), TickOutcome::Inert);
    assert!(!animator.is_active());
}

#[test]
fn discard_drops_run_without_patching() {
    let mut timeline = timeline_with(2, "abc");
    let mut animator = TypingAnimator::default();
    animator.start(2, "abc".to_owned(), generation(), &mut timeline);
    assert!(animator.discard());
    assert_eq!(content_of(&timeline, 2), "");
    assert!(!animator.discard());
}
