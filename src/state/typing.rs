//! Character-by-character reveal of one assistant message.
//!
//! The animator is a two-state machine (idle / revealing) that mutates the
//! timeline only through `patch_content`. The driver owns the timer and
//! calls `tick` with the ticket it was handed; tickets from a superseded
//! run or generation are inert.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use super::session_guard::Generation;
use super::timeline::Timeline;

/// Default reveal cadence in milliseconds per character.
pub const DEFAULT_TYPING_INTERVAL_MS: u32 = 15;

/// Handle for one reveal run; the timer passes it back on every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTicket {
    pub run: u64,
    pub generation: Generation,
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// More characters remain.
    Continue,
    /// The full content is visible and the animator is idle.
    Finished,
    /// The ticket no longer matches an active run; nothing was touched.
    Inert,
}

#[derive(Clone, Debug)]
struct AnimationToken {
    run: u64,
    generation: Generation,
    target_id: i64,
    full_content: String,
    revealed: usize,
    total: usize,
}

#[derive(Clone, Debug, Default)]
pub struct TypingAnimator {
    token: Option<AnimationToken>,
    runs: u64,
}

impl TypingAnimator {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub fn target_id(&self) -> Option<i64> {
        self.token.as_ref().map(|t| t.target_id)
    }

    /// Characters currently visible, while revealing.
    #[must_use]
    pub fn revealed(&self) -> Option<usize> {
        self.token.as_ref().map(|t| t.revealed)
    }

    /// Begin revealing `full_content` into message `target_id`.
    ///
    /// Any run still in progress is finalized first, and the target is
    /// patched to the empty prefix.
    pub fn start(
        &mut self,
        target_id: i64,
        full_content: String,
        generation: Generation,
        timeline: &mut Timeline,
    ) -> RevealTicket {
        self.cancel(timeline);
        self.runs += 1;
        timeline.patch_content(target_id, "");
        let total = full_content.chars().count();
        self.token = Some(AnimationToken {
            run: self.runs,
            generation,
            target_id,
            full_content,
            revealed: 0,
            total,
        });
        RevealTicket { run: self.runs, generation }
    }

    /// Advance the reveal by one character.
    pub fn tick(&mut self, ticket: RevealTicket, timeline: &mut Timeline) -> TickOutcome {
        let Some(token) = self.token.as_mut() else {
            return TickOutcome::Inert;
        };
        if token.run != ticket.run || token.generation != ticket.generation {
            return TickOutcome::Inert;
        }

        if token.revealed < token.total {
            token.revealed += 1;
            let prefix = char_prefix(&token.full_content, token.revealed);
            if !timeline.patch_content(token.target_id, prefix) {
                // Target was superseded by a replace; nothing left to animate.
                self.token = None;
                return TickOutcome::Inert;
            }
        }

        if token.revealed >= token.total {
            timeline.patch_content(token.target_id, &token.full_content);
            self.token = None;
            return TickOutcome::Finished;
        }
        TickOutcome::Continue
    }

    /// Stop the current run and make the full content visible immediately.
    /// Returns the id of the message that was finalized, if any.
    pub fn cancel(&mut self, timeline: &mut Timeline) -> Option<i64> {
        let token = self.token.take()?;
        timeline.patch_content(token.target_id, &token.full_content);
        Some(token.target_id)
    }

    /// Drop the current run without touching the timeline. Used when the
    /// timeline is about to be replaced wholesale.
    pub fn discard(&mut self) -> bool {
        self.token.take().is_some()
    }
}

/// Prefix of `text` holding the first `chars` Unicode scalar values.
#[must_use]
pub fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
