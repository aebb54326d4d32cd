//! Debounced feedback selection.
//!
//! [`FeedbackDebouncer`] turns the per-frame list of candidate
//! [`FeedbackRule`]s into an occasional spoken cue.  Per call:
//!
//! 1. The first active rule in list order is selected; there is no weighting.
//! 2. No active rule clears the tracking.
//! 3. A different rule than last frame restarts the sustain timer.
//! 4. Nothing is emitted until the same rule has been active for
//!    `min_condition_ms`, and at least `cooldown_ms` has passed since the
//!    last emission (whichever rule produced it).
//! 5. On emission the sustain timer restarts, so the rule has to hold again
//!    before it can repeat.
//!
//! Two rules that keep alternating never emit: each switch restarts the
//! sustain timer.
//!
//! All timing comes from the caller's timestamp; the debouncer never reads a
//! clock.
//!
//! # Example
//!
//! ```rust
//! use pose_coach::exercise::FeedbackRule;
//! use pose_coach::pipeline::{DebounceSettings, FeedbackDebouncer};
//!
//! let mut debouncer = FeedbackDebouncer::new(DebounceSettings::default());
//! let rules = [FeedbackRule::new("Bend your knees more").when(true)];
//!
//! assert_eq!(debouncer.evaluate(&rules, 0), None);
//! assert_eq!(debouncer.evaluate(&rules, 1_999), None);
//! assert_eq!(debouncer.evaluate(&rules, 2_000), Some("Bend your knees more"));
//! ```

use serde::{Deserialize, Serialize};

use crate::exercise::FeedbackRule;

/// Default minimum gap between two spoken cues.
pub const DEFAULT_COOLDOWN_MS: u64 = 5_000;
/// Default time a rule must stay active before it is spoken.
pub const DEFAULT_MIN_CONDITION_MS: u64 = 2_000;

// ---------------------------------------------------------------------------
// DebounceSettings
// ---------------------------------------------------------------------------

/// Timing parameters for [`FeedbackDebouncer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceSettings {
    /// Minimum milliseconds between two emissions.
    pub cooldown_ms: u64,
    /// Milliseconds a rule must stay continuously active before it is emitted.
    pub min_condition_ms: u64,
}

impl Default for DebounceSettings {
    fn default() -> Self {
        Self {
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            min_condition_ms: DEFAULT_MIN_CONDITION_MS,
        }
    }
}

// ---------------------------------------------------------------------------
// FeedbackDebouncer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FeedbackDebouncer {
    settings: DebounceSettings,
    /// Index of the rule that was active on the previous call.
    active_rule: Option<usize>,
    condition_start_ms: u64,
    last_spoken_ms: Option<u64>,
}

impl FeedbackDebouncer {
    pub fn new(settings: DebounceSettings) -> Self {
        Self {
            settings,
            active_rule: None,
            condition_start_ms: 0,
            last_spoken_ms: None,
        }
    }

    pub fn settings(&self) -> DebounceSettings {
        self.settings
    }

    /// Index of the rule currently being sustained, if any.
    pub fn active_rule(&self) -> Option<usize> {
        self.active_rule
    }

    pub fn last_spoken_ms(&self) -> Option<u64> {
        self.last_spoken_ms
    }

    /// Evaluate this frame's rules at `now_ms`; returns at most one message.
    pub fn evaluate(&mut self, rules: &[FeedbackRule], now_ms: u64) -> Option<&'static str> {
        let Some(index) = rules.iter().position(FeedbackRule::is_active) else {
            self.active_rule = None;
            self.condition_start_ms = 0;
            return None;
        };

        if self.active_rule != Some(index) {
            self.active_rule = Some(index);
            self.condition_start_ms = now_ms;
            return None;
        }

        if now_ms.saturating_sub(self.condition_start_ms) < self.settings.min_condition_ms {
            return None;
        }

        if let Some(last) = self.last_spoken_ms {
            if now_ms.saturating_sub(last) < self.settings.cooldown_ms {
                return None;
            }
        }

        let message = rules[index].message;
        self.last_spoken_ms = Some(now_ms);
        self.condition_start_ms = now_ms;
        log::debug!("feedback emitted at {now_ms} ms: {message}");
        Some(message)
    }

    /// Forget all tracking, including the cooldown (session start).
    pub fn reset(&mut self) {
        self.active_rule = None;
        self.condition_start_ms = 0;
        self.last_spoken_ms = None;
    }
}

impl Default for FeedbackDebouncer {
    fn default() -> Self {
        Self::new(DebounceSettings::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "rule a";
    const B: &str = "rule b";

    fn rules(a: bool, b: bool) -> Vec<FeedbackRule> {
        vec![FeedbackRule::new(A).when(a), FeedbackRule::new(B).when(b)]
    }

    /// Drive the debouncer every `step` ms over `[from, to]` and collect emissions.
    fn run(
        debouncer: &mut FeedbackDebouncer,
        from: u64,
        to: u64,
        step: u64,
        active: impl Fn(u64) -> (bool, bool),
    ) -> Vec<(u64, &'static str)> {
        let mut out = Vec::new();
        let mut t = from;
        while t <= to {
            let (a, b) = active(t);
            if let Some(msg) = debouncer.evaluate(&rules(a, b), t) {
                out.push((t, msg));
            }
            t += step;
        }
        out
    }

    #[test]
    fn no_active_rule_emits_nothing() {
        let mut d = FeedbackDebouncer::default();
        assert!(run(&mut d, 0, 20_000, 100, |_| (false, false)).is_empty());
        assert_eq!(d.active_rule(), None);
    }

    #[test]
    fn emits_after_sustain() {
        let mut d = FeedbackDebouncer::default();
        let out = run(&mut d, 0, 2_500, 100, |_| (true, false));
        assert_eq!(out, vec![(2_000, A)]);
    }

    #[test]
    fn interruption_resets_sustain() {
        let mut d = FeedbackDebouncer::default();
        // True at 0, false at 1000, true continuously from 1100.
        let out = run(&mut d, 0, 4_000, 100, |t| (t < 1_000 || t >= 1_100, false));
        assert_eq!(out, vec![(3_100, A)]);
    }

    #[test]
    fn earlier_rule_wins() {
        let mut d = FeedbackDebouncer::default();
        let out = run(&mut d, 0, 2_000, 100, |_| (true, true));
        assert_eq!(out, vec![(2_000, A)]);
    }

    #[test]
    fn switching_rule_restarts_sustain() {
        let mut d = FeedbackDebouncer::default();
        // A until 1500, then only B.
        let out = run(&mut d, 0, 4_000, 100, |t| (t < 1_500, t >= 1_500));
        assert_eq!(out, vec![(3_500, B)]);
    }

    #[test]
    fn oscillating_rules_never_emit() {
        let mut d = FeedbackDebouncer::default();
        let out = run(&mut d, 0, 60_000, 100, |t| {
            let a = (t / 100) % 2 == 0;
            (a, !a)
        });
        assert!(out.is_empty());
    }

    #[test]
    fn cooldown_spaces_emissions() {
        let mut d = FeedbackDebouncer::default();
        let out = run(&mut d, 0, 20_000, 100, |_| (true, false));
        assert_eq!(out.iter().map(|(t, _)| *t).collect::<Vec<_>>(), vec![2_000, 7_000, 12_000, 17_000]);
    }

    #[test]
    fn cooldown_applies_across_rules() {
        let mut d = FeedbackDebouncer::default();
        // A emits at 2000; B takes over at 2100 and is sustained by 4100 but
        // must wait for the cooldown.
        let out = run(&mut d, 0, 8_000, 100, |t| (t <= 2_000, t > 2_000));
        assert_eq!(out, vec![(2_000, A), (7_000, B)]);
    }

    #[test]
    fn emission_requires_requalifying() {
        let settings = DebounceSettings {
            cooldown_ms: 0,
            min_condition_ms: 1_000,
        };
        let mut d = FeedbackDebouncer::new(settings);
        let out = run(&mut d, 0, 3_000, 100, |_| (true, false));
        assert_eq!(out, vec![(1_000, A), (2_000, A), (3_000, A)]);
    }

    #[test]
    fn properties_hold_under_noisy_input() {
        let settings = DebounceSettings::default();
        let mut d = FeedbackDebouncer::new(settings);
        let mut seed: u32 = 0x9e37_79b9;
        let mut history: Vec<(u64, bool, bool)> = Vec::new();
        let mut emissions: Vec<(u64, &'static str)> = Vec::new();

        for frame in 0..5_000u64 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            // Mostly-stable signals with occasional flips.
            let a = seed % 50 != 0;
            let b = seed % 7 == 0;
            let t = frame * 75;
            history.push((t, a, b));
            if let Some(msg) = d.evaluate(&rules(a, b), t) {
                emissions.push((t, msg));
            }
        }

        for pair in emissions.windows(2) {
            assert!(pair[1].0 - pair[0].0 >= settings.cooldown_ms);
        }
        for &(t, msg) in &emissions {
            let selected = |a: bool, b: bool| {
                if a {
                    Some(A)
                } else if b {
                    Some(B)
                } else {
                    None
                }
            };
            let since = t.saturating_sub(settings.min_condition_ms);
            assert!(history
                .iter()
                .filter(|(ht, _, _)| *ht >= since && *ht <= t)
                .all(|&(_, a, b)| selected(a, b) == Some(msg)));
        }
    }

    #[test]
    fn reset_clears_cooldown() {
        let mut d = FeedbackDebouncer::default();
        run(&mut d, 0, 2_000, 100, |_| (true, false));
        assert_eq!(d.last_spoken_ms(), Some(2_000));
        d.reset();
        assert_eq!(d.last_spoken_ms(), None);
        assert_eq!(d.active_rule(), None);
    }
}
