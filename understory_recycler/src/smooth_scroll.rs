// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped animation of a normalized scroll position toward a target.
//!
//! [`SmoothScroll`] is a two-state machine. It is [`ScrollPhase::Idle`] until
//! [`SmoothScroll::start`] moves it to [`ScrollPhase::Animating`]. Every
//! [`SmoothScroll::step`] (one per display frame) moves the position a fixed
//! fraction of the remaining distance toward the target. The machine returns to
//! idle once the position is within `epsilon` of the target, or immediately on
//! [`SmoothScroll::cancel`].
//!
//! Each `start` mints a fresh [`AnimationToken`]. Cancelling, or starting a new
//! animation, invalidates every older token, so at most one animation is ever
//! live per controller.

/// Fraction of the remaining distance covered by each step.
pub const DEFAULT_DAMPING: f64 = 0.05;

/// Distance to the target at which an animation is considered converged.
pub const DEFAULT_EPSILON: f64 = 0.0005;

/// Identifies one animation started on a [`SmoothScroll`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnimationToken(u64);

/// Current state of a [`SmoothScroll`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollPhase {
    /// No animation is running.
    Idle,
    /// Moving toward `target`.
    Animating {
        /// Normalized position being approached, in `[0, 1]`.
        target: f64,
        /// Token of the running animation.
        token: AnimationToken,
    },
}

/// Damped scroll animation state machine over normalized positions.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    phase: ScrollPhase,
    next_token: u64,
    damping: f64,
    epsilon: f64,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl SmoothScroll {
    /// Creates an idle controller with [`DEFAULT_DAMPING`] and [`DEFAULT_EPSILON`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: ScrollPhase::Idle,
            next_token: 0,
            damping: DEFAULT_DAMPING,
            epsilon: DEFAULT_EPSILON,
        }
    }

    /// Returns this controller with a different per-step damping factor.
    ///
    /// The factor is clamped into `(0, 1]`; non-finite values fall back to
    /// [`DEFAULT_DAMPING`].
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = if damping.is_finite() && damping > 0.0 {
            damping.min(1.0)
        } else {
            DEFAULT_DAMPING
        };
        self
    }

    /// Returns this controller with a different convergence distance.
    ///
    /// Negative or non-finite values fall back to [`DEFAULT_EPSILON`].
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon.is_finite() && epsilon >= 0.0 {
            epsilon
        } else {
            DEFAULT_EPSILON
        };
        self
    }

    /// Per-step damping factor.
    #[must_use]
    pub const fn damping(&self) -> f64 {
        self.damping
    }

    /// Convergence distance.
    #[must_use]
    pub const fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> ScrollPhase {
        self.phase
    }

    /// Returns `true` while an animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self.phase, ScrollPhase::Animating { .. })
    }

    /// Target of the running animation, if any.
    #[must_use]
    pub const fn target(&self) -> Option<f64> {
        match self.phase {
            ScrollPhase::Animating { target, .. } => Some(target),
            ScrollPhase::Idle => None,
        }
    }

    /// Returns `true` if `token` belongs to the running animation.
    #[must_use]
    pub fn is_current(&self, token: AnimationToken) -> bool {
        matches!(self.phase, ScrollPhase::Animating { token: live, .. } if live == token)
    }

    /// Starts animating toward `target`, replacing any running animation.
    ///
    /// `target` is clamped into `[0, 1]`.
    pub fn start(&mut self, target: f64) -> AnimationToken {
        debug_assert!(
            target.is_finite(),
            "SmoothScroll targets must be finite; got {target:?}"
        );
        let target = if target.is_finite() {
            target.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let token = AnimationToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        if self.is_animating() {
            tracing::trace!(goal = target, "smooth scroll superseded");
        }
        self.phase = ScrollPhase::Animating { target, token };
        token
    }

    /// Stops the running animation. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        let was_animating = self.is_animating();
        if was_animating {
            tracing::trace!("smooth scroll cancelled");
        }
        self.phase = ScrollPhase::Idle;
        was_animating
    }

    /// Advances the animation by one frame from `current`.
    ///
    /// Returns the new normalized position to apply, or `None` when idle. On
    /// convergence the exact target is returned and the controller goes idle.
    pub fn step(&mut self, current: f64) -> Option<f64> {
        let ScrollPhase::Animating { target, .. } = self.phase else {
            return None;
        };
        let next = current + (target - current) * self.damping;
        if (target - next).abs() <= self.epsilon || !next.is_finite() {
            tracing::trace!(goal = target, "smooth scroll converged");
            self.phase = ScrollPhase::Idle;
            return Some(target);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_EPSILON, ScrollPhase, SmoothScroll};

    fn run_to_idle(scroll: &mut SmoothScroll, mut position: f64, max_steps: usize) -> (f64, usize) {
        let mut steps = 0;
        while let Some(next) = scroll.step(position) {
            position = next;
            steps += 1;
            assert!(steps <= max_steps, "did not converge within {max_steps} steps");
        }
        (position, steps)
    }

    #[test]
    fn converges_from_worst_case_distance() {
        let mut scroll = SmoothScroll::new();
        scroll.start(1.0);
        let (position, steps) = run_to_idle(&mut scroll, 0.0, 150);
        assert_eq!(position, 1.0);
        assert!(steps > 100, "damping should not jump: {steps}");
        assert!(!scroll.is_animating());
    }

    #[test]
    fn each_step_covers_five_percent() {
        let mut scroll = SmoothScroll::new();
        scroll.start(0.0);
        let next = scroll.step(1.0).unwrap();
        assert!((next - 0.95).abs() < 1e-12);
        let next = scroll.step(next).unwrap();
        assert!((next - 0.9025).abs() < 1e-12);
    }

    #[test]
    fn near_target_snaps_immediately() {
        let mut scroll = SmoothScroll::new();
        scroll.start(0.5);
        assert_eq!(scroll.step(0.5 + DEFAULT_EPSILON / 2.0), Some(0.5));
        assert_eq!(scroll.phase(), ScrollPhase::Idle);
        assert_eq!(scroll.step(0.5), None);
    }

    #[test]
    fn cancel_stops_further_movement() {
        let mut scroll = SmoothScroll::new();
        let token = scroll.start(1.0);
        assert!(scroll.is_current(token));
        assert!(scroll.step(0.0).is_some());
        assert!(scroll.cancel());
        assert!(!scroll.is_current(token));
        assert_eq!(scroll.step(0.05), None);
        assert!(!scroll.cancel());
    }

    #[test]
    fn new_start_invalidates_previous_token() {
        let mut scroll = SmoothScroll::new();
        let first = scroll.start(0.25);
        let second = scroll.start(0.75);
        assert_ne!(first, second);
        assert!(!scroll.is_current(first));
        assert!(scroll.is_current(second));
        assert_eq!(scroll.target(), Some(0.75));
    }

    #[test]
    fn targets_and_parameters_are_clamped() {
        let mut scroll = SmoothScroll::new().with_damping(4.0).with_epsilon(-1.0);
        assert_eq!(scroll.damping(), 1.0);
        assert_eq!(scroll.epsilon(), DEFAULT_EPSILON);
        scroll.start(2.0);
        assert_eq!(scroll.target(), Some(1.0));
        // Full damping reaches the target in a single step.
        assert_eq!(scroll.step(0.0), Some(1.0));
        assert!(!scroll.is_animating());
    }
}
