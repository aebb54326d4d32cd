//! Moving-average keypoint smoother.
//!
//! [`KeypointSmoother`] keeps the last `window` raw poses (newest first) and
//! returns, for every joint present in the current frame, the arithmetic
//! mean of `x`, `y` and `score` across the window.  Older frames that lack
//! the joint contribute the current frame's value instead, so a joint that
//! just reappeared is never dragged toward the origin.
//!
//! Joints absent from the current frame stay absent in the output.  No
//! confidence gating happens here; see [`crate::pose::joint_angle`].
//!
//! # Example
//!
//! ```rust
//! use pose_coach::pose::{Joint, Keypoint, KeypointSmoother, Pose};
//!
//! let mut smoother = KeypointSmoother::new(4);
//! let mut a = Pose::empty();
//! a.set(Keypoint::new(Joint::Nose, 0.0, 0.0, 1.0));
//! let mut b = Pose::empty();
//! b.set(Keypoint::new(Joint::Nose, 10.0, 20.0, 0.5));
//!
//! smoother.smooth(&a);
//! let out = smoother.smooth(&b);
//! let nose = out.get(Joint::Nose).unwrap();
//! assert_eq!((nose.x, nose.y, nose.score), (5.0, 10.0, 0.75));
//! ```

use std::collections::VecDeque;

use crate::pose::keypoint::{Joint, Keypoint, Pose};

/// Default number of frames averaged by the smoother.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 4;

// ---------------------------------------------------------------------------
// KeypointSmoother
// ---------------------------------------------------------------------------

/// Bounded FIFO moving average over raw poses.
#[derive(Debug, Clone)]
pub struct KeypointSmoother {
    /// Raw poses, newest at the front.
    history: VecDeque<Pose>,
    window: usize,
}

impl KeypointSmoother {
    /// Create a smoother averaging over `window` frames.
    ///
    /// # Panics
    ///
    /// Panics if `window == 0`.
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "smoothing window must be > 0");
        Self {
            history: VecDeque::with_capacity(window + 1),
            window,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of raw frames currently held (at most `window`).
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Push `raw` into the window and return the smoothed pose.
    pub fn smooth(&mut self, raw: &Pose) -> Pose {
        self.history.push_front(*raw);
        self.history.truncate(self.window);

        let frames = self.history.len() as f64;
        let mut out = Pose::empty();

        for current in raw.iter() {
            let joint: Joint = current.joint;
            let (mut x, mut y, mut score) = (0.0, 0.0, 0.0);
            for frame in &self.history {
                let kp = frame.get(joint).unwrap_or(current);
                x += kp.x;
                y += kp.y;
                score += kp.score;
            }
            out.set(Keypoint::new(joint, x / frames, y / frames, score / frames));
        }

        out
    }

    /// Drop all history (session start).
    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for KeypointSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_WINDOW)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
