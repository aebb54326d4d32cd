//! pose-coach: real-time exercise coaching from 2D body keypoints.
//!
//! ```text
//! source ──▶ pose (smoothing, joint angles) ──▶ exercise (evaluators)
//!                                                   │
//!                pipeline (reps, debounced feedback, session runner)
//!                                                   │
//!                                   sink (speaker, workout history)
//! ```

pub mod config;
pub mod exercise;
pub mod pipeline;
pub mod pose;
pub mod sink;
pub mod source;
