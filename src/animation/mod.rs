//! Entry animation: easing, the per-entry motion state machine, and intake with reflow.

pub mod ease;
pub mod motion;
pub mod reflow;
