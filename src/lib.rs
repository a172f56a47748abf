//! Motion core for a single-page animated portfolio.
//!
//! Everything here is target-independent: the intro sequencer, scroll
//! choreography, parallax and particle generation run against opaque
//! handles supplied through [`targets::TargetResolver`], so they are
//! exercised natively in tests and driven by the DOM in the browser build.

pub mod animator;
pub mod choreo;
pub mod config;
pub mod content;
pub mod intro;
pub mod motion;
pub mod nav;
pub mod parallax;
pub mod particles;
pub mod state;
pub mod targets;
pub mod telemetry;
