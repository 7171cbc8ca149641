//! banco Session - Live-table collaborators for the EV engine
//!
//! Tracks the shoe as cards are dealt, runs calculations off the caller's
//! thread with last-writer-wins delivery, and turns EVs into Kelly stakes.

pub mod kelly;
pub mod tracker;
pub mod worker;

pub use kelly::{kelly_fraction, recommend, KellySizer, Recommendation};
pub use tracker::ShoeTracker;
pub use worker::{Completed, Job, Recalculator};
