//! Frame Sequence Integration Tests
//!
//! Simulated devices and a simulated camera share one logger through the
//! `seqlog` facade; the tests decode the per-frame snapshots the way a
//! device-sequencing test harness would.

#[path = "../common/mod.rs"]
mod common;

mod acquisition;
mod replay;
