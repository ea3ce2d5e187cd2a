//! Shared test utilities for the integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

use seqlog::{CameraInfo, FrameSnapshot, SettingLogger};
use std::sync::{Arc, Once};

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness (shown with --nocapture).
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Logger shared the way device threads share it.
pub fn shared_logger() -> Arc<SettingLogger> {
    init_tracing();
    Arc::new(SettingLogger::new())
}

/// Pack one frame, growing the buffer until it fits, and decode it.
pub fn pack_frame(logger: &SettingLogger, camera: &CameraInfo) -> FrameSnapshot {
    let mut dest = vec![0u8; 64];
    loop {
        match logger.pack_and_reset(&mut dest, camera) {
            Ok(len) => return FrameSnapshot::decode(&dest[..len]).unwrap(),
            Err(e) if e.is_capacity() => {
                let n = dest.len() * 2;
                dest.resize(n, 0);
            }
            Err(e) => panic!("pack failed: {}", e),
        }
    }
}
