//! Replaying consecutive frames reconstructs device state

use crate::common::{pack_frame, shared_logger};
use seqlog::{CameraInfo, SettingKey, SettingValue};
use std::collections::BTreeMap;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn consecutive_frames_chain_baselines() {
    let logger = shared_logger();
    let barrier = Arc::new(Barrier::new(3));

    let devices: Vec<_> = ["Stage", "FilterWheel"]
        .into_iter()
        .map(|device| {
            let logger = Arc::clone(&logger);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..300i64 {
                    logger.set_integer(device, "Position", i, true);
                    if i % 7 == 0 {
                        logger.set_string(device, "Label", &format!("p{}", i), true);
                    }
                    // Fires over a key that already holds a label
                    if i % 50 == 25 {
                        logger.fire_one_shot(device, "Label", true);
                    }
                }
            })
        })
        .collect();

    barrier.wait();
    let mut frames = Vec::new();
    for seq in 0..20u64 {
        frames.push(pack_frame(&logger, &CameraInfo::new("Camera", true, seq, seq)));
        thread::yield_now();
    }
    for d in devices {
        d.join().unwrap();
    }
    frames.push(pack_frame(&logger, &CameraInfo::new("Camera", true, 20, 20)));

    for pair in frames.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert_eq!(prev.epoch_end, next.epoch_start);
        assert_eq!(prev.final_values(), next.persistent_baseline());
    }

    let last = frames.last().unwrap();
    let persistent: BTreeMap<_, _> = logger
        .current_values()
        .into_iter()
        .filter(|(_, v)| !v.is_one_shot())
        .collect();
    assert_eq!(last.final_values(), persistent);
    assert_eq!(
        logger.get("Stage", "Label"),
        Some(SettingValue::from("p294"))
    );
    assert_eq!(
        logger.get("Stage", "Position"),
        Some(SettingValue::Integer(299))
    );

    let total: usize = frames.iter().map(|f| f.events.len()).sum();
    // 300 positions + 43 labels + 6 fires per device
    assert_eq!(total, 2 * (300 + 43 + 6));
}

#[test]
fn fired_key_drops_out_of_replayed_state() {
    let logger = shared_logger();
    logger.set_integer("Laser", "Pulse", 5, true);
    logger.set_integer("Laser", "Power", 80, true);
    let a = pack_frame(&logger, &CameraInfo::snap("Camera", 0));

    logger.fire_one_shot("Laser", "Pulse", true);
    let b = pack_frame(&logger, &CameraInfo::snap("Camera", 1));
    let c = pack_frame(&logger, &CameraInfo::snap("Camera", 2));

    assert_eq!(a.final_values(), b.persistent_baseline());
    assert_eq!(b.final_values(), c.persistent_baseline());
    assert!(!b.final_values().contains_key(&SettingKey::new("Laser", "Pulse")));
    assert_eq!(
        c.baseline.get(&SettingKey::new("Laser", "Pulse")),
        Some(&SettingValue::OneShot)
    );
    assert_eq!(
        b.final_values().get(&SettingKey::new("Laser", "Power")),
        Some(&SettingValue::Integer(80))
    );
}
