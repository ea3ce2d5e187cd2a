//! Stage moves and triggers interleaved with frame acquisition

use crate::common::{pack_frame, shared_logger};
use seqlog::{CameraInfo, SettingKey, SettingValue};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

#[test]
fn each_frame_sees_the_move_that_preceded_it() {
    let logger = shared_logger();

    for i in 0..5u64 {
        let target = i as f64 * 10.0;
        logger.set_float("Stage", "Position", target, true);
        logger.mark_busy("Stage", true);

        // Camera waits for the stage to report busy once before exposing
        assert!(logger.is_busy("Stage", false));
        let frame = pack_frame(&logger, &CameraInfo::new("Camera", true, i, i));

        assert_eq!(frame.camera.acquisition_seq_num, i);
        assert_eq!(frame.events.len(), 2);
        assert_eq!(frame.events[0].value, SettingValue::Float(target));
        assert_eq!(frame.events[1].key, SettingKey::new("Stage", "Busy"));
        assert!(frame.busy_devices.is_empty(), "marker consumed before packing");

        let previous = frame.baseline.get(&SettingKey::new("Stage", "Position"));
        if i == 0 {
            assert_eq!(previous, None);
        } else {
            assert_eq!(previous, Some(&SettingValue::Float((i - 1) as f64 * 10.0)));
        }
    }
}

#[test]
fn threaded_stage_and_camera_handshake() {
    let logger = shared_logger();
    let positions: Vec<i64> = vec![0, 150, 300, 450, 600, 750];
    let (frame_taken_tx, frame_taken_rx) = mpsc::channel::<()>();

    let stage = {
        let logger = Arc::clone(&logger);
        let positions = positions.clone();
        thread::spawn(move || {
            for p in positions {
                logger.set_integer("Stage", "Position", p, true);
                logger.mark_busy("Stage", true);
                frame_taken_rx.recv().unwrap();
            }
        })
    };

    let mut frames = Vec::new();
    for seq in 0..positions.len() as u64 {
        while !logger.is_busy("Stage", false) {
            thread::yield_now();
        }
        frames.push(pack_frame(&logger, &CameraInfo::new("Camera", true, seq, seq)));
        frame_taken_tx.send(()).unwrap();
    }
    stage.join().unwrap();

    for (frame, p) in frames.iter().zip(&positions) {
        let moves: Vec<&SettingValue> = frame
            .events_for_device("Stage")
            .filter(|e| e.key.key() == "Position")
            .map(|e| &e.value)
            .collect();
        assert_eq!(moves, vec![&SettingValue::Integer(*p)]);
        assert_eq!(
            frame.final_values().get(&SettingKey::new("Stage", "Position")),
            Some(&SettingValue::Integer(*p))
        );
    }
    assert_eq!(logger.image_count(), positions.len() as u64);
}

#[test]
fn idle_frames_carry_context_and_empty_epochs() {
    let logger = shared_logger();
    logger.set_string("Shutter", "State", "Open", true);
    pack_frame(&logger, &CameraInfo::snap("Camera", 0));

    for seq in 1..4u64 {
        let frame = pack_frame(&logger, &CameraInfo::new("Camera", true, seq, seq - 1));
        assert!(frame.events.is_empty());
        assert_eq!(frame.epoch_start, frame.epoch_end);
        assert_eq!(frame.camera.camera_seq_num, seq);
        assert!(frame.camera.is_sequence);
        assert_eq!(
            frame.baseline.get(&SettingKey::new("Shutter", "State")),
            Some(&SettingValue::from("Open"))
        );
    }
}

#[test]
fn trigger_between_frames_is_ordered_after_setting() {
    let logger = shared_logger();
    logger.set_integer("Laser", "Power", 30, true);
    logger.fire_one_shot("Laser", "Pulse", true);
    logger.set_integer("Laser", "Power", 0, true);

    let frame = pack_frame(&logger, &CameraInfo::snap("Camera", 0));
    let pulse = frame
        .events
        .iter()
        .find(|e| e.value.is_one_shot())
        .map(|e| e.counter)
        .unwrap();
    let powers: Vec<(u64, i64)> = frame
        .events
        .iter()
        .filter_map(|e| e.value.as_integer().map(|v| (e.counter, v)))
        .collect();
    assert!(powers[0].0 < pulse && pulse < powers[1].0);
    assert_eq!(powers[0].1, 30);
    assert_eq!(powers[1].1, 0);
}
