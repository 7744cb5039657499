#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use tune_queue::config::QueueSettings;
use tune_queue::{Queue, Track};

fuzz_target!(|data: &[u8]| {
    let pool: Vec<Track> = (0..16)
        .map(|idx| Track::new(format!("t{idx}"), format!("track {idx}")))
        .collect();
    let mut queue = Queue::with_settings(&QueueSettings {
        shuffle_seed: Some(0),
        ..QueueSettings::default()
    });

    for pair in data.chunks(2) {
        let op = pair[0];
        let pick = &pool[usize::from(*pair.get(1).unwrap_or(&0)) % pool.len()];
        match op % 10 {
            0 => queue.queue([pick.clone()]),
            1 => queue.queue_after_current([pick.clone()]),
            2 => queue.queue_if_not_queued(pick.clone()),
            3 => queue.unqueue([pick]),
            4 => queue.set_current(Some(pick.clone())),
            5 => queue.move_before([&pool[usize::from(op) % pool.len()]], pick),
            6 => queue.shuffle(),
            7 => {
                let _ = queue.next();
                let _ = queue.previous();
            }
            8 => queue.queue_to_top([pick.clone()]),
            _ => queue.clear(),
        }

        let ids: HashSet<&str> = queue.all().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), queue.len());
    }
});
