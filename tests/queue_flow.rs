use tune_queue::config::{QueueSettings, StaleCurrent};
use tune_queue::{Queue, QueueEvent, Track};

fn track(id: &str) -> Track {
    Track::new(id, format!("Song {id}"))
}

fn ids(queue: &Queue<Track>) -> Vec<String> {
    queue.all().iter().map(|t| t.id.clone()).collect()
}

#[test]
fn play_next_then_skip_through_queue() {
    let mut queue = Queue::new();
    queue.replace_queue_with(["a", "b", "c"].map(track));
    queue.set_current(queue.first().cloned());

    queue.queue_after_current([track("x")]);
    assert_eq!(ids(&queue), vec!["a", "x", "b", "c"]);

    let mut played = vec![String::from("a")];
    while let Some(next) = queue.next().cloned() {
        played.push(next.id.clone());
        queue.set_current(Some(next));
    }
    assert_eq!(played, vec!["a", "x", "b", "c"]);
    assert_eq!(queue.previous().map(|t| t.id.as_str()), Some("b"));
}

#[test]
fn removing_current_leaves_a_stale_pointer() {
    let mut queue = Queue::new();
    queue.replace_queue_with(["a", "b", "c"].map(track));
    queue.set_current(Some(track("b")));

    queue.unqueue([&track("b")]);
    assert_eq!(ids(&queue), vec!["a", "c"]);
    assert_eq!(queue.current().map(|t| t.id.as_str()), Some("b"));
    assert_eq!(queue.next().map(|t| t.id.as_str()), Some("a"));
    assert_eq!(queue.previous(), None);

    let mut strict = Queue::with_settings(&QueueSettings {
        stale_current: StaleCurrent::Absent,
        shuffle_seed: None,
    });
    strict.replace_queue_with(["a", "c"].map(track));
    strict.set_current(Some(track("b")));
    assert_eq!(strict.next(), None);
}

#[test]
fn drag_and_drop_reorder() {
    let mut queue = Queue::new();
    queue.replace_queue_with(["a", "b", "c", "d", "e"].map(track));

    let dragged = [track("d"), track("a")];
    queue.move_before(&dragged, &track("c"));
    assert_eq!(ids(&queue), vec!["b", "d", "a", "c", "e"]);
}

#[test]
fn observer_sees_every_change() {
    let mut queue = Queue::new();
    let rx = queue.subscribe();

    queue.queue([track("a")]);
    queue.queue_if_not_queued(track("a"));
    queue.queue_to_top([track("z")]);
    queue.shuffle();

    let revisions: Vec<u64> = rx
        .try_iter()
        .map(|event| match event {
            QueueEvent::Reordered { revision, .. } => revision,
            QueueEvent::CurrentChanged { revision } => revision,
        })
        .collect();
    assert_eq!(revisions, vec![1, 2, 3]);
    assert_eq!(queue.snapshot().revision, 3);
    assert_eq!(queue.len(), 2);
}

#[test]
fn clear_then_navigation_falls_back_to_empty() {
    let mut queue = Queue::new();
    queue.replace_queue_with(["a", "b"].map(track));
    queue.clear();

    assert!(queue.is_empty());
    assert_eq!(queue.first(), None);
    assert_eq!(queue.last(), None);
    assert_eq!(queue.next(), None);
    assert_eq!(queue.previous(), None);
    assert!(!queue.contains(&track("a")));
    assert_eq!(queue.index_of(&track("a")), None);
}
