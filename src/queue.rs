use crate::config::{QueueSettings, StaleCurrent};
use crate::model::Identified;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashSet;
use std::mem;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueEvent {
    Reordered { revision: u64, len: usize },
    CurrentChanged { revision: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot<T> {
    pub items: Vec<T>,
    pub current: Option<T>,
    pub revision: u64,
}

#[derive(Debug)]
pub struct Queue<T> {
    items: Vec<T>,
    current: Option<T>,
    revision: u64,
    stale_current: StaleCurrent,
    rng: SmallRng,
    subscribers: Vec<Sender<QueueEvent>>,
}

impl<T: Identified + Clone> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified + Clone> Queue<T> {
    pub fn new() -> Self {
        Self::with_settings(&QueueSettings::default())
    }

    pub fn with_settings(settings: &QueueSettings) -> Self {
        let rng = match settings.shuffle_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        Self {
            items: Vec::new(),
            current: None,
            revision: 0,
            stale_current: settings.stale_current,
            rng,
            subscribers: Vec::new(),
        }
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Replace the whole sequence as-is. Does not deduplicate: the caller must
    /// not pass two tracks with the same id.
    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.revision += 1;
        self.notify(QueueEvent::Reordered {
            revision: self.revision,
            len: self.items.len(),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn contains(&self, track: &T) -> bool {
        self.index_of(track).is_some()
    }

    pub fn index_of(&self, track: &T) -> Option<usize> {
        self.position(track.id())
    }

    pub fn queue<I: IntoIterator<Item = T>>(&mut self, tracks: I) {
        let tracks = unique(tracks);
        if tracks.is_empty() {
            return;
        }

        let mut items = self.take_without(&ids_of(tracks.iter()));
        items.extend(tracks);
        self.set_all(items);
    }

    pub fn queue_if_not_queued(&mut self, track: T) {
        if !self.contains(&track) {
            self.queue_after_current([track]);
        }
    }

    pub fn queue_to_top<I: IntoIterator<Item = T>>(&mut self, tracks: I) {
        let mut items = unique(tracks);
        if items.is_empty() {
            return;
        }

        let mut rest = self.take_without(&ids_of(items.iter()));
        items.append(&mut rest);
        self.set_all(items);
    }

    pub fn replace_queue_with<I: IntoIterator<Item = T>>(&mut self, tracks: I) {
        self.set_all(unique(tracks));
    }

    pub fn queue_after_current<I: IntoIterator<Item = T>>(&mut self, tracks: I) {
        let tracks = unique(tracks);
        if tracks.is_empty() {
            return;
        }

        let current_id = self.current.as_ref().map(|current| current.id().clone());
        let Some(current_id) = current_id.filter(|_| !self.items.is_empty()) else {
            return self.queue(tracks);
        };

        let mut items = self.take_without(&ids_of(tracks.iter()));
        // Current may have been among the removed tracks; then the block lands at the head.
        let at = items
            .iter()
            .position(|item| item.id() == &current_id)
            .map_or(0, |idx| idx + 1);
        items.splice(at..at, tracks);
        self.set_all(items);
    }

    pub fn unqueue<'a, I>(&mut self, tracks: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let ids = ids_of(tracks);
        if ids.is_empty() {
            return;
        }

        let items = self.take_without(&ids);
        self.set_all(items);
    }

    /// Tracks that are not queued, and the target itself, are skipped.
    pub fn move_before<'a, I>(&mut self, tracks: I, target: &T)
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let target_id = target.id();
        if self.position(target_id).is_none() {
            log::debug!("move_before: target {target_id:?} is not queued");
            return;
        }

        let mut items = mem::take(&mut self.items);
        let mut seen = HashSet::new();
        let mut moved = false;

        for track in tracks {
            let id = track.id();
            if id == target_id || !seen.insert(id.clone()) {
                continue;
            }
            let Some(from) = items.iter().position(|item| item.id() == id) else {
                continue;
            };

            let item = items.remove(from);
            let to = items
                .iter()
                .position(|item| item.id() == target_id)
                .unwrap_or(items.len());
            items.insert(to, item);
            moved = true;
        }

        if moved {
            self.set_all(items);
        } else {
            self.items = items;
        }
    }

    pub fn clear(&mut self) {
        self.set_all(Vec::new());
    }

    pub fn shuffle(&mut self) {
        let mut items = mem::take(&mut self.items);
        items.shuffle(&mut self.rng);
        self.set_all(items);
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, track: Option<T>) {
        self.current = track;
        self.revision += 1;
        self.notify(QueueEvent::CurrentChanged {
            revision: self.revision,
        });
    }

    pub fn next(&self) -> Option<&T> {
        let Some(current) = &self.current else {
            return self.first();
        };

        match self.position(current.id()) {
            Some(idx) => self.items.get(idx + 1),
            None => match self.stale_current {
                StaleCurrent::Fallback => {
                    log::trace!("next: current {:?} is not queued, using head", current.id());
                    self.first()
                }
                StaleCurrent::Absent => None,
            },
        }
    }

    pub fn previous(&self) -> Option<&T> {
        let Some(current) = &self.current else {
            return self.last();
        };

        match self.position(current.id()) {
            Some(idx) => idx.checked_sub(1).and_then(|prev| self.items.get(prev)),
            None => {
                log::trace!("previous: current {:?} is not queued", current.id());
                None
            }
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self) -> Receiver<QueueEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn snapshot(&self) -> QueueSnapshot<T> {
        QueueSnapshot {
            items: self.items.clone(),
            current: self.current.clone(),
            revision: self.revision,
        }
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn take_without(&mut self, ids: &HashSet<T::Id>) -> Vec<T> {
        let mut items = mem::take(&mut self.items);
        items.retain(|item| !ids.contains(item.id()));
        items
    }

    fn notify(&mut self, event: QueueEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

fn unique<T: Identified, I: IntoIterator<Item = T>>(tracks: I) -> Vec<T> {
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .filter(|track| seen.insert(track.id().clone()))
        .collect()
}

fn ids_of<'a, T, I>(tracks: I) -> HashSet<T::Id>
where
    T: Identified + 'a,
    I: IntoIterator<Item = &'a T>,
{
    tracks.into_iter().map(|track| track.id().clone()).collect()
}
