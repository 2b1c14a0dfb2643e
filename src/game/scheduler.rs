//! Frame-Driven Timer Scheduler
//!
//! Single authority for every delayed or repeating callback in a game
//! session. Entries are advanced from the render loop via [`Scheduler::advance`]
//! and report back as typed events; there is no way for a stale timer to keep
//! ticking after [`Scheduler::clear`], which is what makes restarting a level
//! safe.

/// Handle identifying a scheduled entry, usable for targeted cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
enum Repeat {
    Once,
    Every(f32),
}

#[derive(Debug)]
struct Entry<E> {
    id: TimerId,
    remaining: f32,
    repeat: Repeat,
    event: E,
}

/// Deterministic timer collection advanced by frame delta time.
///
/// One-shot entries fire once and are removed; repeating entries re-arm with
/// their interval. A single `advance` call can fire the same repeating entry
/// multiple times if the frame delta spans several intervals, which keeps
/// ticking honest after a long stall.
pub struct Scheduler<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
}

impl<E: Copy> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    fn push(&mut self, remaining: f32, repeat: Repeat, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            remaining,
            repeat,
            event,
        });
        id
    }

    /// Schedule `event` to fire once after `delay` seconds.
    pub fn after(&mut self, delay: f32, event: E) -> TimerId {
        self.push(delay.max(0.0), Repeat::Once, event)
    }

    /// Schedule `event` to fire every `interval` seconds until cancelled.
    pub fn every(&mut self, interval: f32, event: E) -> TimerId {
        let interval = interval.max(1e-3);
        self.push(interval, Repeat::Every(interval), event)
    }

    /// Cancel a single entry. Unknown ids are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    /// Drop every entry. After this call nothing fires until re-scheduled.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance all entries by `delta` seconds and return the events that
    /// fired, in entry insertion order.
    pub fn advance(&mut self, delta: f32) -> Vec<E> {
        let mut fired = Vec::new();
        let mut retained = Vec::with_capacity(self.entries.len());

        for mut entry in self.entries.drain(..) {
            entry.remaining -= delta;
            match entry.repeat {
                Repeat::Once => {
                    if entry.remaining <= 0.0 {
                        fired.push(entry.event);
                    } else {
                        retained.push(entry);
                    }
                }
                Repeat::Every(interval) => {
                    while entry.remaining <= 0.0 {
                        fired.push(entry.event);
                        entry.remaining += interval;
                    }
                    retained.push(entry);
                }
            }
        }

        self.entries = retained;
        fired
    }
}

impl<E: Copy> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Ev {
        Tick,
        Spawn,
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut sched = Scheduler::new();
        sched.after(1.0, Ev::Spawn);

        assert!(sched.advance(0.5).is_empty());
        assert_eq!(sched.advance(0.6), vec![Ev::Spawn]);
        assert!(sched.advance(10.0).is_empty());
        assert!(sched.is_empty());
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut sched = Scheduler::new();
        sched.every(1.0, Ev::Tick);

        assert!(sched.advance(0.9).is_empty());
        assert_eq!(sched.advance(0.2), vec![Ev::Tick]);
        assert_eq!(sched.advance(1.0), vec![Ev::Tick]);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_repeating_catches_up_after_stall() {
        let mut sched = Scheduler::new();
        sched.every(1.0, Ev::Tick);

        // A 3.5 second frame owes three ticks
        assert_eq!(sched.advance(3.5), vec![Ev::Tick, Ev::Tick, Ev::Tick]);
    }

    #[test]
    fn test_cancel_removes_entry() {
        let mut sched = Scheduler::new();
        let id = sched.every(1.0, Ev::Tick);
        sched.after(1.0, Ev::Spawn);

        sched.cancel(id);
        assert_eq!(sched.advance(1.5), vec![Ev::Spawn]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut sched = Scheduler::new();
        sched.every(0.5, Ev::Tick);
        sched.after(0.5, Ev::Spawn);

        sched.clear();
        assert!(sched.advance(5.0).is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_clear() {
        let mut sched = Scheduler::new();
        let a = sched.after(1.0, Ev::Spawn);
        sched.clear();
        let b = sched.after(1.0, Ev::Spawn);
        assert_ne!(a, b);
    }
}
