//! Frame-counted deferred callbacks
//!
//! Delays are measured in frames, not wall-clock time. At most one item per
//! event name is pending at a time; scheduling a name that is already pending
//! is ignored and does not restart its countdown.

use std::fmt;

/// Names of the events that can be scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleEventName {
    /// Return to the menu after a level ends
    EndLoops,
    /// Ship explosion finished
    Exploding,
    /// Breakable explosion finished
    BreakableExploding,
}

/// Callback run against the scheduler's context
pub type Callback<C> = Box<dyn FnMut(&mut C)>;

/// A pending event
pub struct ScheduleItem<C> {
    pub name: ScheduleEventName,
    /// Frames left before expiry
    pub frames: i32,
    /// Called each frame while `frames` stays above zero
    do_while: Option<Callback<C>>,
    /// Called once when `frames` reaches zero
    do_after: Option<Callback<C>>,
}

impl<C> fmt::Debug for ScheduleItem<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleItem")
            .field("name", &self.name)
            .field("frames", &self.frames)
            .field("do_while", &self.do_while.is_some())
            .field("do_after", &self.do_after.is_some())
            .finish()
    }
}

/// Ordered list of pending events, processed once per frame
pub struct Scheduler<C> {
    items: Vec<ScheduleItem<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Run `callback` once after `frames` frames
    pub fn do_after(
        &mut self,
        name: ScheduleEventName,
        frames: i32,
        callback: impl FnMut(&mut C) + 'static,
    ) {
        if self.is_active(name) {
            return;
        }
        log::debug!("Scheduled {:?} in {} frames", name, frames);
        self.items.push(ScheduleItem {
            name,
            frames,
            do_while: None,
            do_after: Some(Box::new(callback)),
        });
    }

    /// Run `callback` every frame for the next `frames - 1` frames
    pub fn do_while(
        &mut self,
        name: ScheduleEventName,
        frames: i32,
        callback: impl FnMut(&mut C) + 'static,
    ) {
        if self.is_active(name) {
            return;
        }
        self.items.push(ScheduleItem {
            name,
            frames,
            do_while: Some(Box::new(callback)),
            do_after: None,
        });
    }

    pub fn is_active(&self, name: ScheduleEventName) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Drop every pending event without running it
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advance one frame: count every item down, fire expiries and
    /// while-callbacks in insertion order, then drop expired items.
    pub fn process_schedule(&mut self, ctx: &mut C) {
        for item in &mut self.items {
            item.frames -= 1;
            if item.frames <= 0 {
                if let Some(callback) = item.do_after.as_mut() {
                    log::debug!("Schedule event {:?} fired", item.name);
                    callback(ctx);
                }
            } else if let Some(callback) = item.do_while.as_mut() {
                callback(ctx);
            }
        }
        self.items.retain(|item| item.frames > 0);
    }

    /// Move the items of `other` into this scheduler, keeping the
    /// one-per-name rule. Used when callbacks scheduled new events on a
    /// context that was detached from this scheduler while it ran.
    pub fn absorb(&mut self, other: Scheduler<C>) {
        for item in other.items {
            if !self.is_active(item.name) {
                self.items.push(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        after: u32,
        during: u32,
        fired_on: Vec<u32>,
        frame: u32,
    }

    fn run(scheduler: &mut Scheduler<Counter>, ctx: &mut Counter, frames: u32) {
        for _ in 0..frames {
            ctx.frame += 1;
            scheduler.process_schedule(ctx);
        }
    }

    #[test]
    fn test_do_after_fires_once_on_frame_n() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Counter::default();
        scheduler.do_after(ScheduleEventName::Exploding, 40, |c: &mut Counter| {
            c.after += 1;
            c.fired_on.push(c.frame);
        });
        run(&mut scheduler, &mut ctx, 39);
        assert_eq!(ctx.after, 0);
        run(&mut scheduler, &mut ctx, 10);
        assert_eq!(ctx.after, 1);
        assert_eq!(ctx.fired_on, vec![40]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_duplicate_name_is_ignored() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Counter::default();
        for _ in 0..2 {
            scheduler.do_after(ScheduleEventName::EndLoops, 5, |c: &mut Counter| {
                c.after += 1;
                c.fired_on.push(c.frame);
            });
        }
        run(&mut scheduler, &mut ctx, 10);
        assert_eq!(ctx.after, 1);
        assert_eq!(ctx.fired_on, vec![5]);
    }

    #[test]
    fn test_duplicate_does_not_reset_countdown() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Counter::default();
        scheduler.do_after(ScheduleEventName::EndLoops, 5, |c: &mut Counter| {
            c.fired_on.push(c.frame)
        });
        run(&mut scheduler, &mut ctx, 3);
        scheduler.do_after(ScheduleEventName::EndLoops, 5, |c: &mut Counter| {
            c.fired_on.push(c.frame)
        });
        run(&mut scheduler, &mut ctx, 5);
        assert_eq!(ctx.fired_on, vec![5]);
    }

    #[test]
    fn test_do_while_runs_until_expiry() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Counter::default();
        scheduler.do_while(ScheduleEventName::BreakableExploding, 4, |c: &mut Counter| {
            c.during += 1
        });
        run(&mut scheduler, &mut ctx, 10);
        assert_eq!(ctx.during, 3);
        assert!(!scheduler.is_active(ScheduleEventName::BreakableExploding));
    }

    #[test]
    fn test_names_are_independent() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Counter::default();
        scheduler.do_after(ScheduleEventName::Exploding, 2, |c: &mut Counter| c.after += 1);
        scheduler.do_after(ScheduleEventName::EndLoops, 3, |c: &mut Counter| c.after += 10);
        run(&mut scheduler, &mut ctx, 2);
        assert_eq!(ctx.after, 1);
        assert!(scheduler.is_active(ScheduleEventName::EndLoops));
        run(&mut scheduler, &mut ctx, 1);
        assert_eq!(ctx.after, 11);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Counter::default();
        scheduler.do_after(ScheduleEventName::EndLoops, 1, |c: &mut Counter| c.after += 1);
        scheduler.clear();
        run(&mut scheduler, &mut ctx, 5);
        assert_eq!(ctx.after, 0);
    }

    #[test]
    fn test_absorb_keeps_one_per_name() {
        let mut scheduler: Scheduler<Counter> = Scheduler::new();
        let mut ctx = Counter::default();
        scheduler.do_after(ScheduleEventName::EndLoops, 10, |c: &mut Counter| {
            c.fired_on.push(c.frame)
        });
        let mut other = Scheduler::new();
        other.do_after(ScheduleEventName::EndLoops, 3, |c: &mut Counter| c.after += 100);
        other.do_after(ScheduleEventName::Exploding, 3, |c: &mut Counter| c.after += 1);
        scheduler.absorb(other);
        run(&mut scheduler, &mut ctx, 10);
        assert_eq!(ctx.after, 1);
        assert_eq!(ctx.fired_on, vec![10]);
    }
}
