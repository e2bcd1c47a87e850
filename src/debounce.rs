//! Time-based debounce gate for edge-triggered inputs.
//!
//! Each monitored input owns one [`DebounceGate`].  The GPIO ISR calls
//! [`DebounceGate::should_fire`] with the current monotonic time; the gate
//! accepts the edge only if at least `quiet_ms` elapsed since the last
//! *accepted* edge.  Rejected edges do not move the window.
//!
//! The gate is a single `AtomicU32`: no locks, no blocking, constant time,
//! so it is safe inside an interrupt handler.  Timestamps are `u32`
//! milliseconds compared with `wrapping_sub`, which stays correct across
//! the ~49-day counter wrap.  `u32::MAX` marks a gate that never fired; an
//! edge landing exactly on that instant is stamped one millisecond early.

use core::sync::atomic::{AtomicU32, Ordering};

const NEVER_FIRED: u32 = u32::MAX;

pub struct DebounceGate {
    /// Time of the last accepted edge (ms since boot), or `NEVER_FIRED`.
    last_fire_ms: AtomicU32,
    quiet_ms: u32,
}

impl DebounceGate {
    pub const fn new(quiet_ms: u32) -> Self {
        Self {
            last_fire_ms: AtomicU32::new(NEVER_FIRED),
            quiet_ms,
        }
    }

    pub fn quiet_ms(&self) -> u32 {
        self.quiet_ms
    }

    /// Returns `true` if the edge at `now_ms` should trigger its action.
    ///
    /// On `true` the last-fire time has been advanced to `now_ms`.  On
    /// `false` nothing changed.
    pub fn should_fire(&self, now_ms: u32) -> bool {
        let last = self.last_fire_ms.load(Ordering::Acquire);
        if last != NEVER_FIRED && now_ms.wrapping_sub(last) < self.quiet_ms {
            return false;
        }
        let stamp = if now_ms == NEVER_FIRED {
            NEVER_FIRED - 1
        } else {
            now_ms
        };
        // A nested interrupt may have claimed this window between the load
        // and here; the loser of the exchange is treated as bounce.
        self.last_fire_ms
            .compare_exchange(last, stamp, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Time of the last accepted edge, or `None` if nothing fired yet.
    pub fn last_fire_ms(&self) -> Option<u32> {
        let last = self.last_fire_ms.load(Ordering::Acquire);
        (last != NEVER_FIRED).then_some(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_edge_always_fires() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(0));
        assert_eq!(gate.last_fire_ms(), Some(0));
    }

    #[test]
    fn first_edge_fires_shortly_after_boot() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(50));
    }

    #[test]
    fn edge_inside_window_is_suppressed() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(1_000));
        assert!(!gate.should_fire(1_199));
        assert_eq!(gate.last_fire_ms(), Some(1_000));
    }

    #[test]
    fn edge_after_window_fires() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(1_000));
        assert!(gate.should_fire(1_201));
        assert_eq!(gate.last_fire_ms(), Some(1_201));
    }

    #[test]
    fn exact_interval_fires() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(1_000));
        assert!(gate.should_fire(1_200));
    }

    #[test]
    fn suppressed_edges_do_not_extend_window() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(1_000));
        assert!(!gate.should_fire(1_100));
        assert!(!gate.should_fire(1_150));
        // Measured from 1_000, not from the bounces.
        assert!(gate.should_fire(1_200));
    }

    #[test]
    fn racing_first_edges_fire_once() {
        use std::sync::Barrier;

        for _ in 0..50 {
            let gate = DebounceGate::new(200);
            let barrier = Barrier::new(4);
            let fired: usize = std::thread::scope(|s| {
                let handles: Vec<_> = (0..4)
                    .map(|_| {
                        s.spawn(|| {
                            barrier.wait();
                            gate.should_fire(0)
                        })
                    })
                    .collect();
                handles
                    .into_iter()
                    .map(|h| usize::from(h.join().unwrap()))
                    .sum()
            });
            assert_eq!(fired, 1);
        }
    }

    #[test]
    fn edge_at_counter_max_still_arms_the_window() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(u32::MAX));
        assert_eq!(gate.last_fire_ms(), Some(u32::MAX - 1));
        assert!(!gate.should_fire(150));
        assert!(gate.should_fire(199));
    }

    #[test]
    fn survives_counter_wrap() {
        let gate = DebounceGate::new(200);
        assert!(gate.should_fire(u32::MAX - 50));
        assert!(!gate.should_fire(100)); // 151 ms later
        assert!(gate.should_fire(150)); // 201 ms later
    }
}
