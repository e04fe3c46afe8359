// Animated numeric display
//
// Every displayed metric owns a value slot here; the slot table is the
// single source of truth for what is on screen. Setting a new target
// starts a linear interpolation from whatever the slot shows at that
// moment. A retarget replaces the in-flight record for its key, so a
// superseded animation can never write a stale frame.

use crate::metrics::Metric;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default animation duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);

/// One value slot on the display surface.
#[derive(Debug, Clone, Copy)]
struct Slot {
    value: f64,
    decimals: usize,
}

/// An in-flight interpolation for a single key.
#[derive(Debug, Clone, Copy)]
struct Animation {
    start_value: f64,
    target: f64,
    started: Instant,
}

#[derive(Debug)]
pub struct Animator {
    duration: Duration,
    slots: HashMap<Metric, Slot>,
    active: HashMap<Metric, Animation>,
}

impl Animator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            slots: HashMap::new(),
            active: HashMap::new(),
        }
    }

    /// Seed a key with a value, without animating.
    pub fn set_immediate(&mut self, metric: Metric, value: f64, decimals: usize) {
        self.active.remove(&metric);
        self.slots.insert(metric, Slot { value, decimals });
    }

    /// Begin animating a key toward `target`.
    ///
    /// The start point is whatever the key displays right now; a
    /// non-finite last value restarts from zero. Any in-flight animation
    /// on the same key is replaced.
    pub fn set_target(&mut self, metric: Metric, target: f64, decimals: usize, now: Instant) {
        let last = self.displayed(metric).unwrap_or(0.0);
        let start_value = if last.is_finite() { last } else { 0.0 };

        self.slots.insert(
            metric,
            Slot {
                value: start_value,
                decimals,
            },
        );
        self.active.insert(
            metric,
            Animation {
                start_value,
                target,
                started: now,
            },
        );
    }

    /// Advance every active animation to `now`.
    ///
    /// Progress is elapsed/duration clamped to [0, 1]; at 1 the slot is
    /// set exactly to the target (no interpolation drift survives) and
    /// the animation is retired.
    pub fn tick(&mut self, now: Instant) {
        let duration = self.duration.as_secs_f64();
        let slots = &mut self.slots;

        self.active.retain(|metric, anim| {
            let Some(slot) = slots.get_mut(metric) else {
                return false;
            };

            let elapsed = now.saturating_duration_since(anim.started).as_secs_f64();
            let progress = if duration > 0.0 {
                (elapsed / duration).min(1.0)
            } else {
                1.0
            };

            if progress >= 1.0 {
                slot.value = anim.target;
                false
            } else {
                slot.value = anim.start_value + (anim.target - anim.start_value) * progress;
                true
            }
        });
    }

    /// Current displayed value for a key.
    pub fn displayed(&self, metric: Metric) -> Option<f64> {
        self.slots.get(&metric).map(|slot| slot.value)
    }

    /// Current displayed value and its fractional-digit policy.
    pub fn display(&self, metric: Metric) -> Option<(f64, usize)> {
        self.slots.get(&metric).map(|slot| (slot.value, slot.decimals))
    }

    /// Whether any interpolation is still running.
    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: Metric = Metric::GoldWeight;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_interpolates_linearly() {
        let t0 = Instant::now();
        let mut animator = Animator::new(ms(600));

        animator.set_target(KEY, 10.0, 3, t0);
        animator.tick(t0 + ms(300));

        let value = animator.displayed(KEY).unwrap();
        assert!((value - 5.0).abs() < 1e-9, "halfway should read 5.0, got {value}");
    }

    #[test]
    fn test_lands_exactly_on_target() {
        let t0 = Instant::now();
        let mut animator = Animator::new(ms(600));

        animator.set_target(KEY, 1.0 / 3.0, 3, t0);
        // Well past the duration: must be exactly the target, not an
        // interpolated approximation
        animator.tick(t0 + ms(10_000));

        assert_eq!(animator.displayed(KEY), Some(1.0 / 3.0));
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_retarget_starts_from_displayed_value() {
        let t0 = Instant::now();
        let mut animator = Animator::new(ms(600));

        animator.set_target(KEY, 10.0, 3, t0);
        animator.tick(t0 + ms(300)); // displays 5.0

        // Newest call wins; the replaced animation leaves no trace
        animator.set_target(KEY, 0.0, 3, t0 + ms(300));
        animator.tick(t0 + ms(600)); // halfway through the new run

        let value = animator.displayed(KEY).unwrap();
        assert!((value - 2.5).abs() < 1e-9, "expected 2.5, got {value}");

        animator.tick(t0 + ms(900));
        assert_eq!(animator.displayed(KEY), Some(0.0));
    }

    #[test]
    fn test_non_finite_last_value_restarts_from_zero() {
        let t0 = Instant::now();
        let mut animator = Animator::new(ms(600));

        animator.set_immediate(KEY, f64::NAN, 3);
        animator.set_target(KEY, 8.0, 3, t0);
        animator.tick(t0 + ms(300));

        let value = animator.displayed(KEY).unwrap();
        assert!((value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unseeded_key_reads_none() {
        let animator = Animator::default();
        assert_eq!(animator.displayed(KEY), None);
        assert_eq!(animator.display(KEY), None);
    }

    #[test]
    fn test_keys_animate_independently() {
        let t0 = Instant::now();
        let mut animator = Animator::new(ms(600));

        animator.set_target(Metric::GoldWeight, 10.0, 3, t0);
        animator.set_target(Metric::UnitCount, 100.0, 0, t0 + ms(300));
        animator.tick(t0 + ms(600));

        assert_eq!(animator.displayed(Metric::GoldWeight), Some(10.0));
        let units = animator.displayed(Metric::UnitCount).unwrap();
        assert!((units - 50.0).abs() < 1e-9);
        assert!(animator.is_animating());
    }
}
