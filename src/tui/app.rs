// TUI application state
//
// Holds the canonical input value, the reference-data store, and the
// animation/debounce state that drives the metric display. The
// animator's slot table is the single source of truth for what each
// metric panel shows.

use crate::animate::Animator;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::format::format_number;
use crate::logging::LogBuffer;
use crate::metrics::{self, Metric};
use crate::sanitize;
use crate::store::DataStore;
use std::time::{Duration, Instant};

/// How long a toast notice stays in the status bar
const TOAST_DURATION: Duration = Duration::from_secs(2);

/// Different views the TUI can display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Main,
    Help,
}

/// Main application state for the TUI
pub struct App {
    /// Canonical (digit-only) input value
    pub input: String,

    /// Reference data; empty until hydration completes
    pub store: DataStore,

    /// Whether hydration has completed
    pub hydrated: bool,

    /// Per-metric display slots and in-flight interpolations
    pub animator: Animator,

    /// Single-slot quiet-period timer for recomputation
    pub debouncer: Debouncer,

    /// Current view being displayed
    pub view: View,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Log buffer for the system-log strip
    pub log_buffer: LogBuffer,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Transient status-bar notice
    toast: Option<(String, Instant)>,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer) -> Self {
        let mut animator = Animator::new(config.animation);

        // Seed every display slot so the panel shows zeros before the
        // first recomputation
        for metric in Metric::ALL {
            animator.set_immediate(metric, 0.0, metric.decimals());
        }

        Self {
            input: "0".to_string(),
            store: DataStore::default(),
            hydrated: false,
            animator,
            debouncer: Debouncer::new(config.debounce),
            view: View::default(),
            should_quit: false,
            log_buffer,
            start_time: Instant::now(),
            toast: None,
        }
    }

    /// Append a typed character to the amount field.
    ///
    /// Sanitization and echo happen synchronously with the keystroke;
    /// recomputation is deferred through the debouncer.
    pub fn push_input(&mut self, c: char, now: Instant) {
        let raw = format!("{}{}", self.input, c);
        self.set_input(&raw, now);
    }

    /// Delete the last digit
    pub fn pop_input(&mut self, now: Instant) {
        let mut raw = self.input.clone();
        raw.pop();
        self.set_input(&raw, now);
    }

    /// Reset the field to zero
    pub fn clear_input(&mut self, now: Instant) {
        self.set_input("", now);
    }

    fn set_input(&mut self, raw: &str, now: Instant) {
        self.input = sanitize::canonical(raw);
        self.debouncer.submit(sanitize::amount(&self.input), now);
    }

    /// Thousand-separated text for the input field
    pub fn input_echo(&self) -> String {
        sanitize::echo(&self.input)
    }

    /// Install the loaded reference data (one-time hydration)
    pub fn hydrate(&mut self, store: DataStore) {
        self.store = store;
        self.hydrated = true;
    }

    /// Advance time-driven state: debounced recomputation, animations,
    /// toast expiry
    pub fn tick(&mut self, now: Instant) {
        if let Some(amount) = self.debouncer.poll(now) {
            self.recompute(amount, now);
        }

        self.animator.tick(now);

        if let Some((_, shown)) = self.toast {
            if now.duration_since(shown) >= TOAST_DURATION {
                self.toast = None;
            }
        }
    }

    /// Run every metric against the amount and hand the results to the
    /// animator
    fn recompute(&mut self, amount: f64, now: Instant) {
        tracing::debug!("Recomputing metrics for amount {}", amount);
        for update in metrics::compute_all(amount, &self.store) {
            self.animator
                .set_target(update.metric, update.value, update.metric.decimals(), now);
        }
    }

    /// Show a transient notice in the status bar
    pub fn show_toast(&mut self, message: impl Into<String>, now: Instant) {
        self.toast = Some((message.into(), now));
    }

    /// Current toast text, if one is active
    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|(message, _)| message.as_str())
    }

    /// Plain-text summary of the current display, for the clipboard
    pub fn summary(&self) -> String {
        let mut out = format!("MoneyLens: {}\n", self.input_echo());
        for metric in Metric::ALL {
            if let Some((value, decimals)) = self.animator.display(metric) {
                out.push_str(&format!(
                    "  {}: {} {}\n",
                    metric.label(),
                    format_number(value, decimals, decimals),
                    metric.unit()
                ));
            }
        }
        out
    }

    /// Uptime as hh:mm:ss for the status bar
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&Config::default(), LogBuffer::new())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_typing_sanitizes_and_echoes() {
        let t0 = Instant::now();
        let mut app = app();

        // Field starts at "0"; typing replaces the leading zero
        app.push_input('1', t0);
        app.push_input('2', t0 + ms(50));
        app.push_input('3', t0 + ms(100));
        app.push_input('4', t0 + ms(150));

        assert_eq!(app.input, "1234");
        assert_eq!(app.input_echo(), "1,234");
    }

    #[test]
    fn test_burst_of_keystrokes_recomputes_once_with_last_value() {
        let t0 = Instant::now();
        let mut app = app();
        app.hydrate(DataStore::sample());

        app.push_input('6', t0);
        app.push_input('0', t0 + ms(100));

        // Still inside the quiet window: no recomputation yet
        app.tick(t0 + ms(200));
        assert_eq!(app.animator.displayed(Metric::UnitCount), Some(0.0));

        // Quiet period elapsed: the final value (60) is computed, and the
        // animation heads toward 60 / 4.5 cups
        app.tick(t0 + ms(100) + Duration::from_millis(300));
        app.tick(t0 + ms(100) + Duration::from_millis(300) + ms(600));
        let cups = app.animator.displayed(Metric::UnitCount).unwrap();
        assert!((cups - 60.0 / 4.5).abs() < 1e-9, "got {cups}");
    }

    #[test]
    fn test_backspace_on_empty_field_reads_zero() {
        let t0 = Instant::now();
        let mut app = app();

        app.pop_input(t0);
        assert_eq!(app.input, "0");
        assert_eq!(app.input_echo(), "0");
    }

    #[test]
    fn test_unhydrated_store_animates_non_finite_targets() {
        let t0 = Instant::now();
        let mut app = app();

        app.push_input('5', t0);
        app.tick(t0 + ms(300));
        app.tick(t0 + ms(1000));

        // No reference data: the formulas degrade to NaN, the display
        // carries it, and input handling keeps working
        assert!(app.animator.displayed(Metric::GoldWeight).unwrap().is_nan());
        app.push_input('7', t0 + ms(1100));
        assert_eq!(app.input, "57");
    }

    #[test]
    fn test_toast_expires_after_interval() {
        let t0 = Instant::now();
        let mut app = app();

        app.show_toast("copied", t0);
        assert_eq!(app.toast(), Some("copied"));

        app.tick(t0 + ms(1999));
        assert!(app.toast().is_some());
        app.tick(t0 + ms(2001));
        assert!(app.toast().is_none());
    }

    #[test]
    fn test_summary_lists_every_metric() {
        let app = app();
        let summary = app.summary();
        for metric in Metric::ALL {
            assert!(summary.contains(metric.label()), "missing {metric:?}");
        }
    }
}
