//! Keyboard-driven health service.
//!
//! Step counts are changed from the simulator keys; each change returns the
//! event a subscribed watchface should receive.

use watchface_common::platform::{
    AccessibilityMask,
    HealthEvent,
    HealthMetric,
    HealthService,
    HealthValue,
    PlatformError,
    TimeScope,
    Timestamp,
};

use crate::config::{AVERAGE_PRESETS, DEFAULT_AVERAGE_PRESET};

#[derive(Debug)]
pub struct SimHealth {
    today: HealthValue,
    average_preset: usize,
    step_access: bool,
    reject_subscription: bool,
    subscribed: bool,
}

impl SimHealth {
    pub const fn new() -> Self {
        Self {
            today: 0,
            average_preset: DEFAULT_AVERAGE_PRESET,
            step_access: true,
            reject_subscription: false,
            subscribed: false,
        }
    }

    /// Make the next `subscribe` call fail.
    pub const fn with_rejected_subscription(mut self) -> Self {
        self.reject_subscription = true;
        self
    }

    pub const fn today(&self) -> HealthValue { self.today }

    pub const fn average(&self) -> HealthValue { AVERAGE_PRESETS[self.average_preset] }

    pub const fn step_access(&self) -> bool { self.step_access }

    /// Walk `steps` more steps.
    pub fn add_steps(
        &mut self,
        steps: HealthValue,
        event: HealthEvent,
    ) -> Option<HealthEvent> {
        self.today = self.today.saturating_add(steps);
        self.notify(event)
    }

    /// Midnight rollover of the day's count.
    pub fn reset_steps(&mut self) -> Option<HealthEvent> {
        self.today = 0;
        self.notify(HealthEvent::SignificantUpdate)
    }

    /// Switch to the next average preset, wrapping around.
    pub fn cycle_average(&mut self) -> Option<HealthEvent> {
        self.average_preset = (self.average_preset + 1) % AVERAGE_PRESETS.len();
        self.notify(HealthEvent::SignificantUpdate)
    }

    /// Grant or revoke step data permission.
    pub fn toggle_access(&mut self) -> Option<HealthEvent> {
        self.step_access = !self.step_access;
        self.notify(HealthEvent::SignificantUpdate)
    }

    const fn notify(
        &self,
        event: HealthEvent,
    ) -> Option<HealthEvent> {
        if self.subscribed { Some(event) } else { None }
    }

    const fn mask(&self) -> AccessibilityMask {
        if self.step_access {
            AccessibilityMask::AVAILABLE
        } else {
            AccessibilityMask::NO_PERMISSION
        }
    }
}

impl Default for SimHealth {
    fn default() -> Self { Self::new() }
}

impl HealthService for SimHealth {
    fn metric_accessible(
        &self,
        _metric: HealthMetric,
        _start: Timestamp,
        _end: Timestamp,
    ) -> AccessibilityMask {
        self.mask()
    }

    fn metric_averaged_accessible(
        &self,
        _metric: HealthMetric,
        _start: Timestamp,
        _end: Timestamp,
        _scope: TimeScope,
    ) -> AccessibilityMask {
        if self.step_access && self.average() == 0 {
            return AccessibilityMask::NOT_AVAILABLE;
        }
        self.mask()
    }

    fn sum_today(
        &self,
        _metric: HealthMetric,
    ) -> HealthValue {
        self.today
    }

    fn sum_averaged(
        &self,
        _metric: HealthMetric,
        _start: Timestamp,
        _end: Timestamp,
        _scope: TimeScope,
    ) -> HealthValue {
        self.average()
    }

    fn subscribe(&mut self) -> Result<(), PlatformError> {
        if self.reject_subscription {
            return Err(PlatformError::SubscriptionRejected);
        }
        self.subscribed = true;
        Ok(())
    }

    fn unsubscribe(&mut self) { self.subscribed = false; }
}
