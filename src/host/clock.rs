//! Wall clock with a minute tick service.

use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use watchface_common::platform::{Clock, Timestamp};

#[derive(Debug)]
pub struct SystemClock {
    offset: UtcOffset,
    tick_subscribed: bool,
    last_minute: Option<PrimitiveDateTime>,
}

impl SystemClock {
    /// Resolve the local offset once. Falls back to UTC when the platform
    /// cannot report it.
    pub fn new() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|err| {
            log::warn!("local offset unavailable ({err}), using UTC");
            UtcOffset::UTC
        });
        Self::with_offset(offset)
    }

    pub const fn with_offset(offset: UtcOffset) -> Self {
        Self {
            offset,
            tick_subscribed: false,
            last_minute: None,
        }
    }

    /// True once per wall-clock minute change while subscribed.
    pub fn poll_tick(&mut self) -> bool { self.poll_tick_at(self.local_now()) }

    fn poll_tick_at(
        &mut self,
        now: PrimitiveDateTime,
    ) -> bool {
        if !self.tick_subscribed {
            return false;
        }
        let minute = truncate_to_minute(now);
        if self.last_minute == Some(minute) {
            return false;
        }
        self.last_minute = Some(minute);
        true
    }

    fn now_offset(&self) -> OffsetDateTime { OffsetDateTime::now_utc().to_offset(self.offset) }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn local_now(&self) -> PrimitiveDateTime {
        let now = self.now_offset();
        PrimitiveDateTime::new(now.date(), now.time())
    }

    fn now(&self) -> Timestamp { OffsetDateTime::now_utc().unix_timestamp() }

    fn start_of_today(&self) -> Timestamp { self.now_offset().replace_time(Time::MIDNIGHT).unix_timestamp() }

    fn subscribe_minute_tick(&mut self) {
        self.tick_subscribed = true;
        // The subscriber has just rendered the current minute.
        self.last_minute = Some(truncate_to_minute(self.local_now()));
    }

    fn unsubscribe_tick(&mut self) {
        self.tick_subscribed = false;
        self.last_minute = None;
    }
}

fn truncate_to_minute(now: PrimitiveDateTime) -> PrimitiveDateTime {
    now.replace_second(0)
        .and_then(|t| t.replace_nanosecond(0))
        .unwrap_or(now)
}
