//! Diagnostics ring buffer.
//!
//! Every line is forwarded to the `log` facade and the most recent ones are
//! kept in memory so a host without a log sink (or a test) can still inspect
//! what the watchface reported.
//!
//! # Usage
//!
//! ```ignore
//! let mut diagnostics = DiagnosticsLog::new();
//! diagnostics.record(log::Level::Error, "Cannot subscribe to the health service");
//!
//! for entry in diagnostics.iter() {
//!     println!("{:?} {}", entry.level, entry.message);
//! }
//! ```

use heapless::{Deque, String};
use log::Level;

// =============================================================================
// Configuration
// =============================================================================

/// Maximum number of lines kept.
pub const DIAGNOSTICS_SIZE: usize = 6;

/// Maximum characters per line, longer messages are truncated.
pub const DIAGNOSTICS_LINE_LENGTH: usize = 80;

// =============================================================================
// Ring Buffer
// =============================================================================

/// One recorded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub level: Level,
    pub message: String<DIAGNOSTICS_LINE_LENGTH>,
}

/// Last `DIAGNOSTICS_SIZE` diagnostic lines, oldest dropped first.
pub struct DiagnosticsLog {
    buffer: Deque<DiagnosticEntry, DIAGNOSTICS_SIZE>,
}

impl DiagnosticsLog {
    pub const fn new() -> Self { Self { buffer: Deque::new() } }

    /// Log `msg` at `level` and keep it in the buffer.
    pub fn record(
        &mut self,
        level: Level,
        msg: &str,
    ) {
        log::log!(level, "{msg}");

        if self.buffer.is_full() {
            self.buffer.pop_front();
        }

        let mut message: String<DIAGNOSTICS_LINE_LENGTH> = String::new();
        for c in msg.chars() {
            if message.push(c).is_err() {
                break;
            }
        }

        self.buffer.push_back(DiagnosticEntry { level, message }).ok();
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEntry> { self.buffer.iter() }

    /// Most recent entry.
    pub fn last(&self) -> Option<&DiagnosticEntry> { self.buffer.back() }

    /// Whether any retained entry is at `level` or more severe.
    pub fn has_at_least(
        &self,
        level: Level,
    ) -> bool {
        self.buffer.iter().any(|entry| entry.level <= level)
    }

    #[inline]
    pub fn len(&self) -> usize { self.buffer.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }
}

impl Default for DiagnosticsLog {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Tests
// =============================================================================
