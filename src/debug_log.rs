use std::collections::VecDeque;

/// Upper bound for [`DebugEventLog`] capacity, whatever the options say.
pub const MAX_DEBUG_EVENT_LOG_CAPACITY: usize = 10_000;

/// A small ring buffer of debug lines, meant to be shown in a debug panel and copy-pasted.
///
/// Disabled logs drop every line, so callers can record unconditionally.
#[derive(Clone, Debug, Default)]
pub struct DebugEventLog {
    enabled: bool,
    capacity: usize,
    frame: u64,
    lines: VecDeque<String>,
}

impl DebugEventLog {
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity: capacity.clamp(1, MAX_DEBUG_EVENT_LOG_CAPACITY),
            frame: 0,
            lines: VecDeque::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Advance the frame counter stamped on new lines.
    pub fn begin_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines
            .push_back(format!("[frame {}] {}", self.frame, message.into()));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_records_nothing() {
        let mut log = DebugEventLog::new(false, 10);
        log.push("ignored");
        assert!(log.text().is_empty());
    }

    #[test]
    fn ring_buffer_keeps_most_recent_lines() {
        let mut log = DebugEventLog::new(true, 2);
        log.push("a");
        log.begin_frame();
        log.push("b");
        log.push("c");
        assert_eq!(log.text(), "[frame 1] b\n[frame 1] c");
    }

    #[test]
    fn zero_capacity_is_clamped_to_one() {
        let mut log = DebugEventLog::new(true, 0);
        log.push("a");
        log.push("b");
        assert_eq!(log.lines().count(), 1);
    }
}
