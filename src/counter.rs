//! Character counter for the post editor

/// Counts from here up to [`EXCESSIVE_ABOVE`] are shown as a warning
pub const WARNING_FROM: usize = 5_000;
/// Counts strictly above this are shown as excessive
pub const EXCESSIVE_ABOVE: usize = 10_000;

/// Color band of the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Excessive,
}

impl CounterLevel {
    pub fn for_count(count: usize) -> Self {
        if count > EXCESSIVE_ABOVE {
            CounterLevel::Excessive
        } else if count >= WARNING_FROM {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        }
    }

    /// CSS color (Bootstrap success / warning / danger)
    pub fn color(self) -> &'static str {
        match self {
            CounterLevel::Normal => "#28a745",
            CounterLevel::Warning => "#ffc107",
            CounterLevel::Excessive => "#dc3545",
        }
    }
}

/// Snapshot of the editor content length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    pub count: usize,
    pub level: CounterLevel,
}

impl CharCount {
    /// Count Unicode scalar values, so a CJK character counts once
    pub fn of(text: &str) -> Self {
        let count = text.chars().count();
        Self {
            count,
            level: CounterLevel::for_count(count),
        }
    }
}
