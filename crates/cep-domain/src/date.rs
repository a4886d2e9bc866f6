//! Month/day tokens found in titles and folder names

use std::fmt;

/// A `month.day` pair, e.g. `9.29` in `2025.9.29 ...`
///
/// Absence of a token is modelled as `Option::None` by callers, which is
/// distinct from two tokens that disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateToken {
    /// Month (1-12)
    pub month: u8,
    /// Day (1-31)
    pub day: u8,
}

impl DateToken {
    /// Create a date token, rejecting out-of-range values
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self {
                month: month as u8,
                day: day as u8,
            })
        } else {
            None
        }
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.month, self.day)
    }
}
