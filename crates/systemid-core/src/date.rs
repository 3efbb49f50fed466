//! Build date stored as six separate calendar bytes.

use time::OffsetDateTime;

/// Encoded size of a [`BcdDate`].
pub const DATE_LEN: usize = 6;

/// Broken-down UTC timestamp: `YY MM DD hh mm ss`, one byte each.
///
/// The bytes hold plain binary values, not packed BCD nibbles. No calendar
/// validation is applied; whatever was captured is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BcdDate {
    /// Two-digit year, `year % 100`.
    pub year: u8,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl BcdDate {
    /// Capture the calendar fields of a UTC timestamp.
    pub fn from_datetime(dt: OffsetDateTime) -> Self {
        let dt = dt.to_offset(time::UtcOffset::UTC);
        BcdDate {
            year: dt.year().rem_euclid(100) as u8,
            month: u8::from(dt.month()),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
        }
    }

    pub fn to_bytes(self) -> [u8; DATE_LEN] {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ]
    }

    pub fn from_bytes(bytes: [u8; DATE_LEN]) -> Self {
        let [year, month, day, hour, minute, second] = bytes;
        BcdDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl std::fmt::Display for BcdDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}.{:02}.20{:02} {:02}:{:02}:{:02}",
            self.day, self.month, self.year, self.hour, self.minute, self.second
        )
    }
}
