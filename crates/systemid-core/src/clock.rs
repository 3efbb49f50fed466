//! Clock collaborator used to date a freshly initialized record.

use std::time::{SystemTime, UNIX_EPOCH};

use time::OffsetDateTime;

use crate::error::{Error, Result};

/// Source of the current UTC time.
pub trait Clock {
    fn now_utc(&self) -> Result<OffsetDateTime>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> Result<OffsetDateTime> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Clock(e.to_string()))?;
        let secs = i64::try_from(since_epoch.as_secs())
            .map_err(|_| Error::Clock("system time out of range".to_string()))?;
        OffsetDateTime::from_unix_timestamp(secs).map_err(|e| Error::Clock(e.to_string()))
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now_utc(&self) -> Result<OffsetDateTime> {
        Ok(self.0)
    }
}
