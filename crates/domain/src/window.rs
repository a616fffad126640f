use crate::errors::DomainError;
use chrono::{DateTime, TimeZone, Utc};

/// Half-open interval `[start, end)` in epoch seconds covered by one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: i64,
    pub end: i64,
}

impl Window {
    /// Window of `interval_secs` ending at `end`: `[end - interval + 1, end)`.
    pub fn ending_at(end: i64, interval_secs: u64) -> Result<Self, DomainError> {
        if interval_secs == 0 {
            return Err(DomainError::InvalidWindow(
                "interval must be positive".to_string(),
            ));
        }
        let interval = i64::try_from(interval_secs).map_err(|_| {
            DomainError::InvalidWindow(format!("interval {} out of range", interval_secs))
        })?;

        Ok(Self {
            start: end - interval + 1,
            end,
        })
    }

    pub fn ending_now(interval_secs: u64) -> Result<Self, DomainError> {
        Self::ending_at(Utc::now().timestamp(), interval_secs)
    }

    pub fn contains(&self, epoch_secs: i64) -> bool {
        epoch_secs >= self.start && epoch_secs < self.end
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.end, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
