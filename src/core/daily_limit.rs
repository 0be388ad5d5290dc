//! Per-player daily battle quota.
//!
//! The counter belongs to the calendar day of the last recorded battle (local
//! wall clock). Queries never mutate; only `record_battle` rolls the day over.

use super::errors::{GameError, GameResult};
use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyLimit {
    #[serde(default)]
    pub battles_today: u32,
    #[serde(default)]
    pub last_battle_at: Option<NaiveDateTime>,
}

impl DailyLimit {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the stored count belongs to an earlier day.
    fn is_stale(&self, now: NaiveDateTime) -> bool {
        match self.last_battle_at {
            Some(last) => last.date() != now.date(),
            None => true,
        }
    }

    /// Battles already fought on `now`'s calendar day.
    pub fn battles_used(&self, now: NaiveDateTime) -> u32 {
        if self.is_stale(now) {
            0
        } else {
            self.battles_today
        }
    }

    pub fn battles_remaining(&self, now: NaiveDateTime, quota: u32) -> u32 {
        quota.saturating_sub(self.battles_used(now))
    }

    pub fn can_battle(&self, now: NaiveDateTime, quota: u32) -> bool {
        self.battles_remaining(now, quota) > 0
    }

    /// Counts one battle against today's quota.
    ///
    /// Rolls the counter over first when the date changed since the last
    /// battle. Returns the battles still available afterwards.
    pub fn record_battle(&mut self, now: NaiveDateTime, quota: u32) -> GameResult<u32> {
        if self.is_stale(now) {
            self.battles_today = 0;
        }
        if self.battles_today >= quota {
            return Err(GameError::DailyLimitReached {
                resets_in_secs: time_until_reset(now).num_seconds(),
            });
        }
        self.battles_today += 1;
        self.last_battle_at = Some(now);
        Ok(quota - self.battles_today)
    }
}

/// Time left until the next local midnight.
pub fn time_until_reset(now: NaiveDateTime) -> Duration {
    let next_midnight = now
        .date()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0));
    match next_midnight {
        Some(midnight) => midnight - now,
        None => Duration::zero(),
    }
}
