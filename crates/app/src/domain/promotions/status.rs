//! Promotion schedule status.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::civil::DateTime;

use crate::domain::promotions::records::PromotionRecord;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Where a promotion sits in its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    /// Switched off, regardless of dates.
    Inactive,
    /// Active, but not started yet.
    Scheduled,
    /// Active and within its schedule.
    Active,
    /// Past its end.
    Expired,
}

impl PromotionStatus {
    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

impl Display for PromotionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Time left before a promotion ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRemaining {
    /// Past its end.
    Expired,
    /// Time left, split into whole units.
    Remaining {
        /// Whole days.
        days: i64,
        /// Hours past the whole days.
        hours: i64,
        /// Minutes past the whole hours.
        minutes: i64,
    },
}

impl Display for TimeRemaining {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Expired => f.write_str("Expired"),
            Self::Remaining {
                days,
                hours,
                minutes,
            } => write!(f, "{days}d {hours}h {minutes}m"),
        }
    }
}

impl PromotionRecord {
    /// Status as of `now`.
    #[must_use]
    pub fn status(&self, now: DateTime) -> PromotionStatus {
        if !self.is_active {
            PromotionStatus::Inactive
        } else if now < self.start_datetime {
            PromotionStatus::Scheduled
        } else if now > self.end_datetime {
            PromotionStatus::Expired
        } else {
            PromotionStatus::Active
        }
    }

    /// Share of the schedule that has elapsed, as a whole percentage.
    #[must_use]
    pub fn progress_percentage(&self, now: DateTime) -> u8 {
        if now < self.start_datetime {
            return 0;
        }

        if now > self.end_datetime {
            return 100;
        }

        let total = self.end_datetime.duration_since(self.start_datetime).as_millis();
        let elapsed = now.duration_since(self.start_datetime).as_millis();

        if total <= 0 {
            return 100;
        }

        let rounded = (elapsed * 100 + total / 2) / total;

        u8::try_from(rounded.clamp(0, 100)).unwrap_or(100)
    }

    /// Whole days since the promotion started. Zero before it starts.
    #[must_use]
    pub fn days_active(&self, now: DateTime) -> i64 {
        let seconds = now.duration_since(self.start_datetime).as_secs();

        (seconds / SECONDS_PER_DAY).max(0)
    }

    /// Time left until the end, as of `now`.
    #[must_use]
    pub fn time_remaining(&self, now: DateTime) -> TimeRemaining {
        if now > self.end_datetime {
            return TimeRemaining::Expired;
        }

        let seconds = self.end_datetime.duration_since(now).as_secs();

        TimeRemaining::Remaining {
            days: seconds / SECONDS_PER_DAY,
            hours: (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use crate::domain::promotions::{data::NewPromotion, records::PromotionId};

    use super::*;

    fn promotion() -> PromotionRecord {
        let mut promotion = NewPromotion::with_defaults("Sun care", date(2030, 6, 1).at(0, 0, 0, 0));

        promotion.end_datetime = date(2030, 6, 11).at(0, 0, 0, 0);

        promotion.into_record(PromotionId::new("1"), Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn status_follows_schedule() {
        let promotion = promotion();

        assert_eq!(
            promotion.status(date(2030, 5, 31).at(23, 0, 0, 0)),
            PromotionStatus::Scheduled
        );
        assert_eq!(
            promotion.status(date(2030, 6, 5).at(0, 0, 0, 0)),
            PromotionStatus::Active
        );
        assert_eq!(
            promotion.status(date(2030, 6, 12).at(0, 0, 0, 0)),
            PromotionStatus::Expired
        );
    }

    #[test]
    fn inactive_overrides_schedule() {
        let mut promotion = promotion();
        promotion.is_active = false;

        assert_eq!(
            promotion.status(date(2030, 6, 5).at(0, 0, 0, 0)),
            PromotionStatus::Inactive
        );
    }

    #[test]
    fn progress_is_clamped_and_rounded() {
        let promotion = promotion();

        assert_eq!(promotion.progress_percentage(date(2030, 1, 1).at(0, 0, 0, 0)), 0);
        assert_eq!(promotion.progress_percentage(date(2030, 6, 4).at(0, 0, 0, 0)), 30);
        assert_eq!(promotion.progress_percentage(date(2030, 6, 4).at(1, 0, 0, 0)), 30);
        assert_eq!(promotion.progress_percentage(date(2030, 6, 4).at(12, 0, 0, 0)), 35);
        assert_eq!(promotion.progress_percentage(date(2031, 1, 1).at(0, 0, 0, 0)), 100);
    }

    #[test]
    fn days_active_never_negative() {
        let promotion = promotion();

        assert_eq!(promotion.days_active(date(2030, 5, 1).at(0, 0, 0, 0)), 0);
        assert_eq!(promotion.days_active(date(2030, 6, 3).at(23, 59, 0, 0)), 2);
    }

    #[test]
    fn time_remaining_formats_days_hours_minutes() {
        let promotion = promotion();

        let remaining = promotion.time_remaining(date(2030, 6, 9).at(21, 30, 0, 0));

        assert_eq!(remaining.to_string(), "1d 2h 30m");
        assert_eq!(
            promotion.time_remaining(date(2030, 6, 11).at(0, 1, 0, 0)),
            TimeRemaining::Expired
        );
    }
}
