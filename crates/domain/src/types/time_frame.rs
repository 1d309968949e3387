//! Time frame of an event within its day.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{CalendarError, Result};

/// The portion of a day an event occupies: either the whole day, or a
/// strictly ordered start/end time pair.
///
/// Construction is validated; an invalid time frame can never be stored on
/// an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFrame {
    /// The event occupies the entire day.
    AllDay,
    /// The event occupies a bounded slice of the day.
    Timed {
        /// Start time, strictly before `end`.
        start: NaiveTime,
        /// End time.
        end: NaiveTime,
    },
}

impl TimeFrame {
    /// Create a timed frame. Fails unless `start < end` strictly.
    pub fn timed(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(CalendarError::InvalidTimeFrame(format!(
                "start time {start} must be strictly before end time {end}"
            )));
        }

        Ok(Self::Timed { start, end })
    }

    /// Create a frame from optional start/end times.
    ///
    /// Both absent yields an all-day frame; supplying exactly one of the two
    /// is an error.
    pub fn from_times(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Result<Self> {
        match (start, end) {
            (None, None) => Ok(Self::AllDay),
            (Some(start), Some(end)) => Self::timed(start, end),
            (Some(_), None) | (None, Some(_)) => Err(CalendarError::InvalidTimeFrame(
                "start and end time must be supplied together or not at all".to_string(),
            )),
        }
    }

    /// Whether this frame spans the whole day.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay)
    }

    /// Start time, if the frame is timed.
    pub fn start_time(&self) -> Option<NaiveTime> {
        match self {
            Self::AllDay => None,
            Self::Timed { start, .. } => Some(*start),
        }
    }

    /// End time, if the frame is timed.
    pub fn end_time(&self) -> Option<NaiveTime> {
        match self {
            Self::AllDay => None,
            Self::Timed { end, .. } => Some(*end),
        }
    }
}

impl Default for TimeFrame {
    fn default() -> Self {
        Self::AllDay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_timed_frame_requires_start_before_end() {
        let frame = TimeFrame::timed(time(9, 0), time(17, 0)).unwrap();
        assert!(!frame.is_all_day());
        assert_eq!(frame.start_time(), Some(time(9, 0)));
        assert_eq!(frame.end_time(), Some(time(17, 0)));
    }

    #[test]
    fn test_inverted_times_rejected() {
        assert!(TimeFrame::timed(time(17, 0), time(9, 0)).is_err());
    }

    #[test]
    fn test_equal_times_rejected() {
        assert!(TimeFrame::timed(time(12, 0), time(12, 0)).is_err());
    }

    #[test]
    fn test_both_absent_is_all_day() {
        let frame = TimeFrame::from_times(None, None).unwrap();
        assert!(frame.is_all_day());
        assert_eq!(frame.start_time(), None);
        assert_eq!(frame.end_time(), None);
    }

    #[test]
    fn test_half_specified_rejected() {
        assert!(TimeFrame::from_times(Some(time(9, 0)), None).is_err());
        assert!(TimeFrame::from_times(None, Some(time(17, 0))).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        for frame in [TimeFrame::AllDay, TimeFrame::timed(time(8, 30), time(10, 0)).unwrap()] {
            let json = serde_json::to_string(&frame).unwrap();
            let back: TimeFrame = serde_json::from_str(&json).unwrap();
            assert_eq!(frame, back);
        }
    }
}
