//! Business Hours Model (营业时间)
//!
//! 餐厅 API 下发的每周营业时间结构。七天固定为七个字段，
//! 缺失的某天是类型上的 `None`，不会和解析失败混淆。

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::HoursError;

/// Day-of-week key, Sunday-indexed (0 = `sun`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Sun,
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
    ];

    /// 0..=6 → key, 其他值返回 None
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Today's key for any chrono date-like value
    pub fn of<T: Datelike>(date: &T) -> Self {
        // num_days_from_sunday is always 0..=6
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Sun => "sun",
            DayKey::Mon => "mon",
            DayKey::Tue => "tue",
            DayKey::Wed => "wed",
            DayKey::Thu => "thu",
            DayKey::Fri => "fri",
            DayKey::Sat => "sat",
        }
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 解析 `HH:MM` (24 小时制)，格式错误返回 None
///
/// `None` 表示该边界永远不满足比较，调用方据此回落到 Closed。
pub fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M").ok()
}

/// Wall-clock time of any chrono value, truncated to the minute
pub fn minute_of_day<T: Timelike>(time: &T) -> NaiveTime {
    // Timelike hour/minute are always in range
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(NaiveTime::MIN)
}

/// One day's declared hours
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    /// 当天休息
    #[serde(default)]
    pub closed: bool,
    /// Opening time `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<String>,
    /// Closing time `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<String>,
}

impl DayHours {
    pub fn open_between(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            closed: false,
            open: Some(open.into()),
            close: Some(close.into()),
        }
    }

    pub fn day_off() -> Self {
        Self {
            closed: true,
            open: None,
            close: None,
        }
    }

    pub fn open_time(&self) -> Option<NaiveTime> {
        self.open.as_deref().and_then(parse_hhmm)
    }

    pub fn close_time(&self) -> Option<NaiveTime> {
        self.close.as_deref().and_then(parse_hhmm)
    }
}

/// Weekly hours, one optional entry per day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mon: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tue: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wed: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thu: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fri: Option<DayHours>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<DayHours>,
}

impl WeeklyHours {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: DayKey) -> Option<&DayHours> {
        self.slot(day).as_ref()
    }

    pub fn set(&mut self, day: DayKey, hours: DayHours) {
        *self.slot_mut(day) = Some(hours);
    }

    pub fn with_day(mut self, day: DayKey, hours: DayHours) -> Self {
        self.set(day, hours);
        self
    }

    /// Every present day must be closed or carry both open and close
    pub fn validate(&self) -> Result<(), HoursError> {
        for day in DayKey::ALL {
            let Some(hours) = self.get(day) else {
                continue;
            };
            if hours.closed {
                continue;
            }
            let (Some(open), Some(close)) = (&hours.open, &hours.close) else {
                return Err(HoursError::MissingBoundary { day });
            };
            for value in [open, close] {
                if parse_hhmm(value).is_none() {
                    return Err(HoursError::MalformedTime {
                        day,
                        value: value.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn slot(&self, day: DayKey) -> &Option<DayHours> {
        match day {
            DayKey::Sun => &self.sun,
            DayKey::Mon => &self.mon,
            DayKey::Tue => &self.tue,
            DayKey::Wed => &self.wed,
            DayKey::Thu => &self.thu,
            DayKey::Fri => &self.fri,
            DayKey::Sat => &self.sat,
        }
    }

    fn slot_mut(&mut self, day: DayKey) -> &mut Option<DayHours> {
        match day {
            DayKey::Sun => &mut self.sun,
            DayKey::Mon => &mut self.mon,
            DayKey::Tue => &mut self.tue,
            DayKey::Wed => &mut self.wed,
            DayKey::Thu => &mut self.thu,
            DayKey::Fri => &mut self.fri,
            DayKey::Sat => &mut self.sat,
        }
    }
}

static BREAK_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}:\d{2})\s*[-~]\s*(\d{1,2}:\d{2})").unwrap());

/// Break window `[start, end)` embedded in free text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakTime {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BreakTime {
    /// 从自由文本中提取第一个 `HH:MM-HH:MM` / `HH:MM~HH:MM`
    ///
    /// e.g. "브레이크타임 15:00~17:00 (주말 제외)" → 15:00..17:00
    pub fn find(text: &str) -> Option<Self> {
        let caps = BREAK_TIME_RE.captures(text)?;
        Some(Self {
            start: parse_hhmm(&caps[1])?,
            end: parse_hhmm(&caps[2])?,
        })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }
}

impl fmt::Display for BreakTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_day_key_sunday_indexed() {
        assert_eq!(DayKey::from_index(0), Some(DayKey::Sun));
        assert_eq!(DayKey::from_index(6), Some(DayKey::Sat));
        assert_eq!(DayKey::from_index(7), None);

        // 2024-01-01 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(DayKey::of(&monday), DayKey::Mon);
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(DayKey::of(&sunday), DayKey::Sun);
    }

    fn hm(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("09:00"), Some(hm(9, 0)));
        assert_eq!(parse_hhmm("9:05"), Some(hm(9, 5)));
        assert_eq!(parse_hhmm(" 23:59 "), Some(hm(23, 59)));
        assert_eq!(parse_hhmm("00:00"), Some(NaiveTime::MIN));

        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("1200"), None);
        assert_eq!(parse_hhmm("ab:cd"), None);
        assert_eq!(parse_hhmm("-1:00"), None);
        assert_eq!(parse_hhmm("12:00:00"), None);
        assert_eq!(parse_hhmm(""), None);
    }

    #[test]
    fn test_minute_of_day_drops_seconds() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(20, 59, 59)
            .unwrap();
        assert_eq!(minute_of_day(&now), hm(20, 59));
        assert!(minute_of_day(&now) < parse_hhmm("21:00").unwrap());
    }

    #[test]
    fn test_break_time_find() {
        let bt = BreakTime::find("15:00-17:00").unwrap();
        assert_eq!(bt.start, hm(15, 0));
        assert_eq!(bt.end, hm(17, 0));

        let bt = BreakTime::find("평일 브레이크타임 14:30 ~ 16:00 (주말 없음)").unwrap();
        assert_eq!(bt.to_string(), "14:30-16:00");

        assert!(BreakTime::find("없음").is_none());
        assert!(BreakTime::find("15:00").is_none());
        // 匹配但越界
        assert!(BreakTime::find("15:00-25:00").is_none());
    }

    #[test]
    fn test_break_time_half_open() {
        let bt = BreakTime::find("15:00-17:00").unwrap();
        assert!(bt.contains(hm(15, 0)));
        assert!(bt.contains(hm(16, 59)));
        assert!(!bt.contains(hm(17, 0)));
        assert!(!bt.contains(hm(14, 59)));
    }

    #[test]
    fn test_weekly_hours_deserialize() {
        let json = r#"{
            "mon": { "open": "09:00", "close": "21:00" },
            "sun": { "closed": true }
        }"#;
        let hours: WeeklyHours = serde_json::from_str(json).unwrap();

        assert_eq!(
            hours.get(DayKey::Mon),
            Some(&DayHours::open_between("09:00", "21:00"))
        );
        assert!(hours.get(DayKey::Sun).unwrap().closed);
        assert!(hours.get(DayKey::Tue).is_none());
        assert!(hours.validate().is_ok());
    }

    #[test]
    fn test_weekly_hours_validate() {
        let missing = WeeklyHours::new().with_day(
            DayKey::Fri,
            DayHours {
                closed: false,
                open: Some("10:00".into()),
                close: None,
            },
        );
        assert!(matches!(
            missing.validate(),
            Err(HoursError::MissingBoundary { day: DayKey::Fri })
        ));

        let malformed =
            WeeklyHours::new().with_day(DayKey::Sat, DayHours::open_between("10:00", "2x:00"));
        assert!(matches!(
            malformed.validate(),
            Err(HoursError::MalformedTime { day: DayKey::Sat, .. })
        ));

        let day_off = WeeklyHours::new().with_day(DayKey::Wed, DayHours::day_off());
        assert!(day_off.validate().is_ok());
    }
}
