// src/common/types.rs

use jiff::{
    Timestamp,
    civil::Date,
    tz::{Offset, TimeZone},
};

use crate::common::error::{AppError, Result};

/// 节日名称允许的最大字节数（三个汉字）
pub const FESTIVAL_NAME_MAX: usize = 9;

/// 有长度上限的静态名称
///
/// 长度在构造时检查，静态表中的超长名称会导致编译失败，运行时不做截断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedName<const N: usize>(&'static str);

impl<const N: usize> BoundedName<N> {
    pub const fn new(name: &'static str) -> Self {
        assert!(name.len() <= N, "name exceeds capacity");
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

pub type FestivalName = BoundedName<FESTIVAL_NAME_MAX>;

/// 公历日期，星期以周日为0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
}

impl CalendarDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        let date = Self::civil(year, month, day)?;
        Ok(Self::from_civil(date))
    }

    pub fn from_civil(date: Date) -> Self {
        Self {
            year: date.year() as u16,
            month: date.month() as u8,
            day: date.day() as u8,
            weekday: date.weekday().to_sunday_zero_offset() as u8,
        }
    }

    pub fn to_civil(&self) -> Result<Date> {
        Self::civil(self.year, self.month, self.day)
    }

    fn civil(year: u16, month: u8, day: u8) -> Result<Date> {
        let invalid = AppError::InvalidDate {
            year: year as i32,
            month,
            day,
        };
        let year = i16::try_from(year).map_err(|_| AppError::InvalidDate {
            year: year as i32,
            month,
            day,
        })?;
        Date::new(year, month as i8, day as i8).map_err(|_| invalid)
    }

    pub fn next_day(&self) -> Result<Self> {
        Ok(Self::from_civil(self.to_civil()?.tomorrow()?))
    }

    pub fn days_in_month(&self) -> Result<u8> {
        Ok(self.to_civil()?.days_in_month() as u8)
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday == 0 || self.weekday == 6
    }

    pub fn weekday_name(&self) -> &'static str {
        get_weekday_name(self.weekday)
    }
}

/// 本地时间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub date: CalendarDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// 将Unix时间戳按固定时区偏移（秒）转换为本地时间
    pub fn from_timestamp(timestamp: i64, offset_seconds: i32) -> Result<Self> {
        let offset = Offset::from_seconds(offset_seconds)?;
        let zoned = Timestamp::from_second(timestamp)?.to_zoned(TimeZone::fixed(offset));

        Ok(Self {
            date: CalendarDate::from_civil(zoned.date()),
            hour: zoned.hour() as u8,
            minute: zoned.minute() as u8,
            second: zoned.second() as u8,
        })
    }
}

pub fn get_weekday_name(weekday: u8) -> &'static str {
    const WEEK_NAMES: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];
    WEEK_NAMES[weekday as usize % 7]
}

/// 农历日期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub is_leap: bool,
}

const HEAVENLY_STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const EARTHLY_BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const ZODIAC_NAMES: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

impl LunarDate {
    pub fn get_month_name(&self) -> &'static str {
        const LUNAR_MONTH_NAMES: [&str; 12] = [
            "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月",
            "腊月",
        ];
        LUNAR_MONTH_NAMES[(self.month as usize + 11) % 12]
    }

    pub fn get_day_name(&self) -> &'static str {
        const LUNAR_DAY_NAMES: [&str; 30] = [
            "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一",
            "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二",
            "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
        ];
        LUNAR_DAY_NAMES[(self.day as usize + 29) % 30]
    }

    /// 闰月前缀
    pub fn leap_prefix(&self) -> &'static str {
        if self.is_leap { "闰" } else { "" }
    }

    // 干支纪年以公元4年（甲子）为起点
    fn cycle_index(&self) -> usize {
        (self.year - 4).rem_euclid(60) as usize
    }

    pub fn stem_name(&self) -> &'static str {
        HEAVENLY_STEMS[self.cycle_index() % 10]
    }

    pub fn branch_name(&self) -> &'static str {
        EARTHLY_BRANCHES[self.cycle_index() % 12]
    }

    pub fn zodiac_name(&self) -> &'static str {
        ZODIAC_NAMES[self.cycle_index() % 12]
    }
}

/// 显示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Calendar,
    Clock,
    AnalogClock,
}

impl TryFrom<u8> for DisplayMode {
    type Error = AppError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(DisplayMode::Calendar),
            1 => Ok(DisplayMode::Clock),
            2 => Ok(DisplayMode::AnalogClock),
            other => Err(AppError::UnknownMode(other)),
        }
    }
}

/// 一次绘制所需的全部输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuiData {
    /// Unix时间戳（秒）
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
    /// 屏幕是否支持红色
    pub bwr: bool,
    /// 电池电压（伏）
    pub voltage: f32,
    /// 温度（摄氏度）
    pub temperature: i16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn calendar_date_weekday_is_sunday_zero() {
        // 2025-05-11 是周日
        let date = CalendarDate::new(2025, 5, 11).unwrap();
        assert_eq!(date.weekday, 0);
        assert!(date.is_weekend());
        assert_eq!(date.weekday_name(), "日");
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(matches!(
            CalendarDate::new(2025, 2, 30),
            Err(AppError::InvalidDate { month: 2, day: 30, .. })
        ));
    }

    #[test]
    fn next_day_crosses_year() {
        let date = CalendarDate::new(2024, 12, 31).unwrap().next_day().unwrap();
        assert_eq!((date.year, date.month, date.day), (2025, 1, 1));
    }

    #[test]
    fn timestamp_uses_fixed_offset() {
        // 2025-01-01T00:00:00Z 在东八区是 08:00
        let dt = DateTime::from_timestamp(1_735_689_600, 8 * 3600).unwrap();
        assert_eq!((dt.date.year, dt.date.month, dt.date.day), (2025, 1, 1));
        assert_eq!((dt.hour, dt.minute, dt.second), (8, 0, 0));
        assert_eq!(dt.date.weekday, 3);
    }

    #[test]
    fn stem_branch_and_zodiac() {
        let lunar = LunarDate {
            year: 2025,
            month: 1,
            day: 1,
            is_leap: false,
        };
        assert_eq!(lunar.stem_name(), "乙");
        assert_eq!(lunar.branch_name(), "巳");
        assert_eq!(lunar.zodiac_name(), "蛇");
        assert_eq!(lunar.get_month_name(), "正月");
        assert_eq!(lunar.get_day_name(), "初一");
    }

    #[test]
    fn display_mode_from_raw() {
        assert_eq!(DisplayMode::try_from(2).unwrap(), DisplayMode::AnalogClock);
        assert!(matches!(
            DisplayMode::try_from(7),
            Err(AppError::UnknownMode(7))
        ));
    }

    #[test]
    fn festival_names_fit_three_characters() {
        assert_eq!(FestivalName::new("中秋节").as_str(), "中秋节");
    }

    #[test]
    #[should_panic]
    fn overlong_name_is_rejected() {
        let _ = FestivalName::new("一二三四");
    }
}
