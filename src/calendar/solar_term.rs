//! 二十四节气
//!
//! 节气时刻由太阳视黄经求得（低精度级数，误差在分钟级），再换算到本地时区取日期。

use core::f64::consts::PI;

use crate::common::types::{DateTime, FestivalName};

const SOLAR_TERM_NAMES: [FestivalName; 24] = [
    FestivalName::new("小寒"),
    FestivalName::new("大寒"),
    FestivalName::new("立春"),
    FestivalName::new("雨水"),
    FestivalName::new("惊蛰"),
    FestivalName::new("春分"),
    FestivalName::new("清明"),
    FestivalName::new("谷雨"),
    FestivalName::new("立夏"),
    FestivalName::new("小满"),
    FestivalName::new("芒种"),
    FestivalName::new("夏至"),
    FestivalName::new("小暑"),
    FestivalName::new("大暑"),
    FestivalName::new("立秋"),
    FestivalName::new("处暑"),
    FestivalName::new("白露"),
    FestivalName::new("秋分"),
    FestivalName::new("寒露"),
    FestivalName::new("霜降"),
    FestivalName::new("立冬"),
    FestivalName::new("小雪"),
    FestivalName::new("大雪"),
    FestivalName::new("冬至"),
];

/// 清明同时也是节日，显示时带“节”字
const QINGMING_FESTIVAL: FestivalName = FestivalName::new("清明节");

/// 节气序号，0为小寒，23为冬至
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SolarTermIndex(u8);

impl SolarTermIndex {
    pub const COUNT: u8 = 24;
    pub const QINGMING: SolarTermIndex = SolarTermIndex(6);

    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// 某个公历日期可能对应的节气：每月两个，15日之前为前一个
    pub fn for_date(month: u8, day: u8) -> Self {
        let index = (month.clamp(1, 12) - 1) * 2 + u8::from(day >= 15);
        Self(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// 节气所在的公历月份
    pub const fn month(self) -> u8 {
        self.0 / 2 + 1
    }

    /// 下一个节气，冬至之后回到小寒
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % Self::COUNT)
    }

    pub fn name(self) -> &'static str {
        SOLAR_TERM_NAMES[self.0 as usize].as_str()
    }

    /// 日历格子上显示的名称
    pub fn label(self) -> FestivalName {
        if self == Self::QINGMING {
            QINGMING_FESTIVAL
        } else {
            SOLAR_TERM_NAMES[self.0 as usize]
        }
    }

    /// 对应的太阳视黄经（度）
    fn longitude(self) -> f64 {
        ((285 + 15 * self.0 as u32) % 360) as f64
    }
}

// 两个角度之差，归一化到 [-180, 180)
fn wrap_degrees(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}

/// 太阳视黄经（度）
fn apparent_solar_longitude(jd: f64) -> f64 {
    let t = (jd - 2_451_545.0) / 36_525.0;
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t) * PI / 180.0;
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t) * PI / 180.0;
    (l0 + c - 0.00569 - 0.00478 * omega.sin()).rem_euclid(360.0)
}

/// 公历日期0时（UT）的儒略日
fn julian_day(year: i32, month: u8, day: u8) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
}

/// 节气时刻（儒略日，UT）
fn solar_term_julian_day(year: i32, index: SolarTermIndex) -> f64 {
    let target = index.longitude();
    let guess_day = if index.0 % 2 == 0 { 6 } else { 21 };
    let mut jd = julian_day(year, index.month(), guess_day);
    for _ in 0..8 {
        let delta = wrap_degrees(target - apparent_solar_longitude(jd));
        jd += delta * 365.2422 / 360.0;
    }
    jd
}

/// 节气在本地时区（偏移秒数）落在该月的哪一天
pub fn solar_term_day(year: i32, index: SolarTermIndex, offset_seconds: i32) -> Option<u8> {
    let jd = solar_term_julian_day(year, index);
    let timestamp = ((jd - 2_440_587.5) * 86_400.0).round() as i64;
    match DateTime::from_timestamp(timestamp, offset_seconds) {
        Ok(local) if local.date.month == index.month() => Some(local.date.day),
        Ok(local) => {
            log::warn!(
                "Solar term {} of {} fell into month {}",
                index.name(),
                year,
                local.date.month
            );
            None
        }
        Err(e) => {
            log::warn!("Solar term {} of {} out of range: {}", index.name(), year, e);
            None
        }
    }
}
