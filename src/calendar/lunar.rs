//! 公历转农历
//!
//! 农历数据表覆盖1900年至2100年，每年一项：
//! - 第0~3位：闰月月份，0表示无闰月
//! - 第4~15位：第1~12月是否为大月（30天），第m月对应 `0x10000 >> m`
//! - 第16位：闰月是否为大月
//!
//! 公历1900年1月31日为农历1900年正月初一。

use jiff::civil::Date;

use crate::calendar::solar_term::{self, SolarTermIndex};
use crate::common::error::{AppError, Result};
use crate::common::types::{CalendarDate, LunarDate};

const FIRST_YEAR: i32 = 1900;
const LAST_YEAR: i32 = 2100;

#[rustfmt::skip]
static LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

/// 农历与节气计算接口
///
/// 绘制代码只依赖这个接口，方便替换为其他历法实现或测试替身。
pub trait LunarCalendar {
    /// 公历转农历
    fn solar_to_lunar(&self, date: &CalendarDate) -> Result<LunarDate>;

    /// 某年第 `index` 个节气所在的公历日
    fn solar_term_day(&self, year: u16, index: SolarTermIndex) -> Option<u8>;

    /// 公历某月天数
    fn days_in_month(&self, year: u16, month: u8) -> Result<u8> {
        CalendarDate::new(year, month, 1)?.days_in_month()
    }

    /// 公历某月1日是星期几（周日为0）
    fn first_weekday(&self, year: u16, month: u8) -> Result<u8> {
        Ok(CalendarDate::new(year, month, 1)?.weekday)
    }
}

/// 查表实现的中国农历
#[derive(Debug, Clone, Copy)]
pub struct ChineseCalendar {
    /// 节气日期所用时区偏移（秒）
    offset_seconds: i32,
}

impl ChineseCalendar {
    pub const fn new(offset_seconds: i32) -> Self {
        Self { offset_seconds }
    }
}

impl Default for ChineseCalendar {
    fn default() -> Self {
        Self::new(8 * 3600)
    }
}

fn info(year: i32) -> u32 {
    LUNAR_INFO[(year - FIRST_YEAR) as usize]
}

fn leap_month(year: i32) -> u8 {
    (info(year) & 0xF) as u8
}

fn leap_month_days(year: i32) -> i32 {
    match leap_month(year) {
        0 => 0,
        _ if info(year) & 0x10000 != 0 => 30,
        _ => 29,
    }
}

fn month_days(year: i32, month: u8) -> i32 {
    if info(year) & (0x10000 >> month) != 0 { 30 } else { 29 }
}

fn year_days(year: i32) -> i32 {
    let big_months = (1..=12).filter(|&m| month_days(year, m) == 30).count() as i32;
    29 * 12 + big_months + leap_month_days(year)
}

impl LunarCalendar for ChineseCalendar {
    fn solar_to_lunar(&self, date: &CalendarDate) -> Result<LunarDate> {
        let base = Date::constant(1900, 1, 31);
        let mut offset = base.until(date.to_civil()?)?.get_days();
        if offset < 0 {
            return Err(AppError::LunarOutOfRange(date.year as i32));
        }

        let mut year = FIRST_YEAR;
        loop {
            if year > LAST_YEAR {
                return Err(AppError::LunarOutOfRange(date.year as i32));
            }
            let days = year_days(year);
            if offset < days {
                break;
            }
            offset -= days;
            year += 1;
        }

        let leap = leap_month(year);
        let mut month = 1u8;
        let mut is_leap = false;
        loop {
            let days = if is_leap {
                leap_month_days(year)
            } else {
                month_days(year, month)
            };
            if offset < days {
                break;
            }
            offset -= days;
            // 闰月紧跟在同名月之后
            if month == leap && !is_leap {
                is_leap = true;
            } else {
                is_leap = false;
                month += 1;
            }
        }

        Ok(LunarDate {
            year,
            month,
            day: offset as u8 + 1,
            is_leap,
        })
    }

    fn solar_term_day(&self, year: u16, index: SolarTermIndex) -> Option<u8> {
        solar_term::solar_term_day(year as i32, index, self.offset_seconds)
    }
}

/// 到下一个节气的倒计时
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermCountdown {
    pub term: SolarTermIndex,
    /// 0表示今天就是该节气
    pub days: i32,
}

/// 求今天或之后最近的一个节气
pub fn next_solar_term<L: LunarCalendar + ?Sized>(
    calendar: &L,
    today: &CalendarDate,
) -> Result<TermCountdown> {
    let today_civil = today.to_civil()?;
    let mut year = today.year;
    let mut term = SolarTermIndex::for_date(today.month, 1);

    // 每个月两个节气，最多跨入下一年的小寒
    for _ in 0..=SolarTermIndex::COUNT {
        if let Some(day) = calendar.solar_term_day(year, term) {
            let term_date = CalendarDate::new(year, term.month(), day)?.to_civil()?;
            let days = today_civil.until(term_date)?.get_days();
            if days >= 0 {
                return Ok(TermCountdown { term, days });
            }
        }
        term = term.next();
        if term.index() == 0 {
            year += 1;
        }
    }

    Err(AppError::LunarOutOfRange(today.year as i32))
}
