//! 法定节假日与调休表
//!
//! 每条记录压缩为16位：高4位为调休上班标志，随后4位为月份，低8位为日期。
//! 表只对编译（或配置）时指定的年份有效，查询本身不检查年份。

use std::borrow::Cow;

use serde::Deserialize;

use crate::common::error::AppError;

/// 放假或调休上班
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayKind {
    Rest,
    Workday,
}

impl HolidayKind {
    /// 日历格子上显示的标记
    pub fn marker(self) -> &'static str {
        match self {
            HolidayKind::Rest => "休",
            HolidayKind::Workday => "班",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayRecord(u16);

impl HolidayRecord {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn new(month: u8, day: u8, workday: bool) -> Self {
        let flag = if workday { 0x1000 } else { 0 };
        Self(flag | ((month as u16 & 0x0F) << 8) | day as u16)
    }

    pub const fn month(self) -> u8 {
        ((self.0 >> 8) & 0x0F) as u8
    }

    pub const fn day(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub const fn kind(self) -> HolidayKind {
        if (self.0 >> 12) & 0x0F > 0 {
            HolidayKind::Workday
        } else {
            HolidayKind::Rest
        }
    }
}

/// 内置表适用的年份
pub const BUILTIN_HOLIDAY_YEAR: u16 = 2025;

static BUILTIN_HOLIDAYS: [HolidayRecord; 34] = {
    const RAW: [u16; 34] = [
        0x0101, 0x111A, 0x011C, 0x011D, 0x011E, 0x011F, 0x0201, 0x0202, 0x0202, 0x0203, 0x0204,
        0x1208, 0x0404, 0x0405, 0x0406, 0x141B, 0x0501, 0x0502, 0x0503, 0x0504, 0x0505, 0x051F,
        0x0601, 0x0602, 0x191C, 0x0A01, 0x0A02, 0x0A03, 0x0A04, 0x0A05, 0x0A06, 0x0A07, 0x0A08,
        0x1A0B,
    ];
    let mut records = [HolidayRecord(0); 34];
    let mut i = 0;
    while i < RAW.len() {
        records[i] = HolidayRecord::from_raw(RAW[i]);
        i += 1;
    }
    records
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HolidayTableConfig")]
pub struct HolidayTable {
    year: u16,
    records: Cow<'static, [HolidayRecord]>,
}

impl HolidayTable {
    pub fn builtin() -> Self {
        Self {
            year: BUILTIN_HOLIDAY_YEAR,
            records: Cow::Borrowed(&BUILTIN_HOLIDAYS),
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按月日查找，第一条匹配的记录生效
    pub fn lookup(&self, month: u8, day: u8) -> Option<HolidayKind> {
        self.records
            .iter()
            .find(|r| r.month() == month && r.day() == day)
            .map(|r| r.kind())
    }

    /// 只有年份与表的年份一致时才查找
    pub fn lookup_in_year(&self, year: u16, month: u8, day: u8) -> Option<HolidayKind> {
        if year != self.year {
            return None;
        }
        self.lookup(month, day)
    }
}

impl Default for HolidayTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Deserialize)]
struct HolidayTableConfig {
    year: u16,
    days: Vec<HolidayDayConfig>,
}

#[derive(Deserialize)]
struct HolidayDayConfig {
    month: u8,
    day: u8,
    #[serde(default)]
    workday: bool,
}

impl TryFrom<HolidayTableConfig> for HolidayTable {
    type Error = AppError;

    fn try_from(config: HolidayTableConfig) -> Result<Self, Self::Error> {
        let records = config
            .days
            .iter()
            .map(|d| {
                if !(1..=12).contains(&d.month) || !(1..=31).contains(&d.day) {
                    return Err(AppError::ConfigError("holiday month/day out of range"));
                }
                Ok(HolidayRecord::new(d.month, d.day, d.workday))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            year: config.year,
            records: Cow::Owned(records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_year_is_rest_day() {
        let table = HolidayTable::builtin();
        assert_eq!(table.lookup(1, 1), Some(HolidayKind::Rest));
    }

    #[test]
    fn absent_date_is_not_found() {
        let table = HolidayTable::builtin();
        assert_eq!(table.lookup(3, 15), None);
    }

    #[test]
    fn workday_flag_is_decoded() {
        let table = HolidayTable::builtin();
        // 0x111A：1月26日调休上班
        assert_eq!(table.lookup(1, 26), Some(HolidayKind::Workday));
        assert_eq!(table.lookup(10, 11), Some(HolidayKind::Workday));
        assert_eq!(table.lookup(10, 8), Some(HolidayKind::Rest));
        assert_eq!(HolidayKind::Workday.marker(), "班");
    }

    #[test]
    fn raw_lookup_ignores_year() {
        let table = HolidayTable::builtin();
        assert_eq!(table.lookup(5, 1), Some(HolidayKind::Rest));
        assert_eq!(table.lookup_in_year(2025, 5, 1), Some(HolidayKind::Rest));
        assert_eq!(table.lookup_in_year(2026, 5, 1), None);
    }

    #[test]
    fn record_packing() {
        let record = HolidayRecord::new(9, 28, true);
        assert_eq!(record, HolidayRecord::from_raw(0x191C));
        assert_eq!((record.month(), record.day()), (9, 28));
    }
}
