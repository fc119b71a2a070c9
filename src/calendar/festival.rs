//! 节日与节气标注
//!
//! 每天最多显示一个标注，按以下顺序取第一个命中的：
//! 农历节日、除夕（腊月廿九且次日为正月初一）、按星期计算的节日、公历节日、节气。

use log::debug;

use crate::calendar::lunar::LunarCalendar;
use crate::calendar::solar_term::SolarTermIndex;
use crate::common::types::{CalendarDate, FestivalName, LunarDate};

/// 公历固定日期节日
#[derive(Debug, Clone, Copy)]
pub struct FixedFestival {
    pub month: u8,
    pub day: u8,
    pub name: FestivalName,
}

impl FixedFestival {
    const fn new(month: u8, day: u8, name: &'static str) -> Self {
        Self {
            month,
            day,
            name: FestivalName::new(name),
        }
    }
}

/// 农历固定日期节日
#[derive(Debug, Clone, Copy)]
pub struct LunarFestival {
    pub month: u8,
    pub day: u8,
    pub name: FestivalName,
}

impl LunarFestival {
    const fn new(month: u8, day: u8, name: &'static str) -> Self {
        Self {
            month,
            day,
            name: FestivalName::new(name),
        }
    }
}

/// 某月第几个星期几的节日，用日期区间表示
#[derive(Debug, Clone, Copy)]
pub struct FloatingFestival {
    pub month: u8,
    pub weekday: u8,
    pub first_day: u8,
    pub last_day: u8,
    pub name: FestivalName,
}

impl FloatingFestival {
    const fn new(month: u8, weekday: u8, first_day: u8, name: &'static str) -> Self {
        Self {
            month,
            weekday,
            first_day,
            last_day: first_day + 6,
            name: FestivalName::new(name),
        }
    }

    fn matches(&self, date: &CalendarDate) -> bool {
        date.month == self.month
            && date.weekday == self.weekday
            && (self.first_day..=self.last_day).contains(&date.day)
    }
}

pub static SOLAR_FESTIVALS: [FixedFestival; 15] = [
    FixedFestival::new(1, 1, "元旦节"),
    FixedFestival::new(2, 14, "情人节"),
    FixedFestival::new(3, 8, "妇女节"),
    FixedFestival::new(3, 12, "植树节"),
    FixedFestival::new(4, 1, "愚人节"),
    FixedFestival::new(5, 1, "劳动节"),
    FixedFestival::new(5, 4, "青年节"),
    FixedFestival::new(6, 1, "儿童节"),
    FixedFestival::new(7, 1, "建党节"),
    FixedFestival::new(8, 1, "建军节"),
    FixedFestival::new(9, 10, "教师节"),
    FixedFestival::new(10, 1, "国庆节"),
    FixedFestival::new(11, 1, "万圣节"),
    FixedFestival::new(12, 24, "平安夜"),
    FixedFestival::new(12, 25, "圣诞节"),
];

pub static LUNAR_FESTIVALS: [LunarFestival; 11] = [
    LunarFestival::new(1, 1, "春节"),
    LunarFestival::new(1, 15, "元宵节"),
    LunarFestival::new(2, 2, "龙抬头"),
    LunarFestival::new(5, 5, "端午节"),
    LunarFestival::new(7, 7, "七夕节"),
    LunarFestival::new(7, 15, "中元节"),
    LunarFestival::new(8, 15, "中秋节"),
    LunarFestival::new(9, 9, "重阳节"),
    LunarFestival::new(10, 1, "寒衣节"),
    LunarFestival::new(12, 8, "腊八节"),
    LunarFestival::new(12, 30, "除夕"),
];

pub static FLOATING_FESTIVALS: [FloatingFestival; 3] = [
    // 五月第二个周日
    FloatingFestival::new(5, 0, 8, "母亲节"),
    // 六月第三个周日
    FloatingFestival::new(6, 0, 15, "父亲节"),
    // 十一月第四个周四
    FloatingFestival::new(11, 4, 22, "感恩节"),
];

const NEW_YEARS_EVE: FestivalName = FestivalName::new("除夕");

/// 某一天的标注
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    LunarFestival(FestivalName),
    /// 腊月只有29天时的除夕
    NewYearsEve,
    FloatingFestival(FestivalName),
    SolarFestival(FestivalName),
    SolarTerm(SolarTermIndex),
}

impl Annotation {
    pub fn label(&self) -> FestivalName {
        match self {
            Annotation::LunarFestival(name)
            | Annotation::FloatingFestival(name)
            | Annotation::SolarFestival(name) => *name,
            Annotation::NewYearsEve => NEW_YEARS_EVE,
            Annotation::SolarTerm(term) => term.label(),
        }
    }
}

fn is_short_new_years_eve<L: LunarCalendar + ?Sized>(
    calendar: &L,
    date: &CalendarDate,
    lunar: &LunarDate,
) -> bool {
    if lunar.month != 12 || lunar.day != 29 {
        return false;
    }
    let next = match date.next_day() {
        Ok(next) => next,
        Err(e) => {
            debug!("No day after {:?}: {}", date, e);
            return false;
        }
    };
    match calendar.solar_to_lunar(&next) {
        Ok(next_lunar) => next_lunar.month == 1 && next_lunar.day == 1,
        Err(e) => {
            debug!("Lunar conversion failed for {:?}: {}", next, e);
            false
        }
    }
}

/// 求某天的标注，没有则返回 `None`
pub fn resolve_annotation<L: LunarCalendar + ?Sized>(
    calendar: &L,
    date: &CalendarDate,
    lunar: &LunarDate,
) -> Option<Annotation> {
    // 只比较月日，闰月同样适用
    if let Some(festival) = LUNAR_FESTIVALS
        .iter()
        .find(|f| f.month == lunar.month && f.day == lunar.day)
    {
        return Some(Annotation::LunarFestival(festival.name));
    }

    if is_short_new_years_eve(calendar, date, lunar) {
        return Some(Annotation::NewYearsEve);
    }

    if let Some(festival) = FLOATING_FESTIVALS.iter().find(|f| f.matches(date)) {
        return Some(Annotation::FloatingFestival(festival.name));
    }

    if let Some(festival) = SOLAR_FESTIVALS
        .iter()
        .find(|f| f.month == date.month && f.day == date.day)
    {
        return Some(Annotation::SolarFestival(festival.name));
    }

    let term = SolarTermIndex::for_date(date.month, date.day);
    if calendar.solar_term_day(date.year, term) == Some(date.day) {
        return Some(Annotation::SolarTerm(term));
    }

    None
}

/// 日历格子里的小字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Annotation(Annotation),
    /// 初一显示月份名
    LunarMonth(&'static str),
    LunarDay(&'static str),
}

impl DayLabel {
    pub fn resolve<L: LunarCalendar + ?Sized>(
        calendar: &L,
        date: &CalendarDate,
        lunar: &LunarDate,
    ) -> Self {
        match resolve_annotation(calendar, date, lunar) {
            Some(annotation) => DayLabel::Annotation(annotation),
            None if lunar.day == 1 => DayLabel::LunarMonth(lunar.get_month_name()),
            None => DayLabel::LunarDay(lunar.get_day_name()),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            DayLabel::Annotation(annotation) => annotation.label().as_str(),
            DayLabel::LunarMonth(text) | DayLabel::LunarDay(text) => text,
        }
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self, DayLabel::Annotation(_))
    }
}
