use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point},
};

use crate::{
    common::types::LunarDate,
    render::{FontFace, PaperColor, TextRenderer},
};

/// 农历日期，如“闰六月初一”
pub struct LunarDateText {
    pub lunar: LunarDate,
    pub position: Point,
}

impl Drawable for LunarDateText {
    type Color = PaperColor;

    type Output = Point;

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut text: heapless::String<24> = heapless::String::new();
        let _ = write!(
            text,
            "{}{}{}",
            self.lunar.leap_prefix(),
            self.lunar.get_month_name(),
            self.lunar.get_day_name()
        );
        let mut renderer = TextRenderer::new(FontFace::Label, self.position);
        renderer.draw_text(target, &text)?;
        Ok(renderer.position())
    }
}

/// 干支纪年和生肖，如“乙巳蛇年”
pub struct LunarYearText {
    pub lunar: LunarDate,
    pub position: Point,
    pub zodiac_color: PaperColor,
}

impl Drawable for LunarYearText {
    type Color = PaperColor;

    type Output = Point;

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut text: heapless::String<12> = heapless::String::new();
        let _ = write!(text, "{}{}", self.lunar.stem_name(), self.lunar.branch_name());

        let mut renderer = TextRenderer::new(FontFace::Label, self.position);
        renderer.draw_text(target, &text)?;
        renderer.set_color(self.zodiac_color);
        renderer.draw_text(target, self.lunar.zodiac_name())?;
        renderer.set_color(PaperColor::Black);
        renderer.draw_text(target, "年")?;
        Ok(renderer.position())
    }
}
