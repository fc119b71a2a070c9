use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point},
};

use crate::{
    common::types::CalendarDate,
    render::{FontFace, PaperColor, TextRenderer},
};

// 汉字字体比数字字体矮，下移使底部对齐
const LABEL_OFFSET: Point = Point::new(0, 3);

/// 公历日期：数字红色，“年月日”黑色
pub struct DateLine {
    pub date: CalendarDate,
    pub position: Point,
}

impl Drawable for DateLine {
    type Color = PaperColor;

    /// 日期末尾的位置
    type Output = Point;

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut number: heapless::String<8> = heapless::String::new();
        let mut renderer = TextRenderer::new(FontFace::Label, self.position + LABEL_OFFSET)
            .with_color(PaperColor::Red);

        let _ = write!(number, "{}", self.date.year);
        renderer.draw_text(target, &number)?;
        renderer.set_color(PaperColor::Black);
        renderer.draw_text(target, "年")?;

        for (value, unit) in [(self.date.month, "月"), (self.date.day, "日 ")] {
            number.clear();
            let _ = write!(number, "{:02}", value);

            let x = renderer.position().x;
            renderer.set_face(FontFace::Numeral);
            renderer.set_color(PaperColor::Red);
            renderer.move_to(Point::new(x, self.position.y));
            renderer.draw_text(target, &number)?;

            let x = renderer.position().x;
            renderer.set_face(FontFace::Label);
            renderer.set_color(PaperColor::Black);
            renderer.move_to(Point::new(x, self.position.y) + LABEL_OFFSET);
            renderer.draw_text(target, unit)?;
        }

        Ok(Point::new(renderer.position().x, self.position.y))
    }
}

/// “星期X”
pub struct WeekdayLabel {
    pub date: CalendarDate,
    pub position: Point,
}

impl Drawable for WeekdayLabel {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut text: heapless::String<12> = heapless::String::new();
        let _ = write!(text, "星期{}", self.date.weekday_name());
        TextRenderer::new(FontFace::Label, self.position + LABEL_OFFSET).draw_text(target, &text)
    }
}
