//! 文本渲染器，支持全角、半角字符混排
//!
//! 半角字符使用 embedded-graphics 自带的等宽字体，全角字符占两个半角宽度。
//! 没有全角字形数据时，全角字符绘制为空心方框。

use embedded_graphics::{
    Drawable,
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_6X12, FONT_9X15_BOLD},
    },
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::render::color::PaperColor;

/// 字号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// 电压、温度等小字
    Small,
    /// 农历、节日、星期
    Label,
    /// 日期数字
    Numeral,
}

impl FontFace {
    fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontFace::Small => &FONT_6X10,
            FontFace::Label => &FONT_6X12,
            FontFace::Numeral => &FONT_9X15_BOLD,
        }
    }

    /// 半角字符宽度
    pub fn half_width(self) -> u32 {
        let font = self.font();
        font.character_size.width + font.character_spacing
    }

    /// 全角字符宽度
    pub fn full_width(self) -> u32 {
        self.half_width() * 2
    }

    pub fn height(self) -> u32 {
        self.font().character_size.height
    }
}

// 文本渲染器
pub struct TextRenderer {
    face: FontFace,
    current_x: i32,
    current_y: i32,
    color: PaperColor,
    background: Option<PaperColor>,
}

impl TextRenderer {
    /// `position` 为文本左上角
    pub fn new(face: FontFace, position: Point) -> Self {
        Self {
            face,
            current_x: position.x,
            current_y: position.y,
            color: PaperColor::Black,
            background: None,
        }
    }

    pub fn with_color(mut self, color: PaperColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_background(mut self, background: PaperColor) -> Self {
        self.background = Some(background);
        self
    }

    pub fn set_color(&mut self, color: PaperColor) {
        self.color = color;
    }

    pub fn set_face(&mut self, face: FontFace) {
        self.face = face;
    }

    pub fn move_to(&mut self, position: Point) {
        self.current_x = position.x;
        self.current_y = position.y;
    }

    pub fn position(&self) -> Point {
        Point::new(self.current_x, self.current_y)
    }

    // 判断字符是否为半角字符
    pub fn is_half_width_char(c: char) -> bool {
        c.is_ascii() && !c.is_ascii_control()
    }

    pub fn calculate_text_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| {
                if Self::is_half_width_char(c) {
                    self.face.half_width()
                } else {
                    self.face.full_width()
                }
            })
            .sum()
    }

    /// 从当前位置绘制，光标停在文本末尾
    pub fn draw_text<D>(&mut self, display: &mut D, text: &str) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        let mut style = MonoTextStyle::new(self.face.font(), self.color);
        style.background_color = self.background;
        let height = self.face.height();

        for c in text.chars() {
            let position = self.position();
            if Self::is_half_width_char(c) {
                let mut buf = [0u8; 4];
                Text::with_baseline(c.encode_utf8(&mut buf), position, style, Baseline::Top)
                    .draw(display)?;
                self.current_x += self.face.half_width() as i32;
            } else {
                let width = self.face.full_width();
                if let Some(background) = self.background {
                    Rectangle::new(position, Size::new(width, height))
                        .into_styled(PrimitiveStyle::with_fill(background))
                        .draw(display)?;
                }
                Rectangle::new(position + Point::new(1, 1), Size::new(width - 2, height - 2))
                    .into_styled(PrimitiveStyle::with_stroke(self.color, 1))
                    .draw(display)?;
                self.current_x += width as i32;
            }
        }

        Ok(())
    }

    /// 以 `center_x` 为中心绘制
    pub fn draw_text_centered<D>(
        &mut self,
        display: &mut D,
        text: &str,
        center_x: i32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        self.current_x = center_x - self.calculate_text_width(text) as i32 / 2;
        self.draw_text(display, text)
    }

    /// 右对齐到 `right_x`
    pub fn draw_text_right<D>(
        &mut self,
        display: &mut D,
        text: &str,
        right_x: i32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        self.current_x = right_x - self.calculate_text_width(text) as i32;
        self.draw_text(display, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::{DisplayRotation, PagedFramebuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn mixed_width_metrics() {
        let renderer = TextRenderer::new(FontFace::Label, Point::zero());
        assert_eq!(renderer.calculate_text_width("12"), 12);
        assert_eq!(renderer.calculate_text_width("星期3"), 30);
    }

    #[test]
    fn cursor_advances_after_drawing() {
        let mut fb = PagedFramebuffer::new(64, 16, 16, DisplayRotation::Rotate0, true);
        fb.first_page();
        let mut renderer = TextRenderer::new(FontFace::Label, Point::new(2, 2)).with_color(PaperColor::Red);
        renderer.draw_text(&mut fb, "1年").unwrap();
        assert_eq!(renderer.position(), Point::new(2 + 6 + 12, 2));
        // 全角方框的左上角
        assert_eq!(fb.pixel(9, 3), Some(PaperColor::Red));
    }

    #[test]
    fn right_aligned_text_ends_at_edge() {
        let mut fb = PagedFramebuffer::new(64, 16, 16, DisplayRotation::Rotate0, false);
        fb.first_page();
        let mut renderer = TextRenderer::new(FontFace::Small, Point::new(0, 0));
        renderer.draw_text_right(&mut fb, "3.7V", 60).unwrap();
        assert_eq!(renderer.position().x, 60);
    }
}
