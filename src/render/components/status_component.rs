use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::render::{FontFace, PaperColor, TextRenderer};

/// 满电电压
const FULL_VOLTAGE: f32 = 4.2;
/// 电压文字只显示一位整数
const MAX_SHOWN_VOLTAGE: f32 = 9.9;
const BODY: Size = Size::new(20, 10);
const FILL_WIDTH: u32 = 16;

/// 电池图标，左侧为电压文字
pub struct Battery {
    pub voltage: f32,
    /// 电池外框左上角
    pub position: Point,
}

impl Battery {
    /// 电量百分比，0~100
    pub fn percent(&self) -> u32 {
        (self.voltage * 100.0 / FULL_VOLTAGE).clamp(0.0, 100.0) as u32
    }

    pub fn fill_width(&self) -> u32 {
        FILL_WIDTH * self.percent() / 100
    }

    /// 电压文字，如“3.7V”，超出范围时取边界值
    pub fn voltage_text(&self) -> heapless::String<8> {
        let voltage = if self.voltage.is_nan() {
            0.0
        } else {
            self.voltage.clamp(0.0, MAX_SHOWN_VOLTAGE)
        };
        let mut text = heapless::String::new();
        let _ = write!(text, "{:.1}V", voltage);
        text
    }
}

impl Drawable for Battery {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        TextRenderer::new(FontFace::Small, self.position).draw_text_right(
            target,
            &self.voltage_text(),
            self.position.x - 4,
        )?;

        let body = Rectangle::new(self.position, BODY);
        body.into_styled(PrimitiveStyle::with_fill(PaperColor::White))
            .draw(target)?;
        body.into_styled(PrimitiveStyle::with_stroke(PaperColor::Black, 1))
            .draw(target)?;
        // 正极
        Rectangle::new(self.position + Point::new(20, 4), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(PaperColor::Black))
            .draw(target)?;
        Rectangle::new(self.position + Point::new(2, 2), Size::new(self.fill_width(), 6))
            .into_styled(PrimitiveStyle::with_fill(PaperColor::Black))
            .draw(target)
    }
}

/// 温度，如“25℃”
pub struct Temperature {
    pub celsius: i16,
    pub position: Point,
}

impl Drawable for Temperature {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut text: heapless::String<12> = heapless::String::new();
        let _ = write!(text, "{}℃", self.celsius);
        TextRenderer::new(FontFace::Label, self.position).draw_text(target, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayRotation, PagedFramebuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn fill_tracks_voltage() {
        let battery = |voltage| Battery {
            voltage,
            position: Point::zero(),
        };
        assert_eq!(battery(4.4).fill_width(), 16);
        assert_eq!(battery(2.2).fill_width(), 8);
        assert_eq!(battery(5.0).fill_width(), 16);
        assert_eq!(battery(-1.0).fill_width(), 0);
    }

    #[test]
    fn voltage_text_stays_in_range() {
        let text = |voltage| {
            Battery {
                voltage,
                position: Point::zero(),
            }
            .voltage_text()
        };
        assert_eq!(text(3.74).as_str(), "3.7V");
        assert_eq!(text(4.2).as_str(), "4.2V");
        assert_eq!(text(1e9).as_str(), "9.9V");
        assert_eq!(text(f32::INFINITY).as_str(), "9.9V");
        assert_eq!(text(-3.0).as_str(), "0.0V");
        assert_eq!(text(f32::NAN).as_str(), "0.0V");
    }

    #[test]
    fn battery_outline_and_fill() {
        let mut fb = PagedFramebuffer::new(64, 16, 16, DisplayRotation::Rotate0, false);
        fb.first_page();
        Battery {
            voltage: 2.2,
            position: Point::new(40, 2),
        }
        .draw(&mut fb)
        .unwrap();

        assert_eq!(fb.pixel(40, 2), Some(PaperColor::Black));
        assert_eq!(fb.pixel(61, 6), Some(PaperColor::Black));
        assert_eq!(fb.pixel(43, 5), Some(PaperColor::Black));
        assert_eq!(fb.pixel(52, 5), Some(PaperColor::White));
    }
}
