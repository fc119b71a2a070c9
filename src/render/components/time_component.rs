//! 数字时钟界面

use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{Line, PrimitiveStyle, Rectangle},
};
use log::warn;

use crate::{
    calendar::{LunarCalendar, TermCountdown, next_solar_term},
    common::{
        config::LayoutConfig,
        types::{DateTime, GuiData, LunarDate},
    },
    render::{
        FontFace, PaperColor, SevenSegment, TextRenderer,
        components::{
            date_component::{DateLine, WeekdayLabel},
            lunar_component::{LunarDateText, LunarYearText},
            status_component::{Battery, Temperature},
        },
    },
};

/// 时和分两组数码管，中间为冒号
pub struct DigitalTime {
    pub hour: u8,
    pub minute: u8,
    pub position: Point,
    pub scale: u32,
}

impl DigitalTime {
    fn digits(&self) -> SevenSegment {
        SevenSegment::new(self.scale, 2)
    }

    /// 冒号左边缘相对时数字左边缘的偏移
    fn colon_offset(&self) -> i32 {
        (self.digits().size().width + self.scale) as i32
    }

    pub fn size(&self) -> Size {
        let digits = self.digits().size();
        Size::new(
            2 * digits.width + 4 * self.scale,
            digits.height,
        )
    }
}

impl Drawable for DigitalTime {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let digits = self.digits();
        let c = self.scale as i32;
        digits.draw(target, self.hour as i32, self.position)?;

        let colon_x = self.position.x + self.colon_offset();
        let dot = Size::new(2 * self.scale, 2 * self.scale);
        for dot_y in [9 * c / 2 + 1, 27 * c / 2 + 3] {
            Rectangle::new(Point::new(colon_x, self.position.y + dot_y), dot)
                .into_styled(PrimitiveStyle::with_fill(PaperColor::Black))
                .draw(target)?;
        }

        let minute_x = colon_x + 3 * c;
        digits.draw(target, self.minute as i32, Point::new(minute_x, self.position.y))
    }
}

/// 节气倒计时：当天显示节气名，否则显示“离X / 还有N天”
pub struct TermCountdownText {
    pub countdown: TermCountdown,
    pub position: Point,
}

impl Drawable for TermCountdownText {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let name = self.countdown.term.name();
        let mut renderer = TextRenderer::new(FontFace::Label, self.position);
        if self.countdown.days == 0 {
            renderer.set_color(PaperColor::Red);
            return renderer.draw_text(target, name);
        }

        let mut text: heapless::String<24> = heapless::String::new();
        let _ = write!(text, "离{}", name);
        renderer.draw_text(target, &text)?;

        text.clear();
        let _ = write!(text, "还有{}天", self.countdown.days);
        renderer.move_to(self.position + Point::new(0, FontFace::Label.height() as i32 + 6));
        renderer.draw_text(target, &text)
    }
}

/// 数字时钟界面
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockView {
    pub now: DateTime,
    pub lunar: LunarDate,
    pub countdown: Option<TermCountdown>,
    pub voltage: f32,
    pub temperature: i16,
}

impl ClockView {
    pub fn build<L: LunarCalendar + ?Sized>(
        calendar: &L,
        now: &DateTime,
        lunar: &LunarDate,
        data: &GuiData,
    ) -> Self {
        let countdown = match next_solar_term(calendar, &now.date) {
            Ok(countdown) => Some(countdown),
            Err(e) => {
                warn!("No solar term after {:?}: {}", now.date, e);
                None
            }
        };

        Self {
            now: *now,
            lunar: *lunar,
            countdown,
            voltage: data.voltage,
            temperature: data.temperature,
        }
    }
}

impl Drawable for ClockView {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let header = LayoutConfig::CLOCK_HEADER;
        DateLine {
            date: self.now.date,
            position: header,
        }
        .draw(target)?;
        WeekdayLabel {
            date: self.now.date,
            position: Point::new(LayoutConfig::CLOCK_WEEKDAY_X, header.y),
        }
        .draw(target)?;

        Battery {
            voltage: self.voltage,
            position: LayoutConfig::BATTERY_POSITION,
        }
        .draw(target)?;
        Temperature {
            celsius: self.temperature,
            position: LayoutConfig::TEMPERATURE_POSITION,
        }
        .draw(target)?;

        let rule_y = LayoutConfig::CLOCK_RULE_Y;
        let right = LayoutConfig::DISPLAY_WIDTH as i32 - header.x;
        Line::new(Point::new(header.x, rule_y), Point::new(right, rule_y))
            .into_styled(PrimitiveStyle::with_stroke(PaperColor::Black, 1))
            .draw(target)?;

        DigitalTime {
            hour: self.now.hour,
            minute: self.now.minute,
            position: LayoutConfig::CLOCK_DIGITS,
            scale: LayoutConfig::CLOCK_SEGMENT_SCALE,
        }
        .draw(target)?;

        let region = LayoutConfig::CLOCK_LUNAR_REGION;
        let line_height = FontFace::Label.height() as i32 + 6;
        LunarDateText {
            lunar: self.lunar,
            position: region.top_left,
        }
        .draw(target)?;
        LunarYearText {
            lunar: self.lunar,
            position: region.top_left + Point::new(0, line_height),
            zodiac_color: PaperColor::Black,
        }
        .draw(target)?;

        if let Some(countdown) = self.countdown {
            TermCountdownText {
                countdown,
                position: region.top_left + Point::new(region.size.width as i32 / 2, 0),
            }
            .draw(target)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayRotation, PagedFramebuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn time_block_fits_the_display() {
        let time = DigitalTime {
            hour: 8,
            minute: 5,
            position: LayoutConfig::CLOCK_DIGITS,
            scale: LayoutConfig::CLOCK_SEGMENT_SCALE,
        };
        assert_eq!(time.size(), Size::new(360, 164));
        let right = LayoutConfig::CLOCK_DIGITS.x + time.size().width as i32;
        assert!(right <= LayoutConfig::DISPLAY_WIDTH as i32);
    }

    #[test]
    fn colon_dots_are_drawn() {
        let time = DigitalTime {
            hour: 12,
            minute: 34,
            position: Point::zero(),
            scale: 2,
        };
        let size = time.size();
        let mut fb = PagedFramebuffer::new(size.width, size.height, size.height, DisplayRotation::Rotate0, false);
        fb.first_page();
        time.draw(&mut fb).unwrap();

        // 数字宽 2*24-4=44，冒号从 44+2 开始，两个点分别在 y=10 和 y=30
        assert_eq!(fb.pixel(47, 11), Some(PaperColor::Black));
        assert_eq!(fb.pixel(47, 31), Some(PaperColor::Black));
        assert_eq!(fb.pixel(47, 20), Some(PaperColor::White));
    }
}
