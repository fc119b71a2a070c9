//! 指针时钟界面

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Circle, PrimitiveStyle},
};

use crate::{
    common::config::LayoutConfig,
    render::{
        FontFace, PaperColor, RotatedRect, TextRenderer, hour_hand_angle, minute_hand_angle,
    },
};

// 刻度点到表盘边缘的距离
const TICK_INSET: i32 = 10;
const TICK_DIAMETER: u32 = 5;
const HUB_DIAMETER: u32 = 9;
// 数字到表盘边缘的距离
const LABEL_INSET: i32 = 4;

/// 表盘、刻度和时分针
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogClock {
    pub hour: u8,
    pub minute: u8,
    pub center: Point,
    pub radius: u32,
}

impl AnalogClock {
    /// 整点 `hour` 处刻度点的中心
    pub fn tick_center(&self, hour: u8) -> Point {
        let r = (self.radius as i32 - TICK_INSET) as f32;
        let (sin, cos) = ((hour as f32 * 30.0 - 90.0).to_radians()).sin_cos();
        self.center + Point::new((r * cos).round() as i32, (r * sin).round() as i32)
    }

    fn draw_labels<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        let r = self.radius as i32;
        let Point { x: cx, y: cy } = self.center;
        let height = FontFace::Numeral.height() as i32;
        let middle_y = cy - height / 2;

        TextRenderer::new(FontFace::Numeral, Point::new(cx, cy - r + LABEL_INSET))
            .with_color(PaperColor::Red)
            .draw_text_centered(target, "12", cx)?;

        let mut renderer = TextRenderer::new(FontFace::Numeral, Point::new(cx, middle_y));
        renderer.draw_text_right(target, "3", cx + r - LABEL_INSET - 1)?;

        renderer.move_to(Point::new(cx, cy + r - LABEL_INSET - height));
        renderer.draw_text_centered(target, "6", cx)?;

        renderer.move_to(Point::new(cx - r + LABEL_INSET + 1, middle_y));
        renderer.draw_text(target, "9")
    }
}

impl Drawable for AnalogClock {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        Circle::with_center(self.center, 2 * self.radius + 1)
            .into_styled(PrimitiveStyle::with_stroke(PaperColor::Black, 1))
            .draw(target)?;

        self.draw_labels(target)?;

        for hour in (1..12u8).filter(|h| h % 3 != 0) {
            Circle::with_center(self.tick_center(hour), TICK_DIAMETER)
                .into_styled(PrimitiveStyle::with_fill(PaperColor::Black))
                .draw(target)?;
        }

        RotatedRect::new(
            self.center,
            LayoutConfig::HOUR_HAND,
            hour_hand_angle(self.hour, self.minute),
            PaperColor::Black,
        )
        .draw(target)?;
        RotatedRect::new(
            self.center,
            LayoutConfig::MINUTE_HAND,
            minute_hand_angle(self.minute),
            PaperColor::Black,
        )
        .draw(target)?;

        Circle::with_center(self.center, HUB_DIAMETER)
            .into_styled(PrimitiveStyle::with_fill(PaperColor::Black))
            .draw(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayRotation, PagedFramebuffer};
    use pretty_assertions::assert_eq;

    fn render(clock: &AnalogClock) -> PagedFramebuffer {
        let mut fb = PagedFramebuffer::new(160, 160, 160, DisplayRotation::Rotate0, true);
        fb.first_page();
        clock.draw(&mut fb).unwrap();
        fb
    }

    fn clock(hour: u8, minute: u8) -> AnalogClock {
        AnalogClock {
            hour,
            minute,
            center: Point::new(80, 80),
            radius: LayoutConfig::ANALOG_RADIUS,
        }
    }

    #[test]
    fn ticks_sit_inside_the_face() {
        let clock = clock(0, 0);
        assert_eq!(clock.tick_center(0), Point::new(80, 35));
        assert_eq!(clock.tick_center(6), Point::new(80, 125));

        let fb = render(&clock);
        // 2点方向的刻度点
        assert_eq!(fb.pixel(119, 58), Some(PaperColor::Black));
    }

    #[test]
    fn twelve_is_red() {
        let fb = render(&clock(6, 30));
        let red = (71..90)
            .flat_map(|x| (29..44).map(move |y| (x, y)))
            .filter(|&(x, y)| fb.pixel(x, y) == Some(PaperColor::Red))
            .count();
        assert!(red > 0);
    }

    #[test]
    fn hands_follow_the_time() {
        // 3:00 时针指向右方，分针指向上方
        let fb = render(&clock(3, 0));
        assert_eq!(fb.pixel(95, 80), Some(PaperColor::Black));
        assert_eq!(fb.pixel(80, 50), Some(PaperColor::Black));
        assert_eq!(fb.pixel(65, 80), Some(PaperColor::White));
        assert_eq!(fb.pixel(80, 110), Some(PaperColor::White));
    }

    #[test]
    fn face_outline_and_hub() {
        let fb = render(&clock(10, 10));
        assert_eq!(fb.pixel(80, 80), Some(PaperColor::Black));
        assert_eq!(fb.pixel(80 + 55, 80), Some(PaperColor::Black));
        assert_eq!(fb.pixel(80 - 55, 80), Some(PaperColor::Black));
    }
}
