//! 绕底边中点旋转的实心矩形，用于指针
//!
//! 角度以12点方向为0度，顺时针增加。

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{PrimitiveStyle, Triangle},
};

use crate::render::color::PaperColor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedRect {
    /// 底边中点
    pub pivot: Point,
    pub size: Size,
    pub angle_degrees: f32,
    pub color: PaperColor,
}

impl RotatedRect {
    pub fn new(pivot: Point, size: Size, angle_degrees: f32, color: PaperColor) -> Self {
        Self {
            pivot,
            size,
            angle_degrees,
            color,
        }
    }

    /// 旋转后的四个角：左上、右上、右下、左下（旋转前）
    pub fn corners(&self) -> [Point; 4] {
        let half_width = self.size.width as f32 / 2.0;
        let height = self.size.height as f32;
        let (sin, cos) = self.angle_degrees.to_radians().sin_cos();

        [
            (-half_width, -height),
            (half_width, -height),
            (half_width, 0.0),
            (-half_width, 0.0),
        ]
        .map(|(x, y)| {
            let rotated_x = x * cos - y * sin;
            let rotated_y = x * sin + y * cos;
            self.pivot + Point::new(rotated_x.round() as i32, rotated_y.round() as i32)
        })
    }
}

impl Drawable for RotatedRect {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let [p0, p1, p2, p3] = self.corners();
        let style = PrimitiveStyle::with_fill(self.color);
        Triangle::new(p0, p1, p2).into_styled(style).draw(target)?;
        Triangle::new(p0, p2, p3).into_styled(style).draw(target)
    }
}

/// 时针角度，随分钟连续移动
pub fn hour_hand_angle(hour: u8, minute: u8) -> f32 {
    ((hour % 12) as f32 + minute as f32 / 60.0) * 30.0
}

pub fn minute_hand_angle(minute: u8) -> f32 {
    minute as f32 * 6.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::{DisplayRotation, PagedFramebuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_degrees_points_up() {
        let rect = RotatedRect::new(Point::new(20, 30), Size::new(4, 10), 0.0, PaperColor::Black);
        assert_eq!(
            rect.corners(),
            [
                Point::new(18, 20),
                Point::new(22, 20),
                Point::new(22, 30),
                Point::new(18, 30)
            ]
        );
    }

    #[test]
    fn ninety_degrees_points_right() {
        let rect = RotatedRect::new(Point::new(20, 30), Size::new(4, 10), 90.0, PaperColor::Black);
        assert_eq!(
            rect.corners(),
            [
                Point::new(30, 28),
                Point::new(30, 32),
                Point::new(20, 32),
                Point::new(20, 28)
            ]
        );
    }

    #[test]
    fn filled_hand_covers_its_axis() {
        let mut fb = PagedFramebuffer::new(64, 64, 64, DisplayRotation::Rotate0, false);
        fb.first_page();
        RotatedRect::new(Point::new(32, 32), Size::new(4, 20), 90.0, PaperColor::Black)
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(45, 32), Some(PaperColor::Black));
        assert_eq!(fb.pixel(32, 20), Some(PaperColor::White));
        assert_eq!(fb.pixel(20, 32), Some(PaperColor::White));
    }

    #[test]
    fn hand_angles() {
        assert_eq!(hour_hand_angle(15, 30), 105.0);
        assert_eq!(hour_hand_angle(0, 0), 0.0);
        assert_eq!(minute_hand_angle(45), 270.0);
    }
}
