//! 七段数码管样式的大号数字
//!
//! 每个数位宽 `11*c+2`，整体尺寸为 `n*(11*c+2)-2*c` × `20*c+4`，其中 `c` 为缩放系数。
//! 每段由 `2*c` 条逐渐变宽再变窄的线组成，熄灭的段用背景色绘制，
//! 因此可以直接覆盖旧内容而不用先清除。

use embedded_graphics::{
    prelude::{DrawTarget, Point, Size},
    primitives::Rectangle,
};
use heapless::Vec;

use crate::render::color::PaperColor;

pub const MAX_SLOTS: usize = 10;
const MAX_SCALE: u32 = 10;

/// 各数字点亮的段，第j位对应a~g中的第j段
const DIGIT_PATTERNS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];
const MINUS_PATTERN: u8 = 0x40;

/// 一个数位上显示的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Digit(u8),
    Minus,
    Blank,
}

impl Glyph {
    fn pattern(self) -> u8 {
        match self {
            Glyph::Digit(d) => DIGIT_PATTERNS[(d % 10) as usize],
            Glyph::Minus => MINUS_PATTERN,
            Glyph::Blank => 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// 段相对数位左上角的位置，单位为缩放系数c：(x*c + dx, y*c + dy)
#[derive(Debug, Clone, Copy)]
struct SegmentShape {
    x: (i32, i32),
    y: (i32, i32),
    orientation: Orientation,
}

const fn seg(x: (i32, i32), y: (i32, i32), orientation: Orientation) -> SegmentShape {
    SegmentShape { x, y, orientation }
}

// a b c d e f g
const SEGMENTS: [SegmentShape; 7] = [
    seg((1, 1), (0, 0), Orientation::Horizontal),
    seg((7, 1), (1, 1), Orientation::Vertical),
    seg((7, 1), (10, 2), Orientation::Vertical),
    seg((1, 1), (18, 2), Orientation::Horizontal),
    seg((0, 0), (10, 2), Orientation::Vertical),
    seg((0, 0), (1, 1), Orientation::Vertical),
    seg((1, 1), (9, 1), Orientation::Horizontal),
];

#[derive(Debug, Clone, Copy)]
pub struct SevenSegment {
    scale: u32,
    slots: u32,
    suppress_leading_zeros: bool,
    foreground: PaperColor,
    background: PaperColor,
}

impl SevenSegment {
    /// 缩放系数和位数都限制在1~10之间
    pub fn new(scale: u32, slots: u32) -> Self {
        Self {
            scale: scale.clamp(1, MAX_SCALE),
            slots: slots.clamp(1, MAX_SLOTS as u32),
            suppress_leading_zeros: false,
            foreground: PaperColor::Black,
            background: PaperColor::White,
        }
    }

    pub fn suppress_leading_zeros(mut self, suppress: bool) -> Self {
        self.suppress_leading_zeros = suppress;
        self
    }

    pub fn with_colors(mut self, foreground: PaperColor, background: PaperColor) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn slot_width(&self) -> u32 {
        11 * self.scale + 2
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.slots * self.slot_width() - 2 * self.scale,
            20 * self.scale + 4,
        )
    }

    /// 从左到右每个数位上的内容
    ///
    /// 个位总在最右边；数字用完后如果是负数放一个负号，没有位置就不显示负号；
    /// 其余位置补空白或0。放不下的高位直接丢弃。
    pub fn glyphs(&self, n: i32) -> Vec<Glyph, MAX_SLOTS> {
        let slots = self.slots as usize;
        let mut glyphs = [Glyph::Blank; MAX_SLOTS];
        let mut magnitude = n.unsigned_abs();
        let mut sign_pending = n < 0;

        for (i, slot) in glyphs[..slots].iter_mut().enumerate().rev() {
            *slot = if i == slots - 1 || magnitude > 0 {
                let digit = (magnitude % 10) as u8;
                magnitude /= 10;
                Glyph::Digit(digit)
            } else if sign_pending {
                sign_pending = false;
                Glyph::Minus
            } else if self.suppress_leading_zeros {
                Glyph::Blank
            } else {
                Glyph::Digit(0)
            };
        }

        glyphs[..slots].iter().copied().collect()
    }

    /// 以 `top_left` 为左上角绘制数字
    pub fn draw<D>(&self, target: &mut D, n: i32, top_left: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        for (i, glyph) in self.glyphs(n).iter().enumerate() {
            let origin = top_left + Point::new((i as u32 * self.slot_width()) as i32, 0);
            self.draw_glyph(target, *glyph, origin)?;
        }
        Ok(())
    }

    fn draw_glyph<D>(&self, target: &mut D, glyph: Glyph, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        let pattern = glyph.pattern();
        for (j, shape) in SEGMENTS.iter().enumerate() {
            let color = if pattern & (1 << j) != 0 {
                self.foreground
            } else {
                self.background
            };
            self.draw_segment(target, shape, origin, color)?;
        }
        Ok(())
    }

    fn draw_segment<D>(
        &self,
        target: &mut D,
        shape: &SegmentShape,
        origin: Point,
        color: PaperColor,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = PaperColor>,
    {
        let c = self.scale as i32;
        let sx = origin.x + shape.x.0 * c + shape.x.1;
        let sy = origin.y + shape.y.0 * c + shape.y.1;

        // 前c条线逐渐变宽，后c条线逐渐变窄
        let (mut along, mut length) = match shape.orientation {
            Orientation::Horizontal => (sx + c, 5 * c),
            Orientation::Vertical => (sy + c, 7 * c),
        };
        for step in 0..2 * c {
            let area = match shape.orientation {
                Orientation::Horizontal => Rectangle::new(
                    Point::new(along, sy + step),
                    Size::new(length as u32, 1),
                ),
                Orientation::Vertical => Rectangle::new(
                    Point::new(sx + step, along),
                    Size::new(1, length as u32),
                ),
            };
            target.fill_solid(&area, color)?;

            if step < c {
                along -= 1;
                length += 2;
            } else {
                along += 1;
                length -= 2;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::{DisplayRotation, PagedFramebuffer};
    use pretty_assertions::assert_eq;

    fn glyphs(n: i32, slots: u32, suppress: bool) -> std::vec::Vec<Glyph> {
        SevenSegment::new(2, slots)
            .suppress_leading_zeros(suppress)
            .glyphs(n)
            .to_vec()
    }

    #[test]
    fn zero_is_zero_padded() {
        assert_eq!(glyphs(0, 2, false), vec![Glyph::Digit(0), Glyph::Digit(0)]);
    }

    #[test]
    fn negative_number_gets_minus() {
        assert_eq!(glyphs(-5, 2, false), vec![Glyph::Minus, Glyph::Digit(5)]);
        assert_eq!(
            glyphs(-5, 3, true),
            vec![Glyph::Blank, Glyph::Minus, Glyph::Digit(5)]
        );
    }

    #[test]
    fn minus_is_dropped_without_room() {
        assert_eq!(glyphs(-5, 1, false), vec![Glyph::Digit(5)]);
        assert_eq!(glyphs(-42, 2, false), vec![Glyph::Digit(4), Glyph::Digit(2)]);
    }

    #[test]
    fn suppressed_zero_still_shows_units() {
        assert_eq!(glyphs(0, 3, true), vec![Glyph::Blank, Glyph::Blank, Glyph::Digit(0)]);
        assert_eq!(glyphs(105, 3, true), vec![Glyph::Digit(1), Glyph::Digit(0), Glyph::Digit(5)]);
    }

    #[test]
    fn high_digits_are_dropped() {
        assert_eq!(glyphs(1234, 2, false), vec![Glyph::Digit(3), Glyph::Digit(4)]);
    }

    #[test]
    fn footprint_and_clamping() {
        assert_eq!(SevenSegment::new(4, 2).size(), Size::new(84, 84));
        assert_eq!(SevenSegment::new(0, 0).size(), Size::new(11, 24));
        assert_eq!(SevenSegment::new(99, 99).size(), Size::new(10 * 112 - 20, 204));
    }

    #[test]
    fn segments_follow_pattern() {
        let c = 3;
        let display = SevenSegment::new(c as u32, 2);
        let size = display.size();
        let mut fb = PagedFramebuffer::new(size.width, size.height, size.height, DisplayRotation::Rotate0, false);
        fb.first_page();
        display.draw(&mut fb, -5, Point::zero()).unwrap();

        let horizontal = |slot: i32, x: i32, y: i32| {
            let x0 = slot * (11 * c + 2);
            fb.pixel((x0 + x * c + 1 + 3 * c) as u32, (y + c) as u32)
        };
        let vertical = |slot: i32, x: i32, y: i32| {
            let x0 = slot * (11 * c + 2);
            fb.pixel((x0 + x + c) as u32, (y + 4 * c) as u32)
        };

        // 第0位是负号：只有g段点亮
        assert_eq!(horizontal(0, 1, 9 * c + 1), Some(PaperColor::Black));
        assert_eq!(horizontal(0, 1, 0), Some(PaperColor::White));
        assert_eq!(vertical(0, 0, c + 1), Some(PaperColor::White));

        // 第1位是5：a c d f g 点亮，b e 熄灭
        assert_eq!(horizontal(1, 1, 0), Some(PaperColor::Black));
        assert_eq!(horizontal(1, 1, 18 * c + 2), Some(PaperColor::Black));
        assert_eq!(vertical(1, 0, c + 1), Some(PaperColor::Black));
        assert_eq!(vertical(1, 7 * c + 1, c + 1), Some(PaperColor::White));
        assert_eq!(vertical(1, 7 * c + 1, 10 * c + 2), Some(PaperColor::Black));
        assert_eq!(vertical(1, 0, 10 * c + 2), Some(PaperColor::White));
    }
}
