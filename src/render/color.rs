// src/render/color.rs
use embedded_graphics::pixelcolor::PixelColor;

/// 三色墨水屏的颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperColor {
    #[default]
    White,
    Black,
    Red,
}

impl PixelColor for PaperColor {
    type Raw = ();
}

impl PaperColor {
    /// 反色，用于“今天”格子里的文字
    pub fn inverted(self) -> Self {
        match self {
            PaperColor::White => PaperColor::Red,
            PaperColor::Black | PaperColor::Red => PaperColor::White,
        }
    }
}
