//! 分页帧缓冲区
//!
//! 墨水屏控制器内存有限，整屏按行切成若干页，每页单独绘制后交给回调刷新。
//! 黑白平面中置位表示白色，红色平面中置位表示红色，像素按行从高位到低位排列。

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    prelude::{DrawTarget, OriginDimensions, Point, Size},
};
use log::debug;
use serde::Deserialize;

use crate::render::color::PaperColor;

/// 屏幕旋转方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DisplayRotation {
    #[default]
    Rotate0,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl DisplayRotation {
    pub fn is_portrait(self) -> bool {
        matches!(self, DisplayRotation::Rotate90 | DisplayRotation::Rotate270)
    }
}

/// 交给刷新回调的一页数据
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    pub index: u32,
    /// 本页第一行在屏幕上的行号
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub black: &'a [u8],
    /// 仅三色屏有红色平面
    pub red: Option<&'a [u8]>,
}

impl Page<'_> {
    /// 读取本页内某个物理像素
    pub fn pixel(&self, x: u32, row: u32) -> PaperColor {
        let (index, bit) = bit_position(self.width, x, row);
        if self.red.is_some_and(|red| red[index] & bit != 0) {
            PaperColor::Red
        } else if self.black[index] & bit != 0 {
            PaperColor::White
        } else {
            PaperColor::Black
        }
    }
}

fn bytes_per_row(width: u32) -> usize {
    width.div_ceil(8) as usize
}

fn bit_position(width: u32, x: u32, row: u32) -> (usize, u8) {
    let index = row as usize * bytes_per_row(width) + (x / 8) as usize;
    (index, 0x80 >> (x % 8))
}

pub struct PagedFramebuffer {
    width: u32,
    height: u32,
    page_height: u32,
    rotation: DisplayRotation,
    tri_color: bool,
    page: u32,
    black: Vec<u8>,
    red: Vec<u8>,
}

impl PagedFramebuffer {
    /// `width`/`height` 为屏幕物理分辨率
    pub fn new(
        width: u32,
        height: u32,
        page_height: u32,
        rotation: DisplayRotation,
        tri_color: bool,
    ) -> Self {
        let page_height = page_height.clamp(1, height.max(1));
        let size = bytes_per_row(width) * page_height as usize;
        Self {
            width,
            height,
            page_height,
            rotation,
            tri_color,
            page: 0,
            black: vec![0xFF; size],
            red: vec![0x00; if tri_color { size } else { 0 }],
        }
    }

    pub fn page_count(&self) -> u32 {
        self.height.div_ceil(self.page_height)
    }

    // 当前页的起始行和行数
    fn page_rows(&self) -> (u32, u32) {
        let y = self.page * self.page_height;
        (y, self.page_height.min(self.height - y))
    }

    pub fn first_page(&mut self) {
        self.page = 0;
        self.fill_page(PaperColor::White);
    }

    /// 刷新当前页并切换到下一页，所有页都绘制完成后返回 `false`
    pub fn next_page<F>(&mut self, flush: &mut F) -> bool
    where
        F: FnMut(&Page<'_>),
    {
        let (y, rows) = self.page_rows();
        let size = bytes_per_row(self.width) * rows as usize;
        let page = Page {
            index: self.page,
            y,
            width: self.width,
            height: rows,
            black: &self.black[..size],
            red: self.tri_color.then(|| &self.red[..size]),
        };
        debug!("Flush page {} (rows {}..{})", page.index, y, y + rows);
        flush(&page);

        self.page += 1;
        if self.page >= self.page_count() {
            self.page = 0;
            return false;
        }
        self.fill_page(PaperColor::White);
        true
    }

    fn fill_page(&mut self, color: PaperColor) {
        let (black, red) = match self.color_bits(color) {
            (true, true) => (0xFF, 0xFF),
            (true, false) => (0xFF, 0x00),
            _ => (0x00, 0x00),
        };
        self.black.fill(black);
        self.red.fill(red);
    }

    // (黑白平面位, 红色平面位)
    fn color_bits(&self, color: PaperColor) -> (bool, bool) {
        match color {
            PaperColor::White => (true, false),
            PaperColor::Red if self.tri_color => (true, true),
            PaperColor::Black | PaperColor::Red => (false, false),
        }
    }

    /// 逻辑坐标转物理坐标
    fn to_physical(&self, x: u32, y: u32) -> (u32, u32) {
        match self.rotation {
            DisplayRotation::Rotate0 => (x, y),
            DisplayRotation::Rotate90 => (self.width - 1 - y, x),
            DisplayRotation::Rotate180 => (self.width - 1 - x, self.height - 1 - y),
            DisplayRotation::Rotate270 => (y, self.height - 1 - x),
        }
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: PaperColor) {
        let (px, py) = self.to_physical(x, y);
        let (page_y, rows) = self.page_rows();
        // 不在当前页的像素直接丢弃
        if py < page_y || py >= page_y + rows {
            return;
        }
        let (index, bit) = bit_position(self.width, px, py - page_y);
        let (black, red) = self.color_bits(color);
        if black {
            self.black[index] |= bit;
        } else {
            self.black[index] &= !bit;
        }
        if self.tri_color {
            if red {
                self.red[index] |= bit;
            } else {
                self.red[index] &= !bit;
            }
        }
    }

    /// 读取逻辑坐标处的像素，不在当前页时返回 `None`
    pub fn pixel(&self, x: u32, y: u32) -> Option<PaperColor> {
        let size = self.size();
        if x >= size.width || y >= size.height {
            return None;
        }
        let (px, py) = self.to_physical(x, y);
        let (page_y, rows) = self.page_rows();
        if py < page_y || py >= page_y + rows {
            return None;
        }
        let (index, bit) = bit_position(self.width, px, py - page_y);
        if self.tri_color && self.red[index] & bit != 0 {
            Some(PaperColor::Red)
        } else if self.black[index] & bit != 0 {
            Some(PaperColor::White)
        } else {
            Some(PaperColor::Black)
        }
    }
}

impl DrawTarget for PagedFramebuffer {
    type Color = PaperColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let size = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= size.width || y >= size.height {
                continue;
            }

            self.set_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_page(color);
        Ok(())
    }
}

impl OriginDimensions for PagedFramebuffer {
    fn size(&self) -> Size {
        if self.rotation.is_portrait() {
            Size::new(self.height, self.width)
        } else {
            Size::new(self.width, self.height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::{
        prelude::Primitive,
        primitives::{PrimitiveStyle, Rectangle},
        Drawable,
    };
    use pretty_assertions::assert_eq;

    fn collect_pages(fb: &mut PagedFramebuffer) -> Vec<(u32, u32, Vec<u8>, Option<Vec<u8>>)> {
        let mut pages = Vec::new();
        let mut flush = |page: &Page<'_>| {
            pages.push((page.y, page.height, page.black.to_vec(), page.red.map(<[u8]>::to_vec)));
        };
        while fb.next_page(&mut flush) {}
        pages
    }

    #[test]
    fn pages_cover_every_row() {
        let mut fb = PagedFramebuffer::new(16, 10, 4, DisplayRotation::Rotate0, false);
        fb.first_page();
        let pages = collect_pages(&mut fb);
        let rows: Vec<(u32, u32)> = pages.iter().map(|p| (p.0, p.1)).collect();
        assert_eq!(rows, vec![(0, 4), (4, 4), (8, 2)]);
        assert!(pages.iter().all(|p| p.2.iter().all(|&b| b == 0xFF) && p.3.is_none()));
    }

    #[test]
    fn pixels_outside_page_are_dropped() {
        let mut fb = PagedFramebuffer::new(8, 8, 4, DisplayRotation::Rotate0, true);
        fb.first_page();
        Pixel(Point::new(1, 6), PaperColor::Black).draw(&mut fb).unwrap();
        Pixel(Point::new(1, 1), PaperColor::Red).draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(1, 1), Some(PaperColor::Red));
        assert_eq!(fb.pixel(1, 6), None);

        let mut flushed = Vec::new();
        fb.next_page(&mut |page: &Page<'_>| flushed.push((page.pixel(1, 1), page.pixel(0, 0))));
        assert_eq!(flushed, vec![(PaperColor::Red, PaperColor::White)]);
    }

    #[test]
    fn red_falls_back_to_black_without_red_plane() {
        let mut fb = PagedFramebuffer::new(8, 8, 8, DisplayRotation::Rotate0, false);
        fb.first_page();
        Pixel(Point::new(2, 2), PaperColor::Red).draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(2, 2), Some(PaperColor::Black));
    }

    #[test]
    fn rotate90_maps_to_physical() {
        let mut fb = PagedFramebuffer::new(16, 8, 8, DisplayRotation::Rotate90, false);
        assert_eq!(fb.size(), Size::new(8, 16));
        fb.first_page();
        Pixel(Point::new(1, 0), PaperColor::Black).draw(&mut fb).unwrap();

        let mut black = Vec::new();
        fb.next_page(&mut |page: &Page<'_>| {
            for row in 0..page.height {
                for x in 0..page.width {
                    if page.pixel(x, row) == PaperColor::Black {
                        black.push((x, row));
                    }
                }
            }
        });
        // 逻辑 (1, 0) -> 物理 (15, 1)
        assert_eq!(black, vec![(15, 1)]);
    }

    #[test]
    fn clear_fills_current_page() {
        let mut fb = PagedFramebuffer::new(8, 4, 4, DisplayRotation::Rotate0, false);
        fb.first_page();
        Rectangle::new(Point::new(0, 0), Size::new(8, 4))
            .into_styled(PrimitiveStyle::with_fill(PaperColor::Black))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(7, 3), Some(PaperColor::Black));
        fb.clear(PaperColor::White).unwrap();
        assert_eq!(fb.pixel(7, 3), Some(PaperColor::White));
    }
}
