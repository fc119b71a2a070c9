// src/gui.rs

//! 界面绘制入口
//!
//! 每一页都从头执行一遍完整的绘制流程（包括农历换算），不在页之间保留任何状态，
//! 因此相同的输入在每一页上画出的内容完全一致。

use embedded_graphics::{Drawable, prelude::DrawTarget};
use log::{error, info, warn};

use crate::{
    calendar::{ChineseCalendar, LunarCalendar},
    common::{
        config::{GuiConfig, LayoutConfig},
        error::{AppError, Result},
        types::{DateTime, DisplayMode, GuiData},
    },
    render::{
        Page, PagedFramebuffer, PaperColor,
        components::{AnalogClock, CalendarView, ClockView},
    },
};

pub struct Gui<L: LunarCalendar = ChineseCalendar> {
    config: GuiConfig,
    calendar: L,
}

impl Gui {
    pub fn new(config: GuiConfig) -> Self {
        let calendar = ChineseCalendar::new(config.timezone_offset);
        Self::with_calendar(config, calendar)
    }
}

impl Default for Gui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl<L: LunarCalendar> Gui<L> {
    pub fn with_calendar(config: GuiConfig, calendar: L) -> Self {
        Self { config, calendar }
    }

    /// 分页绘制整个界面，每页绘制完成后调用 `flush`
    pub fn draw<F>(&self, data: &GuiData, mode: DisplayMode, flush: F) -> Result<()>
    where
        F: FnMut(&Page<'_>),
    {
        self.draw_pages(data, Some(mode), flush)
    }

    /// 以原始模式编号绘制，未知模式只刷新空白页
    pub fn draw_raw<F>(&self, data: &GuiData, mode: u8, flush: F) -> Result<()>
    where
        F: FnMut(&Page<'_>),
    {
        match DisplayMode::try_from(mode) {
            Ok(mode) => self.draw_pages(data, Some(mode), flush),
            Err(e) => {
                warn!("{}, flushing blank pages", e);
                self.draw_pages(data, None, flush)
            }
        }
    }

    fn draw_pages<F>(&self, data: &GuiData, mode: Option<DisplayMode>, mut flush: F) -> Result<()>
    where
        F: FnMut(&Page<'_>),
    {
        let now = DateTime::from_timestamp(data.timestamp, self.config.timezone_offset)?;
        let mut framebuffer = PagedFramebuffer::new(
            data.width,
            data.height,
            self.config.page_height,
            self.config.rotation,
            data.bwr,
        );
        info!(
            "Drawing {:?} for {:04}-{:02}-{:02} {:02}:{:02} in {} pages",
            mode,
            now.date.year,
            now.date.month,
            now.date.day,
            now.hour,
            now.minute,
            framebuffer.page_count()
        );

        framebuffer.first_page();
        loop {
            if let Some(mode) = mode {
                self.compose(&mut framebuffer, &now, data, mode)?;
            }
            if !framebuffer.next_page(&mut flush) {
                break;
            }
        }

        Ok(())
    }

    /// 在任意绘制目标上绘制一遍界面
    pub fn compose<D>(
        &self,
        target: &mut D,
        now: &DateTime,
        data: &GuiData,
        mode: DisplayMode,
    ) -> Result<()>
    where
        D: DrawTarget<Color = PaperColor>,
        D::Error: core::fmt::Debug,
    {
        let lunar = self.calendar.solar_to_lunar(&now.date)?;

        let result = match mode {
            DisplayMode::Calendar => {
                CalendarView::build(&self.calendar, now, &lunar, &self.config.holidays)?
                    .draw(target)
            }
            DisplayMode::Clock => ClockView::build(&self.calendar, now, &lunar, data).draw(target),
            DisplayMode::AnalogClock => AnalogClock {
                hour: now.hour,
                minute: now.minute,
                center: LayoutConfig::ANALOG_CENTER,
                radius: LayoutConfig::ANALOG_RADIUS,
            }
            .draw(target),
        };

        result.map_err(|e| {
            error!("Failed to draw {:?}: {:?}", mode, e);
            AppError::RenderingFailed
        })
    }
}
