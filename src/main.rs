//! 墨水屏界面模拟器
//!
//! 用法：`epd_calendar_gui [calendar|clock|analog] [unix时间戳]`，
//! 配置文件路径从环境变量 `EPD_GUI_CONFIG` 读取。绘制结果以字符画输出到终端。

use std::env;

use log::info;

use epd_calendar_gui::{
    DisplayMode, Gui, GuiConfig, GuiData,
    common::LayoutConfig,
    render::{Page, PaperColor},
};

// 每个字符对应的像素块
const CELL_WIDTH: usize = 4;
const CELL_HEIGHT: usize = 8;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    #[cfg(feature = "simulator")]
    env_logger::init();

    info!("墨水屏界面模拟器启动");

    let config = match env::var("EPD_GUI_CONFIG") {
        Ok(path) => {
            info!("加载配置文件: {}", path);
            GuiConfig::from_json(&std::fs::read_to_string(path)?)?
        }
        Err(_) => GuiConfig::default(),
    };

    let mut args = env::args().skip(1);
    let mode = match args.next().as_deref() {
        None | Some("calendar") => DisplayMode::Calendar,
        Some("clock") => DisplayMode::Clock,
        Some("analog") => DisplayMode::AnalogClock,
        Some(other) => return Err(format!("未知模式: {}", other).into()),
    };
    let timestamp = match args.next() {
        Some(timestamp) => timestamp.parse()?,
        None => jiff::Timestamp::now().as_second(),
    };

    let data = GuiData {
        timestamp,
        width: LayoutConfig::DISPLAY_WIDTH,
        height: LayoutConfig::DISPLAY_HEIGHT,
        bwr: true,
        voltage: 3.9,
        temperature: 25,
    };

    let mut screen: Vec<Vec<PaperColor>> = Vec::with_capacity(data.height as usize);
    Gui::new(config).draw(&data, mode, |page: &Page<'_>| {
        for row in 0..page.height {
            screen.push((0..page.width).map(|x| page.pixel(x, row)).collect());
        }
    })?;
    info!("共绘制 {} 行", screen.len());

    for band in screen.chunks(CELL_HEIGHT) {
        let line: String = (0..data.width as usize)
            .step_by(CELL_WIDTH)
            .map(|x| preview_char(band, x))
            .collect();
        println!("{}", line);
    }

    Ok(())
}

/// 像素块中有红色显示 `r`，有黑色显示 `#`，否则为 `.`
fn preview_char(band: &[Vec<PaperColor>], x: usize) -> char {
    let mut block = band
        .iter()
        .flat_map(|row| row.iter().skip(x).take(CELL_WIDTH));
    if block.clone().any(|&c| c == PaperColor::Red) {
        'r'
    } else if block.any(|&c| c == PaperColor::Black) {
        '#'
    } else {
        '.'
    }
}
