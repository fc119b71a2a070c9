// src/render/mod.rs
pub mod components;

pub(crate) mod color;
pub use color::PaperColor;

pub(crate) mod framebuffer;
pub use framebuffer::{DisplayRotation, Page, PagedFramebuffer};

mod rotated_rect;
pub use rotated_rect::{RotatedRect, hour_hand_angle, minute_hand_angle};

pub(crate) mod seven_segment;
pub use seven_segment::{Glyph, MAX_SLOTS, SevenSegment};

pub(crate) mod text;
pub use text::{FontFace, TextRenderer};
