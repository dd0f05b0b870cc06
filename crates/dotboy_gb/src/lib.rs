//! Cycle-stepped emulation core for the original monochrome Game Boy (DMG).
//!
//! The machine is driven one instruction at a time through
//! [`GameBoy::step`]; the timer, video pipeline and serial port are then
//! caught up by the cycles that instruction consumed.

pub mod config;
pub mod cpu;
pub mod error;
pub mod machine;

pub use config::GameBoyConfig;
pub use error::{Error, Result};
pub use machine::{
    Button, Cartridge, Disconnected, Framebuffer, GameBoy, Interrupt, LinkPartner,
};

pub const SCREEN_WIDTH: usize = 160;
pub const SCREEN_HEIGHT: usize = 144;

/// T-cycles in one complete video frame (456 dots × 154 lines).
pub const CYCLES_PER_FRAME: u32 = 70_224;
