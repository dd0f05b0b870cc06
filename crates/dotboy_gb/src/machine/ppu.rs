//! Scanline state machine and pixel pipeline.
//!
//! Each line is 456 dots: 80 of OAM scan, a variable-length pixel
//! transfer that ends once 160 pixels are out, and HBlank for the rest.
//! Lines 144-153 are VBlank.
mod fetcher;
mod fifo;
mod oam;
mod registers;

use bitflags::bitflags;

use self::fetcher::{BgFetcher, ObjPixel, SpriteFetch};
use self::fifo::PixelFifo;
use self::oam::SpriteEntry;
use super::interrupts::InterruptController;
use crate::cpu::Interrupt;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

pub(crate) const DOTS_PER_LINE: u16 = 456;
pub(crate) const OAM_SCAN_DOTS: u16 = 80;
const LINES_PER_FRAME: u8 = 154;

const STAT_COINCIDENCE: u8 = 1 << 2;
const STAT_HBLANK_SOURCE: u8 = 1 << 3;
const STAT_VBLANK_SOURCE: u8 = 1 << 4;
const STAT_OAM_SOURCE: u8 = 1 << 5;
const STAT_LYC_SOURCE: u8 = 1 << 6;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Lcdc: u8 {
        const BG_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        const OBJ_TALL = 1 << 2;
        const BG_MAP_HIGH = 1 << 3;
        /// Unsigned tile numbers from 0x8000 instead of signed from 0x9000.
        const TILE_DATA_LOW = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        const WINDOW_MAP_HIGH = 1 << 6;
        const DISPLAY_ENABLE = 1 << 7;
    }
}

/// STAT mode field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    PixelTransfer = 3,
}

/// 160×144 grid of 2-bit shades (palette already applied).
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    shades: Vec<u8>,
}

impl Framebuffer {
    fn new() -> Self {
        Self {
            shades: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Shade 0-3 at (`x`, `y`); 0 is lightest.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.shades[y * SCREEN_WIDTH + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.shades[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH]
    }

    /// All shades, row-major.
    pub fn as_slice(&self) -> &[u8] {
        &self.shades
    }

    fn set(&mut self, x: usize, y: usize, shade: u8) {
        self.shades[y * SCREEN_WIDTH + x] = shade;
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish()
    }
}

pub(crate) struct Ppu {
    vram: Box<[u8; 0x2000]>,
    oam: [u8; 0xA0],
    framebuffer: Framebuffer,

    lcdc: Lcdc,
    /// STAT bits 3-6 as written.
    stat_enable: u8,
    scy: u8,
    scx: u8,
    lyc: u8,
    dma: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    mode: Mode,
    /// Internal line counter 0..=153; LY differs from it on line 153.
    line: u8,
    /// Dots elapsed in the current line.
    dot: u16,
    coincidence: bool,
    /// Composite STAT interrupt line, for edge detection.
    stat_line: bool,

    sprites: Vec<SpriteEntry>,
    next_sprite: usize,
    bg_fifo: PixelFifo<u8, 16>,
    obj_fifo: PixelFifo<ObjPixel, 8>,
    fetcher: BgFetcher,
    sprite_fetch: Option<SpriteFetch>,
    /// Pixels emitted on the current line.
    lx: u8,
    /// Pixels still to drop before output starts.
    discard: u8,
    window_active: bool,
    /// Window row being drawn; `None` until the window first shows in a frame.
    window_line: Option<u8>,

    frame_ready: bool,
    frame_count: u64,
}

impl Ppu {
    pub(crate) fn new() -> Self {
        Self {
            vram: Box::new([0; 0x2000]),
            oam: [0; 0xA0],
            framebuffer: Framebuffer::new(),
            lcdc: Lcdc::empty(),
            stat_enable: 0,
            scy: 0,
            scx: 0,
            lyc: 0,
            dma: 0xFF,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            mode: Mode::HBlank,
            line: 0,
            dot: 0,
            coincidence: false,
            stat_line: false,
            sprites: Vec::with_capacity(oam::MAX_SPRITES_PER_LINE),
            next_sprite: 0,
            bg_fifo: PixelFifo::new(),
            obj_fifo: PixelFifo::new(),
            fetcher: BgFetcher::default(),
            sprite_fetch: None,
            lx: 0,
            discard: 0,
            window_active: false,
            window_line: None,
            frame_ready: false,
            frame_count: 0,
        }
    }

    /// Register state left by the DMG boot ROM: LCD on, BG on, 0x8000
    /// tile data, BGP=0xFC.
    pub(crate) fn init_dmg(&mut self, interrupts: &mut InterruptController) {
        self.bgp = 0xFC;
        self.obp0 = 0xFF;
        self.obp1 = 0xFF;
        self.write_lcdc(0x91, interrupts);
    }

    #[inline]
    fn lcd_on(&self) -> bool {
        self.lcdc.contains(Lcdc::DISPLAY_ENABLE)
    }

    #[cfg(test)]
    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    /// LY as the bus sees it.
    pub(crate) fn ly(&self) -> u8 {
        if self.line == LINES_PER_FRAME - 1 {
            0
        } else {
            self.line
        }
    }

    pub(crate) fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub(crate) fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Report and clear the frame-ready edge.
    pub(crate) fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    /// Run the pipeline for `cycles` dots. Nothing moves while the LCD is off.
    pub(crate) fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        if !self.lcd_on() {
            return;
        }
        for _ in 0..cycles {
            self.tick(interrupts);
        }
    }

    fn tick(&mut self, interrupts: &mut InterruptController) {
        self.dot += 1;
        match self.mode {
            Mode::OamScan => {
                if self.dot == OAM_SCAN_DOTS {
                    self.scan_oam();
                    self.begin_transfer();
                    self.enter_mode(Mode::PixelTransfer, interrupts);
                }
            }
            Mode::PixelTransfer => {
                self.transfer_dot();
                if usize::from(self.lx) == SCREEN_WIDTH {
                    self.enter_mode(Mode::HBlank, interrupts);
                }
            }
            Mode::HBlank | Mode::VBlank => {
                if self.dot == DOTS_PER_LINE {
                    self.next_line(interrupts);
                }
            }
        }
    }

    fn next_line(&mut self, interrupts: &mut InterruptController) {
        self.dot = 0;
        self.line += 1;
        if self.line == LINES_PER_FRAME {
            self.line = 0;
            self.window_line = None;
        }
        self.coincidence = self.line == self.lyc;

        if usize::from(self.line) < SCREEN_HEIGHT {
            self.enter_mode(Mode::OamScan, interrupts);
        } else if usize::from(self.line) == SCREEN_HEIGHT {
            self.enter_mode(Mode::VBlank, interrupts);
        } else {
            self.update_stat_line(interrupts);
        }
    }

    fn enter_mode(&mut self, mode: Mode, interrupts: &mut InterruptController) {
        self.mode = mode;
        if mode == Mode::VBlank {
            interrupts.request(Interrupt::VBLANK);
            self.frame_ready = true;
            self.frame_count += 1;
            log::trace!("GB PPU: vblank, frame {}", self.frame_count);
        }
        self.update_stat_line(interrupts);
    }

    /// Whether any enabled STAT source is currently true.
    fn stat_condition(&self) -> bool {
        let source = match self.mode {
            Mode::HBlank => STAT_HBLANK_SOURCE,
            Mode::VBlank => STAT_VBLANK_SOURCE,
            Mode::OamScan => STAT_OAM_SOURCE,
            Mode::PixelTransfer => 0,
        };
        let lyc = self.coincidence && self.stat_enable & STAT_LYC_SOURCE != 0;
        lyc || self.stat_enable & source != 0
    }

    /// Request STAT on a false→true transition of the composite line.
    fn update_stat_line(&mut self, interrupts: &mut InterruptController) {
        let line = self.lcd_on() && self.stat_condition();
        if line && !self.stat_line {
            interrupts.request(Interrupt::STAT);
        }
        self.stat_line = line;
    }

    fn write_lcdc(&mut self, value: u8, interrupts: &mut InterruptController) {
        let was_on = self.lcd_on();
        self.lcdc = Lcdc::from_bits_retain(value);
        match (was_on, self.lcd_on()) {
            (true, false) => self.shutdown(),
            (false, true) => self.startup(),
            _ => {}
        }
        self.coincidence = self.line == self.lyc;
        self.update_stat_line(interrupts);
    }

    /// LCD off: back to line 0, mode 0, pipeline idle.
    fn shutdown(&mut self) {
        log::debug!("GB PPU: LCD off at line {} dot {}", self.line, self.dot);
        self.mode = Mode::HBlank;
        self.line = 0;
        self.dot = 0;
        self.reset_line_state();
        self.window_line = None;
        self.stat_line = false;
    }

    /// LCD on: OAM scan of line 0 starts with the next dot.
    fn startup(&mut self) {
        log::debug!("GB PPU: LCD on");
        self.mode = Mode::OamScan;
        self.line = 0;
        self.dot = 0;
        self.reset_line_state();
        self.window_line = None;
    }

    fn reset_line_state(&mut self) {
        self.sprites.clear();
        self.next_sprite = 0;
        self.bg_fifo.clear();
        self.obj_fifo.clear();
        self.fetcher = BgFetcher::default();
        self.sprite_fetch = None;
        self.lx = 0;
        self.discard = 0;
        self.window_active = false;
    }

    fn scan_oam(&mut self) {
        self.sprites.clear();
        if !self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            return;
        }
        let height = if self.lcdc.contains(Lcdc::OBJ_TALL) { 16 } else { 8 };
        oam::select_sprites(&self.oam, self.line, height, &mut self.sprites);
    }
}

#[cfg(test)]
mod tests;
