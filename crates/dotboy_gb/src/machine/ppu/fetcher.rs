//! Mode 3: background/window fetcher, sprite fetcher, pixel mixing.
//!
//! The background fetcher runs four steps (tile number, low plane, high
//! plane, push), one step every other dot. Push waits until the
//! background FIFO is empty. One pixel leaves the FIFO per dot unless a
//! sprite fetch has the pipeline stalled.
use super::oam::{SpriteEntry, ATTR_BEHIND_BG, ATTR_FLIP_X, ATTR_FLIP_Y, ATTR_PALETTE1};
use super::{Lcdc, Ppu};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum FetchStep {
    #[default]
    TileNumber,
    TileLow,
    TileHigh,
    Push,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BgFetcher {
    step: FetchStep,
    /// Tiles fetched on this line (window-relative once in window mode).
    tile_x: u8,
    window: bool,
    tile: u8,
    low: u8,
    high: u8,
    /// Flips every dot; a step runs when it becomes true.
    phase: bool,
}

impl BgFetcher {
    fn window() -> Self {
        Self {
            window: true,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ObjPixel {
    pub(crate) color: u8,
    pub(crate) palette1: bool,
    pub(crate) behind_bg: bool,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SpriteFetch {
    sprite: SpriteEntry,
    step: FetchStep,
    dots: u8,
    addr: u16,
    low: u8,
    high: u8,
}

impl SpriteFetch {
    fn new(sprite: SpriteEntry) -> Self {
        Self {
            sprite,
            step: FetchStep::TileNumber,
            dots: 0,
            addr: 0,
            low: 0,
            high: 0,
        }
    }
}

/// Map a 2-bit colour number through a palette register.
#[inline]
pub(crate) fn shade(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}

/// Colour number of pixel `i` (0 = leftmost) of a tile row.
#[inline]
fn color_at(low: u8, high: u8, i: u8) -> u8 {
    let bit = 7 - i;
    (((high >> bit) & 1) << 1) | ((low >> bit) & 1)
}

impl Ppu {
    pub(super) fn begin_transfer(&mut self) {
        self.bg_fifo.clear();
        self.obj_fifo.clear();
        self.fetcher = BgFetcher::default();
        self.sprite_fetch = None;
        self.next_sprite = 0;
        self.lx = 0;
        self.discard = self.scx % 8;
        self.window_active = false;
    }

    pub(super) fn transfer_dot(&mut self) {
        if self.sprite_fetch.is_some() {
            self.step_sprite_fetch();
            return;
        }

        self.check_window_trigger();

        if self.discard == 0 {
            if let Some(sprite) = self.sprites.get(self.next_sprite).copied() {
                if u16::from(sprite.x) <= u16::from(self.lx) + 8 {
                    self.next_sprite += 1;
                    self.sprite_fetch = Some(SpriteFetch::new(sprite));
                    self.step_sprite_fetch();
                    return;
                }
            }
        }

        self.fetcher.phase = !self.fetcher.phase;
        if self.fetcher.phase {
            self.step_bg_fetcher();
        }
        self.shift_out();
    }

    fn check_window_trigger(&mut self) {
        if self.window_active
            || !self.lcdc.contains(Lcdc::WINDOW_ENABLE)
            || self.line < self.wy
            || u16::from(self.lx) + 7 < u16::from(self.wx)
        {
            return;
        }
        self.window_active = true;
        self.window_line = Some(self.window_line.map_or(0, |line| line.wrapping_add(1)));
        self.bg_fifo.clear();
        self.fetcher = BgFetcher::window();
        self.discard = 7u8.saturating_sub(self.wx);
    }

    fn step_bg_fetcher(&mut self) {
        match self.fetcher.step {
            FetchStep::TileNumber => {
                self.fetcher.tile = self.vram[usize::from(self.bg_map_addr() - 0x8000)];
                self.fetcher.step = FetchStep::TileLow;
            }
            FetchStep::TileLow => {
                let addr = self.bg_tile_row_addr();
                self.fetcher.low = self.vram[usize::from(addr - 0x8000)];
                self.fetcher.step = FetchStep::TileHigh;
            }
            FetchStep::TileHigh => {
                let addr = self.bg_tile_row_addr() + 1;
                self.fetcher.high = self.vram[usize::from(addr - 0x8000)];
                self.fetcher.step = FetchStep::Push;
            }
            FetchStep::Push => {
                if !self.bg_fifo.is_empty() {
                    return;
                }
                for i in 0..8 {
                    self.bg_fifo
                        .push(color_at(self.fetcher.low, self.fetcher.high, i));
                }
                self.fetcher.tile_x = self.fetcher.tile_x.wrapping_add(1);
                self.fetcher.step = FetchStep::TileNumber;
            }
        }
    }

    fn bg_map_addr(&self) -> u16 {
        let (high_map, column, row) = if self.fetcher.window {
            (
                self.lcdc.contains(Lcdc::WINDOW_MAP_HIGH),
                self.fetcher.tile_x & 31,
                self.window_line.unwrap_or(0),
            )
        } else {
            (
                self.lcdc.contains(Lcdc::BG_MAP_HIGH),
                (self.scx / 8).wrapping_add(self.fetcher.tile_x) & 31,
                self.line.wrapping_add(self.scy),
            )
        };
        let base = if high_map { 0x9C00 } else { 0x9800 };
        base + u16::from(row / 8) * 32 + u16::from(column)
    }

    fn bg_tile_row_addr(&self) -> u16 {
        let fine_y = if self.fetcher.window {
            self.window_line.unwrap_or(0) % 8
        } else {
            self.line.wrapping_add(self.scy) % 8
        };
        let tile = self.fetcher.tile;
        let base = if self.lcdc.contains(Lcdc::TILE_DATA_LOW) {
            0x8000 + u16::from(tile) * 16
        } else {
            0x9000u16.wrapping_add_signed(i16::from(tile as i8) * 16)
        };
        base + u16::from(fine_y) * 2
    }

    /// Sprite fetch: one step every other dot, merge on the fourth.
    fn step_sprite_fetch(&mut self) {
        let Some(mut fetch) = self.sprite_fetch.take() else {
            return;
        };
        fetch.dots += 1;
        if fetch.dots % 2 == 0 {
            self.sprite_fetch = Some(fetch);
            return;
        }
        match fetch.step {
            FetchStep::TileNumber => {
                fetch.addr = self.sprite_row_addr(&fetch.sprite);
                fetch.step = FetchStep::TileLow;
            }
            FetchStep::TileLow => {
                fetch.low = self.vram[usize::from(fetch.addr - 0x8000)];
                fetch.step = FetchStep::TileHigh;
            }
            FetchStep::TileHigh => {
                fetch.high = self.vram[usize::from(fetch.addr + 1 - 0x8000)];
                fetch.step = FetchStep::Push;
            }
            FetchStep::Push => {
                self.merge_sprite(&fetch);
                return;
            }
        }
        self.sprite_fetch = Some(fetch);
    }

    fn sprite_row_addr(&self, sprite: &SpriteEntry) -> u16 {
        let height: u8 = if self.lcdc.contains(Lcdc::OBJ_TALL) { 16 } else { 8 };
        let mut row = self.line.wrapping_add(16).wrapping_sub(sprite.y) & (height - 1);
        if sprite.attrs & ATTR_FLIP_Y != 0 {
            row = height - 1 - row;
        }
        let tile = if height == 16 {
            sprite.tile & 0xFE
        } else {
            sprite.tile
        };
        0x8000 + u16::from(tile) * 16 + u16::from(row) * 2
    }

    /// Overlay a fetched sprite row onto the object FIFO. Slots already
    /// holding an opaque pixel belong to an earlier sprite and are kept.
    fn merge_sprite(&mut self, fetch: &SpriteFetch) {
        let attrs = fetch.sprite.attrs;
        let skip = (self.lx + 8).saturating_sub(fetch.sprite.x);
        for i in skip..8 {
            let column = if attrs & ATTR_FLIP_X != 0 { 7 - i } else { i };
            let pixel = ObjPixel {
                color: color_at(fetch.low, fetch.high, column),
                palette1: attrs & ATTR_PALETTE1 != 0,
                behind_bg: attrs & ATTR_BEHIND_BG != 0,
            };
            let slot = usize::from(i - skip);
            match self.obj_fifo.get(slot) {
                Some(existing) if existing.color == 0 => self.obj_fifo.set(slot, pixel),
                Some(_) => {}
                None => self.obj_fifo.push(pixel),
            }
        }
    }

    fn shift_out(&mut self) {
        let Some(color) = self.bg_fifo.pop() else {
            return;
        };
        if self.discard > 0 {
            self.discard -= 1;
            return;
        }
        let obj = self.obj_fifo.pop();
        let value = self.mix(color, obj);
        self.framebuffer
            .set(usize::from(self.lx), usize::from(self.line), value);
        self.lx += 1;
    }

    /// Resolve one output pixel and apply the palette current at this dot.
    fn mix(&self, bg: u8, obj: Option<ObjPixel>) -> u8 {
        let bg_enabled = self.lcdc.contains(Lcdc::BG_ENABLE);
        let bg = if bg_enabled { bg } else { 0 };
        if let Some(obj) = obj {
            let visible = obj.color != 0 && self.lcdc.contains(Lcdc::OBJ_ENABLE);
            if visible && !(obj.behind_bg && bg != 0) {
                let palette = if obj.palette1 { self.obp1 } else { self.obp0 };
                return shade(palette, obj.color);
            }
        }
        if bg_enabled {
            shade(self.bgp, bg)
        } else {
            0
        }
    }
}
