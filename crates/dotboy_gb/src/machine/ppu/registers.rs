//! CPU-facing side of the PPU: 0xFF40-0xFF4B and VRAM/OAM gating.
use super::{Mode, Ppu, STAT_COINCIDENCE};
use crate::machine::interrupts::InterruptController;

impl Ppu {
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => {
                let coincidence = if self.coincidence { STAT_COINCIDENCE } else { 0 };
                0x80 | self.stat_enable | coincidence | self.mode as u8
            }
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly(),
            0xFF45 => self.lyc,
            0xFF46 => self.dma,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    /// Write a PPU register. DMA only latches the source here; the bus
    /// performs the copy.
    pub(crate) fn write_register(
        &mut self,
        addr: u16,
        value: u8,
        interrupts: &mut InterruptController,
    ) {
        match addr {
            0xFF40 => self.write_lcdc(value, interrupts),
            0xFF41 => {
                self.stat_enable = value & 0x78;
                self.update_stat_line(interrupts);
            }
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                self.coincidence = self.line == self.lyc;
                self.update_stat_line(interrupts);
            }
            0xFF46 => self.dma = value,
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn vram_blocked(&self) -> bool {
        self.lcd_on() && self.mode == Mode::PixelTransfer
    }

    fn oam_blocked(&self) -> bool {
        self.lcd_on() && matches!(self.mode, Mode::OamScan | Mode::PixelTransfer)
    }

    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        if self.vram_blocked() {
            return 0xFF;
        }
        self.vram[usize::from(addr & 0x1FFF)]
    }

    pub(crate) fn write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_blocked() {
            log::trace!("GB PPU: VRAM write {addr:04X} dropped in mode 3");
            return;
        }
        self.vram[usize::from(addr & 0x1FFF)] = value;
    }

    pub(crate) fn read_oam(&self, addr: u16) -> u8 {
        if self.oam_blocked() {
            return 0xFF;
        }
        self.oam[usize::from(addr - 0xFE00)]
    }

    pub(crate) fn write_oam(&mut self, addr: u16, value: u8) {
        if self.oam_blocked() {
            return;
        }
        self.oam[usize::from(addr - 0xFE00)] = value;
    }

    /// OAM DMA target; ignores mode gating.
    pub(crate) fn dma_write_oam(&mut self, index: usize, value: u8) {
        self.oam[index] = value;
    }

    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcd_on()
    }
}
