use super::GameBoyBus;
use crate::cpu::{IE_ADDR, IF_ADDR};

/// Open-bus value for unmapped or locked addresses.
const OPEN_BUS: u8 = 0xFF;

impl GameBoyBus {
    pub(super) fn read8_mmio(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_active => self
                .boot_rom
                .as_ref()
                .map_or(OPEN_BUS, |rom| rom[usize::from(addr)]),
            0x0000..=0x7FFF => self
                .cartridge
                .as_ref()
                .map_or(OPEN_BUS, |cart| cart.read(addr)),
            0x8000..=0x9FFF => self.ppu.read_vram(addr),
            0xA000..=0xBFFF => self
                .cartridge
                .as_ref()
                .map_or(OPEN_BUS, |cart| cart.ram_read(addr - 0xA000)),
            0xC000..=0xDFFF => self.wram[usize::from(addr - 0xC000)],
            // Echo RAM.
            0xE000..=0xFDFF => self.wram[usize::from(addr - 0xE000)],
            0xFE00..=0xFE9F => self.ppu.read_oam(addr),
            0xFEA0..=0xFEFF => OPEN_BUS,
            0xFF80..=0xFFFE => self.hram[usize::from(addr - 0xFF80)],
            IE_ADDR => self.interrupts.read_ie(),
            _ => self.read_io(addr),
        }
    }

    fn read_io(&self, addr: u16) -> u8 {
        match addr {
            0xFF00 => self.joypad.read(),
            0xFF01 => self.serial.read_sb(),
            0xFF02 => self.serial.read_sc(),
            0xFF04 => self.timer.read_div(),
            0xFF05 => self.timer.read_tima(),
            0xFF06 => self.timer.read_tma(),
            0xFF07 => self.timer.read_tac(),
            IF_ADDR => self.interrupts.read_if(),
            0xFF40..=0xFF4B => self.ppu.read_register(addr),
            // Audio, 0xFF50 and everything else unmapped.
            _ => OPEN_BUS,
        }
    }

    pub(super) fn write8_mmio(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.write(addr, value);
                }
            }
            0x8000..=0x9FFF => self.ppu.write_vram(addr, value),
            0xA000..=0xBFFF => {
                if let Some(cart) = self.cartridge.as_mut() {
                    cart.ram_write(addr - 0xA000, value);
                }
            }
            0xC000..=0xDFFF => self.wram[usize::from(addr - 0xC000)] = value,
            0xE000..=0xFDFF => self.wram[usize::from(addr - 0xE000)] = value,
            0xFE00..=0xFE9F => self.ppu.write_oam(addr, value),
            0xFEA0..=0xFEFF => {}
            0xFF80..=0xFFFE => self.hram[usize::from(addr - 0xFF80)] = value,
            IE_ADDR => self.interrupts.write_ie(value),
            _ => self.write_io(addr, value),
        }
    }

    fn write_io(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF00 => self.joypad.write(value),
            0xFF01 => self.serial.write_sb(value),
            0xFF02 => {
                if let Err(err) = self.serial.write_sc(value) {
                    log::error!("GB serial: {err}");
                    self.fault.get_or_insert(err);
                }
            }
            0xFF04 => self.timer.write_div(),
            0xFF05 => self.timer.write_tima(value),
            0xFF06 => self.timer.write_tma(value),
            0xFF07 => self.timer.write_tac(value),
            IF_ADDR => self.interrupts.write_if(value),
            0xFF46 => {
                self.ppu.write_register(addr, value, &mut self.interrupts);
                self.oam_dma(value);
            }
            0xFF40..=0xFF4B => self.ppu.write_register(addr, value, &mut self.interrupts),
            0xFF50 => {
                if value & 0x01 != 0 && self.boot_active {
                    log::debug!("GB bus: boot ROM unmapped");
                    self.boot_active = false;
                }
            }
            _ => {}
        }
    }
}
