use super::{ram_index, rom_byte, RAM_BANK_SIZE};

/// MBC3 without the real-time clock.
///
/// Selecting an RTC register (0x08-0x0C) through 0x4000 makes the RAM
/// window read 0xFF and ignore writes.
pub struct Mbc3 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enable: bool,
    rom_bank: u8,
    ram_select: u8,
}

impl Mbc3 {
    pub(super) fn new(rom: &[u8], ram_banks: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_banks * RAM_BANK_SIZE],
            ram_enable: false,
            rom_bank: 1,
            ram_select: 0,
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        let bank = if addr < 0x4000 {
            0
        } else {
            usize::from(self.rom_bank)
        };
        rom_byte(&self.rom, bank, addr)
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => self.rom_bank = (value & 0x7F).max(1),
            0x4000..=0x5FFF => self.ram_select = value,
            // Clock latch; no clock to latch.
            _ => {}
        }
    }

    fn ram_slot(&self, offset: u16) -> Option<usize> {
        if !self.ram_enable || self.ram_select > 0x03 {
            return None;
        }
        ram_index(&self.ram, usize::from(self.ram_select), offset)
    }

    pub(super) fn ram_read(&self, offset: u16) -> u8 {
        self.ram_slot(offset).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, offset: u16, value: u8) {
        if let Some(i) = self.ram_slot(offset) {
            self.ram[i] = value;
        }
    }
}
