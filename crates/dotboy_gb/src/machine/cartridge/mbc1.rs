use super::{ram_index, rom_byte, RAM_BANK_SIZE};

/// MBC1: 5-bit ROM bank register plus a 2-bit register that extends
/// the ROM bank or, in mode 1, selects the RAM bank and the 0x0000
/// window's bank.
pub struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    ram_enable: bool,
    bank_low: u8,
    bank_high: u8,
    advanced_mode: bool,
}

impl Mbc1 {
    pub(super) fn new(rom: &[u8], ram_banks: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0xFF; ram_banks * RAM_BANK_SIZE],
            ram_enable: false,
            bank_low: 1,
            bank_high: 0,
            advanced_mode: false,
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        let high = usize::from(self.bank_high) << 5;
        let bank = if addr < 0x4000 {
            if self.advanced_mode {
                high
            } else {
                0
            }
        } else {
            high | usize::from(self.bank_low)
        };
        rom_byte(&self.rom, bank, addr)
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => self.bank_low = (value & 0x1F).max(1),
            0x4000..=0x5FFF => self.bank_high = value & 0x03,
            _ => self.advanced_mode = value & 0x01 != 0,
        }
    }

    fn ram_bank(&self) -> usize {
        if self.advanced_mode {
            usize::from(self.bank_high)
        } else {
            0
        }
    }

    pub(super) fn ram_read(&self, offset: u16) -> u8 {
        if !self.ram_enable {
            return 0xFF;
        }
        ram_index(&self.ram, self.ram_bank(), offset).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, offset: u16, value: u8) {
        if !self.ram_enable {
            return;
        }
        if let Some(i) = ram_index(&self.ram, self.ram_bank(), offset) {
            self.ram[i] = value;
        }
    }
}
