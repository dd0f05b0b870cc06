use super::{ram_index, rom_byte, RAM_BANK_SIZE, ROM_BANK_SIZE};

/// 32 KiB of ROM, optionally with one unbanked RAM chip.
pub struct RomOnly {
    rom: Vec<u8>,
    ram: Vec<u8>,
}

impl RomOnly {
    /// Images shorter than two banks are zero-padded.
    pub(super) fn new(rom: &[u8], ram_banks: usize) -> Self {
        let mut rom = rom.to_vec();
        rom.resize(rom.len().max(2 * ROM_BANK_SIZE), 0x00);
        Self {
            rom,
            ram: vec![0xFF; ram_banks.min(1) * RAM_BANK_SIZE],
        }
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        let bank = usize::from(addr >= 0x4000);
        rom_byte(&self.rom, bank, addr)
    }

    pub(super) fn ram_read(&self, offset: u16) -> u8 {
        ram_index(&self.ram, 0, offset).map_or(0xFF, |i| self.ram[i])
    }

    pub(super) fn ram_write(&mut self, offset: u16, value: u8) {
        if let Some(i) = ram_index(&self.ram, 0, offset) {
            self.ram[i] = value;
        }
    }
}
