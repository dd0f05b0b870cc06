//! Cartridge mappers behind one read/write contract.
mod mbc1;
mod mbc3;
mod rom_only;

pub use mbc1::Mbc1;
pub use mbc3::Mbc3;
pub use rom_only::RomOnly;

use crate::error::{Error, Result};

const HEADER_END: usize = 0x0150;
const ROM_BANK_SIZE: usize = 0x4000;
const RAM_BANK_SIZE: usize = 0x2000;

/// A loaded cartridge, tagged by mapper.
///
/// The bus only ever calls [`read`](Cartridge::read) and
/// [`write`](Cartridge::write) for 0x0000-0x7FFF, and
/// [`ram_read`](Cartridge::ram_read) and
/// [`ram_write`](Cartridge::ram_write) with an offset into the
/// 0xA000-0xBFFF window.
pub enum Cartridge {
    RomOnly(RomOnly),
    Mbc1(Mbc1),
    /// ROM/RAM banking only; the real-time clock registers read as 0xFF.
    /// Behaviour is unverified against hardware.
    Mbc3(Mbc3),
}

impl Cartridge {
    /// Pick a mapper from header byte 0x0147.
    pub fn from_rom(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(Error::RomTooSmall { len: rom.len() });
        }

        let kind = rom[0x0147];
        let ram_banks = ram_banks(rom[0x0149]);
        let cartridge = match kind {
            0x00 | 0x08 | 0x09 => Cartridge::RomOnly(RomOnly::new(rom, ram_banks)),
            0x01..=0x03 => Cartridge::Mbc1(Mbc1::new(rom, ram_banks)),
            0x0F..=0x13 => Cartridge::Mbc3(Mbc3::new(rom, ram_banks)),
            _ => return Err(Error::UnsupportedCartridge { kind }),
        };

        log::info!(
            "GB cartridge: title={:?} type=0x{kind:02X} rom={} KiB ram_banks={ram_banks}",
            title(rom),
            rom.len() / 1024,
        );
        Ok(cartridge)
    }

    pub fn read(&self, addr: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.read(addr),
            Cartridge::Mbc1(c) => c.read(addr),
            Cartridge::Mbc3(c) => c.read(addr),
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match self {
            Cartridge::RomOnly(_) => {}
            Cartridge::Mbc1(c) => c.write(addr, value),
            Cartridge::Mbc3(c) => c.write(addr, value),
        }
    }

    pub fn ram_read(&self, offset: u16) -> u8 {
        match self {
            Cartridge::RomOnly(c) => c.ram_read(offset),
            Cartridge::Mbc1(c) => c.ram_read(offset),
            Cartridge::Mbc3(c) => c.ram_read(offset),
        }
    }

    pub fn ram_write(&mut self, offset: u16, value: u8) {
        match self {
            Cartridge::RomOnly(c) => c.ram_write(offset, value),
            Cartridge::Mbc1(c) => c.ram_write(offset, value),
            Cartridge::Mbc3(c) => c.ram_write(offset, value),
        }
    }
}

/// Game title from the header, trimmed at the first NUL.
fn title(rom: &[u8]) -> String {
    let raw = &rom[0x0134..0x0144];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// 8 KiB RAM banks for header byte 0x0149. 2 KiB parts get a whole bank.
fn ram_banks(code: u8) -> usize {
    match code {
        0x01 | 0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}

/// Byte `offset` of 16 KiB bank `bank`, wrapping the bank number to the
/// image size.
fn rom_byte(rom: &[u8], bank: usize, offset: u16) -> u8 {
    let banks = (rom.len() / ROM_BANK_SIZE).max(1);
    let index = (bank % banks) * ROM_BANK_SIZE + usize::from(offset & 0x3FFF);
    rom.get(index).copied().unwrap_or(0xFF)
}

/// Index into banked external RAM, or `None` when there is none.
fn ram_index(ram: &[u8], bank: usize, offset: u16) -> Option<usize> {
    let banks = ram.len() / RAM_BANK_SIZE;
    if banks == 0 {
        return None;
    }
    Some((bank % banks) * RAM_BANK_SIZE + usize::from(offset & 0x1FFF))
}

#[cfg(test)]
mod tests;
