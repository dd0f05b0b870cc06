use super::cartridge::Cartridge;
use super::interrupts::InterruptController;
use super::joypad::Joypad;
use super::ppu::Ppu;
use super::serial::Serial;
use super::timer::Timer;
use crate::error::{Error, Result};

mod dma;
mod init;
mod mmio;
mod traits;

pub(crate) const BOOT_ROM_SIZE: usize = 0x100;
const WRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;

/// The DMG address space and every peripheral hanging off it.
pub(crate) struct GameBoyBus {
    /// `None` until a ROM is loaded; the cartridge area then reads open bus.
    cartridge: Option<Cartridge>,
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    /// Boot image mapped over 0x0000-0x00FF; cleared by a write to 0xFF50.
    boot_active: bool,
    wram: Box<[u8; WRAM_SIZE]>,
    hram: [u8; HRAM_SIZE],
    pub(crate) interrupts: InterruptController,
    pub(crate) timer: Timer,
    pub(crate) ppu: Ppu,
    pub(crate) serial: Serial,
    pub(crate) joypad: Joypad,
    /// Fatal condition raised by an IO write, reported after the instruction.
    fault: Option<Error>,
}

impl GameBoyBus {
    /// A bus without a boot image: IO registers hold their post-boot values.
    pub(crate) fn new(randomize_ram: bool) -> Self {
        let mut bus = Self::power_on(randomize_ram);
        bus.apply_dmg_post_boot_io();
        bus
    }

    /// A bus at power-on with `boot_rom` mapped over the cartridge header.
    pub(crate) fn with_boot_rom(boot_rom: &[u8], randomize_ram: bool) -> Result<Self> {
        let image: [u8; BOOT_ROM_SIZE] = boot_rom
            .try_into()
            .map_err(|_| Error::BootRomSize { len: boot_rom.len() })?;
        let mut bus = Self::power_on(randomize_ram);
        bus.boot_rom = Some(Box::new(image));
        bus.boot_active = true;
        Ok(bus)
    }

    fn power_on(randomize_ram: bool) -> Self {
        let mut bus = Self {
            cartridge: None,
            boot_rom: None,
            boot_active: false,
            wram: Box::new([0; WRAM_SIZE]),
            hram: [0; HRAM_SIZE],
            interrupts: InterruptController::default(),
            timer: Timer::new(),
            ppu: Ppu::new(),
            serial: Serial::new(),
            joypad: Joypad::new(),
            fault: None,
        };
        if randomize_ram {
            bus.randomize_internal_ram();
        }
        bus
    }

    pub(crate) fn load_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub(crate) fn boot_rom_active(&self) -> bool {
        self.boot_active
    }

    /// Hand back a fault parked by the last IO write, if any.
    pub(crate) fn take_fault(&mut self) -> Option<Error> {
        self.fault.take()
    }

    /// Bring the peripherals up to date with `cycles` of CPU time, always
    /// timer first, then video, then serial.
    pub(crate) fn catch_up(&mut self, cycles: u32) {
        self.timer.advance(cycles, &mut self.interrupts);
        self.ppu.advance(cycles, &mut self.interrupts);
        self.serial.advance(cycles, &mut self.interrupts);
    }
}
