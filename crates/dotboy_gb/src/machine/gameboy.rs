use crate::config::GameBoyConfig;
use crate::cpu::Cpu;
use crate::error::{Error, Result};
use crate::CYCLES_PER_FRAME;

use super::cartridge::Cartridge;
use super::joypad::Button;
use super::ppu::Framebuffer;
use super::serial::LinkPartner;
use super::GameBoyBus;

/// High-level Game Boy machine.
///
/// Owns the CPU and the bus and runs the instruction-boundary schedule:
/// one CPU step, then the timer, video and serial units are caught up by
/// exactly the cycles that step cost.
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    /// A fault raised outside the CPU; once set, every step returns it.
    fault: Option<Error>,
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoy {
    /// A machine in the post-boot state with no cartridge inserted.
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(true),
            fault: None,
        }
    }

    pub fn with_config(config: GameBoyConfig) -> Result<Self> {
        let GameBoyConfig {
            boot_rom,
            randomize_ram,
        } = config;

        let (cpu, bus) = match boot_rom {
            Some(image) => (
                Cpu::power_on(),
                GameBoyBus::with_boot_rom(&image, randomize_ram)?,
            ),
            None => (Cpu::new(), GameBoyBus::new(randomize_ram)),
        };
        Ok(Self {
            cpu,
            bus,
            fault: None,
        })
    }

    /// Parse `rom` and insert it. Fails for unknown mapper types.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        let cartridge = Cartridge::from_rom(rom)?;
        self.insert_cartridge(cartridge);
        Ok(())
    }

    pub fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.bus.load_cartridge(cartridge);
    }

    /// Run one CPU step (an instruction, an interrupt dispatch or an idle
    /// HALT quantum) and catch the peripherals up. Returns the T-cycles
    /// consumed.
    pub fn step(&mut self) -> Result<u32> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        let cycles = self.cpu.step(&mut self.bus)?;
        self.bus.catch_up(cycles);

        if self.cpu.halted() && !self.bus.interrupts.pending().is_empty() {
            self.cpu.wake();
        }

        if let Some(fault) = self.bus.take_fault() {
            self.fault = Some(fault.clone());
            return Err(fault);
        }
        Ok(cycles)
    }

    /// Run until the next VBlank entry. With the display off, stop after
    /// one frame's worth of cycles instead. Returns the cycles consumed.
    pub fn step_frame(&mut self) -> Result<u32> {
        self.bus.ppu.take_frame_ready();
        let mut elapsed = 0u32;
        loop {
            elapsed += self.step()?;
            if self.bus.ppu.take_frame_ready() {
                return Ok(elapsed);
            }
            if !self.bus.ppu.lcd_enabled() && elapsed >= CYCLES_PER_FRAME {
                return Ok(elapsed);
            }
        }
    }

    pub fn run_frames(&mut self, frames: u32) -> Result<()> {
        for _ in 0..frames {
            self.step_frame()?;
        }
        Ok(())
    }

    /// Report a button edge from the host.
    pub fn set_button_state(&mut self, button: Button, pressed: bool) {
        self.bus
            .joypad
            .set_button_state(button, pressed, &mut self.bus.interrupts);
    }

    /// Same as [`GameBoy::set_button_state`] for hosts that number their
    /// inputs 0-7 in [`Button`] order. Returns false for any other index.
    pub fn set_button_index(&mut self, index: u8, pressed: bool) -> bool {
        match Button::from_index(index) {
            Some(button) => {
                self.set_button_state(button, pressed);
                true
            }
            None => {
                log::warn!("GB joypad: no button at index {index}");
                false
            }
        }
    }

    /// Plug a device into the link port, replacing the previous one.
    pub fn attach_link_partner(&mut self, partner: impl LinkPartner + 'static) {
        self.bus.serial.attach(Box::new(partner));
    }

    /// Every byte sent over the link port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.serial.output
    }

    /// The most recently drawn frame.
    pub fn framebuffer(&self) -> &Framebuffer {
        self.bus.ppu.framebuffer()
    }

    /// VBlank entries since power-on.
    pub fn frame_count(&self) -> u64 {
        self.bus.ppu.frame_count()
    }

    pub fn boot_rom_active(&self) -> bool {
        self.bus.boot_rom_active()
    }
}
