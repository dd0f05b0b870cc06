//! Everything around the CPU: address decoding, peripherals and the
//! scheduler that keeps them in step.
mod bus;
mod cartridge;
mod gameboy;
mod interrupts;
mod joypad;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::{Cartridge, Mbc1, Mbc3, RomOnly};
pub use gameboy::GameBoy;
pub use joypad::Button;
pub use ppu::Framebuffer;
pub use serial::{Disconnected, LinkPartner};

pub use crate::cpu::Interrupt;
