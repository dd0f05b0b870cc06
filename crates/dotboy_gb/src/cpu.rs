mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;


pub use bus::{Bus, IE_ADDR, IF_ADDR};
pub use step::HALT_IDLE_CYCLES;
pub use interrupts::Interrupt;
pub use regs::{Flag, Registers};

use crate::error::Error;

/// Sharp LR35902 instruction engine.
///
/// The CPU owns nothing but its register file and a handful of control
/// latches; all memory traffic goes through a [`Bus`] passed into
/// [`Cpu::step`].
pub struct Cpu {
    pub regs: Registers,
    ime: bool,
    halted: bool,
    halt_bug: bool,
    /// EI executed; IME arms after the current instruction.
    ime_enable_pending: bool,
    /// IME turns on after the next instruction completes.
    ime_enable_delay: bool,
    cycles: u64,
    fault: Option<Error>,
}

impl Cpu {
    /// Interrupt master enable.
    #[inline]
    pub fn ime(&self) -> bool {
        self.ime
    }

    #[inline]
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Total T-cycles charged since reset.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The fatal condition that stopped the CPU, if any.
    pub fn fault(&self) -> Option<&Error> {
        self.fault.as_ref()
    }

    /// Leave HALT because an enabled interrupt line was requested.
    #[inline]
    pub(crate) fn wake(&mut self) {
        self.halted = false;
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.f() & flag.mask() != 0
    }

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: Flag, on: bool) {
        let f = self.regs.f();
        if on {
            self.regs.set_f(f | flag.mask());
        } else {
            self.regs.set_f(f & !flag.mask());
        }
    }

    /// Write all four flags at once.
    #[inline]
    pub(crate) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        let f = (u8::from(z) << Flag::Z as u8)
            | (u8::from(n) << Flag::N as u8)
            | (u8::from(h) << Flag::H as u8)
            | (u8::from(c) << Flag::C as u8);
        self.regs.set_f(f);
    }
}
