use bitflags::bitflags;

use super::{Bus, Cpu, IE_ADDR, IF_ADDR};

bitflags! {
    /// The five interrupt lines, in IF/IE bit order.
    ///
    /// Lower bits have higher priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

impl Interrupt {
    /// The highest-priority line in this set.
    pub fn highest(self) -> Option<Interrupt> {
        if self.is_empty() {
            None
        } else {
            Some(Interrupt::from_bits_retain(1 << self.bits().trailing_zeros()))
        }
    }

    /// Handler address for a single line: 0x40, 0x48, 0x50, 0x58 or 0x60.
    pub fn vector(self) -> u16 {
        0x0040 + 8 * self.bits().trailing_zeros() as u16
    }
}

/// T-cycles charged for an interrupt dispatch (5 M-cycles).
pub(super) const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Lines both requested in IF and enabled in IE.
    pub(super) fn pending_interrupts<B: Bus>(&mut self, bus: &mut B) -> Interrupt {
        let ie = bus.read8(IE_ADDR);
        let iflags = bus.read8(IF_ADDR);
        Interrupt::from_bits_truncate(ie & iflags)
    }

    /// Jump to the handler of the highest-priority line in `pending`.
    ///
    /// Returns `None` when nothing is pending.
    pub(super) fn dispatch_interrupt<B: Bus>(&mut self, bus: &mut B, pending: Interrupt) -> Option<u32> {
        let line = pending.highest()?;

        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;

        let iflags = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, iflags & !line.bits());

        // A HALT bug left pending returns to the HALT itself.
        let mut pc = self.regs.pc;
        if std::mem::take(&mut self.halt_bug) {
            pc = pc.wrapping_sub(1);
        }
        self.push_u16(bus, pc);
        self.regs.pc = line.vector();

        log::debug!(
            "GB CPU interrupt: line={:?} vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            line,
            self.regs.pc,
            pc,
            self.regs.sp,
        );
        Some(DISPATCH_CYCLES)
    }

    /// Advance the EI latch by one completed instruction.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
