use super::{Bus, Cpu, Flag};

/// Branch condition encoded in bits 3-4 of conditional control-flow opcodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Condition {
    Always,
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    #[inline]
    pub(super) fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x03 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NotCarry,
            _ => Condition::Carry,
        }
    }
}

impl Cpu {
    #[inline]
    pub(super) fn condition_met(&self, cond: Condition) -> bool {
        match cond {
            Condition::Always => true,
            Condition::NotZero => !self.get_flag(Flag::Z),
            Condition::Zero => self.get_flag(Flag::Z),
            Condition::NotCarry => !self.get_flag(Flag::C),
            Condition::Carry => self.get_flag(Flag::C),
        }
    }

    /// Operand `index` in opcode register order: B C D E H L (HL) A.
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => bus.read8(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => bus.write8(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The byte after a bugged HALT is read twice.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// High byte goes to SP-1, low byte to SP-2.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    /// JR cc,e8: 12 cycles taken, 8 not taken.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, cond: Condition) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if self.condition_met(cond) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
            12
        } else {
            8
        }
    }

    /// JP cc,a16: 16 cycles taken, 12 not taken.
    pub(super) fn jp<B: Bus>(&mut self, bus: &mut B, cond: Condition) -> u32 {
        let addr = self.fetch16(bus);
        if self.condition_met(cond) {
            self.regs.pc = addr;
            16
        } else {
            12
        }
    }

    /// CALL cc,a16: 24 cycles taken, 12 not taken.
    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, cond: Condition) -> u32 {
        let addr = self.fetch16(bus);
        if self.condition_met(cond) {
            let ret = self.regs.pc;
            self.push_u16(bus, ret);
            self.regs.pc = addr;
            24
        } else {
            12
        }
    }

    /// RET cc: 20 cycles taken, 8 not taken. Unconditional RET is 16.
    pub(super) fn ret<B: Bus>(&mut self, bus: &mut B, cond: Condition) -> u32 {
        if cond == Condition::Always {
            self.regs.pc = self.pop_u16(bus);
            return 16;
        }
        if self.condition_met(cond) {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }
}
