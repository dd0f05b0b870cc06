use super::{Cpu, Flag};

/// 8-bit adder shared by the whole ADD/SUB family.
///
/// Returns the result byte plus carry out of bit 3 and bit 7.
#[inline]
fn adder(lhs: u8, rhs: u8, carry_in: bool) -> (u8, bool, bool) {
    let carry_in = u8::from(carry_in);
    let half = (lhs & 0x0F) + (rhs & 0x0F) + carry_in;
    let full = u16::from(lhs) + u16::from(rhs) + u16::from(carry_in);
    (full as u8, half > 0x0F, full > 0xFF)
}

impl Cpu {
    /// ADD (`use_carry == false`) or ADC on A.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let carry_in = use_carry && self.get_flag(Flag::C);
        let (result, half, carry) = adder(self.regs.a, value, carry_in);
        self.regs.a = result;
        self.set_flags(result == 0, false, half, carry);
    }

    /// A - value (- C) computed as A + !value + !borrow on the same adder.
    ///
    /// A missing carry out of the adder is a borrow, so H and C are the
    /// inverted adder carries. N is always set.
    fn subtract(&mut self, value: u8, use_carry: bool) -> u8 {
        let borrow_in = use_carry && self.get_flag(Flag::C);
        let (result, half, carry) = adder(self.regs.a, !value, !borrow_in);
        self.set_flags(result == 0, true, !half, !carry);
        result
    }

    /// SUB (`use_carry == false`) or SBC on A.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        self.regs.a = self.subtract(value, use_carry);
    }

    /// CP: flags of `A - value`, A unchanged.
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.subtract(value, false);
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_flags(self.regs.a == 0, false, true, false);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    /// Eight-way ALU selector used by opcodes 0x80-0xBF and the d8 forms.
    pub(super) fn alu_op(&mut self, op: u8, value: u8) {
        match op & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// BCD correction of A after an ADD/ADC or SUB/SBC.
    ///
    /// N is preserved, H is cleared and C only ever goes from 0 to 1.
    pub(super) fn alu_daa(&mut self) {
        let subtract = self.get_flag(Flag::N);
        let mut carry = self.get_flag(Flag::C);
        let a = self.regs.a;

        let mut correction = 0u8;
        if self.get_flag(Flag::H) || (!subtract && (a & 0x0F) > 0x09) {
            correction |= 0x06;
        }
        if carry || (!subtract && a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        let result = if subtract {
            a.wrapping_sub(correction)
        } else {
            a.wrapping_add(correction)
        };
        self.regs.a = result;
        self.set_flags(result == 0, subtract, false, carry);
    }

    /// INC r: Z N H updated, C preserved.
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, false, value & 0x0F == 0x0F, carry);
        result
    }

    /// DEC r: Z N H updated, C preserved.
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, true, value & 0x0F == 0x00, carry);
        result
    }

    /// ADD HL,rr: Z preserved, carries out of bits 11 and 15.
    pub(super) fn alu_add_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let zero = self.get_flag(Flag::Z);
        let half = (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF;
        let (result, carry) = hl.overflowing_add(value);
        self.set_flags(zero, false, half, carry);
        self.regs.set_hl(result);
    }

    /// `base + e8` for ADD SP,e8 and LD HL,SP+e8.
    ///
    /// Flags come from the unsigned low-byte addition; Z and N are cleared.
    pub(super) fn alu_add_sp_offset(&mut self, base: u16, offset: u8) -> u16 {
        let (_, half, carry) = adder(base as u8, offset, false);
        self.set_flags(false, false, half, carry);
        base.wrapping_add(offset as i8 as u16)
    }

    /// Rotate/shift selected by the `y` field of a CB opcode.
    ///
    /// Returns the result and the bit shifted out. Callers decide how Z
    /// is treated: CB forms compute it, the accumulator forms clear it.
    pub(super) fn shift_op(&self, op: u8, value: u8) -> (u8, bool) {
        let carry_in = u8::from(self.get_flag(Flag::C));
        let msb = value & 0x80 != 0;
        let lsb = value & 0x01 != 0;
        match op & 0x07 {
            0 => (value.rotate_left(1), msb),
            1 => (value.rotate_right(1), lsb),
            2 => ((value << 1) | carry_in, msb),
            3 => ((value >> 1) | (carry_in << 7), lsb),
            4 => (value << 1, msb),
            5 => ((value >> 1) | (value & 0x80), lsb),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, lsb),
        }
    }
}
