use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    pub(super) fn exec_alu_reg<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu_op(opcode >> 3, value);
        if src == 6 {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_alu_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC6);
        let value = self.fetch8(bus);
        self.alu_op(opcode >> 3, value);
        8
    }

    /// RLCA/RRCA/RLA/RRA: same shifter as the CB forms, but Z is always 0.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        let (result, carry) = self.shift_op(opcode >> 3, self.regs.a);
        self.regs.a = result;
        self.set_flags(false, false, false, carry);
        4
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));
        let value = self.regs.pair(opcode >> 4);
        self.alu_add_hl(value);
        8
    }

    pub(super) fn exec_add_sp_e8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        self.regs.sp = self.alu_add_sp_offset(self.regs.sp, offset);
        16
    }

    pub(super) fn exec_ld_hl_sp_e8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        let value = self.alu_add_sp_offset(self.regs.sp, offset);
        self.regs.set_hl(value);
        12
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        let zero = self.get_flag(Flag::Z);
        self.set_flags(zero, false, false, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let zero = self.get_flag(Flag::Z);
        let carry = self.get_flag(Flag::C);
        self.set_flags(zero, false, false, !carry);
        4
    }
}
