use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x01 | 0x11 | 0x21 | 0x31));
        let value = self.fetch16(bus);
        self.regs.set_pair(opcode >> 4, value);
        12
    }

    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0x06);
        let reg = (opcode >> 3) & 0x07;
        let value = self.fetch8(bus);
        self.write_reg8(bus, reg, value);
        if reg == 6 {
            12
        } else {
            8
        }
    }

    /// LD r,r' for 0x40-0x7F except 0x76 (HALT).
    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);
        if dst == 6 || src == 6 {
            8
        } else {
            4
        }
    }

    /// Address for the (BC) (DE) (HL+) (HL-) forms, applying the HL step.
    fn indirect_addr(&mut self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            _ => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_indirect_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x02 | 0x12 | 0x22 | 0x32));
        let addr = self.indirect_addr(opcode);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x0A | 0x1A | 0x2A | 0x3A));
        let addr = self.indirect_addr(opcode);
        self.regs.a = bus.read8(addr);
        8
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
        20
    }

    pub(super) fn exec_ldh_a8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xE0 | 0xF0));
        let addr = 0xFF00 | u16::from(self.fetch8(bus));
        if opcode == 0xE0 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        12
    }

    pub(super) fn exec_ldh_c<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xE2 | 0xF2));
        let addr = 0xFF00 | u16::from(self.regs.c);
        if opcode == 0xE2 {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        8
    }

    pub(super) fn exec_ld_a16_a<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xEA | 0xFA));
        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            bus.write8(addr, self.regs.a);
        } else {
            self.regs.a = bus.read8(addr);
        }
        16
    }

    pub(super) fn exec_ld_sp_hl(&mut self) -> u32 {
        self.regs.sp = self.regs.hl();
        8
    }
}
