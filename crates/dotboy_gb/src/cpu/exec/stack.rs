use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// PUSH/POP use AF in place of SP for `rp` = 3.
    fn stack_pair(&self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            3 => self.regs.af(),
            rp => self.regs.pair(rp),
        }
    }

    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));
        let value = self.stack_pair(opcode);
        self.push_u16(bus, value);
        16
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));
        let value = self.pop_u16(bus);
        match (opcode >> 4) & 0x03 {
            3 => self.regs.set_af(value),
            rp => self.regs.set_pair(rp, value),
        }
        12
    }
}
