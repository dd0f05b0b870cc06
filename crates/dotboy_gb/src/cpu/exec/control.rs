use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        debug_assert!(opcode & 0xC7 == 0xC7);
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = u16::from(opcode & 0x38);
        16
    }

    /// RETI re-enables interrupts with no extra delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
        16
    }
}
