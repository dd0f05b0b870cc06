use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU in the state the DMG boot ROM leaves behind at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self::power_on();
        cpu.apply_dmg_boot_state();
        cpu
    }

    /// A CPU at power-on: all registers zero, PC at the boot ROM entry.
    pub fn power_on() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            cycles: 0,
            fault: None,
        }
    }

    /// Return to the post-boot state and forget any latched fault.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Register values handed to cartridge code by the DMG boot ROM
    /// (Pan Docs, "Power Up Sequence").
    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
        self.ime = false;
    }
}
