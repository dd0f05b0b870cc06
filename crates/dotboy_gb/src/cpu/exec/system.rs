use crate::cpu::{Bus, Cpu};
use crate::error::Error;

impl Cpu {
    /// HALT. With IME clear and an interrupt already pending the CPU
    /// does not halt and the following byte is fetched twice.
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.pending_interrupts(bus).is_empty() {
            if !self.ime {
                self.halt_bug = true;
            }
            return 4;
        }
        self.halted = true;
        4
    }

    pub(super) fn exec_di(&mut self) -> u32 {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        4
    }

    pub(super) fn exec_ei(&mut self) -> u32 {
        if !self.ime {
            self.ime_enable_pending = true;
        }
        4
    }

    pub(super) fn exec_stop(&mut self, addr: u16) -> Error {
        log::error!(
            "GB CPU stopped: STOP at PC=0x{addr:04X} (SP=0x{sp:04X} AF=0x{af:04X})",
            sp = self.regs.sp,
            af = self.regs.af(),
        );
        self.latch_fault(Error::Stopped { addr })
    }

    pub(super) fn exec_illegal(&mut self, opcode: u8, addr: u16) -> Error {
        log::error!(
            "GB CPU locked: illegal opcode 0x{opcode:02X} at PC=0x{addr:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
            sp = self.regs.sp,
            af = self.regs.af(),
            bc = self.regs.bc(),
            de = self.regs.de(),
            hl = self.regs.hl(),
        );
        self.latch_fault(Error::IllegalOpcode { addr, opcode })
    }

    fn latch_fault(&mut self, error: Error) -> Error {
        self.fault = Some(error.clone());
        error
    }
}
