use super::{Bus, Cpu};
use crate::error::Result;

/// Cost of one idle iteration while halted.
pub const HALT_IDLE_CYCLES: u32 = 4;

impl Cpu {
    /// Execute one instruction, or dispatch one interrupt, and return the
    /// T-cycles it cost.
    ///
    /// The same amount is added to [`Cpu::cycles`]. A fatal condition is
    /// latched: every later call returns the same error.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        let cycles = self.step_instruction(bus)?;
        self.cycles += u64::from(cycles);
        Ok(cycles)
    }

    fn step_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let pending = self.pending_interrupts(bus);

        if self.halted {
            if pending.is_empty() {
                return Ok(HALT_IDLE_CYCLES);
            }
            self.halted = false;
        }

        if self.ime {
            if let Some(cycles) = self.dispatch_interrupt(bus, pending) {
                return Ok(cycles);
            }
        }

        let addr = self.regs.pc;
        let opcode = self.fetch8(bus);
        let cycles = self.exec_opcode(bus, opcode, addr)?;
        self.apply_ime_delay();
        Ok(cycles)
    }
}
