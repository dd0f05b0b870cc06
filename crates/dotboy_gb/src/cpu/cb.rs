use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute the instruction following a 0xCB prefix.
    ///
    /// Every one of the 256 entries is defined. Register forms take 8
    /// cycles; (HL) forms take 16, except BIT which only reads and takes 12.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let opcode = self.fetch8(bus);
        let x = opcode >> 6;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;
        let memory = z == 6;

        let value = self.read_reg8(bus, z);
        match x {
            0 => {
                let (result, carry) = self.shift_op(y, value);
                self.set_flags(result == 0, false, false, carry);
                self.write_reg8(bus, z, result);
            }
            1 => {
                let carry = self.get_flag(Flag::C);
                self.set_flags(value & (1 << y) == 0, false, true, carry);
                return if memory { 12 } else { 8 };
            }
            2 => self.write_reg8(bus, z, value & !(1 << y)),
            _ => self.write_reg8(bus, z, value | (1 << y)),
        }

        if memory {
            16
        } else {
            8
        }
    }
}
