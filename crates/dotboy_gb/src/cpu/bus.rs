/// Interrupt request register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// Everything the CPU can see of the machine: a flat 16-bit address space.
///
/// The CPU never advances other components itself; whoever drives
/// [`Cpu::step`](super::Cpu::step) reads [`Cpu::cycles`](super::Cpu::cycles)
/// afterwards and catches the rest of the machine up.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);
}
