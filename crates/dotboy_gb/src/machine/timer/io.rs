use super::Timer;

impl Timer {
    pub(crate) fn read_div(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    /// Any write clears the whole counter, which can itself produce a
    /// falling edge on the timer input.
    pub(crate) fn write_div(&mut self) {
        self.counter = 0;
        self.update_input();
    }

    pub(crate) fn read_tima(&self) -> u8 {
        self.tima
    }

    /// A write while a reload is pending cancels the reload.
    pub(crate) fn write_tima(&mut self, value: u8) {
        if self.reload_in.take().is_some() {
            log::trace!("GB timer: TIMA write 0x{value:02X} cancelled pending reload");
        }
        self.tima = value;
    }

    pub(crate) fn read_tma(&self) -> u8 {
        self.tma
    }

    pub(crate) fn write_tma(&mut self, value: u8) {
        self.tma = value;
    }

    pub(crate) fn read_tac(&self) -> u8 {
        self.tac | 0xF8
    }

    /// Switching rate or disabling while the input is high counts as a
    /// falling edge.
    pub(crate) fn write_tac(&mut self, value: u8) {
        self.tac = value & 0x07;
        self.update_input();
    }
}
