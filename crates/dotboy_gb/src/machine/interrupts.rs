use crate::cpu::Interrupt;

/// IF and IE.
///
/// Peripherals only ever raise lines; the CPU clears them when it
/// dispatches, through its normal IF write.
#[derive(Clone, Debug, Default)]
pub(crate) struct InterruptController {
    requested: Interrupt,
    /// IE keeps all eight bits as written; only the low five mean anything.
    enabled: u8,
}

impl InterruptController {
    #[inline]
    pub(crate) fn request(&mut self, line: Interrupt) {
        self.requested |= line;
    }

    /// Requested and enabled lines.
    #[inline]
    pub(crate) fn pending(&self) -> Interrupt {
        self.requested & Interrupt::from_bits_truncate(self.enabled)
    }

    #[cfg(test)]
    pub(crate) fn requested(&self) -> Interrupt {
        self.requested
    }

    /// IF reads the three unused bits as 1.
    pub(crate) fn read_if(&self) -> u8 {
        self.requested.bits() | 0xE0
    }

    pub(crate) fn write_if(&mut self, value: u8) {
        self.requested = Interrupt::from_bits_truncate(value);
    }

    pub(crate) fn read_ie(&self) -> u8 {
        self.enabled
    }

    pub(crate) fn write_ie(&mut self, value: u8) {
        self.enabled = value;
    }
}
