//! DIV/TIMA/TMA/TAC.
//!
//! A 16-bit counter advances every T-cycle and DIV exposes its upper
//! byte. TAC picks one counter bit; that bit ANDed with the enable bit is
//! the timer input, and each falling edge of the input increments TIMA.
mod io;

use super::interrupts::InterruptController;
use crate::cpu::Interrupt;

/// Cycles between TIMA overflowing and the TMA reload plus interrupt.
const RELOAD_DELAY: u8 = 4;

pub(crate) struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    tac: u8,
    /// Last sampled timer input, for edge detection.
    input: bool,
    /// Cycles left until an overflowed TIMA is reloaded from TMA.
    reload_in: Option<u8>,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self {
            counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            input: false,
            reload_in: None,
        }
    }

    /// Counter value the DMG boot ROM leaves behind (DIV reads 0xAB).
    pub(crate) fn init_dmg(&mut self) {
        *self = Self::new();
        self.counter = 0xABCC;
    }

    /// Counter bit selected by TAC[1:0]: 00→9, 01→3, 10→5, 11→7.
    #[inline]
    fn selected_bit(&self) -> u32 {
        let mode = u32::from(self.tac.wrapping_sub(1) & 0x03);
        3 + 2 * mode
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    #[inline]
    fn sample_input(&self) -> bool {
        self.enabled() && (self.counter >> self.selected_bit()) & 1 != 0
    }

    /// Recompute the input and increment TIMA on a falling edge.
    fn update_input(&mut self) {
        let input = self.sample_input();
        if self.input && !input {
            self.increment_tima();
        }
        self.input = input;
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            self.reload_in = Some(RELOAD_DELAY);
        }
    }

    /// Advance one T-cycle.
    pub(crate) fn tick(&mut self, interrupts: &mut InterruptController) {
        if let Some(remaining) = self.reload_in {
            if remaining <= 1 {
                self.reload_in = None;
                self.tima = self.tma;
                interrupts.request(Interrupt::TIMER);
            } else {
                self.reload_in = Some(remaining - 1);
            }
        }

        self.counter = self.counter.wrapping_add(1);
        self.update_input();
    }

    pub(crate) fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        for _ in 0..cycles {
            self.tick(interrupts);
        }
    }
}
