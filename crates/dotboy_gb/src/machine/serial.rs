//! SB/SC shift register and the link-cable seam.
use super::interrupts::InterruptController;
use crate::cpu::Interrupt;
use crate::error::Error;

/// Free-running counter bit that clocks transfers on the internal clock.
const CLOCK_BIT: u32 = 12;

/// The other end of the link cable.
///
/// Called once per shifted bit with the outgoing bit; returns the bit
/// shifted in.
pub trait LinkPartner {
    fn exchange_bit(&mut self, bit: bool) -> bool;
}

/// No cable attached: the input line floats high, so every received
/// byte is 0xFF.
#[derive(Clone, Copy, Debug, Default)]
pub struct Disconnected;

impl LinkPartner for Disconnected {
    fn exchange_bit(&mut self, _bit: bool) -> bool {
        true
    }
}

pub(crate) struct Serial {
    sb: u8,
    sc: u8,
    counter: u16,
    /// Bits shifted so far in the current transfer.
    bits: u8,
    partner: Box<dyn LinkPartner>,
    /// Every byte that started a transfer, in order.
    pub(crate) output: Vec<u8>,
}

impl Serial {
    pub(crate) fn new() -> Self {
        Self {
            sb: 0,
            sc: 0,
            counter: 0,
            bits: 0,
            partner: Box::new(Disconnected),
            output: Vec::new(),
        }
    }

    pub(crate) fn init_dmg(&mut self) {
        self.sb = 0x00;
        self.sc = 0x7E;
    }

    pub(crate) fn attach(&mut self, partner: Box<dyn LinkPartner>) {
        self.partner = partner;
    }

    #[inline]
    fn transferring(&self) -> bool {
        self.sc & 0x80 != 0
    }

    pub(crate) fn read_sb(&self) -> u8 {
        self.sb
    }

    pub(crate) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    pub(crate) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }

    /// Starting a transfer with bit 0 clear selects the external clock,
    /// which is not emulated.
    pub(crate) fn write_sc(&mut self, value: u8) -> Result<(), Error> {
        self.sc = value & 0x81;
        if !self.transferring() {
            return Ok(());
        }
        if value & 0x01 == 0 {
            self.sc &= !0x80;
            return Err(Error::ExternalSerialClock);
        }
        self.bits = 0;
        self.output.push(self.sb);
        log::trace!("GB serial: transfer start SB=0x{:02X}", self.sb);
        Ok(())
    }

    /// Advance by `cycles`, shifting one bit per rising edge of the clock.
    pub(crate) fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        for _ in 0..cycles {
            let before = (self.counter >> CLOCK_BIT) & 1;
            self.counter = self.counter.wrapping_add(1);
            let after = (self.counter >> CLOCK_BIT) & 1;
            if before == 0 && after == 1 && self.transferring() {
                self.shift(interrupts);
            }
        }
    }

    fn shift(&mut self, interrupts: &mut InterruptController) {
        let out = self.sb & 0x80 != 0;
        let incoming = self.partner.exchange_bit(out);
        self.sb = (self.sb << 1) | u8::from(incoming);
        self.bits += 1;

        if self.bits == 8 {
            self.bits = 0;
            self.sc &= !0x80;
            interrupts.request(Interrupt::SERIAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records outgoing bits and answers with a fixed byte, MSB first.
    struct Echo {
        reply: u8,
        sent: Rc<RefCell<Vec<bool>>>,
    }

    impl LinkPartner for Echo {
        fn exchange_bit(&mut self, bit: bool) -> bool {
            self.sent.borrow_mut().push(bit);
            let reply = self.reply & 0x80 != 0;
            self.reply <<= 1;
            reply
        }
    }

    const BIT_PERIOD: u32 = 1 << (CLOCK_BIT + 1);

    #[test]
    fn internal_clock_transfer_exchanges_eight_bits() {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let mut serial = Serial::new();
        serial.attach(Box::new(Echo {
            reply: 0x3C,
            sent: Rc::clone(&sent),
        }));
        let mut irq = InterruptController::default();

        serial.write_sb(0xA5);
        serial.write_sc(0x81).unwrap();
        assert_eq!(serial.read_sc() & 0x80, 0x80);

        serial.advance(BIT_PERIOD * 8, &mut irq);

        assert_eq!(serial.read_sb(), 0x3C);
        assert_eq!(serial.read_sc() & 0x80, 0);
        assert!(irq.requested().contains(Interrupt::SERIAL));
        assert_eq!(
            *sent.borrow(),
            vec![true, false, true, false, false, true, false, true]
        );
        assert_eq!(serial.output, vec![0xA5]);
    }

    #[test]
    fn transfer_is_not_complete_after_seven_bits() {
        let mut serial = Serial::new();
        let mut irq = InterruptController::default();
        serial.write_sb(0x01);
        serial.write_sc(0x81).unwrap();

        serial.advance(BIT_PERIOD * 7, &mut irq);
        assert_eq!(serial.read_sc() & 0x80, 0x80);
        assert!(irq.requested().is_empty());
    }

    #[test]
    fn disconnected_cable_receives_ff() {
        let mut serial = Serial::new();
        let mut irq = InterruptController::default();
        serial.write_sb(0x00);
        serial.write_sc(0x81).unwrap();
        serial.advance(BIT_PERIOD * 8, &mut irq);
        assert_eq!(serial.read_sb(), 0xFF);
    }

    #[test]
    fn idle_port_never_shifts() {
        let mut serial = Serial::new();
        let mut irq = InterruptController::default();
        serial.write_sb(0x42);
        serial.advance(BIT_PERIOD * 16, &mut irq);
        assert_eq!(serial.read_sb(), 0x42);
        assert!(irq.requested().is_empty());
    }

    #[test]
    fn external_clock_transfer_is_fatal() {
        let mut serial = Serial::new();
        assert_eq!(serial.write_sc(0x80), Err(Error::ExternalSerialClock));
        assert_eq!(serial.read_sc() & 0x80, 0);
        // Selecting the external clock without starting is fine.
        assert_eq!(serial.write_sc(0x00), Ok(()));
    }
}
