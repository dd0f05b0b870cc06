use super::GameBoyBus;

/// Fixed seed so power-on RAM contents repeat from run to run.
const RAM_SEED: u32 = 0xC0DE_1234;

impl GameBoyBus {
    /// IO state the DMG boot ROM leaves behind when it jumps to 0x0100.
    pub(super) fn apply_dmg_post_boot_io(&mut self) {
        self.timer.init_dmg();
        self.serial.init_dmg();
        // The boot ROM exits during VBlank with the request still latched.
        self.interrupts.write_if(0x01);
        self.interrupts.write_ie(0x00);
        self.ppu.init_dmg(&mut self.interrupts);
    }

    /// Fill WRAM and HRAM with xorshift32 output. Real hardware powers up
    /// with garbage here; software must not rely on zeros.
    pub(super) fn randomize_internal_ram(&mut self) {
        let mut x = RAM_SEED;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            (x >> 24) as u8
        };
        for byte in self.wram.iter_mut() {
            *byte = next_byte();
        }
        for byte in self.hram.iter_mut() {
            *byte = next_byte();
        }
    }
}
