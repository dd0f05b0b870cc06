use super::GameBoyBus;

const OAM_LEN: u16 = 0xA0;

impl GameBoyBus {
    /// OAM DMA from `page`00-`page`9F. The copy completes immediately and is
    /// not subject to the PPU's OAM lockout.
    pub(super) fn oam_dma(&mut self, page: u8) {
        log::debug!("GB DMA: OAM <- {page:02X}00");
        let base = u16::from(page) << 8;
        for i in 0..OAM_LEN {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.ppu.dma_write_oam(usize::from(i), byte);
        }
    }
}
