use super::*;
use crate::machine::interrupts::InterruptController;

const LCDC_BASE: u8 = 0x91; // display on, 0x8000 tiles, BG on

fn ppu_with(lcdc: u8) -> (Ppu, InterruptController) {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    ppu.bgp = 0xE4;
    ppu.obp0 = 0xE4;
    ppu.obp1 = 0xE4;
    ppu.write_register(0xFF40, lcdc, &mut irq);
    (ppu, irq)
}

/// Fill tile `tile` (0x8000 addressing) with one colour number.
fn solid_tile(ppu: &mut Ppu, tile: u8, color: u8) {
    let low = if color & 1 != 0 { 0xFF } else { 0x00 };
    let high = if color & 2 != 0 { 0xFF } else { 0x00 };
    let base = usize::from(tile) * 16;
    for row in 0..8 {
        ppu.vram[base + row * 2] = low;
        ppu.vram[base + row * 2 + 1] = high;
    }
}

fn set_sprite(ppu: &mut Ppu, index: usize, y: u8, x: u8, tile: u8, attrs: u8) {
    ppu.oam[index * 4..index * 4 + 4].copy_from_slice(&[y, x, tile, attrs]);
}

/// Dots spent in mode 3 on the current line, starting at the top of mode 2.
fn measure_transfer(ppu: &mut Ppu, irq: &mut InterruptController) -> u32 {
    ppu.advance(u32::from(OAM_SCAN_DOTS), irq);
    assert_eq!(ppu.mode(), Mode::PixelTransfer);
    let mut dots = 0;
    while ppu.mode() == Mode::PixelTransfer {
        ppu.advance(1, irq);
        dots += 1;
    }
    dots
}

#[test]
fn oam_scan_lasts_exactly_80_dots() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    assert_eq!(ppu.mode(), Mode::OamScan);
    ppu.advance(79, &mut irq);
    assert_eq!(ppu.mode(), Mode::OamScan);
    ppu.advance(1, &mut irq);
    assert_eq!(ppu.mode(), Mode::PixelTransfer);
}

#[test]
fn pixel_transfer_grows_with_fine_scroll() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    assert_eq!(measure_transfer(&mut ppu, &mut irq), 166);

    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.scx = 3;
    assert_eq!(measure_transfer(&mut ppu, &mut irq), 169);
}

#[test]
fn sprites_stretch_mode3_but_not_the_line() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    for i in 0..10 {
        set_sprite(&mut ppu, i, 16, 8 + i as u8 * 16, 0, 0);
    }
    assert!(measure_transfer(&mut ppu, &mut irq) > 166);

    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    for i in 0..10 {
        set_sprite(&mut ppu, i, 16, 8 + i as u8 * 16, 0, 0);
    }
    ppu.advance(455, &mut irq);
    assert_eq!(ppu.ly(), 0);
    ppu.advance(1, &mut irq);
    assert_eq!(ppu.ly(), 1);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn frame_is_70224_dots_with_one_vblank() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.advance(144 * 456 - 1, &mut irq);
    assert_eq!(ppu.frame_count(), 0);
    assert!(!irq.requested().contains(Interrupt::VBLANK));

    ppu.advance(1, &mut irq);
    assert_eq!(ppu.mode(), Mode::VBlank);
    assert_eq!(ppu.frame_count(), 1);
    assert!(irq.requested().contains(Interrupt::VBLANK));
    assert!(ppu.take_frame_ready());
    assert!(!ppu.take_frame_ready());

    ppu.advance(70_224 - 1, &mut irq);
    assert_eq!(ppu.frame_count(), 1);
    ppu.advance(1, &mut irq);
    assert_eq!(ppu.frame_count(), 2);
}

#[test]
fn ly_reads_zero_during_line_153() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.advance(152 * 456, &mut irq);
    assert_eq!(ppu.read_register(0xFF44), 152);
    ppu.advance(456, &mut irq);
    assert_eq!(ppu.line, 153);
    assert_eq!(ppu.read_register(0xFF44), 0);
    assert_eq!(ppu.mode(), Mode::VBlank);
    ppu.advance(456, &mut irq);
    assert_eq!(ppu.read_register(0xFF44), 0);
    assert_eq!(ppu.mode(), Mode::OamScan);
}

#[test]
fn ly_ignores_writes() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.advance(3 * 456, &mut irq);
    ppu.write_register(0xFF44, 0x20, &mut irq);
    assert_eq!(ppu.read_register(0xFF44), 3);
}

#[test]
fn stat_interrupt_fires_on_rising_edge_only() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    ppu.write_register(0xFF45, 0, &mut irq);
    ppu.write_register(0xFF41, 0x48, &mut irq);
    ppu.write_register(0xFF40, LCDC_BASE, &mut irq);
    // LY=LYC=0 raises the line as soon as the display starts.
    assert!(irq.requested().contains(Interrupt::STAT));
    irq.write_if(0);

    // HBlank on line 0 while the line is already high: no new edge.
    ppu.advance(456, &mut irq);
    assert!(!irq.requested().contains(Interrupt::STAT));

    // Line 1: coincidence gone, the HBlank source produces a fresh edge.
    ppu.advance(80 + 166, &mut irq);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert!(irq.requested().contains(Interrupt::STAT));
}

#[test]
fn lyc_match_sets_coincidence_flag() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.write_register(0xFF45, 5, &mut irq);
    ppu.write_register(0xFF41, 0x40, &mut irq);
    irq.write_if(0);
    ppu.advance(5 * 456 - 1, &mut irq);
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0);
    ppu.advance(1, &mut irq);
    assert_eq!(ppu.read_register(0xFF41) & 0x07, 0x04 | Mode::OamScan as u8);
    assert!(irq.requested().contains(Interrupt::STAT));
}

#[test]
fn stat_write_keeps_mode_and_coincidence_bits() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.write_register(0xFF41, 0xFF, &mut irq);
    assert_eq!(ppu.read_register(0xFF41), 0x80 | 0x78 | 0x04 | 0x02);
}

#[test]
fn display_off_parks_at_line_zero() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.advance(10 * 456 + 100, &mut irq);
    ppu.write_register(0xFF40, 0x11, &mut irq);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.read_register(0xFF41) & 0x03, 0);

    ppu.advance(100_000, &mut irq);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.frame_count(), 0);

    ppu.write_register(0xFF40, LCDC_BASE, &mut irq);
    assert_eq!(ppu.mode(), Mode::OamScan);
    ppu.advance(456, &mut irq);
    assert_eq!(ppu.ly(), 1);
}

#[test]
fn vram_and_oam_are_gated_by_mode() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    ppu.vram[0] = 0x42;
    ppu.oam[0] = 0x24;

    assert_eq!(ppu.read_oam(0xFE00), 0xFF);
    assert_eq!(ppu.read_vram(0x8000), 0x42);

    ppu.advance(80, &mut irq);
    assert_eq!(ppu.read_vram(0x8000), 0xFF);
    ppu.write_vram(0x8000, 0x99);
    ppu.write_oam(0xFE00, 0x99);

    ppu.advance(200, &mut irq);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(ppu.read_vram(0x8000), 0x42);
    assert_eq!(ppu.read_oam(0xFE00), 0x24);

    ppu.dma_write_oam(0, 0x11);
    assert_eq!(ppu.read_oam(0xFE00), 0x11);
}

#[test]
fn background_uses_palette() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    solid_tile(&mut ppu, 0, 1);
    ppu.advance(456, &mut irq);
    assert!(ppu.framebuffer().row(0).iter().all(|&shade| shade == 1));

    ppu.bgp = 0x00;
    ppu.advance(456, &mut irq);
    assert!(ppu.framebuffer().row(1).iter().all(|&shade| shade == 0));
}

#[test]
fn signed_tile_addressing() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE & !0x10);
    // Tile 0 in 0x8800 mode lives at 0x9000.
    for row in 0..8 {
        ppu.vram[0x1000 + row * 2 + 1] = 0xFF;
    }
    ppu.advance(456, &mut irq);
    assert!(ppu.framebuffer().row(0).iter().all(|&shade| shade == 2));
}

#[test]
fn fine_scroll_drops_leading_pixels() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    solid_tile(&mut ppu, 1, 3);
    ppu.vram[0x1800] = 1;
    ppu.scx = 3;
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(&row[..5], &[3, 3, 3, 3, 3]);
    assert_eq!(row[5], 0);
}

#[test]
fn coarse_scroll_wraps_the_map() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    solid_tile(&mut ppu, 1, 2);
    ppu.vram[0x1800] = 1;
    ppu.scx = 31 * 8;
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(row[7], 0);
    assert_eq!(&row[8..16], &[2; 8]);
}

#[test]
fn window_covers_right_side() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x20 | 0x40);
    solid_tile(&mut ppu, 2, 2);
    for column in 0..32 {
        ppu.vram[0x1C00 + column] = 2;
    }
    ppu.wy = 0;
    ppu.wx = 7 + 80;
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert!(row[..80].iter().all(|&shade| shade == 0));
    assert!(row[80..].iter().all(|&shade| shade == 2));
    assert_eq!(ppu.window_line, Some(0));
}

#[test]
fn window_line_counts_only_drawn_lines() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x20);
    // Tile 0 rows: colour 2, colour 1, colour 3, ...
    ppu.vram[0] = 0x00;
    ppu.vram[1] = 0xFF;
    ppu.vram[2] = 0xFF;
    ppu.vram[3] = 0x00;
    ppu.vram[4] = 0xFF;
    ppu.vram[5] = 0xFF;
    ppu.wx = 7;
    ppu.wy = 0;

    ppu.advance(456, &mut irq);
    ppu.write_register(0xFF40, LCDC_BASE, &mut irq);
    ppu.advance(456, &mut irq);
    ppu.write_register(0xFF40, LCDC_BASE | 0x20, &mut irq);
    ppu.advance(456, &mut irq);

    assert_eq!(ppu.framebuffer().pixel(0, 0), 2);
    // Line 2 draws window row 1, not 2.
    assert_eq!(ppu.framebuffer().pixel(0, 2), 1);
    assert_eq!(ppu.window_line, Some(1));
}

#[test]
fn sprite_draws_over_background() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    solid_tile(&mut ppu, 3, 3);
    set_sprite(&mut ppu, 0, 16, 8 + 10, 3, 0);
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(row[9], 0);
    assert_eq!(&row[10..18], &[3; 8]);
    assert_eq!(row[18], 0);
}

#[test]
fn sprite_clipped_at_left_edge() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    solid_tile(&mut ppu, 3, 3);
    set_sprite(&mut ppu, 0, 16, 4, 3, 0);
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(&row[..4], &[3; 4]);
    assert_eq!(row[4], 0);
}

#[test]
fn hidden_objects_are_not_drawn() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    solid_tile(&mut ppu, 3, 3);
    set_sprite(&mut ppu, 0, 16, 8, 3, 0);
    ppu.advance(456, &mut irq);
    assert!(ppu.framebuffer().row(0).iter().all(|&shade| shade == 0));
}

#[test]
fn behind_bg_sprite_shows_only_over_colour_zero() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    solid_tile(&mut ppu, 1, 1);
    solid_tile(&mut ppu, 3, 3);
    // First BG tile is colour 1, the rest colour 0.
    ppu.vram[0x1800] = 1;
    set_sprite(&mut ppu, 0, 16, 8 + 4, 3, 0x80);
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(&row[4..8], &[1; 4]);
    assert_eq!(&row[8..12], &[3; 4]);
}

/// Tile 3 with only the leftmost pixel of each row opaque (colour 3).
fn left_pixel_tile(ppu: &mut Ppu) {
    for row in 0..8 {
        ppu.vram[0x30 + row * 2] = 0x80;
        ppu.vram[0x30 + row * 2 + 1] = 0x80;
    }
}

#[test]
fn x_flip_mirrors_the_row() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    left_pixel_tile(&mut ppu);
    set_sprite(&mut ppu, 0, 16, 8, 3, 0x20);
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(row[0], 0);
    assert_eq!(row[7], 3);
}

#[test]
fn palette_bit_selects_obp1() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    ppu.obp1 = 0x90;
    left_pixel_tile(&mut ppu);
    set_sprite(&mut ppu, 0, 16, 8, 3, 0x10);
    ppu.advance(456, &mut irq);
    assert_eq!(ppu.framebuffer().pixel(0, 0), 2);
}

#[test]
fn lower_x_sprite_wins_overlap() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE | 0x02);
    solid_tile(&mut ppu, 1, 1);
    solid_tile(&mut ppu, 2, 2);
    // Listed second in OAM but further left.
    set_sprite(&mut ppu, 0, 16, 8 + 14, 2, 0);
    set_sprite(&mut ppu, 1, 16, 8 + 10, 1, 0);
    ppu.advance(456, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(&row[10..18], &[1; 8]);
    assert_eq!(&row[18..22], &[2; 4]);
}

#[test]
fn palette_is_sampled_as_pixels_leave_the_fifo() {
    let (mut ppu, mut irq) = ppu_with(LCDC_BASE);
    solid_tile(&mut ppu, 0, 1);
    ppu.advance(80 + 86, &mut irq);
    assert_eq!(ppu.lx, 80);
    ppu.write_register(0xFF47, 0x00, &mut irq);
    ppu.advance(456 - 166, &mut irq);
    let row = ppu.framebuffer().row(0);
    assert_eq!(row[79], 1);
    assert_eq!(row[80], 0);
}

#[test]
fn disabled_background_is_blank() {
    let (mut ppu, mut irq) = ppu_with(0x90);
    solid_tile(&mut ppu, 0, 3);
    ppu.bgp = 0xFF;
    ppu.advance(456, &mut irq);
    assert!(ppu.framebuffer().row(0).iter().all(|&shade| shade == 0));
}
