use super::*;

/// `banks` 16 KiB banks, each filled with its own bank number.
fn banked_rom(kind: u8, banks: usize, ram_code: u8) -> Vec<u8> {
    let mut rom = Vec::with_capacity(banks * ROM_BANK_SIZE);
    for bank in 0..banks {
        rom.extend(std::iter::repeat(bank as u8).take(ROM_BANK_SIZE));
    }
    rom[0x0147] = kind;
    rom[0x0149] = ram_code;
    rom
}

#[test]
fn header_selects_mapper() {
    assert!(matches!(
        Cartridge::from_rom(&banked_rom(0x00, 2, 0)),
        Ok(Cartridge::RomOnly(_))
    ));
    assert!(matches!(
        Cartridge::from_rom(&banked_rom(0x03, 4, 2)),
        Ok(Cartridge::Mbc1(_))
    ));
    assert!(matches!(
        Cartridge::from_rom(&banked_rom(0x13, 4, 3)),
        Ok(Cartridge::Mbc3(_))
    ));
}

#[test]
fn unknown_mapper_is_rejected_at_load() {
    let rom = banked_rom(0x19, 4, 0); // MBC5
    assert_eq!(
        Cartridge::from_rom(&rom).err(),
        Some(Error::UnsupportedCartridge { kind: 0x19 })
    );
}

#[test]
fn truncated_image_is_rejected() {
    assert_eq!(
        Cartridge::from_rom(&[0u8; 0x100]).err(),
        Some(Error::RomTooSmall { len: 0x100 })
    );
}

#[test]
fn rom_only_ignores_writes_and_pads_short_images() {
    let mut rom = vec![0x11u8; HEADER_END];
    rom[0x0147] = 0x00;
    let mut cart = Cartridge::from_rom(&rom).unwrap();

    cart.write(0x2000, 0x01);
    assert_eq!(cart.read(0x0000), 0x11);
    assert_eq!(cart.read(0x4000), 0x00);
    assert_eq!(cart.ram_read(0x0000), 0xFF);
}

#[test]
fn mbc1_switches_upper_window() {
    let mut cart = Cartridge::from_rom(&banked_rom(0x01, 8, 0)).unwrap();

    assert_eq!(cart.read(0x0000), 0);
    assert_eq!(cart.read(0x4000), 1);

    cart.write(0x2000, 0x05);
    assert_eq!(cart.read(0x4000), 5);
    assert_eq!(cart.read(0x3FFF), 0);

    // Bank 0 is remapped to 1.
    cart.write(0x2000, 0x00);
    assert_eq!(cart.read(0x4000), 1);
}

#[test]
fn mbc1_ram_needs_enable() {
    let mut cart = Cartridge::from_rom(&banked_rom(0x03, 2, 0x02)).unwrap();

    cart.ram_write(0x0000, 0x42);
    assert_eq!(cart.ram_read(0x0000), 0xFF);

    cart.write(0x0000, 0x0A);
    cart.ram_write(0x0000, 0x42);
    assert_eq!(cart.ram_read(0x0000), 0x42);

    cart.write(0x0000, 0x00);
    assert_eq!(cart.ram_read(0x0000), 0xFF);
}

#[test]
fn mbc1_mode_one_banks_ram() {
    let mut cart = Cartridge::from_rom(&banked_rom(0x03, 2, 0x03)).unwrap();
    cart.write(0x0000, 0x0A);
    cart.write(0x6000, 0x01);

    cart.write(0x4000, 0x00);
    cart.ram_write(0x0010, 0xAA);
    cart.write(0x4000, 0x02);
    cart.ram_write(0x0010, 0xBB);

    cart.write(0x4000, 0x00);
    assert_eq!(cart.ram_read(0x0010), 0xAA);
    cart.write(0x4000, 0x02);
    assert_eq!(cart.ram_read(0x0010), 0xBB);
}

#[test]
fn mbc3_seven_bit_rom_bank_and_rtc_select() {
    let mut cart = Cartridge::from_rom(&banked_rom(0x13, 4, 0x03)).unwrap();

    cart.write(0x2000, 0x03);
    assert_eq!(cart.read(0x4000), 3);

    cart.write(0x0000, 0x0A);
    cart.write(0x4000, 0x01);
    cart.ram_write(0x0000, 0x5A);
    assert_eq!(cart.ram_read(0x0000), 0x5A);

    cart.write(0x4000, 0x08);
    assert_eq!(cart.ram_read(0x0000), 0xFF);
}
