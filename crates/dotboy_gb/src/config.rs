use typed_builder::TypedBuilder;

/// Machine construction options.
///
/// ```
/// use dotboy_gb::{GameBoy, GameBoyConfig};
///
/// let config = GameBoyConfig::builder().randomize_ram(false).build();
/// let gb = GameBoy::with_config(config).unwrap();
/// assert_eq!(gb.cpu.regs.pc, 0x0100);
/// ```
#[derive(Clone, Debug, TypedBuilder)]
pub struct GameBoyConfig {
    /// 256-byte boot image mapped over 0x0000-0x00FF until 0xFF50 is written.
    ///
    /// Without one the machine starts in the state the boot image leaves
    /// behind (PC=0x0100, LCD on, palettes loaded).
    #[builder(default, setter(strip_option))]
    pub boot_rom: Option<Vec<u8>>,
    /// Fill work RAM and high RAM with a fixed pseudo-random pattern
    /// instead of zeros.
    #[builder(default = true)]
    pub randomize_ram: bool,
}

impl Default for GameBoyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
