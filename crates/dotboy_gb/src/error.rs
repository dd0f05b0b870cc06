pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unrecoverable emulation faults.
///
/// None of these are retried: once the machine reports one it stays
/// stopped and every further `step` returns the same error.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The opcode at `addr` has no decoding entry.
    #[error("illegal opcode 0x{opcode:02X} at 0x{addr:04X}")]
    IllegalOpcode { addr: u16, opcode: u8 },
    /// `STOP` was executed at `addr`; low-power mode is not emulated.
    #[error("STOP executed at 0x{addr:04X}")]
    Stopped { addr: u16 },
    /// A serial transfer was started with the external clock selected.
    #[error("serial transfer requested with external clock")]
    ExternalSerialClock,
    /// Header byte 0x0147 names a mapper this core does not implement.
    #[error("unsupported cartridge type 0x{kind:02X}")]
    UnsupportedCartridge { kind: u8 },
    /// The image is too short to contain a cartridge header.
    #[error("ROM image of {len} bytes has no cartridge header")]
    RomTooSmall { len: usize },
    /// Boot images must be exactly 256 bytes.
    #[error("boot ROM must be 256 bytes, got {len}")]
    BootRomSize { len: usize },
}
