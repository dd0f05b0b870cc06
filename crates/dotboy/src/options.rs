use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use typed_builder::TypedBuilder;

const DEFAULT_FRAMES: u32 = 600;

pub const USAGE: &str = "Usage: dotboy <rom_path> [--frames N] [--boot PATH] [--dump PATH]";

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunOptions {
    pub rom_path: PathBuf,
    #[builder(default = DEFAULT_FRAMES)]
    pub frames: u32,
    #[builder(default)]
    pub boot_rom: Option<PathBuf>,
    /// Where to write the last frame as raw RGB24.
    #[builder(default)]
    pub dump_path: Option<PathBuf>,
}

impl RunOptions {
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut rom_path = None;
        let mut frames = None;
        let mut boot_rom = None;
        let mut dump_path = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--frames" => {
                    let value = args.next().context("--frames needs a value")?;
                    frames = Some(
                        value
                            .parse::<u32>()
                            .with_context(|| format!("invalid frame count '{value}'"))?,
                    );
                }
                "--boot" => boot_rom = Some(PathBuf::from(args.next().context("--boot needs a path")?)),
                "--dump" => dump_path = Some(PathBuf::from(args.next().context("--dump needs a path")?)),
                flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n{USAGE}"),
                _ if rom_path.is_none() => rom_path = Some(PathBuf::from(&arg)),
                _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
            }
        }

        let Some(rom_path) = rom_path else {
            bail!("no ROM path given\n{USAGE}");
        };

        Ok(Self::builder()
            .rom_path(rom_path)
            .frames(frames.unwrap_or(DEFAULT_FRAMES))
            .boot_rom(boot_rom)
            .dump_path(dump_path)
            .build())
    }
}
