use std::io::Write;

use anyhow::{Context, Result};
use dotboy_gb::{Framebuffer, GameBoy, GameBoyConfig, SCREEN_HEIGHT, SCREEN_WIDTH};

mod options;

use options::RunOptions;

/// Shade 0-3 to grey, lightest first.
const GREY_RAMP: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];

fn main() -> Result<()> {
    env_logger::init();

    let options = RunOptions::from_args(std::env::args().skip(1))?;
    log::info!("Running '{}' for {} frames", options.rom_path.display(), options.frames);

    let mut gb = build_machine(&options)?;
    let outcome = gb.run_frames(options.frames);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(String::from_utf8_lossy(gb.serial_output()).as_bytes())?;
    stdout.flush()?;

    if let Some(path) = &options.dump_path {
        let rgb = to_rgb24(gb.framebuffer());
        std::fs::write(path, &rgb)
            .with_context(|| format!("failed to write frame to '{}'", path.display()))?;
        log::info!(
            "Wrote {} bytes ({}x{} rgb24) to '{}'",
            rgb.len(),
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            path.display()
        );
    }

    outcome.with_context(|| format!("emulation stopped after {} frames", gb.frame_count()))
}

fn build_machine(options: &RunOptions) -> Result<GameBoy> {
    let config = match &options.boot_rom {
        Some(path) => {
            let image = std::fs::read(path)
                .with_context(|| format!("failed to read boot ROM '{}'", path.display()))?;
            GameBoyConfig::builder().boot_rom(image).build()
        }
        None => GameBoyConfig::default(),
    };
    let mut gb = GameBoy::with_config(config)?;

    let rom = std::fs::read(&options.rom_path)
        .with_context(|| format!("failed to read ROM '{}'", options.rom_path.display()))?;
    gb.load_rom(&rom)
        .with_context(|| format!("failed to load ROM '{}'", options.rom_path.display()))?;
    Ok(gb)
}

fn to_rgb24(frame: &Framebuffer) -> Vec<u8> {
    frame
        .as_slice()
        .iter()
        .flat_map(|&shade| [GREY_RAMP[usize::from(shade & 0x03)]; 3])
        .collect()
}
