use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixskin", version, about = "PixSkin: turn images into pixel art")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory of PNG/JPEG images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// JSON pipeline config; explicit flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Downscale target as WIDTHxHEIGHT (e.g. 80x80)
    #[arg(long)]
    pub size: Option<String>,

    /// Integer nearest-neighbor upscale factor
    #[arg(long)]
    pub factor: Option<u32>,

    /// Pixels with alpha below this value become fully transparent
    #[arg(long)]
    pub alpha_threshold: Option<u8>,

    /// Do not write background-removed and downscaled intermediates
    #[arg(long, default_value_t = false)]
    pub no_intermediates: bool,

    /// Skip background removal
    #[arg(long, default_value_t = false)]
    pub keep_background: bool,

    /// Reduce the final image to at most this many colors (1-256)
    #[arg(long)]
    pub colors: Option<u16>,

    /// Check the final size against this grid
    #[arg(long)]
    pub grid: Option<u32>,

    /// Print the validation report as JSON (single file mode)
    #[arg(long, default_value_t = false)]
    pub report: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
