use std::path::Path;

use tracing::info;

use pixskin::logging::init_tracing;
use pixskin::{PipelineConfig, PixelArtConverter};

use super::args::CliArgs;
use super::errors::AppError;

/// Parse `WIDTHxHEIGHT` into positive dimensions.
pub fn parse_size(size: &str) -> Result<(u32, u32), AppError> {
    let invalid = || AppError::InvalidSize {
        size: size.to_string(),
    };
    let (width, height) = size.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// Config file (or defaults) with explicit flags applied on top.
fn build_config(args: &CliArgs) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(size) = &args.size {
        config.downscale_size = parse_size(size)?;
    }
    if let Some(factor) = args.factor {
        config.upscale_factor = factor;
    }
    if let Some(threshold) = args.alpha_threshold {
        config.alpha_threshold = threshold;
    }
    if args.no_intermediates {
        config.preserve_intermediates = false;
    }
    if args.keep_background {
        config.remove_background = false;
    }
    if args.colors.is_some() {
        config.palette_colors = args.colors;
    }
    if args.grid.is_some() {
        config.grid_size = args.grid;
    }
    Ok(config)
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(args.log);

    let config = build_config(&args)?;
    let converter = PixelArtConverter::new(config)?;

    match (&args.input, &args.input_dir) {
        (Some(_), Some(_)) => Err(AppError::ConflictingArguments {
            first: "--input".to_string(),
            second: "--input-dir".to_string(),
        }
        .into()),
        (None, None) => Err(AppError::MissingArgument {
            arg: "--input or --input-dir".to_string(),
        }
        .into()),
        (Some(input), None) => {
            if args.report {
                let output_dir = input.parent().unwrap_or(Path::new(""));
                let output = converter.process_image_with_report(input, output_dir)?;
                println!("{}", output.final_path.display());
                println!("{}", serde_json::to_string_pretty(&output.report)?);
            } else {
                let final_path = converter.process_image(input)?;
                println!("{}", final_path.display());
            }
            Ok(())
        }
        (None, Some(input_dir)) => {
            info!("Starting batch processing from directory: {:?}", input_dir);
            let results = converter.process_folder(input_dir)?;
            for path in &results {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_accepts_both_separators() {
        assert_eq!(parse_size("80x80").unwrap(), (80, 80));
        assert_eq!(parse_size("32X16").unwrap(), (32, 16));
    }

    #[test]
    fn size_rejects_zero_and_garbage() {
        for bad in ["0x10", "10x0", "10", "axb", "10x-2", ""] {
            assert!(parse_size(bad).is_err(), "{bad}");
        }
    }
}
