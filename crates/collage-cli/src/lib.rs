//! CLI logic for the Collage sample renderer.
//!
//! Renders one of the bundled sample scenes to PNG or SVG. Animated samples
//! can write a numbered sequence of frames driven by a background clock.

mod args;
mod config;
mod error;
pub mod samples;
pub mod ticker;

pub use args::Args;
pub use error::CliError;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};

use collage::{Drawable, Input, Painter};

use crate::ticker::Ticker;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Run the Collage CLI application
///
/// Builds a painter for the selected sample and writes its output. With
/// `--frames`, the clock of an animated sample is advanced once per frame
/// and each frame is written next to `output` with its index appended.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Invalid size or frame arguments
/// - Configuration loading errors
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        sample = args.sample.name(),
        output_path = args.output;
        "Rendering sample"
    );

    for (name, value) in [("width", args.width), ("height", args.height)] {
        if let Some(value) = value {
            if !(value.is_finite() && value > 0.0) {
                return Err(CliError::InvalidArgument(format!(
                    "--{name} must be positive, got {value}"
                )));
            }
        }
    }

    let mut app_config = config::load_config(args.config.as_ref())?;
    let sample_size = args.sample.size();
    let painter_config = app_config.painter_mut();
    painter_config.set_size(
        args.width.unwrap_or(sample_size.width),
        args.height.unwrap_or(sample_size.height),
    );
    if painter_config.explicit_viewport().is_none() {
        painter_config.set_viewport(sample_size.width, sample_size.height);
    }
    debug!(config:? = app_config; "Resolved configuration");

    let clock = Input::new(0.0);
    let mut painter = args.sample.painter(&app_config, &clock)?;

    match args.frames {
        None => {
            let size = painter.intrinsic_size();
            painter.export(&args.output, size)?;
        }
        Some(_) if !args.sample.is_animated() => {
            return Err(CliError::NotAnimated(args.sample.name()));
        }
        Some(0) => {
            return Err(CliError::InvalidArgument(
                "--frames must be at least 1".to_string(),
            ));
        }
        Some(frames) => write_frames(&mut painter, &clock, Path::new(&args.output), frames)?,
    }

    info!(
        output_file = args.output,
        renders = painter.root().render_count();
        "Sample rendered successfully"
    );
    Ok(())
}

fn write_frames(
    painter: &mut Painter,
    clock: &Input<f64>,
    output: &Path,
    frames: u32,
) -> Result<(), CliError> {
    let size = painter.intrinsic_size();
    let mut ticker = Ticker::start(FRAME_INTERVAL);

    for written in 0..u64::from(frames) {
        let frame = ticker
            .next_frame()
            .ok_or(CliError::TickerStopped(written))?;
        clock.set(samples::spiral::angle_at(frame.index));

        let path = frame_path(output, frame.index);
        painter.export(&path, size)?;
        debug!(frame = frame.index, elapsed:? = frame.elapsed; "Frame written");
    }

    ticker.stop();
    Ok(())
}

/// Returns `output` with the frame index appended to its file stem.
fn frame_path(output: &Path, index: u64) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{stem}-{index:04}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{index:04}"),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::samples::Sample;

    #[test]
    fn test_frame_path_keeps_extension() {
        assert_eq!(
            frame_path(Path::new("out/spin.svg"), 3),
            PathBuf::from("out/spin-0003.svg")
        );
        assert_eq!(frame_path(Path::new("spin"), 12), PathBuf::from("spin-0012"));
    }

    #[test]
    fn test_frames_rejected_for_static_sample() {
        let args = Args::try_parse_from(["collage", "basic", "--frames", "2"]).unwrap();
        assert!(matches!(run(&args), Err(CliError::NotAnimated("basic"))));
    }

    #[test]
    fn test_non_positive_size_rejected() {
        let args = Args::try_parse_from(["collage", "chart", "--width", "0"]).unwrap();
        assert!(matches!(run(&args), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_sample_sets_default_sizes() {
        let args = Args::try_parse_from(["collage", "hexbin"]).unwrap();
        assert_eq!(args.sample.size(), samples::hexbin::SIZE);
        assert!(Sample::Spiral.is_animated());
    }
}
