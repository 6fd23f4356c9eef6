use clap::Parser;
use img_rescale::config::{
    DEFAULT_EXTENSIONS, DEFAULT_SUFFIX, DEFAULT_THRESHOLD, Interpolation, RescaleConfig,
};
use img_rescale::imaging::Quality;
use img_rescale::{output, process};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "img-rescale")]
#[command(about = "Downscale oversized JPEG and PNG images in a directory")]
#[command(long_about = "\
Downscale oversized JPEG and PNG images in a directory

Every image in DIR (top level only) whose width or height is larger than
the threshold is scaled down proportionally so its longer edge equals the
threshold, and written as <name><suffix>.<ext>. Smaller images are left
alone. Files that cannot be read are reported and skipped.

  img-rescale                          # ./photo.jpg → ./photo_scaled.jpg
  img-rescale ~/Pictures -t 1920
  img-rescale . --output rescaled_images --suffix ''

Set RUST_LOG=debug for diagnostic logging.")]
#[command(version)]
struct Cli {
    /// Directory to scan (created if missing)
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Write rescaled images here instead of next to the originals
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum length of the longer edge, in pixels
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: u32,

    /// Appended to the file name before the extension
    #[arg(short, long, default_value = DEFAULT_SUFFIX)]
    suffix: String,

    /// Resampling filter
    #[arg(short, long, value_enum, default_value_t = Interpolation::Area)]
    interpolation: Interpolation,

    /// File extensions to process (comma separated, case-insensitive; jpg, jpeg and png only)
    #[arg(short, long, value_delimiter = ',', default_values = DEFAULT_EXTENSIONS)]
    extensions: Vec<String>,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

impl Cli {
    fn into_config(self) -> RescaleConfig {
        RescaleConfig {
            target_dir: self.dir,
            output_dir: self.output,
            extensions: self.extensions,
            threshold: self.threshold,
            interpolation: self.interpolation,
            suffix: self.suffix,
            quality: Quality::new(self.quality),
        }
        .normalize_extensions()
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Cli::parse().into_config();
    log::debug!("{config:?}");

    match process::rescale_dir(&config, output::print_process_event) {
        Ok(summary) => {
            output::print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
