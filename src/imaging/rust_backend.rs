//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Load (JPEG, PNG) | `image::ImageReader::decode`, whole file |
//! | Resize, area | [`resize_area`](super::area::resize_area) |
//! | Resize, other filters | `image::DynamicImage::resize_exact` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with configured quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//!
//! The output format is chosen from the output path's extension, never from
//! the decoded content, so `photo.png` is always re-encoded as PNG.
//!
//! Dimensions are taken from the decoded image rather than the header, so a
//! truncated file is unreadable even when its header is intact.

use super::area::resize_area;
use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{Quality, ResizeParams};
use crate::config::Interpolation;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;

/// Extensions the rescaler can both decode and re-encode.
const CODEC_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    CODEC_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled() && fmt.writing_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Lower-case extensions whose codecs are compiled in for reading and writing.
pub fn supported_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a configured interpolation onto an `image` filter.
///
/// `Area` has no `image` counterpart and is handled by [`resize_area`].
fn filter_type(interpolation: Interpolation) -> Option<FilterType> {
    match interpolation {
        Interpolation::Area => None,
        Interpolation::Nearest => Some(FilterType::Nearest),
        Interpolation::Triangle => Some(FilterType::Triangle),
        Interpolation::CatmullRom => Some(FilterType::CatmullRom),
        Interpolation::Gaussian => Some(FilterType::Gaussian),
        Interpolation::Lanczos3 => Some(FilterType::Lanczos3),
    }
}

/// Open a reader whose format is guessed from content, falling back to the
/// extension. A `.jpg` that is really a PNG still decodes.
fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<File>>, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

fn resize_image(
    img: &DynamicImage,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> Result<DynamicImage, BackendError> {
    match filter_type(interpolation) {
        Some(filter) => Ok(img.resize_exact(width, height, filter)),
        None => resize_area(img, width, height).ok_or_else(|| {
            BackendError::ProcessingFailed(format!("Invalid target size {width}x{height}"))
        }),
    }
}

/// Encode `img` in the format named by the path's extension and write it.
fn save_image(img: &DynamicImage, path: &Path, quality: Quality) -> Result<(), BackendError> {
    let format = path
        .extension()
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "Cannot determine output format for {}",
                path.display()
            ))
        })?;

    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(BackendError::ProcessingFailed(format!(
            "Unsupported output format: {:?}",
            format
        )));
    }

    let file = File::create(path).map_err(BackendError::Io)?;
    let mut writer = BufWriter::new(file);
    let encoded = if format == ImageFormat::Jpeg {
        save_jpeg(img, &mut writer, quality)
    } else {
        let encoder = PngEncoder::new_with_quality(
            &mut writer,
            CompressionType::Default,
            image::codecs::png::FilterType::Adaptive,
        );
        img.write_with_encoder(encoder)
    };
    encoded.map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    writer.flush().map_err(BackendError::Io)
}

/// JPEG has no alpha channel and no 16-bit mode, so anything else is
/// narrowed to 8-bit gray or RGB first.
fn save_jpeg<W: Write>(
    img: &DynamicImage,
    writer: W,
    quality: Quality,
) -> image::ImageResult<()> {
    let encoder = JpegEncoder::new_with_quality(writer, quality.value());
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img.write_with_encoder(encoder),
        _ if !img.color().has_color() => {
            DynamicImage::ImageLuma8(img.to_luma8()).write_with_encoder(encoder)
        }
        _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder),
    }
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        load_image(path)
    }

    fn dimensions(&self, img: &DynamicImage) -> Dimensions {
        Dimensions {
            width: img.width(),
            height: img.height(),
        }
    }

    fn resize(&self, img: &DynamicImage, params: &ResizeParams) -> Result<(), BackendError> {
        log::debug!(
            "resizing {} from {}x{} to {}x{} ({})",
            params.source.display(),
            img.width(),
            img.height(),
            params.width,
            params.height,
            params.interpolation
        );
        let resized = resize_image(img, params.width, params.height, params.interpolation)?;
        save_image(&resized, &params.output, params.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageEncoder, Rgba, RgbaImage, RgbImage};

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = File::create(path).unwrap();
        let writer = BufWriter::new(file);
        JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 128]));
        img.save(path).unwrap();
    }

    /// Load `params.source` and run the resize, as the rescale pass does.
    fn rescale(params: &ResizeParams) -> Result<(), BackendError> {
        let backend = RustBackend::new();
        let img = backend.load(&params.source)?;
        backend.resize(&img, params)
    }

    fn truncate_to_half(path: &Path) {
        let bytes = std::fs::read(path).unwrap();
        std::fs::write(path, &bytes[..bytes.len() / 2]).unwrap();
    }

    fn params(source: &Path, output: &Path, width: u32, height: u32) -> ResizeParams {
        ResizeParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            width,
            height,
            interpolation: Interpolation::Area,
            quality: Quality::default(),
        }
    }

    #[test]
    fn load_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let img = backend.load(&path).unwrap();
        assert_eq!(backend.dimensions(&img), Dimensions { width: 200, height: 150 });
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let result = RustBackend::new().load(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("fake.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        assert!(RustBackend::new().load(&path).is_err());
    }

    #[test]
    fn load_truncated_png_with_valid_header_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        create_test_png(&path, 300, 300);
        truncate_to_half(&path);

        // The header alone still parses
        assert_eq!(image::image_dimensions(&path).unwrap(), (300, 300));
        let result = RustBackend::new().load(&path);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn supported_extensions_match_compiled_codecs() {
        assert_eq!(supported_extensions(), &["jpg", "jpeg", "png"]);
    }

    #[test]
    fn resize_jpeg_to_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        let output = tmp.path().join("source_scaled.jpg");
        create_test_jpeg(&source, 400, 300);

        rescale(&params(&source, &output, 200, 150)).unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 150));
        let written = ImageReader::open(&output)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(written, Some(ImageFormat::Jpeg));
    }

    #[test]
    fn resize_png_keeps_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        let output = tmp.path().join("source_scaled.png");
        create_test_png(&source, 64, 32);

        rescale(&params(&source, &output, 16, 8)).unwrap();

        let out = image::open(&output).unwrap();
        assert_eq!((out.width(), out.height()), (16, 8));
        assert_eq!(out.as_rgba8().unwrap().get_pixel(3, 3), &Rgba([10, 20, 30, 128]));
    }

    #[test]
    fn resize_with_library_filters() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 120, 90);

        for interpolation in [
            Interpolation::Nearest,
            Interpolation::Triangle,
            Interpolation::CatmullRom,
            Interpolation::Gaussian,
            Interpolation::Lanczos3,
        ] {
            let output = tmp.path().join(format!("out_{interpolation}.jpg"));
            rescale(&ResizeParams {
                interpolation,
                ..params(&source, &output, 60, 45)
            })
            .unwrap();
            assert_eq!(image::image_dimensions(&output).unwrap(), (60, 45));
        }
    }

    #[test]
    fn rgba_png_source_written_as_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.png");
        let output = tmp.path().join("out.jpg");
        create_test_png(&source, 40, 40);

        rescale(&params(&source, &output, 20, 20)).unwrap();
        assert_eq!(image::image_dimensions(&output).unwrap(), (20, 20));
    }

    #[test]
    fn unsupported_output_extension_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 100, 100);

        let output = tmp.path().join("output.xyz");
        let result = rescale(&params(&source, &output, 50, 50));
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
