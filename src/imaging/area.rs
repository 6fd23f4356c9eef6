//! Area-averaging resampler.
//!
//! Each output pixel covers a `src_w / dst_w` by `src_h / dst_h` rectangle of
//! the source. Its value is the mean of the source pixels under that
//! rectangle, each weighted by how much of it the rectangle overlaps. When
//! the ratio is an integer this is a plain box average; otherwise edge
//! pixels contribute fractionally. This is the shrinking filter photo tools
//! call "area" or "pixel mixing", and it does not alias the way point
//! sampling does.
//!
//! The `image` crate has no such filter, so it lives here. Pixel layout and
//! bit depth are preserved: an `Rgba16` input comes back as `Rgba16`.
//!
//! Work is done one output row at a time. Source rows are first blended
//! vertically into a single `f32` row, which is then blended horizontally,
//! so the scratch memory is one source row regardless of image height.

use image::{DynamicImage, ImageBuffer, Pixel};

/// Source taps for one output coordinate: `(source index, weight)`.
/// Weights of one output coordinate sum to 1.
type Taps = Vec<(usize, f32)>;

fn axis_taps(src_len: u32, dst_len: u32) -> Vec<Taps> {
    let scale = f64::from(src_len) / f64::from(dst_len);
    (0..dst_len)
        .map(|d| {
            let start = f64::from(d) * scale;
            let end = (f64::from(d + 1) * scale).min(f64::from(src_len));
            let span = end - start;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len as usize);
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 0.0).then_some((s, (overlap / span) as f32))
                })
                .collect()
        })
        .collect()
}

fn resize_buffer<P: Pixel>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
    to_f32: fn(P::Subpixel) -> f32,
    from_f32: fn(f32) -> P::Subpixel,
) -> Option<ImageBuffer<P, Vec<P::Subpixel>>> {
    let channels = usize::from(P::CHANNEL_COUNT);
    let (src_w, src_h) = src.dimensions();
    let raw: &[P::Subpixel] = src.as_raw();
    let src_row_len = src_w as usize * channels;

    let x_taps = axis_taps(src_w, width);
    let y_taps = axis_taps(src_h, height);

    let mut out = Vec::with_capacity(width as usize * height as usize * channels);
    let mut blended_row = vec![0f32; src_row_len];

    for row_taps in &y_taps {
        blended_row.fill(0.0);
        for &(sy, wy) in row_taps {
            let src_row = &raw[sy * src_row_len..(sy + 1) * src_row_len];
            for (acc, &v) in blended_row.iter_mut().zip(src_row) {
                *acc += to_f32(v) * wy;
            }
        }

        for col_taps in &x_taps {
            let mut pixel = [0f32; 4];
            let pixel = &mut pixel[..channels];
            for &(sx, wx) in col_taps {
                let src_px = &blended_row[sx * channels..(sx + 1) * channels];
                for (acc, &v) in pixel.iter_mut().zip(src_px) {
                    *acc += v * wx;
                }
            }
            out.extend(pixel.iter().map(|&v| from_f32(v)));
        }
    }

    ImageBuffer::from_raw(width, height, out)
}

fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, f32::from(u8::MAX)) as u8
}

fn to_u16(v: f32) -> u16 {
    v.round().clamp(0.0, f32::from(u16::MAX)) as u16
}

fn passthrough(v: f32) -> f32 {
    v
}

/// Resize `img` to exactly `width` x `height` with area averaging.
///
/// Returns `None` if either target dimension is zero.
pub fn resize_area(img: &DynamicImage, width: u32, height: u32) -> Option<DynamicImage> {
    if width == 0 || height == 0 {
        return None;
    }
    let resized = match img {
        DynamicImage::ImageLuma8(b) => {
            DynamicImage::ImageLuma8(resize_buffer(b, width, height, f32::from, to_u8)?)
        }
        DynamicImage::ImageLumaA8(b) => {
            DynamicImage::ImageLumaA8(resize_buffer(b, width, height, f32::from, to_u8)?)
        }
        DynamicImage::ImageRgb8(b) => {
            DynamicImage::ImageRgb8(resize_buffer(b, width, height, f32::from, to_u8)?)
        }
        DynamicImage::ImageRgba8(b) => {
            DynamicImage::ImageRgba8(resize_buffer(b, width, height, f32::from, to_u8)?)
        }
        DynamicImage::ImageLuma16(b) => {
            DynamicImage::ImageLuma16(resize_buffer(b, width, height, f32::from, to_u16)?)
        }
        DynamicImage::ImageLumaA16(b) => {
            DynamicImage::ImageLumaA16(resize_buffer(b, width, height, f32::from, to_u16)?)
        }
        DynamicImage::ImageRgb16(b) => {
            DynamicImage::ImageRgb16(resize_buffer(b, width, height, f32::from, to_u16)?)
        }
        DynamicImage::ImageRgba16(b) => {
            DynamicImage::ImageRgba16(resize_buffer(b, width, height, f32::from, to_u16)?)
        }
        DynamicImage::ImageRgb32F(b) => {
            DynamicImage::ImageRgb32F(resize_buffer(b, width, height, passthrough, passthrough)?)
        }
        DynamicImage::ImageRgba32F(b) => DynamicImage::ImageRgba32F(resize_buffer(
            b,
            width,
            height,
            passthrough,
            passthrough,
        )?),
        other => DynamicImage::ImageRgba32F(resize_buffer(
            &other.to_rgba32f(),
            width,
            height,
            passthrough,
            passthrough,
        )?),
    };
    Some(resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba};
    type Rgba16Image = image::ImageBuffer<Rgba<u16>, Vec<u16>>;

    #[test]
    fn taps_integer_ratio_are_box() {
        let taps = axis_taps(4, 2);
        assert_eq!(taps, vec![vec![(0, 0.5), (1, 0.5)], vec![(2, 0.5), (3, 0.5)]]);
    }

    #[test]
    fn taps_fractional_ratio_share_edge_pixel() {
        // 3 → 2: each output covers 1.5 source pixels
        let taps = axis_taps(3, 2);
        assert_eq!(taps[0].len(), 2);
        assert_eq!(taps[1].len(), 2);
        assert_eq!(taps[0][1].0, 1);
        assert_eq!(taps[1][0].0, 1);
        for t in &taps {
            let sum: f32 = t.iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn averages_2x2_blocks() {
        let img = GrayImage::from_raw(4, 2, vec![0, 100, 200, 200, 100, 200, 0, 0]).unwrap();
        let out = resize_area(&DynamicImage::ImageLuma8(img), 2, 1).unwrap();
        let out = out.as_luma8().unwrap();
        assert_eq!(out.get_pixel(0, 0), &Luma([100]));
        assert_eq!(out.get_pixel(1, 0), &Luma([100]));
    }

    #[test]
    fn uniform_color_is_preserved() {
        let img = RgbImage::from_pixel(97, 61, Rgb([12, 200, 77]));
        let out = resize_area(&DynamicImage::ImageRgb8(img), 40, 25).unwrap();
        assert_eq!(out.width(), 40);
        assert_eq!(out.height(), 25);
        assert!(out.as_rgb8().unwrap().pixels().all(|p| *p == Rgb([12, 200, 77])));
    }

    #[test]
    fn keeps_16_bit_rgba_layout() {
        let img = Rgba16Image::from_pixel(10, 10, Rgba([60000, 0, 1000, 65535]));
        let out = resize_area(&DynamicImage::ImageRgba16(img), 3, 3).unwrap();
        let out = out.as_rgba16().expect("layout preserved");
        assert_eq!(out.get_pixel(1, 1), &Rgba([60000, 0, 1000, 65535]));
    }

    #[test]
    fn zero_target_is_none() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        assert!(resize_area(&img, 0, 2).is_none());
    }
}
