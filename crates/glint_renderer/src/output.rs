//! Pixel encoding and image writers.

use std::io::Write;
use std::path::Path;

use crate::{Color, ImageBuffer, RenderResult};
use glint_math::Interval;

/// Maximum channel value written in the PPM header.
pub const PPM_MAX_VALUE: u32 = 255;

/// Apply gamma correction (gamma = 2.0).
#[inline]
fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
///
/// Each channel is gamma corrected, clamped to [0, 0.999] and scaled by
/// 256, so 1.0 maps to 255 and 0.0 to 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let encode = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [encode(color.x), encode(color.y), encode(color.z)]
}

/// Write the image as plain-text PPM (`P3`), top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> RenderResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "{}", PPM_MAX_VALUE)?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save the image as an 8-bit PNG using the same encoding as the PPM.
pub fn save_png<P: AsRef<Path>>(frame: &ImageBuffer, path: P) -> RenderResult<()> {
    let mut buffer = image::RgbImage::new(frame.width, frame.height);
    for (x, y, pixel) in buffer.enumerate_pixels_mut() {
        *pixel = image::Rgb(color_to_rgb(frame.get(x, y)));
    }
    buffer.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_encoding_extremes() {
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        // Over-bright values are clamped, not wrapped
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.25, 0.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_averaged_white_encodes_to_max() {
        for samples in [1u32, 7, 100] {
            let mut sum = Color::ZERO;
            for _ in 0..samples {
                sum += Color::ONE;
            }
            assert_eq!(color_to_rgb(sum / samples as f32), [255, 255, 255]);
        }
    }

    #[test]
    fn test_write_ppm_layout() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 1, Color::new(0.0, 1.0, 0.0));

        let mut out = Vec::new();
        write_ppm(&image, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n255\n255 255 255\n0 0 0\n0 0 0\n0 255 0\n"
        );
    }

    #[test]
    fn test_save_png() {
        let mut frame = ImageBuffer::new(3, 2);
        frame.set(2, 1, Color::ONE);
        let path = std::env::temp_dir().join(format!("glint_test_{}.png", std::process::id()));

        save_png(&frame, &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 255, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
