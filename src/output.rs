//! # Output Module
//!
//! Writes rendered images to disk:
//! - PNG export with clamping and sRGB gamma correction
//! - EXR export with the linear f32 values untouched
//!
//! [`draw_grid`] overlays a pixel grid before saving, which helps check
//! camera framing.

use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::{debug, info};

use crate::error::OutputError;

/// Linear HDR image produced by the renderer.
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// sRGB transfer curve with the linear segment for dark values.
fn linear_to_gamma(linear: f32) -> f32 {
    if linear <= 0.0 {
        0.0
    } else if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert a linear HDR image to 8-bit sRGB.
///
/// Values outside [0, 1] are clamped before gamma correction, so overexposed
/// channels saturate to 255.
pub fn to_srgb8(image: &HdrImage) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb(pixel.0.map(|c| (linear_to_gamma(c.clamp(0.0, 1.0)) * 255.0) as u8))
    })
}

/// Save an f32 RGB image as PNG with tone clamping and gamma correction.
pub fn save_image_as_png(image: &HdrImage, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    to_srgb8(image).save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save an f32 RGB image as EXR, keeping the full linear range.
pub fn save_image_as_exr(image: &HdrImage, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    write_rgb_file(output_path, image.width() as usize, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

/// Save an image, picking the encoder from the file extension.
pub fn save_image(image: &HdrImage, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    let extension = output_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => save_image_as_png(image, output_path),
        "exr" => save_image_as_exr(image, output_path),
        _ => Err(OutputError::UnsupportedFormat(output_path.display().to_string())),
    }
}

/// Paint every pixel whose row or column is a multiple of `interval`.
///
/// An interval of zero leaves the image unchanged.
pub fn draw_grid(image: &mut HdrImage, interval: u32, color: [f32; 3]) {
    if interval == 0 {
        return;
    }
    debug!("Drawing grid every {} pixels", interval);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        if x % interval == 0 || y % interval == 0 {
            *pixel = Rgb(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

    #[test]
    fn grid_marks_multiples_of_interval() {
        let mut image = HdrImage::new(10, 7);
        draw_grid(&mut image, 5, WHITE);

        for (x, y, pixel) in image.enumerate_pixels() {
            let on_grid = x % 5 == 0 || y % 5 == 0;
            assert_eq!(pixel.0 == WHITE, on_grid, "pixel ({x}, {y})");
        }
        // Columns 0 and 5, rows 0 and 5: 2*7 + 2*10 - 4 crossings
        assert_eq!(image.pixels().filter(|p| p.0 == WHITE).count(), 30);
    }

    #[test]
    fn zero_interval_draws_nothing() {
        let mut image = HdrImage::new(4, 4);
        draw_grid(&mut image, 0, WHITE);
        assert!(image.pixels().all(|p| p.0 == [0.0; 3]));
    }

    #[test]
    fn srgb_conversion_clamps_and_applies_gamma() {
        let mut image = HdrImage::new(3, 1);
        image.put_pixel(0, 0, Rgb([-1.0, 0.0, 0.001]));
        image.put_pixel(1, 0, Rgb([1.0, 5.0, 0.5]));
        image.put_pixel(2, 0, Rgb([0.2, 0.2, 0.2]));

        let srgb = to_srgb8(&image);
        assert_eq!(srgb.get_pixel(0, 0).0, [0, 0, 3]);
        // Overexposed channels saturate
        assert!(srgb.get_pixel(1, 0).0[..2].iter().all(|&c| c >= 254));
        // 0.5 linear is about 0.735 after the sRGB curve
        assert_eq!(srgb.get_pixel(1, 0).0[2], 187);
        assert_eq!(srgb.get_pixel(2, 0).0, [123, 123, 123]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let image = HdrImage::new(1, 1);
        let err = save_image(&image, "render.bmp2").unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }
}
