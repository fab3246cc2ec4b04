//! Image resizing for viewport previews, thumbnails, and the compression
//! pixel cap.
//!
//! All functions return new `DecodedImage` instances without modifying the
//! input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::EmptyImage` if either target dimension is zero.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image to fit within a maximum edge length while preserving
/// aspect ratio.
///
/// If the image already fits, it is returned unchanged. This is the
/// downscale step behind the 2000 px compression cap: page geometry is
/// computed from the original dimensions, the pixel payload from the capped
/// ones.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let (src_width, src_height) = (image.width, image.height);

    // If already fits, just clone
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(src_width, src_height, max_edge);

    resize(image, new_width, new_height, filter)
}

/// Generate a thumbnail for the image-order list.
///
/// Uses bilinear interpolation for speed. The result fits within a
/// `size x size` bounding box while preserving aspect ratio.
pub fn generate_thumbnail(image: &DecodedImage, size: u32) -> Result<DecodedImage, DecodeError> {
    resize_to_fit(image, size, FilterType::Bilinear)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_width = max_edge;
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (new_width, new_height.max(1))
    } else {
        let new_height = max_edge;
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), new_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_exact() {
        let img = test_image(100, 80);
        let result = resize(&img, 50, 40, FilterType::Bilinear).unwrap();
        assert_eq!(result.width, 50);
        assert_eq!(result.height, 40);
        assert_eq!(result.byte_size(), 50 * 40 * 3);
    }

    #[test]
    fn test_resize_same_size_is_clone() {
        let img = test_image(32, 32);
        let result = resize(&img, 32, 32, FilterType::Nearest).unwrap();
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_resize_zero_dimension_errors() {
        let img = test_image(10, 10);
        assert!(resize(&img, 0, 10, FilterType::Bilinear).is_err());
        assert!(resize(&img, 10, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = test_image(400, 200);
        let result = resize_to_fit(&img, 100, FilterType::Bilinear).unwrap();
        assert_eq!(result.width, 100);
        assert_eq!(result.height, 50);
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = test_image(200, 400);
        let result = resize_to_fit(&img, 100, FilterType::Bilinear).unwrap();
        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
    }

    #[test]
    fn test_resize_to_fit_already_fits() {
        let img = test_image(80, 60);
        let result = resize_to_fit(&img, 100, FilterType::Bilinear).unwrap();
        assert_eq!(result.width, 80);
        assert_eq!(result.height, 60);
    }

    #[test]
    fn test_generate_thumbnail() {
        let img = test_image(1024, 768);
        let thumb = generate_thumbnail(&img, 256).unwrap();
        assert_eq!(thumb.width, 256);
        assert_eq!(thumb.height, 192);
    }

    #[test]
    fn test_fit_dimensions_extreme_aspect() {
        // Very wide strip must never collapse to zero height.
        let (w, h) = fit_dimensions(10000, 10, 100);
        assert_eq!(w, 100);
        assert!(h >= 1);
    }
}
