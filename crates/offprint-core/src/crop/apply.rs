//! Executing a committed crop against the decoded pixels.

use super::region::CropCommand;
use crate::decode::DecodedImage;

/// Extract the rectangle named by a [`CropCommand`] from an image.
///
/// The command is in natural pixel coordinates. Coordinates extending past
/// the image edge are clamped, and the output is never smaller than 1x1.
pub fn apply_crop(image: &DecodedImage, command: &CropCommand) -> DecodedImage {
    // Fast path: the full frame is a clone.
    if command.left == 0
        && command.top == 0
        && command.width >= image.width
        && command.height >= image.height
    {
        return image.clone();
    }

    let left = command.left.min(image.width.saturating_sub(1));
    let top = command.top.min(image.height.saturating_sub(1));
    let right = left.saturating_add(command.width).min(image.width);
    let bottom = top.saturating_add(command.height).min(image.height);

    let out_width = right.saturating_sub(left).max(1);
    let out_height = bottom.saturating_sub(top).max(1);

    let mut output = vec![0u8; (out_width * out_height * 3) as usize];

    // Copy pixel data row by row
    for y in 0..out_height {
        let src_y = top + y;
        let src_row_start = ((src_y * image.width + left) * 3) as usize;
        let dst_row_start = (y * out_width * 3) as usize;
        let row_bytes = (out_width * 3) as usize;

        output[dst_row_start..dst_row_start + row_bytes]
            .copy_from_slice(&image.pixels[src_row_start..src_row_start + row_bytes]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        DecodedImage {
            width,
            height,
            pixels,
        }
    }

    fn command(left: u32, top: u32, width: u32, height: u32) -> CropCommand {
        CropCommand {
            left,
            top,
            width,
            height,
        }
    }

    #[test]
    fn test_full_crop_is_identity() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &command(0, 0, 100, 100));

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 100);
        assert_eq!(result.pixels, img.pixels);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &command(2, 2, 6, 6));

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);

        // First pixel comes from (2, 2): (2 * 10 + 2) % 256 = 22
        assert_eq!(result.pixels[0], 22);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &command(8, 8, 5, 5));

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_oversized_region_returns_full_image() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &command(0, 0, 150, 150));

        assert_eq!(result.width, 100);
        assert_eq!(result.height, 100);
    }

    #[test]
    fn test_minimum_dimension_is_one() {
        let img = test_image(100, 100);
        let result = apply_crop(&img, &command(99, 99, 0, 0));

        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);
        let result = apply_crop(&img, &command(0, 0, 50, 100));

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, &command(3, 3, 4, 4));

        // First pixel from (3, 3): (3 * 10 + 3) % 256 = 33
        assert_eq!(&result.pixels[0..3], &[33, 33, 33]);
        // Second row starts at (3, 4): 43
        assert_eq!(result.pixels[(4 * 3) as usize], 43);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        DecodedImage {
            width,
            height,
            pixels,
        }
    }

    proptest! {
        /// Property: output dimensions are positive and bounded by the input.
        #[test]
        fn prop_output_dimensions_bounded(
            (width, height) in (4u32..=100, 4u32..=100),
            (left, top, crop_w, crop_h) in (0u32..=120, 0u32..=120, 0u32..=120, 0u32..=120),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, &CropCommand {
                left, top, width: crop_w, height: crop_h,
            });

            prop_assert!(result.width >= 1 && result.width <= width);
            prop_assert!(result.height >= 1 && result.height <= height);
            prop_assert_eq!(
                result.pixels.len(),
                (result.width * result.height * 3) as usize
            );
        }

        /// Property: an in-bounds crop is exact and its pixels match the
        /// source rectangle.
        #[test]
        fn prop_in_bounds_crop_is_exact(
            (width, height) in (20u32..=60, 20u32..=60),
            (left, top) in (0u32..=10, 0u32..=10),
            (crop_w, crop_h) in (1u32..=10, 1u32..=10),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, &CropCommand {
                left, top, width: crop_w, height: crop_h,
            });

            prop_assert_eq!(result.width, crop_w);
            prop_assert_eq!(result.height, crop_h);

            for y in 0..crop_h {
                for x in 0..crop_w {
                    let src = ((top + y) * width + (left + x)) % 256;
                    let dst_idx = ((y * crop_w + x) * 3) as usize;
                    prop_assert_eq!(result.pixels[dst_idx], src as u8);
                }
            }
        }

        /// Property: cropping is deterministic.
        #[test]
        fn prop_crop_is_deterministic(
            (width, height) in (4u32..=60, 4u32..=60),
            (left, top, crop_w, crop_h) in (0u32..=80, 0u32..=80, 0u32..=80, 0u32..=80),
        ) {
            let img = create_test_image(width, height);
            let cmd = CropCommand { left, top, width: crop_w, height: crop_h };

            let a = apply_crop(&img, &cmd);
            let b = apply_crop(&img, &cmd);

            prop_assert_eq!(a.width, b.width);
            prop_assert_eq!(a.height, b.height);
            prop_assert_eq!(a.pixels, b.pixels);
        }
    }
}
