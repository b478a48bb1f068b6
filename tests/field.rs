//! Validates darkness field construction, sampling, and disc clearing

use image::{GrayImage, Luma};
use rasterart::field::DarknessField;

#[test]
fn test_luma_capped_construction() {
    let gray = GrayImage::from_fn(4, 1, |x, _| Luma([[0u8, 100, 251, 255][x as usize]]));
    let field = DarknessField::from_luma_capped(&gray);

    assert_eq!(field.get(0, 0), 0);
    assert_eq!(field.get(1, 0), 100);
    // The ceiling keeps near-white below the exhausted marker
    assert_eq!(field.get(2, 0), 250);
    assert_eq!(field.get(3, 0), 250);
}

#[test]
fn test_inverted_capped_construction() {
    let gray = GrayImage::from_fn(3, 1, |x, _| Luma([[0u8, 100, 255][x as usize]]));
    let field = DarknessField::inverted_capped(&gray);

    assert_eq!(field.get(0, 0), 250);
    assert_eq!(field.get(1, 0), 155);
    assert_eq!(field.get(2, 0), 0);
}

#[test]
fn test_equalized_compressed_keeps_headroom() {
    let gray = GrayImage::from_fn(16, 16, |x, y| Luma([((x + y) * 8) as u8]));
    let field = DarknessField::equalized_compressed(&gray);

    for y in 0..16 {
        for x in 0..16 {
            let v = field.get(x, y);
            assert!(v >= 2, "compressed field must stay above consumed range");
            assert!(v <= 251);
        }
    }
}

#[test]
fn test_sampling_bounds() {
    let gray = GrayImage::from_pixel(8, 8, Luma([42]));
    let field = DarknessField::from_luma_capped(&gray);

    assert_eq!(field.sample(0, 0), Some(42));
    assert_eq!(field.sample(7, 7), Some(42));
    assert_eq!(field.sample(8, 0), None);
    assert_eq!(field.sample(0, 8), None);
    assert_eq!(field.sample(-1, 3), None);
}

#[test]
fn test_disc_painting_clips_and_marks() {
    let gray = GrayImage::from_pixel(20, 20, Luma([200]));
    let mut field = DarknessField::from_luma_capped(&gray);

    field.paint_disc(10, 10, 4, 0);
    assert_eq!(field.get(10, 10), 0);
    assert_eq!(field.get(10, 13), 0);
    // Outside the disc remains untouched
    assert_eq!(field.get(0, 0), 200);

    // Partially or fully out-of-bounds discs clip without panicking
    field.paint_disc(-3, -3, 5, 7);
    field.paint_disc(25, 25, 5, 7);
    assert_eq!(field.get(19, 19), 200);
}

#[test]
fn test_zero_radius_disc_marks_single_pixel() {
    let gray = GrayImage::from_pixel(5, 5, Luma([100]));
    let mut field = DarknessField::from_luma_capped(&gray);

    field.paint_disc(2, 2, 0, 9);
    assert_eq!(field.get(2, 2), 9);
    assert_eq!(field.get(3, 2), 100);
}

#[test]
fn test_mean() {
    let gray = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 100 }]));
    let field = DarknessField::from_luma_capped(&gray);
    assert!((field.mean() - 50.0).abs() < 1e-12);
}
