use super::*;

#[test]
fn boxes_are_odd_adjacent_and_split_is_bounded() {
    for step in 0..=200u32 {
        let radius = f64::from(step) * 0.5;
        let b = BlurBoxes::for_radius(radius).unwrap();
        assert_eq!(b.lower % 2, 1, "radius {radius}");
        assert_eq!(b.upper, b.lower + 2, "radius {radius}");
        assert!(b.split <= BLUR_ROUNDS, "radius {radius}");
    }
}

#[test]
fn zero_radius_degenerates_to_unit_boxes() {
    let b = BlurBoxes::for_radius(0.0).unwrap();
    assert_eq!(b.lower, 1);
    assert_eq!(b.split, 2);
    assert_eq!(b.radius(0), 0);
    assert_eq!(b.radius(1), 0);
}

#[test]
fn known_radii_match_hand_computed_boxes() {
    assert_eq!(
        BlurBoxes::for_radius(3.0).unwrap(),
        BlurBoxes {
            lower: 1,
            upper: 3,
            split: 0
        }
    );
    let b = BlurBoxes::for_radius(9.0).unwrap();
    assert_eq!(
        b,
        BlurBoxes {
            lower: 7,
            upper: 9,
            split: 1
        }
    );
    assert_eq!(b.width(0), 7);
    assert_eq!(b.width(1), 9);
}

#[test]
fn negative_or_nan_radius_is_rejected() {
    assert!(BlurBoxes::for_radius(-1.0).is_err());
    assert!(BlurBoxes::for_radius(f64::NAN).is_err());
}

#[test]
fn box_blur_radius_0_is_identity() {
    let src: Vec<u32> = (0..12).map(|v| v * 20).collect();
    let mut buf = src.clone();
    let mut scratch = vec![0u32; 12];
    box_blur(&mut buf, &mut scratch, 4, 3, 0).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn box_blur_constant_image_is_identity() {
    let mut buf = vec![77u32; 6 * 5];
    let mut scratch = vec![0u32; 6 * 5];
    box_blur(&mut buf, &mut scratch, 6, 5, 2).unwrap();
    assert!(buf.iter().all(|&v| v == 77));
}

#[test]
fn box_blur_replicates_edges() {
    let mut buf = vec![0u32, 0, 0, 90];
    let mut scratch = vec![0u32; 4];
    box_blur(&mut buf, &mut scratch, 4, 1, 1).unwrap();
    assert_eq!(buf, vec![0, 0, 30, 60]);
}

#[test]
fn box_blur_truncates_averages() {
    let mut buf = vec![1u32, 0, 0];
    let mut scratch = vec![0u32; 3];
    box_blur(&mut buf, &mut scratch, 3, 1, 1).unwrap();
    assert_eq!(buf, vec![0, 0, 0]);
}

#[test]
fn box_blur_window_wider_than_buffer_is_safe() {
    let mut buf = vec![40u32; 3 * 2];
    let mut scratch = vec![0u32; 3 * 2];
    box_blur(&mut buf, &mut scratch, 3, 2, 5).unwrap();
    assert!(buf.iter().all(|&v| v == 40));
}

#[test]
fn box_blur_rejects_mismatched_buffers() {
    let mut buf = vec![0u32; 5];
    let mut scratch = vec![0u32; 6];
    assert!(box_blur(&mut buf, &mut scratch, 3, 2, 1).is_err());
}

#[test]
fn gauss_blur_spreads_a_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut buf = vec![0u32; 81];
    let mut scratch = vec![0u32; 81];
    buf[4 * 9 + 4] = 255;

    let boxes = BlurBoxes::for_radius(3.0).unwrap();
    gauss_blur(&mut buf, &mut scratch, w, h, boxes).unwrap();

    let center = buf[4 * 9 + 4];
    assert!(center < 255);
    assert!(buf[4 * 9 + 5] > 0);
    assert!(buf[5 * 9 + 4] > 0);
    assert_eq!(buf[0], 0);
    let total: u32 = buf.iter().sum();
    assert!(total <= 255);
}

#[test]
fn gauss_blur_with_zero_radius_keeps_input() {
    let src: Vec<u32> = (0..16).map(|v| (v * 13) % 256).collect();
    let mut buf = src.clone();
    let mut scratch = vec![0u32; 16];
    let boxes = BlurBoxes::for_radius(0.0).unwrap();
    gauss_blur(&mut buf, &mut scratch, 4, 4, boxes).unwrap();
    assert_eq!(buf, src);
}
