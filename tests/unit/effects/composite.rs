use super::*;

#[test]
fn pack_and_unpack_keep_channel_order() {
    let px = pack_argb(0x80, 0x10, 0x20, 0x30);
    assert_eq!(px, 0x8010_2030);
    assert_eq!(unpack_argb(px), [0x80, 0x10, 0x20, 0x30]);
}

#[test]
fn straight_colours_are_premultiplied() {
    assert_eq!(from_straight_rgba(255, 255, 255, 255), 0xffff_ffff);
    assert_eq!(from_straight_rgba(255, 0, 0, 128), 0x8080_0000);
    assert_eq!(from_straight_rgba(200, 100, 50, 0), 0);
}

#[test]
fn over_transparent_src_is_noop() {
    let dst = 0x4010_2030;
    assert_eq!(over(dst, 0), dst);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over(0xff00_0000, 0xffff_ffff), 0xffff_ffff);
}

#[test]
fn over_transparent_dst_returns_src() {
    let src = 0x8040_4040;
    assert_eq!(over(0, src), src);
}

#[test]
fn half_white_over_opaque_black_is_mid_grey() {
    let out = unpack_argb(over(0xff00_0000, 0x8080_8080));
    assert_eq!(out[0], 255);
    assert_eq!(out[1], 128);
    assert_eq!(out[2], 128);
    assert_eq!(out[3], 128);
}

#[test]
fn over_in_place_checks_sizes() {
    let mut dst = Surface::new(2, 2);
    let src = Surface::new(3, 2);
    assert!(over_in_place(&mut dst, &src).is_err());
}

#[test]
fn over_in_place_paints_every_pixel() {
    let mut dst = Surface::new(2, 2);
    dst.data_mut().fill(0xff00_0000);
    let mut src = Surface::new(2, 2);
    src.fill_rect(1, 0, 1, 2, 0xffff_ffff);
    over_in_place(&mut dst, &src).unwrap();
    assert_eq!(dst.pixel(0, 0), 0xff00_0000);
    assert_eq!(dst.pixel(1, 0), 0xffff_ffff);
    assert_eq!(dst.pixel(1, 1), 0xffff_ffff);
}
