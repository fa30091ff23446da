use super::*;

fn cfg(width: u32, height: u32, fps: u32) -> EncodeConfig {
    EncodeConfig::new(
        "out/lesson.mp4",
        Canvas { width, height },
        fps,
    )
}

#[test]
fn odd_zero_and_fpsless_configs_are_rejected() {
    assert!(cfg(0, 10, 30).validate().is_err());
    assert!(cfg(11, 10, 30).validate().is_err());
    assert!(cfg(10, 10, 0).validate().is_err());
    assert!(cfg(854, 480, 15).validate().is_ok());

    let mut bad_crf = cfg(10, 10, 30);
    bad_crf.crf = 60;
    assert!(bad_crf.validate().is_err());
}

#[test]
fn args_describe_raw_rgba_in_and_h264_out() {
    let args = cfg(1280, 720, 30).ffmpeg_args();
    let joined = args.join(" ");
    assert!(joined.starts_with("-y "));
    assert!(joined.contains("-pix_fmt rgba -s 1280x720 -r 30 -i pipe:0"));
    assert!(joined.contains("-c:v libx264"));
    assert!(joined.contains("-pix_fmt yuv420p"));
    assert_eq!(args.last().map(String::as_str), Some("out/lesson.mp4"));

    let mut keep = cfg(2, 2, 1);
    keep.overwrite = false;
    assert_eq!(keep.ffmpeg_args()[0], "-n");
}

#[test]
fn premultiplied_half_red_over_black() {
    let src = [128u8, 0, 0, 128];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, true, Rgba8::BLACK).unwrap();
    assert_eq!(dst, [128, 0, 0, 255]);
}

#[test]
fn straight_transparent_pixel_shows_background() {
    let src = [255u8, 255, 255, 0];
    let mut dst = [0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &src, false, Rgba8::rgb(10, 20, 30)).unwrap();
    assert_eq!(dst, [10, 20, 30, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = [0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 4], true, Rgba8::BLACK).is_err());
}
