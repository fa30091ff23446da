use super::*;
use crate::{
    Animation, Locale, Stage, StageSettings,
    foundation::core::{Canvas, Fps, Rgba8},
    scene::visual::Visual,
};
use kurbo::Rect;

fn timeline(width: u32, height: u32) -> Timeline {
    let settings = StageSettings {
        fps: Fps { num: 10, den: 1 },
        canvas: Canvas { width, height },
        background: Rgba8::rgb(0, 0, 255),
    };
    let mut s = Stage::new(settings, Locale::En).unwrap();
    let id = s.stage(
        Visual::rect(Rect::new(-1.0, -1.0, 1.0, 1.0))
            .without_stroke()
            .with_fill(Rgba8::rgb(255, 0, 0), 1.0),
    );
    s.play([Animation::fade_in(id)], 0.3).unwrap();
    s.wait(0.3).unwrap();
    s.finish().unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("animtice_{name}_{}", std::process::id()))
}

#[test]
fn shapes_only_frame_has_requested_size_and_colors() {
    let t = timeline(32, 16);
    let frame = render_frame(&t, FrameIndex(5), &Rasterizer::without_fonts()).unwrap();
    assert_eq!((frame.width, frame.height), (32, 16));
    assert_eq!(frame.data.len(), 32 * 16 * 4);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(16, 8), Some([255, 0, 0, 255]));
}

#[test]
fn static_tail_is_reused() {
    let t = timeline(32, 16);
    let dir = scratch_dir("png");
    let stats = render_frames_png(&t, None, &dir, &Rasterizer::without_fonts()).unwrap();
    assert_eq!(stats.frames_total, 6);
    assert!(stats.frames_reused >= 2, "{stats:?}");
    assert_eq!(stats.frames_rendered + stats.frames_reused, 6);
    assert!(dir.join("frame_00005.png").is_file());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn ranges_past_the_end_are_rejected() {
    let t = timeline(32, 16);
    let range = Some(FrameRange {
        start: FrameIndex(2),
        end: FrameIndex(99),
    });
    let dir = scratch_dir("range");
    assert!(render_frames_png(&t, range, &dir, &Rasterizer::without_fonts()).is_err());
    assert!(render_frame_svg(&t, FrameIndex(6)).is_err());
}

#[test]
fn odd_canvas_cannot_be_encoded() {
    let t = timeline(33, 16);
    let out = scratch_dir("odd").join("out.mp4");
    let err = render_to_mp4(&t, out, RenderToMp4Opts::default(), &Rasterizer::without_fonts())
        .unwrap_err();
    assert!(matches!(err, TiceError::Validation(_)), "{err}");
}
