use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 40,
        height: 20,
    }
}

#[test]
fn solid_background_fills_every_pixel() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect width="100%" height="100%" fill="#ff0000"/></svg>"##;
    let frame = Rasterizer::without_fonts().rasterize(svg, canvas()).unwrap();
    assert_eq!(frame.data.len(), 40 * 20 * 4);
    assert_eq!(frame.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(39, 19), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(40, 0), None);
}

#[test]
fn malformed_svg_is_a_render_error() {
    let err = Rasterizer::without_fonts()
        .rasterize("<svg", canvas())
        .unwrap_err();
    assert!(matches!(err, TiceError::Render(_)));
}

#[test]
fn unpremultiply_restores_straight_color() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba8(), vec![128, 0, 0, 128]);
}
