use cardkit_core::{ElementKind, Unit};
use cardkit_designer::{render, render_fit, Document, Element};
use serde_json::json;

fn shape(x: f32, y: f32, w: f32, h: f32, fill: &str) -> Element {
    let mut el = Element::with_props(
        "shape",
        x,
        y,
        Some(json!({"width": w, "height": h, "fill": fill, "outlineWidth": 0.0})),
    )
    .unwrap();
    el.id = None;
    el
}

#[test]
fn test_surface_matches_declared_pixel_size() {
    let doc = Document::new(120.0, 80.0, Unit::Px, 96);
    let img = render(&doc);
    assert_eq!((img.width(), img.height()), (120, 80));

    let mm = Document::new(25.4, 25.4, Unit::Mm, 96);
    let img = render(&mm);
    assert_eq!((img.width(), img.height()), (96, 96));
}

#[test]
fn test_background_fill() {
    let mut doc = Document::new(10.0, 10.0, Unit::Px, 96);
    doc.background_color = "#FF0000".to_string();
    let img = render(&doc);
    assert_eq!(img.get_pixel(5, 5).0, [255, 0, 0, 255]);
}

#[test]
fn test_z_order_last_element_on_top() {
    let mut doc = Document::new(200.0, 200.0, Unit::Px, 96);
    doc.add_element(shape(10.0, 10.0, 100.0, 100.0, "#FF0000")); // A
    doc.add_element(shape(40.0, 40.0, 100.0, 100.0, "#00FF00")); // B
    doc.add_element(shape(60.0, 60.0, 100.0, 100.0, "#0000FF")); // C

    let img = render(&doc);
    // A pixel inside all three shows C; inside A and B only shows B.
    assert_eq!(img.get_pixel(80, 80).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(50, 50).0, [0, 255, 0, 255]);
    assert_eq!(img.get_pixel(20, 20).0, [255, 0, 0, 255]);
}

#[test]
fn test_render_is_deterministic() {
    let mut doc = Document::new(150.0, 150.0, Unit::Px, 96);
    doc.add_element(shape(5.0, 5.0, 60.0, 60.0, "#336699"));
    doc.add_element(Element::new(ElementKind::Qrcode, 70.0, 70.0));

    let a = render(&doc);
    let b = render(&doc);
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn test_fit_render_matches_declared_render_over_common_region() {
    let mut doc = Document::new(400.0, 400.0, Unit::Px, 96);
    doc.add_element(shape(10.0, 10.0, 120.0, 90.0, "#AA2200"));
    doc.add_element(shape(90.0, 60.0, 80.0, 80.0, "#004488"));

    let declared = render(&doc);
    let fit = render_fit(&doc);

    // Auto-fit sizing: content extent plus 40 px padding.
    assert_eq!((fit.width(), fit.height()), (210, 180));

    let w = declared.width().min(fit.width());
    let h = declared.height().min(fit.height());
    for y in 0..h {
        for x in 0..w {
            assert_eq!(
                declared.get_pixel(x, y),
                fit.get_pixel(x, y),
                "pixel mismatch at ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_opacity_blends_with_background() {
    let mut doc = Document::new(50.0, 50.0, Unit::Px, 96);
    doc.background_color = "#FFFFFF".to_string();
    doc.add_element(
        Element::with_props(
            "shape",
            0.0,
            0.0,
            Some(json!({"width": 50.0, "height": 50.0, "fill": "#000000",
                        "opacity": 0.5, "outlineWidth": 0.0})),
        )
        .unwrap(),
    );

    let img = render(&doc);
    let [r, g, b, a] = img.get_pixel(25, 25).0;
    assert_eq!(a, 255);
    // Half-opaque black over white lands mid-gray.
    for channel in [r, g, b] {
        assert!((120..=135).contains(&channel), "channel {channel}");
    }
}

#[test]
fn test_missing_image_renders_placeholder_not_abort() {
    let mut doc = Document::new(200.0, 200.0, Unit::Px, 96);
    doc.add_element(
        Element::with_props(
            "image",
            10.0,
            10.0,
            Some(json!({"path": "/no/such/file.png", "width": 50.0, "height": 50.0})),
        )
        .unwrap(),
    );
    doc.add_element(shape(100.0, 100.0, 50.0, 50.0, "#00FF00"));

    let img = render(&doc);
    // Placeholder is the lightgray stand-in.
    assert_eq!(img.get_pixel(35, 35).0, [211, 211, 211, 255]);
    // And the rest of the document still rendered.
    assert_eq!(img.get_pixel(125, 125).0, [0, 255, 0, 255]);
}

#[test]
fn test_qrcode_draws_dark_and_light_modules() {
    let mut doc = Document::new(200.0, 200.0, Unit::Px, 96);
    doc.background_color = "#808080".to_string();
    doc.add_element(
        Element::with_props(
            "qrcode",
            20.0,
            20.0,
            Some(json!({"content": "cardkit", "width": 160.0, "height": 160.0})),
        )
        .unwrap(),
    );

    let img = render(&doc);
    let region: Vec<[u8; 4]> = (20..180)
        .flat_map(|y| (20..180).map(move |x| (x, y)))
        .map(|(x, y)| img.get_pixel(x, y).0)
        .collect();
    // The QR area contains both near-black modules and its white
    // background (quiet zone included).
    assert!(region.iter().any(|p| p[0] < 60 && p[1] < 60 && p[2] < 60));
    assert!(region.iter().any(|p| p[0] > 200 && p[1] > 200 && p[2] > 200));
}

#[test]
fn test_dashed_outline_differs_from_solid() {
    let base = json!({"width": 100.0, "height": 100.0, "fill": "white",
                      "outline": "black", "outlineWidth": 3.0});
    let mut solid_doc = Document::new(140.0, 140.0, Unit::Px, 96);
    solid_doc.add_element(Element::with_props("shape", 20.0, 20.0, Some(base.clone())).unwrap());

    let mut dashed_doc = Document::new(140.0, 140.0, Unit::Px, 96);
    let mut props = base;
    props["dash"] = json!("Dash");
    dashed_doc.add_element(Element::with_props("shape", 20.0, 20.0, Some(props)).unwrap());

    let solid = render(&solid_doc);
    let dashed = render(&dashed_doc);

    // Along the top border, solid is continuously dark; dashed has gaps.
    let dark = |img: &image::RgbaImage, x: u32| img.get_pixel(x, 20).0[0] < 100;
    let solid_dark = (25..115).filter(|&x| dark(&solid, x)).count();
    let dashed_dark = (25..115).filter(|&x| dark(&dashed, x)).count();
    assert_eq!(solid_dark, 90);
    assert!(dashed_dark < 90, "dashed border should have gaps");
    assert!(dashed_dark > 0, "dashed border should still draw");
}

#[test]
fn test_rounded_corners_leave_background() {
    let mut doc = Document::new(120.0, 120.0, Unit::Px, 96);
    doc.background_color = "#0000FF".to_string();
    doc.add_element(
        Element::with_props(
            "shape",
            10.0,
            10.0,
            Some(json!({"width": 100.0, "height": 100.0, "fill": "#FFFFFF",
                        "radius": 30.0, "outlineWidth": 0.0})),
        )
        .unwrap(),
    );

    let img = render(&doc);
    // The extreme corner pixel stays background; the center is filled.
    assert_eq!(img.get_pixel(11, 11).0, [0, 0, 255, 255]);
    assert_eq!(img.get_pixel(60, 60).0, [255, 255, 255, 255]);
}
