use cardkit_core::{DesignError, ElementKind, Unit};
use cardkit_designer::{Document, Element, ElementProps, MIN_ELEMENT_SIZE};
use serde_json::json;

#[test]
fn test_create_element_rejects_unknown_type() {
    let err = Element::with_props("hologram", 0.0, 0.0, None).unwrap_err();
    match err {
        DesignError::InvalidElementType { kind } => assert_eq!(kind, "hologram"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_create_element_merges_caller_props() {
    let el = Element::with_props(
        "text",
        10.0,
        10.0,
        Some(json!({"text": "Dragon", "fontSize": 18.0, "align": "center"})),
    )
    .unwrap();
    match &el.props {
        ElementProps::Text(p) => {
            assert_eq!(p.text, "Dragon");
            assert_eq!(p.font_size, 18.0);
            assert_eq!(p.font, "Arial");
            assert_eq!(p.width, 200.0);
        }
        _ => panic!("expected text element"),
    }
}

#[test]
fn test_resize_floor_holds_for_any_negative_delta() {
    let mut doc = Document::default();
    doc.add_element(Element::new(ElementKind::Image, 0.0, 0.0));
    for (w, h) in [(-1.0, -1.0), (0.0, 19.9), (19.0, 5.0), (-500.0, 2.0)] {
        doc.resize_element(0, w, h);
        assert!(doc.element(0).unwrap().width() >= MIN_ELEMENT_SIZE);
        assert!(doc.element(0).unwrap().height() >= MIN_ELEMENT_SIZE);
    }
}

#[test]
fn test_text_resize_keeps_height_for_layout() {
    let mut doc = Document::default();
    doc.add_element(Element::new(ElementKind::Text, 0.0, 0.0));
    doc.resize_element(0, 150.0, 400.0);
    let el = doc.element(0).unwrap();
    // Width applies; height stays until the editor re-derives it from
    // the wrapped text.
    assert_eq!(el.width(), 150.0);
    assert_eq!(el.height(), 100.0);
}

#[test]
fn test_remove_and_stale_index() {
    let mut doc = Document::default();
    doc.add_element(Element::new(ElementKind::Shape, 0.0, 0.0));
    assert!(doc.remove_element(0).is_some());
    assert!(doc.remove_element(0).is_none());
    doc.resize_element(3, 50.0, 50.0); // no-op, no panic
}

#[test]
fn test_document_roundtrips_through_json() {
    let mut doc = Document::new(63.0, 88.0, Unit::Mm, 300);
    doc.background_color = "#112233".to_string();
    let mut el = Element::new(ElementKind::Qrcode, 5.0, 6.0);
    el.id = Some("qr1".to_string());
    doc.add_element(el);

    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn test_pixel_size_never_zero() {
    let doc = Document::new(0.0, 0.0, Unit::Px, 96);
    assert_eq!(doc.pixel_size(), (1, 1));
}
