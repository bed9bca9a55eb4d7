//! Integration tests for the seatmap-core wire format.
//!
//! These tests verify complete round-trip encoding and decoding of layout
//! documents through the public API, including preservation of fields the
//! crate does not model.

use seatmap_core::{
    from_json, to_json, to_value, ImageAnchor, LayoutDocument, LayoutVersion, Point, Polyline,
    Seat, SeatStatus, Shape, TextLabel,
};
use serde_json::{json, Map, Value};

/// Encodes a document and decodes it back, asserting equality.
fn roundtrip(doc: &LayoutDocument) -> LayoutDocument {
    let text = to_json(doc).expect("encode must succeed");
    from_json(&text).expect("decode must succeed")
}

/// A fully populated document exercising every entity and primitive kind.
fn make_full_document() -> LayoutDocument {
    let mut doc = LayoutDocument::new("Central Library");
    let section_id = doc.sections[0].id.clone();
    let category_id = doc.categories[0].id.clone();
    let quiet_section = doc.add_section("Quiet Zone", "#e8f0e8", "#88aa88", true);

    for (i, status) in [SeatStatus::Available, SeatStatus::Reserved, SeatStatus::Maintenance]
        .into_iter()
        .enumerate()
    {
        doc.upsert_seat(Seat {
            id: format!("seat-{i}"),
            label: format!("A-{i}"),
            section_id: section_id.clone(),
            category_id: category_id.clone(),
            position: Point::new(40.0 * i as f64, 25.0),
            status,
            assigned_person_id: None,
            extra: Map::new(),
        })
        .expect("seat references exist");
    }
    doc.upsert_seat(Seat {
        id: "seat-q".to_string(),
        label: "Q-1".to_string(),
        section_id: quiet_section,
        category_id,
        position: Point::new(200.0, 120.0),
        status: SeatStatus::Occupied,
        assigned_person_id: Some("patron-7".to_string()),
        extra: Map::new(),
    })
    .expect("seat references exist");

    doc.shapes.push(Shape {
        id: "wall-north".to_string(),
        points: vec![Point::new(0.0, 0.0), Point::new(400.0, 0.0), Point::new(400.0, 10.0)],
        fill: "#dddddd".to_string(),
        stroke: "#555555".to_string(),
        stroke_width: 2.0,
        closed: true,
        extra: Map::new(),
    });
    doc.polylines.push(Polyline {
        id: "divider".to_string(),
        points: vec![Point::new(150.0, 0.0), Point::new(150.0, 300.0)],
        stroke: "#aaaaaa".to_string(),
        stroke_width: 1.5,
        extra: Map::new(),
    });
    doc.text_labels.push(TextLabel {
        id: "entrance".to_string(),
        position: Point::new(10.0, 290.0),
        text: "Entrance".to_string(),
        font_size: 16.0,
        color: "#222222".to_string(),
        extra: Map::new(),
    });
    doc.images.push(ImageAnchor {
        id: "logo".to_string(),
        position: Point::new(380.0, 280.0),
        width: 32.0,
        height: 32.0,
        href: "https://cdn.example.com/branch-logo.png".to_string(),
        extra: Map::new(),
    });
    doc.workspace.initial_view_scale = Some(0.75);
    doc.workspace.visibility_offset = 12.0;
    doc
}

#[test]
fn test_roundtrip_full_document() {
    let original = make_full_document();
    assert_eq!(original, roundtrip(&original));
}

#[test]
fn test_roundtrip_preserves_seat_status_and_assignment() {
    let doc = roundtrip(&make_full_document());
    let seat = doc.seat("seat-q").expect("assigned seat survives");
    assert_eq!(seat.status, SeatStatus::Occupied);
    assert_eq!(seat.assigned_person_id.as_deref(), Some("patron-7"));
}

#[test]
fn test_roundtrip_preserves_published_version_and_timestamp() {
    let mut doc = make_full_document();
    doc.version = LayoutVersion::Published;
    doc.published_at = Some(1_722_000_000_000);

    let decoded = roundtrip(&doc);
    assert_eq!(decoded.version, LayoutVersion::Published);
    assert_eq!(decoded.published_at, Some(1_722_000_000_000));
}

#[test]
fn test_unknown_fields_preserved_at_every_level() {
    // A document as another editor version might have written it, carrying
    // fields this crate knows nothing about at four different nesting levels.
    let source = json!({
        "name": "Annex",
        "floorRevision": 9,
        "categories": [
            {"id": "c1", "name": "Standard", "color": "#4a90d9", "textColor": "#fff",
             "icon": "book"}
        ],
        "sections": [
            {"id": "a", "name": "A", "color": "#eee", "stroke": "#999",
             "capacityHint": 40}
        ],
        "seats": [
            {"id": "s1", "label": "A-1", "sectionId": "a", "categoryId": "c1",
             "position": {"x": 0.0, "y": 0.0}, "status": "available",
             "powerOutlet": true}
        ],
        "workspace": {"visibilityOffset": 4.0, "gridSnap": 8}
    });

    let doc = seatmap_core::from_value(source).expect("foreign doc must parse");
    let out = to_value(&doc).expect("encode must succeed");

    assert_eq!(out["floorRevision"], 9);
    assert_eq!(out["categories"][0]["icon"], "book");
    assert_eq!(out["sections"][0]["capacityHint"], 40);
    assert_eq!(out["seats"][0]["powerOutlet"], true);
    assert_eq!(out["workspace"]["gridSnap"], 8);
}

#[test]
fn test_wire_field_names_are_camel_case() {
    let out = to_value(&make_full_document()).expect("encode must succeed");

    let seat = &out["seats"][0];
    assert!(seat.get("sectionId").is_some(), "sectionId must be camelCase");
    assert!(seat.get("categoryId").is_some());
    assert!(seat.get("section_id").is_none(), "snake_case must not leak");
    assert!(out.get("textLabels").is_some());
    assert_eq!(out["workspace"]["visibilityOffset"], Value::from(12.0));
}

#[test]
fn test_decode_does_not_validate_integrity() {
    // A seat pointing at a missing section parses fine; validate() is the
    // gate, not the parser.
    let doc = from_json(
        r#"{"name": "Broken",
            "seats": [{"id": "s1", "label": "X", "sectionId": "ghost",
                       "categoryId": "ghost", "position": {"x": 0.0, "y": 0.0}}]}"#,
    )
    .expect("decode must succeed even for invalid documents");

    assert!(doc.validate().is_err(), "validation must still catch it");
}
