//! Viewer bridge: scene construction and press-event resolution.
//!
//! The viewer is a pure function of its inputs. [`build_scene`] maps a
//! document snapshot, the live seat statuses, and the current selection to a
//! renderable [`Scene`]; rendering the same inputs twice yields the same
//! scene, so the host UI can re-render on every state change without
//! caching concerns. Nothing in this module mutates the document: a press
//! resolves to a [`ViewerEvent`] that the caller routes into an edit
//! session, then re-renders from the updated snapshot.
//!
//! All scene types are serializable DTOs so a host UI (the mobile client's
//! canvas, a web preview) can consume the scene as JSON. Layer order inside
//! [`Scene`] is the paint order: decorations first, then text labels, then
//! seats, which keeps seats on top for correct occlusion.

use std::collections::HashMap;

use seatmap_core::{LayoutDocument, Point, SeatId, SeatStatus, Workspace};
use serde::{Deserialize, Serialize};

/// Press-to-seat resolution radius in floor-plan units.
const SEAT_HIT_RADIUS: f64 = 16.0;

/// Fallback colors for seats whose category cannot be resolved (only
/// possible on documents that have not passed validation).
const FALLBACK_FILL: &str = "#cccccc";
const FALLBACK_TEXT: &str = "#000000";

/// The single event the viewer surface emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "event", content = "payload")]
pub enum ViewerEvent {
    SeatPressed(SeatId),
}

/// Pan/zoom defaults derived from the document's workspace settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportHints {
    /// Initial zoom factor, when the document specifies one.
    pub initial_scale: Option<f64>,
    /// Zoom factor to use when fitting the plan to the viewport width.
    pub fit_width_scale: Option<f64>,
    /// Extra margin around the plan before content is culled.
    pub visibility_offset: f64,
    /// When set, image anchors must not be fetched from the network.
    pub airplane_mode: bool,
}

impl From<&Workspace> for ViewportHints {
    fn from(workspace: &Workspace) -> Self {
        Self {
            initial_scale: workspace.initial_view_scale,
            fit_width_scale: workspace.initial_view_scale_for_width,
            visibility_offset: workspace.visibility_offset,
            airplane_mode: workspace.airplane_mode,
        }
    }
}

/// A decorative element painted beneath labels and seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DecorationNode {
    Shape {
        points: Vec<Point>,
        fill: String,
        stroke: String,
        stroke_width: f64,
        closed: bool,
    },
    Polyline {
        points: Vec<Point>,
        stroke: String,
        stroke_width: f64,
    },
    Image {
        position: Point,
        width: f64,
        height: f64,
        href: String,
    },
}

/// A text label painted above decorations, beneath seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelNode {
    pub position: Point,
    pub text: String,
    pub font_size: f64,
    pub color: String,
}

/// One seat as the viewer paints it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatNode {
    pub seat_id: SeatId,
    pub label: String,
    pub position: Point,
    /// Live status when the caller supplied one, the document status
    /// otherwise.
    pub status: SeatStatus,
    /// Category fill color.
    pub fill: String,
    /// Category label color.
    pub text_color: String,
    /// Seats in free-seating sections get no assignment affordance.
    pub free_seating: bool,
    pub selected: bool,
}

/// The complete renderable scene, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub viewport: ViewportHints,
    pub decorations: Vec<DecorationNode>,
    pub labels: Vec<LabelNode>,
    pub seats: Vec<SeatNode>,
}

/// Builds the scene for one frame.
///
/// Pure and side-effect free: identical inputs produce identical scenes.
/// `live_statuses` overlays the statuses the document was loaded with,
/// letting a viewer show occupancy fresher than its document snapshot.
pub fn build_scene(
    doc: &LayoutDocument,
    live_statuses: &HashMap<SeatId, SeatStatus>,
    selected_seat_id: Option<&str>,
) -> Scene {
    let mut decorations =
        Vec::with_capacity(doc.shapes.len() + doc.polylines.len() + doc.images.len());
    for shape in &doc.shapes {
        decorations.push(DecorationNode::Shape {
            points: shape.points.clone(),
            fill: shape.fill.clone(),
            stroke: shape.stroke.clone(),
            stroke_width: shape.stroke_width,
            closed: shape.closed,
        });
    }
    for polyline in &doc.polylines {
        decorations.push(DecorationNode::Polyline {
            points: polyline.points.clone(),
            stroke: polyline.stroke.clone(),
            stroke_width: polyline.stroke_width,
        });
    }
    for image in &doc.images {
        decorations.push(DecorationNode::Image {
            position: image.position,
            width: image.width,
            height: image.height,
            href: image.href.clone(),
        });
    }

    let labels = doc
        .text_labels
        .iter()
        .map(|label| LabelNode {
            position: label.position,
            text: label.text.clone(),
            font_size: label.font_size,
            color: label.color.clone(),
        })
        .collect();

    let seats = doc
        .seats
        .iter()
        .map(|seat| {
            let category = doc.category(&seat.category_id);
            SeatNode {
                seat_id: seat.id.clone(),
                label: seat.label.clone(),
                position: seat.position,
                status: live_statuses.get(&seat.id).copied().unwrap_or(seat.status),
                fill: category
                    .map(|c| c.color.clone())
                    .unwrap_or_else(|| FALLBACK_FILL.to_string()),
                text_color: category
                    .map(|c| c.text_color.clone())
                    .unwrap_or_else(|| FALLBACK_TEXT.to_string()),
                free_seating: doc
                    .section(&seat.section_id)
                    .map(|s| s.free_seating)
                    .unwrap_or(false),
                selected: selected_seat_id == Some(seat.id.as_str()),
            }
        })
        .collect();

    Scene {
        viewport: ViewportHints::from(&doc.workspace),
        decorations,
        labels,
        seats,
    }
}

/// Resolves a press at `point` to a viewer event.
///
/// Seats are the only pressable nodes. The topmost seat wins: seats are
/// painted in scene order, so the search runs back to front. Returns `None`
/// when the press lands on no seat.
pub fn hit_test(scene: &Scene, point: Point) -> Option<ViewerEvent> {
    scene
        .seats
        .iter()
        .rev()
        .find(|seat| {
            let dx = seat.position.x - point.x;
            let dy = seat.position.y - point.y;
            dx * dx + dy * dy <= SEAT_HIT_RADIUS * SEAT_HIT_RADIUS
        })
        .map(|seat| ViewerEvent::SeatPressed(seat.seat_id.clone()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
