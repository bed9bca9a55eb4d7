//! The seating layout document: the aggregate owning categories, sections,
//! seats, and drawing primitives for one library floor plan.
//!
//! One `LayoutDocument` exists per library. It is created empty at first
//! edit (seeded with a "Standard" category and a "Section 1" section),
//! mutated by admin edits, and never hard-deleted; publishing supersedes the
//! prior published version.
//!
//! The document owns referential integrity between seats, sections, and
//! categories. Mutating operations either uphold the invariants themselves
//! (`upsert_seat`, `remove_section`) or are gated behind [`validate`], which
//! must pass before any persistence write or publish.
//!
//! Collections are plain `Vec`s rather than maps: layout JSON is an ordered
//! wire format and a round-trip must not reorder entities. Documents are
//! floor plans with at most a few thousand seats, so linear scans are not a
//! concern on any mutation path.
//!
//! [`validate`]: LayoutDocument::validate

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use super::geometry::{GeometryError, ImageAnchor, Point, Polyline, Shape, TextLabel};
use super::status::SeatStatus;

/// Identifier types. Ids arriving from the wire are arbitrary strings;
/// ids generated locally are UUID v4 in string form.
pub type CategoryId = String;
pub type SectionId = String;
pub type SeatId = String;
pub type PersonId = String;

// ── Errors ────────────────────────────────────────────────────────────────────

/// Document-level referential violation. Fatal to publish and to
/// persistence writes; the document must be repaired first.
#[derive(Debug, Error, PartialEq)]
pub enum IntegrityError {
    /// A seat references a section id that does not exist in the document.
    #[error("seat {seat_id} references unknown section {section_id}")]
    UnknownSection { seat_id: SeatId, section_id: SectionId },

    /// A seat references a category id that does not exist in the document.
    #[error("seat {seat_id} references unknown category {category_id}")]
    UnknownCategory { seat_id: SeatId, category_id: CategoryId },

    /// Two seats share the same id.
    #[error("duplicate seat id {0}")]
    DuplicateSeatId(SeatId),

    /// A seat has an assigned person without being occupied, or vice versa
    /// the occupied-via-assignment marker without a person.
    #[error("seat {seat_id} violates the assignment/status coupling")]
    AssignmentCoupling { seat_id: SeatId },

    /// A drawing primitive failed its own geometric validation.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// A mutation referenced an entity that does not exist. Recoverable: the
/// caller fixes the input and retries.
#[derive(Debug, Error, PartialEq)]
pub enum ReferenceError {
    #[error("unknown section: {0}")]
    UnknownSection(SectionId),
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
}

/// An entity cannot be removed while other entities still reference it.
/// Recoverable: the caller reassigns or removes the dependents first.
#[derive(Debug, Error, PartialEq)]
pub enum DependencyError {
    #[error("section {section_id} is still referenced by {seat_count} seat(s)")]
    SectionInUse { section_id: SectionId, seat_count: usize },
    #[error("category {category_id} is still referenced by {seat_count} seat(s)")]
    CategoryInUse { category_id: CategoryId, seat_count: usize },
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// A seat-type tag (e.g. "Standard", "Premium") referenced by seats.
///
/// Never deleted while seats reference it; see [`LayoutDocument::remove_category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Seat fill color; hex string.
    pub color: String,
    /// Seat label color; hex string.
    pub text_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named region of the floor plan grouping seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub color: String,
    pub stroke: String,
    /// When `true`, seats in this section are walk-in only and cannot be
    /// individually bound to a person.
    #[serde(default)]
    pub free_seating: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single seat placed on the floor plan.
///
/// Invariant: `assigned_person_id` is `Some` if and only if the seat is
/// occupied via a fixed assignment. The assignment protocol in the engine
/// crate is the only writer of this field; [`LayoutDocument::validate`]
/// rejects documents where the coupling is broken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: SeatId,
    pub label: String,
    pub section_id: SectionId,
    pub category_id: CategoryId,
    pub position: Point,
    #[serde(default)]
    pub status: SeatStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_person_id: Option<PersonId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Viewer rendering defaults. Purely a hint for the viewer; no domain
/// invariant depends on these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_view_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_view_scale_for_width: Option<f64>,
    #[serde(default)]
    pub visibility_offset: f64,
    /// When set, the viewer suppresses remote image fetches.
    #[serde(default)]
    pub airplane_mode: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            initial_view_scale: None,
            initial_view_scale_for_width: None,
            visibility_offset: 0.0,
            airplane_mode: false,
            extra: Map::new(),
        }
    }
}

/// Draft or published; viewers only ever see the last published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVersion {
    Draft,
    Published,
}

/// Aggregate occupancy counts across all seats of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyStats {
    pub total: usize,
    pub occupied: usize,
    pub available: usize,
    pub reserved: usize,
    pub maintenance: usize,
}

// ── The aggregate ─────────────────────────────────────────────────────────────

/// The complete layout of one library floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub polylines: Vec<Polyline>,
    #[serde(default)]
    pub text_labels: Vec<TextLabel>,
    #[serde(default)]
    pub images: Vec<ImageAnchor>,
    #[serde(default)]
    pub workspace: Workspace,
    #[serde(default = "default_version")]
    pub version: LayoutVersion,
    /// Epoch milliseconds of the last successful publish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_version() -> LayoutVersion {
    LayoutVersion::Draft
}

impl LayoutDocument {
    /// Creates the empty first-edit document: one "Standard" category and
    /// one "Section 1" section, no seats, draft version.
    pub fn new(name: impl Into<String>) -> Self {
        let mut doc = Self {
            name: name.into(),
            categories: Vec::new(),
            sections: Vec::new(),
            seats: Vec::new(),
            shapes: Vec::new(),
            polylines: Vec::new(),
            text_labels: Vec::new(),
            images: Vec::new(),
            workspace: Workspace::default(),
            version: LayoutVersion::Draft,
            published_at: None,
            extra: Map::new(),
        };
        doc.add_category("Standard", "#4a90d9", "#ffffff");
        doc.add_section("Section 1", "#f5f5f5", "#cccccc", false);
        doc
    }

    // ── Validation ────────────────────────────────────────────────────────────

    /// Checks document-wide integrity: seat references, seat id uniqueness,
    /// the assignment/status coupling, and geometric validity of all drawing
    /// primitives.
    ///
    /// Must pass before publish and before any persistence write.
    ///
    /// # Errors
    ///
    /// Returns the first [`IntegrityError`] found.
    pub fn validate(&self) -> Result<(), IntegrityError> {
        let mut seen = HashSet::with_capacity(self.seats.len());
        for seat in &self.seats {
            if !seen.insert(seat.id.as_str()) {
                return Err(IntegrityError::DuplicateSeatId(seat.id.clone()));
            }
            if self.section(&seat.section_id).is_none() {
                return Err(IntegrityError::UnknownSection {
                    seat_id: seat.id.clone(),
                    section_id: seat.section_id.clone(),
                });
            }
            if self.category(&seat.category_id).is_none() {
                return Err(IntegrityError::UnknownCategory {
                    seat_id: seat.id.clone(),
                    category_id: seat.category_id.clone(),
                });
            }
            // assigned_person_id is set iff the seat is occupied via a
            // fixed assignment; an assigned seat in any other status is
            // inconsistent.
            if seat.assigned_person_id.is_some() && seat.status != SeatStatus::Occupied {
                return Err(IntegrityError::AssignmentCoupling {
                    seat_id: seat.id.clone(),
                });
            }
        }

        for shape in &self.shapes {
            shape.validate()?;
        }
        for polyline in &self.polylines {
            polyline.validate()?;
        }
        for label in &self.text_labels {
            label.validate()?;
        }
        for image in &self.images {
            image.validate()?;
        }
        Ok(())
    }

    // ── Seat operations ───────────────────────────────────────────────────────

    /// Inserts `seat`, or replaces the existing seat with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the seat's section or category id is
    /// not present in the document. The document is left unchanged.
    pub fn upsert_seat(&mut self, seat: Seat) -> Result<(), ReferenceError> {
        if self.section(&seat.section_id).is_none() {
            return Err(ReferenceError::UnknownSection(seat.section_id.clone()));
        }
        if self.category(&seat.category_id).is_none() {
            return Err(ReferenceError::UnknownCategory(seat.category_id.clone()));
        }
        self.mark_edited();
        match self.seats.iter_mut().find(|s| s.id == seat.id) {
            Some(existing) => *existing = seat,
            None => self.seats.push(seat),
        }
        Ok(())
    }

    /// Removes the seat with `id`. Returns `true` if a seat was removed.
    pub fn remove_seat(&mut self, id: &str) -> bool {
        let before = self.seats.len();
        self.seats.retain(|s| s.id != id);
        let removed = self.seats.len() != before;
        if removed {
            self.mark_edited();
        }
        removed
    }

    // ── Section and category operations ───────────────────────────────────────

    /// Appends a new section with a generated unique id and returns the id.
    ///
    /// Section names are not required to be unique.
    pub fn add_section(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        stroke: impl Into<String>,
        free_seating: bool,
    ) -> SectionId {
        let id = Uuid::new_v4().to_string();
        self.sections.push(Section {
            id: id.clone(),
            name: name.into(),
            color: color.into(),
            stroke: stroke.into(),
            free_seating,
            extra: Map::new(),
        });
        self.mark_edited();
        id
    }

    /// Appends a new category with a generated unique id and returns the id.
    ///
    /// Category names are not required to be unique.
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> CategoryId {
        let id = Uuid::new_v4().to_string();
        self.categories.push(Category {
            id: id.clone(),
            name: name.into(),
            color: color.into(),
            text_color: text_color.into(),
            extra: Map::new(),
        });
        self.mark_edited();
        id
    }

    /// Removes the section with `id`. Returns `true` if a section was removed,
    /// `false` if no such section exists.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::SectionInUse`] while any seat still
    /// references the section; the caller must reassign or remove those
    /// seats first.
    pub fn remove_section(&mut self, id: &str) -> Result<bool, DependencyError> {
        let seat_count = self.seats.iter().filter(|s| s.section_id == id).count();
        if seat_count > 0 {
            return Err(DependencyError::SectionInUse {
                section_id: id.to_string(),
                seat_count,
            });
        }
        let before = self.sections.len();
        self.sections.retain(|s| s.id != id);
        let removed = self.sections.len() != before;
        if removed {
            self.mark_edited();
        }
        Ok(removed)
    }

    /// Removes the category with `id`. Same contract as [`remove_section`].
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::CategoryInUse`] while any seat still
    /// references the category.
    ///
    /// [`remove_section`]: LayoutDocument::remove_section
    pub fn remove_category(&mut self, id: &str) -> Result<bool, DependencyError> {
        let seat_count = self.seats.iter().filter(|s| s.category_id == id).count();
        if seat_count > 0 {
            return Err(DependencyError::CategoryInUse {
                category_id: id.to_string(),
                seat_count,
            });
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() != before;
        if removed {
            self.mark_edited();
        }
        Ok(removed)
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Mutable seat access for the engine's command handlers.
    ///
    /// Marks the document edited (draft) before handing out the reference,
    /// since callers only take this to mutate.
    pub fn seat_mut(&mut self, id: &str) -> Option<&mut Seat> {
        self.mark_edited();
        self.seats.iter_mut().find(|s| s.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Returns the seat currently fixed-assigned to `person_id`, if any.
    ///
    /// At most one such seat exists in a valid document.
    pub fn seat_of_person(&self, person_id: &str) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|s| s.assigned_person_id.as_deref() == Some(person_id))
    }

    // ── Derived state ─────────────────────────────────────────────────────────

    /// Folds all seat statuses into aggregate occupancy counts.
    pub fn occupancy(&self) -> OccupancyStats {
        let mut stats = OccupancyStats {
            total: self.seats.len(),
            ..OccupancyStats::default()
        };
        for seat in &self.seats {
            match seat.status {
                SeatStatus::Available => stats.available += 1,
                SeatStatus::Reserved => stats.reserved += 1,
                SeatStatus::Occupied => stats.occupied += 1,
                SeatStatus::Maintenance => stats.maintenance += 1,
            }
        }
        stats
    }

    /// Records that the document has been mutated.
    ///
    /// Edits made while the document is `Published` start an implicit new
    /// draft: the version flips back to `Draft` and stays there until the
    /// next publish. Viewers keep seeing the last published snapshot.
    pub fn mark_edited(&mut self) {
        if self.version == LayoutVersion::Published {
            debug!(name = %self.name, "published layout edited; starting implicit draft");
            self.version = LayoutVersion::Draft;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
