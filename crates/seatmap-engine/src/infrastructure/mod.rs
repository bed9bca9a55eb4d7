//! Infrastructure adapters for the seatmap engine.
//!
//! - **`persistence`** – The storage boundary: the [`PersistenceAdapter`]
//!   trait plus the in-memory implementation used by tests and tooling.
//! - **`viewer_bridge`** – Presentation boundary: turns a document plus
//!   live seat statuses into a renderable scene and resolves press events.
//! - **`storage`** – Local TOML configuration for the admin editor itself.
//!
//! [`PersistenceAdapter`]: persistence::PersistenceAdapter

pub mod persistence;
pub mod storage;
pub mod viewer_bridge;
