//! Local storage for the admin editor's own settings.
//!
//! Layout documents live behind the persistence adapter; this module only
//! covers the editor's machine-local preferences (log level, autosave
//! cadence, default zoom), stored as TOML in the platform config directory.

pub mod config;
