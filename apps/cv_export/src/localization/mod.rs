//! Localization overlay engine.
//!
//! `localize` never mutates its input: the base record is shared by every
//! locale in a run. Overlays only override fields on entries that already
//! exist; they never add, drop or reorder entries.

pub mod overlay;

pub use overlay::{localize, Localized, LocalizationOutcome};
