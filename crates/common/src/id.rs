//! ID generation utilities.

use ulid::Ulid;

/// ID generator for channels, comments and view events.
///
/// Video IDs are chosen by the uploader and never generated here.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs sort by creation time, so ordering by ID approximates
    /// insertion order for comments and views.
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}
