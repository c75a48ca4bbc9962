//! Registry configuration stored in instance storage.

use soroban_sdk::contracttype;

/// Page size used by `list_users` when the caller gives no limit.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound on a single `list_users` page.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Tunable limits for the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl RegistryConfig {
    pub fn is_valid(&self) -> bool {
        self.default_page_size > 0
            && self.max_page_size > 0
            && self.default_page_size <= self.max_page_size
    }

    /// Resolve a caller-supplied limit to an effective page size.
    pub fn page_size(&self, limit: Option<u32>) -> u32 {
        limit
            .unwrap_or(self.default_page_size)
            .min(self.max_page_size)
    }
}

/// Compute the `[start, end)` window of a page over `len` entries.
///
/// An offset at or past the end yields an empty window.
pub fn page_bounds(len: u32, offset: u32, size: u32) -> (u32, u32) {
    let start = offset.min(len);
    let end = start.saturating_add(size).min(len);
    (start, end)
}
