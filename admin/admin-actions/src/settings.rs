use serde::Deserialize;

const DEFAULT_PAGE_SIZE: u32 = 10;

/// Settings shared by every table and form of the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminSettings {
    /// Rows fetched per page.
    pub page_size: u32,
    /// Wrap updated scalars in `{ set: value }`.
    pub use_set: bool,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            use_set: true,
        }
    }
}
