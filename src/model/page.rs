use serde::{Deserialize, Serialize};

/// Pagination envelope shared by every list endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default = "first_page")]
    pub pages: u32,
    #[serde(default)]
    pub items: T,
}

fn first_page() -> u32 {
    1
}
