use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: i64,
    pub login: String,

    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,

    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub browser_download_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub id: i64,
    pub tag_name: String,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub html_url: String,

    /// Release-level switch controlling whether its plugin reaches the catalog.
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default)]
    pub assets: Vec<AssetRecord>,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,

    /// Only ever changed by the server; the console never flips it locally.
    #[serde(default)]
    pub watched: bool,

    #[serde(default)]
    pub author: Option<AuthorRef>,

    #[serde(default)]
    pub releases: Vec<ReleaseRecord>,
}

impl RepositoryRecord {
    pub fn open_release_count(&self) -> usize {
        self.releases.iter().filter(|r| r.visible).count()
    }

    /// Sets `visible` on every release with `release_id`. Returns how many matched.
    pub fn set_release_visible(&mut self, release_id: i64, visible: bool) -> usize {
        let mut hits = 0;
        for release in self.releases.iter_mut().filter(|r| r.id == release_id) {
            release.visible = visible;
            hits += 1;
        }
        hits
    }
}
