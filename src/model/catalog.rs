use serde::{Deserialize, Deserializer, Serialize};

/// The store serializes unset `plugin.json` fields as `null`; read those as empty.
fn nullable<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginDependency {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(default)]
    pub need: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffiliationTag {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default)]
    pub background_hex: Option<String>,
    #[serde(default)]
    pub foreground_hex: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub plugin_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginManage {
    #[serde(default, deserialize_with = "nullable")]
    pub can_switch: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub can_open_folder: bool,
}

/// One published version of a plugin (the `plugin.json` projection).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PluginRecord {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub authors: String,
    #[serde(deserialize_with = "nullable")]
    pub web_uri: String,
    #[serde(deserialize_with = "nullable")]
    pub logo: String,
    pub plugin_manage: Option<PluginManage>,
    pub affiliation_tag: Option<AffiliationTag>,
    #[serde(deserialize_with = "nullable")]
    pub sdk_version: String,
    pub dll_name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub dependencies: Vec<PluginDependency>,
    pub download_url: Option<String>,
    /// Older manifests name the link `Download`; some carry both.
    #[serde(rename = "Download", skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<String>,
}

impl PluginRecord {
    pub fn download_link(&self) -> Option<&str> {
        self.download_url
            .as_deref()
            .or(self.download.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// A plugin's default-version record plus every version it has published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginCatalogEntry {
    pub record: PluginRecord,
    pub versions: Vec<String>,
}

impl PluginCatalogEntry {
    /// Builds an entry, making sure the default version is listed.
    pub fn new(record: PluginRecord, versions: Vec<String>) -> Self {
        let mut listed: Vec<String> = Vec::with_capacity(versions.len() + 1);
        for v in versions {
            let v = v.trim();
            if !v.is_empty() && !listed.iter().any(|x| x == v) {
                listed.push(v.to_string());
            }
        }
        if !record.version.is_empty() && !listed.contains(&record.version) {
            listed.insert(0, record.version.clone());
        }
        Self {
            record,
            versions: listed,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn default_version(&self) -> &str {
        &self.record.version
    }
}
