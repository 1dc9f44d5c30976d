// Registry metadata document as returned by `GET <registry>/<package>`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unmodified registry response for one package.
///
/// Every field is optional and loosely typed: publishers put strings, objects
/// and arrays into the same fields, and a surprising shape must read as
/// "absent" rather than fail the whole document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMetadataDocument {
    #[serde(rename = "_id", default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub keywords: Option<Value>,
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: Option<Value>,
    #[serde(default)]
    pub versions: Option<Value>,
    #[serde(default)]
    pub repository: Option<Value>,
    #[serde(default)]
    pub homepage: Option<Value>,
    #[serde(default)]
    pub license: Option<Value>,
    #[serde(default)]
    pub maintainers: Option<Value>,
    #[serde(default)]
    pub time: Option<Value>,
    #[serde(default)]
    pub readme: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Maintainer {
    pub name: Option<String>,
    pub email: Option<String>,
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl RawMetadataDocument {
    pub fn id(&self) -> Option<&str> {
        non_empty_str(self.id.as_ref())
    }

    pub fn name(&self) -> Option<&str> {
        non_empty_str(self.name.as_ref())
    }

    pub fn description(&self) -> Option<&str> {
        non_empty_str(self.description.as_ref())
    }

    pub fn homepage(&self) -> Option<&str> {
        non_empty_str(self.homepage.as_ref())
    }

    pub fn readme(&self) -> Option<&str> {
        non_empty_str(self.readme.as_ref())
    }

    /// `dist-tags.latest`
    pub fn latest_version(&self) -> Option<&str> {
        non_empty_str(self.dist_tags.as_ref().and_then(|tags| tags.get("latest")))
    }

    /// Keywords in published order; non-string entries are skipped
    pub fn keywords(&self) -> Vec<String> {
        match &self.keywords {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Repository URL from either `"repository": "<url>"` or `{"url": "<url>"}`
    pub fn repository_url(&self) -> Option<&str> {
        match &self.repository {
            Some(Value::String(_)) => non_empty_str(self.repository.as_ref()),
            Some(Value::Object(repo)) => non_empty_str(repo.get("url")),
            _ => None,
        }
    }

    /// License from either a SPDX string or the legacy `{"type": "..."}` object
    pub fn license(&self) -> Option<String> {
        match &self.license {
            Some(Value::String(_)) => non_empty_str(self.license.as_ref()).map(str::to_string),
            Some(Value::Object(license)) => non_empty_str(license.get("type")).map(str::to_string),
            _ => None,
        }
    }

    pub fn maintainers(&self) -> Vec<Maintainer> {
        let Some(Value::Array(items)) = &self.maintainers else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match item {
                Value::Object(m) => Some(Maintainer {
                    name: non_empty_str(m.get("name")).map(str::to_string),
                    email: non_empty_str(m.get("email")).map(str::to_string),
                }),
                Value::String(s) if !s.trim().is_empty() => Some(Maintainer {
                    name: Some(s.trim().to_string()),
                    email: None,
                }),
                _ => None,
            })
            .collect()
    }

    /// Version-specific metadata, keyed by version string, in document order
    pub fn versions(&self) -> Map<String, Value> {
        match &self.versions {
            Some(Value::Object(versions)) => versions.clone(),
            _ => Map::new(),
        }
    }

    /// Publish timestamps keyed by version, plus `created` and `modified`
    pub fn time(&self) -> Map<String, Value> {
        match &self.time {
            Some(Value::Object(time)) => time.clone(),
            _ => Map::new(),
        }
    }

    pub fn published_at(&self, version: &str) -> Option<String> {
        non_empty_str(
            self.time
                .as_ref()
                .and_then(|time| time.get(version)),
        )
        .map(str::to_string)
    }
}
