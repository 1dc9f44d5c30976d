// Detail view model for a selected package

use crate::constants;
use crate::display::{DisplayRecord, package_page};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub name: String,
    pub version: String,
    pub description: String,
    pub install_command: String,
    pub registry_link: String,
    pub source_link: String,
    pub stats: Stats,
    pub dependencies: Vec<Dependency>,
    pub dev_dependencies: Vec<Dependency>,
    /// Newest first
    pub history: Vec<VersionEntry>,
    pub readme: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub downloads: String,
    pub version_count: usize,
    pub license: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub name: String,
    pub range: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub version: String,
    pub published_at: String,
    /// e.g. "April 8, 2016"; the raw timestamp if it does not parse
    pub date: String,
    pub link: String,
    pub latest: bool,
}

impl DetailView {
    pub fn from_record(record: &DisplayRecord) -> Self {
        let latest = record.versions.get(&record.version);

        Self {
            name: record.name.clone(),
            version: record.version.clone(),
            description: record.description.clone(),
            install_command: record.install_command.clone(),
            registry_link: record.registry_link.clone(),
            source_link: record.source_link.clone(),
            stats: Stats {
                downloads: record.downloads.clone(),
                version_count: record.versions.len(),
                license: record
                    .license
                    .clone()
                    .unwrap_or_else(|| constants::DEFAULT_LICENSE.to_string()),
                updated: record
                    .last_published_at
                    .as_deref()
                    .and_then(parse_timestamp)
                    .map(|t| t.format("%-m/%-d/%Y").to_string())
                    .unwrap_or_else(|| "Recent".to_string()),
            },
            dependencies: dependencies(latest, "dependencies"),
            dev_dependencies: dependencies(latest, "devDependencies"),
            history: version_history(&record.name, &record.time),
            readme: record.readme.clone(),
        }
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn dependencies(version_data: Option<&Value>, field: &str) -> Vec<Dependency> {
    let Some(Value::Object(deps)) = version_data.and_then(|v| v.get(field)) else {
        return Vec::new();
    };

    deps.iter()
        .map(|(name, range)| Dependency {
            name: name.clone(),
            range: match range {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            link: package_page(name),
        })
        .collect()
}

/// Published versions from the `time` mapping, newest first. Entries whose
/// timestamp does not parse go last, in document order.
pub fn version_history(name: &str, time: &Map<String, Value>) -> Vec<VersionEntry> {
    let mut entries: Vec<(Option<DateTime<Utc>>, &str, &str)> = time
        .iter()
        .filter(|(key, _)| !constants::RESERVED_TIME_KEYS.contains(&key.as_str()))
        .filter_map(|(version, value)| {
            value
                .as_str()
                .map(|raw| (parse_timestamp(raw), version.as_str(), raw))
        })
        .collect();

    // Stable sort: None compares lowest, so reversing puts it last
    entries.sort_by(|a, b| b.0.cmp(&a.0));

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (parsed, version, raw))| VersionEntry {
            version: version.to_string(),
            published_at: raw.to_string(),
            date: parsed
                .map(|t| t.format("%B %-d, %Y").to_string())
                .unwrap_or_else(|| raw.to_string()),
            link: format!("{}/v/{}", package_page(name), version),
            latest: idx == 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::to_display_record;
    use crate::registry::DownloadCount;
    use serde_json::json;

    fn record(doc: Value) -> DisplayRecord {
        let doc = serde_json::from_value(doc).unwrap();
        to_display_record(&doc, "pkg", DownloadCount::Known(1_500), 0)
    }

    fn sample() -> DisplayRecord {
        record(json!({
            "name": "left-pad",
            "license": "WTFPL",
            "dist-tags": {"latest": "1.3.0"},
            "versions": {
                "1.2.0": {"dependencies": {"old": "^0.1.0"}},
                "1.3.0": {
                    "dependencies": {"zeta": "^2.0.0", "alpha": "~1.0.0"},
                    "devDependencies": {"tape": "*"}
                }
            },
            "time": {
                "created": "2014-03-14T00:00:00.000Z",
                "modified": "2022-01-01T00:00:00.000Z",
                "1.2.0": "2015-11-20T10:00:00.000Z",
                "1.3.0": "2016-04-08T03:42:48.000Z"
            },
            "readme": "# left-pad"
        }))
    }

    #[test]
    fn test_stats() {
        let view = DetailView::from_record(&sample());
        assert_eq!(view.stats.downloads, "1.5K");
        assert_eq!(view.stats.version_count, 2);
        assert_eq!(view.stats.license, "WTFPL");
        assert_eq!(view.stats.updated, "4/8/2016");
    }

    #[test]
    fn test_stats_defaults() {
        let view = DetailView::from_record(&record(json!({"name": "bare"})));
        assert_eq!(view.stats.version_count, 0);
        assert_eq!(view.stats.license, "MIT");
        assert_eq!(view.stats.updated, "Recent");
        assert!(view.history.is_empty());
        assert_eq!(view.dependency_count(), 0);
        assert_eq!(view.readme, None);
    }

    #[test]
    fn test_dependencies_of_latest_version_keep_order() {
        let view = DetailView::from_record(&sample());
        let names: Vec<_> = view.dependencies.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(view.dependencies[0].range, "^2.0.0");
        assert_eq!(view.dependencies[0].link, "https://www.npmjs.com/package/zeta");
        assert_eq!(view.dev_dependencies.len(), 1);
        assert_eq!(view.dependency_count(), 3);
    }

    #[test]
    fn test_history_newest_first_without_reserved_keys() {
        let view = DetailView::from_record(&sample());
        let versions: Vec<_> = view.history.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(versions, vec!["1.3.0", "1.2.0"]);

        let latest = &view.history[0];
        assert!(latest.latest);
        assert!(!view.history[1].latest);
        assert_eq!(latest.date, "April 8, 2016");
        assert_eq!(latest.link, "https://www.npmjs.com/package/left-pad/v/1.3.0");
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let value = serde_json::to_value(DetailView::from_record(&sample())).unwrap();
        assert_eq!(value["installCommand"], "npm install left-pad");
        assert_eq!(value["stats"]["versionCount"], 2);
        assert_eq!(value["devDependencies"][0]["name"], "tape");
        assert_eq!(value["history"][0]["publishedAt"], "2016-04-08T03:42:48.000Z");
        assert!(value.get("dev_dependencies").is_none());
    }

    #[test]
    fn test_history_unparsable_dates_go_last() {
        let time = json!({
            "0.1.0": "not a date",
            "0.2.0": "2020-02-01T00:00:00.000Z",
            "0.3.0": "2021-02-01T00:00:00.000Z"
        });
        let Value::Object(time) = time else { unreachable!() };

        let history = version_history("x", &time);
        let versions: Vec<_> = history.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(versions, vec!["0.3.0", "0.2.0", "0.1.0"]);
        assert_eq!(history[2].date, "not a date");
    }
}
