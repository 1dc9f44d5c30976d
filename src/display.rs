// Display records: the flat, UI-ready view of one registry package

use crate::constants;
use crate::registry::{DownloadCount, Maintainer, RawMetadataDocument};
use serde::Serialize;
use serde_json::{Map, Value};

/// Normalized representation of one package, as consumed by cards and the
/// detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    /// Compacted count, e.g. "5M" or "1.2K"
    pub downloads: String,
    pub tags: Vec<String>,
    pub registry_link: String,
    pub source_link: String,
    pub install_command: String,
    pub license: Option<String>,
    pub maintainers: Vec<Maintainer>,
    pub last_published_at: Option<String>,
    /// Passed through verbatim from the registry document
    pub versions: Map<String, Value>,
    /// Passed through verbatim from the registry document
    pub time: Map<String, Value>,
    pub readme: Option<String>,
}

/// Map a registry document and its download count into a display record.
///
/// `requested` is the identifier the document was fetched under; it stands in
/// for a missing `name`. `fallback_index` is the request position, used for
/// the id when the document has none.
pub fn to_display_record(
    doc: &RawMetadataDocument,
    requested: &str,
    downloads: DownloadCount,
    fallback_index: usize,
) -> DisplayRecord {
    let name = doc.name().unwrap_or(requested).to_string();
    let latest = doc.latest_version();

    DisplayRecord {
        id: doc
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| format!("pkg-{}", fallback_index)),
        version: latest.unwrap_or(constants::DEFAULT_VERSION).to_string(),
        description: doc
            .description()
            .unwrap_or(constants::DEFAULT_DESCRIPTION)
            .to_string(),
        downloads: compact_count(downloads.value()),
        tags: doc.keywords(),
        registry_link: package_page(&name),
        source_link: source_link(doc),
        install_command: install_command(&name),
        license: doc.license(),
        maintainers: doc.maintainers(),
        last_published_at: latest.and_then(|v| doc.published_at(v)),
        versions: doc.versions(),
        time: doc.time(),
        readme: doc.readme().map(str::to_string),
        name,
    }
}

pub fn package_page(name: &str) -> String {
    format!("{}/{}", constants::PACKAGE_PAGE_URL, name)
}

pub fn install_command(name: &str) -> String {
    format!("npm install {}", name)
}

/// Browsable source URL: the repository URL without its `git+` marker and
/// `.git` suffix, else the homepage, else "#"
pub fn source_link(doc: &RawMetadataDocument) -> String {
    doc.repository_url()
        .map(clean_repository_url)
        .filter(|url| !url.is_empty())
        .or_else(|| doc.homepage().map(str::to_string))
        .unwrap_or_else(|| constants::DEFAULT_SOURCE_LINK.to_string())
}

fn clean_repository_url(url: &str) -> String {
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.to_string()
}

const COMPACT_SUFFIXES: [&str; 4] = ["K", "M", "B", "T"];

/// Short compact notation: 999 -> "999", 1234 -> "1.2K", 12_345 -> "12K",
/// 5_000_000 -> "5M". Values with one integer digit keep one decimal, larger
/// ones round to whole units, halves round up.
pub fn compact_count(n: u64) -> String {
    if n < 1_000 {
        return n.to_string();
    }

    let n = u128::from(n);
    let mut tier = 0;
    let mut divisor: u128 = 1_000;
    while tier + 1 < COMPACT_SUFFIXES.len() && n >= divisor * 1_000 {
        divisor *= 1_000;
        tier += 1;
    }

    let tenths = (n * 10 + divisor / 2) / divisor;
    if tenths < 100 {
        let suffix = COMPACT_SUFFIXES[tier];
        return if tenths % 10 == 0 {
            format!("{}{}", tenths / 10, suffix)
        } else {
            format!("{}.{}{}", tenths / 10, tenths % 10, suffix)
        };
    }

    let whole = (n + divisor / 2) / divisor;
    if whole >= 1_000 && tier + 1 < COMPACT_SUFFIXES.len() {
        // 999_999 rounds up into the next unit
        return format!("1{}", COMPACT_SUFFIXES[tier + 1]);
    }
    format!("{}{}", whole, COMPACT_SUFFIXES[tier])
}
