// Constants module for shared string constants

pub const MANIFEST_FILE: &str = "packages.toml";
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const DEFAULT_DOWNLOADS_URL: &str = "https://api.npmjs.org";

/// Base for human-facing package pages (cards, dependency and version links)
pub const PACKAGE_PAGE_URL: &str = "https://www.npmjs.com/package";

pub const DEFAULT_VERSION: &str = "0.0.0";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";
pub const DEFAULT_SOURCE_LINK: &str = "#";
pub const DEFAULT_LICENSE: &str = "MIT";

/// Reserved keys of the registry `time` mapping that are not versions
pub const RESERVED_TIME_KEYS: [&str; 2] = ["created", "modified"];
