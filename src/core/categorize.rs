//! Grouping file records into ordered, named categories.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::core::config::CategoryOverride;
use crate::core::file_utils::to_slash_path;
use crate::core::metadata::FileRecord;

/// Category key for files whose original location is unknown or at the root.
pub const FALLBACK_KEY: &str = "Other";

/// Directory of auxiliary assets; shares the fallback's display settings.
pub const ASSETS_KEY: &str = "assets";

/// Order given to directories missing from the catalog.
pub const DEFAULT_ORDER: i64 = 50;

/// Order of the fallback category.
pub const FALLBACK_ORDER: i64 = 99;

const GENERATED_DESCRIPTION: &str = "Additional course materials.";

static OTHER_RESOURCES: Lazy<CategoryInfo> = Lazy::new(|| CategoryInfo {
    name: "Other Resources".to_string(),
    description: "Supplementary documents and miscellaneous files.".to_string(),
    order: FALLBACK_ORDER,
});

static BUILTIN_CATEGORIES: Lazy<BTreeMap<&'static str, CategoryInfo>> = Lazy::new(|| {
    [
        (
            "GeneralPhysics",
            CategoryInfo {
                name: "General Physics".to_string(),
                description: "Lecture notes and problem sets for the general physics course."
                    .to_string(),
                order: 1,
            },
        ),
        (FALLBACK_KEY, OTHER_RESOURCES.clone()),
        (ASSETS_KEY, OTHER_RESOURCES.clone()),
    ]
    .into_iter()
    .collect()
});

/// Display settings of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub name: String,
    pub description: String,
    pub order: i64,
}

/// A named group of files rendered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub key: String,
    pub name: String,
    pub description: String,
    pub order: i64,
    /// Sorted by filename
    pub files: Vec<FileRecord>,
}

/// Category key of a file given its repository-relative original path.
pub fn directory_key(original: Option<&Path>) -> String {
    original
        .and_then(Path::parent)
        .map(to_slash_path)
        .filter(|parent| !parent.is_empty())
        .unwrap_or_else(|| FALLBACK_KEY.to_string())
}

/// Lookup table from directory key to display settings.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    entries: BTreeMap<String, CategoryInfo>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryCatalog {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_CATEGORIES
                .iter()
                .map(|(key, info)| (key.to_string(), info.clone()))
                .collect(),
        }
    }

    /// Apply configuration overrides on top of the current entries. Fields an
    /// override leaves unset keep the existing (or generated) value.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, CategoryOverride>) -> Self {
        for (key, custom) in overrides {
            let mut info = self.resolve(key);
            if let Some(name) = &custom.name {
                info.name = name.clone();
            }
            if let Some(description) = &custom.description {
                info.description = description.clone();
            }
            if let Some(order) = custom.order {
                info.order = order;
            }
            self.entries.insert(key.clone(), info);
        }
        self
    }

    /// Display settings for `key`; unknown keys get generated ones.
    pub fn resolve(&self, key: &str) -> CategoryInfo {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| CategoryInfo {
                name: key.to_string(),
                description: GENERATED_DESCRIPTION.to_string(),
                order: DEFAULT_ORDER,
            })
    }
}

/// Group records by directory key and order everything deterministically:
/// categories by `(order, key)`, files by filename.
pub fn categorize(records: Vec<FileRecord>, catalog: &CategoryCatalog) -> Vec<Category> {
    let mut groups: HashMap<String, Vec<FileRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.directory.clone()).or_default().push(record);
    }

    let mut categories: Vec<Category> = groups
        .into_iter()
        .map(|(key, mut files)| {
            files.sort_by(|a, b| a.filename.cmp(&b.filename));
            let info = catalog.resolve(&key);
            Category {
                key,
                name: info.name,
                description: info.description,
                order: info.order,
                files,
            }
        })
        .collect();

    categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.key.cmp(&b.key)));
    categories
}
