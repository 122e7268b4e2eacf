// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gallery Catalog
//!
//! Photographer entries shown behind the passphrase. Each entry is a display
//! name plus an ordered list of photo file names. Photos live under
//! `/assets/{slug}/`, where the slug is derived from the display name:
//!
//! | Name | Slug |
//! |------|------|
//! | `Cindy` | `cindy` |
//! | `May Hwee` | `may-hwee` |
//! | `Sarah O'Connor` | `sarah-oconnor` |
//!
//! The catalog is fixed for the process lifetime. It is either the built-in
//! one or loaded from the JSON file named by `GALLERY_CATALOG`:
//!
//! ```json
//! [{ "name": "Cindy", "photos": ["photo1.jpg", "photo2.jpg"] }]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// URL prefix for static assets.
pub const ASSETS_URL_PREFIX: &str = "/assets";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("photographer name {0:?} does not produce a usable slug")]
    EmptySlug(String),
    #[error("two photographers share the slug {0:?}")]
    DuplicateSlug(String),
    #[error("photo name {photo:?} for {photographer} must be a plain file name")]
    InvalidPhotoName { photographer: String, photo: String },
}

/// Turn a display name into a URL/asset-directory slug.
///
/// Lowercases, trims, replaces whitespace runs with `-` and drops anything
/// that is not `a-z`, `0-9` or `-`.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

/// A photographer and their photos, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhotographerEntry {
    /// Display name.
    pub name: String,
    /// Photo file names inside the photographer's asset directory.
    #[serde(default)]
    pub photos: Vec<String>,
}

impl PhotographerEntry {
    pub fn new(name: impl Into<String>, photos: &[&str]) -> Self {
        Self {
            name: name.into(),
            photos: photos.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// URL of the photographer's asset directory, e.g. `/assets/may-hwee`.
    pub fn asset_path(&self) -> String {
        format!("{ASSETS_URL_PREFIX}/{}", self.slug())
    }

    /// URL of one photo, e.g. `/assets/cindy/photo1.jpg`.
    pub fn photo_url(&self, photo: &str) -> String {
        format!("{}/{photo}", self.asset_path())
    }

    /// URL of the photographer's gallery page.
    pub fn page_path(&self) -> String {
        format!("/photographer/{}", self.slug())
    }
}

/// Ordered, slug-unique set of photographers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<PhotographerEntry>,
}

impl Catalog {
    /// Build a catalog, rejecting empty or duplicate slugs and photo names
    /// that could escape the asset directory.
    pub fn new(entries: Vec<PhotographerEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            let slug = entry.slug();
            if slug.is_empty() {
                return Err(CatalogError::EmptySlug(entry.name.clone()));
            }
            if !seen.insert(slug.clone()) {
                return Err(CatalogError::DuplicateSlug(slug));
            }
            if let Some(photo) = entry.photos.iter().find(|p| !is_plain_file_name(p)) {
                return Err(CatalogError::InvalidPhotoName {
                    photographer: entry.name.clone(),
                    photo: photo.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<PhotographerEntry> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(entries)
    }

    /// Load from `path` when given, otherwise use the built-in catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The gallery's own photographers.
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                PhotographerEntry::new("Cindy", &["photo1.jpg", "photo2.jpg", "photo3.jpg"]),
                PhotographerEntry::new("Davina", &["image1.jpg", "image2.jpg", "image3.jpg"]),
                PhotographerEntry::new("May Hwee", &["pic1.jpg", "pic2.jpg", "pic3.jpg"]),
                PhotographerEntry::new("Vincent", &["shot1.jpg", "shot2.jpg", "shot3.jpg"]),
                PhotographerEntry::new("Wendy", &["capture1.jpg", "capture2.jpg", "capture3.jpg"]),
                PhotographerEntry::new("YY", &[]),
            ],
        }
    }

    pub fn entries(&self) -> &[PhotographerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a photographer by slug.
    pub fn find(&self, slug: &str) -> Option<&PhotographerEntry> {
        self.entries.iter().find(|entry| entry.slug() == slug)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn slugify_normalizes_names() {
        assert_eq!(slugify("John Smith"), "john-smith");
        assert_eq!(slugify("Sarah O'Connor"), "sarah-oconnor");
        assert_eq!(slugify("Marie-Claire Dubois"), "marie-claire-dubois");
        assert_eq!(slugify("  May   Hwee "), "may-hwee");
        assert_eq!(slugify("YY"), "yy");
    }

    #[test]
    fn entry_paths() {
        let entry = PhotographerEntry::new("May Hwee", &["pic1.jpg"]);
        assert_eq!(entry.asset_path(), "/assets/may-hwee");
        assert_eq!(entry.photo_url("pic1.jpg"), "/assets/may-hwee/pic1.jpg");
        assert_eq!(entry.page_path(), "/photographer/may-hwee");
    }

    #[test]
    fn builtin_catalog_lookup() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);
        let cindy = catalog.find("cindy").unwrap();
        assert_eq!(cindy.photos, vec!["photo1.jpg", "photo2.jpg", "photo3.jpg"]);
        assert!(catalog.find("yy").unwrap().photos.is_empty());
        assert!(catalog.find("nobody").is_none());
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        assert_eq!(Catalog::new(builtin.entries().to_vec()).unwrap(), builtin);
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let result = Catalog::new(vec![
            PhotographerEntry::new("May Hwee", &[]),
            PhotographerEntry::new("may  hwee", &[]),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateSlug(slug)) if slug == "may-hwee"));
    }

    #[test]
    fn rejects_unsluggable_names() {
        let result = Catalog::new(vec![PhotographerEntry::new("!!!", &[])]);
        assert!(matches!(result, Err(CatalogError::EmptySlug(_))));
    }

    #[test]
    fn rejects_path_traversal_in_photos() {
        let result = Catalog::new(vec![PhotographerEntry::new("Cindy", &["../secret.jpg"])]);
        assert!(matches!(result, Err(CatalogError::InvalidPhotoName { .. })));
    }

    #[test]
    fn loads_catalog_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Ann Lee", "photos": ["a.jpg", "b.jpg"]}}, {{"name": "Bo"}}]"#
        )
        .unwrap();

        let catalog = Catalog::load(Some(file.path())).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("ann-lee").unwrap().photos, vec!["a.jpg", "b.jpg"]);
        assert!(catalog.find("bo").unwrap().photos.is_empty());
    }

    #[test]
    fn reports_unreadable_and_invalid_files() {
        let missing = Catalog::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(CatalogError::Read { .. })));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            Catalog::from_file(file.path()),
            Err(CatalogError::Parse { .. })
        ));
    }
}
