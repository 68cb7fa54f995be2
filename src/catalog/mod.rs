//! Read-only catalog of curated memes and studio templates.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod templates;

pub use templates::{default_templates, Template};

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate catalog title: {title}")]
    DuplicateTitle { title: String },
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    Wholesome,
    Chaotic,
    Savage,
}

impl Vibe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wholesome => "wholesome",
            Self::Chaotic => "chaotic",
            Self::Savage => "savage",
        }
    }
}

impl fmt::Display for Vibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated meme. Identity is the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub alt: String,
    pub source: String,
    pub year: u16,
    pub score: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub vibe: Option<Vibe>,
    #[serde(default)]
    pub classic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.title.as_str()) {
                return Err(CatalogError::DuplicateTitle {
                    title: item.title.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    pub fn from_json(contents: &str) -> CatalogResult<Self> {
        let items: Vec<CatalogItem> = serde_json::from_str(contents)?;
        Self::new(items)
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        tracing::debug!(path = %path.display(), items = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    pub fn bundled() -> CatalogResult<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn position_by_title(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    pub fn find_by_title(&self, title: &str) -> Option<&CatalogItem> {
        self.position_by_title(title).and_then(|index| self.get(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_item(title: &str, tags: &[&str], vibe: Option<Vibe>, classic: bool) -> CatalogItem {
    CatalogItem {
        title: title.to_string(),
        description: format!("{title} description"),
        image: format!("https://img.example/{}.jpg", title.to_lowercase().replace(' ', "-")),
        alt: title.to_string(),
        source: format!("https://source.example/{}", title.to_lowercase().replace(' ', "-")),
        year: 2012,
        score: 50,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        vibe,
        classic,
    }
}
