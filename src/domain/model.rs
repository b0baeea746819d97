use serde::{Deserialize, Serialize};

/// One entry of the `toolsData` array in `tools.ts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub href: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: String,
    pub changefreq: String,
    pub priority: String,
}

/// A single `<urlset>` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapFile {
    pub file_name: String,
    pub urls: Vec<SitemapUrl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub loc: String,
    pub lastmod: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapBundle {
    pub files: Vec<SitemapFile>,
    pub index_file: String,
    pub index: Vec<IndexEntry>,
}

impl SitemapBundle {
    pub fn url_count(&self) -> usize {
        self.files.iter().map(|f| f.urls.len()).sum()
    }
}
