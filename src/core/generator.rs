//! Category sitemaps generated from the `toolsData` array in `tools.ts`.

use crate::config::toml_config::SitemapConfig;
use crate::core::etl::write_bundle;
use crate::core::{
    ConfigProvider, IndexEntry, Pipeline, SitemapBundle, SitemapFile, SitemapUrl, Storage,
    ToolEntry,
};
use crate::utils::error::{Result, ToolError};
use async_trait::async_trait;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const INDEX_FILE: &str = "sitemap.xml";
pub const MAIN_FILE: &str = "sitemap-main.xml";

static TOOLS_ARRAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)const toolsData = \[(.*?)\];").expect("valid toolsData regex")
});

static TOOL_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)\{\s*id:\s*['"]([^'"]+)['"],\s*name:\s*['"]([^'"]+)['"],\s*description:\s*['"]([^'"]*)['"],\s*category:\s*['"]([^'"]+)['"].*?href:\s*['"]([^'"]+)['"]"#,
    )
    .expect("valid tool object regex")
});

/// Every tool page lives under `/tools/`; anything else falls back to `/tools/<id>`.
pub fn normalize_href(id: &str, href: &str) -> String {
    let href = if href.starts_with("/tools/") {
        href.to_string()
    } else {
        format!("/tools/{}", id)
    };
    href.to_lowercase()
        .replace("//", "/")
        .trim_end_matches('/')
        .to_string()
}

/// Pulls the tool objects out of the TypeScript source.
pub fn parse_tools_ts(content: &str, base_url: &str) -> Result<Vec<ToolEntry>> {
    let array = TOOLS_ARRAY
        .captures(content)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ToolError::invalid_input(
            "tools_file",
            "toolsData",
            "Could not find the toolsData array",
        ))?;

    let base_url = base_url.trim_end_matches('/');
    let tools: Vec<ToolEntry> = TOOL_OBJECT
        .captures_iter(array.as_str())
        .map(|caps| {
            let href = normalize_href(&caps[1], &caps[5]);
            ToolEntry {
                id: caps[1].to_string(),
                name: caps[2].to_string(),
                description: caps[3].to_string(),
                category: caps[4].to_string(),
                url: format!("{}{}", base_url, href),
                href,
            }
        })
        .collect();

    tracing::debug!("Parsed {} tools", tools.len());
    Ok(tools)
}

/// Groups tools by category (sorted) with each group sorted by name.
pub fn group_by_category(tools: Vec<ToolEntry>) -> BTreeMap<String, Vec<ToolEntry>> {
    let mut grouped: BTreeMap<String, Vec<ToolEntry>> = BTreeMap::new();
    for tool in tools {
        grouped.entry(tool.category.clone()).or_default().push(tool);
    }
    for tools in grouped.values_mut() {
        tools.sort_by(|a, b| a.name.cmp(&b.name));
    }
    grouped
}

pub fn category_file_name(category: &str) -> String {
    format!("sitemap-{}.xml", category)
}

pub struct ToolsSitemapPipeline<S: Storage> {
    storage: S,
    config: SitemapConfig,
}

impl<S: Storage> ToolsSitemapPipeline<S> {
    pub fn new(storage: S, config: SitemapConfig) -> Self {
        Self { storage, config }
    }

    fn main_urls(&self, lastmod: &str) -> Vec<SitemapUrl> {
        self.config
            .generate
            .main_pages
            .iter()
            .map(|page| SitemapUrl {
                loc: format!("{}{}", self.config.base_url(), page.path),
                lastmod: lastmod.to_string(),
                changefreq: page.changefreq.clone(),
                priority: page.priority.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl<S: Storage> Pipeline for ToolsSitemapPipeline<S> {
    type Record = ToolEntry;

    async fn extract(&self) -> Result<Vec<ToolEntry>> {
        let tools_file = &self.config.generate.tools_file;
        tracing::debug!("Reading tools from {}", tools_file);

        let data = self.storage.read_file(tools_file).await?;
        let content = String::from_utf8_lossy(&data);
        parse_tools_ts(&content, self.config.base_url())
    }

    async fn transform(&self, data: Vec<ToolEntry>) -> Result<SitemapBundle> {
        if data.is_empty() {
            return Err(ToolError::invalid_input(
                "tools_file",
                &self.config.generate.tools_file,
                "No tools found to process",
            ));
        }

        let lastmod = self.config.lastmod();
        let grouped = group_by_category(data);

        for (category, tools) in &grouped {
            tracing::info!("  {}: {} tools", category, tools.len());
        }

        let mut files = vec![SitemapFile {
            file_name: MAIN_FILE.to_string(),
            urls: self.main_urls(&lastmod),
        }];
        for (category, tools) in &grouped {
            files.push(SitemapFile {
                file_name: category_file_name(category),
                urls: tools
                    .iter()
                    .map(|tool| SitemapUrl {
                        loc: tool.url.clone(),
                        lastmod: lastmod.clone(),
                        changefreq: self.config.generate.changefreq.clone(),
                        priority: self.config.generate.priority.clone(),
                    })
                    .collect(),
            });
        }

        // 索引：main 先，其餘依分類名稱排序
        let index = files
            .iter()
            .map(|file| IndexEntry {
                loc: format!("{}/{}", self.config.base_url(), file.file_name),
                lastmod: lastmod.clone(),
            })
            .collect();

        Ok(SitemapBundle {
            files,
            index_file: INDEX_FILE.to_string(),
            index,
        })
    }

    async fn load(&self, bundle: SitemapBundle) -> Result<Vec<String>> {
        write_bundle(&self.storage, &self.config, &bundle).await
    }
}
