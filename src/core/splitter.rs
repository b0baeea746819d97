//! Splits one flat sitemap into per-category sitemaps.

use crate::config::toml_config::{SitemapConfig, SplitConfig};
use crate::core::etl::write_bundle;
use crate::core::generator::{category_file_name, INDEX_FILE};
use crate::core::xml::parse_urlset;
use crate::core::{
    ConfigProvider, IndexEntry, Pipeline, SitemapBundle, SitemapFile, SitemapUrl, Storage,
};
use crate::utils::error::{Result, ToolError};
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};

pub const MAIN_CATEGORY: &str = "main";

/// Example URLs used when there is no sitemap to split yet.
const EXAMPLE_PAGES: &[(&str, &str, &str)] = &[
    ("/", "daily", "1.0"),
    ("/about", "monthly", "0.8"),
    ("/contact", "monthly", "0.8"),
    ("/privacy", "yearly", "0.5"),
    ("/terms", "yearly", "0.5"),
    ("/help", "monthly", "0.7"),
    ("/tools", "weekly", "0.9"),
    ("/tools/loan-calculator", "weekly", "0.8"),
    ("/tools/mortgage-calculator", "weekly", "0.8"),
    ("/tools/emi-calculator", "weekly", "0.8"),
    ("/tools/compound-interest-calculator", "weekly", "0.8"),
    ("/tools/tax-calculator", "weekly", "0.8"),
    ("/tools/paypal-fee-calculator", "weekly", "0.8"),
    ("/tools/bmi-calculator", "weekly", "0.8"),
    ("/tools/bmr-calculator", "weekly", "0.8"),
    ("/tools/calorie-calculator", "weekly", "0.8"),
    ("/tools/body-fat-calculator", "weekly", "0.8"),
    ("/tools/word-counter", "weekly", "0.8"),
    ("/tools/character-counter", "weekly", "0.8"),
    ("/tools/case-converter", "weekly", "0.8"),
    ("/tools/password-generator", "weekly", "0.8"),
    ("/tools/merge-pdf", "weekly", "0.8"),
    ("/tools/split-pdf", "weekly", "0.8"),
    ("/tools/compress-pdf", "weekly", "0.8"),
];

pub fn example_urls(base_url: &str, lastmod: &str) -> Vec<SitemapUrl> {
    let base_url = base_url.trim_end_matches('/');
    EXAMPLE_PAGES
        .iter()
        .map(|(path, changefreq, priority)| SitemapUrl {
            loc: format!("{}{}", base_url, path),
            lastmod: lastmod.to_string(),
            changefreq: changefreq.to_string(),
            priority: priority.to_string(),
        })
        .collect()
}

fn compile(field: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| ToolError::ConfigValidationError {
                    field: field.to_string(),
                    message: format!("Invalid pattern '{}': {}", pattern, e),
                })
        })
        .collect()
}

/// Assigns URLs to categories by regex over the URL path.
#[derive(Debug, Clone)]
pub struct UrlCategorizer {
    base_url: String,
    categories: Vec<(String, Vec<Regex>)>,
    main: Vec<Regex>,
    fallback: String,
}

impl UrlCategorizer {
    pub fn new(base_url: &str, split: &SplitConfig) -> Result<Self> {
        let categories = split
            .categories
            .iter()
            .map(|category| {
                let field = format!("split.categories.{}", category.name);
                Ok((category.name.clone(), compile(&field, &category.patterns)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let categorizer = Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            categories,
            main: compile("split.main_patterns", &split.main_patterns)?,
            fallback: split.fallback.clone(),
        };
        if !categorizer.names().any(|name| name == split.fallback) {
            return Err(ToolError::ConfigValidationError {
                field: "split.fallback".to_string(),
                message: format!("Unknown category '{}'", split.fallback),
            });
        }
        Ok(categorizer)
    }

    /// Category names in output order, `main` first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(MAIN_CATEGORY).chain(self.categories.iter().map(|(name, _)| name.as_str()))
    }

    pub fn categorize(&self, url: &str) -> &str {
        let path = url.replace(&self.base_url, "").to_lowercase();

        for (name, patterns) in &self.categories {
            if patterns.iter().any(|re| re.is_match(&path)) {
                return name;
            }
        }

        // main 的規則最後才比對；都不符合時歸到 fallback
        if self.main.iter().any(|re| re.is_match(&path)) {
            return MAIN_CATEGORY;
        }
        &self.fallback
    }
}

pub struct SitemapSplitPipeline<S: Storage> {
    storage: S,
    config: SitemapConfig,
    categorizer: UrlCategorizer,
}

impl<S: Storage> SitemapSplitPipeline<S> {
    pub fn new(storage: S, config: SitemapConfig) -> Result<Self> {
        let categorizer = UrlCategorizer::new(config.base_url(), &config.split)?;
        Ok(Self {
            storage,
            config,
            categorizer,
        })
    }

    fn defaults(&self) -> SitemapUrl {
        SitemapUrl {
            loc: String::new(),
            lastmod: self.config.lastmod(),
            changefreq: self.config.generate.changefreq.clone(),
            priority: self.config.generate.priority.clone(),
        }
    }
}

#[async_trait]
impl<S: Storage> Pipeline for SitemapSplitPipeline<S> {
    type Record = SitemapUrl;

    async fn extract(&self) -> Result<Vec<SitemapUrl>> {
        let input = &self.config.split.input;

        if !self.storage.exists(input).await {
            tracing::warn!("⚠️ {} not found, using example URLs", input);
            return Ok(example_urls(self.config.base_url(), &self.config.lastmod()));
        }

        let data = self.storage.read_file(input).await?;
        let content = String::from_utf8_lossy(&data);
        if !content.contains("urlset") {
            tracing::warn!("⚠️ {} is not a urlset sitemap, using example URLs", input);
            return Ok(example_urls(self.config.base_url(), &self.config.lastmod()));
        }

        let urls = parse_urlset(&content, &self.defaults());
        tracing::info!("Parsed {} URLs from {}", urls.len(), input);
        Ok(urls)
    }

    async fn transform(&self, data: Vec<SitemapUrl>) -> Result<SitemapBundle> {
        if data.is_empty() {
            return Err(ToolError::invalid_input(
                "split.input",
                &self.config.split.input,
                "No URLs found to process",
            ));
        }

        let mut buckets: Vec<(String, Vec<SitemapUrl>)> = self
            .categorizer
            .names()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        for url in data {
            let category = self.categorizer.categorize(&url.loc);
            if let Some((_, urls)) = buckets.iter_mut().find(|(name, _)| name == category) {
                urls.push(url);
            }
        }

        for (name, urls) in &buckets {
            tracing::info!("  {}: {} URLs", name, urls.len());
        }

        let files: Vec<SitemapFile> = buckets
            .into_iter()
            .filter(|(_, urls)| !urls.is_empty())
            .map(|(name, urls)| SitemapFile {
                file_name: category_file_name(&name),
                urls,
            })
            .collect();

        let lastmod = self.config.lastmod();
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
