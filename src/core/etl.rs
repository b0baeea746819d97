use crate::config::storage::join_path;
use crate::core::xml::{render_index, render_urlset};
use crate::core::{ConfigProvider, Pipeline, SitemapBundle, Storage};
use crate::utils::error::Result;

pub struct SitemapEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SitemapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract and transform only; nothing is written.
    pub async fn plan(&self) -> Result<SitemapBundle> {
        tracing::info!("📥 Extracting...");
        let records = self.pipeline.extract().await?;
        tracing::info!("📊 Extracted {} records", records.len());

        tracing::info!("🔄 Transforming...");
        let bundle = self.pipeline.transform(records).await?;
        tracing::info!(
            "🗂️ Planned {} sitemaps with {} URLs",
            bundle.files.len(),
            bundle.url_count()
        );
        Ok(bundle)
    }

    /// Runs the whole pipeline and returns the paths written.
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("🚀 Starting sitemap pipeline");

        let bundle = self.plan().await?;

        tracing::info!("💾 Loading...");
        let written = self.pipeline.load(bundle).await?;
        for path in &written {
            tracing::info!("📁 Wrote {}", path);
        }

        Ok(written)
    }
}

/// Writes every urlset, then the index, under the configured output directory.
pub async fn write_bundle<S: Storage, C: ConfigProvider>(
    storage: &S,
    config: &C,
    bundle: &SitemapBundle,
) -> Result<Vec<String>> {
    let mut written = Vec::with_capacity(bundle.files.len() + 1);

    for file in &bundle.files {
        let path = join_path(config.output_dir(), &file.file_name);
        storage
            .write_file(&path, render_urlset(&file.urls).as_bytes())
            .await?;
        tracing::debug!("Created {} with {} URLs", path, file.urls.len());
        written.push(path);
    }

    let index_path = join_path(config.output_dir(), &bundle.index_file);
    storage
        .write_file(&index_path, render_index(&bundle.index).as_bytes())
        .await?;
    tracing::debug!(
        "Created {} referencing {} sitemaps",
        index_path,
        bundle.index.len()
    );
    written.push(index_path);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::MockStorage;
    use crate::core::{IndexEntry, SitemapFile, SitemapUrl};
    use crate::utils::error::ToolError;
    use async_trait::async_trait;

    struct FixedConfig;

    impl ConfigProvider for FixedConfig {
        fn base_url(&self) -> &str {
            "https://dapsiwow.com"
        }

        fn output_dir(&self) -> &str {
            "public"
        }

        fn lastmod(&self) -> String {
            "2024-05-01".to_string()
        }
    }

    struct CountingPipeline {
        storage: MockStorage,
        fail_extract: bool,
    }

    #[async_trait]
    impl Pipeline for CountingPipeline {
        type Record = String;

        async fn extract(&self) -> Result<Vec<String>> {
            if self.fail_extract {
                return Err(ToolError::MissingInputError {
                    field: "input".to_string(),
                });
            }
            Ok(vec!["/".to_string(), "/about".to_string()])
        }

        async fn transform(&self, data: Vec<String>) -> Result<SitemapBundle> {
            let urls = data
                .into_iter()
                .map(|path| SitemapUrl {
                    loc: format!("https://dapsiwow.com{}", path),
                    lastmod: "2024-05-01".to_string(),
                    changefreq: "weekly".to_string(),
                    priority: "0.8".to_string(),
                })
                .collect();
            Ok(SitemapBundle {
                files: vec![SitemapFile {
                    file_name: "sitemap-main.xml".to_string(),
                    urls,
                }],
                index_file: "sitemap.xml".to_string(),
                index: vec![IndexEntry {
                    loc: "https://dapsiwow.com/sitemap-main.xml".to_string(),
                    lastmod: "2024-05-01".to_string(),
                }],
            })
        }

        async fn load(&self, bundle: SitemapBundle) -> Result<Vec<String>> {
            write_bundle(&self.storage, &FixedConfig, &bundle).await
        }
    }

    #[tokio::test]
    async fn test_run_writes_files_then_index() {
        let storage = MockStorage::new();
        let engine = SitemapEngine::new(CountingPipeline {
            storage: storage.clone(),
            fail_extract: false,
        });

        let written = engine.run().await.unwrap();
        assert_eq!(written, vec!["public/sitemap-main.xml", "public/sitemap.xml"]);

        let main = storage.get_file("public/sitemap-main.xml").await.unwrap();
        assert!(main.contains("<loc>https://dapsiwow.com/about</loc>"));
        let index = storage.get_file("public/sitemap.xml").await.unwrap();
        assert!(index.contains("<sitemapindex"));
    }

    #[tokio::test]
    async fn test_plan_writes_nothing() {
        let storage = MockStorage::new();
        let engine = SitemapEngine::new(CountingPipeline {
            storage: storage.clone(),
            fail_extract: false,
        });

        let bundle = engine.plan().await.unwrap();
        assert_eq!(bundle.url_count(), 2);
        assert!(storage.file_names().await.is_empty());
    }

    #[tokio::test]
    async fn test_extract_error_stops_pipeline() {
        let storage = MockStorage::new();
        let engine = SitemapEngine::new(CountingPipeline {
            storage: storage.clone(),
            fail_extract: true,
        });

        assert!(engine.run().await.is_err());
        assert!(storage.file_names().await.is_empty());
    }
}
