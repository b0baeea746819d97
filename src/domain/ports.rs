use crate::domain::model::SitemapBundle;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_dir(&self) -> &str;
    /// `YYYY-MM-DD` stamped on every entry written.
    fn lastmod(&self) -> String;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Record: Send + 'static;

    async fn extract(&self) -> Result<Vec<Self::Record>>;
    async fn transform(&self, data: Vec<Self::Record>) -> Result<SitemapBundle>;
    /// Writes the bundle and returns the paths written.
    async fn load(&self, bundle: SitemapBundle) -> Result<Vec<String>>;
}
