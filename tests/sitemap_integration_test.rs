use dapsi_tools::utils::validation::Validate;
use dapsi_tools::{
    LocalStorage, SitemapConfig, SitemapEngine, SitemapSplitPipeline, ToolsSitemapPipeline,
};
use tempfile::TempDir;

const TOOLS_TS: &str = r#"
const toolsData = [
  { id: 'text-to-hex', name: 'Text to Hex', description: 'Convert text to hex', category: 'text', href: '/tools/text-to-hex' },
  { id: 'calorie-calculator', name: 'Calorie Calculator', description: 'Daily calories', category: 'health', href: '/tools/calorie-calculator' },
  { id: 'character-counter', name: 'Character Counter', description: 'Count characters', category: 'text', href: '/tools/character-counter' },
  { id: 'split-pdf', name: 'PDF Splitter', description: 'Split PDF files', category: 'pdf', href: '/pdf/split' },
];
"#;

fn config_for(toml: &str) -> SitemapConfig {
    let config = SitemapConfig::from_toml_str(toml).unwrap();
    config.validate().unwrap();
    config
}

#[tokio::test]
async fn test_generate_sitemaps_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir_all(temp_dir.path().join("client/src/data")).unwrap();
    std::fs::write(temp_dir.path().join("client/src/data/tools.ts"), TOOLS_TS).unwrap();

    let config = config_for(
        r#"
[site]
base_url = "https://dapsiwow.com"
lastmod = "2024-06-30"
"#,
    );

    let storage = LocalStorage::new(temp_dir.path());
    let written = SitemapEngine::new(ToolsSitemapPipeline::new(storage, config))
        .run()
        .await
        .unwrap();
    assert_eq!(written.len(), 5);

    let public = temp_dir.path().join("client/public");
    for name in [
        "sitemap.xml",
        "sitemap-main.xml",
        "sitemap-health.xml",
        "sitemap-pdf.xml",
        "sitemap-text.xml",
    ] {
        assert!(public.join(name).exists(), "missing {}", name);
    }

    let text = std::fs::read_to_string(public.join("sitemap-text.xml")).unwrap();
    let counter_pos = text.find("/tools/character-counter").unwrap();
    let hex_pos = text.find("/tools/text-to-hex").unwrap();
    assert!(counter_pos < hex_pos, "tools are sorted by name");

    // href 不在 /tools/ 底下時改用 id
    let pdf = std::fs::read_to_string(public.join("sitemap-pdf.xml")).unwrap();
    assert!(pdf.contains("<loc>https://dapsiwow.com/tools/split-pdf</loc>"));

    let index = std::fs::read_to_string(public.join("sitemap.xml")).unwrap();
    let order: Vec<usize> = [
        "sitemap-main.xml",
        "sitemap-health.xml",
        "sitemap-pdf.xml",
        "sitemap-text.xml",
    ]
    .iter()
    .map(|name| index.find(name).unwrap())
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(index.matches("<lastmod>2024-06-30</lastmod>").count(), 4);
}

#[tokio::test]
async fn test_split_sitemap_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("old-sitemap.xml"),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://dapsiwow.com/</loc><changefreq>daily</changefreq><priority>1.0</priority></url>
  <url><loc>https://dapsiwow.com/tools/vat-calculator</loc></url>
  <url><loc>https://dapsiwow.com/tools/debt-payoff-calculator</loc></url>
  <url><loc>https://dapsiwow.com/tools/font-style-changer</loc></url>
</urlset>"#,
    )
    .unwrap();

    let config = config_for(
        r#"
[site]
output_dir = "split"
lastmod = "2024-06-30"

[split]
input = "old-sitemap.xml"
"#,
    );

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = SitemapSplitPipeline::new(storage, config).unwrap();
    let written = SitemapEngine::new(pipeline).run().await.unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.rsplit('/').next().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["sitemap-main.xml", "sitemap-finance.xml", "sitemap-text.xml", "sitemap.xml"]
    );

    let finance =
        std::fs::read_to_string(temp_dir.path().join("split/sitemap-finance.xml")).unwrap();
    assert_eq!(finance.matches("<url>").count(), 2);
    assert!(finance.contains("<lastmod>2024-06-30</lastmod>"));

    let main = std::fs::read_to_string(temp_dir.path().join("split/sitemap-main.xml")).unwrap();
    assert!(main.contains("<changefreq>daily</changefreq>"));
}

#[tokio::test]
async fn test_custom_categories_from_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(
        r#"
[site]
output_dir = "."
lastmod = "2024-06-30"

[split]
input = "missing.xml"
main_patterns = ["/$"]

[[split.categories]]
name = "calculators"
patterns = ["calculator"]
"#,
    );

    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = SitemapSplitPipeline::new(storage, config).unwrap();
    let bundle = SitemapEngine::new(pipeline).plan().await.unwrap();

    let names: Vec<&str> = bundle.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["sitemap-main.xml", "sitemap-calculators.xml"]);
    // 計畫模式不寫檔
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
