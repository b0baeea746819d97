//! Sitemap XML rendering and a tolerant `<url>` reader.

use crate::domain::model::{IndexEntry, SitemapUrl};
use regex::Regex;
use std::sync::LazyLock;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

static URL_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:\w+:)?url\b[^>]*>(.*?)</(?:\w+:)?url>").expect("valid url block regex")
});

static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:\w+:)?(loc|lastmod|changefreq|priority)\b[^>]*>(.*?)</(?:\w+:)?(?:loc|lastmod|changefreq|priority)>")
        .expect("valid field regex")
});

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

/// Renders a `<urlset>` document.
pub fn render_urlset(urls: &[SitemapUrl]) -> String {
    let mut xml = String::with_capacity(128 + urls.len() * 160);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));

    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&url.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape(&url.lastmod)));
        xml.push_str(&format!("    <changefreq>{}</changefreq>\n", escape(&url.changefreq)));
        xml.push_str(&format!("    <priority>{}</priority>\n", escape(&url.priority)));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Renders a `<sitemapindex>` document.
pub fn render_index(entries: &[IndexEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<sitemapindex xmlns=\"{}\">\n", SITEMAP_NS));

    for entry in entries {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape(&entry.lastmod)));
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// Reads every `<url>` entry; missing optional fields take the given defaults.
/// Entries without a `<loc>` are skipped.
pub fn parse_urlset(xml: &str, defaults: &SitemapUrl) -> Vec<SitemapUrl> {
    URL_BLOCK
        .captures_iter(xml)
        .filter_map(|block| {
            let mut url = SitemapUrl {
                loc: String::new(),
                ..defaults.clone()
            };
            for field in FIELD.captures_iter(&block[1]) {
                let value = html_escape::decode_html_entities(field[2].trim()).into_owned();
                if value.is_empty() {
                    continue;
                }
                match &field[1] {
                    "loc" => url.loc = value,
                    "lastmod" => url.lastmod = value,
                    "changefreq" => url.changefreq = value,
                    "priority" => url.priority = value,
                    _ => {}
                }
            }
            if url.loc.is_empty() {
                tracing::warn!("Skipping <url> entry without <loc>");
                None
            } else {
                Some(url)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(loc: &str) -> SitemapUrl {
        SitemapUrl {
            loc: loc.to_string(),
            lastmod: "2024-05-01".to_string(),
            changefreq: "weekly".to_string(),
            priority: "0.8".to_string(),
        }
    }

    #[test]
    fn test_render_urlset() {
        let xml = render_urlset(&[url("https://dapsiwow.com/tools/case-converter")]);
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://dapsiwow.com/tools/case-converter</loc>
    <lastmod>2024-05-01</lastmod>
    <changefreq>weekly</changefreq>
    <priority>0.8</priority>
  </url>
</urlset>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_render_escapes_text() {
        let xml = render_urlset(&[url("https://dapsiwow.com/search?a=1&b=<2>")]);
        assert!(xml.contains("<loc>https://dapsiwow.com/search?a=1&amp;b=&lt;2&gt;</loc>"));
    }

    #[test]
    fn test_render_index() {
        let xml = render_index(&[IndexEntry {
            loc: "https://dapsiwow.com/sitemap-main.xml".to_string(),
            lastmod: "2024-05-01".to_string(),
        }]);
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("  <sitemap>\n    <loc>https://dapsiwow.com/sitemap-main.xml</loc>"));
    }

    #[test]
    fn test_parse_urlset_applies_defaults() {
        let xml = r#"<?xml version="1.0"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc> https://dapsiwow.com/a?x=1&amp;y=2 </loc><priority>1.0</priority></url>
  <url>
    <loc>https://dapsiwow.com/b</loc>
    <lastmod>2023-01-01</lastmod>
    <changefreq>daily</changefreq>
  </url>
  <url><lastmod>2023-01-01</lastmod></url>
</urlset>"#;

        let urls = parse_urlset(xml, &url(""));
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].loc, "https://dapsiwow.com/a?x=1&y=2");
        assert_eq!(urls[0].priority, "1.0");
        assert_eq!(urls[0].changefreq, "weekly");
        assert_eq!(urls[1].lastmod, "2023-01-01");
        assert_eq!(urls[1].changefreq, "daily");
        assert_eq!(urls[1].priority, "0.8");
    }

    #[test]
    fn test_parse_namespaced_urlset() {
        let xml = "<sm:urlset><sm:url><sm:loc>https://dapsiwow.com/</sm:loc></sm:url></sm:urlset>";
        let urls = parse_urlset(xml, &url(""));
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].loc, "https://dapsiwow.com/");
    }

    #[test]
    fn test_rendered_output_parses_back() {
        let original = vec![url("https://dapsiwow.com/tools/a&b"), url("https://dapsiwow.com/")];
        let parsed = parse_urlset(&render_urlset(&original), &url(""));
        assert_eq!(parsed, original);
    }
}
