use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ToolError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://dapsiwow.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub site: SiteConfig,
    pub generate: GenerateConfig,
    pub split: SplitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub output_dir: String,
    /// 固定的 lastmod；未設定時使用今天日期
    pub lastmod: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub tools_file: String,
    pub changefreq: String,
    pub priority: String,
    pub main_pages: Vec<PageConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub path: String,
    pub changefreq: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub input: String,
    /// Checked in order; the first matching category wins.
    pub categories: Vec<CategoryConfig>,
    /// Patterns for the `main` sitemap, checked after every category.
    pub main_patterns: Vec<String>,
    /// Where URLs matching no pattern at all go: `main` or a category name.
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub patterns: Vec<String>,
}

fn page(path: &str, changefreq: &str, priority: &str) -> PageConfig {
    PageConfig {
        path: path.to_string(),
        changefreq: changefreq.to_string(),
        priority: priority.to_string(),
    }
}

fn category(name: &str, patterns: &[&str]) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: "client/public".to_string(),
            lastmod: None,
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            tools_file: "client/src/data/tools.ts".to_string(),
            changefreq: "weekly".to_string(),
            priority: "0.8".to_string(),
            main_pages: vec![
                page("/", "daily", "1.0"),
                page("/about-us", "monthly", "0.8"),
                page("/contact-us", "monthly", "0.8"),
                page("/privacy-policy", "yearly", "0.5"),
                page("/terms-of-service", "yearly", "0.5"),
                page("/help-center", "monthly", "0.7"),
                page("/all-tools", "weekly", "0.9"),
                page("/finance-tools", "weekly", "0.9"),
                page("/health-tools", "weekly", "0.9"),
                page("/text-tools", "weekly", "0.9"),
            ],
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            input: "sitemap.xml".to_string(),
            categories: vec![
                category(
                    "finance",
                    &[
                        r"loan.*calculator",
                        r"mortgage.*calculator",
                        r"emi.*calculator",
                        r"compound.*interest",
                        r"simple.*interest",
                        r"roi.*calculator",
                        r"tax.*calculator",
                        r"salary.*calculator",
                        r"tip.*calculator",
                        r"inflation.*calculator",
                        r"savings.*calculator",
                        r"debt.*calculator",
                        r"investment.*calculator",
                        r"retirement.*calculator",
                        r"sip.*calculator",
                        r"break.*even",
                        r"business.*loan",
                        r"car.*loan",
                        r"home.*loan",
                        r"education.*loan",
                        r"credit.*card",
                        r"percentage.*calculator",
                        r"discount.*calculator",
                        r"vat.*calculator",
                        r"gst.*calculator",
                        r"paypal.*fee",
                        r"lease.*calculator",
                        r"stock.*profit",
                        r"net.*worth",
                    ],
                ),
                category(
                    "health",
                    &[
                        r"bmi.*calculator",
                        r"bmr.*calculator",
                        r"calorie.*calculator",
                        r"body.*fat",
                        r"ideal.*weight",
                        r"pregnancy.*calculator",
                        r"water.*intake",
                        r"protein.*calculator",
                        r"carb.*calculator",
                        r"keto.*calculator",
                        r"fasting.*timer",
                        r"step.*calorie",
                        r"heart.*rate",
                        r"blood.*pressure",
                        r"sleep.*calculator",
                        r"ovulation.*calculator",
                        r"baby.*growth",
                        r"tdee.*calculator",
                        r"lean.*body",
                        r"waist.*ratio",
                        r"whr.*calculator",
                        r"life.*expectancy",
                        r"cholesterol.*calculator",
                        r"running.*pace",
                        r"cycling.*speed",
                        r"swimming.*calorie",
                        r"alcohol.*calorie",
                        r"smoking.*cost",
                    ],
                ),
                category(
                    "pdf",
                    &[
                        r"merge.*pdf",
                        r"split.*pdf",
                        r"compress.*pdf",
                        r"pdf.*compress",
                        r"pdf.*merge",
                        r"pdf.*split",
                        r"pdf.*convert",
                        r"convert.*pdf",
                        r"pdf.*to.*image",
                        r"image.*to.*pdf",
                        r"pdf.*to.*word",
                        r"word.*to.*pdf",
                        r"pdf.*to.*excel",
                        r"excel.*to.*pdf",
                        r"pdf.*encrypt",
                        r"encrypt.*pdf",
                        r"pdf.*decrypt",
                        r"decrypt.*pdf",
                        r"pdf.*rotate",
                        r"rotate.*pdf",
                        r"pdf.*watermark",
                        r"watermark.*pdf",
                        r"pdf.*sign",
                        r"sign.*pdf",
                        r"pdf.*edit",
                        r"edit.*pdf",
                    ],
                ),
                category(
                    "text",
                    &[
                        r"word.*counter",
                        r"character.*counter",
                        r"sentence.*counter",
                        r"paragraph.*counter",
                        r"case.*converter",
                        r"password.*generator",
                        r"name.*generator",
                        r"username.*generator",
                        r"address.*generator",
                        r"qr.*generator",
                        r"font.*changer",
                        r"reverse.*text",
                        r"text.*to.*qr",
                        r"qr.*to.*text",
                        r"text.*to.*binary",
                        r"binary.*to.*text",
                        r"qr.*scanner",
                        r"markdown.*to.*html",
                        r"html.*to.*markdown",
                        r"lorem.*ipsum",
                        r"text.*encrypt",
                        r"text.*decrypt",
                        r"url.*encoder",
                        r"url.*decoder",
                        r"base64.*encode",
                        r"base64.*decode",
                    ],
                ),
            ],
            main_patterns: [
                r"/$", r"/about", r"/contact", r"/privacy", r"/terms", r"/help", r"/tools$",
                r"/finance$", r"/health$", r"/text$", r"/pdf$",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            fallback: "main".to_string(),
        }
    }
}

impl SitemapConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ToolError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ToolError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ToolError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url("site.base_url", &self.site.base_url)?;
        crate::utils::validation::validate_path("site.output_dir", &self.site.output_dir)?;

        if let Some(lastmod) = &self.site.lastmod {
            chrono::NaiveDate::parse_from_str(lastmod, "%Y-%m-%d").map_err(|e| {
                ToolError::ConfigValidationError {
                    field: "site.lastmod".to_string(),
                    message: format!("Expected YYYY-MM-DD: {}", e),
                }
            })?;
        }

        for category in &self.split.categories {
            if category.name.trim().is_empty() || category.name == "main" {
                return Err(ToolError::ConfigValidationError {
                    field: "split.categories.name".to_string(),
                    message: format!("Invalid category name '{}'", category.name),
                });
            }
            for pattern in &category.patterns {
                regex::Regex::new(pattern).map_err(|e| ToolError::ConfigValidationError {
                    field: format!("split.categories.{}", category.name),
                    message: format!("Invalid pattern '{}': {}", pattern, e),
                })?;
            }
        }

        let fallback = &self.split.fallback;
        if fallback != "main" && !self.split.categories.iter().any(|c| &c.name == fallback) {
            return Err(ToolError::ConfigValidationError {
                field: "split.fallback".to_string(),
                message: format!("'{}' is neither 'main' nor a configured category", fallback),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for SitemapConfig {
    fn base_url(&self) -> &str {
        self.site.base_url.trim_end_matches('/')
    }

    fn output_dir(&self) -> &str {
        &self.site.output_dir
    }

    fn lastmod(&self) -> String {
        self.site
            .lastmod
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string())
    }
}

impl Validate for SitemapConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SitemapConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_url(), "https://dapsiwow.com");
        assert_eq!(config.generate.tools_file, "client/src/data/tools.ts");
        assert_eq!(config.generate.main_pages.len(), 10);
        assert_eq!(config.split.categories.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[site]
base_url = "https://example.com/"
output_dir = "./out"
lastmod = "2024-05-01"

[generate]
tools_file = "tools.ts"

[[generate.main_pages]]
path = "/"
changefreq = "daily"
priority = "1.0"
"#;

        let config = SitemapConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.base_url(), "https://example.com");
        assert_eq!(config.lastmod(), "2024-05-01");
        assert_eq!(config.generate.main_pages.len(), 1);
        assert_eq!(config.generate.changefreq, "weekly");
        assert_eq!(config.split.input, "sitemap.xml");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DAPSI_TEST_SITE_URL", "https://staging.dapsiwow.com");

        let toml_content = r#"
[site]
base_url = "${DAPSI_TEST_SITE_URL}"
"#;

        let config = SitemapConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.site.base_url, "https://staging.dapsiwow.com");

        std::env::remove_var("DAPSI_TEST_SITE_URL");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = SitemapConfig::from_toml_str("[site]\nbase_url = \"dapsiwow\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_date = SitemapConfig::from_toml_str("[site]\nlastmod = \"May 1\"\n").unwrap();
        assert!(bad_date.validate().is_err());

        let bad_pattern = SitemapConfig::from_toml_str(
            "[split]\n[[split.categories]]\nname = \"x\"\npatterns = [\"(unclosed\"]\n",
        )
        .unwrap();
        assert!(bad_pattern.validate().is_err());
    }

    #[test]
    fn test_split_fallback_must_name_a_category() {
        let config = SitemapConfig::from_toml_str("[split]\nfallback = \"text\"\n").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(SplitConfig::default().fallback, "main");

        let unknown = SitemapConfig::from_toml_str("[split]\nfallback = \"blog\"\n").unwrap();
        assert!(unknown.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[split]\ninput = \"old-sitemap.xml\"\n")
            .unwrap();

        let config = SitemapConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.split.input, "old-sitemap.xml");
        assert_eq!(config.split.categories.len(), 4);
    }
}
