use clap::{Parser, Subcommand};
use dapsi_tools::config::toml_config::SitemapConfig;
use dapsi_tools::core::{ConfigProvider, Pipeline, SitemapBundle};
use dapsi_tools::utils::{logger, validation::Validate};
use dapsi_tools::{
    LocalStorage, SitemapEngine, SitemapSplitPipeline, ToolError, ToolsSitemapPipeline,
};
use std::path::Path;

#[derive(Parser)]
#[command(name = "sitemap")]
#[command(about = "Generate and split DapsiWow sitemaps")]
struct Args {
    /// Path to TOML configuration file; built-in defaults are used when it is missing
    #[arg(short, long, default_value = "sitemap.toml")]
    config: String,

    /// Override the site base URL from config
    #[arg(long)]
    base_url: Option<String>,

    /// Override the output directory from config
    #[arg(long)]
    output_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Dry run - show what would be written without writing
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: SitemapCommand,
}

#[derive(Subcommand)]
enum SitemapCommand {
    /// Build category sitemaps from tools.ts
    Generate {
        /// Override the tools.ts path from config
        #[arg(long)]
        tools_file: Option<String>,
    },
    /// Split an existing sitemap.xml by URL category
    Split {
        /// Override the input sitemap path from config
        #[arg(long)]
        input: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting DapsiWow sitemap tool");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    // 以目前目錄為根，相對路徑照常解析
    let storage = LocalStorage::new(".");

    let result = match args.command {
        SitemapCommand::Generate { .. } => {
            execute(ToolsSitemapPipeline::new(storage, config), args.dry_run).await
        }
        SitemapCommand::Split { .. } => match SitemapSplitPipeline::new(storage, config) {
            Ok(pipeline) => execute(pipeline, args.dry_run).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        exit_with(&e);
    }
}

fn load_config(args: &Args) -> Result<SitemapConfig, ToolError> {
    let mut config = if Path::new(&args.config).exists() {
        tracing::info!("📁 Loading configuration from: {}", args.config);
        SitemapConfig::from_file(&args.config)?
    } else {
        tracing::warn!("⚠️ {} not found, using built-in defaults", args.config);
        SitemapConfig::default()
    };

    // 應用命令列覆蓋設定
    if let Some(base_url) = &args.base_url {
        config.site.base_url = base_url.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.site.output_dir = output_dir.clone();
    }
    match &args.command {
        SitemapCommand::Generate {
            tools_file: Some(tools_file),
        } => config.generate.tools_file = tools_file.clone(),
        SitemapCommand::Split { input: Some(input) } => config.split.input = input.clone(),
        _ => {}
    }

    config.validate()?;
    Ok(config)
}

async fn execute<P: Pipeline>(pipeline: P, dry_run: bool) -> Result<(), ToolError> {
    let engine = SitemapEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        let bundle = engine.plan().await?;
        print_plan(&bundle);
        return Ok(());
    }

    let written = engine.run().await?;
    println!("✅ Sitemap generation completed successfully!");
    println!("Generated files:");
    for path in written {
        println!("  - {}", path);
    }
    Ok(())
}

fn display_config_summary(config: &SitemapConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Base URL: {}", config.base_url());
    println!("  Output: {}", config.output_dir());
    println!("  Lastmod: {}", config.lastmod());
    match &args.command {
        SitemapCommand::Generate { .. } => {
            println!("  Tools file: {}", config.generate.tools_file);
            println!("  Main pages: {}", config.generate.main_pages.len());
        }
        SitemapCommand::Split { .. } => {
            println!("  Input: {}", config.split.input);
            let names: Vec<&str> =
                config.split.categories.iter().map(|c| c.name.as_str()).collect();
            println!("  Categories: main, {}", names.join(", "));
        }
    }
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn print_plan(bundle: &SitemapBundle) {
    println!("🔍 Dry Run Analysis:");
    for file in &bundle.files {
        println!("  {} ({} URLs)", file.file_name, file.urls.len());
        for url in &file.urls {
            println!("    {} [{}, {}]", url.loc, url.changefreq, url.priority);
        }
    }
    println!("  {} ({} sitemaps)", bundle.index_file, bundle.index.len());
    println!();
    println!("✅ Dry run analysis complete. {} URLs in total.", bundle.url_count());
}

fn exit_with(e: &ToolError) -> ! {
    tracing::error!(
        "❌ Sitemap run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
