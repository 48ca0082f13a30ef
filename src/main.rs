use clap::Parser;
use map_export::core::tiles::TileProvider;
use map_export::utils::error::{ErrorSeverity, MapError};
use map_export::utils::{logger, validation::Validate};
use map_export::{CliConfig, ExportEngine, HtmlMapPipeline, LocalStorage, MapConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting map-export");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Map export failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: &CliConfig) -> map_export::Result<()> {
    let config = cli.to_map_config()?;

    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated");

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        display_config_summary(&config)?;
        return Ok(());
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = HtmlMapPipeline::new(LocalStorage::current_dir(), config);
    let engine = ExportEngine::new_with_monitoring(pipeline, monitor_enabled);

    let output_path = engine.run().await?;
    tracing::info!("✅ Map export completed successfully!");
    println!("✅ Map written to: {}", output_path);

    Ok(())
}

// 每種失敗都要回傳非零的結束碼
fn exit_code(e: &MapError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

fn display_config_summary(config: &MapConfig) -> map_export::Result<()> {
    let tiles = TileProvider::resolve(&config.tiles)?;
    let max_zoom = config.effective_max_zoom()?;

    println!("📋 Configuration Summary:");
    println!("  Title: {}", config.map.title);
    println!(
        "  Center: ({}, {})",
        config.map.latitude, config.map.longitude
    );
    println!(
        "  Zoom: {} (range {}..={})",
        config.map.zoom_start, config.map.min_zoom, max_zoom
    );
    println!("  CRS: {}", config.map.crs);
    println!("  Size: {} x {}", config.map.width, config.map.height);
    println!("  Tiles: {}", tiles.name);
    println!("    URL: {}", tiles.url_template);
    if let Some(subdomains) = &tiles.subdomains {
        println!("    Subdomains: {}", subdomains);
    }
    println!("  Output: {}", config.output.path);
    println!();

    Ok(())
}
