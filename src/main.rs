use clap::Parser;
use user_etl::domain::model::ProcessOptions;
use user_etl::utils::{logger, validation::Validate};
use user_etl::{BatchEngine, JsonConfig, LocalStorage, UserPipeline};

#[derive(Parser)]
#[command(name = "user-etl")]
#[command(about = "Batch processing tool for user records")]
struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Override users file path from config
    #[arg(long)]
    users: Option<String>,

    /// Override output directory from config
    #[arg(long)]
    output_dir: Option<String>,

    /// Limit the number of users processed in this batch
    #[arg(long)]
    max_users: Option<usize>,

    /// Skip the validation stage
    #[arg(long)]
    skip_validation: bool,

    /// Skip the transform stage
    #[arg(long)]
    no_transform: bool,

    /// Skip saving processed records
    #[arg(long)]
    no_save: bool,

    /// Send a notification for each saved record
    #[arg(long)]
    notify: bool,

    /// Write a per-user report for each saved record
    #[arg(long)]
    reports: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose, args.log_json);

    tracing::info!("🚀 Starting user batch processing tool");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 JSON 配置，檔案不存在時使用預設值
    let mut config = if std::path::Path::new(&args.config).exists() {
        match JsonConfig::from_file(&args.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
                eprintln!("💡 Make sure the file exists and is valid JSON format");
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!(
            "⚠️ Config file '{}' not found, using default configuration",
            args.config
        );
        JsonConfig::default()
    };

    // 應用命令列覆蓋設定
    if let Some(users) = args.users.clone() {
        tracing::info!("🔧 Users file overridden to: {}", users);
        config.users_file = Some(users);
    }

    if let Some(output_dir) = args.output_dir.clone() {
        tracing::info!("🔧 Output directory overridden to: {}", output_dir);
        config.output_dir = Some(output_dir);
    }

    if let Some(max_users) = args.max_users {
        tracing::info!("🔧 Max users overridden to: {}", max_users);
        config.max_users = Some(max_users);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    let options = ProcessOptions {
        validate: !args.skip_validation,
        transform: !args.no_transform,
        save: !args.no_save,
        notify: args.notify,
        write_reports: args.reports,
    };

    // 顯示配置摘要
    display_config_summary(&config, &options, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config, &options).await?;
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 創建存儲和管道
    let storage = LocalStorage::new(".".to_string());
    let pipeline = UserPipeline::with_options(storage, config, options);

    // 創建批次引擎並運行
    let engine = BatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Batch processing completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Batch processing completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Batch processing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                user_etl::utils::error::ErrorSeverity::Low => 0, // 警告，但成功
                user_etl::utils::error::ErrorSeverity::Medium => 2, // 重試錯誤
                user_etl::utils::error::ErrorSeverity::High => 1, // 處理錯誤
                user_etl::utils::error::ErrorSeverity::Critical => 3, // 系統錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &JsonConfig, options: &ProcessOptions, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Processor: {}", config.processor_name());
    println!("  Users file: {}", config.users_file());
    println!("  Output: {}", config.output_dir());

    if let Some(max_users) = config.max_users() {
        println!("  Max Users: {}", max_users);
    }

    println!(
        "  Stages: validate={} transform={} save={} notify={}",
        options.validate, options.transform, options.save, options.notify
    );

    if options.write_reports {
        println!("  Reports: {}/reports", config.output_dir());
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(
    config: &JsonConfig,
    options: &ProcessOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");
    println!();

    // 資料來源分析
    println!("📥 Data Source Analysis:");
    println!("  Users file: {}", config.users_file());

    match std::fs::metadata(config.users_file()) {
        Ok(meta) => println!("  File size: {} bytes", meta.len()),
        Err(_) => println!("  ⚠️ Users file not found"),
    }

    if let Some(max) = config.max_users() {
        println!("  📊 Max users limit: {}", max);
    }

    // 處理階段分析
    println!();
    println!("⚙️ Processing Stages:");

    if options.validate {
        println!("  ✅ Validation enabled");
        println!("  Required fields: {}", config.required_fields().join(", "));
        let (min_age, max_age) = config.age_range();
        println!("  Age range: {} - {}", min_age, max_age);
        println!("  Min phone length: {}", config.min_phone_length());
    } else {
        println!("  ⏭️ Validation skipped");
    }

    if options.transform {
        println!("  ✅ Transformation enabled");
    } else {
        println!("  ⏭️ Transformation skipped");
    }

    if options.save {
        println!("  ✅ Saving enabled");
    } else {
        println!("  ⏭️ Saving skipped");
    }

    if options.notify {
        if config.notifications_enabled() {
            println!("  ✅ Notifications enabled");
        } else {
            println!("  ⏭️ Notifications disabled by config");
        }
    }

    // 輸出分析
    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_dir());
    println!("  Summary: {}/processing_summary.json", config.output_dir());

    if options.write_reports {
        println!("  Reports: {}/reports", config.output_dir());
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
