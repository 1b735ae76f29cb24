use clap::Parser;
use site_admin::adapters::console::ConsoleNotifier;
use site_admin::adapters::firestore::FirestoreStore;
use site_admin::adapters::memory::InMemoryStore;
use site_admin::app::{build_uploader, commands};
use site_admin::core::{DocumentStore, Notifier};
use site_admin::utils::{logger, validation::Validate};
use site_admin::{AdminConfig, AdminContentEditor, AdminError, CliConfig, IconUploader};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match AdminConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config.display(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let notifier = ConsoleNotifier::new(cli.yes);
    let uploader = build_uploader(&config);

    let result = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - using an empty in-memory store");
        run(InMemoryStore::new(), notifier, uploader, cli).await
    } else {
        tracing::debug!("Using Firestore project '{}'", config.firestore.project_id);
        run(FirestoreStore::new(&config.firestore), notifier, uploader, cli).await
    };

    if let Err(e) = result {
        // 遠端失敗已透過 alert 告知使用者，這裡只記錄並以非零碼結束
        tracing::error!("{} (category: {:?})", e.user_friendly_message(), e.category());
        tracing::info!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

async fn run<S, N>(
    store: S,
    notifier: N,
    uploader: IconUploader,
    cli: CliConfig,
) -> Result<(), AdminError>
where
    S: DocumentStore,
    N: Notifier,
{
    let mut editor = AdminContentEditor::new(store, notifier, uploader);
    editor.load().await?;

    let mut stdout = std::io::stdout();
    commands::run(&mut editor, cli.command, &mut stdout).await
}
