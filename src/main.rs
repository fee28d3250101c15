use anyhow::Context;
use clap::Parser;
use doc_extract::{cli, client, config, session};
use doc_extract::error::DocExtractError;
use doc_extract_common::render;
use doc_extract_common::{validate_prompt, DisplayState};
use cli::{Cli, Commands};
use client::BackendClient;
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use session::Session;
use std::path::Path;
use std::time::Duration;

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn print_ocr(display: &DisplayState) {
    println!("── OCR Text ({}s) ──", display.ocr_timer);
    println!("{}\n", display.ocr_text);
}

fn print_json(display: &DisplayState) {
    println!("── Extracted JSON ({}s) ──", display.llm_timer);
    println!("{}", display.json_output);
}

fn save_download(session: &Session, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(dir) = output {
        let path = session
            .download(dir)
            .with_context(|| format!("保存に失敗しました: {}", dir.display()))?;
        println!("\n✔ 保存: {}", path.display());
    }
    Ok(())
}

fn open_session(config: &Config, cli_server: Option<&str>) -> anyhow::Result<Session> {
    let server = config.resolve_server(cli_server)?;
    log::debug!("server={} timeout={}s", server, config.timeout_seconds);
    let client = BackendClient::new(&server, Duration::from_secs(config.timeout_seconds))?;
    Ok(Session::new(client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let mut config = Config::load()?;
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Extract { file, prompt, output } => {
            if !file.is_file() {
                return Err(DocExtractError::FileNotFound(file.display().to_string()).into());
            }
            println!("📄 doc-extract - 抽出: {}\n", file.display());
            let mut session = open_session(&config, server)?;

            let pb = spinner(render::EXTRACTING_TEXT);
            let result = session.extract(&file, prompt.as_deref()).await.map(|_| ());
            pb.finish_and_clear();

            print_ocr(session.display());
            print_json(session.display());
            result?;
            save_download(&session, output.as_deref())?;
        }

        Commands::Prompt { text, output } => {
            validate_prompt(&text)?;
            println!("💬 doc-extract - カスタムプロンプト\n");
            let mut session = open_session(&config, server)?;

            let pb = spinner(render::SENDING_PROMPT);
            let result = session.prompt(&text).await.map(|_| ());
            pb.finish_and_clear();

            print_json(session.display());
            result?;
            save_download(&session, output.as_deref())?;
        }

        Commands::Reset => {
            let mut session = open_session(&config, server)?;
            session.reset().await?;
            println!("✔ サーバーのキャッシュをリセットしました");
        }

        Commands::Config { set_server, set_timeout, show } => {
            let changed = set_server.is_some() || set_timeout.is_some();
            if let Some(url) = set_server {
                config.set_server_url(url)?;
            }
            if let Some(secs) = set_timeout {
                config.timeout_seconds = secs;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show {
                println!("設定:");
                println!("  サーバー: {}", config.server_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
