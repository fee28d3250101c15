use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doc-extract")]
#[command(about = "OCR + LLM 文書フィールド抽出クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドURL（省略時は環境変数 DOC_EXTRACT_SERVER または設定ファイル）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像/PDFをアップロードしてOCR + フィールド抽出
    Extract {
        /// 対象ファイル（png/jpg/jpeg/pdf）
        #[arg(required = true)]
        file: PathBuf,

        /// 抽出プロンプト（省略時はサーバー既定）
        #[arg(short, long)]
        prompt: Option<String>,

        /// extracted_data.json の出力先ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 直前に抽出したOCRテキストにカスタムプロンプトを実行
    Prompt {
        /// プロンプト
        #[arg(required = true)]
        text: String,

        /// extracted_data.json の出力先ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// サーバー側のOCRキャッシュとアップロードを破棄
    Reset,

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// タイムアウト秒数を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
