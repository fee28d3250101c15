//! ダウンロード成果物の定数
//!
//! ダウンロード内容はJSON出力欄に表示中のテキストそのもの（再シリアライズしない）。

/// ダウンロード時のファイル名
pub const DOWNLOAD_FILE_NAME: &str = "extracted_data.json";

/// ダウンロードBlobのMIMEタイプ
pub const DOWNLOAD_MIME: &str = "application/json";
