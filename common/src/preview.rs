//! ファイルプレビューの種別判定

/// プレビュー領域の初期表示
pub const NO_FILE_SELECTED: &str = "No file selected.";

/// プレビュー非対応ファイルの表示
pub const UNSUPPORTED_PREVIEW: &str = "Unsupported preview format.";

/// PDFプレビューの高さ
pub const PDF_PREVIEW_HEIGHT: &str = "500px";

/// プレビュー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewKind {
    /// `<img>` で表示
    Image,
    /// `<embed type="application/pdf">` で表示
    Pdf,
    /// テキストのみ
    Unsupported,
}

impl PreviewKind {
    /// MIMEタイプ優先、次にファイル名の拡張子で判定
    pub fn detect(mime_type: &str, file_name: &str) -> Self {
        if mime_type.starts_with("image/") {
            PreviewKind::Image
        } else if file_name.ends_with(".pdf") {
            PreviewKind::Pdf
        } else {
            PreviewKind::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_image_by_mime() {
        assert_eq!(PreviewKind::detect("image/png", "scan.png"), PreviewKind::Image);
        // 拡張子に関係なくMIMEで判定
        assert_eq!(PreviewKind::detect("image/jpeg", "receipt"), PreviewKind::Image);
    }

    #[test]
    fn test_detect_pdf_by_suffix() {
        assert_eq!(PreviewKind::detect("application/pdf", "invoice.pdf"), PreviewKind::Pdf);
        assert_eq!(PreviewKind::detect("", "invoice.pdf"), PreviewKind::Pdf);
    }

    #[test]
    fn test_detect_unsupported() {
        assert_eq!(PreviewKind::detect("message/rfc822", "mail.eml"), PreviewKind::Unsupported);
        assert_eq!(PreviewKind::detect("application/pdf", "INVOICE.PDF"), PreviewKind::Unsupported);
    }
}
