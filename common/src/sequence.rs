//! リクエスト世代管理
//!
//! 重なったリクエストのレスポンスは到着順が保証されない。
//! 送信ごとにトークンを発行し、最新トークンのレスポンスだけを表示に反映する。
//!
//! 抽出とカスタムプロンプトは書き込む領域が異なる。OCR領域は抽出だけが、
//! JSON領域は両方が書き込むため、領域ごとに世代を持つ（[`ResponseGate`]）。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::render::DisplayPatch;

/// リクエストトークン
pub type RequestToken = u64;

/// 単調増加のトークン発行器（クローンはカウンタを共有する）
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: Arc<AtomicU64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいトークンを発行（以前のトークンはすべて古くなる）
    pub fn issue(&self) -> RequestToken {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 発行済みトークンをすべて無効化
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// トークンが最新か
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}

/// 表示を書き換える操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Extract,
    Prompt,
}

/// 送信時に発行される照合用チケット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    operation: Operation,
    /// OCR領域の世代（抽出のみ）
    ocr: Option<RequestToken>,
    /// JSON領域の世代
    json: RequestToken,
}

impl Ticket {
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

/// 領域ごとの世代でレスポンスを選別する
///
/// - OCR領域（OCRテキスト・OCR時間）は、より新しい抽出があれば捨てる
/// - JSON領域（JSON出力・LLM時間）は、より新しい抽出またはプロンプトがあれば捨てる
/// - リセット後はすべて捨てる
#[derive(Debug, Clone, Default)]
pub struct ResponseGate {
    ocr: RequestSequence,
    json: RequestSequence,
}

impl ResponseGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信開始（書き込む領域の世代を進める）
    pub fn begin(&self, operation: Operation) -> Ticket {
        let ocr = match operation {
            Operation::Extract => Some(self.ocr.issue()),
            Operation::Prompt => None,
        };
        Ticket {
            operation,
            ocr,
            json: self.json.issue(),
        }
    }

    /// 送信中のレスポンスをすべて無効化
    pub fn invalidate(&self) {
        self.ocr.invalidate();
        self.json.invalidate();
    }

    /// 古くなった領域を除いたパッチを返す（反映するものが無ければ `None`）
    pub fn admit(&self, ticket: &Ticket, patch: DisplayPatch) -> Option<DisplayPatch> {
        let mut patch = patch;

        let ocr_current = ticket.ocr.is_some_and(|token| self.ocr.is_current(token));
        if !ocr_current {
            patch.ocr_text = None;
            patch.ocr_timer = None;
        }
        if !self.json.is_current(ticket.json) {
            patch.json_output = None;
            patch.llm_timer = None;
        }

        if patch == DisplayPatch::default() {
            None
        } else {
            Some(patch)
        }
    }
}
