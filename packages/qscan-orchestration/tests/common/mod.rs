//! Common test utilities for qscan-orchestration

#![allow(dead_code)]

use async_trait::async_trait;
use qscan_ir::config::AnalysisConfig;
use qscan_ir::features::cost_analysis::PricingTable;
use qscan_ir::{LanguageDetector, LanguageId};
use qscan_orchestration::{AnalysisOrchestrator, CodeTranslator, TranslationError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub const IS_PRIME: &str =
    "function isPrime(n){ for(let i=2;i<n;i++){ if(n % i === 0){ return false; } } return true; }";

pub const PYTHON_IS_PRIME: &str =
    "def is_prime(n):\n    for i in range(2, n):\n        if n % i == 0:\n            return False\n    return True\n";

/// Detector that always answers the same language
pub struct FixedDetector(pub &'static str);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _code: &str) -> LanguageId {
        LanguageId::new(self.0)
    }
}

/// What the mock translator answers
#[derive(Clone)]
pub enum MockReply {
    Code(&'static str),
    NotCode,
    Fail,
    Hang,
}

/// Translator returning a canned reply and counting calls
pub struct MockTranslator {
    reply: MockReply,
    calls: AtomicUsize,
}

impl MockTranslator {
    pub fn new(reply: MockReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CodeTranslator for MockTranslator {
    async fn translate(
        &self,
        _code: &str,
        _source_language: &LanguageId,
    ) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            MockReply::Code(js) => Ok(js.to_string()),
            MockReply::NotCode => Err(TranslationError::NotCode),
            MockReply::Fail => Err(TranslationError::Status { status: 503 }),
            MockReply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(String::new())
            }
        }
    }
}

pub fn orchestrator_with(
    language: &'static str,
    translator: Arc<MockTranslator>,
    settings: AnalysisConfig,
) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(
        Arc::new(FixedDetector(language)),
        translator,
        Arc::new(PricingTable::bundled().unwrap()),
        settings,
        Duration::from_millis(200),
    )
}

pub fn orchestrator(language: &'static str, translator: Arc<MockTranslator>) -> AnalysisOrchestrator {
    orchestrator_with(language, translator, AnalysisConfig::default())
}
