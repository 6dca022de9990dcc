use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use medkb_config::MedkbConfig;
use medkb_search::{
    ContentStore, InMemoryCorpus, RecommendationRanker, SearchEngine, SymptomMatcher,
    TracingAuditSink,
};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: MedkbConfig,
    pub corpus_path: PathBuf,
    pub engine: Arc<SearchEngine>,
    pub matcher: SymptomMatcher,
    pub ranker: RecommendationRanker,
}

impl AppContext {
    /// Load the corpus snapshot and wire the search components over it.
    ///
    /// `corpus_override` wins over `general.corpus_path`.
    pub fn init(corpus_override: Option<&Path>, config: MedkbConfig) -> anyhow::Result<Self> {
        let corpus_path = match corpus_override {
            Some(path) => path.to_path_buf(),
            None => config
                .general
                .require_corpus_path()
                .context("no corpus snapshot given; pass --corpus or set general.corpus_path")?,
        };

        let corpus = InMemoryCorpus::from_json_file(&corpus_path).with_context(|| {
            format!("failed to load corpus snapshot {}", corpus_path.display())
        })?;
        let store: Arc<dyn ContentStore> = Arc::new(corpus);

        let engine = Arc::new(SearchEngine::from_config(
            Arc::clone(&store),
            Arc::new(TracingAuditSink),
            &config,
        ));
        let matcher = SymptomMatcher::new(Arc::clone(&store), config.symptoms.clone());
        let ranker = RecommendationRanker::new(Arc::clone(&engine));

        tracing::debug!(corpus = %corpus_path.display(), "application context ready");

        Ok(Self {
            config,
            corpus_path,
            engine,
            matcher,
            ranker,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::AppContext;
    use medkb_config::MedkbConfig;

    const CORPUS: &str = r#"{
        "knowledge_entries": [
            {
                "id": "kb-1",
                "title": "Tăng huyết áp là gì",
                "content": "Tăng huyết áp là tình trạng áp lực máu lên thành động mạch tăng cao.",
                "content_type": "ARTICLE",
                "updated_at": "2026-01-01T00:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn missing_corpus_is_reported() {
        let result = AppContext::init(None, MedkbConfig::default());
        let message = format!("{:#}", result.err().expect("init should fail"));
        assert!(message.contains("--corpus"));
    }

    #[test]
    fn config_corpus_path_is_used_without_override() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(CORPUS.as_bytes()).expect("write corpus");

        let mut config = MedkbConfig::default();
        config.general.corpus_path = file.path().display().to_string();

        let ctx = AppContext::init(None, config).expect("context should load");
        assert_eq!(ctx.corpus_path, file.path());
        assert_eq!(
            ctx.engine.store().knowledge_entries().expect("entries").len(),
            1
        );
    }
}
