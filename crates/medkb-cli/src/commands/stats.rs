use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CorpusStats {
    corpus: String,
    knowledge_entries: usize,
    active_entries: usize,
    symptoms: usize,
    diseases: usize,
    index_generation: u64,
    indexed_documents: usize,
    vocabulary_size: usize,
    index_built_at: DateTime<Utc>,
}

/// Handle `medkb stats`: builds the index once and reports its shape.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.engine.store();
    let entries = store
        .knowledge_entries()
        .context("failed to read knowledge entries")?;
    let symptoms = store.symptoms().context("failed to read symptoms")?;
    let diseases = store.diseases().context("failed to read diseases")?;

    let snapshot = ctx
        .engine
        .index()
        .refresh()
        .context("failed to build vector index")?;

    let stats = CorpusStats {
        corpus: ctx.corpus_path.display().to_string(),
        knowledge_entries: entries.len(),
        active_entries: entries.iter().filter(|e| e.is_active).count(),
        symptoms: symptoms.len(),
        diseases: diseases.len(),
        index_generation: snapshot.generation(),
        indexed_documents: snapshot.document_count(),
        vocabulary_size: snapshot.vocabulary_len(),
        index_built_at: snapshot.built_at(),
    };
    output(&stats, flags.format)
}
