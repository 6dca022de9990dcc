//! # medkb-search
//!
//! Knowledge-base search and symptom checking for the medkb chatbot.
//!
//! Components, leaves first:
//! - [`text`]: Vietnamese normalization, stopwords, keyword extraction
//! - [`tfidf`] and [`vector`]: TF-IDF vectorizer and the snapshot-swapped
//!   [`VectorIndex`]
//! - [`lexical`] and [`hybrid`]: weighted field matching, score blending and
//!   popularity/recency bonuses
//! - [`SearchEngine`]: lexical + vector search with audit logging
//! - [`SymptomMatcher`]: fuzzy symptom matching, related diseases, urgency
//! - [`RecommendationRanker`]: explained top-K recommendations
//!
//! Content comes from a [`ContentStore`]; [`InMemoryCorpus`] loads one from a
//! JSON snapshot.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use medkb_config::MedkbConfig;
//! use medkb_search::{InMemoryAuditLog, InMemoryCorpus, SearchEngine, SearchFilters};
//!
//! let corpus = InMemoryCorpus::from_json_file("corpus.json".as_ref()).expect("corpus");
//! let engine = SearchEngine::from_config(
//!     Arc::new(corpus),
//!     Arc::new(InMemoryAuditLog::new()),
//!     &MedkbConfig::default(),
//! );
//! for hit in engine.search("tăng huyết áp", &SearchFilters::default(), 5) {
//!     println!("{:.2} {}", hit.score, hit.entry.title);
//! }
//! ```

pub mod audit;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod filters;
pub mod hybrid;
pub mod lexical;
pub mod recommend;
pub mod similarity;
pub mod symptoms;
pub mod text;
pub mod tfidf;
pub mod vector;

pub use audit::{AuditSink, InMemoryAuditLog, TracingAuditSink};
pub use corpus::{ContentStore, CorpusSnapshot, InMemoryCorpus};
pub use engine::{RelatedEntry, ScoredEntry, SearchEngine};
pub use error::SearchError;
pub use filters::SearchFilters;
pub use recommend::{RecommendContext, RecommendationRanker};
pub use similarity::{PartialRatio, Similarity};
pub use symptoms::{DiseaseMatch, SymptomContext, SymptomMatcher};
pub use vector::{IndexSnapshot, VectorHit, VectorIndex};
