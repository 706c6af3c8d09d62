//! Corpus search and analytics.
//!
//! The modules here only provide query primitives; routing and presentation
//! stay with the caller:
//! - tokenizer: normalizes bilingual text into lexical tokens
//! - query: raw search string -> structured search intent
//! - executor: structured intent -> counted, paginated, highlighted results
//! - stats: corpus-wide frequency tables and aggregate totals
//!
//! Call direction is one-way: api -> search -> store.

pub mod executor;
pub mod query;
pub mod stats;
pub mod tokenizer;

pub use executor::{SearchExecutor, SearchResults, SearchRow};
pub use query::{ParsedQuery, QueryParser};
pub use stats::{CorpusStatistics, StatisticsEngine};
