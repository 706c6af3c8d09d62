use std::sync::Arc;

use ulwazi_backend::category::CategoryVocabulary;
use ulwazi_backend::config::AppConfig;
use ulwazi_backend::search::{QueryParser, SearchExecutor, StatisticsEngine};
use ulwazi_backend::store::CorpusStore;

/// Shared application state. Everything here is immutable after startup;
/// the store is the only thing behind which data changes.
pub struct AppState {
    pub store: Arc<dyn CorpusStore>,
    pub vocab: CategoryVocabulary,
    pub parser: QueryParser,
    pub executor: SearchExecutor,
    pub stats: StatisticsEngine,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn CorpusStore>, config: AppConfig) -> Self {
        let vocab = CategoryVocabulary::standard();
        Self {
            parser: QueryParser::new(vocab),
            executor: SearchExecutor::new(store.clone(), vocab),
            stats: StatisticsEngine::new(store.clone()),
            store,
            vocab,
            config,
        }
    }
}
