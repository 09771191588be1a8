use std::sync::Arc;

use reportcard_config::{
    BatchConfig, CorsConfig, FirestoreConfig, SchoolProfile, TemplateConfig,
};
use reportcard_core::ReportError;
use reportcard_engine::{DataProvider, PlaceholderResolver, ReportGenerator, TemplateStore};
use reportcard_firestore::FirestoreProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub generator: Arc<ReportGenerator>,
    pub batch_config: BatchConfig,
    pub cors_config: CorsConfig,
    pub school: SchoolProfile,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        templates: TemplateStore,
        school: SchoolProfile,
        batch_config: BatchConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let generator = ReportGenerator::new(templates, PlaceholderResolver::new(school.clone()));
        Self {
            provider,
            generator: Arc::new(generator),
            batch_config,
            cors_config,
            school,
        }
    }
}

/// Builds the state from the environment with a Firestore backed provider.
///
/// Fails only when template caching is enabled and the template cannot be
/// loaded; an uncached template is read per request.
pub fn init_app_state() -> Result<AppState, ReportError> {
    let templates = TemplateStore::from_config(&TemplateConfig::from_env())?;
    let provider = FirestoreProvider::new(FirestoreConfig::from_env());

    Ok(AppState::new(
        Arc::new(provider),
        templates,
        SchoolProfile::from_env(),
        BatchConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
