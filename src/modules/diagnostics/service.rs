use chrono::Utc;
use reportcard_core::ReportError;
use reportcard_engine::fetch_with_timeout;
use reportcard_models::{DiagnosticsResponse, ProviderCheckResponse};
use tracing::{instrument, warn};

use crate::metrics::track_provider_check;
use crate::state::AppState;

pub const BACKEND_MESSAGE: &str = "Backend API is working!";
pub const PROVIDER_OK_MESSAGE: &str = "Firebase connection successful";

pub struct DiagnosticsService;

impl DiagnosticsService {
    /// Template location and contents plus the configured data store.
    ///
    /// The placeholder lists stay empty when the template cannot be loaded.
    #[instrument(skip(state))]
    pub fn describe(state: &AppState) -> DiagnosticsResponse {
        let templates = state.generator.templates();

        let (template_placeholders, missing_placeholders) = match templates.load() {
            Ok(template) => (
                template.placeholders(),
                template
                    .missing_placeholders()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            Err(e) => {
                warn!(error = %e, "Template not loadable");
                (Vec::new(), Vec::new())
            }
        };

        DiagnosticsResponse {
            message: BACKEND_MESSAGE.to_string(),
            timestamp: Utc::now(),
            template_path: templates.path().display().to_string(),
            template_exists: templates.exists(),
            template_cached: templates.is_cached(),
            template_placeholders,
            missing_placeholders,
            provider: state.provider.name().to_string(),
        }
    }

    /// Round trip to the data store, bounded by the fetch timeout.
    #[instrument(skip(state), fields(provider = %state.provider.name()))]
    pub async fn check_provider(state: &AppState) -> Result<ProviderCheckResponse, ReportError> {
        let result =
            fetch_with_timeout(state.batch_config.fetch_timeout, state.provider.ping()).await;
        track_provider_check(result.is_ok());
        result?;

        Ok(ProviderCheckResponse {
            success: true,
            message: PROVIDER_OK_MESSAGE.to_string(),
            provider: state.provider.name().to_string(),
        })
    }
}
