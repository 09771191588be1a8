use std::path::PathBuf;

use crate::{parse_or, process_env, string_or};

/// Location of the word template and whether it is parsed once or per report.
///
/// # Environment Variables
///
/// - `REPORT_TEMPLATE_PATH`: path to the `.docx` template (default: `assets/report_template.docx`)
/// - `TEMPLATE_CACHE`: keep the parsed template in memory (default: `false`)
#[derive(Clone, Debug)]
pub struct TemplateConfig {
    pub path: PathBuf,
    pub cache: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/report_template.docx"),
            cache: false,
        }
    }
}

impl TemplateConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            path: PathBuf::from(string_or(
                &lookup,
                "REPORT_TEMPLATE_PATH",
                &defaults.path.to_string_lossy(),
            )),
            cache: parse_or(&lookup, "TEMPLATE_CACHE", defaults.cache),
        }
    }
}
