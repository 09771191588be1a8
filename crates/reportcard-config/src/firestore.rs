use crate::{process_env, string_or};

/// Firestore REST endpoint and credentials.
///
/// # Environment Variables
///
/// - `FIREBASE_PROJECT_ID`: project hosting the database (default: `ass-sms`)
/// - `FIREBASE_API_KEY`: web API key appended to every request (default: empty)
/// - `FIRESTORE_BASE_URL`: REST root, override for the emulator (default: `https://firestore.googleapis.com/v1`)
/// - `FIRESTORE_STUDENTS_COLLECTION`: student documents (default: `students`)
/// - `FIRESTORE_GRADES_COLLECTION`: grade documents (default: `grades`)
#[derive(Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    pub base_url: String,
    pub students_collection: String,
    pub grades_collection: String,
}

impl std::fmt::Debug for FirestoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreConfig")
            .field("project_id", &self.project_id)
            .field("base_url", &self.base_url)
            .field("students_collection", &self.students_collection)
            .field("grades_collection", &self.grades_collection)
            .finish_non_exhaustive()
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: "ass-sms".to_string(),
            api_key: String::new(),
            base_url: "https://firestore.googleapis.com/v1".to_string(),
            students_collection: "students".to_string(),
            grades_collection: "grades".to_string(),
        }
    }
}

impl FirestoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            project_id: string_or(&lookup, "FIREBASE_PROJECT_ID", &defaults.project_id),
            api_key: lookup("FIREBASE_API_KEY").unwrap_or_default(),
            base_url: string_or(&lookup, "FIRESTORE_BASE_URL", &defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            students_collection: string_or(
                &lookup,
                "FIRESTORE_STUDENTS_COLLECTION",
                &defaults.students_collection,
            ),
            grades_collection: string_or(
                &lookup,
                "FIRESTORE_GRADES_COLLECTION",
                &defaults.grades_collection,
            ),
        }
    }

    /// `{base}/projects/{project}/databases/(default)/documents`
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            self.base_url, self.project_id
        )
    }
}
