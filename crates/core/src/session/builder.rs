use std::path::{Path, PathBuf};
use std::sync::Arc;

use quizzer_traits::SessionClock;
use quizzer_xml::Document;

use super::QuizSession;
use crate::config::SessionConfig;
use crate::error::QuizError;
use crate::journal::Journal;
use crate::navigation::{apply_randomization, build_navigation_list, page_group_permutation};

enum DocumentSource {
    File(PathBuf),
    Text(String),
}

/// A builder for creating a `QuizSession`.
#[derive(Default)]
pub struct SessionBuilder {
    source: Option<DocumentSource>,
    save_path: Option<PathBuf>,
    config: SessionConfig,
    clock: Option<Arc<dyn SessionClock>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Opens the quiz from a file. Results are saved back to the same file
    /// unless `with_save_path` names another one.
    pub fn with_document_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(DocumentSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Uses an in-memory quiz. Without `with_save_path` the session never
    /// touches the filesystem.
    pub fn with_document_source(mut self, xml: &str) -> Self {
        self.source = Some(DocumentSource::Text(xml.to_string()));
        self
    }

    pub fn with_save_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.save_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads settings from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, QuizError> {
        self.config = SessionConfig::from_json_file(path)?;
        Ok(self)
    }

    pub fn with_clock(mut self, clock: Arc<dyn SessionClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Overrides the document's `RandomizePageGroups` setting.
    pub fn with_randomization(mut self, randomize: bool) -> Self {
        self.config.randomize_page_groups = Some(randomize);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Consumes the builder, opens the document and derives the navigation
    /// list.
    pub fn build(self) -> Result<QuizSession, QuizError> {
        let clock = self.clock.ok_or_else(|| {
            QuizError::Config("No clock has been configured. Use `with_clock`.".to_string())
        })?;
        let root_tag = self.config.expected_root_tag.as_str();

        let (mut doc, file_path) = match self.source {
            Some(DocumentSource::File(path)) => (Document::open(&path, root_tag)?, Some(path)),
            Some(DocumentSource::Text(xml)) => (Document::parse_str(&xml, root_tag)?, None),
            None => {
                return Err(QuizError::Config(
                    "No quiz document has been configured. Use `with_document_file` or `with_document_source`."
                        .to_string(),
                ));
            }
        };

        let mut navigation = build_navigation_list(&mut doc)?;
        if let Some(order) = page_group_permutation(&mut doc, &navigation, &self.config)? {
            navigation = apply_randomization(&navigation, &order);
        }

        let journal = Journal::new(clock, self.config.timestamp_format.clone());
        let save_path = self.save_path.or(file_path);
        log::info!(
            "Opened quiz with {} navigation entries{}",
            navigation.len(),
            save_path
                .as_ref()
                .map(|p| format!(", saving to '{}'", p.display()))
                .unwrap_or_default()
        );

        Ok(QuizSession {
            doc,
            save_path,
            config: self.config,
            journal,
            navigation,
            current_index: 0,
            login: None,
        })
    }
}
