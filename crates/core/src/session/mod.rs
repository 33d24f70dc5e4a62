//! A user's pass through one quiz document.
//!
//! [`QuizSession`] owns the document, the navigation list and the current
//! position. Every method that changes the document saves it afterwards
//! when the session has a results path, so the file on disk is never more
//! than one user action behind.

mod builder;
mod save;

pub use builder::SessionBuilder;
pub use save::{is_transient, write_with_retry};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quizzer_traits::{FileComparer, LabelMapInspector, RetryPrompt, SessionClock};
use quizzer_types::{NavigationEntry, PageLayout};
use quizzer_xml::{Document, NodeId};

use crate::completion::{CompletionCheck, CompletionContext, PageState, mark_page_complete, question_set_answered};
use crate::config::SessionConfig;
use crate::error::QuizError;
use crate::history::{HistoryPage, find_bookmark, find_previous_instances_of_page};
use crate::journal::{Journal, PathKind, ResponseEvent};
use crate::navigation::{
    apply_randomization, build_navigation_list, layout_for_navigation_list, navigation_index_for_page,
    page_for_entry, page_group_permutation, question_set_for_entry,
};
use crate::repetition::repeat_and_adjust;
use crate::tags::{self, attr};

#[derive(Debug)]
pub struct QuizSession {
    doc: Document,
    save_path: Option<PathBuf>,
    config: SessionConfig,
    journal: Journal,
    navigation: Vec<NavigationEntry>,
    current_index: usize,
    login: Option<NodeId>,
}

impl QuizSession {
    /// Opens a quiz file that also receives the results.
    pub fn open<P: AsRef<Path>>(
        path: P,
        config: SessionConfig,
        clock: Arc<dyn SessionClock>,
    ) -> Result<Self, QuizError> {
        SessionBuilder::new()
            .with_document_file(path)
            .with_config(config)
            .with_clock(clock)
            .build()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn save_path(&self) -> Option<&Path> {
        self.save_path.as_deref()
    }

    pub fn navigation(&self) -> &[NavigationEntry] {
        &self.navigation
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_entry(&self) -> Option<&NavigationEntry> {
        self.navigation.get(self.current_index)
    }

    pub fn current_page(&self) -> Option<NodeId> {
        self.current_entry().and_then(|e| page_for_entry(&self.doc, e))
    }

    pub fn current_question_set(&self) -> Option<NodeId> {
        self.current_entry().and_then(|e| question_set_for_entry(&self.doc, e))
    }

    fn require_current_page(&self) -> Result<NodeId, QuizError> {
        self.current_page().ok_or_else(|| {
            QuizError::Navigation(format!(
                "no page at navigation index {} of {}",
                self.current_index,
                self.navigation.len()
            ))
        })
    }

    /// Records the login and moves to the first page not yet complete.
    ///
    /// When every page is complete the session resumes on the last entry.
    pub fn start(&mut self) -> Result<usize, QuizError> {
        let root = self.doc.root();
        let login_time = self.journal.login_time_string();
        let username = self.journal.clock().username();
        let login = self.doc.add_element(
            root,
            tags::LOGIN,
            None,
            &[(attr::LOGIN_TIME, login_time.as_str()), (attr::USER_NAME, username.as_str())],
        )?;
        self.login = Some(login);

        self.current_index = self
            .navigation
            .iter()
            .position(|entry| {
                page_for_entry(&self.doc, entry)
                    .is_some_and(|page| !tags::is_yes(self.doc.attribute(page, attr::PAGE_COMPLETE)))
            })
            .unwrap_or_else(|| self.navigation.len().saturating_sub(1));

        log::info!(
            "User '{}' logged in at {}; resuming at navigation index {}",
            username,
            login_time,
            self.current_index
        );
        self.persist()?;
        Ok(self.current_index)
    }

    /// Stamps `LogoutTime` and `QuizComplete` on this session's login.
    pub fn close(&mut self, quiz_complete: bool) -> Result<(), QuizError> {
        let login = self
            .login
            .ok_or_else(|| QuizError::Navigation("session was closed before it was started".to_string()))?;
        let logout_time = self.journal.now_string();
        self.doc.set_attribute(login, attr::LOGOUT_TIME, &logout_time)?;
        self.doc
            .set_attribute(login, attr::QUIZ_COMPLETE, if quiz_complete { "Y" } else { "N" })?;
        log::info!("Logged out at {} (quiz complete: {})", logout_time, quiz_complete);
        self.persist()
    }

    /// Moves to the next entry. Returns `None` at the end of the list.
    pub fn next(&mut self) -> Option<usize> {
        if self.current_index + 1 < self.navigation.len() {
            self.current_index += 1;
            Some(self.current_index)
        } else {
            None
        }
    }

    /// Moves to the previous entry. Returns `None` at the start of the list.
    pub fn previous(&mut self) -> Option<usize> {
        let index = self.current_index.checked_sub(1)?;
        self.current_index = index;
        Some(index)
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), QuizError> {
        if index >= self.navigation.len() {
            return Err(QuizError::Navigation(format!(
                "navigation index {} out of range ({} entries)",
                index,
                self.navigation.len()
            )));
        }
        self.current_index = index;
        Ok(())
    }

    /// Follows the current page's `GoToBookmark` back to the most recent
    /// page carrying that `BookmarkID`.
    ///
    /// Returns `None`, without moving, when the page names no bookmark or
    /// no visited page carries it.
    pub fn go_to_bookmark(&mut self) -> Result<Option<usize>, QuizError> {
        let page = self.require_current_page()?;
        let Some(bookmark) = self.doc.attribute(page, attr::GO_TO_BOOKMARK) else {
            return Ok(None);
        };
        match find_bookmark(&self.doc, &self.navigation, self.current_index, bookmark) {
            Some(index) => {
                log::debug!("Bookmark '{}' resolves to navigation index {}", bookmark, index);
                self.current_index = index;
                Ok(Some(index))
            }
            None => {
                log::warn!("Bookmark '{}' not found on any earlier page", bookmark);
                Ok(None)
            }
        }
    }

    /// `Loop="Y"` on the current page.
    pub fn is_looping_page(&self) -> bool {
        self.current_page()
            .is_some_and(|page| tags::is_yes(self.doc.attribute(page, attr::LOOP)))
    }

    /// Earlier repetitions of the current page.
    pub fn previous_instances(&self) -> Result<Vec<HistoryPage>, QuizError> {
        find_previous_instances_of_page(&self.doc, &self.navigation, self.current_index)
    }

    pub fn layouts(&self) -> Vec<PageLayout> {
        layout_for_navigation_list(&self.doc, &self.navigation)
    }

    /// Completion state of the current page, tested against the files the
    /// user produced.
    pub fn page_state(
        &self,
        inspector: &dyn LabelMapInspector,
        comparer: &dyn FileComparer,
    ) -> Result<PageState, QuizError> {
        let page = self.require_current_page()?;
        let mut state = PageState::initialize(&self.doc, page);

        let ctx = CompletionContext {
            doc: &self.doc,
            navigation: &self.navigation,
            current_index: self.current_index,
            inspector,
            comparer,
            timestamp_format: &self.config.timestamp_format,
        };
        state.test_labelmaps_completion_state(&ctx);
        state.test_markup_lines_completion_state(&self.doc);

        if !state.check_page_completion_level_for_question_sets() {
            for (index, question_set) in self.doc.children(page, tags::QUESTION_SET).into_iter().enumerate() {
                state.update_question_set_completion_state(index, question_set_answered(&self.doc, question_set))?;
            }
        }
        Ok(state)
    }

    /// Marks the current page complete when every axis is satisfied.
    pub fn complete_current_page(
        &mut self,
        inspector: &dyn LabelMapInspector,
        comparer: &dyn FileComparer,
    ) -> Result<CompletionCheck, QuizError> {
        let state = self.page_state(inspector, comparer)?;
        let report = state.completion_report(&self.doc);
        if report.complete {
            mark_page_complete(&mut self.doc, state.page())?;
            self.persist()?;
        } else {
            log::info!("Page not complete: {}", report.message.replace('\n', "; "));
        }
        Ok(report)
    }

    pub fn record_response(
        &mut self,
        option: NodeId,
        value: &str,
        event: &ResponseEvent,
    ) -> Result<NodeId, QuizError> {
        let response = self.journal.add_response_element(&mut self.doc, option, value, event)?;
        self.persist()?;
        Ok(response)
    }

    pub fn record_path(&mut self, image: NodeId, kind: PathKind, path: &str) -> Result<NodeId, QuizError> {
        let node = self.journal.add_path_element(&mut self.doc, image, kind, path)?;
        self.persist()?;
        Ok(node)
    }

    pub fn record_image_state(&mut self, image: NodeId, state: &[(&str, &str)]) -> Result<NodeId, QuizError> {
        let node = self.journal.add_image_state_element(&mut self.doc, image, state)?;
        self.persist()?;
        Ok(node)
    }

    /// Appends a fresh repetition of the current page, rebuilds the
    /// navigation list and moves to the new page.
    pub fn repeat_current_page(&mut self) -> Result<usize, QuizError> {
        let page_index = self
            .current_entry()
            .map(|e| e.page_index)
            .ok_or_else(|| QuizError::Navigation("no current page to repeat".to_string()))?;

        let new_page = repeat_and_adjust(&mut self.doc, page_index)?;
        self.persist()?;
        self.rebuild_navigation()?;

        self.current_index = navigation_index_for_page(&self.navigation, new_page).ok_or_else(|| {
            QuizError::Navigation(format!("repeated page {} is missing from the navigation list", new_page))
        })?;
        Ok(self.current_index)
    }

    fn rebuild_navigation(&mut self) -> Result<(), QuizError> {
        let mut navigation = build_navigation_list(&mut self.doc)?;
        if let Some(order) = page_group_permutation(&mut self.doc, &navigation, &self.config)? {
            navigation = apply_randomization(&navigation, &order);
        }
        self.navigation = navigation;
        Ok(())
    }

    /// Writes the document to the results path.
    pub fn save(&self) -> Result<(), QuizError> {
        let path = self
            .save_path
            .as_ref()
            .ok_or_else(|| QuizError::Config("session has no results path".to_string()))?;
        self.doc.save_xml(path)?;
        Ok(())
    }

    /// Like [`save`](Self::save), asking `prompt` before each retry while
    /// the file is locked.
    pub fn save_with_retry(&self, prompt: &dyn RetryPrompt) -> Result<(), QuizError> {
        let path = self
            .save_path
            .as_ref()
            .ok_or_else(|| QuizError::Config("session has no results path".to_string()))?;
        write_with_retry(path, self.config.max_save_attempts, prompt, || self.doc.save_xml(path))
    }

    fn persist(&self) -> Result<(), QuizError> {
        match self.save_path {
            Some(_) => self.save(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use quizzer_traits::{FixedClock, FixedRetryPrompt, InMemoryFileComparer, InMemoryLabelMapInspector};

    const QUIZ: &str = r#"<Session>
        <Page ID="Intro" PageGroup="0" PageComplete="Y" BookmarkID="Top"/>
        <Page ID="P1" Rep="0" Loop="Y" GoToBookmark="Top">
            <Image ID="CT"/>
            <QuestionSet ID="QS1">
                <Question><Option ID="yes"/><Option ID="no"/></Question>
            </QuestionSet>
        </Page>
        <Page ID="P2" Rep="0"/>
    </Session>"#;

    fn clock() -> Arc<dyn SessionClock> {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        Arc::new(FixedClock::new(start, chrono::Duration::seconds(1)).with_username("reader1"))
    }

    fn session() -> QuizSession {
        SessionBuilder::new()
            .with_document_source(QUIZ)
            .with_clock(clock())
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_clock_and_document() {
        assert!(matches!(
            SessionBuilder::new().with_document_source(QUIZ).build(),
            Err(QuizError::Config(_))
        ));
        assert!(matches!(
            SessionBuilder::new().with_clock(clock()).build(),
            Err(QuizError::Config(_))
        ));
    }

    #[test]
    fn test_start_resumes_at_first_incomplete_page() {
        let mut session = session();
        assert_eq!(session.start().unwrap(), 1);

        let login = session.document().last_child(session.document().root(), "Login").unwrap();
        assert_eq!(session.document().attribute(login, "UserName"), Some("reader1"));
        assert_eq!(
            session.document().attribute(login, "LoginTime"),
            Some("20240301_09:00:00.000000")
        );
    }

    #[test]
    fn test_close_stamps_logout() {
        let mut session = session();
        assert!(session.close(false).is_err());
        session.start().unwrap();
        session.close(true).unwrap();
        let doc = session.document();
        let login = doc.last_child(doc.root(), "Login").unwrap();
        assert_eq!(doc.attribute(login, "QuizComplete"), Some("Y"));
        assert!(doc.attribute(login, "LogoutTime").is_some());
    }

    #[test]
    fn test_next_and_previous_stop_at_the_ends() {
        let mut session = session();
        assert_eq!(session.previous(), None);
        assert_eq!(session.next(), Some(1));
        assert_eq!(session.next(), Some(2));
        assert_eq!(session.next(), None);
        assert_eq!(session.current_index(), 2);
        assert!(session.go_to(7).is_err());
    }

    #[test]
    fn test_page_completes_once_question_answered() {
        let mut session = session();
        session.start().unwrap();
        let inspector = InMemoryLabelMapInspector::new();
        let comparer = InMemoryFileComparer::new();

        let report = session.complete_current_page(&inspector, &comparer).unwrap();
        assert!(!report.complete);

        let qs = session.current_question_set().unwrap();
        let question = session.document().nth_child(qs, "Question", 0).unwrap();
        let option = session.document().nth_child(question, "Option", 0).unwrap();
        session
            .record_response(option, "Y", &ResponseEvent::NextButton)
            .unwrap();

        let report = session.complete_current_page(&inspector, &comparer).unwrap();
        assert!(report.complete, "{}", report.message);
        let page = session.current_page().unwrap();
        assert_eq!(session.document().attribute(page, "PageComplete"), Some("Y"));
    }

    #[test]
    fn test_go_to_bookmark() {
        let mut session = session();
        session.go_to(1).unwrap();
        assert_eq!(session.go_to_bookmark().unwrap(), Some(0));
        assert_eq!(session.current_index(), 0);
        // The intro page names no bookmark to go to.
        assert_eq!(session.go_to_bookmark().unwrap(), None);
    }

    #[test]
    fn test_repeat_current_page_moves_to_the_copy() {
        let mut session = session();
        session.go_to(1).unwrap();
        assert!(session.is_looping_page());

        let index = session.repeat_current_page().unwrap();
        assert_eq!(index, 2);
        assert_eq!(session.navigation().len(), 4);
        let page = session.current_page().unwrap();
        assert_eq!(session.document().attribute(page, "ID"), Some("P1-Rep1"));
        assert_eq!(session.previous_instances().unwrap().len(), 1);
    }

    #[test]
    fn test_save_without_path_is_an_error() {
        let session = session();
        assert!(matches!(session.save(), Err(QuizError::Config(_))));
        assert!(matches!(
            session.save_with_retry(&FixedRetryPrompt::new(1)),
            Err(QuizError::Config(_))
        ));
    }

    #[test]
    fn test_save_writes_results_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.xml");
        let mut session = SessionBuilder::new()
            .with_document_source(QUIZ)
            .with_save_path(&path)
            .with_clock(clock())
            .build()
            .unwrap();
        session.start().unwrap();

        let reopened = Document::open(&path, "Session").unwrap();
        assert_eq!(reopened.child_count(reopened.root(), "Login"), 1);
    }
}
