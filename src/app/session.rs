// src/app/session.rs

//! Event handling: turns UI events into state transitions.
//!
//! A [`Session`] is the only owner of [`AppState`]. Adapters (the CLI, a
//! browser bridge, tests) feed it [`UiEvent`]s and redraw from
//! [`AppState::snapshot`]. Debounced search values come back through the
//! receiver returned by [`Session::new`] and must be fed in as
//! [`UiEvent::SearchSettled`].

use std::path::Path;

use tokio::sync::mpsc;

use crate::app::debounce::Debouncer;
use crate::app::notify::{Notifier, Severity};
use crate::app::shortcuts::{KeyPress, Shortcut, Shortcuts};
use crate::app::state::{AppState, View};
use crate::error::Result;
use crate::models::{Config, Designation, Directory};
use crate::services::export;
use crate::services::PageTarget;

/// Input from the user, already decoded by an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A keystroke changed the search box
    SearchInput(String),
    /// The search box has been quiet for the debounce window
    SearchSettled(String),
    SchoolFilter(Option<String>),
    DesignationFilter(Option<Designation>),
    DepartmentFilter(Option<String>),
    ClearFilters,
    Page(PageTarget),
    Navigate(View),
    /// A school card was chosen: show its faculty
    SelectSchool(String),
    OpenDetail(u32),
    CloseDetail,
    Key(KeyPress),
}

/// The interactive directory.
pub struct Session<N: Notifier> {
    state: AppState,
    debouncer: Debouncer<String>,
    shortcuts: Shortcuts,
    notifier: N,
    evaluations: usize,
}

impl<N: Notifier> Session<N> {
    /// Build a session over a loaded directory. The receiver yields settled
    /// search terms.
    pub fn new(
        directory: Directory,
        config: &Config,
        notifier: N,
    ) -> Result<(Self, mpsc::UnboundedReceiver<String>)> {
        let shortcuts = Shortcuts::from_binding(&config.directory.focus_shortcut)?;
        let (debouncer, settled) = Debouncer::new(config.directory.debounce());
        let session = Self {
            state: AppState::new(directory, config.directory.page_size),
            debouncer,
            shortcuts,
            notifier,
            evaluations: 0,
        };
        Ok((session, settled))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of queries applied so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Apply one event.
    pub fn handle(&mut self, event: UiEvent) {
        log::debug!("Handling {:?}", event);
        match event {
            UiEvent::SearchInput(text) => {
                self.state.set_search_input(text.clone());
                self.debouncer.schedule(text);
            }
            UiEvent::SearchSettled(text) => {
                // A value that raced a newer keystroke is stale.
                if text == self.state.search_input() {
                    self.apply(|q| q.search_term = text);
                }
            }
            UiEvent::SchoolFilter(code) => self.apply(|q| q.school_filter = code),
            UiEvent::DesignationFilter(d) => self.apply(|q| q.designation_filter = d),
            UiEvent::DepartmentFilter(dept) => self.apply(|q| q.department_filter = dept),
            UiEvent::ClearFilters => {
                self.debouncer.cancel();
                self.state.clear();
                self.evaluations += 1;
                self.notifier.notify("Filters cleared", Severity::Info);
            }
            UiEvent::Page(target) => self.state.turn_page(target),
            UiEvent::Navigate(view) => {
                self.state.blur_search();
                self.state.navigate(view);
            }
            UiEvent::SelectSchool(code) => {
                self.state.navigate(View::Directory);
                self.apply(|q| q.school_filter = Some(code));
            }
            UiEvent::OpenDetail(id) => {
                if !self.state.open_detail(id) {
                    log::debug!("No faculty with id {}", id);
                }
            }
            UiEvent::CloseDetail => {
                self.state.close_detail();
            }
            UiEvent::Key(press) => match self.shortcuts.resolve(press) {
                Some(Shortcut::FocusSearch) => self.state.focus_search(),
                Some(Shortcut::DismissDetail) => {
                    self.state.close_detail();
                }
                None => {}
            },
        }
    }

    fn apply(&mut self, change: impl FnOnce(&mut crate::models::QueryState)) {
        self.state.apply(change);
        self.evaluations += 1;
    }

    /// CSV of the records matching the query right now.
    pub fn export_csv(&self) -> String {
        export::to_csv(&self.state.results())
    }

    /// Write the live result set to `path` and notify the outcome.
    pub async fn export_to(&self, path: impl AsRef<Path>) -> Result<usize> {
        let results = self.state.results();
        match export::write_csv(path, &results).await {
            Ok(count) => {
                self.notifier
                    .notify("Faculty data exported successfully!", Severity::Info);
                Ok(count)
            }
            Err(e) => {
                self.notifier
                    .notify(&format!("Export failed: {}", e), Severity::Error);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::app::notify::RecordingNotifier;
    use crate::app::shortcuts::Key;
    use crate::models::{RawFacultyRecord, RawId};
    use crate::services::{Enricher, summarize};

    fn directory() -> Directory {
        let rows: Vec<RawFacultyRecord> = (1..=20)
            .map(|i| RawFacultyRecord {
                id: Some(RawId::Number(i)),
                name: Some(format!("Dr. Person {}", i)),
                department: Some(if i % 2 == 0 { "SAS" } else { "SCOPE" }.into()),
                cabin_location: Some(if i <= 3 { "AB1-1" } else { "AB2-2" }.into()),
                image: None,
            })
            .collect();
        let enricher = Enricher::from_config(&Config::default());
        let outcome = enricher.enrich(&rows);
        let schools = summarize(&outcome.records, enricher.tables());
        Directory {
            records: outcome.records,
            schools,
            issues: outcome.issues,
            load_error: None,
        }
    }

    fn session(
        notifier: &RecordingNotifier,
    ) -> (Session<&RecordingNotifier>, mpsc::UnboundedReceiver<String>) {
        Session::new(directory(), &Config::default(), notifier).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_evaluates_once() {
        let notifier = RecordingNotifier::default();
        let (mut session, mut settled) = session(&notifier);

        for text in ["a", "ab", "ab1"] {
            session.handle(UiEvent::SearchInput(text.into()));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(session.evaluations(), 0);
        assert_eq!(session.state().query().search_term, "");

        let term = settled.recv().await.unwrap();
        session.handle(UiEvent::SearchSettled(term));

        assert_eq!(session.evaluations(), 1);
        assert_eq!(session.state().query().search_term, "ab1");
        assert_eq!(session.state().results().len(), 3);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_settled_value_is_ignored() {
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);

        session.handle(UiEvent::SearchInput("ab2".into()));
        session.handle(UiEvent::SearchSettled("ab".into()));
        assert_eq!(session.evaluations(), 0);
        assert_eq!(session.state().query().search_term, "");
    }

    #[tokio::test]
    async fn test_filters_reset_page() {
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);

        session.handle(UiEvent::Page(PageTarget::Next));
        assert_eq!(session.state().query().page, 2);

        session.handle(UiEvent::DesignationFilter(Some(
            Designation::AssociateProfessor,
        )));
        assert_eq!(session.state().query().page, 1);
        assert_eq!(session.state().results().len(), 20);

        session.handle(UiEvent::SchoolFilter(Some("SAS".into())));
        assert_eq!(session.state().results().len(), 10);
    }

    #[tokio::test]
    async fn test_clear_filters_resets_and_notifies() {
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);

        session.handle(UiEvent::SearchInput("ab1".into()));
        session.handle(UiEvent::DepartmentFilter(Some("SAS".into())));
        session.handle(UiEvent::ClearFilters);

        assert!(!session.is_search_pending());
        assert_eq!(session.state().search_input(), "");
        assert_eq!(*session.state().query(), crate::models::QueryState::default());
        assert_eq!(
            notifier.messages(),
            vec![("Filters cleared".to_string(), Severity::Info)]
        );
    }

    #[tokio::test]
    async fn test_select_school_opens_directory_filtered() {
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);

        session.handle(UiEvent::SelectSchool("SCOPE".into()));
        assert_eq!(session.state().view(), View::Directory);
        assert!(session.state().results().iter().all(|r| r.school == "SCOPE"));
    }

    #[tokio::test]
    async fn test_keyboard_shortcuts() {
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);

        session.handle(UiEvent::Key(KeyPress::ctrl('k')));
        assert!(session.state().is_search_focused());
        assert_eq!(session.state().view(), View::Directory);

        session.handle(UiEvent::OpenDetail(4));
        assert_eq!(session.state().detail().map(|r| r.id), Some(4));
        session.handle(UiEvent::Key(KeyPress::plain(Key::Escape)));
        assert!(session.state().detail().is_none());
    }

    #[tokio::test]
    async fn test_export_reflects_live_filters() {
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);

        let all = session.export_csv();
        assert_eq!(all.lines().count(), 21);

        session.handle(UiEvent::DepartmentFilter(Some("SAS".into())));
        let filtered = session.export_csv();
        assert_eq!(filtered.lines().count(), 11);
        assert!(filtered.lines().skip(1).all(|l| l.contains("\"SAS\"")));
    }

    #[tokio::test]
    async fn test_export_to_file_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = RecordingNotifier::default();
        let (mut session, _settled) = session(&notifier);
        session.handle(UiEvent::SchoolFilter(Some("SCOPE".into())));

        let path = dir.path().join("faculty.csv");
        assert_eq!(session.export_to(&path).await.unwrap(), 10);
        assert_eq!(
            notifier.messages(),
            vec![(
                "Faculty data exported successfully!".to_string(),
                Severity::Info
            )]
        );
    }

    #[test]
    fn test_invalid_shortcut_config_is_rejected() {
        let mut config = Config::default();
        config.directory.focus_shortcut = "meta+".into();
        let notifier = RecordingNotifier::default();
        assert!(Session::new(directory(), &config, &notifier).is_err());
    }
}
