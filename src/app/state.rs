// src/app/state.rs

//! Owned application state and the plain-data view handed to renderers.

use serde::Serialize;

use crate::models::{Directory, FacultyRecord, QueryState, SchoolSummary};
use crate::services::{
    FilterOptions, PageTarget, PaginationView, filter_options, paginate, query,
};

/// Top-level sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Home,
    Directory,
    Departments,
    Map,
    Contact,
}

/// Everything the UI can change, plus the read-only dataset.
#[derive(Debug, Clone)]
pub struct AppState {
    directory: Directory,
    filters: FilterOptions,
    query: QueryState,
    search_input: String,
    view: View,
    detail: Option<u32>,
    search_focused: bool,
    page_size: usize,
}

impl AppState {
    pub fn new(directory: Directory, page_size: usize) -> Self {
        let filters = filter_options(&directory.records);
        Self {
            directory,
            filters,
            query: QueryState::default(),
            search_input: String::new(),
            view: View::default(),
            detail: None,
            search_focused: false,
            page_size: page_size.max(1),
        }
    }

    /// State for a one-shot listing with the query already applied.
    pub fn with_query(directory: Directory, page_size: usize, query: QueryState) -> Self {
        Self {
            query,
            view: View::Directory,
            ..Self::new(directory, page_size)
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Text in the search box, which may be ahead of the applied term.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Records matching the current query, evaluated now.
    pub fn results(&self) -> Vec<&FacultyRecord> {
        query(&self.directory.records, &self.query)
    }

    pub fn detail(&self) -> Option<&FacultyRecord> {
        self.detail.and_then(|id| self.directory.get(id))
    }

    pub(crate) fn set_search_input(&mut self, input: String) {
        self.search_input = input;
    }

    /// Change the query and go back to page 1.
    pub(crate) fn apply(&mut self, change: impl FnOnce(&mut QueryState)) {
        change(&mut self.query);
        self.query.page = 1;
    }

    /// Reset search and filters.
    pub(crate) fn clear(&mut self) {
        self.search_input.clear();
        self.query = QueryState::default();
    }

    pub(crate) fn turn_page(&mut self, target: PageTarget) {
        let total = self.total_pages();
        self.query.page = target.resolve(self.query.page, total);
    }

    pub(crate) fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub(crate) fn focus_search(&mut self) {
        self.search_focused = true;
        self.view = View::Directory;
    }

    pub(crate) fn blur_search(&mut self) {
        self.search_focused = false;
    }

    /// Open the detail overlay; unknown ids leave the state untouched.
    pub(crate) fn open_detail(&mut self, id: u32) -> bool {
        if self.directory.get(id).is_some() {
            self.detail = Some(id);
            true
        } else {
            false
        }
    }

    /// Close the overlay. Returns whether one was open.
    pub(crate) fn close_detail(&mut self) -> bool {
        self.detail.take().is_some()
    }

    pub fn total_pages(&self) -> usize {
        crate::services::pagination::total_pages(self.results().len(), self.page_size)
    }

    /// Plain-data snapshot for a renderer.
    pub fn snapshot(&self) -> DirectoryView<'_> {
        let results = self.results();
        let page = paginate(&results, self.page_size, self.query.page);
        DirectoryView {
            view: self.view,
            query: &self.query,
            search_input: &self.search_input,
            items: page.items.to_vec(),
            result_count: results.len(),
            total_records: self.directory.records.len(),
            pagination: PaginationView::new(self.query.page, page.total_pages),
            filters: &self.filters,
            schools: &self.directory.schools,
            detail: self.detail(),
            load_error: self.directory.load_error.as_deref(),
        }
    }
}

/// What a renderer needs to draw the directory. Contains data, not markup.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView<'a> {
    pub view: View,
    pub query: &'a QueryState,
    pub search_input: &'a str,
    pub items: Vec<&'a FacultyRecord>,
    pub result_count: usize,
    pub total_records: usize,
    pub pagination: PaginationView,
    pub filters: &'a FilterOptions,
    pub schools: &'a [SchoolSummary],
    pub detail: Option<&'a FacultyRecord>,
    /// Why the dataset is missing, when it failed to load
    pub load_error: Option<&'a str>,
}

impl DirectoryView<'_> {
    /// Nothing matched the query. False when the dataset itself is missing.
    pub fn is_empty_result(&self) -> bool {
        self.result_count == 0 && self.load_error.is_none()
    }

    pub fn is_load_failed(&self) -> bool {
        self.load_error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Config, RawFacultyRecord, RawId};
    use crate::services::Enricher;

    fn state(count: i64) -> AppState {
        let rows: Vec<RawFacultyRecord> = (1..=count)
            .map(|i| RawFacultyRecord {
                id: Some(RawId::Number(i)),
                name: Some(format!("Dr. Person {}", i)),
                department: Some(if i % 2 == 0 { "SAS" } else { "SCOPE" }.into()),
                cabin_location: Some(format!("AB1-{}", i)),
                image: None,
            })
            .collect();
        let records = Enricher::from_config(&Config::default())
            .enrich(&rows)
            .records;
        AppState::new(
            Directory {
                records,
                ..Directory::default()
            },
            9,
        )
    }

    #[test]
    fn test_snapshot_first_page() {
        let state = state(22);
        let view = state.snapshot();
        assert_eq!(view.items.len(), 9);
        assert_eq!(view.result_count, 22);
        assert_eq!(view.pagination.total_pages, 3);
        assert!(!view.is_empty_result());
    }

    #[test]
    fn test_apply_resets_page() {
        let mut state = state(22);
        state.turn_page(PageTarget::Number(3));
        assert_eq!(state.query().page, 3);
        assert_eq!(state.snapshot().items.len(), 4);

        state.apply(|q| q.department_filter = Some("SAS".into()));
        assert_eq!(state.query().page, 1);
        assert_eq!(state.snapshot().result_count, 11);
    }

    #[test]
    fn test_turn_page_clamps_previous_and_next() {
        let mut state = state(22);
        state.turn_page(PageTarget::Previous);
        assert_eq!(state.query().page, 1);
        state.turn_page(PageTarget::Number(3));
        state.turn_page(PageTarget::Next);
        assert_eq!(state.query().page, 3);
    }

    #[test]
    fn test_empty_result_is_distinct_from_empty_dataset() {
        let mut state = state(5);
        state.apply(|q| q.search_term = "nobody".into());
        let view = state.snapshot();
        assert!(view.is_empty_result());
        assert_eq!(view.total_records, 5);
    }

    #[test]
    fn test_load_failure_is_not_an_empty_result() {
        let state = AppState::new(Directory::failed("Load error from x: missing"), 9);
        let view = state.snapshot();
        assert!(view.is_load_failed());
        assert!(!view.is_empty_result());
        assert_eq!(view.load_error, Some("Load error from x: missing"));
    }

    #[test]
    fn test_detail_open_and_close() {
        let mut state = state(3);
        assert!(!state.open_detail(42));
        assert!(state.detail().is_none());
        assert!(state.open_detail(2));
        assert_eq!(state.detail().unwrap().name, "Dr. Person 2");
        assert!(state.close_detail());
        assert!(!state.close_detail());
    }

    #[test]
    fn test_with_query_keeps_requested_page() {
        let rows = state(22).directory().clone();
        let query = QueryState {
            page: 3,
            ..QueryState::default().with_department("SCOPE")
        };
        let state = AppState::with_query(rows, 9, query);
        let view = state.snapshot();
        assert_eq!(view.view, View::Directory);
        assert_eq!(view.result_count, 11);
        assert!(view.items.is_empty());
        assert_eq!(view.pagination.total_pages, 2);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = state(2);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["result_count"], 2);
        assert_eq!(json["view"], "home");
        assert_eq!(json["items"][0]["designation"], "Associate Professor");
    }
}
