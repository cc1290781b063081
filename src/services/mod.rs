//! Directory services: enrichment, querying, pagination, lookup and export.

pub mod enrich;
pub mod export;
pub mod pagination;
pub mod query;
pub mod schools;
pub mod typeahead;

pub use enrich::{EnrichOutcome, Enricher, LookupTables};
pub use pagination::{Page, PageMarker, PageTarget, PaginationView, paginate, visible_pages};
pub use query::{FilterOptions, filter_options, query};
pub use schools::{HomeStats, summarize};
pub use typeahead::{TeacherCard, select, suggest};
