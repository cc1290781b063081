// src/app/render.rs

//! Rendering collaborators.
//!
//! Renderers receive a [`DirectoryView`] (plain data) and decide how to show
//! it. The core never produces markup.

use std::io::Write;

use crate::app::state::DirectoryView;
use crate::error::Result;
use crate::models::FacultyRecord;
use crate::services::PageMarker;

/// Draws a directory view.
pub trait Renderer {
    fn render(&mut self, view: &DirectoryView<'_>) -> Result<()>;
}

/// Human-readable console output.
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn card(&mut self, record: &FacultyRecord) -> Result<()> {
        writeln!(
            self.out,
            "  [{}] {} - {}",
            record.id, record.name, record.designation
        )?;
        writeln!(
            self.out,
            "      School: {} | Department: {} | Cabin: {}",
            record.school, record.department, record.cabin_location
        )?;
        Ok(())
    }

    fn detail(&mut self, record: &FacultyRecord) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "┌ {}", record.name)?;
        writeln!(self.out, "│ {}", record.designation)?;
        writeln!(self.out, "│ School:         {}", record.school_name)?;
        writeln!(self.out, "│ Department:     {}", record.department)?;
        writeln!(self.out, "│ Email:          {}", record.email)?;
        writeln!(self.out, "│ Phone:          {}", record.phone)?;
        writeln!(self.out, "│ Cabin Location: {}", record.cabin_location)?;
        writeln!(
            self.out,
            "└ Specializations: {}",
            record.specialization.join(", ")
        )?;
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &DirectoryView<'_>) -> Result<()> {
        if let Some(reason) = view.load_error {
            writeln!(self.out, "Error loading faculty data")?;
            writeln!(self.out, "The directory is unavailable: {}", reason)?;
        } else if view.is_empty_result() {
            writeln!(self.out, "No faculty found")?;
            writeln!(self.out, "Try adjusting your search criteria or filters.")?;
            writeln!(self.out, "Total faculty in database: {}", view.total_records)?;
        } else {
            writeln!(
                self.out,
                "Faculty: {} of {} (page {} of {})",
                view.result_count,
                view.total_records,
                view.pagination.current,
                view.pagination.total_pages
            )?;
            for record in &view.items {
                self.card(record)?;
            }
        }

        if view.pagination.is_visible() {
            let mut line = Vec::new();
            if view.pagination.has_previous {
                line.push("‹ Previous".to_string());
            }
            for marker in &view.pagination.markers {
                line.push(match marker {
                    PageMarker::Page(n) if *n == view.pagination.current => format!("[{}]", n),
                    PageMarker::Page(n) => n.to_string(),
                    PageMarker::Ellipsis => "…".to_string(),
                });
            }
            if view.pagination.has_next {
                line.push("Next ›".to_string());
            }
            writeln!(self.out, "  {}", line.join(" "))?;
        }

        if let Some(record) = view.detail {
            self.detail(record)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Machine-readable output: one JSON document per render.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &DirectoryView<'_>) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view)?;
        writeln!(self.out)?;
        Ok(())
    }
}
