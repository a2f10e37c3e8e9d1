//! The report composer: validates a work order, lays it out, renders it into
//! memory and writes the finished PDF atomically.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use genpdf::elements::Paragraph;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{Alignment, Element, Margins, PaperSize, Size};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::builder::DocumentBuilder;
use crate::elements::PageTracker;
use crate::error::ComposeError;
use crate::layout::{DocumentLayout, SectionKind};
use crate::model::{WorkOrder, WorkshopInfo};
use crate::money::OrderTotals;
use crate::render;

const DEFAULT_MARGIN_MM: f64 = 15.0;
const DEFAULT_FONT_SIZE: u8 = 10;
const FOOTER_HEIGHT_MM: f64 = 8.0;
const FOOTER_FONT_SIZE: u8 = 8;
const FILE_PREFIX: &str = "work_order";
const UNNUMBERED: &str = "unnumbered";
const MAX_NAME_ATTEMPTS: usize = 1000;

/// A PDF rendered into memory.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Page each section started on, in document order.
    pub section_pages: Vec<(SectionKind, Option<usize>)>,
    pub totals: OrderTotals,
}

impl RenderedPdf {
    /// First page of `kind`, if it was laid out.
    pub fn section_page(&self, kind: SectionKind) -> Option<usize> {
        self.section_pages
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .and_then(|(_, page)| *page)
    }
}

/// A PDF written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes_written: u64,
    pub page_count: usize,
}

/// Lays out work orders as A4 PDF reports.
#[derive(Clone, Debug)]
pub struct ReportComposer {
    output_dir: PathBuf,
    paper_size: Size,
    margins: Margins,
    font_size: u8,
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            paper_size: PaperSize::A4.into(),
            margins: Margins::all(crate::elements::mm_from_f64(DEFAULT_MARGIN_MM)),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ReportComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory that [`compose`](Self::compose) writes into.
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders the report for `order` into memory.
    ///
    /// Validation runs before any font is loaded, so an invalid order fails
    /// fast with [`ComposeError::Validation`].
    pub fn render_bytes(
        &self,
        order: &WorkOrder,
        workshop: &WorkshopInfo,
    ) -> Result<RenderedPdf, ComposeError> {
        let layout = DocumentLayout::build(order, workshop)?;
        debug!(
            "Laid out work order {} in {} sections",
            order.number,
            layout.sections().len()
        );

        let tracker = PageTracker::new();
        let number = order.number.clone();
        let mut document = DocumentBuilder::new()
            .with_title(layout.title())
            .with_paper_size(self.paper_size)
            .with_margins(self.margins)
            .with_font_size(self.font_size)
            .with_page_tracker(tracker.clone())
            .with_footer(FOOTER_HEIGHT_MM, move |page| page_footer(&number, page))
            .build()
            .map_err(ComposeError::FontLoad)?;

        let markers =
            render::push_layout(&mut document, &layout, &tracker).map_err(ComposeError::Render)?;

        let mut bytes = Vec::new();
        document
            .render(&mut bytes)
            .map_err(ComposeError::Render)?;

        let section_pages: Vec<(SectionKind, Option<usize>)> = markers
            .iter()
            .map(|marker| (marker.kind, marker.page.get()))
            .collect();
        let page_count = tracker.current();

        #[cfg(feature = "bookmarks")]
        let bytes = crate::bookmarks::apply_section_bookmarks(&bytes, &section_pages)?;

        debug!(
            "Rendered work order {}: {} bytes over {} page(s)",
            order.number,
            bytes.len(),
            page_count
        );

        Ok(RenderedPdf {
            bytes,
            page_count,
            section_pages,
            totals: *layout.totals(),
        })
    }

    /// Renders `order` and writes it into the output directory under a
    /// timestamped name.
    ///
    /// Existing files are never replaced: when the name is taken, a `_2`,
    /// `_3`, ... suffix is appended before the extension.
    pub fn compose(
        &self,
        order: &WorkOrder,
        workshop: &WorkshopInfo,
    ) -> Result<Artifact, ComposeError> {
        let file_name = artifact_file_name(&order.number, Local::now());
        info!(
            "Composing work order {} into {}",
            order.number,
            self.output_dir.display()
        );

        let rendered = self.render_bytes(order, workshop)?;
        let path = persist_unique(&self.output_dir, &file_name, &rendered.bytes)?;
        Ok(artifact(order, path, &rendered))
    }

    /// Renders `order` and writes it to `path`.
    ///
    /// The file only appears once the PDF is complete; on any error nothing is
    /// left at `path`.
    pub fn compose_to_path(
        &self,
        order: &WorkOrder,
        workshop: &WorkshopInfo,
        path: impl AsRef<Path>,
    ) -> Result<Artifact, ComposeError> {
        let path = path.as_ref();
        info!("Composing work order {} into {}", order.number, path.display());

        let rendered = self.render_bytes(order, workshop)?;
        write_atomically(path, &rendered.bytes)?;
        Ok(artifact(order, path.to_path_buf(), &rendered))
    }

    /// Runs [`compose`](Self::compose) on the blocking thread pool.
    pub async fn compose_async(
        &self,
        order: WorkOrder,
        workshop: WorkshopInfo,
    ) -> Result<Artifact, ComposeError> {
        let composer = self.clone();
        tokio::task::spawn_blocking(move || composer.compose(&order, &workshop)).await?
    }
}

/// File name for a report composed at `timestamp`.
pub fn artifact_file_name(order_number: &str, timestamp: DateTime<Local>) -> String {
    let sanitized = sanitize_filename::sanitize(order_number.trim());
    let number = if sanitized.is_empty() {
        UNNUMBERED
    } else {
        sanitized.as_str()
    };
    format!(
        "{}_{}_{}.pdf",
        FILE_PREFIX,
        number,
        timestamp.format("%Y%m%d%H%M%S")
    )
}

fn page_footer(order_number: &str, page: usize) -> impl Element {
    Paragraph::new(StyledString::new(
        format!("Orden {} · Página {}", order_number, page),
        Style::new()
            .with_font_size(FOOTER_FONT_SIZE)
            .with_color(Color::Greyscale(128)),
    ))
    .aligned(Alignment::Right)
}

fn artifact(order: &WorkOrder, path: PathBuf, rendered: &RenderedPdf) -> Artifact {
    info!(
        "Wrote work order {} ({} bytes, {} page(s)) to {}",
        order.number,
        rendered.bytes.len(),
        rendered.page_count,
        path.display()
    );
    Artifact {
        path,
        bytes_written: rendered.bytes.len() as u64,
        page_count: rendered.page_count,
    }
}

/// Writes `bytes` to a synced temporary file in `directory`. Errors are
/// reported against `target`.
fn staged_file(directory: &Path, target: &Path, bytes: &[u8]) -> Result<NamedTempFile, ComposeError> {
    let mut file = NamedTempFile::new_in(directory).map_err(|err| ComposeError::io(target, err))?;
    file.write_all(bytes)
        .map_err(|err| ComposeError::io(target, err))?;
    file.as_file()
        .sync_all()
        .map_err(|err| ComposeError::io(target, err))?;
    Ok(file)
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ComposeError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let file = staged_file(directory, path, bytes)?;
    file.persist(path)
        .map_err(|err| ComposeError::io(path, err.error))?;

    debug!("Persisted {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Candidate name for the `attempt`-th try, counting from 1.
fn numbered_file_name(file_name: &str, attempt: usize) -> String {
    if attempt <= 1 {
        return file_name.to_owned();
    }
    match file_name.rsplit_once('.') {
        Some((stem, extension)) => format!("{}_{}.{}", stem, attempt, extension),
        None => format!("{}_{}", file_name, attempt),
    }
}

/// Moves `bytes` into `directory` under `file_name`, or the first free
/// numbered variant of it, without replacing any existing file.
fn persist_unique(directory: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ComposeError> {
    let first = directory.join(file_name);
    let mut file = staged_file(directory, &first, bytes)?;

    for attempt in 1..=MAX_NAME_ATTEMPTS {
        let candidate = directory.join(numbered_file_name(file_name, attempt));
        match file.persist_noclobber(&candidate) {
            Ok(_) => {
                debug!("Persisted {} bytes to {}", bytes.len(), candidate.display());
                return Ok(candidate);
            }
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => file = err.file,
            Err(err) => return Err(ComposeError::io(candidate, err.error)),
        }
    }

    Err(ComposeError::io(
        first,
        io::Error::new(io::ErrorKind::AlreadyExists, "no free artifact name left"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn file_name_carries_number_and_timestamp() {
        assert_eq!(
            artifact_file_name("OT-2024-0001", timestamp()),
            "work_order_OT-2024-0001_20240305140709.pdf"
        );
    }

    #[test]
    fn file_name_strips_path_separators() {
        let name = artifact_file_name("../OT/7", timestamp());
        assert!(!name.contains('/'));
        assert!(name.starts_with("work_order_"));
        assert!(name.ends_with("_20240305140709.pdf"));
    }

    #[test]
    fn blank_numbers_get_a_placeholder() {
        assert_eq!(
            artifact_file_name("   ", timestamp()),
            "work_order_unnumbered_20240305140709.pdf"
        );
    }

    #[test]
    fn write_failure_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("report.pdf");
        let err = write_atomically(&missing, b"%PDF-1.3").unwrap_err();
        assert!(err.io_error().is_some());
        assert!(!missing.exists());
    }

    #[test]
    fn numbered_names_keep_the_extension() {
        let name = "work_order_OT-1_20240305140709.pdf";
        assert_eq!(numbered_file_name(name, 1), name);
        assert_eq!(
            numbered_file_name(name, 3),
            "work_order_OT-1_20240305140709_3.pdf"
        );
    }

    #[test]
    fn unique_persist_never_clobbers() {
        let dir = tempfile::tempdir().unwrap();
        let name = "work_order_OT-1_20240305140709.pdf";

        let first = persist_unique(dir.path(), name, b"first").unwrap();
        let second = persist_unique(dir.path(), name, b"second").unwrap();
        let third = persist_unique(dir.path(), name, b"third").unwrap();

        assert_eq!(first, dir.path().join(name));
        assert_eq!(second, dir.path().join("work_order_OT-1_20240305140709_2.pdf"));
        assert_eq!(third, dir.path().join("work_order_OT-1_20240305140709_3.pdf"));
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn write_replaces_destination_in_one_step() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"old").unwrap();
        write_atomically(&path, b"%PDF-1.3 new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3 new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
