//! Outline (bookmark) injection for rendered reports, built on `lopdf`.
//!
//! `genpdf` cannot emit outlines, so the finished PDF is parsed again and an
//! `/Outlines` tree with one flat entry per report section is added to the
//! catalog.  Each entry targets the page recorded by that section's marker.

use std::collections::BTreeMap;
use std::io;

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::layout::SectionKind;

/// Failure to embed outlines into a rendered PDF.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("failed to parse rendered PDF: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("failed to serialize PDF with outlines: {0}")]
    Write(#[from] io::Error),
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    #[error("section '{section}' starts on page {page}, which the document does not have")]
    MissingPage { section: &'static str, page: usize },
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: &'static str,
    identifier: &'static str,
}

/// Adds an outline entry per section with a known start page.
///
/// Sections whose page was never recorded are skipped; when none remain the
/// input is returned unchanged.
pub fn apply_section_bookmarks(
    pdf_bytes: &[u8],
    section_pages: &[(SectionKind, Option<usize>)],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();

    let entries = collect_entries(&mut document, section_pages, &pages)?;
    if entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outlines_id = document.new_object_id();
    insert_entries(&mut document, outlines_id, &entries);
    attach_outlines(&mut document, outlines_id, &entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer).map_err(BookmarkError::from)?;
    Ok(buffer)
}

fn collect_entries(
    document: &mut Document,
    section_pages: &[(SectionKind, Option<usize>)],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    let mut entries = Vec::new();

    for (kind, page) in section_pages {
        let Some(page) = *page else {
            continue;
        };
        let page_ref = u32::try_from(page)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or(BookmarkError::MissingPage {
                section: kind.identifier(),
                page,
            })?;

        entries.push(OutlineEntry {
            object_id: document.new_object_id(),
            page_ref,
            title: kind.title(),
            identifier: kind.identifier(),
        });
    }

    Ok(entries)
}

fn insert_entries(document: &mut Document, outlines_id: ObjectId, entries: &[OutlineEntry]) {
    for (index, entry) in entries.iter().enumerate() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", Object::string_literal(entry.title));
        dictionary.set("NM", Object::string_literal(entry.identifier));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entry.page_ref),
                Object::Name(b"Fit".to_vec()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if let Some(previous) = index.checked_sub(1).and_then(|i| entries.get(i)) {
            dictionary.set("Prev", Object::Reference(previous.object_id));
        }
        if let Some(next) = entries.get(index + 1) {
            dictionary.set("Next", Object::Reference(next.object_id));
        }

        document
            .objects
            .insert(entry.object_id, Object::Dictionary(dictionary));
    }
}

fn attach_outlines(
    document: &mut Document,
    outlines_id: ObjectId,
    entries: &[OutlineEntry],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut outlines = Dictionary::new();
    outlines.set("Type", Object::Name(b"Outlines".to_vec()));
    outlines.set("Count", Object::Integer(entries.len() as i64));
    if let (Some(first), Some(last)) = (entries.first(), entries.last()) {
        outlines.set("First", Object::Reference(first.object_id));
        outlines.set("Last", Object::Reference(last.object_id));
    }
    document
        .objects
        .insert(outlines_id, Object::Dictionary(outlines));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

    Ok(())
}
