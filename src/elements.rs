//! Custom element implementations built on top of `genpdf` primitives.
//!
//! `genpdf` has no filled shapes, horizontal rules or column spans, and no way
//! to ask which page an element landed on.  The elements in this module cover
//! those gaps for the work-order report.

use std::cell::Cell;
use std::rc::Rc;

use image::GenericImageView;

use genpdf::elements::Image;
use genpdf::error::{Context as _, Error};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const DEFAULT_CELL_PADDING_MM: f64 = 1.5;
const DEFAULT_RULE_SPACING_MM: f64 = 2.0;
// Distance between the strokes that make up a filled band.
const FILL_STROKE_SPACING_MM: f64 = 0.1;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode logo image from provided bytes")
}

/// Builds a centered logo image scaled to `width` while keeping its aspect ratio.
pub fn logo_from_bytes(bytes: impl AsRef<[u8]>, width: Mm) -> Result<Image, Error> {
    let dynamic = decode_image_from_bytes(bytes)?;
    let natural = mm_to_f64(estimated_image_size(&dynamic, DEFAULT_IMAGE_DPI).width);

    let mut image = Image::from_dynamic_image(dynamic)?;
    image.set_alignment(Alignment::Center);
    if natural > f64::EPSILON {
        let scale = mm_to_f64(width) / natural;
        image.set_scale(Scale::new(scale, scale));
    }
    Ok(image)
}

/// Paints a solid band of `color` covering `size` from the area origin.
fn fill_band(area: &mut render::Area<'_>, size: Size, color: Color) {
    let style = Style::new().with_color(color);
    let step = mm_from_f64(FILL_STROKE_SPACING_MM);
    let mut y = Mm::default();
    while y <= size.height {
        area.draw_line(vec![Position::new(0, y), Position::new(size.width, y)], style);
        y += step;
    }
}

/// A single line of text drawn on a solid background spanning the full width
/// of its area.
///
/// Used for key cells, table headers and total rows.  The text does not wrap,
/// so it is meant for labels and amounts rather than free text.
pub struct ShadedText {
    text: StyledString,
    background: Color,
    alignment: Alignment,
    padding: Mm,
}

impl ShadedText {
    /// Creates left-aligned shaded text.
    pub fn new(text: impl Into<StyledString>, background: Color) -> Self {
        Self {
            text: text.into(),
            background,
            alignment: Alignment::Left,
            padding: mm_from_f64(DEFAULT_CELL_PADDING_MM),
        }
    }

    /// Sets the alignment and returns the updated element.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the padding around the text and returns the updated element.
    pub fn with_padding(mut self, padding: Mm) -> Self {
        self.padding = padding;
        self
    }
}

impl Element for ShadedText {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();

        let mut string = self.text.clone();
        string.style = style.and(string.style);
        let line_height = string.style.line_height(&context.font_cache);
        let height = line_height + self.padding + self.padding;

        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let available_width = area.size().width;
        fill_band(&mut area, Size::new(available_width, height), self.background);

        let inner_width = available_width - self.padding - self.padding;
        let text_width = string.width(&context.font_cache);
        let slack = Mm::default().max(inner_width - text_width);
        let x_offset = self.padding
            + match self.alignment {
                Alignment::Left => Mm::default(),
                Alignment::Center => slack / 2.0,
                Alignment::Right => slack,
            };

        match area.text_section(
            &context.font_cache,
            Position::new(x_offset, self.padding),
            string.style,
        ) {
            Some(mut section) => section.print_str(&string.s, string.style)?,
            None => {
                result.has_more = true;
                return Ok(result);
            }
        }

        result.size = Size::new(available_width, height);
        Ok(result)
    }
}

/// A full-width horizontal line with vertical breathing room above and below.
pub struct HorizontalRule {
    spacing: Mm,
    color: Option<Color>,
}

impl HorizontalRule {
    pub fn new() -> Self {
        Self {
            spacing: mm_from_f64(DEFAULT_RULE_SPACING_MM),
            color: None,
        }
    }

    /// Sets the line color and returns the updated rule.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for HorizontalRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for HorizontalRule {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let height = self.spacing + self.spacing;
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let mut line_style = Style::new();
        if let Some(color) = self.color.or(style.color()) {
            line_style = line_style.with_color(color);
        }

        let width = area.size().width;
        area.draw_line(
            vec![
                Position::new(0, self.spacing),
                Position::new(width, self.spacing),
            ],
            line_style,
        );

        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// Shared 1-based page counter advanced by the page decorator.
#[derive(Clone, Debug, Default)]
pub struct PageTracker {
    current: Rc<Cell<usize>>,
}

impl PageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page currently being laid out; `0` before the first page starts.
    pub fn current(&self) -> usize {
        self.current.get()
    }

    /// Starts the next page and returns its number.
    pub(crate) fn advance(&self) -> usize {
        let page = self.current.get() + 1;
        self.current.set(page);
        page
    }
}

/// Zero-size element that records the page it is laid out on.
///
/// Placed at the start of each report section so the composer can report, and
/// bookmark, where every section begins.
pub struct PageMarker {
    tracker: PageTracker,
    page: Rc<Cell<Option<usize>>>,
}

impl PageMarker {
    /// Creates a marker and the slot it will write its page number into.
    pub fn new(tracker: PageTracker) -> (Self, Rc<Cell<Option<usize>>>) {
        let page = Rc::new(Cell::new(None));
        let marker = Self {
            tracker,
            page: Rc::clone(&page),
        };
        (marker, page)
    }
}

impl Element for PageMarker {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        _area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        if self.page.get().is_none() {
            self.page.set(Some(self.tracker.current()));
        }
        Ok(RenderResult::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_tracker_counts_from_one() {
        let tracker = PageTracker::new();
        assert_eq!(tracker.current(), 0);
        assert_eq!(tracker.advance(), 1);
        assert_eq!(tracker.clone().advance(), 2);
        assert_eq!(tracker.current(), 2);
    }

    #[test]
    fn mm_conversion_round_trips() {
        assert!((mm_to_f64(mm_from_f64(12.5)) - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_logo_bytes_are_reported() {
        match logo_from_bytes(b"not an image", mm_from_f64(30.0)) {
            Ok(_) => panic!("invalid bytes must not decode"),
            Err(err) => assert!(err.to_string().contains("logo")),
        }
    }
}
