//! Maps a [`DocumentLayout`] onto `genpdf` elements.
//!
//! `genpdf` tables have no column spans, so total rows are drawn as a second
//! two-column table directly under the data table, with the first column
//! weighted to cover every data column but the last.  Right-aligned or
//! narrowed tables sit inside an undecorated outer table next to an empty cell.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::elements::{Break, FrameCellDecorator, LinearLayout, Paragraph, TableLayout};
use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Alignment, Document, Element, Margins, RenderResult};

use crate::elements::{self, HorizontalRule, PageMarker, PageTracker, ShadedText};
use crate::layout::{
    Block, Cell as LayoutCell, DataTable, DocumentLayout, Entry, HorizontalAlignment, SectionKind,
    Tone,
};

const TITLE_COLOR: Color = Color::Rgb(41, 128, 185);
const HEADING_COLOR: Color = Color::Rgb(52, 73, 94);
const LABEL_BACKGROUND: Color = Color::Rgb(236, 240, 241);
const TOTAL_BACKGROUND: Color = Color::Rgb(52, 152, 219);
const GRAND_TOTAL_BACKGROUND: Color = Color::Rgb(231, 76, 60);
const COMPLETED_COLOR: Color = Color::Rgb(39, 174, 96);
const PENDING_COLOR: Color = Color::Rgb(230, 126, 34);
const INVERSE_TEXT: Color = Color::Rgb(255, 255, 255);
const MUTED_TEXT: Color = Color::Greyscale(128);

const TITLE_FONT_SIZE: u8 = 24;
const HEADING_FONT_SIZE: u8 = 14;
const BODY_FONT_SIZE: u8 = 10;
const NOTES_FONT_SIZE: u8 = 9;
const GRAND_TOTAL_FONT_SIZE: u8 = 12;
const CELL_PADDING_MM: f64 = 1.5;
const GRAND_TOTAL_PADDING_MM: f64 = 2.5;
const LOGO_WIDTH_MM: f64 = 35.0;
const SIGNATURE_LINE: &str = "_________________________";

/// Page on which a section started, filled in while the document renders.
pub(crate) struct SectionPage {
    pub kind: SectionKind,
    pub page: Rc<Cell<Option<usize>>>,
}

/// Pushes every section of `layout` into `document`, each preceded by a page
/// marker fed by `tracker`.
pub(crate) fn push_layout(
    document: &mut Document,
    layout: &DocumentLayout,
    tracker: &PageTracker,
) -> Result<Vec<SectionPage>, Error> {
    let mut pages = Vec::with_capacity(layout.sections().len());

    for section in layout.sections() {
        let (marker, page) = PageMarker::new(tracker.clone());
        document.push(marker);
        pages.push(SectionPage {
            kind: section.kind(),
            page,
        });

        if let Some(heading) = section.heading() {
            document.push(Paragraph::new(StyledString::new(
                heading.to_owned(),
                Style::new()
                    .bold()
                    .with_font_size(HEADING_FONT_SIZE)
                    .with_color(HEADING_COLOR),
            )));
            document.push(Break::new(0.3));
        }

        for block in section.blocks() {
            document.push(BoxedElement(block_element(block)?));
        }
        document.push(Break::new(0.8));
    }

    Ok(pages)
}

/// Owns a type-erased element so it can be pushed where `genpdf` expects a
/// concrete `Element`.
struct BoxedElement(Box<dyn Element>);

impl Element for BoxedElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.0.render(context, area, style)
    }
}

fn block_element(block: &Block) -> Result<Box<dyn Element>, Error> {
    let element: Box<dyn Element> = match block {
        Block::Logo(bytes) => Box::new(
            LinearLayout::vertical()
                .element(elements::logo_from_bytes(
                    bytes,
                    elements::mm_from_f64(LOGO_WIDTH_MM),
                )?)
                .element(Break::new(0.5)),
        ),
        Block::Title(text) => Box::new(
            Paragraph::new(StyledString::new(
                text.clone(),
                Style::new()
                    .bold()
                    .with_font_size(TITLE_FONT_SIZE)
                    .with_color(TITLE_COLOR),
            ))
            .aligned(Alignment::Center),
        ),
        Block::CenteredLines(lines) => {
            let mut layout = LinearLayout::vertical();
            for line in lines {
                layout.push(
                    Paragraph::new(StyledString::new(line.clone(), body_style()))
                        .aligned(Alignment::Center),
                );
            }
            layout.push(Break::new(0.5));
            Box::new(layout)
        }
        Block::SplitRow { left, right } => {
            let mut table = TableLayout::new(vec![1, 1]);
            table
                .row()
                .element(Paragraph::new(StyledString::new(left.clone(), Style::new().bold())))
                .element(
                    Paragraph::new(StyledString::new(right.clone(), Style::new().bold()))
                        .aligned(Alignment::Right),
                )
                .push()?;
            Box::new(table)
        }
        Block::Divider => Box::new(HorizontalRule::new().with_color(HEADING_COLOR)),
        Block::KeyValueTable {
            entries,
            padding_column,
        } => {
            let table = key_value_table(entries, vec![1, 1], Alignment::Left)?;
            if *padding_column {
                Box::new(beside_empty_cell(table, vec![2, 1], false)?)
            } else {
                Box::new(table)
            }
        }
        Block::DataTable(table) => Box::new(data_table(table)?),
        Block::Summary {
            entries,
            grand_total,
        } => {
            let mut table = key_value_table(entries, vec![3, 2], Alignment::Right)?;
            let style = Style::new()
                .bold()
                .with_font_size(GRAND_TOTAL_FONT_SIZE)
                .with_color(INVERSE_TEXT);
            table
                .row()
                .element(
                    ShadedText::new(
                        StyledString::new(grand_total.label.clone(), style),
                        GRAND_TOTAL_BACKGROUND,
                    )
                    .with_padding(elements::mm_from_f64(GRAND_TOTAL_PADDING_MM)),
                )
                .element(
                    ShadedText::new(
                        StyledString::new(grand_total.value.clone(), style),
                        GRAND_TOTAL_BACKGROUND,
                    )
                    .with_alignment(Alignment::Right)
                    .with_padding(elements::mm_from_f64(GRAND_TOTAL_PADDING_MM)),
                )
                .push()?;
            Box::new(beside_empty_cell(table, vec![2, 3], true)?)
        }
        Block::Notes { heading, text } => Box::new(
            LinearLayout::vertical()
                .element(Paragraph::new(StyledString::new(
                    heading.clone(),
                    body_style().bold(),
                )))
                .element(Paragraph::new(StyledString::new(
                    text.clone(),
                    Style::new().with_font_size(NOTES_FONT_SIZE),
                )))
                .element(Break::new(1.0)),
        ),
        Block::Signatures { left, right } => {
            let mut table = TableLayout::new(vec![1, 1]);
            table
                .row()
                .element(signature_block(left))
                .element(signature_block(right))
                .push()?;
            Box::new(table)
        }
        Block::Closing(text) => Box::new(
            LinearLayout::vertical().element(Break::new(1.0)).element(
                Paragraph::new(StyledString::new(
                    text.clone(),
                    body_style().italic().with_color(MUTED_TEXT),
                ))
                .aligned(Alignment::Center),
            ),
        ),
    };
    Ok(element)
}

fn body_style() -> Style {
    Style::new().with_font_size(BODY_FONT_SIZE)
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

fn framed_table(weights: Vec<usize>) -> TableLayout {
    let mut table = TableLayout::new(weights);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    table
}

fn plain_cell(text: &str, align: Alignment) -> impl Element {
    Paragraph::new(StyledString::new(text.to_owned(), body_style()))
        .aligned(align)
        .padded(Margins::all(elements::mm_from_f64(CELL_PADDING_MM)))
}

fn label_cell(text: &str) -> ShadedText {
    ShadedText::new(
        StyledString::new(text.to_owned(), body_style().bold()),
        LABEL_BACKGROUND,
    )
}

fn inverse_cell(text: &str, background: Color, align: Alignment) -> ShadedText {
    ShadedText::new(
        StyledString::new(text.to_owned(), body_style().bold().with_color(INVERSE_TEXT)),
        background,
    )
    .with_alignment(align)
}

fn key_value_table(
    entries: &[Entry],
    weights: Vec<usize>,
    value_alignment: Alignment,
) -> Result<TableLayout, Error> {
    let mut table = framed_table(weights);
    for entry in entries {
        table
            .row()
            .element(label_cell(&entry.label))
            .element(plain_cell(&entry.value, value_alignment))
            .push()?;
    }
    Ok(table)
}

/// Places `table` in one column of an undecorated two-column table whose other
/// column stays empty.
fn beside_empty_cell(
    table: TableLayout,
    weights: Vec<usize>,
    table_on_right: bool,
) -> Result<TableLayout, Error> {
    let mut outer = TableLayout::new(weights);
    let row = outer.row();
    let row = if table_on_right {
        row.element(Paragraph::new("")).element(table)
    } else {
        row.element(table).element(Paragraph::new(""))
    };
    row.push()?;
    Ok(outer)
}

fn data_cell(cell: &LayoutCell) -> Box<dyn Element> {
    let align = alignment(cell.alignment());
    match cell.tone() {
        Tone::Plain => Box::new(plain_cell(cell.text(), align)),
        Tone::Completed => Box::new(inverse_cell(cell.text(), COMPLETED_COLOR, align)),
        Tone::Pending => Box::new(inverse_cell(cell.text(), PENDING_COLOR, align)),
    }
}

fn data_table(table: &DataTable) -> Result<LinearLayout, Error> {
    let weights: Vec<usize> = table.columns.iter().map(|column| column.weight).collect();
    let mut body = framed_table(weights.clone());

    let mut header = body.row();
    for column in &table.columns {
        header = header.element(inverse_cell(
            &column.title,
            HEADING_COLOR,
            alignment(column.alignment),
        ));
    }
    header.push()?;

    for row in &table.rows {
        let mut table_row = body.row();
        for cell in row {
            table_row = table_row.element(BoxedElement(data_cell(cell)));
        }
        table_row.push()?;
    }

    let mut layout = LinearLayout::vertical().element(body);

    if let Some(total) = &table.total {
        let (last, spanned) = weights
            .split_last()
            .map(|(last, rest)| (*last, rest.iter().sum::<usize>()))
            .unwrap_or((1, 1));
        let mut total_table = framed_table(vec![spanned.max(1), last]);
        total_table
            .row()
            .element(inverse_cell(&total.label, TOTAL_BACKGROUND, Alignment::Right))
            .element(inverse_cell(&total.amount, TOTAL_BACKGROUND, Alignment::Right))
            .push()?;
        layout.push(total_table);
    }

    Ok(layout)
}

fn signature_block(caption: &str) -> LinearLayout {
    LinearLayout::vertical()
        .element(Break::new(3.0))
        .element(Paragraph::new(SIGNATURE_LINE).aligned(Alignment::Center))
        .element(
            Paragraph::new(StyledString::new(caption.to_owned(), body_style()))
                .aligned(Alignment::Center),
        )
}
