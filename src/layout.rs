//! Logical description of a work-order report.
//!
//! [`DocumentLayout::build`] turns the input records into the fixed sequence of
//! sections printed on every report.  The layout only carries text, alignment
//! and tone metadata; it never references `genpdf`, so the exact content of a
//! report (row order, status variants, formatted totals) can be inspected
//! without rendering or parsing a PDF.  [`crate::render`] maps it onto
//! `genpdf` elements.

use crate::error::ValidationError;
use crate::model::{Client, Vehicle, WorkOrder, WorkStatus, WorkshopInfo};
use crate::money::{self, OrderTotals};

const TITLE: &str = "ORDEN DE TRABAJO";
const DATE_FORMAT: &str = "%d/%m/%Y";
const COMPLETED_LABEL: &str = "Completado";
const PENDING_LABEL: &str = "Pendiente";
const CLOSING_TEXT: &str = "Gracias por su preferencia";

/// Horizontal alignment of a piece of text within its cell or line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Visual role of a cell; the renderer maps each tone to fonts and colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tone {
    /// Regular data cell.
    #[default]
    Plain,
    /// Status of a completed work item.
    Completed,
    /// Status of a pending work item.
    Pending,
}

impl From<WorkStatus> for Tone {
    fn from(status: WorkStatus) -> Self {
        match status {
            WorkStatus::Completed => Tone::Completed,
            WorkStatus::Pending => Tone::Pending,
        }
    }
}

/// A single table cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    text: String,
    alignment: HorizontalAlignment,
    tone: Tone,
}

impl Cell {
    /// Creates a plain, left-aligned cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// Column definition of a [`DataTable`].
///
/// Weights are relative; `genpdf` splits the available width proportionally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub weight: usize,
    pub alignment: HorizontalAlignment,
}

impl Column {
    fn new(title: &str, weight: usize, alignment: HorizontalAlignment) -> Self {
        Self {
            title: title.to_owned(),
            weight,
            alignment,
        }
    }
}

/// Emphasized closing row of a table: a label spanning every column but the
/// last, and the amount in the last column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TotalRow {
    pub label: String,
    pub amount: String,
}

/// A table with a header row, data rows in input order and an optional total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
    pub total: Option<TotalRow>,
}

/// A label/value pair in a key/value or summary table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub label: String,
    pub value: String,
}

impl Entry {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_owned(),
            value: value.into(),
        }
    }
}

/// Building blocks of a section, in the order they are drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Workshop logo image bytes, centered.
    Logo(Vec<u8>),
    /// Large centered document title.
    Title(String),
    /// Centered lines of small text.
    CenteredLines(Vec<String>),
    /// One line with bold text pushed to the left and right edges.
    SplitRow { left: String, right: String },
    /// Full-width horizontal rule.
    Divider,
    /// Key/value table; keys are shaded.  `padding_column` adds an empty third
    /// column so the table does not stretch across the page.
    KeyValueTable {
        entries: Vec<Entry>,
        padding_column: bool,
    },
    DataTable(DataTable),
    /// Right-aligned summary followed by an emphasized grand total.
    Summary {
        entries: Vec<Entry>,
        grand_total: Entry,
    },
    /// Notes heading and free text; the text may be blank.
    Notes { heading: String, text: String },
    /// Two blank signature lines side by side, captioned underneath.
    Signatures { left: String, right: String },
    /// Muted closing line.
    Closing(String),
}

/// The fixed sections of a report, in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Client,
    Vehicle,
    WorkItems,
    Parts,
    Labor,
    CostSummary,
    Footer,
}

impl SectionKind {
    /// Every section, in the order it appears in the document.
    pub const ALL: [SectionKind; 8] = [
        SectionKind::Header,
        SectionKind::Client,
        SectionKind::Vehicle,
        SectionKind::WorkItems,
        SectionKind::Parts,
        SectionKind::Labor,
        SectionKind::CostSummary,
        SectionKind::Footer,
    ];

    /// Stable identifier, used for outline entries.
    pub fn identifier(self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Client => "client",
            SectionKind::Vehicle => "vehicle",
            SectionKind::WorkItems => "work-items",
            SectionKind::Parts => "parts",
            SectionKind::Labor => "labor",
            SectionKind::CostSummary => "cost-summary",
            SectionKind::Footer => "footer",
        }
    }

    /// Human-readable title, used for outline entries.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Header => "Encabezado",
            SectionKind::Client => "Datos del cliente",
            SectionKind::Vehicle => "Datos del vehículo",
            SectionKind::WorkItems => "Trabajos realizados",
            SectionKind::Parts => "Refacciones utilizadas",
            SectionKind::Labor => "Mano de obra",
            SectionKind::CostSummary => "Resumen de costos",
            SectionKind::Footer => "Observaciones y firmas",
        }
    }

    /// Heading printed above the section body, if any.
    fn heading(self) -> Option<&'static str> {
        match self {
            SectionKind::Header | SectionKind::Footer => None,
            SectionKind::Client => Some("DATOS DEL CLIENTE"),
            SectionKind::Vehicle => Some("DATOS DEL VEHÍCULO"),
            SectionKind::WorkItems => Some("TRABAJOS REALIZADOS"),
            SectionKind::Parts => Some("REFACCIONES UTILIZADAS"),
            SectionKind::Labor => Some("MANO DE OBRA"),
            SectionKind::CostSummary => Some("RESUMEN DE COSTOS"),
        }
    }
}

/// One section of the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    kind: SectionKind,
    heading: Option<String>,
    blocks: Vec<Block>,
}

impl Section {
    fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            heading: kind.heading().map(str::to_owned),
            blocks: Vec::new(),
        }
    }

    fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    pub fn heading(&self) -> Option<&str> {
        self.heading.as_deref()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the first data table of the section, if any.
    pub fn data_table(&self) -> Option<&DataTable> {
        self.blocks.iter().find_map(|block| match block {
            Block::DataTable(table) => Some(table),
            _ => None,
        })
    }
}

/// Checks the caller contract of a work order.
///
/// Client and vehicle are printed unconditionally and must be present; money
/// and hour amounts must not be negative, and their totals must fit a `Decimal`.
pub fn validate(order: &WorkOrder) -> Result<(), ValidationError> {
    required_parties(order)?;

    for (index, part) in order.parts.iter().enumerate() {
        if part.unit_price.is_sign_negative() && !part.unit_price.is_zero() {
            return Err(ValidationError::NegativeUnitPrice {
                index,
                description: part.description.clone(),
            });
        }
    }

    for (index, entry) in order.labor.iter().enumerate() {
        if entry.hours.is_sign_negative() && !entry.hours.is_zero() {
            return Err(ValidationError::NegativeHours {
                index,
                description: entry.description.clone(),
            });
        }
        if entry.hourly_rate.is_sign_negative() && !entry.hourly_rate.is_zero() {
            return Err(ValidationError::NegativeHourlyRate {
                index,
                description: entry.description.clone(),
            });
        }
    }

    checked_totals(order)?;
    Ok(())
}

fn checked_totals(order: &WorkOrder) -> Result<OrderTotals, ValidationError> {
    OrderTotals::checked(order).ok_or_else(|| ValidationError::AmountOverflow {
        order: order.number.clone(),
    })
}

fn required_parties(order: &WorkOrder) -> Result<(&Client, &Vehicle), ValidationError> {
    let client = order
        .client
        .as_ref()
        .ok_or_else(|| ValidationError::MissingClient {
            order: order.number.clone(),
        })?;
    let vehicle = order
        .vehicle
        .as_ref()
        .ok_or_else(|| ValidationError::MissingVehicle {
            order: order.number.clone(),
        })?;
    Ok((client, vehicle))
}

/// The complete logical report: eight sections in fixed order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentLayout {
    title: String,
    sections: Vec<Section>,
    totals: OrderTotals,
}

impl DocumentLayout {
    /// Validates `order` and lays out every section of its report.
    pub fn build(order: &WorkOrder, workshop: &WorkshopInfo) -> Result<Self, ValidationError> {
        validate(order)?;
        let (client, vehicle) = required_parties(order)?;

        let totals = checked_totals(order)?;
        let sections = vec![
            header_section(order, workshop),
            client_section(client),
            vehicle_section(vehicle),
            work_items_section(order),
            parts_section(order, &totals),
            labor_section(order, &totals),
            cost_summary_section(&totals),
            footer_section(order),
        ];

        Ok(Self {
            title: format!("Orden de trabajo {}", order.number),
            sections,
            totals,
        })
    }

    /// Document title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Totals the layout was built with.
    pub fn totals(&self) -> &OrderTotals {
        &self.totals
    }

    /// Returns the section of the given kind.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

fn header_section(order: &WorkOrder, workshop: &WorkshopInfo) -> Section {
    let mut section = Section::new(SectionKind::Header);
    if let Some(logo) = &workshop.logo {
        section = section.with_block(Block::Logo(logo.clone()));
    }

    let mut lines = vec![
        workshop.name.clone(),
        workshop.address.clone(),
        format!("Tel: {}", workshop.phone),
    ];
    if !workshop.email.is_empty() {
        lines.push(workshop.email.clone());
    }

    section
        .with_block(Block::Title(TITLE.to_owned()))
        .with_block(Block::CenteredLines(lines))
        .with_block(Block::SplitRow {
            left: format!("No. Orden: {}", order.number),
            right: format!("Fecha: {}", order.date.format(DATE_FORMAT)),
        })
        .with_block(Block::Divider)
}

fn client_section(client: &Client) -> Section {
    Section::new(SectionKind::Client).with_block(Block::KeyValueTable {
        entries: vec![
            Entry::new("Nombre:", client.name.as_str()),
            Entry::new("Teléfono:", client.phone.as_str()),
            Entry::new("Email:", client.email.as_str()),
            Entry::new("Dirección:", client.address.as_str()),
        ],
        padding_column: false,
    })
}

fn vehicle_section(vehicle: &Vehicle) -> Section {
    Section::new(SectionKind::Vehicle).with_block(Block::KeyValueTable {
        entries: vec![
            Entry::new("Marca:", vehicle.make.as_str()),
            Entry::new("Modelo:", vehicle.model.as_str()),
            Entry::new("Año:", vehicle.year.as_str()),
            Entry::new("Color:", vehicle.color.as_str()),
            Entry::new("Placas:", vehicle.plate.as_str()),
            Entry::new("Kilometraje:", vehicle.odometer.as_str()),
        ],
        padding_column: true,
    })
}

fn work_items_section(order: &WorkOrder) -> Section {
    let rows = order
        .work_items
        .iter()
        .map(|item| {
            let status = item.status();
            let label = match status {
                WorkStatus::Completed => COMPLETED_LABEL,
                WorkStatus::Pending => PENDING_LABEL,
            };
            vec![
                Cell::new(item.description.as_str()),
                Cell::new(label)
                    .with_alignment(HorizontalAlignment::Center)
                    .with_tone(status.into()),
            ]
        })
        .collect();

    Section::new(SectionKind::WorkItems).with_block(Block::DataTable(DataTable {
        columns: vec![
            Column::new("Descripción del Trabajo", 3, HorizontalAlignment::Left),
            Column::new("Estado", 1, HorizontalAlignment::Center),
        ],
        rows,
        total: None,
    }))
}

fn amount_columns(quantity_title: &str, price_title: &str) -> Vec<Column> {
    vec![
        Column::new("Descripción", 6, HorizontalAlignment::Left),
        Column::new(quantity_title, 2, HorizontalAlignment::Center),
        Column::new(price_title, 2, HorizontalAlignment::Right),
        Column::new("Subtotal", 3, HorizontalAlignment::Right),
    ]
}

fn amount_row(description: &str, quantity: String, price: String, subtotal: String) -> Vec<Cell> {
    vec![
        Cell::new(description),
        Cell::new(quantity).with_alignment(HorizontalAlignment::Center),
        Cell::new(price).with_alignment(HorizontalAlignment::Right),
        Cell::new(subtotal).with_alignment(HorizontalAlignment::Right),
    ]
}

fn parts_section(order: &WorkOrder, totals: &OrderTotals) -> Section {
    let rows = order
        .parts
        .iter()
        .map(|part| {
            amount_row(
                &part.description,
                part.quantity.to_string(),
                money::format_currency(part.unit_price),
                money::format_currency(part.subtotal()),
            )
        })
        .collect();

    Section::new(SectionKind::Parts).with_block(Block::DataTable(DataTable {
        columns: amount_columns("Cant.", "Precio Unit."),
        rows,
        total: Some(TotalRow {
            label: "TOTAL REFACCIONES:".to_owned(),
            amount: money::format_currency(totals.parts_total),
        }),
    }))
}

fn labor_section(order: &WorkOrder, totals: &OrderTotals) -> Section {
    let rows = order
        .labor
        .iter()
        .map(|entry| {
            amount_row(
                &entry.description,
                money::format_hours(entry.hours),
                money::format_currency(entry.hourly_rate),
                money::format_currency(entry.subtotal()),
            )
        })
        .collect();

    Section::new(SectionKind::Labor).with_block(Block::DataTable(DataTable {
        columns: amount_columns("Horas", "Precio/Hora"),
        rows,
        total: Some(TotalRow {
            label: "TOTAL MANO DE OBRA:".to_owned(),
            amount: money::format_currency(totals.labor_total),
        }),
    }))
}

fn cost_summary_section(totals: &OrderTotals) -> Section {
    let tax_label = format!("IVA ({}%):", money::TAX_RATE_PERCENT);
    Section::new(SectionKind::CostSummary).with_block(Block::Summary {
        entries: vec![
            Entry::new("Subtotal Refacciones:", money::format_currency(totals.parts_total)),
            Entry::new("Subtotal Mano de Obra:", money::format_currency(totals.labor_total)),
            Entry::new("Subtotal:", money::format_currency(totals.subtotal)),
            Entry::new(&tax_label, money::format_currency(totals.tax)),
        ],
        grand_total: Entry::new("TOTAL A PAGAR:", money::format_currency(totals.total)),
    })
}

fn footer_section(order: &WorkOrder) -> Section {
    Section::new(SectionKind::Footer)
        .with_block(Block::Notes {
            heading: "OBSERVACIONES:".to_owned(),
            text: order.notes.clone(),
        })
        .with_block(Block::Signatures {
            left: "Firma del Cliente".to_owned(),
            right: "Firma del Mecánico".to_owned(),
        })
        .with_block(Block::Closing(CLOSING_TEXT.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LaborEntry, Part, WorkItem};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn workshop() -> WorkshopInfo {
        WorkshopInfo::new("Taller Mecánico AutoService")
            .with_address("Calle Principal #123, Ciudad")
            .with_phone("(555) 123-4567")
    }

    fn bare_order() -> WorkOrder {
        WorkOrder::new("OT-2024-0001", NaiveDate::from_ymd_opt(2024, 3, 5).unwrap())
            .with_client(Client::new("Juan Pérez García"))
            .with_vehicle(Vehicle::new("Toyota", "Corolla"))
    }

    fn texts(row: &[Cell]) -> Vec<&str> {
        row.iter().map(Cell::text).collect()
    }

    #[test]
    fn sections_follow_fixed_order() {
        let layout = DocumentLayout::build(&bare_order(), &workshop()).unwrap();
        let kinds: Vec<_> = layout.sections().iter().map(Section::kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn empty_tables_keep_headers_and_zero_totals() {
        let layout = DocumentLayout::build(&bare_order(), &workshop()).unwrap();

        for kind in [SectionKind::Parts, SectionKind::Labor] {
            let table = layout.section(kind).and_then(Section::data_table).unwrap();
            assert_eq!(table.columns.len(), 4);
            assert!(table.rows.is_empty());
            assert_eq!(table.total.as_ref().unwrap().amount, "$0.00");
        }

        let work = layout
            .section(SectionKind::WorkItems)
            .and_then(Section::data_table)
            .unwrap();
        assert_eq!(work.columns.len(), 2);
        assert!(work.rows.is_empty());
        assert!(work.total.is_none());
    }

    #[test]
    fn rows_keep_input_order() {
        let order = bare_order()
            .with_part(Part::new("Zapata", 2, dec("10")))
            .with_part(Part::new("Aceite", 1, dec("450")))
            .with_part(Part::new("Bujía", 4, dec("85.5")));
        let layout = DocumentLayout::build(&order, &workshop()).unwrap();
        let table = layout
            .section(SectionKind::Parts)
            .and_then(Section::data_table)
            .unwrap();

        let descriptions: Vec<_> = table.rows.iter().map(|row| row[0].text()).collect();
        assert_eq!(descriptions, ["Zapata", "Aceite", "Bujía"]);
        assert_eq!(texts(&table.rows[2]), ["Bujía", "4", "$85.50", "$342.00"]);
        assert_eq!(table.total.as_ref().unwrap().amount, "$812.00");
    }

    #[test]
    fn labor_rows_format_hours_and_rates() {
        let order = bare_order().with_labor(LaborEntry::new("Alineación", dec("1.5"), dec("200")));
        let layout = DocumentLayout::build(&order, &workshop()).unwrap();
        let table = layout
            .section(SectionKind::Labor)
            .and_then(Section::data_table)
            .unwrap();

        assert_eq!(texts(&table.rows[0]), ["Alineación", "1.5", "$200.00", "$300.00"]);
        assert_eq!(table.total.as_ref().unwrap().label, "TOTAL MANO DE OBRA:");
    }

    #[test]
    fn work_item_status_has_two_variants() {
        let order = bare_order()
            .with_work_item(WorkItem::new("Cambio de aceite", true))
            .with_work_item(WorkItem::new("Revisión de frenos", false));
        let layout = DocumentLayout::build(&order, &workshop()).unwrap();
        let table = layout
            .section(SectionKind::WorkItems)
            .and_then(Section::data_table)
            .unwrap();

        assert_eq!(table.rows[0][1].tone(), Tone::Completed);
        assert_eq!(table.rows[0][1].text(), COMPLETED_LABEL);
        assert_eq!(table.rows[1][1].tone(), Tone::Pending);
        assert_eq!(table.rows[1][1].text(), PENDING_LABEL);
    }

    #[test]
    fn summary_shows_all_totals() {
        let order = bare_order()
            .with_part(Part::new("Aceite", 1, dec("450.00")))
            .with_labor(LaborEntry::new("Cambio", dec("0.5"), dec("200.00")));
        let layout = DocumentLayout::build(&order, &workshop()).unwrap();
        let summary = layout.section(SectionKind::CostSummary).unwrap();

        let Some(Block::Summary {
            entries,
            grand_total,
        }) = summary.blocks().first()
        else {
            panic!("cost summary block missing");
        };
        let values: Vec<_> = entries.iter().map(|entry| entry.value.as_str()).collect();
        assert_eq!(values, ["$450.00", "$100.00", "$550.00", "$88.00"]);
        assert_eq!(entries[3].label, "IVA (16%):");
        assert_eq!(grand_total.value, "$638.00");
    }

    #[test]
    fn header_carries_order_number_and_date() {
        let layout = DocumentLayout::build(&bare_order(), &workshop()).unwrap();
        let header = layout.section(SectionKind::Header).unwrap();
        assert!(header.blocks().contains(&Block::SplitRow {
            left: "No. Orden: OT-2024-0001".to_owned(),
            right: "Fecha: 05/03/2024".to_owned(),
        }));
        assert!(header.blocks().contains(&Block::Divider));
    }

    #[test]
    fn vehicle_table_uses_padding_column() {
        let layout = DocumentLayout::build(&bare_order(), &workshop()).unwrap();
        let vehicle = layout.section(SectionKind::Vehicle).unwrap();
        match vehicle.blocks() {
            [Block::KeyValueTable {
                entries,
                padding_column,
            }] => {
                assert_eq!(entries.len(), 6);
                assert!(*padding_column);
            }
            other => panic!("unexpected vehicle blocks: {other:?}"),
        }
    }

    #[test]
    fn blank_notes_are_allowed() {
        let layout = DocumentLayout::build(&bare_order(), &workshop()).unwrap();
        let footer = layout.section(SectionKind::Footer).unwrap();
        assert!(footer.blocks().contains(&Block::Notes {
            heading: "OBSERVACIONES:".to_owned(),
            text: String::new(),
        }));
    }

    #[test]
    fn missing_client_or_vehicle_is_rejected() {
        let mut order = bare_order();
        order.client = None;
        assert!(matches!(
            DocumentLayout::build(&order, &workshop()),
            Err(ValidationError::MissingClient { .. })
        ));

        let mut order = bare_order();
        order.vehicle = None;
        assert!(matches!(
            DocumentLayout::build(&order, &workshop()),
            Err(ValidationError::MissingVehicle { .. })
        ));
    }

    #[test]
    fn overflowing_amounts_are_rejected() {
        let order = bare_order().with_part(Part::new("x", u32::MAX, Decimal::MAX / dec("1000")));
        assert_eq!(
            validate(&order),
            Err(ValidationError::AmountOverflow {
                order: "OT-2024-0001".to_owned(),
            })
        );
        assert!(matches!(
            DocumentLayout::build(&order, &workshop()),
            Err(ValidationError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn amount_columns_carry_their_alignment() {
        let layout = DocumentLayout::build(&bare_order(), &workshop()).unwrap();
        let table = layout
            .section(SectionKind::Parts)
            .and_then(Section::data_table)
            .unwrap();
        let alignments: Vec<_> = table.columns.iter().map(|column| column.alignment).collect();
        assert_eq!(
            alignments,
            [
                HorizontalAlignment::Left,
                HorizontalAlignment::Center,
                HorizontalAlignment::Right,
                HorizontalAlignment::Right,
            ]
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let order = bare_order().with_part(Part::new("Crédito", 1, dec("-5")));
        assert!(matches!(
            validate(&order),
            Err(ValidationError::NegativeUnitPrice { index: 0, .. })
        ));

        let order = bare_order().with_labor(LaborEntry::new("Ajuste", dec("1"), dec("-1")));
        assert!(matches!(
            validate(&order),
            Err(ValidationError::NegativeHourlyRate { index: 0, .. })
        ));
    }
}
