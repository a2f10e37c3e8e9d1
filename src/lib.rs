//! Work-order PDF reports.
//!
//! [`ReportComposer`] turns a [`WorkOrder`] and the [`WorkshopInfo`] of the
//! shop issuing it into a fixed eight-section A4 report: header, client,
//! vehicle, work items, parts, labor, cost summary and a signature footer.
//! Totals are computed with exact decimal arithmetic, see [`money`].

pub mod builder;
pub mod composer;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod money;
mod render;
pub mod sample;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use composer::{Artifact, RenderedPdf, ReportComposer};
pub use error::{ComposeError, ValidationError};
pub use layout::{DocumentLayout, SectionKind};
pub use model::{
    Client, LaborEntry, Part, Vehicle, WorkItem, WorkOrder, WorkStatus, WorkshopInfo,
};
pub use money::{OrderTotals, TAX_RATE_PERCENT};
