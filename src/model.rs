//! Input records consumed by the report composer.
//!
//! The types in this module mirror the work-order aggregate returned by the
//! workshop API.  They are plain, serde-friendly values so they can be
//! deserialized straight from JSON, constructed by hand in tests, or produced
//! by any other frontend without pulling in the rendering stack.
//!
//! Monetary amounts and hours are [`Decimal`] values.  Derived amounts (line
//! subtotals and the order totals in [`crate::money`]) are always computed from
//! the current field values and never stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contact details of the customer who owns the vehicle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Full name.
    pub name: String,
    /// Phone number, free-form.
    pub phone: String,
    /// E-mail address, free-form.
    pub email: String,
    /// Postal address, free-form.
    pub address: String,
}

impl Client {
    /// Creates a client with the given name and blank contact details.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the phone number and returns the updated client.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the e-mail address and returns the updated client.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the postal address and returns the updated client.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }
}

/// Vehicle brought in for service.
///
/// Every field is text, including the year and the odometer reading, so the
/// caller controls display units such as `"45,000 km"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: String,
    pub color: String,
    pub plate: String,
    pub odometer: String,
}

impl Vehicle {
    /// Creates a vehicle from its make and model.
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = plate.into();
        self
    }

    pub fn with_odometer(mut self, odometer: impl Into<String>) -> Self {
        self.odometer = odometer.into();
        self
    }
}

/// Display status of a [`WorkItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkStatus {
    Completed,
    Pending,
}

/// A unit of work performed (or still to perform) on the vehicle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItem {
    pub description: String,
    pub completed: bool,
}

impl WorkItem {
    /// Creates a work item with an explicit completion flag.
    pub fn new(description: impl Into<String>, completed: bool) -> Self {
        Self {
            description: description.into(),
            completed,
        }
    }

    /// Returns the status selected by the completion flag.
    pub fn status(&self) -> WorkStatus {
        if self.completed {
            WorkStatus::Completed
        } else {
            WorkStatus::Pending
        }
    }
}

/// A part consumed by the job, billed by quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Part {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl Part {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Line subtotal: quantity × unit price.
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Billable mechanic time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborEntry {
    pub description: String,
    /// Hours worked; fractional hours are allowed.
    pub hours: Decimal,
    pub hourly_rate: Decimal,
}

impl LaborEntry {
    pub fn new(description: impl Into<String>, hours: Decimal, hourly_rate: Decimal) -> Self {
        Self {
            description: description.into(),
            hours,
            hourly_rate,
        }
    }

    /// Line subtotal: hours × hourly rate.
    pub fn subtotal(&self) -> Decimal {
        self.hours * self.hourly_rate
    }
}

/// A repair or service job aggregating everything printed on the report.
///
/// `client` and `vehicle` are optional only because upstream records may carry
/// nulls; the composer refuses to render an order without them.  Sequences are
/// rendered in the order they are stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub number: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub labor: Vec<LaborEntry>,
    #[serde(default)]
    pub notes: String,
}

impl WorkOrder {
    /// Creates an empty order with the given number and date.
    pub fn new(number: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            date,
            client: None,
            vehicle: None,
            work_items: Vec::new(),
            parts: Vec::new(),
            labor: Vec::new(),
            notes: String::new(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    /// Appends a work item and returns the updated order.
    pub fn with_work_item(mut self, item: WorkItem) -> Self {
        self.work_items.push(item);
        self
    }

    /// Appends a part and returns the updated order.
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Appends a labor entry and returns the updated order.
    pub fn with_labor(mut self, entry: LaborEntry) -> Self {
        self.labor.push(entry);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Identity block of the workshop issuing the report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkshopInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Optional PNG or JPEG logo printed above the title.
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
}

impl WorkshopInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Attaches logo image bytes and returns the updated record.
    pub fn with_logo(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.logo = Some(bytes.into());
        self
    }
}
