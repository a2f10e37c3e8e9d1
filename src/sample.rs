//! Demo data used by the CLI `sample` command and the integration tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{Client, LaborEntry, Part, Vehicle, WorkItem, WorkOrder, WorkshopInfo};

/// Number of the demo order.
pub const SAMPLE_ORDER_NUMBER: &str = "OT-2024-0001";

const HOURLY_RATE: i64 = 200;

/// A fully populated order dated `date`: five completed jobs, five parts and
/// five labor entries.
pub fn sample_work_order(date: NaiveDate) -> WorkOrder {
    let rate = Decimal::from(HOURLY_RATE);
    let half = Decimal::new(5, 1);

    WorkOrder::new(SAMPLE_ORDER_NUMBER, date)
        .with_client(
            Client::new("Juan Pérez García")
                .with_phone("(555) 987-6543")
                .with_email("juan.perez@email.com")
                .with_address("Av. Reforma #456, Col. Centro"),
        )
        .with_vehicle(
            Vehicle::new("Toyota", "Corolla")
                .with_year("2020")
                .with_color("Plata")
                .with_plate("ABC-123-XYZ")
                .with_odometer("45,000 km"),
        )
        .with_work_item(WorkItem::new("Cambio de aceite y filtro", true))
        .with_work_item(WorkItem::new("Rotación de neumáticos", true))
        .with_work_item(WorkItem::new("Revisión de frenos", true))
        .with_work_item(WorkItem::new("Alineación y balanceo", true))
        .with_work_item(WorkItem::new("Cambio de batería", true))
        .with_part(Part::new("Aceite sintético 5W-30 (5L)", 1, Decimal::from(450)))
        .with_part(Part::new("Filtro de aceite original", 1, Decimal::from(120)))
        .with_part(Part::new("Filtro de aire", 1, Decimal::from(180)))
        .with_part(Part::new("Batería 12V 60Ah", 1, Decimal::from(1850)))
        .with_part(Part::new("Líquido de frenos DOT 4", 1, Decimal::from(95)))
        .with_labor(LaborEntry::new("Cambio de aceite y filtros", half, rate))
        .with_labor(LaborEntry::new("Rotación de neumáticos", half, rate))
        .with_labor(LaborEntry::new("Revisión de sistema de frenos", Decimal::ONE, rate))
        .with_labor(LaborEntry::new("Alineación y balanceo", Decimal::new(15, 1), rate))
        .with_labor(LaborEntry::new("Instalación de batería", half, rate))
        .with_notes(
            "El vehículo fue revisado completamente. Se recomienda próximo servicio en \
             5,000 km o 6 meses. Todas las refacciones utilizadas son originales y \
             cuentan con garantía de 6 meses.",
        )
}

/// The demo workshop, without a logo.
pub fn sample_workshop() -> WorkshopInfo {
    WorkshopInfo::new("Taller Mecánico AutoService")
        .with_address("Calle Principal #123, Ciudad")
        .with_phone("(555) 123-4567")
        .with_email("contacto@autoservice.com")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::OrderTotals;

    #[test]
    fn sample_totals_match_hand_computation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let totals = OrderTotals::of(&sample_work_order(date));
        assert_eq!(totals.parts_total, Decimal::from(2695));
        assert_eq!(totals.labor_total, Decimal::from(800));
        assert_eq!(totals.subtotal, Decimal::from(3495));
        assert_eq!(totals.tax, Decimal::new(5592, 1));
        assert_eq!(totals.total, Decimal::new(40542, 1));
    }
}
