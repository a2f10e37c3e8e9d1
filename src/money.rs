//! Decimal totals and locale formatting for monetary values.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::WorkOrder;

/// Tax rate applied to the order subtotal, in percent.
pub const TAX_RATE_PERCENT: u32 = 16;

const CURRENCY_SYMBOL: &str = "$";
const GROUP_SEPARATOR: char = ',';
const DECIMAL_SEPARATOR: char = '.';

/// Returns the tax rate as a decimal fraction (`0.16`).
pub fn tax_rate() -> Decimal {
    Decimal::new(i64::from(TAX_RATE_PERCENT), 2)
}

/// Derived amounts of a [`WorkOrder`].
///
/// Values are exact: nothing is rounded until it is formatted for display, so
/// `subtotal == parts_total + labor_total`, `tax == subtotal * 0.16` and
/// `total == subtotal + tax` hold without tolerance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderTotals {
    pub parts_total: Decimal,
    pub labor_total: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Computes the totals from the current contents of `order`.
    ///
    /// Panics if an amount exceeds the `Decimal` range; orders that passed
    /// validation never do.  Use [`OrderTotals::checked`] for unvalidated input.
    pub fn of(order: &WorkOrder) -> Self {
        let parts_total = order.parts.iter().map(|part| part.subtotal()).sum::<Decimal>();
        let labor_total = order.labor.iter().map(|entry| entry.subtotal()).sum::<Decimal>();
        let subtotal = parts_total + labor_total;
        let tax = subtotal * tax_rate();

        Self {
            parts_total,
            labor_total,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Like [`OrderTotals::of`], but returns `None` when any line, sum or the
    /// tax overflows the `Decimal` range.
    pub fn checked(order: &WorkOrder) -> Option<Self> {
        let parts_total = order.parts.iter().try_fold(Decimal::ZERO, |sum, part| {
            Decimal::from(part.quantity)
                .checked_mul(part.unit_price)
                .and_then(|line| sum.checked_add(line))
        })?;
        let labor_total = order.labor.iter().try_fold(Decimal::ZERO, |sum, entry| {
            entry
                .hours
                .checked_mul(entry.hourly_rate)
                .and_then(|line| sum.checked_add(line))
        })?;
        let subtotal = parts_total.checked_add(labor_total)?;
        let tax = subtotal.checked_mul(tax_rate())?;
        let total = subtotal.checked_add(tax)?;

        Some(Self {
            parts_total,
            labor_total,
            subtotal,
            tax,
            total,
        })
    }
}

/// Formats an amount as currency: symbol prefix, thousands grouping and
/// exactly two decimals, e.g. `$1,850.00`.
pub fn format_currency(amount: Decimal) -> String {
    let digits = format_grouped(amount.abs(), 2);
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{CURRENCY_SYMBOL}{digits}")
    } else {
        format!("{CURRENCY_SYMBOL}{digits}")
    }
}

/// Formats an hour count with one decimal, e.g. `0.5` or `1,200.0`.
pub fn format_hours(hours: Decimal) -> String {
    let digits = format_grouped(hours.abs(), 1);
    if hours.is_sign_negative() && !hours.is_zero() {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Rounds half away from zero to `decimals` places and inserts group
/// separators into the integer part. `value` must be non-negative.
fn format_grouped(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimals as usize, rounded);

    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain.as_str(), None),
    };

    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    if let Some(fraction) = fraction {
        grouped.push(DECIMAL_SEPARATOR);
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LaborEntry, Part};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn order() -> WorkOrder {
        WorkOrder::new("OT-2024-0001", NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[test]
    fn single_part_and_labor_entry() {
        let order = order()
            .with_part(Part::new("Aceite sintético 5W-30 (5L)", 1, dec("450.00")))
            .with_labor(LaborEntry::new("Cambio de aceite", dec("0.5"), dec("200.00")));

        let totals = OrderTotals::of(&order);
        assert_eq!(totals.parts_total, dec("450.00"));
        assert_eq!(totals.labor_total, dec("100.00"));
        assert_eq!(totals.subtotal, dec("550.00"));
        assert_eq!(totals.tax, dec("88.00"));
        assert_eq!(totals.total, dec("638.00"));
    }

    #[test]
    fn empty_order_totals_are_zero() {
        let totals = OrderTotals::of(&order());
        assert!(totals.parts_total.is_zero());
        assert!(totals.labor_total.is_zero());
        assert!(totals.total.is_zero());
        assert_eq!(format_currency(totals.total), "$0.00");
    }

    #[test]
    fn totals_chain_is_exact() {
        let order = order()
            .with_part(Part::new("Tornillo", 7, dec("0.33")))
            .with_part(Part::new("Junta", 3, dec("12.345")))
            .with_labor(LaborEntry::new("Diagnóstico", dec("0.25"), dec("333.33")));

        let totals = OrderTotals::of(&order);
        assert_eq!(totals.subtotal, totals.parts_total + totals.labor_total);
        assert_eq!(totals.tax, totals.subtotal * dec("0.16"));
        assert_eq!(totals.total, totals.subtotal + totals.tax);
    }

    #[test]
    fn checked_totals_match_plain_totals() {
        let order = order()
            .with_part(Part::new("Batería 12V 60Ah", 2, dec("1850.00")))
            .with_labor(LaborEntry::new("Instalación", dec("0.5"), dec("200.00")));
        assert_eq!(OrderTotals::checked(&order), Some(OrderTotals::of(&order)));
    }

    #[test]
    fn checked_totals_detect_overflow() {
        let huge_line = order().with_part(Part::new("x", u32::MAX, Decimal::MAX / dec("1000")));
        assert_eq!(OrderTotals::checked(&huge_line), None);

        let huge_sum = order()
            .with_part(Part::new("a", 1, Decimal::MAX))
            .with_part(Part::new("b", 1, Decimal::MAX));
        assert_eq!(OrderTotals::checked(&huge_sum), None);

        let huge_tax = order().with_labor(LaborEntry::new("c", Decimal::ONE, Decimal::MAX));
        assert_eq!(OrderTotals::checked(&huge_tax), None);
    }

    #[test]
    fn tax_rate_is_sixteen_percent() {
        assert_eq!(tax_rate(), dec("0.16"));
    }

    #[test]
    fn currency_uses_grouping_and_two_decimals() {
        assert_eq!(format_currency(dec("1850")), "$1,850.00");
        assert_eq!(format_currency(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_currency(dec("999.999")), "$1,000.00");
        assert_eq!(format_currency(dec("0.005")), "$0.01");
        assert_eq!(format_currency(dec("100")), "$100.00");
        assert_eq!(format_currency(dec("-12.5")), "-$12.50");
    }

    #[test]
    fn hours_use_one_decimal() {
        assert_eq!(format_hours(dec("0.5")), "0.5");
        assert_eq!(format_hours(dec("1")), "1.0");
        assert_eq!(format_hours(dec("0.25")), "0.3");
        assert_eq!(format_hours(dec("1200")), "1,200.0");
    }
}
