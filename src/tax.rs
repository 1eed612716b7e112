// 🧾 Tax Policies - Two unrelated formulas keyed on the CNPJ
//
// Entity revenue:  revenue × (10 + last digit) / 100, 5% off when region == 1
// Transaction:     amount × 5% + amount × (last digit of source × 0.1%)
//
// Both are pure and do no rounding. Rounding happens at presentation time.
// Amounts near the edge of the decimal range give None instead of a result.

use crate::cnpj::Cnpj;
use rust_decimal::Decimal;

/// Tax owed by a company on its yearly revenue
pub fn entity_revenue_tax(cnpj: &Cnpj, revenue: Decimal) -> Option<Decimal> {
    let rate = Decimal::from(10 + u32::from(cnpj.last_digit()));
    let tax = revenue
        .checked_mul(rate)?
        .checked_div(Decimal::ONE_HUNDRED)?;

    // Discount band for region 01
    if cnpj.region() == 1 {
        tax.checked_mul(Decimal::new(95, 2))
    } else {
        Some(tax)
    }
}

/// Tax on a single transfer, charged to the source
pub fn transaction_tax(source: &Cnpj, amount: Decimal) -> Option<Decimal> {
    let base = amount.checked_mul(Decimal::new(5, 2))?;
    let surcharge =
        amount.checked_mul(Decimal::from(source.last_digit()) * Decimal::new(1, 3))?;
    base.checked_add(surcharge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_tax_last_digit_one() {
        let source = Cnpj::new_unchecked(11_222_333_000_181);
        assert_eq!(transaction_tax(&source, dec!(1000.00)), Some(dec!(51.00)));
    }

    #[test]
    fn test_transaction_tax_range() {
        let zero = Cnpj::new_unchecked(33_444_555_000_100);
        let nine = Cnpj::new_unchecked(33_444_555_000_109);

        assert_eq!(transaction_tax(&zero, dec!(1000)), Some(dec!(50)));
        assert_eq!(transaction_tax(&nine, dec!(1000)), Some(dec!(59)));
    }

    #[test]
    fn test_transaction_tax_zero_amount() {
        let source = Cnpj::new_unchecked(22_333_444_000_192);
        assert_eq!(transaction_tax(&source, Decimal::ZERO), Some(Decimal::ZERO));
    }

    #[test]
    fn test_entity_tax_without_discount() {
        let cnpj = Cnpj::new_unchecked(11_222_333_000_181);
        assert_eq!(entity_revenue_tax(&cnpj, dec!(1500000.00)), Some(dec!(165000)));
    }

    #[test]
    fn test_entity_tax_with_discount_band() {
        // Region 01 with last digit 1: 1000 × 11% × 0.95
        let cnpj = Cnpj::new_unchecked(1_234_567_000_101);
        assert_eq!(cnpj.region(), 1);
        assert_eq!(entity_revenue_tax(&cnpj, dec!(1000)), Some(dec!(104.50)));
    }

    #[test]
    fn test_entity_tax_keeps_fractions() {
        // 850000 × 12% = 102000, 333.33 × 12% = 39.9996
        let cnpj = Cnpj::new_unchecked(22_333_444_000_192);
        assert_eq!(entity_revenue_tax(&cnpj, dec!(850000)), Some(dec!(102000)));
        assert_eq!(entity_revenue_tax(&cnpj, dec!(333.33)), Some(dec!(39.9996)));
    }

    #[test]
    fn test_entity_tax_overflow_is_none() {
        let cnpj = Cnpj::new_unchecked(11_222_333_000_181);
        assert_eq!(entity_revenue_tax(&cnpj, Decimal::MAX / dec!(10)), None);
        assert_eq!(entity_revenue_tax(&cnpj, Decimal::MIN), None);
    }
}
