//! Overflow-safe arithmetic over decoded amounts.

use rust_decimal::Decimal;

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Adds two values, clamping to `Decimal::MAX`/`Decimal::MIN` on overflow.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Sums values, clamping instead of panicking when the total leaves the
/// `Decimal` range.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().fold(Decimal::ZERO, saturating_add)
}

/// Arithmetic mean rounded to 2 places; zero for no values.
pub fn average_or_zero<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut count = 0u64;
    let total = saturating_sum(values.into_iter().inspect(|_| count += 1));
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(DISPLAY_DECIMAL_PRECISION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_saturating_sum_clamps() {
        let huge = dec!(50000000000000000000000000000);
        assert_eq!(saturating_sum([huge, huge]), Decimal::MAX);
        assert_eq!(saturating_sum([-huge, -huge]), Decimal::MIN);
        assert_eq!(saturating_sum([dec!(1.5), dec!(2.25)]), dec!(3.75));
        assert_eq!(saturating_sum(Vec::<Decimal>::new()), Decimal::ZERO);
    }

    #[test]
    fn test_average_rounds_to_two_places() {
        assert_eq!(average_or_zero([dec!(1), dec!(2), dec!(2)]), dec!(1.67));
        assert_eq!(average_or_zero([dec!(-10), dec!(3), dec!(20)]), dec!(4.33));
        assert_eq!(average_or_zero(Vec::<Decimal>::new()), Decimal::ZERO);
    }
}
