//! Synthetic monthly market risk data for traded credit products.

use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::domain::{MarketDataSpec, MarketRiskRow, ValueRange};
use crate::error::AppError;

/// Generate one row per month end, starting with the month containing `spec.start`.
///
/// Each column is drawn independently and in full before the next one
/// (all investment grade spreads, then high yield spreads, then volatility),
/// so a given seed always yields the same table.
pub fn generate_market_data<R: Rng + ?Sized>(
    rng: &mut R,
    spec: &MarketDataSpec,
) -> Result<Vec<MarketRiskRow>, AppError> {
    if spec.periods == 0 {
        return Err(AppError::new(2, "Market data needs at least one period."));
    }
    for (name, range) in [
        ("investment grade spread", spec.investment_grade),
        ("high yield spread", spec.high_yield),
        ("market volatility", spec.volatility),
    ] {
        if !range.is_valid() {
            return Err(AppError::new(
                2,
                format!("Invalid {name} range [{}, {}).", range.min, range.max),
            ));
        }
    }

    let dates = month_ends(spec.start, spec.periods)?;
    let ig = draw_column(rng, spec.investment_grade, spec.periods);
    let hy = draw_column(rng, spec.high_yield, spec.periods);
    let vol = draw_column(rng, spec.volatility, spec.periods);

    Ok(dates
        .into_iter()
        .zip(ig)
        .zip(hy)
        .zip(vol)
        .map(|(((date, investment_grade_spread), high_yield_spread), market_volatility)| MarketRiskRow {
            date,
            investment_grade_spread,
            high_yield_spread,
            market_volatility,
        })
        .collect())
}

/// `periods` consecutive month-end dates, the first being the end of `start`'s month.
pub fn month_ends(start: NaiveDate, periods: usize) -> Result<Vec<NaiveDate>, AppError> {
    let first_of_month = start
        .with_day(1)
        .ok_or_else(|| AppError::new(2, "Invalid market data start date."))?;

    (0..periods)
        .map(|k| {
            u32::try_from(k + 1)
                .ok()
                .and_then(|m| first_of_month.checked_add_months(Months::new(m)))
                .and_then(|next_month| next_month.pred_opt())
                .ok_or_else(|| AppError::new(2, "Market data date range is out of bounds."))
        })
        .collect()
}

fn draw_column<R: Rng + ?Sized>(rng: &mut R, range: ValueRange, n: usize) -> Vec<f64> {
    let dist = Uniform::new(range.min, range.max);
    (0..n).map(|_| dist.sample(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> Vec<MarketRiskRow> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_market_data(&mut rng, &MarketDataSpec::default()).unwrap()
    }

    #[test]
    fn same_seed_gives_identical_tables() {
        assert_eq!(seeded(42), seeded(42));
        assert_ne!(seeded(42), seeded(43));
    }

    #[test]
    fn dates_are_ascending_month_ends() {
        let rows = seeded(42);
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert_eq!(rows[11].date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        for w in rows.windows(2) {
            assert!(w[1].date > w[0].date);
        }
        for r in &rows {
            // Month end: the next day starts a new month.
            assert_eq!(r.date.succ_opt().unwrap().day(), 1);
        }
    }

    #[test]
    fn columns_respect_their_ranges() {
        let spec = MarketDataSpec::default();
        for seed in 0..20 {
            for r in seeded(seed) {
                assert!(spec.investment_grade.contains(r.investment_grade_spread));
                assert!(spec.high_yield.contains(r.high_yield_spread));
                assert!(spec.volatility.contains(r.market_volatility));
            }
        }
    }

    #[test]
    fn seed_42_first_row_is_pinned() {
        let rows = seeded(42);
        let first = &rows[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());
        assert_relative_eq!(first.investment_grade_spread, 2.026557409002774, epsilon = 1e-12);
        assert_relative_eq!(first.high_yield_spread, 6.562597099567298, epsilon = 1e-12);
        assert_relative_eq!(first.market_volatility, 18.510108224798454, epsilon = 1e-12);
    }

    #[test]
    fn mid_month_start_aligns_to_month_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let dates = month_ends(start, 3).unwrap();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            ]
        );
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let spec = MarketDataSpec {
            high_yield: ValueRange::new(9.0, 5.0),
            ..MarketDataSpec::default()
        };
        let err = generate_market_data(&mut rng, &spec).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let spec = MarketDataSpec {
            periods: 0,
            ..MarketDataSpec::default()
        };
        assert!(generate_market_data(&mut rng, &spec).is_err());
    }
}
