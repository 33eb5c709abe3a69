use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use tandem_core::engine::{EngineOptions, OverlapStrategy, analyze, overlap_days};
use tandem_core::model::{Assignment, EmployeeId, EmployeePair, EndDate, ProjectId, Tenure};
use tandem_core::observer::NullObserver;

#[path = "generators.rs"]
mod generators;
use generators::*;

fn today() -> NaiveDate {
    epoch() + Days::new(900)
}

fn tenure(employee: u32, (start, end): (NaiveDate, NaiveDate)) -> Tenure {
    Tenure {
        employee: EmployeeId(employee),
        project: ProjectId::Numeric(1),
        start,
        end,
    }
}

fn close_open_ends(batch: &[Assignment], today: NaiveDate) -> Vec<Assignment> {
    batch
        .iter()
        .cloned()
        .map(|mut a| {
            a.end = EndDate::On(a.end.or_today(today));
            a
        })
        .collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn overlap_is_inclusive_day_count(a in arb_range(), b in arb_range()) {
        let (ta, tb) = (tenure(1, a), tenure(2, b));
        let start = a.0.max(b.0);
        let end = a.1.min(b.1);

        match overlap_days(&ta, &tb) {
            Some(days) => {
                prop_assert!(start <= end);
                let expected = end.signed_duration_since(start).num_days() + 1;
                prop_assert_eq!(i64::try_from(days).unwrap(), expected);
            }
            None => prop_assert!(start > end),
        }
    }

    #[test]
    fn overlap_is_symmetric(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(
            overlap_days(&tenure(1, a), &tenure(2, b)),
            overlap_days(&tenure(2, b), &tenure(1, a))
        );
    }

    #[test]
    fn pair_identity_ignores_order(a in 1u32..1000, b in 1u32..1000) {
        prop_assume!(a != b);
        prop_assert_eq!(EmployeePair::new(a, b), EmployeePair::new(b, a));
    }

    #[test]
    fn sweep_matches_pairwise(batch in arb_batch()) {
        let options = EngineOptions::new(today());
        let pairwise = analyze(&batch, &options.with_strategy(OverlapStrategy::Pairwise), &NullObserver);
        let sweep = analyze(&batch, &options.with_strategy(OverlapStrategy::Sweep), &NullObserver);
        prop_assert_eq!(pairwise, sweep);
    }

    #[test]
    fn open_end_equals_reference_date(batch in arb_batch()) {
        let options = EngineOptions::new(today());
        let open = analyze(&batch, &options, &NullObserver);
        let closed = analyze(&close_open_ends(&batch, today()), &options, &NullObserver);
        prop_assert_eq!(open, closed);
    }

    #[test]
    fn input_order_does_not_matter(batch in arb_batch()) {
        let options = EngineOptions::new(today());
        let forward = analyze(&batch, &options, &NullObserver);
        let mut reversed = batch.clone();
        reversed.reverse();
        prop_assert_eq!(forward, analyze(&reversed, &options, &NullObserver));
    }

    #[test]
    fn totals_are_sums_of_records(batch in arb_batch()) {
        let report = analyze(&batch, &EngineOptions::new(today()), &NullObserver);
        for (pair, total) in report.totals.iter() {
            let summed: u64 = report
                .records
                .iter()
                .filter(|r| r.pair == pair)
                .map(|r| r.overlap_days)
                .sum();
            prop_assert_eq!(summed, total);
            prop_assert!(total > 0);
        }
    }

    #[test]
    fn longest_is_a_maximum(batch in arb_batch()) {
        let report = analyze(&batch, &EngineOptions::new(today()), &NullObserver);
        match report.longest {
            Some(best) => {
                for (pair, total) in report.totals.iter() {
                    prop_assert!(total < best.total_days || (total == best.total_days && pair >= best.pair));
                }
            }
            None => prop_assert!(report.totals.is_empty()),
        }
    }
}
