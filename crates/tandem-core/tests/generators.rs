use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use tandem_core::model::{Assignment, EmployeeId, EndDate, ProjectId};

pub fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

pub fn arb_date() -> impl Strategy<Value = NaiveDate> + Clone {
    (0u64..730).prop_map(|offset| epoch() + Days::new(offset))
}

/// A start date and an end no earlier than it.
pub fn arb_range() -> impl Strategy<Value = (NaiveDate, NaiveDate)> + Clone {
    (arb_date(), 0u64..120).prop_map(|(start, len)| (start, start + Days::new(len)))
}

pub fn arb_end(start: NaiveDate) -> impl Strategy<Value = EndDate> {
    prop_oneof![
        1 => Just(EndDate::Open),
        4 => (0u64..120).prop_map(move |len| EndDate::On(start + Days::new(len))),
    ]
}

pub fn arb_assignment() -> impl Strategy<Value = Assignment> {
    (1u32..8, 1u64..4, arb_date()).prop_flat_map(|(employee, project, start)| {
        arb_end(start).prop_map(move |end| Assignment {
            employee: EmployeeId(employee),
            project: ProjectId::Numeric(project),
            start,
            end,
        })
    })
}

pub fn arb_batch() -> impl Strategy<Value = Vec<Assignment>> {
    prop::collection::vec(arb_assignment(), 0..40)
}
