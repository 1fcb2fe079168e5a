mod common;

use awamu::domain::good::Good;
use awamu::domain::plan::{InstallmentPlan, PlanSelector, monthly_amount, service_fee};
use awamu::error::Result;
use awamu::interfaces::csv::catalog_reader::CatalogReader;
use std::fs::File;
use tempfile::tempdir;

#[test]
fn test_every_allowed_period_covers_the_price_with_minimal_rounding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    common::generate_catalog(&path, 200).unwrap();

    let goods: Vec<Good> = CatalogReader::new(File::open(&path).unwrap())
        .goods()
        .collect::<Result<_>>()
        .unwrap();
    assert_eq!(goods.len(), 200);

    for good in &goods {
        let plans = InstallmentPlan::schedule(good).unwrap();
        assert_eq!(plans.len(), good.periods().count());

        for plan in plans {
            let months = u64::from(plan.period_months);
            assert!(plan.monthly_amount * months >= good.price());
            assert!((plan.monthly_amount - 1) * months < good.price());
            assert_eq!(plan.service_fee, service_fee(plan.monthly_amount));
            assert_eq!(
                plan.total_monthly_payment,
                plan.monthly_amount + plan.service_fee
            );
        }
    }
}

#[test]
fn test_fee_never_decreases_with_monthly_amount() {
    let mut previous = service_fee(0);
    for monthly in (0..=12_000).step_by(7) {
        let fee = service_fee(monthly);
        assert!(fee >= previous, "fee dropped at {monthly}");
        previous = fee;
    }
    assert_eq!(service_fee(u64::MAX), 15);
}

#[test]
fn test_fee_band_edges() {
    let edges = [
        (1_000, 1),
        (1_001, 2),
        (2_000, 2),
        (3_000, 3),
        (3_001, 5),
        (4_000, 5),
        (4_001, 7),
        (6_000, 7),
        (8_000, 10),
        (8_001, 12),
        (10_000, 12),
        (10_001, 15),
    ];
    for (monthly, fee) in edges {
        assert_eq!(service_fee(monthly), fee, "monthly amount {monthly}");
    }
}

#[test]
fn test_periods_outside_the_range_are_rejected() {
    let tv = Good::new("Television", "tv", 30_000, 4, 8).unwrap();
    assert!(InstallmentPlan::quote(&tv, 3).is_err());
    assert!(InstallmentPlan::quote(&tv, 9).is_err());
    assert!(monthly_amount(30_000, 0).is_err());

    let mut selector = PlanSelector::new();
    selector.select_good(tv).unwrap();
    assert!(selector.set_period(9).is_err());
    assert_eq!(selector.current_plan().unwrap().period_months, 4);
}

#[test]
fn test_started_plan_is_frozen() {
    let phone = Good::new("Mobile Phone", "phone", 18_000, 3, 6).unwrap();
    let mut selector = PlanSelector::new();
    selector.select_good(phone.clone()).unwrap();
    selector.set_period(6).unwrap();

    let plan = selector.start().unwrap();
    assert_eq!(plan.monthly_amount, 3_000);
    assert_eq!(plan.total_monthly_payment, 3_003);

    assert!(selector.set_period(3).is_err());
    assert!(selector.select_good(phone).is_err());
    assert_eq!(selector.current_plan().unwrap(), plan);
}
