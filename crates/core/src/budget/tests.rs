//! Reconciliation engine tests against in-memory stores.

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use pocketbook_shared::types::{BudgetId, UserId};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

struct MemoryBudgets(Vec<Budget>);

impl BudgetStore for MemoryBudgets {
    async fn find_budgets(&self, criteria: &BudgetCriteria) -> Result<Vec<Budget>, BudgetError> {
        let mut found: Vec<Budget> =
            self.0.iter().filter(|b| criteria.matches(b)).cloned().collect();
        found.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(found)
    }
}

struct MemoryExpenses {
    rows: Vec<(UserId, &'static str, Decimal, DateTime<Utc>)>,
    seen_windows: Mutex<Vec<DateWindow>>,
}

impl MemoryExpenses {
    fn new(rows: Vec<(UserId, &'static str, Decimal, DateTime<Utc>)>) -> Self {
        Self {
            rows,
            seen_windows: Mutex::new(Vec::new()),
        }
    }
}

impl SpendingStore for MemoryExpenses {
    async fn expenses_by_category(
        &self,
        owner: UserId,
        window: &DateWindow,
    ) -> Result<SpendingByCategory, BudgetError> {
        self.seen_windows.lock().unwrap().push(*window);
        let mut totals = SpendingByCategory::new();
        for (row_owner, category, amount, at) in &self.rows {
            if *row_owner == owner && window.contains(*at) {
                *totals.entry((*category).to_string()).or_default() += *amount;
            }
        }
        Ok(totals)
    }
}

struct FailingExpenses;

impl SpendingStore for FailingExpenses {
    async fn expenses_by_category(
        &self,
        _owner: UserId,
        _window: &DateWindow,
    ) -> Result<SpendingByCategory, BudgetError> {
        Err(BudgetError::Store("connection reset".to_string()))
    }
}

fn budget(
    owner: UserId,
    category: &str,
    amount: Decimal,
    period: BudgetPeriod,
    year: i32,
    month: Option<u32>,
) -> Budget {
    let now = Utc::now();
    Budget {
        id: BudgetId::new(),
        owner_id: owner,
        category: category.to_string(),
        amount,
        period,
        year,
        month,
        created_at: now,
        updated_at: now,
    }
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

#[tokio::test]
async fn test_monthly_budget_half_spent() {
    let owner = UserId::new();
    let budgets = MemoryBudgets(vec![budget(
        owner,
        "food",
        dec!(300000),
        BudgetPeriod::Monthly,
        2024,
        Some(6),
    )]);
    let expenses = MemoryExpenses::new(vec![
        (owner, "food", dec!(100000), at(2024, 6, 3)),
        (owner, "food", dec!(50000), at(2024, 6, 20)),
        (owner, "food", dec!(999), at(2024, 5, 31)),
    ]);

    let period = ReportingPeriod::monthly(2024, 6).unwrap();
    let records = ReconciliationEngine::new(&budgets, &expenses)
        .compare(owner, &period)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.spent_amount, dec!(150000));
    assert_eq!(record.remaining_amount, dec!(150000));
    assert_eq!(record.percentage.to_string(), "50.0");
    assert!(!record.is_over_budget);
    assert_eq!(record.month, Some(6));
}

#[tokio::test]
async fn test_monthly_budget_overspent() {
    let owner = UserId::new();
    let budgets = MemoryBudgets(vec![budget(
        owner,
        "food",
        dec!(300000),
        BudgetPeriod::Monthly,
        2024,
        Some(6),
    )]);
    let expenses = MemoryExpenses::new(vec![(owner, "food", dec!(450000), at(2024, 6, 10))]);

    let period = ReportingPeriod::monthly(2024, 6).unwrap();
    let records = ReconciliationEngine::new(&budgets, &expenses)
        .compare(owner, &period)
        .await
        .unwrap();

    let record = &records[0];
    assert_eq!(record.remaining_amount, dec!(-150000));
    assert_eq!(record.percentage.to_string(), "150.0");
    assert!(record.is_over_budget);
}

#[tokio::test]
async fn test_yearly_budget_excludes_next_january_first() {
    let owner = UserId::new();
    let budgets = MemoryBudgets(vec![budget(
        owner,
        "travel",
        dec!(1000000),
        BudgetPeriod::Yearly,
        2024,
        None,
    )]);
    let expenses = MemoryExpenses::new(vec![
        (owner, "travel", dec!(400000), at(2024, 1, 15)),
        (owner, "travel", dec!(400000), at(2024, 12, 31)),
        (
            owner,
            "travel",
            dec!(400000),
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ),
    ]);

    let period = ReportingPeriod::yearly(2024).unwrap();
    let records = ReconciliationEngine::new(&budgets, &expenses)
        .compare(owner, &period)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].spent_amount, dec!(800000));
    assert_eq!(records[0].percentage.to_string(), "80.0");
    assert!(!records[0].is_over_budget);
    assert_eq!(records[0].month, None);

    let windows = expenses.seen_windows.lock().unwrap();
    assert_eq!(windows[0].end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
}

#[tokio::test]
async fn test_no_budgets_yields_empty() {
    let owner = UserId::new();
    let budgets = MemoryBudgets(Vec::new());
    let expenses = MemoryExpenses::new(vec![(owner, "food", dec!(10), at(2024, 6, 1))]);

    let period = ReportingPeriod::monthly(2024, 6).unwrap();
    let records = ReconciliationEngine::new(&budgets, &expenses)
        .compare(owner, &period)
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_records_follow_budget_order_and_ignore_other_owners() {
    let owner = UserId::new();
    let stranger = UserId::new();
    let budgets = MemoryBudgets(vec![
        budget(owner, "transport", dec!(50), BudgetPeriod::Monthly, 2024, Some(6)),
        budget(owner, "food", dec!(100), BudgetPeriod::Monthly, 2024, Some(6)),
        budget(owner, "rent", dec!(900), BudgetPeriod::Yearly, 2024, None),
        budget(stranger, "food", dec!(5), BudgetPeriod::Monthly, 2024, Some(6)),
    ]);
    let expenses = MemoryExpenses::new(vec![
        (stranger, "food", dec!(500), at(2024, 6, 2)),
        (owner, "shopping", dec!(70), at(2024, 6, 2)),
    ]);

    let period = ReportingPeriod::monthly(2024, 6).unwrap();
    let records = ReconciliationEngine::new(&budgets, &expenses)
        .compare(owner, &period)
        .await
        .unwrap();

    let categories: Vec<&str> = records.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["food", "transport"]);
    assert!(records.iter().all(|r| r.spent_amount.is_zero()));
}

#[tokio::test]
async fn test_zero_budget_with_spending_is_over() {
    let owner = UserId::new();
    let budgets = MemoryBudgets(vec![budget(
        owner,
        "gifts",
        Decimal::ZERO,
        BudgetPeriod::Monthly,
        2024,
        Some(6),
    )]);
    let expenses = MemoryExpenses::new(vec![(owner, "gifts", dec!(1), at(2024, 6, 5))]);

    let period = ReportingPeriod::monthly(2024, 6).unwrap();
    let records = ReconciliationEngine::new(&budgets, &expenses)
        .compare(owner, &period)
        .await
        .unwrap();

    assert_eq!(records[0].percentage.to_string(), "0.0");
    assert!(records[0].is_over_budget);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let owner = UserId::new();
    let budgets = MemoryBudgets(vec![budget(
        owner,
        "food",
        dec!(1),
        BudgetPeriod::Monthly,
        2024,
        Some(6),
    )]);

    let period = ReportingPeriod::monthly(2024, 6).unwrap();
    let result = ReconciliationEngine::new(&budgets, &FailingExpenses)
        .compare(owner, &period)
        .await;

    assert!(matches!(result, Err(BudgetError::Store(_))));
}

#[test]
fn test_comparison_record_json_shape() {
    let owner = UserId::new();
    let b = budget(owner, "food", dec!(300000), BudgetPeriod::Monthly, 2024, Some(6));
    let record = ComparisonRecord::from_budget(&b, dec!(150000));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["budgetAmount"], "300000");
    assert_eq!(json["spentAmount"], "150000");
    assert_eq!(json["remainingAmount"], "150000");
    assert_eq!(json["percentage"], "50.0");
    assert_eq!(json["isOverBudget"], false);
    assert_eq!(json["period"], "monthly");
    assert_eq!(json["month"], 6);
}

#[rstest]
#[case(dec!(1), dec!(3), "33.3")]
#[case(dec!(2), dec!(3), "66.7")]
#[case(dec!(1), dec!(8), "12.5")]
#[case(dec!(1), dec!(16), "6.3")]
#[case(dec!(1), dec!(1), "100.0")]
#[case(dec!(450000), dec!(300000), "150.0")]
#[case(dec!(0), dec!(300000), "0.0")]
fn test_percentage_known_values(
    #[case] spent: Decimal,
    #[case] amount: Decimal,
    #[case] expected: &str,
) {
    let b = budget(UserId::new(), "x", amount, BudgetPeriod::Monthly, 2024, Some(1));

    let record = ComparisonRecord::from_budget(&b, spent);

    assert_eq!(record.percentage.to_string(), expected);
}

proptest! {
    #[test]
    fn test_percentage_and_over_budget_for_positive_amount(
        amount in 1i64..1_000_000_000,
        spent in 0i64..2_000_000_000,
    ) {
        let b = budget(UserId::new(), "x", Decimal::from(amount), BudgetPeriod::Monthly, 2024, Some(1));

        let record = ComparisonRecord::from_budget(&b, Decimal::from(spent));

        // Tenths of a percent, rounded half up, in exact integer arithmetic.
        let tenths = (i128::from(spent) * 2000 + i128::from(amount)) / (2 * i128::from(amount));
        let expected = Decimal::from_i128_with_scale(tenths, 1);
        prop_assert_eq!(record.percentage.to_string(), expected.to_string());
        prop_assert_eq!(record.is_over_budget, spent > amount);
    }

    #[test]
    fn test_zero_amount_budget(spent in 0i64..1_000_000_000) {
        let spent = Decimal::from(spent);
        let b = budget(UserId::new(), "x", Decimal::ZERO, BudgetPeriod::Yearly, 2024, None);

        let record = ComparisonRecord::from_budget(&b, spent);

        prop_assert!(record.percentage.is_zero());
        prop_assert_eq!(record.is_over_budget, spent > Decimal::ZERO);
    }

    #[test]
    fn test_remaining_plus_spent_is_amount(
        amount_cents in 0i64..100_000_000_000,
        spent_cents in 0i64..100_000_000_000,
    ) {
        let amount = Decimal::new(amount_cents, 2);
        let spent = Decimal::new(spent_cents, 2);
        let b = budget(UserId::new(), "x", amount, BudgetPeriod::Monthly, 2024, Some(1));

        let record = ComparisonRecord::from_budget(&b, spent);

        prop_assert_eq!(record.remaining_amount + record.spent_amount, record.budget_amount);
    }
}
