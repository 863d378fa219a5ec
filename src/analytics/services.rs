//! Grouped spending summaries over one owner's expenses.
//!
//! Totals use exact decimal addition, so identical input always yields
//! identical output. Grouping keys are taken verbatim: categories are not
//! case-folded or trimmed, and months come from the UTC calendar date.

use std::collections::BTreeMap;

use axum::extract::FromRef;
use rust_decimal::Decimal;
use time::UtcOffset;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    expenses::{repo_types::Expense, services::ExpenseLedger},
    state::AppState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: u8, // 1-12
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    pub category_totals: Vec<CategoryTotal>,
    pub monthly_totals: Vec<MonthlyTotal>,
}

fn add(acc: &mut Decimal, amount: Decimal) -> AppResult<()> {
    *acc = acc
        .checked_add(amount)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("expense total overflowed")))?;
    Ok(())
}

/// Totals per category, largest first. Equal totals are ordered by category name.
pub fn category_totals(expenses: &[Expense]) -> AppResult<Vec<CategoryTotal>> {
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for e in expenses {
        add(groups.entry(e.category.as_str()).or_default(), e.amount)?;
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total: total.normalize(),
        })
        .collect();
    // Stable sort keeps the name order from the map for ties.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    Ok(totals)
}

/// Totals per calendar month, oldest first.
pub fn monthly_totals(expenses: &[Expense]) -> AppResult<Vec<MonthlyTotal>> {
    let mut groups: BTreeMap<(i32, u8), Decimal> = BTreeMap::new();
    for e in expenses {
        let date = e.date.to_offset(UtcOffset::UTC);
        add(
            groups.entry((date.year(), u8::from(date.month()))).or_default(),
            e.amount,
        )?;
    }

    Ok(groups
        .into_iter()
        .map(|((year, month), total)| MonthlyTotal {
            year,
            month,
            total: total.normalize(),
        })
        .collect())
}

/// Read-only aggregation over the ledger, always scoped to a single owner.
#[derive(Clone)]
pub struct AnalyticsAggregator {
    ledger: ExpenseLedger,
}

impl FromRef<AppState> for AnalyticsAggregator {
    fn from_ref(state: &AppState) -> Self {
        Self::new(ExpenseLedger::from_ref(state))
    }
}

impl AnalyticsAggregator {
    pub fn new(ledger: ExpenseLedger) -> Self {
        Self { ledger }
    }

    pub async fn category_totals(&self, owner_id: Uuid) -> AppResult<Vec<CategoryTotal>> {
        category_totals(&self.ledger.list_by_owner(owner_id).await?)
    }

    pub async fn monthly_totals(&self, owner_id: Uuid) -> AppResult<Vec<MonthlyTotal>> {
        monthly_totals(&self.ledger.list_by_owner(owner_id).await?)
    }

    /// Both summaries computed from one read of the owner's expenses.
    pub async fn summary(&self, owner_id: Uuid) -> AppResult<Analytics> {
        let expenses = self.ledger.list_by_owner(owner_id).await?;
        Ok(Analytics {
            category_totals: category_totals(&expenses)?,
            monthly_totals: monthly_totals(&expenses)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::SystemClock,
        expenses::dto::{AddExpenseRequest, AmountInput},
        storage::MemoryStore,
    };
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use time::{macros::datetime, OffsetDateTime};

    fn expense(category: &str, amount: Decimal, date: OffsetDateTime) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            amount,
            category: category.into(),
            note: String::new(),
            date,
            created_at: date,
        }
    }

    fn cat(category: &str, total: Decimal) -> CategoryTotal {
        CategoryTotal {
            category: category.into(),
            total,
        }
    }

    fn month(year: i32, month: u8, total: Decimal) -> MonthlyTotal {
        MonthlyTotal { year, month, total }
    }

    #[test]
    fn category_totals_sum_and_sort_descending() {
        let d = datetime!(2024-01-15 00:00 UTC);
        let expenses = vec![
            expense("A", dec!(10), d),
            expense("B", dec!(5), d),
            expense("A", dec!(20), d),
        ];
        assert_eq!(
            category_totals(&expenses).unwrap(),
            vec![cat("A", dec!(30)), cat("B", dec!(5))]
        );
    }

    #[test]
    fn category_ties_break_by_name() {
        let d = datetime!(2024-01-15 00:00 UTC);
        let expenses = vec![
            expense("Zoo", dec!(7), d),
            expense("Bus", dec!(7), d),
            expense("Art", dec!(1), d),
            expense("Car", dec!(7), d),
        ];
        let names: Vec<String> = category_totals(&expenses)
            .unwrap()
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(names, ["Bus", "Car", "Zoo", "Art"]);
    }

    #[test]
    fn categories_are_not_normalised() {
        let d = datetime!(2024-01-15 00:00 UTC);
        let expenses = vec![
            expense("food", dec!(1), d),
            expense("Food", dec!(2), d),
            expense("Food ", dec!(3), d),
        ];
        assert_eq!(category_totals(&expenses).unwrap().len(), 3);
    }

    #[test]
    fn decimal_sums_are_exact() {
        let d = datetime!(2024-01-15 00:00 UTC);
        let expenses: Vec<Expense> = (0..10).map(|_| expense("X", dec!(0.1), d)).collect();
        assert_eq!(category_totals(&expenses).unwrap(), vec![cat("X", dec!(1))]);
        assert_eq!(monthly_totals(&expenses).unwrap(), vec![month(2024, 1, dec!(1))]);
    }

    #[test]
    fn monthly_totals_ascend_by_year_and_month() {
        let expenses = vec![
            expense("A", dec!(40), datetime!(2024-02-01 00:00 UTC)),
            expense("B", dec!(10), datetime!(2024-01-15 00:00 UTC)),
            expense("C", dec!(3), datetime!(2023-12-31 23:59 UTC)),
            expense("D", dec!(2), datetime!(2024-01-20 12:00 UTC)),
        ];
        assert_eq!(
            monthly_totals(&expenses).unwrap(),
            vec![
                month(2023, 12, dec!(3)),
                month(2024, 1, dec!(12)),
                month(2024, 2, dec!(40)),
            ]
        );
    }

    #[test]
    fn month_is_taken_in_utc() {
        // 23:30 on Jan 31st in UTC-5 is already February in UTC.
        let expenses = vec![expense(
            "A",
            dec!(1),
            datetime!(2024-01-31 23:30 -5),
        )];
        assert_eq!(monthly_totals(&expenses).unwrap(), vec![month(2024, 2, dec!(1))]);
    }

    #[test]
    fn empty_input_gives_empty_summaries() {
        assert!(category_totals(&[]).unwrap().is_empty());
        assert!(monthly_totals(&[]).unwrap().is_empty());
    }

    fn add_request(amount: &str, category: &str, date: &str) -> AddExpenseRequest {
        AddExpenseRequest {
            amount: AmountInput::Text(amount.into()),
            category: category.into(),
            note: None,
            date: date.into(),
        }
    }

    #[tokio::test]
    async fn aggregator_is_owner_scoped_and_repeatable() {
        let ledger = ExpenseLedger::new(Arc::new(MemoryStore::default()), Arc::new(SystemClock));
        let aggregator = AnalyticsAggregator::new(ledger.clone());
        let (alice, bob) = (Uuid::new_v4(), Uuid::new_v4());

        ledger.append(alice, add_request("10", "Food", "2024-01-15T00:00:00Z")).await.unwrap();
        ledger.append(alice, add_request("40", "Rent", "2024-02-01T00:00:00Z")).await.unwrap();
        ledger.append(bob, add_request("999", "Food", "2024-01-15T00:00:00Z")).await.unwrap();

        let first = aggregator.summary(alice).await.unwrap();
        let second = aggregator.summary(alice).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.category_totals,
            vec![cat("Rent", dec!(40)), cat("Food", dec!(10))]
        );
        assert_eq!(
            aggregator.monthly_totals(alice).await.unwrap(),
            vec![month(2024, 1, dec!(10)), month(2024, 2, dec!(40))]
        );
        assert_eq!(
            aggregator.category_totals(bob).await.unwrap(),
            vec![cat("Food", dec!(999))]
        );
    }
}
