use rust_decimal::Decimal;
use serde::Serialize;

use super::services::{Analytics, CategoryTotal, MonthlyTotal};

#[derive(Debug, Serialize)]
pub struct CategoryTotalResponse {
    #[serde(rename = "_id")]
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u8,
}

#[derive(Debug, Serialize)]
pub struct MonthlyTotalResponse {
    #[serde(rename = "_id")]
    pub key: MonthKey,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Body of `GET /analytics`.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub category_totals: Vec<CategoryTotalResponse>,
    pub monthly_totals: Vec<MonthlyTotalResponse>,
}

impl From<CategoryTotal> for CategoryTotalResponse {
    fn from(c: CategoryTotal) -> Self {
        Self {
            category: c.category,
            total: c.total,
        }
    }
}

impl From<MonthlyTotal> for MonthlyTotalResponse {
    fn from(m: MonthlyTotal) -> Self {
        Self {
            key: MonthKey {
                year: m.year,
                month: m.month,
            },
            total: m.total,
        }
    }
}

impl From<Analytics> for AnalyticsResponse {
    fn from(a: Analytics) -> Self {
        Self {
            category_totals: a.category_totals.into_iter().map(Into::into).collect(),
            monthly_totals: a.monthly_totals.into_iter().map(Into::into).collect(),
        }
    }
}
