// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid transaction type '{0}', expected 'expense' or 'income'")]
pub struct ParseTransactionTypeError(String);

impl FromStr for TransactionType {
    type Err = ParseTransactionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(ParseTransactionTypeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub r#type: TransactionType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub category_id: i64,
    pub category: Category,
}

/// One category's share of a side (expense or income) within a month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_expenses: Decimal,
    pub total_incomes: Decimal,
    pub balance: Decimal,
    pub expenses_by_category: Vec<CategorySummary>,
    pub incomes_by_category: Vec<CategorySummary>,
}

/// One month's income/expense totals within a historical series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthBucket {
    pub label: String, // MM/YYYY
    pub income: Decimal,
    pub expense: Decimal,
}
