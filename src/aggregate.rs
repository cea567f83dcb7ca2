// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a transaction slice: a categorized monthly
//! summary and a rolling multi-month income/expense series. Callers
//! fetch the date-filtered slice; nothing here touches the database.

use crate::models::{CategorySummary, MonthBucket, MonthlySummary, Transaction, TransactionType};
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::HashMap;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Groups one side's transactions by category, preserving the order in
/// which categories were first seen so equal-amount ties stay stable.
struct SideAccumulator {
    entries: Vec<CategorySummary>,
    index: HashMap<i64, usize>,
}

impl SideAccumulator {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn add(&mut self, t: &Transaction) {
        let i = *self.index.entry(t.category_id).or_insert_with(|| {
            self.entries.push(CategorySummary {
                category_id: t.category_id,
                category_name: t.category.name.clone(),
                category_color: t.category.color.clone(),
                amount: Decimal::ZERO,
                percentage: Decimal::ZERO,
            });
            self.entries.len() - 1
        });
        self.entries[i].amount += t.amount;
    }

    /// Percentages against `side_total`, then descending by amount.
    /// A zero side total yields 0% rather than an undefined value.
    fn into_sorted(mut self, side_total: Decimal) -> Vec<CategorySummary> {
        for e in &mut self.entries {
            e.percentage = if side_total.is_zero() {
                Decimal::ZERO
            } else {
                (e.amount / side_total * HUNDRED).round_dp(2)
            };
        }
        // sort_by is stable; first-encountered order survives ties
        self.entries.sort_by(|a, b| b.amount.cmp(&a.amount));
        self.entries
    }
}

/// Builds the monthly summary for a slice of transactions that the
/// caller has already narrowed to a single calendar month.
pub fn summarize(transactions: &[Transaction]) -> MonthlySummary {
    let mut total_expenses = Decimal::ZERO;
    let mut total_incomes = Decimal::ZERO;
    let mut expenses = SideAccumulator::new();
    let mut incomes = SideAccumulator::new();

    for t in transactions {
        match t.r#type {
            TransactionType::Expense => {
                expenses.add(t);
                total_expenses += t.amount;
            }
            TransactionType::Income => {
                incomes.add(t);
                total_incomes += t.amount;
            }
        }
    }

    MonthlySummary {
        total_expenses,
        total_incomes,
        balance: (total_incomes - total_expenses).round_dp(2),
        expenses_by_category: expenses.into_sorted(total_expenses),
        incomes_by_category: incomes.into_sorted(total_incomes),
    }
}

/// Builds `window` month buckets ending at `target_month/target_year`,
/// oldest first, and pours the transactions into them by month label.
/// A transaction outside every bucket is dropped; the caller's date
/// filter is what keeps that from happening.
pub fn build_series(
    transactions: &[Transaction],
    target_month: u32,
    target_year: i32,
    window: usize,
) -> Vec<MonthBucket> {
    let mut buckets: Vec<MonthBucket> = (0..window)
        .map(|i| {
            let back = (window - 1 - i) as i32;
            let (y, m) = shift_month(target_year, target_month, -back);
            MonthBucket {
                label: month_label(y, m),
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            }
        })
        .collect();

    for t in transactions {
        let label = month_label(t.date.year(), t.date.month());
        if let Some(bucket) = buckets.iter_mut().find(|b| b.label == label) {
            match t.r#type {
                TransactionType::Income => bucket.income += t.amount,
                TransactionType::Expense => bucket.expense += t.amount,
            }
        }
    }

    buckets
}

/// Calendar month arithmetic with year rollover, e.g. 2025-01 minus
/// one month is 2024-12.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let months = year * 12 + month as i32 - 1 + delta;
    (months.div_euclid(12), (months.rem_euclid(12) + 1) as u32)
}

pub fn month_label(year: i32, month: u32) -> String {
    format!("{:02}/{:04}", month, year)
}
