// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::aggregate::{build_series, month_label, shift_month};
use centavo::models::{Category, Transaction, TransactionType};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn tx(id: i64, amount: &str, r#type: TransactionType, date: &str) -> Transaction {
    Transaction {
        id,
        description: format!("tx {}", id),
        amount: amount.parse().unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type,
        category_id: 1,
        category: Category {
            id: 1,
            name: "cat1".into(),
            color: "#AABBCC".into(),
            r#type,
        },
    }
}

#[test]
fn window_length_and_ordering() {
    let series = build_series(&[], 3, 2024, 6);
    assert_eq!(series.len(), 6);
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["10/2023", "11/2023", "12/2023", "01/2024", "02/2024", "03/2024"]
    );
}

#[test]
fn january_window_rolls_over_year() {
    let series = build_series(&[], 1, 2025, 3);
    let labels: Vec<&str> = series.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["11/2024", "12/2024", "01/2025"]);
}

#[test]
fn empty_input_yields_zeroed_buckets() {
    for bucket in build_series(&[], 8, 2024, 6) {
        assert_eq!(bucket.income, Decimal::ZERO);
        assert_eq!(bucket.expense, Decimal::ZERO);
    }
}

#[test]
fn amounts_land_in_their_month() {
    let txs = vec![
        tx(1, "100", TransactionType::Income, "2024-01-15"),
        tx(2, "40", TransactionType::Expense, "2024-01-31"),
        tx(3, "25", TransactionType::Expense, "2024-03-01"),
    ];
    let series = build_series(&txs, 3, 2024, 3);
    assert_eq!(series[0].label, "01/2024");
    assert_eq!(series[0].income, Decimal::from(100));
    assert_eq!(series[0].expense, Decimal::from(40));
    // February had no activity
    assert_eq!(series[1].income, Decimal::ZERO);
    assert_eq!(series[1].expense, Decimal::ZERO);
    assert_eq!(series[2].expense, Decimal::from(25));
}

#[test]
fn out_of_window_transaction_is_dropped() {
    let txs = vec![
        tx(1, "100", TransactionType::Income, "2023-06-15"),
        tx(2, "10", TransactionType::Income, "2024-03-02"),
    ];
    let series = build_series(&txs, 3, 2024, 2);
    let total: Decimal = series.iter().map(|b| b.income).sum();
    assert_eq!(total, Decimal::from(10));
}

#[test]
fn shift_month_arithmetic() {
    assert_eq!(shift_month(2025, 1, -1), (2024, 12));
    assert_eq!(shift_month(2024, 12, 1), (2025, 1));
    assert_eq!(shift_month(2024, 6, -18), (2022, 12));
    assert_eq!(shift_month(2024, 6, 0), (2024, 6));
}

#[test]
fn month_label_is_zero_padded() {
    assert_eq!(month_label(2024, 3), "03/2024");
    assert_eq!(month_label(2024, 12), "12/2024");
}
