// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::aggregate;
use centavo::commands::reports::fetch_range;
use centavo::utils::month_bounds;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;
        CREATE TABLE categories(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT NOT NULL,
            type TEXT NOT NULL CHECK(type IN ('expense','income')),
            UNIQUE(name, type)
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            description TEXT NOT NULL,
            amount TEXT NOT NULL,
            date TEXT NOT NULL,
            type TEXT NOT NULL CHECK(type IN ('expense','income')),
            category_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES categories(id) ON DELETE CASCADE
        );
        "#,
    )
    .unwrap();
    conn.execute(
        "INSERT INTO categories(name,color,type) VALUES
         ('Groceries','#FF6B6B','expense'),
         ('Rent','#45B7D1','expense'),
         ('Salary','#1DD3B0','income')",
        [],
    )
    .unwrap();
    conn
}

fn insert_tx(conn: &Connection, user: &str, desc: &str, amount: &str, date: &str, ty: &str, cat: i64) {
    conn.execute(
        "INSERT INTO transactions(user_id,description,amount,date,type,category_id)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![user, desc, amount, date, ty, cat],
    )
    .unwrap();
}

#[test]
fn fetch_range_filters_user_and_dates() {
    let conn = setup();
    insert_tx(&conn, "ana", "veggies", "42.50", "2024-03-05", "expense", 1);
    insert_tx(&conn, "ana", "paycheck", "2000", "2024-03-25", "income", 3);
    insert_tx(&conn, "ana", "out of range", "99", "2024-04-01", "expense", 1);
    insert_tx(&conn, "bob", "someone else", "77", "2024-03-10", "expense", 2);

    let (start, end) = month_bounds(2024, 3).unwrap();
    let txs = fetch_range(&conn, "ana", start, end).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].description, "veggies");
    assert_eq!(txs[0].category.name, "Groceries");
    assert_eq!(txs[0].category.color, "#FF6B6B");
    assert_eq!(txs[1].amount, Decimal::from(2000));
}

#[test]
fn summary_query_over_store() {
    let conn = setup();
    insert_tx(&conn, "ana", "veggies", "100", "2024-03-05", "expense", 1);
    insert_tx(&conn, "ana", "more veggies", "50", "2024-03-20", "expense", 1);
    insert_tx(&conn, "ana", "paycheck", "200", "2024-03-10", "income", 3);

    let (start, end) = month_bounds(2024, 3).unwrap();
    let txs = fetch_range(&conn, "ana", start, end).unwrap();
    let s = aggregate::summarize(&txs);

    assert_eq!(s.total_expenses, Decimal::from(150));
    assert_eq!(s.total_incomes, Decimal::from(200));
    assert_eq!(s.balance, Decimal::from(50));
    assert_eq!(s.expenses_by_category.len(), 1);
    assert_eq!(s.expenses_by_category[0].category_name, "Groceries");
    assert_eq!(s.expenses_by_category[0].percentage, Decimal::from(100));
}

#[test]
fn summary_query_with_no_transactions_is_not_an_error() {
    let conn = setup();
    let (start, end) = month_bounds(2024, 3).unwrap();
    let txs = fetch_range(&conn, "ana", start, end).unwrap();
    let s = aggregate::summarize(&txs);
    assert_eq!(s.balance, Decimal::ZERO);
    assert!(s.expenses_by_category.is_empty());
}

#[test]
fn history_query_over_store_with_gap_month() {
    let conn = setup();
    insert_tx(&conn, "ana", "rent", "800", "2024-01-02", "expense", 2);
    insert_tx(&conn, "ana", "paycheck", "2000", "2024-01-25", "income", 3);
    // nothing in February
    insert_tx(&conn, "ana", "veggies", "60", "2024-03-07", "expense", 1);

    let months = 3usize;
    let (start_year, start_month) = aggregate::shift_month(2024, 3, -(months as i32 - 1));
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 1).unwrap();
    let end = centavo::utils::month_end(2024, 3).unwrap();

    let txs = fetch_range(&conn, "ana", start, end).unwrap();
    let series = aggregate::build_series(&txs, 3, 2024, months);

    assert_eq!(series.len(), 3);
    assert_eq!(series[0].label, "01/2024");
    assert_eq!(series[0].income, Decimal::from(2000));
    assert_eq!(series[0].expense, Decimal::from(800));
    assert_eq!(series[1].label, "02/2024");
    assert_eq!(series[1].income, Decimal::ZERO);
    assert_eq!(series[1].expense, Decimal::ZERO);
    assert_eq!(series[2].label, "03/2024");
    assert_eq!(series[2].expense, Decimal::from(60));
}
