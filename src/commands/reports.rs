// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::models::{MonthBucket, Transaction, TransactionType};
use crate::utils::{maybe_print_json, month_bounds, month_end, parse_date, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("history", sub)) => history(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Fetches one user's transactions in an inclusive date range, joined
/// with their category. This is the slice the aggregators consume.
pub fn fetch_range(
    conn: &Connection,
    user: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.description, t.amount, t.date, t.type, t.category_id, c.name, c.color, c.type
         FROM transactions t JOIN categories c ON t.category_id=c.id
         WHERE t.user_id=?1 AND t.date>=?2 AND t.date<=?3
         ORDER BY t.date, t.id",
    )?;
    let mut rows = stmt.query(params![user, start.to_string(), end.to_string()])?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let description: String = r.get(1)?;
        let amount_s: String = r.get(2)?;
        let date_s: String = r.get(3)?;
        let type_s: String = r.get(4)?;
        let category_id: i64 = r.get(5)?;
        let cat_name: String = r.get(6)?;
        let cat_color: String = r.get(7)?;
        let cat_type_s: String = r.get(8)?;

        let amount = amount_s
            .parse::<rust_decimal::Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transaction {}", amount_s, id))?;
        data.push(Transaction {
            id,
            description,
            amount,
            date: parse_date(&date_s)?,
            r#type: type_s.parse::<TransactionType>()?,
            category_id,
            category: crate::models::Category {
                id: category_id,
                name: cat_name,
                color: cat_color,
                r#type: cat_type_s.parse::<TransactionType>()?,
            },
        });
    }
    Ok(data)
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let month: u32 = *sub.get_one::<u32>("month").unwrap();
    let year: i32 = *sub.get_one::<i32>("year").unwrap();

    let (start, end) = month_bounds(year, month)?;
    let transactions = fetch_range(conn, user, start, end)?;
    let summary = aggregate::summarize(&transactions);

    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        println!(
            "{}",
            pretty_table(
                &["Expenses", "Incomes", "Balance"],
                vec![vec![
                    format!("{:.2}", summary.total_expenses),
                    format!("{:.2}", summary.total_incomes),
                    format!("{:.2}", summary.balance),
                ]],
            )
        );
        for (title, side) in [
            ("Expenses by category", &summary.expenses_by_category),
            ("Incomes by category", &summary.incomes_by_category),
        ] {
            let rows: Vec<Vec<String>> = side
                .iter()
                .map(|c| {
                    vec![
                        c.category_name.clone(),
                        c.category_color.clone(),
                        format!("{:.2}", c.amount),
                        format!("{:.2}", c.percentage),
                    ]
                })
                .collect();
            println!("{}", title);
            println!("{}", pretty_table(&["Category", "Color", "Amount", "%"], rows));
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct HistoryResponse {
    history: Vec<MonthBucket>,
}

fn history(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = sub.get_one::<String>("user").unwrap();
    let month: u32 = *sub.get_one::<u32>("month").unwrap();
    let year: i32 = *sub.get_one::<i32>("year").unwrap();
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&6);

    let (start_year, start_month) = aggregate::shift_month(year, month, -(months as i32 - 1));
    let start = NaiveDate::from_ymd_opt(start_year, start_month, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}-{:02}'", start_year, start_month))?;
    let end = month_end(year, month)?;

    let transactions = fetch_range(conn, user, start, end)?;
    let history = aggregate::build_series(&transactions, month, year, months);

    if !maybe_print_json(json_flag, jsonl_flag, &HistoryResponse { history: history.clone() })? {
        let rows: Vec<Vec<String>> = history
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    format!("{:.2}", b.income),
                    format!("{:.2}", b.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}
