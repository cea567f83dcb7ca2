// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::utils::{
    id_for_category, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let r#type = sub
        .get_one::<String>("type")
        .unwrap()
        .parse::<TransactionType>()?;
    let category = sub.get_one::<String>("category").unwrap();

    if amount <= Decimal::ZERO {
        bail!("Amount must be positive, got '{}'", amount);
    }
    // A transaction can only use a category of its own side.
    let category_id = id_for_category(conn, category, r#type)?;

    conn.execute(
        "INSERT INTO transactions(user_id, description, amount, date, type, category_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user,
            description,
            amount.to_string(),
            date.to_string(),
            r#type.as_str(),
            category_id
        ],
    )?;
    println!(
        "Recorded {} {} '{}' on {} ({})",
        r#type.as_str(),
        amount,
        description,
        date,
        category
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Description", "Amount", "Type", "Category"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id: i64 = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Transaction {} not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub description: String,
    pub amount: String,
    pub r#type: String,
    pub category: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.date, t.description, t.amount, t.type, c.name FROM transactions t LEFT JOIN categories c ON t.category_id=c.id WHERE t.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![sub.get_one::<String>("user").unwrap().clone()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(parse_month(month)?);
    }
    if let Some(ty) = sub.get_one::<String>("type") {
        sql.push_str(" AND t.type=?");
        params_vec.push(ty.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let description: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let r#type: String = r.get(3)?;
        let category: Option<String> = r.get(4)?;
        data.push(TransactionRow {
            date,
            description,
            amount,
            r#type,
            category: category.unwrap_or_default(),
        });
    }
    Ok(data)
}
