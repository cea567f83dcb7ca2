// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            let r#type = sub
                .get_one::<String>("type")
                .unwrap()
                .parse::<TransactionType>()?;
            conn.execute(
                "INSERT INTO categories(name, color, type) VALUES (?1, ?2, ?3)",
                params![name, color, r#type.as_str()],
            )?;
            println!("Added {} category '{}'", r#type.as_str(), name);
        }
        Some(("list", sub)) => {
            let mut sql =
                String::from("SELECT name, color, type FROM categories");
            let mut data = Vec::new();
            if let Some(ty) = sub.get_one::<String>("type") {
                let r#type = ty.parse::<TransactionType>()?;
                sql.push_str(" WHERE type=?1 ORDER BY name");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map(params![r#type.as_str()], |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                    ))
                })?;
                for row in rows {
                    let (n, c, t) = row?;
                    data.push(vec![n, c, t]);
                }
            } else {
                sql.push_str(" ORDER BY type, name");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt.query_map([], |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                    ))
                })?;
                for row in rows {
                    let (n, c, t) = row?;
                    data.push(vec![n, c, t]);
                }
            }
            println!("{}", pretty_table(&["Category", "Color", "Type"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let r#type = sub
                .get_one::<String>("type")
                .unwrap()
                .parse::<TransactionType>()?;
            conn.execute(
                "DELETE FROM categories WHERE name=?1 AND type=?2",
                params![name, r#type.as_str()],
            )?;
            println!("Removed {} category '{}'", r#type.as_str(), name);
        }
        _ => {}
    }
    Ok(())
}
