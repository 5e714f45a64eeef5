//! Predicate → SQL translation.
//!
//! The only place where the typed [`Predicate`] tree meets the query
//! language. Field names in predicates come from compile-time constants on
//! the entities; user input is only ever bound, never spliced.

use atelier_core::query::{Predicate, SortOrder};
use sqlx::{Postgres, QueryBuilder};

/// Escape LIKE metacharacters so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_condition(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::All => {
            qb.push("TRUE");
        }
        Predicate::TextMatch { fields, term } => {
            let pattern = format!("%{}%", escape_like(term));
            qb.push("(");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(*field).push(" ILIKE ").push_bind(pattern.clone());
            }
            qb.push(")");
        }
        Predicate::CreatedWithin { start, end } => {
            qb.push("(created_at >= ")
                .push_bind(*start)
                .push(" AND created_at < ")
                .push_bind(*end)
                .push(")");
        }
        Predicate::FieldEquals { field, value } => {
            // Cast so enum-typed columns compare against the bound text.
            qb.push(*field)
                .push("::text = ")
                .push_bind(value.clone());
        }
        Predicate::And(parts) => {
            qb.push("(");
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    qb.push(" AND ");
                }
                push_condition(qb, part);
            }
            qb.push(")");
        }
    }
}

/// Append a `WHERE` clause for `predicate`, or nothing when it matches all.
pub fn push_where(qb: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    if matches!(predicate, Predicate::All) {
        return;
    }
    qb.push(" WHERE ");
    push_condition(qb, predicate);
}

/// Append ordering and the offset/limit window.
pub fn push_order_page(
    qb: &mut QueryBuilder<'_, Postgres>,
    sort: SortOrder,
    offset: u64,
    limit: u32,
) {
    qb.push(" ORDER BY created_at ");
    qb.push(match sort {
        SortOrder::NewestFirst => "DESC",
        SortOrder::OldestFirst => "ASC",
    });
    qb.push(" LIMIT ")
        .push_bind(limit as i64)
        .push(" OFFSET ")
        .push_bind(offset as i64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sql_for(predicate: &Predicate) -> String {
        let mut qb = QueryBuilder::new("SELECT * FROM blogs");
        push_where(&mut qb, predicate);
        qb.sql().to_string()
    }

    #[test]
    fn all_renders_no_where_clause() {
        assert_eq!(sql_for(&Predicate::All), "SELECT * FROM blogs");
    }

    #[test]
    fn text_match_ors_each_field() {
        let pred = Predicate::TextMatch {
            fields: &["title", "description"],
            term: "hello".into(),
        };
        let sql = sql_for(&pred);
        assert_eq!(
            sql,
            "SELECT * FROM blogs WHERE (title ILIKE $1 OR description ILIKE $2)"
        );
    }

    #[test]
    fn date_range_is_half_open() {
        let pred = Predicate::CreatedWithin {
            start: Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap(),
        };
        let sql = sql_for(&pred);
        assert_eq!(
            sql,
            "SELECT * FROM blogs WHERE (created_at >= $1 AND created_at < $2)"
        );
    }

    #[test]
    fn and_joins_with_parens() {
        let pred = Predicate::And(vec![
            Predicate::TextMatch {
                fields: &["title"],
                term: "x".into(),
            },
            Predicate::FieldEquals {
                field: "status",
                value: "new".into(),
            },
        ]);
        let sql = sql_for(&pred);
        assert_eq!(
            sql,
            "SELECT * FROM blogs WHERE ((title ILIKE $1) AND status::text = $2)"
        );
    }

    #[test]
    fn like_metacharacters_match_literally() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn order_page_binds_window() {
        let mut qb = QueryBuilder::new("SELECT * FROM blogs");
        push_order_page(&mut qb, SortOrder::NewestFirst, 20, 10);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM blogs ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
    }
}
