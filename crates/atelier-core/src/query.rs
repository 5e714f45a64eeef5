//! Typed query predicates and the search-filter builder.
//!
//! List endpoints take a free-text `search` term and an optional `date`
//! parameter. A search term that is literally a `YYYY-MM-DD` date is treated
//! as a day-range filter on `created_at` instead of a substring match. The
//! result is a tagged [`Predicate`] tree; only the database crate knows how
//! to turn it into SQL.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};

/// Query predicate over one entity table. Field names always come from the
/// entity's compile-time search-field list, never from request input.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every record
    All,
    /// Case-insensitive substring match against any of `fields`
    TextMatch {
        fields: &'static [&'static str],
        term: String,
    },
    /// `created_at` in the half-open range `[start, end)`
    CreatedWithin {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Exact match on one column (e.g. a status flag)
    FieldEquals {
        field: &'static str,
        value: String,
    },
    /// Conjunction of sub-predicates
    And(Vec<Predicate>),
}

impl Predicate {
    /// Combine with another predicate, flattening `All` away.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::And(mut ps), p) => {
                ps.push(p);
                Predicate::And(ps)
            }
            (a, b) => Predicate::And(vec![a, b]),
        }
    }
}

/// Sort order for list queries. Newest-first is the default everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    /// Accepts the conventional `-created_at` / `created_at` request forms.
    pub fn parse(s: &str) -> SortOrder {
        match s.trim() {
            "created_at" | "createdAt" | "oldest" => SortOrder::OldestFirst,
            _ => SortOrder::NewestFirst,
        }
    }
}

fn date_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static regex"))
}

fn day_range(date: NaiveDate) -> Predicate {
    let start = date
        .and_hms_opt(0, 0, 0)
        .expect("midnight exists")
        .and_utc();
    Predicate::CreatedWithin {
        start,
        end: start + Duration::days(1),
    }
}

fn parse_day(raw: &str) -> AppResult<NaiveDate> {
    if !date_literal_re().is_match(raw) {
        return Err(AppError::Validation(format!(
            "Invalid date '{raw}', expected YYYY-MM-DD"
        )));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Builds list-endpoint predicates from request parameters.
pub struct Filter;

impl Filter {
    /// Build a predicate from a free-text `search` term and an optional
    /// `date` parameter, matching text against `fields`.
    ///
    /// A search term that is itself a `YYYY-MM-DD` literal becomes a
    /// day-range filter on `created_at`. Otherwise a non-empty term becomes a
    /// substring match, and a supplied `date` is intersected with it. An
    /// empty search term is never treated as a date and adds no text
    /// constraint.
    pub fn build(
        search: Option<&str>,
        date: Option<&str>,
        fields: &'static [&'static str],
    ) -> AppResult<Predicate> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        let date = date.map(str::trim).filter(|s| !s.is_empty());

        if let Some(term) = search {
            if date_literal_re().is_match(term) {
                // Date-shaped search wins over everything else.
                return Ok(day_range(parse_day(term)?));
            }

            let text = Predicate::TextMatch {
                fields,
                term: term.to_string(),
            };
            return Ok(match date {
                Some(raw) => text.and(day_range(parse_day(raw)?)),
                None => text,
            });
        }

        match date {
            Some(raw) => Ok(day_range(parse_day(raw)?)),
            None => Ok(Predicate::All),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["title"];

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn date_shaped_search_becomes_day_range() {
        let pred = Filter::build(Some("2024-03-05"), None, FIELDS).unwrap();
        assert_eq!(
            pred,
            Predicate::CreatedWithin {
                start: utc(2024, 3, 5),
                end: utc(2024, 3, 6),
            }
        );
    }

    #[test]
    fn plain_search_becomes_text_match() {
        let pred = Filter::build(Some("hello"), None, FIELDS).unwrap();
        assert_eq!(
            pred,
            Predicate::TextMatch {
                fields: FIELDS,
                term: "hello".to_string(),
            }
        );
    }

    #[test]
    fn empty_search_with_date_is_pure_date_filter() {
        let pred = Filter::build(Some(""), Some("2024-01-01"), FIELDS).unwrap();
        assert_eq!(
            pred,
            Predicate::CreatedWithin {
                start: utc(2024, 1, 1),
                end: utc(2024, 1, 2),
            }
        );
    }

    #[test]
    fn search_and_date_intersect() {
        let pred = Filter::build(Some("hello"), Some("2024-01-01"), FIELDS).unwrap();
        assert_eq!(
            pred,
            Predicate::And(vec![
                Predicate::TextMatch {
                    fields: FIELDS,
                    term: "hello".to_string(),
                },
                Predicate::CreatedWithin {
                    start: utc(2024, 1, 1),
                    end: utc(2024, 1, 2),
                },
            ])
        );
    }

    #[test]
    fn no_filters_matches_all() {
        assert_eq!(Filter::build(None, None, FIELDS).unwrap(), Predicate::All);
        assert_eq!(
            Filter::build(Some("   "), None, FIELDS).unwrap(),
            Predicate::All
        );
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(Filter::build(None, Some("yesterday"), FIELDS).is_err());
        // Date-shaped but impossible
        assert!(Filter::build(Some("2024-13-45"), None, FIELDS).is_err());
    }

    #[test]
    fn near_date_search_stays_text() {
        // Not an exact YYYY-MM-DD literal, so substring semantics apply.
        let pred = Filter::build(Some("2024-03-05 notes"), None, FIELDS).unwrap();
        assert!(matches!(pred, Predicate::TextMatch { .. }));
    }

    #[test]
    fn and_flattens_all() {
        assert_eq!(
            Predicate::All.and(Predicate::All),
            Predicate::All
        );
        let text = Predicate::TextMatch {
            fields: FIELDS,
            term: "x".into(),
        };
        assert_eq!(Predicate::All.and(text.clone()), text);
    }
}
