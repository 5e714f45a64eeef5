//! Admin statistics.

use std::sync::Arc;

use atelier_core::models::{MonthlyCount, MONTH_NAMES};
use atelier_core::repository::StatsRepository;
use atelier_core::{AppError, AppResult};

pub struct AdminService {
    stats: Arc<dyn StatsRepository>,
}

impl AdminService {
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    /// Subscriber signups per calendar month of `year`, zero-filled so all
    /// twelve months are always present, January first.
    pub async fn monthly_signups(&self, year: i32) -> AppResult<Vec<MonthlyCount>> {
        if !(1970..=9999).contains(&year) {
            return Err(AppError::Validation(format!("Invalid year {year}")));
        }

        let rows = self.stats.monthly_signups(year).await?;
        let mut totals = [0i64; 12];
        for (month, total) in rows {
            if (1..=12).contains(&month) {
                totals[(month - 1) as usize] = total;
            }
        }

        Ok(MONTH_NAMES
            .into_iter()
            .zip(totals)
            .map(|(month, total)| MonthlyCount { month, total })
            .collect())
    }
}
