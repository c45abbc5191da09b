// Presentation helpers - pure formatting over domain values
//
// No terminal or markup concerns here; renderers decide how to style the
// strings.

use chrono::{DateTime, Utc};

use crate::constants::MATCH_BADGE_THRESHOLD;
use crate::domain::Job;
use crate::port::TimeProvider;

/// Match badge text, e.g. `"87% Match"`.
///
/// The threshold applies to the raw score; rounding happens only for display,
/// so 69.6 gets no badge while 70.4 shows `"70% Match"`.
pub fn match_badge(job: &Job) -> Option<String> {
    let score = job.total_score()?;
    if score >= MATCH_BADGE_THRESHOLD {
        Some(format!("{}% Match", score.round() as i64))
    } else {
        None
    }
}

/// Salary range for a card, or `None` when neither bound is known
pub fn format_salary_range(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) if min == max => Some(format_amount(min)),
        (Some(min), Some(max)) => Some(format!("{} - {}", format_amount(min), format_amount(max))),
        (Some(min), None) => Some(format!("From {}", format_amount(min))),
        (None, Some(max)) => Some(format!("Up to {}", format_amount(max))),
        (None, None) => None,
    }
}

fn format_amount(amount: f64) -> String {
    if amount >= 1000.0 {
        format!("${}k", (amount / 1000.0).round() as i64)
    } else {
        format!("${}", amount.round() as i64)
    }
}

/// Human-readable age of a posting relative to `clock`
pub fn format_relative_time(posted: Option<DateTime<Utc>>, clock: &dyn TimeProvider) -> String {
    let Some(posted) = posted else {
        return "recently".to_string();
    };

    let seconds = (clock.now() - posted).num_seconds();
    if seconds < 60 {
        // future timestamps too
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        ago(minutes, "minute")
    } else if hours < 24 {
        ago(hours, "hour")
    } else if days < 7 {
        ago(days, "day")
    } else if days < 30 {
        ago(days / 7, "week")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Skill chips for one card: the first `limit` skills plus how many were cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillChips<'a> {
    pub shown: &'a [String],
    pub overflow: usize,
}

impl SkillChips<'_> {
    /// Overflow chip on the full listing, e.g. `"+3"`
    pub fn overflow_chip(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{}", self.overflow))
    }

    /// Overflow chip on the landing page, e.g. `"+3 more"`
    pub fn overflow_more(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

pub fn skill_chips(skills: &[String], limit: usize) -> SkillChips<'_> {
    let shown = &skills[..skills.len().min(limit)];
    SkillChips {
        shown,
        overflow: skills.len() - shown.len(),
    }
}

/// Thousands-separated count, e.g. `1,234`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Listing headline, e.g. `"1,234 jobs found"`
pub fn results_headline(total: u64) -> String {
    format!("{} jobs found", group_thousands(total))
}

/// `"Page x of y"` line under the pagination controls
pub fn page_indicator(page: u32, total_pages: u32) -> String {
    format!("Page {page} of {total_pages}")
}
