//! Terminal rendering of listing views

use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use jobboard_core::application::{FetchFailure, ListingStatus, ViewModel};
use jobboard_core::constants::{LANDING_SKILL_CHIPS, LISTING_SKILL_CHIPS};
use jobboard_core::domain::Job;
use jobboard_core::port::TimeProvider;
use jobboard_core::presentation::{
    format_relative_time, format_salary_range, group_thousands, match_badge, page_indicator,
    results_headline, skill_chips,
};

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Company")]
    company: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(rename = "Match")]
    badge: String,
    #[tabled(rename = "Skills")]
    skills: String,
}

impl JobRow {
    fn from_job(job: &Job, clock: &dyn TimeProvider) -> Self {
        let chips = skill_chips(job.skills(), LISTING_SKILL_CHIPS);
        let mut skills = chips.shown.join(", ");
        if let Some(more) = chips.overflow_chip() {
            skills.push_str(&format!(" {more}"));
        }

        Self {
            id: job.id.to_string(),
            title: job.title.clone(),
            company: job.company.name.clone(),
            location: format!("{} ({})", job.location, job.location_type.label()),
            salary: format_salary_range(job.salary_min, job.salary_max).unwrap_or_default(),
            posted: format_relative_time(job.posted_date, clock),
            badge: match_badge(job).unwrap_or_default(),
            skills,
        }
    }
}

pub fn failure_line(failure: &FetchFailure) -> String {
    format!("{}: {}", failure.category, failure.message)
}

/// Full listing: headline, table, pagination line
pub fn listing(vm: &ViewModel, clock: &dyn TimeProvider) -> String {
    let mut out = String::new();

    match vm.status() {
        ListingStatus::Loading => {
            out.push_str(&format!("{}\n", "Loading...".dimmed()));
            return out;
        }
        ListingStatus::Error => {
            if let Some(failure) = &vm.error {
                out.push_str(&format!(
                    "{} {}\n",
                    "✗ Could not load jobs.".red().bold(),
                    failure_line(failure)
                ));
            }
            return out;
        }
        ListingStatus::Empty => {
            out.push_str(&format!("{}\n", "No jobs found".yellow().bold()));
            out.push_str("Try adjusting your search criteria or check back later.\n");
            return out;
        }
        ListingStatus::Ready => {}
    }

    out.push_str(&format!("{}\n", results_headline(vm.total).cyan().bold()));
    if let Some(failure) = &vm.error {
        // previous page still shown
        out.push_str(&format!("{} {}\n", "! Refresh failed:".yellow(), failure_line(failure)));
    }

    let rows: Vec<JobRow> = vm.jobs.iter().map(|job| JobRow::from_job(job, clock)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    out.push_str(&format!("{table}\n"));

    if vm.shows_pagination() {
        let prev = if vm.has_previous { "◀ prev" } else { "      " };
        let next = if vm.has_next { "next ▶" } else { "" };
        out.push_str(&format!(
            "{}  {}  {}\n",
            prev.dimmed(),
            page_indicator(vm.page, vm.total_pages),
            next.dimmed()
        ));
    }
    out
}

/// Landing page cards with the "View all" footer
pub fn landing(vm: &ViewModel, clock: &dyn TimeProvider) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format!("{} opportunities available", group_thousands(vm.total))
            .cyan()
            .bold()
    ));

    if vm.jobs.is_empty() {
        if let Some(failure) = &vm.error {
            out.push_str(&format!("{} {}\n", "✗".red(), failure_line(failure)));
        } else {
            out.push_str(&format!("{}\n", "No jobs found".yellow().bold()));
        }
        return out;
    }

    for job in &vm.jobs {
        out.push_str(&card(job, clock));
        out.push('\n');
    }
    out.push_str(&format!(
        "{}\n",
        format!("View all {} jobs  →  jobboard list", group_thousands(vm.total)).bold()
    ));
    out
}

fn card(job: &Job, clock: &dyn TimeProvider) -> String {
    let mut title = job.title.bold().to_string();
    if let Some(badge) = match_badge(job) {
        title.push_str(&format!("  {}", badge.green()));
    }

    let mut meta = vec![job.location.clone(), job.location_type.label().to_string()];
    if let Some(salary) = format_salary_range(job.salary_min, job.salary_max) {
        meta.push(salary.green().to_string());
    }
    meta.push(format_relative_time(job.posted_date, clock).dimmed().to_string());

    let mut out = format!("{title}\n  {}\n  {}\n", job.company.name, meta.join("  ·  "));

    let chips = skill_chips(job.skills(), LANDING_SKILL_CHIPS);
    if !chips.shown.is_empty() {
        let mut line: Vec<String> = chips.shown.iter().map(|s| format!("[{s}]")).collect();
        if let Some(more) = chips.overflow_more() {
            line.push(more);
        }
        out.push_str(&format!("  {}\n", line.join(" ")));
    }
    out
}

/// Detail view of the selected job
pub fn detail(job: &Job, clock: &dyn TimeProvider) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", job.title.bold()));
    out.push_str(&format!("{}\n", job.company.name));
    out.push_str(&format!("{} ({})\n", job.location, job.location_type.label()));
    if let Some(salary) = format_salary_range(job.salary_min, job.salary_max) {
        out.push_str(&format!("{}\n", salary.green()));
    }
    if let Some(badge) = match_badge(job) {
        out.push_str(&format!("{}\n", badge.green()));
    }
    out.push_str(&format!(
        "Posted {}\n",
        format_relative_time(job.posted_date, clock)
    ));

    if let Some(description) = &job.description {
        out.push_str(&format!("\n{}\n{}\n", "Description".bold(), description));
    }
    if !job.skills().is_empty() {
        out.push_str(&format!(
            "\n{}\n{}\n",
            "Required Skills".bold(),
            job.skills().join(", ")
        ));
    }
    if !job.source_url.is_empty() {
        out.push_str(&format!("\nApply: {}\n", job.source_url.underline()));
    }
    out
}
