use crate::domain::TaskRecord;
use crate::persistence::{atomic_write, scan_store, DocumentStore};
use crate::report::stats::{calculate_counter_stats, calculate_habit_stats, calculate_quadrant_stats};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// How far back "recently modified" reaches
pub const REPORT_WINDOW_DAYS: u64 = 7;

/// Format minutes as "Xh Ym" or "Xm" for display
pub fn format_minutes(total_mins: u32) -> String {
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Documents modified within the report window, newest first
pub fn recent_documents(store: &dyn DocumentStore, now: SystemTime) -> Result<Vec<(PathBuf, SystemTime)>> {
    let window = Duration::from_secs(REPORT_WINDOW_DAYS * 24 * 60 * 60);
    let cutoff = now.checked_sub(window).unwrap_or(SystemTime::UNIX_EPOCH);

    let mut recent = Vec::new();
    for path in store.list_documents()? {
        match store.modified_time(&path) {
            Ok(modified) if modified >= cutoff => recent.push((path, modified)),
            Ok(_) => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "no modification time"),
        }
    }

    recent.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(recent)
}

/// Render the weekly summary as markdown
pub fn render_report(tasks: &[TaskRecord], recent: &[(PathBuf, SystemTime)], today: NaiveDate) -> String {
    let habits = calculate_habit_stats(tasks, today);
    let counters = calculate_counter_stats(tasks);
    let quadrants = calculate_quadrant_stats(tasks);

    let mut report = String::new();

    // Header
    report.push_str(&format!("# Weekly Report - {}\n\n", today));

    // Summary Section
    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Open Tasks:** {}\n", tasks.len()));
    report.push_str(&format!(
        "- **Habits:** {} ({} daily, {} weekly)\n",
        habits.habit_count, habits.daily_count, habits.weekly_count
    ));
    report.push_str(&format!(
        "- **Completed Today:** {}/{} habits\n",
        habits.done_today, habits.habit_count
    ));
    report.push_str(&format!(
        "- **Documents Modified (last {} days):** {}\n\n",
        REPORT_WINDOW_DAYS,
        recent.len()
    ));

    // Matrix Section
    report.push_str("## Matrix\n\n");
    report.push_str("| Quadrant | Tasks | Planned |\n");
    report.push_str("|----------|-------|---------|\n");
    for q in &quadrants {
        report.push_str(&format!(
            "| {} ({}) | {} | {} |\n",
            q.quadrant.name(),
            q.quadrant.label(),
            q.task_count,
            format_minutes(q.planned_minutes)
        ));
    }
    report.push('\n');

    // Streaks Section
    if habits.daily_count > 0 {
        report.push_str("## Streaks\n\n");
        report.push_str(&format!("- **Active Streaks:** {}/{}\n", habits.active_streaks, habits.daily_count));
        if let Some((title, streak)) = &habits.best_current {
            report.push_str(&format!("- **Best Current:** {} ({} days)\n", title, streak));
        }
        if let Some((title, streak)) = &habits.best_max {
            report.push_str(&format!("- **Longest Ever:** {} ({} days)\n", title, streak));
        }
        report.push('\n');
    }

    // Counters Section
    if counters.counter_count > 0 {
        report.push_str("## Counters\n\n");
        report.push_str(&format!(
            "- **Total:** {} across {} counters\n",
            counters.total, counters.counter_count
        ));
        if let Some((title, count)) = &counters.highest {
            report.push_str(&format!("- **Highest:** {} ({})\n", title, count));
        }
        if counters.negative_count > 0 {
            report.push_str(&format!("- **Negative:** {}\n", counters.negative_count));
        }
        report.push('\n');
    }

    // Recent documents
    if !recent.is_empty() {
        report.push_str("## Recently Modified\n\n");
        for (path, modified) in recent {
            let modified: DateTime<Local> = (*modified).into();
            report.push_str(&format!("- {} ({})\n", path.display(), modified.format("%Y-%m-%d %H:%M")));
        }
        report.push('\n');
    }

    report
}

/// Scan the store, write the weekly summary to `output` and return its path
pub fn generate_report(store: &dyn DocumentStore, today: NaiveDate, output: &Path) -> Result<PathBuf> {
    let tasks = scan_store(store).context("Failed to scan documents")?;
    let recent = recent_documents(store, SystemTime::now())?;
    let report = render_report(&tasks, &recent, today);

    atomic_write(output, &report).with_context(|| format!("Failed to write report to {}", output.display()))?;
    tracing::info!(path = %output.display(), "report written");
    Ok(output.to_path_buf())
}
