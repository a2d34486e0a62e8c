//! Terminal rendering for tracking and dashboard output.

use civic_desk_dashboard::presenter::{RECENT_LIMIT, recent_rows};
use civic_desk_dashboard_models::{AggregateSnapshot, DashboardData, StatusCounts};
use civic_desk_records_models::NormalizedRecord;
use console::style;

const BAR_WIDTH: u64 = 20;

/// Renders one tracked complaint with its status timeline.
pub fn render_tracked(record: &NormalizedRecord) {
    println!();
    println!(
        "{} {}",
        style(&record.id).bold(),
        style(&record.title).bold()
    );
    println!(
        "  Status: {}   Priority: {}   Submitted: {}",
        style(record.status.to_string()).cyan(),
        record.priority,
        record.submitted_display()
    );
    println!(
        "  Category: {}   Ward: {}   Assigned: {}",
        record.category, record.ward, record.assignee
    );
    if !record.description.is_empty() {
        println!("  {}", record.description);
    }

    if record.updates.is_empty() {
        return;
    }
    println!();
    println!("{}", style("Timeline").bold());
    for update in &record.updates {
        let when = update
            .at
            .map_or_else(|| "Not available".to_owned(), |dt| {
                dt.format("%d/%m/%Y %H:%M").to_string()
            });
        println!(
            "  {} {} — {} ({})",
            style(when).dim(),
            style(update.status.to_string()).cyan(),
            update.message,
            update.officer
        );
    }
}

/// Renders the full aggregate snapshot plus the recent-complaints list.
pub fn render_dashboard(snapshot: &AggregateSnapshot, data: &DashboardData) {
    println!();
    println!("{}", style("Overview").bold());
    render_counts("Complaints", snapshot.complaints);
    render_counts("Verifications", snapshot.verifications);
    render_counts("Approvals", snapshot.approvals);
    render_counts("Surveys", snapshot.surveys);
    render_counts("Violations", snapshot.violations);

    println!();
    println!(
        "Average resolution time: {}",
        style(snapshot.avg_resolution.to_string()).bold()
    );
    println!(
        "Compliance: {}%   Active officers: {}   Departments: {}",
        snapshot.compliance_percent, snapshot.active_officers, snapshot.departments
    );

    if !snapshot.top_wards.is_empty() {
        println!();
        println!("{}", style("Ward-wise violation distribution").bold());
        let max = snapshot
            .top_wards
            .iter()
            .map(|t| t.count)
            .max()
            .unwrap_or(0);
        for tally in &snapshot.top_wards {
            println!(
                "  Ward {:<8} {} {}",
                tally.ward,
                bar(tally.count, max),
                tally.count
            );
        }
    }

    if snapshot.severity.total() > 0 {
        println!();
        println!("{}", style("Severity breakdown").bold());
        for (label, count) in [
            ("High", snapshot.severity.high),
            ("Medium", snapshot.severity.medium),
            ("Low", snapshot.severity.low),
        ] {
            let percent = snapshot.severity.bar_percent(count);
            println!(
                "  {label:<8} {} {count}",
                bar(u64::from(percent), 100)
            );
        }
    }

    if !snapshot.top_categories.is_empty() {
        println!();
        println!("{}", style("Top complaint categories").bold());
        for category in &snapshot.top_categories {
            println!("  {:<24} {}", category.category, category.count);
        }
    }

    let recent = recent_rows(&data.complaints, RECENT_LIMIT);
    if !recent.is_empty() {
        println!();
        println!("{}", style("Recent complaints").bold());
        for row in recent {
            println!(
                "  {} {} [{}] {} — {} ({})",
                style(&row.id).bold(),
                row.date,
                style(&row.status).cyan(),
                row.title,
                row.department,
                row.priority
            );
        }
    }
}

fn render_counts(label: &str, counts: StatusCounts) {
    println!(
        "  {label:<14} total {:<5} pending {:<5} in progress {:<5} resolved {}",
        counts.total, counts.pending, counts.in_progress, counts.resolved
    );
}

/// Fixed-width proportional bar, full-width at `max`.
fn bar(count: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (count * BAR_WIDTH).div_ceil(max).min(BAR_WIDTH);
    let mut s = String::new();
    for _ in 0..filled {
        s.push('\u{2588}');
    }
    for _ in filled..BAR_WIDTH {
        s.push('\u{2591}');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_full_width_at_max() {
        assert_eq!(bar(10, 10).chars().filter(|c| *c == '\u{2588}').count(), 20);
        assert_eq!(bar(0, 10).chars().filter(|c| *c == '\u{2588}').count(), 0);
        assert_eq!(bar(0, 0), "");
    }

    #[test]
    fn bar_rounds_partial_fills_up() {
        let half = bar(1, 2);
        assert_eq!(half.chars().filter(|c| *c == '\u{2588}').count(), 10);
        let sliver = bar(1, 100);
        assert_eq!(sliver.chars().filter(|c| *c == '\u{2588}').count(), 1);
    }
}
