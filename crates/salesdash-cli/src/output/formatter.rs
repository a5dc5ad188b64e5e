//! Summary formatting for terminal display.

use salesdash_core::{GroupTotal, Report};

use crate::colors;

/// Bar width used for the proportional bars next to table rows.
const BAR_WIDTH: usize = 24;

/// Print the notice shown when no rows match the filters.
pub fn print_no_data() {
    println!(
        "\n{}No data matches the selected filters.{}",
        colors::YELLOW,
        colors::RESET
    );
}

/// Print a full report: KPIs followed by every table.
pub fn print_report(report: &Report) {
    print_kpi("Total sales", &format!("{:.2}", report.kpis.total_sales));
    print_kpi("Customers", &report.kpis.distinct_customers.to_string());
    print_kpi("Orders", &report.kpis.distinct_orders.to_string());

    print_totals("Sales by category", &report.categories);
    print_totals("Sales by region", &report.regions);
    print_totals("Top customers", &report.top_customers);

    print_heading("Customers by gender");
    for share in &report.genders {
        println!(
            "  {:<24} {:>8} {}({:.1}%){}",
            share.gender,
            share.count,
            colors::DIM,
            share.percentage,
            colors::RESET
        );
    }

    print_heading("Sales per month");
    let max = report.monthly.iter().map(|m| m.total).fold(0.0, f64::max);
    for month in &report.monthly {
        println!(
            "  {:<24} {:>12.2} {}",
            month.month.format("%Y-%m"),
            month.total,
            bar(month.total, max)
        );
    }

    print_heading("Sales by state");
    for state in &report.states {
        let located = match (state.latitude, state.longitude) {
            (Some(lat), Some(lon)) => format!("({lat:.2}, {lon:.2})"),
            _ => "(no coordinates)".to_string(),
        };
        println!(
            "  {:<24} {:>12.2} {}{}{}",
            state.state,
            state.total,
            colors::DIM,
            located,
            colors::RESET
        );
    }

    if let (Some(youngest), Some(oldest)) = (report.ages.iter().min(), report.ages.iter().max()) {
        print_heading("Customer ages");
        println!("  {} customers, ages {} to {}", report.ages.len(), youngest, oldest);
    }
}

fn print_kpi(label: &str, value: &str) {
    println!("{}  ◆ {}:{} {}", colors::CYAN, label, colors::RESET, value);
}

fn print_heading(title: &str) {
    println!("\n{}{}{}", colors::BOLD, title, colors::RESET);
}

fn print_totals(title: &str, rows: &[GroupTotal]) {
    print_heading(title);
    let max = rows.iter().map(|r| r.total).fold(0.0, f64::max);
    for row in rows {
        println!("  {:<24} {:>12.2} {}", row.key, row.total, bar(row.total, max));
    }
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}{}", colors::GREEN, "█".repeat(len.min(BAR_WIDTH)), colors::RESET)
}
