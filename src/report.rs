//! Text report for a finished [`Analysis`].
//!
//! Sections, in order: transaction-level stats, person-level breakdown,
//! top committees, summary.

use std::fmt::{self, Write};

use crate::analyzers::types::Analysis;

const RULE_WIDTH: usize = 70;
const COMMITTEE_NAME_WIDTH: usize = 50;
const NO_DATA: &str = "no data";

/// `1234.5` → `$1,234.50`, `-20` → `-$20.00`.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{frac}", group_thousands(whole))
}

/// `1234567` → `1,234,567`.
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Threshold as a whole percentage, e.g. `60%`.
pub fn threshold_label(threshold: f64) -> String {
    format!("{:.0}%", threshold * 100.0)
}

/// Renders the full report.
pub fn render(analysis: &Analysis) -> String {
    let mut out = String::new();
    write_report(&mut out, analysis).expect("writing to a String cannot fail");
    out
}

pub fn write_report<W: Write>(out: &mut W, analysis: &Analysis) -> fmt::Result {
    write_header(out, analysis)?;
    write_transactions(out, analysis)?;
    write_contributors(out, analysis)?;
    write_committees(out, analysis)?;
    write_summary(out, analysis)
}

fn write_header<W: Write>(out: &mut W, a: &Analysis) -> fmt::Result {
    writeln!(out, "Analyzing: {}", a.company)?;
    writeln!(out, "Input file: {}", a.source)?;
    writeln!(out, "Rows loaded: {}", format_count(a.summary.count))
}

fn write_transactions<W: Write>(out: &mut W, a: &Analysis) -> fmt::Result {
    let s = &a.summary;
    writeln!(out)?;
    writeln!(out, "Contributions by Company (Transaction-Level)")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Count:              {}", format_count(s.count))?;
    match s.max_amount {
        Some(max) => writeln!(out, "Max:                {}", format_money(max))?,
        None => writeln!(out, "Max:                {NO_DATA}")?,
    }
    match s.mean_amount {
        Some(mean) => writeln!(out, "Mean:               {}", format_money(mean))?,
        None => writeln!(out, "Mean:               {NO_DATA}")?,
    }
    writeln!(out, "Total:              {}", format_money(s.total_amount))?;
    writeln!(out, "Democrat %:         {:.2}%", s.democrat_pct())?;
    writeln!(out, "Republican %:       {:.2}%", s.republican_pct())?;
    writeln!(out, "Other %:            {:.2}%", s.other_pct())?;
    if let (Some(first), Some(last)) = (s.first_date, s.last_date) {
        writeln!(out, "Date range:         {first} to {last}")?;
    }
    Ok(())
}

fn write_contributors<W: Write>(out: &mut W, a: &Analysis) -> fmt::Result {
    let c = &a.contributors;
    let rule_name = threshold_label(a.threshold);
    writeln!(out)?;
    writeln!(out, "Contributors by Company ({rule_name} Rule, Person-Level)")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Unique Contributors: {}", format_count(c.total_people))?;
    writeln!(out, "Total Amount:        {}", format_money(c.total_dollars))?;
    writeln!(out)?;
    writeln!(out, "Party Breakdown ({rule_name} rule):")?;
    if c.rows.is_empty() {
        writeln!(out, "  {NO_DATA}")?;
    }
    for row in &c.rows {
        writeln!(
            out,
            "  {:<20} {:>4} people ({:>5.2}%)  {:>12} ({:.2}% of dollars)",
            row.label.name(),
            row.people,
            row.pct,
            format_money(row.dollars),
            c.dollars_pct(&row.label)
        )?;
    }
    Ok(())
}

fn write_committees<W: Write>(out: &mut W, a: &Analysis) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "Top {} Recipient Committees", a.top_n)?;
    writeln!(out, "{}", rule())?;
    for c in &a.committees {
        let name: String = c.committee_name.chars().take(COMMITTEE_NAME_WIDTH).collect();
        writeln!(
            out,
            "{:<width$} [{}] {:>12} ({:>3} txns)",
            name,
            c.party,
            format_money(c.total_amount),
            c.count,
            width = COMMITTEE_NAME_WIDTH
        )?;
    }
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, a: &Analysis) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Company:                {}", a.company)?;
    writeln!(out, "Total transactions:     {}", format_count(a.summary.count))?;
    writeln!(out, "Total amount:           {}", format_money(a.summary.total_amount))?;
    writeln!(out, "Unique contributors:    {}", a.contributors.total_people)?;
    match a.transactions_per_person() {
        Some(avg) => writeln!(out, "Avg txns per person:    {avg:.1}")?,
        None => writeln!(out, "Avg txns per person:    {NO_DATA}")?,
    }
    writeln!(out, "{}", rule())
}
