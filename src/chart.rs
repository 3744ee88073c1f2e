//! Two-panel pie chart of the person-level breakdown, written as SVG.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::analyzers::types::{Analysis, ContributorBreakdown, Party};
use crate::report::{format_money, threshold_label};

const CHART_SIZE: (u32, u32) = (1400, 600);
const FALLBACK_COLOR: RGBColor = RGBColor(0x95, 0xa5, 0xa6);

/// Fixed slice color per party code.
pub fn party_color(party: &Party) -> RGBColor {
    match party {
        Party::Democrat => RGBColor(0x34, 0x98, 0xdb),
        Party::Republican => RGBColor(0xe7, 0x4c, 0x3c),
        Party::Independent => RGBColor(0xf3, 0x9c, 0x12),
        Party::Libertarian => RGBColor(0x9b, 0x59, 0xb6),
        Party::Green => RGBColor(0x27, 0xae, 0x60),
        Party::NoParty | Party::Other(_) => FALLBACK_COLOR,
    }
}

/// What a pie measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    People,
    Dollars,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

/// Pie slices for `measure`, in breakdown order. Non-positive values are
/// dropped since a pie cannot show them.
pub fn slices(breakdown: &ContributorBreakdown, measure: Measure) -> Vec<Slice> {
    breakdown
        .rows
        .iter()
        .map(|row| {
            let (value, detail) = match measure {
                Measure::People => (row.people as f64, format!("{} people", row.people)),
                Measure::Dollars => (row.dollars, format_money(row.dollars)),
            };
            Slice {
                label: format!("{} ({detail})", row.label.name()),
                value,
                color: party_color(&row.label),
            }
        })
        .filter(|s| s.value > 0.0)
        .collect()
}

/// Draws contributors-by-party and dollars-by-party side by side into `path`.
#[tracing::instrument(skip(analysis), fields(path = %path.display()))]
pub fn render_party_chart(path: &Path, analysis: &Analysis) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let title = format!(
        "{} - Political Contributions Analysis ({} Rule)",
        analysis.company,
        threshold_label(analysis.threshold)
    );
    let root = root.titled(&title, ("sans-serif", 24))?;
    let panels = root.split_evenly((1, 2));

    draw_pie(
        &panels[0],
        "Contributors by Party",
        &slices(&analysis.contributors, Measure::People),
    )?;
    draw_pie(
        &panels[1],
        "Dollar Amounts by Party",
        &slices(&analysis.contributors, Measure::Dollars),
    )?;

    root.present()?;
    info!("Chart written");
    Ok(())
}

fn draw_pie(area: &DrawingArea<SVGBackend<'_>, Shift>, title: &str, slices: &[Slice]) -> Result<()> {
    let area = area.titled(title, ("sans-serif", 20))?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);

    if slices.is_empty() {
        area.draw(&Text::new("no data", center, ("sans-serif", 18)))?;
        return Ok(());
    }

    let radius = f64::from(w.min(h)) * 0.35;
    let sizes: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let colors: Vec<RGBColor> = slices.iter().map(|s| s.color).collect();
    let labels: Vec<&str> = slices.iter().map(|s| s.label.as_str()).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style(("sans-serif", 14).into_font());
    pie.percentages(("sans-serif", 13).into_font().color(&WHITE));
    area.draw(&pie)?;

    Ok(())
}
