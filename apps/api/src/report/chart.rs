//! Skills frequency bar chart, rendered to SVG.

use std::collections::HashMap;

use plotters::prelude::*;

use crate::report::ReportError;

pub const CHART_TITLE: &str = "Key Skills Distribution";
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

const CHART_WIDTH: u32 = 1000;
const CHART_HEIGHT: u32 = 500;
const BAR_COLOR: RGBColor = RGBColor(135, 206, 235);

/// Splits a comma-separated skills string and counts each trimmed entry.
/// Most frequent first; ties keep first-appearance order.
pub fn skill_frequencies(skills: &str) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for skill in skills.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match index.get(skill) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(skill, counts.len());
                counts.push((skill.to_string(), 1));
            }
        }
    }
    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn render_skills_chart(skills: &str) -> Result<String, ReportError> {
    let counts = skill_frequencies(skills);
    let labels: Vec<&str> = counts.iter().map(|(name, _)| name.as_str()).collect();
    let max_count = counts.first().map(|(_, n)| *n as u32).unwrap_or(0);
    let slots = labels.len().max(1) as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(chart_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(60)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..slots).into_segmented(), 0u32..max_count + 1)
            .map_err(chart_error)?;

        let label_for = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => labels
                .get(*i as usize)
                .map(|s| s.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Skills")
            .y_desc("Frequency")
            .x_labels(slots as usize)
            .x_label_formatter(&label_for)
            .draw()
            .map_err(chart_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(8)
                    .data(counts.iter().enumerate().map(|(i, (_, n))| (i as u32, *n as u32))),
            )
            .map_err(chart_error)?;

        root.present().map_err(chart_error)?;
    }

    Ok(svg)
}

fn chart_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::Chart(e.to_string())
}
