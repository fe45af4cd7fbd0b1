//! Country breakdown tallying.
//!
//! Ranks the countries behind a shortlink's visits for the geographic
//! distribution view.
//!
//! ## Behaviour
//!
//! - **Missing codes are excluded**: Visits without a usable country code
//!   never appear as a pseudo-country slice; they are reported separately
//!   as a coverage figure
//! - **Stable tie order**: Equal counts rank by first occurrence in the
//!   visit list, so repeated runs over the same store agree
//! - **Top-N truncation**: Only the `ChartConfig::top_countries` largest
//!   entries survive, after `unique_countries` is taken
//!
//! ## Renderings
//!
//! - **Console**: Ranked table with counts and share
//! - **JSON**: Raw structured report
//! - **Plotly**: Donut chart with a coverage stats box

use crate::database::Database;
use crate::errors::AppResult;
use crate::types::analysis_results::{CountryBreakdownReport, CountryCount};
use crate::types::visualisation::{PlotlyAnnotation, PlotlyChart, PlotlyLayout, PlotlyTrace};
use crate::types::VisitRecord;
use std::collections::HashMap;

/// Country breakdown analyser
pub struct CountryBreakdownAnalyser;

impl CountryBreakdownAnalyser {
    /// Analyse the country distribution for one shortlink.
    pub fn analyse(db: &Database, short_code: &str, top_n: usize) -> AppResult<CountryBreakdownReport> {
        let visits = db.get_visits_for_code(short_code)?;
        Ok(Self::tally(short_code, &visits, top_n))
    }

    /// Tally an in-memory visit list into a ranked country report.
    ///
    /// Pure function of its inputs. Rank order is count descending; ties
    /// break by first occurrence in `visits`, which for store-loaded lists
    /// means the country whose visit came earliest.
    pub fn tally(short_code: &str, visits: &[VisitRecord], top_n: usize) -> CountryBreakdownReport {
        let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
        let mut visits_with_country = 0u64;

        for (position, visit) in visits.iter().enumerate() {
            match visit.country_code.as_deref() {
                Some(code) if !code.is_empty() => {
                    visits_with_country += 1;
                    counts
                        .entry(code)
                        .and_modify(|(count, _)| *count += 1)
                        .or_insert((1, position));
                }
                _ => {}
            }
        }

        let unique_countries = counts.len();
        let mut ranked: Vec<(&str, u64, usize)> = counts
            .into_iter()
            .map(|(code, (count, first_seen))| (code, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(top_n);

        let top_countries = ranked
            .into_iter()
            .map(|(code, count, _)| CountryCount {
                country_code: code.to_string(),
                count,
            })
            .collect();

        let total_visits = visits.len() as u64;
        CountryBreakdownReport {
            short_code: short_code.to_string(),
            total_visits,
            visits_with_country,
            visits_without_country: total_visits - visits_with_country,
            unique_countries,
            top_countries,
        }
    }
}

impl CountryBreakdownReport {
    /// Build the donut chart for this report
    ///
    /// A report with no ranked countries produces an empty trace list.
    pub fn to_plotly_chart(&self) -> PlotlyChart {
        let mut layout = PlotlyLayout::basic(
            &format!("Country Breakdown: {}", self.short_code),
            "",
            "",
        )
        .with_legend("v", 1.02, 1.0, "left");

        if self.top_countries.is_empty() {
            return PlotlyChart {
                data: vec![],
                layout,
            };
        }

        let labels: Vec<String> = self
            .top_countries
            .iter()
            .map(|entry| entry.country_code.clone())
            .collect();
        let values: Vec<f64> = self
            .top_countries
            .iter()
            .map(|entry| entry.count as f64)
            .collect();

        let trace = PlotlyTrace::pie(labels, values, "Countries")
            .with_hole(0.4)
            .with_hovertemplate("%{label}<br>Visits: %{value} (%{percent})<extra></extra>");

        let stats_text = format!(
            "Total visits: {}<br>With country: {} ({:.1}%)<br>Unique countries: {}",
            self.total_visits,
            self.visits_with_country,
            self.coverage_percentage(),
            self.unique_countries
        );
        layout = layout.with_annotations(vec![PlotlyAnnotation::stats_box(&stats_text, 0.02, 0.98)]);

        PlotlyChart {
            data: vec![trace],
            layout,
        }
    }
}
