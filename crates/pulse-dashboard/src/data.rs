// File: crates/pulse-dashboard/src/data.rs
// Summary: CSV loading and per-project daily aggregation into chart datasets.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use pulse_core::{CategoryDatum, Point, Series};
use tracing::{debug, warn};

/// Series colors, cycled per project.
const PALETTE: &[&str] = &["#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316", "#84cc16"];
const OVERALL_COLOR: &str = "#3b82f6";
const GROWTH_COLOR: &str = "#eab308";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    #[default]
    Downloads,
    Views,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub date: NaiveDate,
    pub project: String,
    pub downloads: f64,
    pub views: Option<f64>,
}

impl Row {
    fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Downloads => self.downloads,
            Metric::Views => self.views.unwrap_or(0.0),
        }
    }
}

/// `YYYY-MM-DD`, or a unix timestamp in seconds or milliseconds.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let n = s.parse::<i64>().ok()?;
    let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
    DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive())
}

/// Load `date,project,downloads[,views]` rows. Header names are matched
/// case-insensitively; rows with an unreadable date or value are skipped.
pub fn load_rows(path: &Path) -> Result<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    debug!(?headers, "csv headers");
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_date = idx(&["date", "day", "time", "timestamp"]).context("missing date column")?;
    let i_project = idx(&["project", "mod", "name", "id"]).context("missing project column")?;
    let i_downloads = idx(&["downloads", "download", "count"]).context("missing downloads column")?;
    let i_views = idx(&["views", "view"]);

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("reading record {}", line + 1))?;
        let num = |i: usize| rec.get(i).and_then(|s| s.parse::<f64>().ok());
        let date = rec.get(i_date).and_then(parse_date);
        let project = rec.get(i_project).filter(|p| !p.is_empty());
        match (date, project, num(i_downloads)) {
            (Some(date), Some(project), Some(downloads)) => out.push(Row {
                date,
                project: project.to_string(),
                downloads,
                views: i_views.and_then(num),
            }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, path = %path.display(), "skipped unreadable rows");
    }
    Ok(out)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub id: String,
    pub values: Vec<f64>,
}

/// Daily values per project over a shared date axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
    pub dates: Vec<NaiveDate>,
    pub projects: Vec<Project>,
}

impl Dashboard {
    /// Dates are sorted ascending; projects keep first-seen order. A project
    /// with no row for a date gets 0 there, so every series has one value per date.
    pub fn aggregate(rows: &[Row], metric: Metric) -> Self {
        let mut dates: Vec<NaiveDate> = Vec::new();
        let mut date_index: HashMap<NaiveDate, usize> = HashMap::new();
        let mut projects: Vec<Project> = Vec::new();
        let mut project_index: HashMap<&str, usize> = HashMap::new();

        for row in rows {
            let d = *date_index.entry(row.date).or_insert_with(|| {
                dates.push(row.date);
                dates.len() - 1
            });
            let p = *project_index.entry(row.project.as_str()).or_insert_with(|| {
                projects.push(Project { id: row.project.clone(), values: Vec::new() });
                projects.len() - 1
            });
            let values = &mut projects[p].values;
            if values.len() <= d {
                values.resize(d + 1, 0.0);
            }
            values[d] += row.metric(metric);
        }
        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by_key(|&i| dates[i]);
        for p in &mut projects {
            p.values.resize(dates.len(), 0.0);
            p.values = order.iter().map(|&i| p.values[i]).collect();
        }
        let dates = order.iter().map(|&i| dates[i]).collect();
        Self { dates, projects }
    }

    pub fn labels(&self) -> Vec<String> {
        self.dates.iter().map(|d| d.format("%b %d").to_string()).collect()
    }

    pub fn overall(&self) -> Vec<f64> {
        (0..self.dates.len()).map(|i| self.projects.iter().map(|p| p.values[i]).sum()).collect()
    }

    /// Day-over-day change of the overall total; the first day is 0.
    pub fn growth(&self) -> Vec<f64> {
        let overall = self.overall();
        let mut out = Vec::with_capacity(overall.len());
        for (i, v) in overall.iter().enumerate() {
            out.push(if i == 0 { 0.0 } else { v - overall[i - 1] });
        }
        out
    }

    fn points(&self, values: &[f64]) -> Vec<Point> {
        self.labels().into_iter().zip(values.iter().copied()).map(|(d, v)| Point::new(d, v)).collect()
    }

    /// "overall" first, then one series per project.
    pub fn downloads_series(&self) -> Result<Vec<Series>> {
        let mut out = Vec::with_capacity(self.projects.len() + 1);
        out.push(Series::try_new("overall", "Overall", OVERALL_COLOR)?.with_data(self.points(&self.overall())));
        for (i, p) in self.projects.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            out.push(Series::try_new(p.id.as_str(), p.id.as_str(), color)?.with_data(self.points(&p.values)));
        }
        Ok(out)
    }

    pub fn growth_series(&self) -> Result<Vec<Series>> {
        Ok(vec![Series::try_new("growth", "Growth", GROWTH_COLOR)?.with_data(self.points(&self.growth()))])
    }

    /// Total per project over the whole range.
    pub fn project_totals(&self) -> Result<Vec<CategoryDatum>> {
        self.projects
            .iter()
            .enumerate()
            .map(|(i, p)| -> Result<CategoryDatum> {
                let total = p.values.iter().sum();
                Ok(CategoryDatum::try_new(p.id.as_str(), p.id.as_str(), total, PALETTE[i % PALETTE.len()])?)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, project: &str, downloads: f64) -> Row {
        Row { date: parse_date(date).unwrap(), project: project.into(), downloads, views: None }
    }

    #[test]
    fn parses_iso_and_epoch_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("2024-03-01"), Some(d));
        assert_eq!(parse_date("1709251200"), Some(d));
        assert_eq!(parse_date("1709251200000"), Some(d));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn missing_buckets_become_zero() {
        let rows = vec![
            row("2024-03-01", "a", 5.0),
            row("2024-03-01", "b", 1.0),
            row("2024-03-02", "a", 7.0),
            row("2024-03-03", "b", 4.0),
            row("2024-03-03", "b", 2.0),
        ];
        let dash = Dashboard::aggregate(&rows, Metric::Downloads);
        assert_eq!(dash.dates.len(), 3);
        assert_eq!(dash.projects[0].values, vec![5.0, 7.0, 0.0]);
        assert_eq!(dash.projects[1].values, vec![1.0, 0.0, 6.0]);
        assert_eq!(dash.overall(), vec![6.0, 7.0, 6.0]);
        assert_eq!(dash.growth(), vec![0.0, 1.0, -1.0]);
    }

    #[test]
    fn unsorted_rows_come_out_chronological() {
        let rows = vec![
            row("2024-03-03", "a", 30.0),
            row("2024-03-01", "a", 10.0),
            row("2024-03-02", "b", 4.0),
            row("2024-03-02", "a", 20.0),
        ];
        let dash = Dashboard::aggregate(&rows, Metric::Downloads);
        assert_eq!(dash.labels(), vec!["Mar 01", "Mar 02", "Mar 03"]);
        assert_eq!(dash.projects[0].id, "a");
        assert_eq!(dash.projects[0].values, vec![10.0, 20.0, 30.0]);
        assert_eq!(dash.projects[1].values, vec![0.0, 4.0, 0.0]);
        assert_eq!(dash.growth(), vec![0.0, 14.0, 6.0]);
    }

    #[test]
    fn series_are_aligned_and_labelled() {
        let rows = vec![row("2024-03-01", "a", 5.0), row("2024-03-02", "b", 3.0)];
        let dash = Dashboard::aggregate(&rows, Metric::Downloads);
        let series = dash.downloads_series().unwrap();
        assert_eq!(series.iter().map(|s| s.id.as_str()).collect::<Vec<_>>(), vec!["overall", "a", "b"]);
        assert!(series.iter().all(|s| s.data.len() == 2));
        assert_eq!(series[0].data[0].date, "Mar 01");

        let totals = dash.project_totals().unwrap();
        assert_eq!(totals.iter().map(|c| c.value).collect::<Vec<_>>(), vec![5.0, 3.0]);
    }

    #[test]
    fn views_metric_defaults_missing_to_zero() {
        let mut rows = vec![row("2024-03-01", "a", 5.0), row("2024-03-01", "b", 3.0)];
        rows[0].views = Some(40.0);
        let dash = Dashboard::aggregate(&rows, Metric::Views);
        assert_eq!(dash.overall(), vec![40.0]);
    }
}
