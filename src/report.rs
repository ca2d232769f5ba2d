//! Turns aggregation outputs into charts and renders them.
//!
//! Every chart is rendered independently: a transform with no data is
//! skipped and a render failure is logged, and neither stops the others.

use std::path::PathBuf;

use crate::analytics::Aggregations;
use crate::ports::renderer::{Chart, ChartKind, ChartRenderer, LineSeries};

/// Bins used for the lead-time and worklog histograms.
pub const HISTOGRAM_BINS: usize = 30;
/// Bins used for each time-in-status histogram.
pub const STATUS_HISTOGRAM_BINS: usize = 15;

/// A chart, or the reason a transform produced none.
#[derive(Debug, Clone, PartialEq)]
pub enum Planned {
    /// Ready to render.
    Chart(Chart),
    /// The named transform had nothing to show.
    NoData(&'static str),
}

/// What a report run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    /// Files written, in render order.
    pub written: Vec<PathBuf>,
    /// Transforms skipped for lack of data.
    pub skipped: Vec<&'static str>,
    /// Charts that failed to render, with the error message.
    pub failed: Vec<(String, String)>,
}

/// Lays out the charts for one report, in output order.
#[must_use]
pub fn plan_charts(aggregations: &Aggregations, project: &str) -> Vec<Planned> {
    let mut planned = Vec::new();

    planned.push(match &aggregations.lead_time {
        Some(values) => Planned::Chart(Chart {
            file_stem: "01_lead_time_histogram".into(),
            title: format!("Lead time, days ({project}), {} issues", values.len()),
            kind: ChartKind::Histogram { values: values.clone(), bins: HISTOGRAM_BINS },
        }),
        None => Planned::NoData("lead_time"),
    });

    if aggregations.time_in_status.is_empty() {
        planned.push(Planned::NoData("time_in_status"));
    }
    for status in &aggregations.time_in_status {
        planned.push(Planned::Chart(Chart {
            file_stem: format!("02_time_in_status_{}", status.identifier),
            title: format!("Time in status: {}, {} issues", status.status, status.days.len()),
            kind: ChartKind::Histogram { values: status.days.clone(), bins: STATUS_HISTOGRAM_BINS },
        }));
    }

    planned.push(match &aggregations.daily_flow {
        Some(days) => {
            #[allow(clippy::cast_precision_loss)]
            let series = |label: &str, pick: fn(&crate::analytics::DailyFlow) -> u64| LineSeries {
                label: label.to_string(),
                values: days.iter().map(|d| pick(d) as f64).collect(),
            };
            Planned::Chart(Chart {
                file_stem: "03_daily_issue_flow".into(),
                title: "Issues created and resolved per day".into(),
                kind: ChartKind::Lines {
                    panels: vec![
                        vec![series("Created", |d| d.created), series("Resolved", |d| d.resolved)],
                        vec![
                            series("Total created", |d| d.cumulative_created),
                            series("Total resolved", |d| d.cumulative_resolved),
                        ],
                    ],
                },
            })
        }
        None => Planned::NoData("daily_flow"),
    });

    planned.push(if aggregations.top_users.is_empty() {
        Planned::NoData("top_users")
    } else {
        Planned::Chart(Chart {
            file_stem: "04_top_users".into(),
            title: format!("Top {} users (assignee + reporter)", aggregations.top_users.len()),
            kind: ChartKind::StackedBars {
                labels: aggregations.top_users.iter().map(|u| u.user.clone()).collect(),
                segments: aggregations.top_users.iter().map(|u| vec![u.assignee, u.reporter]).collect(),
            },
        })
    });

    planned.push(match &aggregations.worklog {
        Some(worklog) => Planned::Chart(Chart {
            file_stem: "05_user_worklog_histogram".into(),
            title: "Logged time per issue, hours".into(),
            kind: ChartKind::Histogram { values: worklog.pooled(), bins: HISTOGRAM_BINS },
        }),
        None => Planned::NoData("worklog"),
    });

    planned.push(if aggregations.priorities.is_empty() {
        Planned::NoData("priorities")
    } else {
        Planned::Chart(Chart {
            file_stem: "06_issues_by_priority".into(),
            title: "Closed issues by priority".into(),
            kind: ChartKind::Bars {
                labels: aggregations.priorities.iter().map(|p| p.priority.clone()).collect(),
                values: aggregations.priorities.iter().map(|p| p.count).collect(),
            },
        })
    });

    planned
}

/// Renders every planned chart, continuing past failures.
pub fn render_all(renderer: &dyn ChartRenderer, planned: &[Planned]) -> ReportSummary {
    let mut summary = ReportSummary::default();
    for item in planned {
        match item {
            Planned::NoData(name) => {
                tracing::warn!(transform = *name, "No data; chart skipped");
                summary.skipped.push(*name);
            }
            Planned::Chart(chart) => match renderer.render(chart) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "Chart saved");
                    summary.written.push(path);
                }
                Err(e) => {
                    tracing::error!(chart = %chart.file_stem, "Failed to render chart: {e}");
                    summary.failed.push((chart.file_stem.clone(), e.to_string()));
                }
            },
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::issue::test_support::IssueBuilder;
    use crate::issue::{ClosedStatuses, Issue};

    /// Records chart stems and fails the ones listed in `fail`.
    struct FakeRenderer {
        fail: Vec<&'static str>,
        seen: Mutex<Vec<String>>,
    }

    impl ChartRenderer for FakeRenderer {
        fn render(
            &self,
            chart: &Chart,
        ) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>> {
            self.seen.lock().unwrap().push(chart.file_stem.clone());
            if self.fail.contains(&chart.file_stem.as_str()) {
                return Err("disk full".into());
            }
            Ok(PathBuf::from(format!("/out/{}.png", chart.file_stem)))
        }
    }

    fn sample_issues() -> Vec<Issue> {
        vec![
            IssueBuilder::new("K-1")
                .status("Closed")
                .created("2023-01-01T10:00:00.000+0000")
                .updated("2023-01-04T10:00:00.000+0000")
                .resolved("2023-01-04T10:00:00.000+0000")
                .assignee("alice")
                .reporter("bob")
                .priority("High")
                .time_spent(7200)
                .build(),
            IssueBuilder::new("K-2")
                .status("Closed")
                .created("2023-01-02T10:00:00.000+0000")
                .updated("2023-01-03T10:00:00.000+0000")
                .resolved("2023-01-03T10:00:00.000+0000")
                .assignee("bob")
                .reporter("alice")
                .priority("Low")
                .build(),
        ]
    }

    fn stems(planned: &[Planned]) -> Vec<String> {
        planned
            .iter()
            .filter_map(|p| match p {
                Planned::Chart(c) => Some(c.file_stem.clone()),
                Planned::NoData(_) => None,
            })
            .collect()
    }

    #[test]
    fn plans_all_six_charts_in_order() {
        let aggregations = Aggregations::compute(&sample_issues(), &ClosedStatuses::default());
        let planned = plan_charts(&aggregations, "K");
        assert_eq!(
            stems(&planned),
            vec![
                "01_lead_time_histogram",
                "02_time_in_status_Closed",
                "03_daily_issue_flow",
                "04_top_users",
                "05_user_worklog_histogram",
                "06_issues_by_priority",
            ]
        );
    }

    #[test]
    fn daily_flow_chart_has_daily_and_cumulative_panels() {
        let aggregations = Aggregations::compute(&sample_issues(), &ClosedStatuses::default());
        let planned = plan_charts(&aggregations, "K");
        let Some(Planned::Chart(chart)) =
            planned.iter().find(|p| matches!(p, Planned::Chart(c) if c.file_stem == "03_daily_issue_flow"))
        else {
            panic!("daily flow chart missing");
        };
        let ChartKind::Lines { panels } = &chart.kind else {
            panic!("expected line chart");
        };
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0][0].values, vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(panels[1][1].values, vec![0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_issue_set_plans_only_skips() {
        let aggregations = Aggregations::compute(&[], &ClosedStatuses::default());
        let planned = plan_charts(&aggregations, "K");
        assert!(stems(&planned).is_empty());
        assert_eq!(planned.len(), 6);
    }

    #[test]
    fn render_failure_does_not_stop_other_charts() {
        let aggregations = Aggregations::compute(&sample_issues(), &ClosedStatuses::default());
        let planned = plan_charts(&aggregations, "K");
        let renderer = FakeRenderer { fail: vec!["03_daily_issue_flow"], seen: Mutex::new(Vec::new()) };

        let summary = render_all(&renderer, &planned);

        assert_eq!(renderer.seen.lock().unwrap().len(), 6);
        assert_eq!(summary.written.len(), 5);
        assert_eq!(summary.failed, vec![("03_daily_issue_flow".to_string(), "disk full".to_string())]);
        assert!(summary.skipped.is_empty());
    }

    #[test]
    fn no_data_transforms_are_reported_as_skipped() {
        let issues = vec![IssueBuilder::new("K-1").status("Open").build()];
        let aggregations = Aggregations::compute(&issues, &ClosedStatuses::default());
        let renderer = FakeRenderer { fail: vec![], seen: Mutex::new(Vec::new()) };
        let summary = render_all(&renderer, &plan_charts(&aggregations, "K"));
        assert!(summary.written.is_empty());
        assert_eq!(
            summary.skipped,
            vec!["lead_time", "time_in_status", "daily_flow", "top_users", "worklog", "priorities"]
        );
    }
}
