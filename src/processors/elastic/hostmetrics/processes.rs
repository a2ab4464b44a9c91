// SPDX-License-Identifier: Apache-2.0

use super::{
    DerivedMetric, MetricKind, MetricValue, append_metric, capture_timestamp, int_value,
    sum_data_points,
};
use crate::otlp::attr;
use crate::semconv::hostmetrics::STATUS;
use opentelemetry_proto::tonic::metrics::v1::Metric;

const PROCESSES_COUNT: &str = "system.processes.count";

/// Host-wide process counts by status. The total is the sum of the known
/// statuses, computed at emit time so repeated datapoints for one status
/// cannot inflate it.
#[derive(Default)]
struct SummaryStats {
    idle: i64,
    sleeping: i64,
    stopped: i64,
    zombies: i64,
}

pub(super) fn remap(metrics: &[Metric], out: &mut Vec<Metric>) {
    let mut stats = SummaryStats::default();
    let mut timestamp = 0u64;

    for metric in metrics {
        if metric.name != PROCESSES_COUNT {
            continue;
        }
        for dp in sum_data_points(metric) {
            let Some(status) = attr::get_str(STATUS, &dp.attributes) else {
                continue;
            };
            capture_timestamp(&mut timestamp, dp);
            let value = int_value(dp);
            match status {
                "idle" => stats.idle = value,
                "sleeping" => stats.sleeping = value,
                "stopped" => stats.stopped = value,
                "zombies" => stats.zombies = value,
                _ => {}
            }
        }
    }

    let total = stats.idle + stats.sleeping + stats.stopped + stats.zombies;
    let derived: [(&str, i64); 5] = [
        ("system.process.summary.idle", stats.idle),
        ("system.process.summary.sleeping", stats.sleeping),
        ("system.process.summary.stopped", stats.stopped),
        ("system.process.summary.zombie", stats.zombies),
        ("system.process.summary.total", total),
    ];
    for (name, value) in derived {
        append_metric(
            out,
            DerivedMetric {
                name: name.to_string(),
                kind: MetricKind::Sum,
                timestamp,
                value: MetricValue::Int(value),
                attributes: vec![],
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::otlp::{int_point, string_attr, sum_metric};

    const TS: u64 = 1_714_000_000_000_000_000;

    fn find_value(out: &[Metric], name: &str) -> i64 {
        let metric = out
            .iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("missing derived metric {}", name));
        int_value(&sum_data_points(metric)[0])
    }

    #[test]
    fn test_summary_counts_and_total() {
        let metrics = vec![sum_metric(
            PROCESSES_COUNT,
            vec![
                int_point(vec![string_attr(STATUS, "idle")], TS, 1),
                int_point(vec![string_attr(STATUS, "sleeping")], TS, 2),
                int_point(vec![string_attr(STATUS, "stopped")], TS, 3),
                int_point(vec![string_attr(STATUS, "zombies")], TS, 4),
            ],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        assert_eq!(out.len(), 5);
        assert_eq!(find_value(&out, "system.process.summary.idle"), 1);
        assert_eq!(find_value(&out, "system.process.summary.sleeping"), 2);
        assert_eq!(find_value(&out, "system.process.summary.stopped"), 3);
        assert_eq!(find_value(&out, "system.process.summary.zombie"), 4);
        assert_eq!(find_value(&out, "system.process.summary.total"), 10);
    }

    #[test]
    fn test_unknown_status_excluded_from_total() {
        let metrics = vec![sum_metric(
            PROCESSES_COUNT,
            vec![
                int_point(vec![string_attr(STATUS, "sleeping")], TS, 2),
                int_point(vec![string_attr(STATUS, "running")], TS, 9),
            ],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        assert_eq!(find_value(&out, "system.process.summary.total"), 2);
    }

    #[test]
    fn test_repeated_status_does_not_inflate_total() {
        let metrics = vec![sum_metric(
            PROCESSES_COUNT,
            vec![
                int_point(vec![string_attr(STATUS, "sleeping")], TS, 2),
                int_point(vec![string_attr(STATUS, "sleeping")], TS, 5),
            ],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        assert_eq!(find_value(&out, "system.process.summary.sleeping"), 5);
        assert_eq!(find_value(&out, "system.process.summary.total"), 5);
    }

    #[test]
    fn test_empty_scope_still_emits_summary() {
        let mut out = Vec::new();
        remap(&[], &mut out);
        assert_eq!(out.len(), 5);
        assert_eq!(find_value(&out, "system.process.summary.total"), 0);
    }
}
