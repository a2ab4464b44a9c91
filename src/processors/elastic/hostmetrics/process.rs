// SPDX-License-Identifier: Apache-2.0

use super::{
    DerivedMetric, MetricKind, MetricValue, append_metric, capture_timestamp, double_value,
    gauge_data_points, int_value, sum_data_points,
};
use crate::otlp::attr;
use crate::semconv::hostmetrics::{DIRECTION, STATE};
use opentelemetry_proto::tonic::metrics::v1::Metric;

const PROCESS_CPU_TIME: &str = "process.cpu.time";
const PROCESS_MEMORY_UTILIZATION: &str = "process.memory.utilization";
const PROCESS_MEMORY_USAGE: &str = "process.memory.usage";
const PROCESS_MEMORY_VIRTUAL: &str = "process.memory.virtual";
const PROCESS_THREADS: &str = "process.threads";
const PROCESS_OPEN_FDS: &str = "process.open_file_descriptors";
const PROCESS_DISK_IO: &str = "process.disk.io";
const PROCESS_DISK_OPERATIONS: &str = "process.disk.operations";

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Accumulator for the scope's process. The process scraper reports one
/// process per resource, so the accumulator is scope-global. CPU times are
/// carried in seconds as reported by the source.
#[derive(Default)]
struct ProcessStats {
    cpu_system: f64,
    cpu_user: f64,
    cpu_wait: f64,
    mem_util: f64,
    mem_usage: i64,
    mem_virtual: i64,
    threads: i64,
    fd_open: i64,
    read_bytes: i64,
    write_bytes: i64,
    read_count: i64,
    write_count: i64,
}

pub(super) fn remap(metrics: &[Metric], out: &mut Vec<Metric>) {
    let mut stats = ProcessStats::default();
    let mut timestamp = 0u64;
    // CPU utilization derives from the cpu.time datapoint's own cumulative
    // window, so its bounds are tracked separately.
    let mut cpu_timestamp = 0u64;
    let mut cpu_start_timestamp = 0u64;

    for metric in metrics {
        match metric.name.as_str() {
            PROCESS_CPU_TIME => {
                for dp in sum_data_points(metric) {
                    let Some(state) = attr::get_str(STATE, &dp.attributes) else {
                        continue;
                    };
                    capture_timestamp(&mut timestamp, dp);
                    capture_timestamp(&mut cpu_timestamp, dp);
                    if cpu_start_timestamp == 0 && dp.start_time_unix_nano != 0 {
                        cpu_start_timestamp = dp.start_time_unix_nano;
                    }
                    match state {
                        "system" => stats.cpu_system = double_value(dp),
                        "user" => stats.cpu_user = double_value(dp),
                        "wait" => stats.cpu_wait = double_value(dp),
                        _ => {}
                    }
                }
            }
            PROCESS_MEMORY_UTILIZATION => {
                for dp in gauge_data_points(metric) {
                    capture_timestamp(&mut timestamp, dp);
                    stats.mem_util = double_value(dp);
                }
            }
            PROCESS_MEMORY_USAGE => {
                for dp in sum_data_points(metric) {
                    capture_timestamp(&mut timestamp, dp);
                    stats.mem_usage = int_value(dp);
                }
            }
            PROCESS_MEMORY_VIRTUAL => {
                for dp in sum_data_points(metric) {
                    capture_timestamp(&mut timestamp, dp);
                    stats.mem_virtual = int_value(dp);
                }
            }
            PROCESS_THREADS => {
                for dp in sum_data_points(metric) {
                    capture_timestamp(&mut timestamp, dp);
                    stats.threads = int_value(dp);
                }
            }
            PROCESS_OPEN_FDS => {
                for dp in sum_data_points(metric) {
                    capture_timestamp(&mut timestamp, dp);
                    stats.fd_open = int_value(dp);
                }
            }
            PROCESS_DISK_IO | PROCESS_DISK_OPERATIONS => {
                for dp in sum_data_points(metric) {
                    let Some(direction) = attr::get_str(DIRECTION, &dp.attributes) else {
                        continue;
                    };
                    capture_timestamp(&mut timestamp, dp);
                    let value = int_value(dp);
                    match (metric.name.as_str(), direction) {
                        (PROCESS_DISK_IO, "read") => stats.read_bytes = value,
                        (PROCESS_DISK_IO, "write") => stats.write_bytes = value,
                        (PROCESS_DISK_OPERATIONS, "read") => stats.read_count = value,
                        (PROCESS_DISK_OPERATIONS, "write") => stats.write_count = value,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    let cpu_total = stats.cpu_system + stats.cpu_user + stats.cpu_wait;
    let total_ms = cpu_total * 1000.0;
    let mem_util_pct = stats.mem_util / 100.0;
    // Share of the cumulative window spent on CPU. An empty window yields
    // zero rather than a division error.
    let elapsed_ns = cpu_timestamp.saturating_sub(cpu_start_timestamp);
    let cpu_pct = if cpu_start_timestamp > 0 && elapsed_ns > 0 {
        cpu_total / (elapsed_ns as f64 / NANOS_PER_SECOND)
    } else {
        0.0
    };

    let derived: [(&str, MetricKind, MetricValue); 15] = [
        (
            "system.process.cpu.system.ticks",
            MetricKind::Sum,
            MetricValue::Double(stats.cpu_system * 1000.0),
        ),
        (
            "system.process.cpu.user.ticks",
            MetricKind::Sum,
            MetricValue::Double(stats.cpu_user * 1000.0),
        ),
        (
            "system.process.cpu.total.ticks",
            MetricKind::Sum,
            MetricValue::Double(total_ms),
        ),
        (
            "system.process.cpu.total.value",
            MetricKind::Sum,
            MetricValue::Double(total_ms),
        ),
        (
            "system.process.cpu.total.pct",
            MetricKind::Gauge,
            MetricValue::Double(cpu_pct),
        ),
        (
            "system.process.memory.rss.pct",
            MetricKind::Gauge,
            MetricValue::Double(mem_util_pct),
        ),
        (
            "process.memory.pct",
            MetricKind::Gauge,
            MetricValue::Double(mem_util_pct),
        ),
        (
            "system.process.memory.rss.bytes",
            MetricKind::Sum,
            MetricValue::Int(stats.mem_usage),
        ),
        (
            "system.process.memory.size",
            MetricKind::Sum,
            MetricValue::Int(stats.mem_virtual),
        ),
        (
            "system.process.num_threads",
            MetricKind::Sum,
            MetricValue::Int(stats.threads),
        ),
        (
            "system.process.fd.open",
            MetricKind::Sum,
            MetricValue::Int(stats.fd_open),
        ),
        (
            "system.process.io.read.bytes",
            MetricKind::Sum,
            MetricValue::Int(stats.read_bytes),
        ),
        (
            "system.process.io.write.bytes",
            MetricKind::Sum,
            MetricValue::Int(stats.write_bytes),
        ),
        (
            "system.process.io.read.count",
            MetricKind::Sum,
            MetricValue::Int(stats.read_count),
        ),
        (
            "system.process.io.write.count",
            MetricKind::Sum,
            MetricValue::Int(stats.write_count),
        ),
    ];
    for (name, kind, value) in derived {
        append_metric(
            out,
            DerivedMetric {
                name: name.to_string(),
                kind,
                timestamp,
                value,
                // derived process metrics are scoped by their resource, not
                // by an entity attribute
                attributes: vec![],
            },
        );
    }
}
