// SPDX-License-Identifier: Apache-2.0

use super::{
    DerivedMetric, MetricKind, MetricValue, append_metric, capture_timestamp, double_value,
    int_value, string_kv, sum_data_points,
};
use crate::otlp::attr;
use crate::semconv::hostmetrics::{DEVICE, DIRECTION, DISKIO_DEVICE_NAME};
use opentelemetry_proto::tonic::metrics::v1::Metric;
use std::collections::HashMap;

const DISK_IO: &str = "system.disk.io";
const DISK_OPERATIONS: &str = "system.disk.operations";
const DISK_OPERATION_TIME: &str = "system.disk.operation_time";
const DISK_IO_TIME: &str = "system.disk.io_time";
const DISK_PENDING_OPERATIONS: &str = "system.disk.pending_operations";

/// Per-device accumulator, built over one scan and discarded on return.
/// Operation times are carried in seconds as reported by the source.
#[derive(Default)]
struct DiskStats {
    read_bytes: i64,
    write_bytes: i64,
    read_count: i64,
    write_count: i64,
    read_time: f64,
    write_time: f64,
    io_time: f64,
    pending_ops: i64,
}

pub(super) fn remap(metrics: &[Metric], out: &mut Vec<Metric>) {
    let mut devices: HashMap<String, DiskStats> = HashMap::new();
    let mut timestamp = 0u64;

    for metric in metrics {
        match metric.name.as_str() {
            DISK_IO | DISK_OPERATIONS => {
                for dp in sum_data_points(metric) {
                    let Some(device) = attr::get_str(DEVICE, &dp.attributes) else {
                        continue;
                    };
                    let Some(direction) = attr::get_str(DIRECTION, &dp.attributes) else {
                        continue;
                    };
                    capture_timestamp(&mut timestamp, dp);
                    let stats = devices.entry(device.to_string()).or_default();
                    let value = int_value(dp);
                    match (metric.name.as_str(), direction) {
                        (DISK_IO, "read") => stats.read_bytes = value,
                        (DISK_IO, "write") => stats.write_bytes = value,
                        (DISK_OPERATIONS, "read") => stats.read_count = value,
                        (DISK_OPERATIONS, "write") => stats.write_count = value,
                        _ => {}
                    }
                }
            }
            DISK_OPERATION_TIME => {
                for dp in sum_data_points(metric) {
                    let Some(device) = attr::get_str(DEVICE, &dp.attributes) else {
                        continue;
                    };
                    let Some(direction) = attr::get_str(DIRECTION, &dp.attributes) else {
                        continue;
                    };
                    capture_timestamp(&mut timestamp, dp);
                    let stats = devices.entry(device.to_string()).or_default();
                    match direction {
                        "read" => stats.read_time = double_value(dp),
                        "write" => stats.write_time = double_value(dp),
                        _ => {}
                    }
                }
            }
            DISK_IO_TIME => {
                for dp in sum_data_points(metric) {
                    let Some(device) = attr::get_str(DEVICE, &dp.attributes) else {
                        continue;
                    };
                    capture_timestamp(&mut timestamp, dp);
                    devices.entry(device.to_string()).or_default().io_time = double_value(dp);
                }
            }
            DISK_PENDING_OPERATIONS => {
                for dp in sum_data_points(metric) {
                    let Some(device) = attr::get_str(DEVICE, &dp.attributes) else {
                        continue;
                    };
                    capture_timestamp(&mut timestamp, dp);
                    devices.entry(device.to_string()).or_default().pending_ops = int_value(dp);
                }
            }
            _ => {}
        }
    }

    for (device, stats) in devices {
        // The source reports times in seconds; the legacy schema stores
        // milliseconds.
        let derived: [(&str, MetricValue); 8] = [
            ("system.diskio.read.bytes", MetricValue::Int(stats.read_bytes)),
            ("system.diskio.write.bytes", MetricValue::Int(stats.write_bytes)),
            ("system.diskio.read.count", MetricValue::Int(stats.read_count)),
            ("system.diskio.write.count", MetricValue::Int(stats.write_count)),
            (
                "system.diskio.read.time",
                MetricValue::Double(stats.read_time * 1000.0),
            ),
            (
                "system.diskio.write.time",
                MetricValue::Double(stats.write_time * 1000.0),
            ),
            (
                "system.diskio.io.time",
                MetricValue::Double(stats.io_time * 1000.0),
            ),
            ("system.diskio.io.ops", MetricValue::Int(stats.pending_ops)),
        ];
        for (name, value) in derived {
            append_metric(
                out,
                DerivedMetric {
                    name: name.to_string(),
                    kind: MetricKind::Sum,
                    timestamp,
                    value,
                    attributes: vec![string_kv(DISKIO_DEVICE_NAME, &device)],
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::common::v1::KeyValue;
    use utilities::otlp::{double_point, int_point, string_attr, sum_metric};

    const TS: u64 = 1_714_000_000_000_000_000;

    fn device_point_attrs(device: &str, direction: Option<&str>) -> Vec<KeyValue> {
        let mut attrs = vec![string_attr(DEVICE, device)];
        if let Some(d) = direction {
            attrs.push(string_attr(DIRECTION, d));
        }
        attrs
    }

    fn find<'a>(out: &'a [Metric], name: &str) -> &'a Metric {
        out.iter()
            .find(|m| m.name == name)
            .unwrap_or_else(|| panic!("missing derived metric {}", name))
    }

    #[test]
    fn test_disk_io_bytes() {
        let metrics = vec![sum_metric(
            DISK_IO,
            vec![int_point(device_point_attrs("sda", Some("read")), TS, 100)],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        // one device: the full fixed destination set
        assert_eq!(out.len(), 8);
        let m = find(&out, "system.diskio.read.bytes");
        let dp = &sum_data_points(m)[0];
        assert_eq!(int_value(dp), 100);
        assert_eq!(dp.time_unix_nano, TS);
        assert_eq!(
            attr::get_str(DISKIO_DEVICE_NAME, &dp.attributes),
            Some("sda")
        );
        // absent sources default to zero but are still emitted
        assert_eq!(int_value(&sum_data_points(find(&out, "system.diskio.write.bytes"))[0]), 0);
    }

    #[test]
    fn test_io_time_converted_to_milliseconds() {
        let metrics = vec![sum_metric(
            DISK_IO_TIME,
            vec![double_point(device_point_attrs("sda", None), TS, 2.0)],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        let m = find(&out, "system.diskio.io.time");
        assert_eq!(double_value(&sum_data_points(m)[0]), 2000.0);
    }

    #[test]
    fn test_operation_time_per_direction() {
        let metrics = vec![sum_metric(
            DISK_OPERATION_TIME,
            vec![
                double_point(device_point_attrs("sda", Some("read")), TS, 1.5),
                double_point(device_point_attrs("sda", Some("write")), TS, 0.5),
            ],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        assert_eq!(double_value(&sum_data_points(find(&out, "system.diskio.read.time"))[0]), 1500.0);
        assert_eq!(double_value(&sum_data_points(find(&out, "system.diskio.write.time"))[0]), 500.0);
    }

    #[test]
    fn test_datapoint_without_device_is_skipped() {
        let metrics = vec![sum_metric(
            DISK_IO,
            vec![int_point(vec![string_attr(DIRECTION, "read")], TS, 100)],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_direction_is_ignored() {
        let metrics = vec![sum_metric(
            DISK_IO,
            vec![
                int_point(device_point_attrs("sda", Some("sideways")), TS, 100),
                int_point(device_point_attrs("sda", Some("read")), TS, 7),
            ],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        assert_eq!(int_value(&sum_data_points(find(&out, "system.diskio.read.bytes"))[0]), 7);
        assert_eq!(int_value(&sum_data_points(find(&out, "system.diskio.write.bytes"))[0]), 0);
    }
}
