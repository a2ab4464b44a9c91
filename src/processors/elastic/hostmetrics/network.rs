// SPDX-License-Identifier: Apache-2.0

use super::{
    DerivedMetric, MetricKind, MetricValue, append_metric, capture_timestamp, int_value,
    string_kv, sum_data_points,
};
use crate::otlp::attr;
use crate::semconv::hostmetrics::{DEVICE, DIRECTION, NETWORK_DEVICE_NAME};
use opentelemetry_proto::tonic::metrics::v1::Metric;
use std::collections::HashMap;

const NETWORK_IO: &str = "system.network.io";
const NETWORK_PACKETS: &str = "system.network.packets";
const NETWORK_DROPPED: &str = "system.network.dropped";
const NETWORK_ERRORS: &str = "system.network.errors";

/// Per-device accumulator. The receive direction maps to the legacy `in`
/// fields, transmit to `out`.
#[derive(Default)]
struct NetworkStats {
    in_bytes: i64,
    out_bytes: i64,
    in_packets: i64,
    out_packets: i64,
    in_dropped: i64,
    out_dropped: i64,
    in_errors: i64,
    out_errors: i64,
}

pub(super) fn remap(metrics: &[Metric], out: &mut Vec<Metric>) {
    let mut devices: HashMap<String, NetworkStats> = HashMap::new();
    let mut timestamp = 0u64;

    for metric in metrics {
        let name = metric.name.as_str();
        if !matches!(
            name,
            NETWORK_IO | NETWORK_PACKETS | NETWORK_DROPPED | NETWORK_ERRORS
        ) {
            continue;
        }
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
            match (name, direction) {
                (NETWORK_IO, "receive") => stats.in_bytes = value,
                (NETWORK_IO, "transmit") => stats.out_bytes = value,
                (NETWORK_PACKETS, "receive") => stats.in_packets = value,
                (NETWORK_PACKETS, "transmit") => stats.out_packets = value,
                (NETWORK_DROPPED, "receive") => stats.in_dropped = value,
                (NETWORK_DROPPED, "transmit") => stats.out_dropped = value,
                (NETWORK_ERRORS, "receive") => stats.in_errors = value,
                (NETWORK_ERRORS, "transmit") => stats.out_errors = value,
                _ => {}
            }
        }
    }

    for (device, stats) in devices {
        let derived: [(&str, i64); 8] = [
            ("system.network.in.bytes", stats.in_bytes),
            ("system.network.out.bytes", stats.out_bytes),
            ("system.network.in.packets", stats.in_packets),
            ("system.network.out.packets", stats.out_packets),
            ("system.network.in.dropped", stats.in_dropped),
            ("system.network.out.dropped", stats.out_dropped),
            ("system.network.in.errors", stats.in_errors),
            ("system.network.out.errors", stats.out_errors),
        ];
        for (name, value) in derived {
            append_metric(
                out,
                DerivedMetric {
                    name: name.to_string(),
                    kind: MetricKind::Sum,
                    timestamp,
                    value: MetricValue::Int(value),
                    attributes: vec![string_kv(NETWORK_DEVICE_NAME, &device)],
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::common::v1::KeyValue;
    use utilities::otlp::{int_point, string_attr, sum_metric};

    const TS: u64 = 1_714_000_000_000_000_000;

    fn device_attrs(device: &str, direction: &str) -> Vec<KeyValue> {
        vec![string_attr(DEVICE, device), string_attr(DIRECTION, direction)]
    }

    fn device_value(out: &[Metric], name: &str, device: &str) -> i64 {
        let dp = out
            .iter()
            .filter(|m| m.name == name)
            .flat_map(sum_data_points)
            .find(|dp| attr::get_str(NETWORK_DEVICE_NAME, &dp.attributes) == Some(device))
            .unwrap_or_else(|| panic!("missing {} for {}", name, device));
        int_value(dp)
    }

    #[test]
    fn test_two_devices_do_not_leak() {
        let metrics = vec![
            sum_metric(
                NETWORK_IO,
                vec![
                    int_point(device_attrs("eth0", "receive"), TS, 100),
                    int_point(device_attrs("eth0", "transmit"), TS, 200),
                    int_point(device_attrs("eth1", "receive"), TS, 300),
                    int_point(device_attrs("eth1", "transmit"), TS, 400),
                ],
            ),
            sum_metric(
                NETWORK_PACKETS,
                vec![
                    int_point(device_attrs("eth0", "receive"), TS, 10),
                    int_point(device_attrs("eth1", "receive"), TS, 30),
                ],
            ),
        ];
        let mut out = Vec::new();
        remap(&metrics, &mut out);

        // eight derived metrics per device
        assert_eq!(out.len(), 16);
        assert_eq!(device_value(&out, "system.network.in.bytes", "eth0"), 100);
        assert_eq!(device_value(&out, "system.network.out.bytes", "eth0"), 200);
        assert_eq!(device_value(&out, "system.network.in.bytes", "eth1"), 300);
        assert_eq!(device_value(&out, "system.network.out.bytes", "eth1"), 400);
        assert_eq!(device_value(&out, "system.network.in.packets", "eth0"), 10);
        assert_eq!(device_value(&out, "system.network.in.packets", "eth1"), 30);
        // never reported, still emitted with zero defaults
        assert_eq!(device_value(&out, "system.network.in.errors", "eth0"), 0);
        assert_eq!(device_value(&out, "system.network.out.dropped", "eth1"), 0);
    }

    #[test]
    fn test_datapoint_without_direction_is_skipped() {
        let metrics = vec![sum_metric(
            NETWORK_IO,
            vec![int_point(vec![string_attr(DEVICE, "eth0")], TS, 100)],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_unrelated_metrics_are_ignored() {
        let metrics = vec![sum_metric(
            "system.cpu.time",
            vec![int_point(device_attrs("eth0", "receive"), TS, 5)],
        )];
        let mut out = Vec::new();
        remap(&metrics, &mut out);
        assert!(out.is_empty());
    }
}
