// SPDX-License-Identifier: Apache-2.0

//! Translators deriving legacy Elastic system metrics from OTel host metrics.
//!
//! Each translator scans one scope's metric slice, accumulates values keyed
//! by entity (device, or the scope's process), and emits a fixed set of
//! derived metrics. Malformed datapoints are skipped, never errors: a
//! missing discriminator attribute or an unknown discriminator value drops
//! that datapoint and nothing else.

mod disk;
mod network;
mod process;
mod processes;

use opentelemetry_proto::tonic::common::v1::any_value::Value;
use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue};
use opentelemetry_proto::tonic::metrics::v1::metric::Data;
use opentelemetry_proto::tonic::metrics::v1::number_data_point::Value as PointValue;
use opentelemetry_proto::tonic::metrics::v1::{
    AggregationTemporality, Gauge, Metric, NumberDataPoint, ScopeMetrics, Sum,
};
use opentelemetry_proto::tonic::resource::v1::Resource;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemapError {
    #[error("malformed scope: {0}")]
    MalformedScope(String),
}

/// The host-metric families remapped to the legacy system schema. The set
/// is fixed and finite; dispatch happens over an ordered list held by the
/// caller, not through dynamic registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Translator {
    Disk,
    Network,
    Process,
    ProcessSummary,
}

pub const TRANSLATORS: [Translator; 4] = [
    Translator::Disk,
    Translator::Network,
    Translator::Process,
    Translator::ProcessSummary,
];

impl Translator {
    /// Scan one scope's metrics and append this translator's derived
    /// metrics to `out`.
    pub fn remap(&self, metrics: &[Metric], out: &mut Vec<Metric>) {
        match self {
            Translator::Disk => disk::remap(metrics, out),
            Translator::Network => network::remap(metrics, out),
            Translator::Process => process::remap(metrics, out),
            Translator::ProcessSummary => processes::remap(metrics, out),
        }
    }
}

/// Run every translator, in order, over one scope's metrics, appending the
/// derived metrics to `out`. The input is never mutated; the caller decides
/// where the derived metrics end up.
pub fn remap_scope_metrics(
    scope_metrics: &ScopeMetrics,
    _resource: &Resource,
    out: &mut Vec<Metric>,
) -> Result<(), RemapError> {
    if scope_metrics.scope.is_none() {
        return Err(RemapError::MalformedScope(
            "missing instrumentation scope".to_string(),
        ));
    }
    for translator in TRANSLATORS {
        translator.remap(&scope_metrics.metrics, out);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum MetricKind {
    Sum,
    Gauge,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum MetricValue {
    Int(i64),
    Double(f64),
}

/// A derived metric before it is turned into a proto `Metric`. Exactly one
/// value variant is populated, matching the legacy schema's field types.
pub(crate) struct DerivedMetric {
    pub name: String,
    pub kind: MetricKind,
    pub timestamp: u64,
    pub value: MetricValue,
    pub attributes: Vec<KeyValue>,
}

/// Construct a one-datapoint metric and append it to the output collection.
/// Shared by all translators; the only place derived protos are built.
pub(crate) fn append_metric(out: &mut Vec<Metric>, derived: DerivedMetric) {
    let value = match derived.value {
        MetricValue::Int(i) => PointValue::AsInt(i),
        MetricValue::Double(d) => PointValue::AsDouble(d),
    };
    let data_point = NumberDataPoint {
        attributes: derived.attributes,
        start_time_unix_nano: 0,
        time_unix_nano: derived.timestamp,
        exemplars: vec![],
        flags: 0,
        value: Some(value),
    };
    let data = match derived.kind {
        MetricKind::Sum => Data::Sum(Sum {
            data_points: vec![data_point],
            aggregation_temporality: AggregationTemporality::Cumulative as i32,
            is_monotonic: false,
        }),
        MetricKind::Gauge => Data::Gauge(Gauge {
            data_points: vec![data_point],
        }),
    };
    out.push(Metric {
        name: derived.name,
        description: String::new(),
        unit: String::new(),
        metadata: vec![],
        data: Some(data),
    });
}

/// Datapoints of a sum metric, or an empty slice for any other data shape.
pub(crate) fn sum_data_points(metric: &Metric) -> &[NumberDataPoint] {
    match &metric.data {
        Some(Data::Sum(sum)) => &sum.data_points,
        _ => &[],
    }
}

pub(crate) fn gauge_data_points(metric: &Metric) -> &[NumberDataPoint] {
    match &metric.data {
        Some(Data::Gauge(gauge)) => &gauge.data_points,
        _ => &[],
    }
}

pub(crate) fn int_value(dp: &NumberDataPoint) -> i64 {
    match dp.value {
        Some(PointValue::AsInt(i)) => i,
        Some(PointValue::AsDouble(d)) => d as i64,
        None => 0,
    }
}

pub(crate) fn double_value(dp: &NumberDataPoint) -> f64 {
    match dp.value {
        Some(PointValue::AsDouble(d)) => d,
        Some(PointValue::AsInt(i)) => i as f64,
        None => 0.0,
    }
}

/// Capture the first non-zero timestamp seen during a scan. Derived metrics
/// all carry this one timestamp for the invocation.
pub(crate) fn capture_timestamp(slot: &mut u64, dp: &NumberDataPoint) {
    if *slot == 0 && dp.time_unix_nano != 0 {
        *slot = dp.time_unix_nano;
    }
}

pub(crate) fn string_kv(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::StringValue(value.to_string())),
        }),
    }
}
