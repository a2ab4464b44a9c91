use chrono::Utc;
use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::common::v1::any_value::Value;
use opentelemetry_proto::tonic::common::v1::{AnyValue, InstrumentationScope, KeyValue};
use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};
use opentelemetry_proto::tonic::metrics::v1::metric::Data;
use opentelemetry_proto::tonic::metrics::v1::number_data_point::Value as PointValue;
use opentelemetry_proto::tonic::metrics::v1::{
    AggregationTemporality, Gauge, Metric, NumberDataPoint, ResourceMetrics, ScopeMetrics, Sum,
};
use opentelemetry_proto::tonic::resource::v1::Resource;
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;

/// Scope name reported by the contrib host metrics receiver scrapers.
pub const HOST_METRICS_SCOPE_NAME: &str =
    "github.com/open-telemetry/opentelemetry-collector-contrib/receiver/hostmetricsreceiver/internal/scraper/diskscraper";

pub struct FakeOTLP;

impl FakeOTLP {
    pub fn logs_service_request() -> ExportLogsServiceRequest {
        Self::logs_service_request_with_logs(1, 1)
    }

    pub fn logs_service_request_with_logs(
        num_resource_logs: usize,
        num_logs: usize,
    ) -> ExportLogsServiceRequest {
        let mut exp = ExportLogsServiceRequest {
            resource_logs: Vec::with_capacity(num_resource_logs),
        };
        for _i in 0..num_resource_logs {
            exp.resource_logs.push(Self::resource_logs(num_logs));
        }
        exp
    }

    fn resource_logs(num_logs: usize) -> ResourceLogs {
        let mut log_records = Vec::with_capacity(num_logs);
        let now_ns = Utc::now().timestamp_nanos_opt().unwrap();
        for _ in 0..num_logs {
            let log = LogRecord {
                time_unix_nano: now_ns as u64,
                observed_time_unix_nano: now_ns as u64,
                severity_number: 0,
                severity_text: "WARNING".to_string(),
                body: Some(AnyValue {
                    value: Some(Value::StringValue("This is a log message".to_string())),
                }),
                attributes: vec![],
                dropped_attributes_count: 0,
                flags: 0,
                trace_id: vec![],
                span_id: vec![],
                event_name: "".to_string(),
            };
            log_records.push(log);
        }

        let scope_logs = ScopeLogs {
            scope: None,
            log_records,
            schema_url: "https://opentelemetry.io/schemas/1.21.0".to_string(),
        };

        ResourceLogs {
            resource: Some(test_resource()),
            scope_logs: vec![scope_logs],
            schema_url: "https://opentelemetry.io/schemas/1.21.0".to_string(),
        }
    }

    pub fn metrics_service_request() -> ExportMetricsServiceRequest {
        Self::metrics_service_request_with_metrics(1, 1)
    }

    pub fn metrics_service_request_with_metrics(
        num_resource_metrics: usize,
        num_metrics: usize,
    ) -> ExportMetricsServiceRequest {
        let mut exp = ExportMetricsServiceRequest {
            resource_metrics: Vec::with_capacity(num_resource_metrics),
        };
        for _i in 0..num_resource_metrics {
            let mut metrics = Vec::with_capacity(num_metrics);
            let now_ns = Utc::now().timestamp_nanos_opt().unwrap();
            for _ in 0..num_metrics {
                metrics.push(gauge_metric(
                    "test-metric",
                    vec![double_point(vec![], now_ns as u64, 100.0)],
                ));
            }
            exp.resource_metrics
                .push(Self::resource_metrics(scope_metrics("", metrics)));
        }
        exp
    }

    /// One resource's worth of scoped metrics under a host-metrics receiver
    /// scope, as the host metrics receiver would deliver them.
    pub fn host_metrics_resource(metrics: Vec<Metric>) -> ResourceMetrics {
        Self::resource_metrics(scope_metrics(HOST_METRICS_SCOPE_NAME, metrics))
    }

    pub fn resource_metrics(scope_metrics: ScopeMetrics) -> ResourceMetrics {
        ResourceMetrics {
            resource: Some(test_resource()),
            scope_metrics: vec![scope_metrics],
            schema_url: "https://opentelemetry.io/schemas/1.21.0".to_string(),
        }
    }
}

fn test_resource() -> Resource {
    Resource {
        attributes: vec![
            string_attr(SERVICE_NAME, "test-service"),
            string_attr("telemetry.sdk.version", "1.13.0"),
            string_attr("telemetry.sdk.name", "open-telemetry"),
            string_attr("host.name", "ip-10-250-64-50.ec2.internal"),
        ],
        dropped_attributes_count: 0,
    }
}

pub fn scope_metrics(scope_name: &str, metrics: Vec<Metric>) -> ScopeMetrics {
    ScopeMetrics {
        scope: Some(InstrumentationScope {
            name: scope_name.to_string(),
            version: String::new(),
            attributes: vec![],
            dropped_attributes_count: 0,
        }),
        metrics,
        schema_url: "https://opentelemetry.io/schemas/1.21.0".to_string(),
    }
}

/// A cumulative sum metric with the given data points.
pub fn sum_metric(name: &str, data_points: Vec<NumberDataPoint>) -> Metric {
    Metric {
        name: name.to_string(),
        description: String::new(),
        unit: String::new(),
        metadata: vec![],
        data: Some(Data::Sum(Sum {
            data_points,
            aggregation_temporality: AggregationTemporality::Cumulative as i32,
            is_monotonic: true,
        })),
    }
}

pub fn gauge_metric(name: &str, data_points: Vec<NumberDataPoint>) -> Metric {
    Metric {
        name: name.to_string(),
        description: String::new(),
        unit: String::new(),
        metadata: vec![],
        data: Some(Data::Gauge(Gauge { data_points })),
    }
}

pub fn int_point(attributes: Vec<KeyValue>, time_unix_nano: u64, value: i64) -> NumberDataPoint {
    NumberDataPoint {
        attributes,
        start_time_unix_nano: 0,
        time_unix_nano,
        exemplars: vec![],
        flags: 0,
        value: Some(PointValue::AsInt(value)),
    }
}

pub fn double_point(attributes: Vec<KeyValue>, time_unix_nano: u64, value: f64) -> NumberDataPoint {
    NumberDataPoint {
        attributes,
        start_time_unix_nano: 0,
        time_unix_nano,
        exemplars: vec![],
        flags: 0,
        value: Some(PointValue::AsDouble(value)),
    }
}

/// A double point that also carries its cumulative start timestamp.
pub fn double_point_with_start(
    attributes: Vec<KeyValue>,
    start_time_unix_nano: u64,
    time_unix_nano: u64,
    value: f64,
) -> NumberDataPoint {
    NumberDataPoint {
        start_time_unix_nano,
        ..double_point(attributes, time_unix_nano, value)
    }
}

pub fn string_attr(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::StringValue(value.to_string())),
        }),
    }
}

pub fn int_attr(key: &str, value: i64) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(Value::IntValue(value)),
        }),
    }
}
