// SPDX-License-Identifier: Apache-2.0

use crate::exporters::elasticsearch::MappingMode;
use crate::exporters::elasticsearch::index::{
    DATA_STREAM_TYPE_LOGS, DATA_STREAM_TYPE_METRICS, DATA_STREAM_TYPE_TRACES,
    DEFAULT_DATA_STREAM_DATASET, DEFAULT_DATA_STREAM_NAMESPACE, Index,
};
use crate::exporters::elasticsearch::scope;
use crate::otlp::attr;
use crate::semconv::datastream::{
    DATA_STREAM_DATASET, DATA_STREAM_NAMESPACE, DATA_STREAM_TYPE, ELASTICSEARCH_INDEX,
    ENCODING_FORMAT,
};
use opentelemetry_proto::tonic::common::v1::{InstrumentationScope, KeyValue};
use opentelemetry_proto::tonic::resource::v1::Resource;
use thiserror::Error;

/// Dataset suffix marking documents produced under the OTel mapping mode.
const OTEL_DATASET_SUFFIX: &str = ".otel";

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("data_stream.type cannot be {0}, supported values are logs and metrics")]
    InvalidDataStreamType(String),
}

/// Resolves the destination index identity for each outgoing record.
///
/// Precedence, first match wins: an explicit `elasticsearch.index` record
/// attribute, explicit `data_stream.*` record attributes, a dataset derived
/// from the instrumentation scope, and finally the fixed defaults. Under the
/// OTel mapping mode the resolved dataset carries a `.otel` suffix; raw
/// index results bypass all dataset logic and are never suffixed.
#[derive(Clone, Copy, Debug)]
pub struct DocumentRouter {
    mode: MappingMode,
}

impl DocumentRouter {
    pub fn new(mode: MappingMode) -> Self {
        Self { mode }
    }

    pub fn route_log_record(
        &self,
        resource: &Resource,
        scope: &InstrumentationScope,
        record_attrs: &[KeyValue],
    ) -> Result<Index, RouterError> {
        self.route(resource, scope, record_attrs, DATA_STREAM_TYPE_LOGS)
    }

    pub fn route_data_point(
        &self,
        resource: &Resource,
        scope: &InstrumentationScope,
        record_attrs: &[KeyValue],
    ) -> Result<Index, RouterError> {
        self.route(resource, scope, record_attrs, DATA_STREAM_TYPE_METRICS)
    }

    pub fn route_span(
        &self,
        resource: &Resource,
        scope: &InstrumentationScope,
        record_attrs: &[KeyValue],
    ) -> Result<Index, RouterError> {
        self.route(resource, scope, record_attrs, DATA_STREAM_TYPE_TRACES)
    }

    fn route(
        &self,
        _resource: &Resource,
        scope: &InstrumentationScope,
        record_attrs: &[KeyValue],
        default_type: &str,
    ) -> Result<Index, RouterError> {
        // A raw index name short-circuits all data stream logic.
        if let Some(name) = attr::get_str(ELASTICSEARCH_INDEX, record_attrs) {
            return Ok(Index::raw(name));
        }

        let mut ds_type = default_type.to_string();
        // Only the bodymap mode lets a record override the caller-declared
        // type, and only within the accepted vocabulary.
        if self.mode == MappingMode::BodyMap {
            if let Some(requested) = attr::get_str(DATA_STREAM_TYPE, record_attrs) {
                match requested {
                    DATA_STREAM_TYPE_LOGS | DATA_STREAM_TYPE_METRICS => {
                        ds_type = requested.to_string()
                    }
                    other => return Err(RouterError::InvalidDataStreamType(other.to_string())),
                }
            }
        }

        let mut dataset = scope_dataset(scope)
            .unwrap_or_else(|| DEFAULT_DATA_STREAM_DATASET.to_string());
        let mut namespace = DEFAULT_DATA_STREAM_NAMESPACE.to_string();

        // Explicit record attributes override anything derived from the scope.
        if let Some(d) = attr::get_str(DATA_STREAM_DATASET, record_attrs) {
            dataset = d.to_string();
        }
        if let Some(n) = attr::get_str(DATA_STREAM_NAMESPACE, record_attrs) {
            namespace = n.to_string();
        }

        if self.mode == MappingMode::Otel {
            dataset.push_str(OTEL_DATASET_SUFFIX);
        }

        Ok(Index::data_stream(ds_type, dataset, namespace))
    }
}

/// Dataset derived from the instrumentation scope. Encoding extensions
/// advertise the format of the payloads they decode in a scope attribute;
/// that wins over the receiver name, covering receivers that load an
/// encoding extension and report under their own scope name.
fn scope_dataset(scope: &InstrumentationScope) -> Option<String> {
    if let Some(format) = attr::get_str(ENCODING_FORMAT, &scope.attributes) {
        return Some(format.to_string());
    }
    scope::receiver_component(&scope.name).map(str::to_string)
}
