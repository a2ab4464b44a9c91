// SPDX-License-Identifier: Apache-2.0

// Attributes that steer document routing. Records and scopes may carry
// these to override the destination data stream.

pub const DATA_STREAM_TYPE: &str = "data_stream.type";
pub const DATA_STREAM_DATASET: &str = "data_stream.dataset";
pub const DATA_STREAM_NAMESPACE: &str = "data_stream.namespace";

/// Raw index override. When present on a record it bypasses all data stream
/// routing.
pub const ELASTICSEARCH_INDEX: &str = "elasticsearch.index";

/// Scope attribute set by encoding extensions to advertise the format of the
/// payloads they decode.
pub const ENCODING_FORMAT: &str = "encoding.format";
