// SPDX-License-Identifier: Apache-2.0

use std::fmt;

pub const DEFAULT_DATA_STREAM_DATASET: &str = "generic";
pub const DEFAULT_DATA_STREAM_NAMESPACE: &str = "default";
pub const DATA_STREAM_TYPE_LOGS: &str = "logs";
pub const DATA_STREAM_TYPE_METRICS: &str = "metrics";
pub const DATA_STREAM_TYPE_TRACES: &str = "traces";

/// Destination identity of one outgoing document.
///
/// Either a raw index name taken verbatim from the record, or a data stream
/// identity composed of type, dataset and namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Index {
    Raw(String),
    DataStream {
        ds_type: String,
        dataset: String,
        namespace: String,
    },
}

impl Index {
    pub fn raw(name: impl Into<String>) -> Self {
        Index::Raw(name.into())
    }

    pub fn data_stream(
        ds_type: impl Into<String>,
        dataset: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Index::DataStream {
            ds_type: ds_type.into(),
            dataset: dataset.into(),
            namespace: namespace.into(),
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Raw(name) => f.write_str(name),
            Index::DataStream {
                ds_type,
                dataset,
                namespace,
            } => write!(f, "{}-{}-{}", ds_type, dataset, namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_index_renders_verbatim() {
        assert_eq!(Index::raw("my-index").to_string(), "my-index");
    }

    #[test]
    fn test_data_stream_index_name() {
        let index = Index::data_stream(DATA_STREAM_TYPE_LOGS, "nginx.access", "production");
        assert_eq!(index.to_string(), "logs-nginx.access-production");
    }
}
