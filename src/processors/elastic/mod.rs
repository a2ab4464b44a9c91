// SPDX-License-Identifier: Apache-2.0

pub mod hostmetrics;

use crate::exporters::elasticsearch::scope;
use opentelemetry_proto::tonic::metrics::v1::{ResourceMetrics, ScopeMetrics};
use tracing::warn;

/// Receiver component name that identifies host-metric scopes.
const HOST_METRICS_RECEIVER: &str = "hostmetricsreceiver";

/// Short-form scope name reported by older collector builds, before scopes
/// carried the full module path.
const HOST_METRICS_SCOPE_PREFIX: &str = "otelcol/hostmetricsreceiver";

/// Configuration for the Elastic enrichment processor
#[derive(Debug, Clone, Default)]
pub struct ElasticProcessorConfig {
    /// Derive legacy system metrics from host-metric scopes
    pub add_system_metrics: bool,
}

impl ElasticProcessorConfig {
    pub fn new(add_system_metrics: bool) -> Self {
        Self { add_system_metrics }
    }
}

/// Applies the host-metric remappers across a batch of resource metrics.
///
/// The processor holds no state across invocations; accumulators live and
/// die inside a single remap call, so concurrent invocations over disjoint
/// batches are safe.
pub struct ElasticProcessor {
    config: ElasticProcessorConfig,
}

impl ElasticProcessor {
    pub fn new(config: ElasticProcessorConfig) -> Self {
        Self { config }
    }

    /// Enrich one batch. Scopes that fail to remap are logged and skipped;
    /// sibling scopes and resources are unaffected.
    pub fn process_metrics(&self, resource_metrics: &mut [ResourceMetrics]) {
        if !self.config.add_system_metrics {
            return;
        }
        for rm in resource_metrics.iter_mut() {
            let resource = rm.resource.clone().unwrap_or_default();
            for sm in rm.scope_metrics.iter_mut() {
                if !is_host_metrics_scope(sm) {
                    continue;
                }
                let mut derived = Vec::new();
                match hostmetrics::remap_scope_metrics(sm, &resource, &mut derived) {
                    Ok(()) => sm.metrics.append(&mut derived),
                    Err(err) => {
                        warn!("skipping system metrics enrichment for scope: {}", err)
                    }
                }
            }
        }
    }
}

fn is_host_metrics_scope(sm: &ScopeMetrics) -> bool {
    let name = sm.scope.as_ref().map(|s| s.name.as_str()).unwrap_or("");
    name.starts_with(HOST_METRICS_SCOPE_PREFIX)
        || scope::receiver_component(name) == Some(HOST_METRICS_RECEIVER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use utilities::otlp::{FakeOTLP, int_point, scope_metrics, string_attr, sum_metric};

    fn disk_io_metrics() -> Vec<opentelemetry_proto::tonic::metrics::v1::Metric> {
        vec![sum_metric(
            "system.disk.io",
            vec![int_point(
                vec![string_attr("device", "sda"), string_attr("direction", "read")],
                1_000,
                100,
            )],
        )]
    }

    #[test]
    fn test_enrichment_gated_on_config() {
        let mut batch = vec![FakeOTLP::host_metrics_resource(disk_io_metrics())];
        let before = batch[0].scope_metrics[0].metrics.len();

        ElasticProcessor::new(ElasticProcessorConfig::default()).process_metrics(&mut batch);
        assert_eq!(batch[0].scope_metrics[0].metrics.len(), before);

        ElasticProcessor::new(ElasticProcessorConfig::new(true)).process_metrics(&mut batch);
        assert!(batch[0].scope_metrics[0].metrics.len() > before);
    }

    #[test]
    fn test_short_form_scope_name_is_recognized() {
        let mut batch = vec![FakeOTLP::resource_metrics(scope_metrics(
            "otelcol/hostmetricsreceiver/disk",
            disk_io_metrics(),
        ))];
        ElasticProcessor::new(ElasticProcessorConfig::new(true)).process_metrics(&mut batch);
        assert!(batch[0].scope_metrics[0].metrics.len() > 1);
    }

    #[test]
    fn test_other_scopes_pass_through() {
        let mut batch = vec![FakeOTLP::resource_metrics(scope_metrics(
            "some_other_scope_name",
            disk_io_metrics(),
        ))];
        ElasticProcessor::new(ElasticProcessorConfig::new(true)).process_metrics(&mut batch);
        assert_eq!(batch[0].scope_metrics[0].metrics.len(), 1);
    }
}
