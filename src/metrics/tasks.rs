//! The `dte_druid_tasks_total` gauge.

use std::collections::HashMap;

use prometheus::core::Desc;
use prometheus::proto::{Gauge, LabelPair, Metric, MetricFamily, MetricType};

use crate::models::TaskCountRecord;

pub const TASKS_METRIC_NAME: &str = "dte_druid_tasks_total";
pub const TASKS_METRIC_HELP: &str = "Total number of Druid tasks per type and status.";

const LABEL_TYPE: &str = "type";
const LABEL_STATUS: &str = "status";

/// Descriptor of the task count gauge, turned into samples per scrape.
#[derive(Clone, Debug)]
pub struct TasksGauge {
    desc: Desc,
}

impl TasksGauge {
    /// Declares the descriptor. Fails if the name or label names are not valid Prometheus identifiers.
    pub fn new() -> prometheus::Result<Self> {
        let desc = Desc::new(
            TASKS_METRIC_NAME.to_string(),
            TASKS_METRIC_HELP.to_string(),
            vec![LABEL_TYPE.to_string(), LABEL_STATUS.to_string()],
            HashMap::new(),
        )?;
        Ok(Self { desc })
    }

    /// One gauge sample per record, in input order and without merging
    /// duplicate label sets. `None` when there is nothing to expose, since the
    /// text encoder refuses families without samples.
    pub fn family(&self, records: &[TaskCountRecord]) -> Option<MetricFamily> {
        if records.is_empty() {
            return None;
        }

        let mut family = MetricFamily::default();
        family.set_name(self.desc.fq_name.clone());
        family.set_help(self.desc.help.clone());
        family.set_field_type(MetricType::GAUGE);
        for record in records {
            family.mut_metric().push(self.sample(record));
        }
        Some(family)
    }

    fn sample(&self, record: &TaskCountRecord) -> Metric {
        let values = [record.task_type.as_str(), record.status.as_str()];
        let mut labels: Vec<LabelPair> = self
            .desc
            .variable_labels
            .iter()
            .zip(values)
            .map(|(name, value)| {
                let mut pair = LabelPair::default();
                pair.set_name(name.clone());
                pair.set_value(value.to_string());
                pair
            })
            .collect();
        labels.sort_by(|a, b| a.get_name().cmp(b.get_name()));

        let mut gauge = Gauge::default();
        gauge.set_value(record.total as f64);

        let mut metric = Metric::default();
        metric.set_label(labels.into());
        metric.set_gauge(gauge);
        metric
    }
}
