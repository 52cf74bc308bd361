//! Formatted metric mapping.

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::estimator::RawMetrics;
use ps_core::format_fixed;

/// The six metric keys, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    SettlingTime,
    Overshoot,
    RiseTime,
    SteadyStateError,
    Iae,
    Ise,
}

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::SettlingTime,
        MetricKey::Overshoot,
        MetricKey::RiseTime,
        MetricKey::SteadyStateError,
        MetricKey::Iae,
        MetricKey::Ise,
    ];

    /// Key used in serialized output.
    pub fn name(self) -> &'static str {
        match self {
            MetricKey::SettlingTime => "settlingTime",
            MetricKey::Overshoot => "overshoot",
            MetricKey::RiseTime => "riseTime",
            MetricKey::SteadyStateError => "steadyStateError",
            MetricKey::Iae => "iae",
            MetricKey::Ise => "ise",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricKey::SettlingTime => "Settling time",
            MetricKey::Overshoot => "Overshoot",
            MetricKey::RiseTime => "Rise time",
            MetricKey::SteadyStateError => "Steady-state error",
            MetricKey::Iae => "IAE",
            MetricKey::Ise => "ISE",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            MetricKey::SettlingTime | MetricKey::RiseTime => "s",
            MetricKey::Overshoot => "%",
            MetricKey::SteadyStateError | MetricKey::Iae | MetricKey::Ise => "",
        }
    }

    /// Decimal places used when formatting the value.
    pub fn decimals(self) -> u32 {
        match self {
            MetricKey::Overshoot => 1,
            MetricKey::SteadyStateError => 4,
            MetricKey::SettlingTime | MetricKey::RiseTime | MetricKey::Iae | MetricKey::Ise => 2,
        }
    }
}

impl std::fmt::Display for MetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricEntry {
    pub key: MetricKey,
    pub value: String,
    pub unit: &'static str,
}

impl Serialize for MetricEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MetricEntry", 2)?;
        s.serialize_field("value", &self.value)?;
        s.serialize_field("unit", self.unit)?;
        s.end()
    }
}

/// Ordered mapping of metric key to formatted value and unit.
///
/// Always holds exactly the six keys of [`MetricKey::ALL`], in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    entries: [MetricEntry; 6],
}

impl MetricSet {
    pub fn from_raw(raw: &RawMetrics) -> Self {
        let entries = MetricKey::ALL.map(|key| MetricEntry {
            key,
            value: format_fixed(raw.get(key), key.decimals()),
            unit: key.unit(),
        });
        Self { entries }
    }

    pub fn get(&self, key: MetricKey) -> &MetricEntry {
        // entries are stored in MetricKey::ALL order
        let idx = MetricKey::ALL
            .iter()
            .position(|k| *k == key)
            .unwrap_or_default();
        &self.entries[idx]
    }

    pub fn value(&self, key: MetricKey) -> &str {
        &self.get(key).value
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<'a> IntoIterator for &'a MetricSet {
    type Item = &'a MetricEntry;
    type IntoIter = std::slice::Iter<'a, MetricEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.key.name(), entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate;

    #[test]
    fn keys_are_in_presentation_order() {
        let set = estimate(1.0, 0.5, 0.1).to_metric_set();
        let names: Vec<&str> = set.iter().map(|e| e.key.name()).collect();
        assert_eq!(
            names,
            ["settlingTime", "overshoot", "riseTime", "steadyStateError", "iae", "ise"]
        );
    }

    #[test]
    fn units_follow_keys() {
        let set = estimate(1.0, 0.5, 0.1).to_metric_set();
        assert_eq!(set.get(MetricKey::SettlingTime).unit, "s");
        assert_eq!(set.get(MetricKey::Overshoot).unit, "%");
        assert_eq!(set.get(MetricKey::Ise).unit, "");
    }

    #[test]
    fn serializes_as_ordered_object() {
        let set = estimate(1.2, 0.6, 0.0).to_metric_set();
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.starts_with(r#"{"settlingTime":{"value":"4.44","unit":"s"}"#));
        assert!(json.ends_with(r#""ise":{"value":"7.90","unit":""}}"#));
    }
}
