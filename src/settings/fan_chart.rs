//! The fan chart view's options registry, shipped as JSON next to this file.

use super::registry::OptionsRegistry;

const FAN_CHART_REGISTRY: &str = include_str!("fan_chart.json");

pub fn fan_chart_registry() -> Result<OptionsRegistry, serde_json::Error> {
    serde_json::from_str(FAN_CHART_REGISTRY)
}
