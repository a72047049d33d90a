use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ZoomChartConfig;

pub const ZOOM_CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ZoomChartConfig,
}

impl ZoomChartConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ZoomChartConfigJsonContractV1 {
            schema_version: ZOOM_CHART_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(config) = serde_json::from_str::<ZoomChartConfig>(input) {
            return Ok(config);
        }
        let payload: ZoomChartConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse config json payload: {e}"))
        })?;
        if payload.schema_version != ZOOM_CHART_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidConfig(format!(
                "unsupported config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }
}
