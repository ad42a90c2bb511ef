use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Read;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use vip_shipping_discount::discount::FunctionRunInput;
use vip_shipping_discount::error::AppError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Decodes a checkout payload; JSON errors surface as [`AppError::Input`].
pub(crate) fn read_function_input<R: Read>(reader: R) -> Result<FunctionRunInput, AppError> {
    let input = serde_json::from_reader(reader)?;
    Ok(input)
}
