use crate::configuration::Configuration;
use serde_json::json;

thread_local!(
    static DEBUG_TRACE: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

pub fn debug_configuration(stage: &str, config: &Configuration) {
    DEBUG_TRACE.with(|trace| {
        trace.borrow_mut().push(json!({
            "type": "configuration",
            "stage": stage,
            "lanes": config.inlanes().map(|id| format!("{:?}", id)).collect::<Vec<_>>(),
        }))
    })
}

/// Takes the configurations recorded on this thread since the last call, as a JSON array.
pub fn take_debug_trace() -> serde_json::Value {
    json!(DEBUG_TRACE.with(|trace| trace.take()))
}
