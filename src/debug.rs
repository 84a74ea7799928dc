use crate::util::Interval;
use crate::VehicleId;
use serde_json::json;

thread_local!(
    static DEBUG_FRAME: std::cell::RefCell<Vec<serde_json::Value>> = Default::default();
);

pub fn debug_window(name: &str, vehicle: VehicleId, window: Interval<f64>) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "window",
            "name": name,
            "vehicle": format!("{vehicle:?}"),
            "window": [window.min, window.max],
        }))
    })
}

pub fn debug_release(vehicle: VehicleId) {
    DEBUG_FRAME.with(|frame| {
        frame.borrow_mut().push(json!({
            "type": "release",
            "vehicle": format!("{vehicle:?}"),
        }))
    })
}

pub fn take_debug_frame() -> serde_json::Value {
    json!(DEBUG_FRAME.with(|frame| frame.take()))
}
