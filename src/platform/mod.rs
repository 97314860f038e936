//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer and touch tracking
//! - Device class detection (touch vs pointer)

use crate::sim::DeviceClass;

/// Latest pointer positions reported by the browser
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last mouse x; 0 until the mouse first moves
    pub mouse_x: f32,
    /// x of the first active touch, if any finger is down
    pub touch_x: Option<f32>,
}

impl PointerState {
    pub fn mouse_moved(&mut self, x: f32) {
        self.mouse_x = x;
    }

    /// First active touch moved or began
    pub fn touch_at(&mut self, x: f32) {
        self.touch_x = Some(x);
    }

    /// All touches lifted
    pub fn touches_ended(&mut self) {
        self.touch_x = None;
    }

    /// x driving the paddle: first touch wins over the mouse
    pub fn active_x(&self) -> f32 {
        self.touch_x.unwrap_or(self.mouse_x)
    }
}

/// Classify a browser user-agent string
pub fn device_class_from_user_agent(user_agent: &str) -> DeviceClass {
    let ua = user_agent.to_lowercase();
    if ua.contains("mobi") || ua.contains("android") {
        DeviceClass::Touch
    } else {
        DeviceClass::Pointer
    }
}

/// Device class of the running browser
#[cfg(target_arch = "wasm32")]
pub fn detect_device_class() -> DeviceClass {
    let user_agent = web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default();
    let class = device_class_from_user_agent(&user_agent);
    log::info!("Device class: {:?}", class);
    class
}

/// Native stub
#[cfg(not(target_arch = "wasm32"))]
pub fn detect_device_class() -> DeviceClass {
    DeviceClass::Pointer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_overrides_mouse() {
        let mut p = PointerState::default();
        assert_eq!(p.active_x(), 0.0);
        p.mouse_moved(120.0);
        assert_eq!(p.active_x(), 120.0);
        p.touch_at(40.0);
        assert_eq!(p.active_x(), 40.0);
        p.mouse_moved(300.0);
        assert_eq!(p.active_x(), 40.0);
        p.touches_ended();
        assert_eq!(p.active_x(), 300.0);
    }

    #[test]
    fn test_user_agent_classification() {
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
        assert_eq!(device_class_from_user_agent(android), DeviceClass::Touch);
        assert_eq!(device_class_from_user_agent(iphone), DeviceClass::Touch);
        assert_eq!(device_class_from_user_agent(desktop), DeviceClass::Pointer);
        assert_eq!(device_class_from_user_agent(""), DeviceClass::Pointer);
    }
}
