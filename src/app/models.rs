use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSummary {
    pub serial: String,
    pub state: String,
    pub model: Option<String>,
}

impl DeviceSummary {
    pub fn is_ready(&self) -> bool {
        self.state == "device"
    }

    pub fn label(&self) -> String {
        match &self.model {
            Some(model) => format!("{} ({})", self.serial, model),
            None => self.serial.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolInfo {
    pub available: bool,
    pub version_output: String,
    pub command_path: String,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_summary_ready_and_label() {
        let device = DeviceSummary {
            serial: "0123ABCD".to_string(),
            state: "device".to_string(),
            model: Some("Pixel_7".to_string()),
        };
        assert!(device.is_ready());
        assert_eq!(device.label(), "0123ABCD (Pixel_7)");

        let unauthorized = DeviceSummary {
            serial: "emulator-5554".to_string(),
            state: "unauthorized".to_string(),
            model: None,
        };
        assert!(!unauthorized.is_ready());
        assert_eq!(unauthorized.label(), "emulator-5554");
    }
}
