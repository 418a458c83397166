/// Remote paths typed into the files tab end up on an adb command line;
/// keep them absolute and free of traversal.
pub fn validate_device_path(path: &str) -> Result<(), String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err("Device path is required".to_string());
    }
    if !trimmed.starts_with('/') {
        return Err("Device path must be absolute (start with '/')".to_string());
    }
    if trimmed.contains('\0') {
        return Err("Device path contains invalid characters".to_string());
    }
    if trimmed.split('/').any(|segment| segment == "..") {
        return Err("Device path must not contain '..' segments".to_string());
    }
    Ok(())
}

/// Reduce an arbitrary string to something safe inside a file name.
pub fn sanitize_filename_component(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_device_path_requires_absolute() {
        assert!(validate_device_path("").is_err());
        assert!(validate_device_path("sdcard/file.txt").is_err());
        assert!(validate_device_path("/sdcard/file.txt").is_ok());
        assert!(validate_device_path("/").is_ok());
    }

    #[test]
    fn validate_device_path_blocks_dotdot() {
        assert!(validate_device_path("/sdcard/../etc/passwd").is_err());
        assert!(validate_device_path("/sdcard/..").is_err());
        assert!(validate_device_path("/sdcard/a/../b").is_err());
    }

    #[test]
    fn sanitizes_filename_components() {
        assert_eq!(sanitize_filename_component("pixel 7 (wifi)"), "pixel_7__wifi_");
        assert_eq!(sanitize_filename_component("trace-id.1"), "trace-id.1");
        assert_eq!(sanitize_filename_component(""), "unnamed");
    }
}
