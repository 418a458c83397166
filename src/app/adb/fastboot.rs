pub fn parse_fastboot_devices(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            let mut tokens = trimmed.split_whitespace();
            let serial = tokens.next()?;
            match tokens.next() {
                Some("fastboot") | Some("fastbootd") => Some(serial.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Partition names accepted for flash/erase. Keeps obvious garbage (and
/// option-looking input) out of the fastboot command line.
pub fn validate_partition_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Partition name is required".to_string());
    }
    if trimmed.starts_with('-') {
        return Err(format!("Invalid partition name: {trimmed}"));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(format!("Invalid partition name: {trimmed}"));
    }
    Ok(())
}

pub fn flash_args(partition: &str, image_path: &str) -> Vec<String> {
    vec![
        "flash".to_string(),
        partition.trim().to_string(),
        image_path.to_string(),
    ]
}

pub fn erase_args(partition: &str) -> Vec<String> {
    vec!["erase".to_string(), partition.trim().to_string()]
}

pub fn oem_unlock_args() -> Vec<String> {
    vec!["oem".to_string(), "unlock".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fastboot_devices_output() {
        let output = "0A1B2C3D\tfastboot\nXYZ987\tfastbootd\n\ngarbage line without state\n";
        assert_eq!(parse_fastboot_devices(output), vec!["0A1B2C3D", "XYZ987"]);
        assert!(parse_fastboot_devices("").is_empty());
    }

    #[test]
    fn validates_partition_names() {
        assert!(validate_partition_name("system").is_ok());
        assert!(validate_partition_name("vendor_boot").is_ok());
        assert!(validate_partition_name("boot-a").is_ok());
        assert!(validate_partition_name("").is_err());
        assert!(validate_partition_name("sys tem").is_err());
        assert!(validate_partition_name("--wipe").is_err());
        assert!(validate_partition_name("-w").is_err());
    }

    #[test]
    fn builds_flash_and_erase_args() {
        assert_eq!(
            flash_args("system", "/tmp/system.img"),
            vec!["flash", "system", "/tmp/system.img"]
        );
        assert_eq!(erase_args(" cache "), vec!["erase", "cache"]);
        assert_eq!(oem_unlock_args(), vec!["oem", "unlock"]);
    }
}
