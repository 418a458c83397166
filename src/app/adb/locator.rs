use std::path::Path;

pub fn normalize_command_path(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|candidate| candidate.strip_suffix('"'))
    {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed
        .strip_prefix('\'')
        .and_then(|candidate| candidate.strip_suffix('\''))
    {
        return inner.trim().to_string();
    }
    trimmed.to_string()
}

/// Resolve the program to invoke for a tool: the configured path if one is
/// set, otherwise the bare tool name for a PATH lookup.
pub fn resolve_tool_program(configured_path: &str, tool_name: &str) -> String {
    let normalized = normalize_command_path(configured_path);
    if normalized.is_empty() {
        tool_name.to_string()
    } else {
        normalized
    }
}

pub fn validate_tool_program(program: &str, tool_name: &str) -> Result<(), String> {
    if program.trim().is_empty() {
        return Err(format!("{tool_name} command is empty"));
    }
    if !program.contains('/') && !program.contains('\\') {
        // bare name, resolved through PATH at spawn time
        return Ok(());
    }
    let path = Path::new(program);
    if path.is_dir() {
        return Err(format!("{tool_name} path must point to an executable file"));
    }
    if !path.exists() {
        return Err(format!(
            "{tool_name} executable not found at the configured path"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wrapping_quotes() {
        assert_eq!(
            normalize_command_path("  \"/opt/android/platform-tools/adb\"  "),
            "/opt/android/platform-tools/adb"
        );
        assert_eq!(
            normalize_command_path("  '/opt/android/platform-tools/fastboot'  "),
            "/opt/android/platform-tools/fastboot"
        );
    }

    #[test]
    fn resolves_empty_to_tool_name() {
        assert_eq!(resolve_tool_program("", "adb"), "adb");
        assert_eq!(resolve_tool_program("   ", "fastboot"), "fastboot");
        assert_eq!(resolve_tool_program("/opt/adb", "adb"), "/opt/adb");
    }

    #[test]
    fn bare_names_pass_validation() {
        assert!(validate_tool_program("adb", "adb").is_ok());
        assert!(validate_tool_program("fastboot", "fastboot").is_ok());
    }

    #[test]
    fn rejects_nonexistent_configured_path() {
        let err = validate_tool_program("/this/path/should/not/exist/adb", "adb").unwrap_err();
        assert!(err.to_lowercase().contains("not found"));
    }

    #[test]
    fn rejects_empty_program() {
        assert!(validate_tool_program("   ", "adb").is_err());
    }
}
