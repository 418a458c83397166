use regex::Regex;

use crate::app::models::DeviceSummary;

pub fn parse_adb_devices(output: &str) -> Vec<DeviceSummary> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !line.trim_start().starts_with('*'))
        .filter(|line| !line.to_lowercase().contains("list of devices"))
        .filter_map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 {
                return None;
            }
            let serial = tokens[0].to_string();
            let state = tokens[1].to_string();
            let model = tokens
                .iter()
                .skip(2)
                .find_map(|token| token.strip_prefix("model:"))
                .map(|value| value.to_string());
            Some(DeviceSummary {
                serial,
                state,
                model,
            })
        })
        .collect()
}

/// Canonical battery parser for `dumpsys battery`: the `level:` line wins.
pub fn parse_battery_level(output: &str) -> Option<u8> {
    for line in output.lines() {
        let trimmed = line.trim();
        if let Some(value) = trimmed.strip_prefix("level:") {
            if let Ok(level) = value.trim().parse::<u8>() {
                return Some(level);
            }
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemSnapshot {
    pub total_kb: u64,
    pub free_kb: u64,
}

impl MemSnapshot {
    pub fn summary(&self) -> String {
        format!(
            "{} MB free / {} MB total",
            self.free_kb / 1024,
            self.total_kb / 1024
        )
    }
}

pub fn parse_meminfo(output: &str) -> Option<MemSnapshot> {
    let mut total_kb = None;
    let mut free_kb = None;
    for line in output.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("MemTotal:") {
            total_kb = parse_kb_field(rest);
        } else if let Some(rest) = trimmed.strip_prefix("MemFree:") {
            free_kb = parse_kb_field(rest);
        }
        if total_kb.is_some() && free_kb.is_some() {
            break;
        }
    }
    Some(MemSnapshot {
        total_kb: total_kb?,
        free_kb: free_kb?,
    })
}

fn parse_kb_field(rest: &str) -> Option<u64> {
    rest.split_whitespace().next()?.parse::<u64>().ok()
}

/// Extract the wlan0 address from `ip -f inet addr show wlan0`. The CIDR
/// suffix is dropped.
pub fn parse_wlan_inet(output: &str) -> Option<String> {
    for line in output.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("inet ") {
            let address = rest.split_whitespace().next()?;
            let address = address.split('/').next().unwrap_or(address);
            if !address.is_empty() {
                return Some(address.to_string());
            }
        }
    }
    None
}

/// Usage percent of the data partition. Primary source is `df /data`; when
/// that yields nothing, `dumpsys storage` Total/Used figures are used.
pub fn parse_rom_usage_percent(output: &str) -> Option<u8> {
    let percent_re = Regex::new(r"(\d+)%").ok()?;
    for line in output.lines() {
        if !line.contains("/data") {
            continue;
        }
        if let Some(caps) = percent_re.captures(line) {
            if let Ok(percent) = caps[1].parse::<u8>() {
                return Some(percent.min(100));
            }
        }
    }

    let storage_re =
        Regex::new(r"Total:\s*([\d.]+)([KMG]?)\s*Used:\s*([\d.]+)([KMG]?)").ok()?;
    if let Some(caps) = storage_re.captures(output) {
        let total = scaled_mb(&caps[1], &caps[2])?;
        let used = scaled_mb(&caps[3], &caps[4])?;
        if total > 0.0 {
            return Some(((used / total) * 100.0).round().min(100.0) as u8);
        }
    }
    None
}

fn scaled_mb(value: &str, unit: &str) -> Option<f64> {
    let value = value.parse::<f64>().ok()?;
    let factor = match unit.to_uppercase().as_str() {
        "K" => 1.0 / 1024.0,
        "G" => 1024.0,
        _ => 1.0,
    };
    Some(value * factor)
}

/// Crash heuristic over a `logcat -d *:E` dump: FATAL/CRASH markers count
/// only when the package itself shows up in the dump.
pub fn count_crash_markers(log: &str, package: &str) -> u32 {
    if !log.contains(package) {
        return 0;
    }
    let fatal = log.matches("FATAL").count();
    let crash = log.matches("CRASH").count();
    (fatal + crash) as u32
}

pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            let name = trimmed.strip_prefix("package:").unwrap_or(trimmed);
            // `pm list packages -f` appends `=pkg` after the apk path
            let name = name.rsplit_once('=').map(|(_, pkg)| pkg).unwrap_or(name);
            if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            }
        })
        .collect()
}

/// Lines of a user script: blank lines and `#` comments are skipped.
pub fn parse_script_lines(script: &str) -> Vec<String> {
    script
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_adb_devices_output() {
        let output = "List of devices attached\n0123456789ABCDEF device product:sdk_gphone64_arm64 model:Pixel_7 device:emu64a transport_id:1\nemulator-5554 unauthorized transport_id:2\n* daemon started successfully\n";
        let parsed = parse_adb_devices(output);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].serial, "0123456789ABCDEF");
        assert_eq!(parsed[0].state, "device");
        assert_eq!(parsed[0].model.as_deref(), Some("Pixel_7"));
        assert_eq!(parsed[1].state, "unauthorized");
        assert_eq!(parsed[1].model, None);
    }

    #[test]
    fn parses_battery_level() {
        let output = "AC powered: false\nlevel: 76\nstatus: 2\n";
        assert_eq!(parse_battery_level(output), Some(76));
        assert_eq!(parse_battery_level("level: abc\n"), None);
        assert_eq!(parse_battery_level(""), None);
    }

    #[test]
    fn parses_meminfo_totals() {
        let output = "MemTotal:        3882924 kB\nMemFree:          524288 kB\nBuffers:           12345 kB\n";
        let snapshot = parse_meminfo(output).expect("meminfo");
        assert_eq!(snapshot.total_kb, 3_882_924);
        assert_eq!(snapshot.free_kb, 524_288);
        assert_eq!(snapshot.summary(), "512 MB free / 3791 MB total");
        assert_eq!(parse_meminfo("MemTotal: 1 kB\n"), None);
    }

    #[test]
    fn parses_wlan_inet_address() {
        let output = "24: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500\n    inet 192.168.1.42/24 brd 192.168.1.255 scope global wlan0\n";
        assert_eq!(parse_wlan_inet(output).as_deref(), Some("192.168.1.42"));
        assert_eq!(parse_wlan_inet("no address here"), None);
    }

    #[test]
    fn parses_rom_usage_from_df() {
        let output = "/dev/block/dm-0   8.0G   5.4G   2.2G  71% /data\n";
        assert_eq!(parse_rom_usage_percent(output), Some(71));
    }

    #[test]
    fn parses_rom_usage_from_dumpsys_fallback() {
        let output = "Storage summary\nTotal: 8.0G Used: 4.0G\n";
        assert_eq!(parse_rom_usage_percent(output), Some(50));
        assert_eq!(parse_rom_usage_percent("nothing useful"), None);
    }

    #[test]
    fn counts_crash_markers_only_for_the_package() {
        let log = "E/AndroidRuntime: FATAL EXCEPTION: main\nProcess: com.example.app\nE/ActivityManager: CRASH in com.example.app\n";
        assert_eq!(count_crash_markers(log, "com.example.app"), 2);
        assert_eq!(count_crash_markers(log, "com.other.app"), 0);
        assert_eq!(count_crash_markers("", "com.example.app"), 0);
    }

    #[test]
    fn parses_package_list() {
        let output = "package:com.example.one\npackage:com.example.two\n\n";
        assert_eq!(
            parse_package_list(output),
            vec!["com.example.one", "com.example.two"]
        );
        let with_paths = "package:/data/app/com.example/base.apk=com.example\n";
        assert_eq!(parse_package_list(with_paths), vec!["com.example"]);
    }

    #[test]
    fn filters_script_lines() {
        let script = "# comment\n\nshell getprop\n  reboot  \n# another\n";
        assert_eq!(parse_script_lines(script), vec!["shell getprop", "reboot"]);
    }
}
