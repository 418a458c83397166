//! Android hardware keycodes (KeyEvent constants), indexed by code.

pub const KEYCODE_NAMES: [&str; 256] = [
    "UNKNOWN",
    "SOFT_LEFT",
    "SOFT_RIGHT",
    "HOME",
    "BACK",
    "CALL",
    "ENDCALL",
    "0",
    "1",
    "2",
    "3",
    "4",
    "5",
    "6",
    "7",
    "8",
    "9",
    "STAR",
    "POUND",
    "DPAD_UP",
    "DPAD_DOWN",
    "DPAD_LEFT",
    "DPAD_RIGHT",
    "DPAD_CENTER",
    "VOLUME_UP",
    "VOLUME_DOWN",
    "POWER",
    "CAMERA",
    "CLEAR",
    "A",
    "B",
    "C",
    "D",
    "E",
    "F",
    "G",
    "H",
    "I",
    "J",
    "K",
    "L",
    "M",
    "N",
    "O",
    "P",
    "Q",
    "R",
    "S",
    "T",
    "U",
    "V",
    "W",
    "X",
    "Y",
    "Z",
    "COMMA",
    "PERIOD",
    "ALT_LEFT",
    "ALT_RIGHT",
    "SHIFT_LEFT",
    "SHIFT_RIGHT",
    "TAB",
    "SPACE",
    "SYMBOL",
    "EXPLORER",
    "ENVELOPE",
    "ENTER",
    "DEL",
    "GRAVE",
    "MINUS",
    "EQUALS",
    "LEFT_BRACKET",
    "RIGHT_BRACKET",
    "BACKSLASH",
    "SEMICOLON",
    "APOSTROPHE",
    "SLASH",
    "AT",
    "NUM",
    "HEADSETHOOK",
    "FOCUS",
    "PLUS",
    "MENU",
    "NOTIFICATION",
    "SEARCH",
    "MEDIA_PLAY_PAUSE",
    "MEDIA_STOP",
    "MEDIA_NEXT",
    "MEDIA_PREVIOUS",
    "MEDIA_REWIND",
    "MEDIA_FAST_FORWARD",
    "MUTE",
    "PAGE_UP",
    "PAGE_DOWN",
    "PICTSYMBOLS",
    "SWITCH_CHARSET",
    "BUTTON_A",
    "BUTTON_B",
    "BUTTON_C",
    "BUTTON_X",
    "BUTTON_Y",
    "BUTTON_Z",
    "BUTTON_L1",
    "BUTTON_R1",
    "BUTTON_L2",
    "BUTTON_R2",
    "BUTTON_THUMBL",
    "BUTTON_THUMBR",
    "BUTTON_START",
    "BUTTON_SELECT",
    "BUTTON_MODE",
    "ESCAPE",
    "FORWARD_DEL",
    "CTRL_LEFT",
    "CTRL_RIGHT",
    "CAPS_LOCK",
    "SCROLL_LOCK",
    "META_LEFT",
    "META_RIGHT",
    "FUNCTION",
    "SYSRQ",
    "BREAK",
    "MOVE_HOME",
    "MOVE_END",
    "INSERT",
    "FORWARD",
    "MEDIA_PLAY",
    "MEDIA_PAUSE",
    "MEDIA_CLOSE",
    "MEDIA_EJECT",
    "MEDIA_RECORD",
    "F1",
    "F2",
    "F3",
    "F4",
    "F5",
    "F6",
    "F7",
    "F8",
    "F9",
    "F10",
    "F11",
    "F12",
    "NUM_LOCK",
    "NUMPAD_0",
    "NUMPAD_1",
    "NUMPAD_2",
    "NUMPAD_3",
    "NUMPAD_4",
    "NUMPAD_5",
    "NUMPAD_6",
    "NUMPAD_7",
    "NUMPAD_8",
    "NUMPAD_9",
    "NUMPAD_DIVIDE",
    "NUMPAD_MULTIPLY",
    "NUMPAD_SUBTRACT",
    "NUMPAD_ADD",
    "NUMPAD_DOT",
    "NUMPAD_COMMA",
    "NUMPAD_ENTER",
    "NUMPAD_EQUALS",
    "NUMPAD_LEFT_PAREN",
    "NUMPAD_RIGHT_PAREN",
    "VOLUME_MUTE",
    "INFO",
    "CHANNEL_UP",
    "CHANNEL_DOWN",
    "ZOOM_IN",
    "ZOOM_OUT",
    "TV",
    "WINDOW",
    "GUIDE",
    "DVR",
    "BOOKMARK",
    "CAPTIONS",
    "SETTINGS",
    "TV_POWER",
    "TV_INPUT",
    "STB_POWER",
    "STB_INPUT",
    "AVR_POWER",
    "AVR_INPUT",
    "PROG_RED",
    "PROG_GREEN",
    "PROG_YELLOW",
    "PROG_BLUE",
    "APP_SWITCH",
    "BUTTON_1",
    "BUTTON_2",
    "BUTTON_3",
    "BUTTON_4",
    "BUTTON_5",
    "BUTTON_6",
    "BUTTON_7",
    "BUTTON_8",
    "BUTTON_9",
    "BUTTON_10",
    "BUTTON_11",
    "BUTTON_12",
    "BUTTON_13",
    "BUTTON_14",
    "BUTTON_15",
    "BUTTON_16",
    "LANGUAGE_SWITCH",
    "MANNER_MODE",
    "3D_MODE",
    "CONTACTS",
    "CALENDAR",
    "MUSIC",
    "CALCULATOR",
    "ZENKAKU_HANKAKU",
    "EISU",
    "MUHENKAN",
    "HENKAN",
    "KATAKANA_HIRAGANA",
    "YEN",
    "RO",
    "KANA",
    "ASSIST",
    "BRIGHTNESS_DOWN",
    "BRIGHTNESS_UP",
    "MEDIA_AUDIO_TRACK",
    "SLEEP",
    "WAKEUP",
    "PAIRING",
    "MEDIA_SKIP_FORWARD",
    "MEDIA_SKIP_BACKWARD",
    "MEDIA_STEP_FORWARD",
    "MEDIA_STEP_BACKWARD",
    "SOFT_SLEEP",
    "CUT",
    "COPY",
    "PASTE",
    "SYSTEM_NAVIGATION_DOWN",
    "SYSTEM_NAVIGATION_LEFT",
    "SYSTEM_NAVIGATION_RIGHT",
    "SYSTEM_NAVIGATION_UP",
    "ALL_APPS",
    "REFRESH",
    "THUMBS_UP",
    "THUMBS_DOWN",
    "PROFILE_SWITCH",
    "CAMERA_FOCUS",
    "PAGE_UP",
    "PAGE_DOWN",
    "POWER",
    "POWER2",
    "POWER3",
    "POWEROFF",
    "SOUND",
    "VOLUME_MUTE",
    "HEADSETHOOK",
    "HITAMG",
    "MEDIA_RECORD",
    "UNKNOWN",
];

pub const QUICK_KEYS: [(&str, u8); 13] = [
    ("Vol +", 24),
    ("Vol -", 25),
    ("Power", 26),
    ("Home", 3),
    ("Back", 4),
    ("Menu", 82),
    ("Camera", 27),
    ("Search", 84),
    ("Play/Pause", 85),
    ("Next", 87),
    ("Prev", 88),
    ("Stop", 86),
    ("Assist", 219),
];

pub fn keycode_name(code: u8) -> &'static str {
    KEYCODE_NAMES[code as usize]
}

/// Accepts a plain decimal 0-255; anything else (sign, spaces inside, text)
/// is rejected.
pub fn parse_keycode(text: &str) -> Option<u8> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return None;
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed
        .parse::<u16>()
        .ok()
        .filter(|code| *code <= 255)
        .map(|code| code as u8)
}

pub fn is_valid_keycode(text: &str) -> bool {
    parse_keycode(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_full_keycode_range() {
        for code in 0u16..=255 {
            assert!(is_valid_keycode(&code.to_string()), "rejected {code}");
        }
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        for input in ["256", "-1", "abc", "", "1000", "+5", "1 2", "2.0"] {
            assert!(!is_valid_keycode(input), "accepted {input:?}");
        }
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        assert_eq!(parse_keycode(" 66 "), Some(66));
        assert_eq!(parse_keycode("007"), Some(7));
    }

    #[test]
    fn names_cover_common_keys() {
        assert_eq!(keycode_name(3), "HOME");
        assert_eq!(keycode_name(4), "BACK");
        assert_eq!(keycode_name(24), "VOLUME_UP");
        assert_eq!(keycode_name(26), "POWER");
        assert_eq!(keycode_name(66), "ENTER");
    }
}
