//! User preferences and their plain-text line format.
//!
//! Every line is `<key> <components...>`; the number of components is fixed per
//! key. Parsing is tolerant per field: an unknown key or a malformed token only
//! affects its own line, and the field keeps whatever value it had before.

use std::fmt;

/// RGBA color, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub [f32; 4]);

/// Size or position pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2(pub [f32; 2]);

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    // Colors
    pub window_bg_color: Rgba,
    pub header_color: Rgba,
    pub unity_project_color: Rgba,
    pub unreal_project_color: Rgba,
    pub button_color: Rgba,
    pub button_hover_color: Rgba,
    pub button_active_color: Rgba,
    pub text_color: Rgba,

    // Layout
    pub window_padding: f32,
    pub item_spacing: f32,
    pub column_width: f32,
    pub project_list_height: f32,

    // Window
    pub window_size: Vec2,
    pub window_position: Vec2,

    // Behavior
    pub show_project_type: bool,
    pub show_project_path: bool,
    pub use_compact_mode: bool,
    pub always_on_top: bool,
    pub remember_window_position: bool,
    pub remember_window_size: bool,
    pub auto_scan_on_start: bool,
    pub show_hidden_files: bool,
    pub sort_projects_by_name: bool,
    pub group_by_type: bool,
    pub show_scan_progress: bool,
    pub scan_depth: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_bg_color: Rgba([0.10, 0.10, 0.12, 1.0]),
            header_color: Rgba([0.20, 0.22, 0.27, 1.0]),
            unity_project_color: Rgba([0.40, 0.80, 0.40, 1.0]),
            unreal_project_color: Rgba([0.30, 0.60, 1.00, 1.0]),
            button_color: Rgba([0.26, 0.59, 0.98, 0.40]),
            button_hover_color: Rgba([0.26, 0.59, 0.98, 1.0]),
            button_active_color: Rgba([0.06, 0.53, 0.98, 1.0]),
            text_color: Rgba([1.0, 1.0, 1.0, 1.0]),

            window_padding: 10.0,
            item_spacing: 8.0,
            column_width: 0.5,
            project_list_height: 400.0,

            window_size: Vec2([1280.0, 720.0]),
            window_position: Vec2([0.0, 0.0]),

            show_project_type: true,
            show_project_path: false,
            use_compact_mode: false,
            always_on_top: false,
            remember_window_position: true,
            remember_window_size: true,
            auto_scan_on_start: true,
            show_hidden_files: false,
            sort_projects_by_name: true,
            group_by_type: true,
            show_scan_progress: true,
            scan_depth: 5,
        }
    }
}

/// Outcome of reading a single settings line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldParse {
    Applied,
    /// Known key, but the payload did not parse. The field is untouched.
    Malformed,
    Unknown,
    Empty,
}

/// Snapshot of one field, used for writing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Color([f32; 4]),
    Pair([f32; 2]),
    Float(f32),
    Flag(bool),
    Int(i32),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Color([r, g, b, a]) => write!(f, "{} {} {} {}", r, g, b, a),
            FieldValue::Pair([x, y]) => write!(f, "{} {}", x, y),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Flag(v) => write!(f, "{}", u8::from(*v)),
            FieldValue::Int(v) => write!(f, "{}", v),
        }
    }
}

enum FieldSlot<'a> {
    Color(&'a mut Rgba),
    Pair(&'a mut Vec2),
    Float(&'a mut f32),
    Flag(&'a mut bool),
    Int(&'a mut i32),
}

impl FieldSlot<'_> {
    /// Parses the payload first and only writes on success.
    fn assign(self, tokens: &[&str]) -> FieldParse {
        let applied = match self {
            FieldSlot::Color(slot) => parse_floats::<4>(tokens).map(|v| *slot = Rgba(v)),
            FieldSlot::Pair(slot) => parse_floats::<2>(tokens).map(|v| *slot = Vec2(v)),
            FieldSlot::Float(slot) => parse_floats::<1>(tokens).map(|[v]| *slot = v),
            FieldSlot::Flag(slot) => tokens.first().and_then(|t| parse_flag(t)).map(|v| *slot = v),
            FieldSlot::Int(slot) => tokens
                .first()
                .and_then(|t| t.parse::<i32>().ok())
                .map(|v| *slot = v),
        };
        match applied {
            Some(()) => FieldParse::Applied,
            None => FieldParse::Malformed,
        }
    }
}

fn parse_floats<const N: usize>(tokens: &[&str]) -> Option<[f32; N]> {
    if tokens.len() < N {
        return None;
    }
    let mut out = [0.0; N];
    // NaN and infinities are not valid channel or size values
    for (slot, token) in out.iter_mut().zip(tokens) {
        *slot = token.parse().ok().filter(|v: &f32| v.is_finite())?;
    }
    Some(out)
}

fn parse_flag(token: &str) -> Option<bool> {
    match token {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

impl Settings {
    /// Every field in file order.
    pub fn fields(&self) -> [(&'static str, FieldValue); 26] {
        use FieldValue::*;
        [
            ("windowBgColor", Color(self.window_bg_color.0)),
            ("headerColor", Color(self.header_color.0)),
            ("unityProjectColor", Color(self.unity_project_color.0)),
            ("unrealProjectColor", Color(self.unreal_project_color.0)),
            ("buttonColor", Color(self.button_color.0)),
            ("buttonHoverColor", Color(self.button_hover_color.0)),
            ("buttonActiveColor", Color(self.button_active_color.0)),
            ("textColor", Color(self.text_color.0)),
            ("windowPadding", Float(self.window_padding)),
            ("itemSpacing", Float(self.item_spacing)),
            ("columnWidth", Float(self.column_width)),
            ("projectListHeight", Float(self.project_list_height)),
            ("windowSize", Pair(self.window_size.0)),
            ("windowPosition", Pair(self.window_position.0)),
            ("showProjectType", Flag(self.show_project_type)),
            ("showProjectPath", Flag(self.show_project_path)),
            ("useCompactMode", Flag(self.use_compact_mode)),
            ("alwaysOnTop", Flag(self.always_on_top)),
            ("rememberWindowPosition", Flag(self.remember_window_position)),
            ("rememberWindowSize", Flag(self.remember_window_size)),
            ("autoScanOnStart", Flag(self.auto_scan_on_start)),
            ("showHiddenFiles", Flag(self.show_hidden_files)),
            ("sortProjectsByName", Flag(self.sort_projects_by_name)),
            ("groupByType", Flag(self.group_by_type)),
            ("showScanProgress", Flag(self.show_scan_progress)),
            ("scanDepth", Int(self.scan_depth)),
        ]
    }

    fn slot(&mut self, key: &str) -> Option<FieldSlot<'_>> {
        use FieldSlot::*;
        let slot = match key {
            "windowBgColor" => Color(&mut self.window_bg_color),
            "headerColor" => Color(&mut self.header_color),
            "unityProjectColor" => Color(&mut self.unity_project_color),
            "unrealProjectColor" => Color(&mut self.unreal_project_color),
            "buttonColor" => Color(&mut self.button_color),
            "buttonHoverColor" => Color(&mut self.button_hover_color),
            "buttonActiveColor" => Color(&mut self.button_active_color),
            "textColor" => Color(&mut self.text_color),
            "windowPadding" => Float(&mut self.window_padding),
            "itemSpacing" => Float(&mut self.item_spacing),
            "columnWidth" => Float(&mut self.column_width),
            "projectListHeight" => Float(&mut self.project_list_height),
            "windowSize" => Pair(&mut self.window_size),
            "windowPosition" => Pair(&mut self.window_position),
            "showProjectType" => Flag(&mut self.show_project_type),
            "showProjectPath" => Flag(&mut self.show_project_path),
            "useCompactMode" => Flag(&mut self.use_compact_mode),
            "alwaysOnTop" => Flag(&mut self.always_on_top),
            "rememberWindowPosition" => Flag(&mut self.remember_window_position),
            "rememberWindowSize" => Flag(&mut self.remember_window_size),
            "autoScanOnStart" => Flag(&mut self.auto_scan_on_start),
            "showHiddenFiles" => Flag(&mut self.show_hidden_files),
            "sortProjectsByName" => Flag(&mut self.sort_projects_by_name),
            "groupByType" => Flag(&mut self.group_by_type),
            "showScanProgress" => Flag(&mut self.show_scan_progress),
            "scanDepth" => Int(&mut self.scan_depth),
            _ => return None,
        };
        Some(slot)
    }

    /// Applies one `<key> <values...>` line. Trailing extra tokens are ignored.
    pub fn apply_line(&mut self, line: &str) -> FieldParse {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            return FieldParse::Empty;
        };
        let payload: Vec<&str> = tokens.collect();
        self.set(key, &payload)
    }

    pub fn set(&mut self, key: &str, values: &[&str]) -> FieldParse {
        match self.slot(key) {
            Some(slot) => slot.assign(values),
            None => FieldParse::Unknown,
        }
    }

    /// Overlays every recognized line of `content` onto `self`.
    pub fn overlay(&mut self, content: &str) {
        for (index, line) in content.lines().enumerate() {
            match self.apply_line(line) {
                FieldParse::Malformed => {
                    log::debug!("Ignoring malformed settings line {}: {:?}", index + 1, line)
                }
                FieldParse::Unknown => {
                    log::debug!("Ignoring unknown settings line {}: {:?}", index + 1, line)
                }
                FieldParse::Applied | FieldParse::Empty => {}
            }
        }
    }

    /// Defaults overlaid with `content`.
    pub fn parse(content: &str) -> Self {
        let mut settings = Self::default();
        settings.overlay(content);
        settings
    }

    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.fields() {
            out.push_str(&format!("{} {}\n", key, value));
        }
        out
    }

    /// `scanDepth` as a walk limit; zero or negative means unbounded.
    pub fn scan_depth_limit(&self) -> Option<usize> {
        usize::try_from(self.scan_depth).ok().filter(|d| *d > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn mutated() -> Settings {
        Settings {
            window_bg_color: Rgba([0.123_456_79, 0.0, 1.0, 0.5]),
            text_color: Rgba([0.3, 0.3, 0.3, 0.75]),
            window_padding: 14.5,
            column_width: 0.333_333_34,
            project_list_height: 612.25,
            window_size: Vec2([1920.0, 1080.0]),
            window_position: Vec2([-32.0, 17.5]),
            show_project_type: false,
            show_project_path: true,
            always_on_top: true,
            show_hidden_files: true,
            group_by_type: false,
            scan_depth: -1,
            ..Settings::default()
        }
    }

    #[test]
    fn defaults_round_trip() {
        let defaults = Settings::default();
        assert_eq!(Settings::parse(&defaults.to_file_string()), defaults);
    }

    #[test]
    fn mutated_values_round_trip() {
        let settings = mutated();
        assert_eq!(Settings::parse(&settings.to_file_string()), settings);
    }

    #[test]
    fn every_written_key_is_readable() {
        let mut settings = Settings::default();
        let mut seen = HashSet::new();
        for (key, _) in Settings::default().fields() {
            assert!(seen.insert(key), "duplicate key {}", key);
            assert!(settings.slot(key).is_some(), "unreadable key {}", key);
        }
        assert_eq!(seen.len(), 26);
    }

    #[test]
    fn file_lines_follow_fixed_order() {
        let text = Settings::default().to_file_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 26);
        assert_eq!(lines[0], "windowBgColor 0.1 0.1 0.12 1");
        assert_eq!(lines[8], "windowPadding 10");
        assert_eq!(lines[12], "windowSize 1280 720");
        assert_eq!(lines[15], "showProjectPath 0");
        assert_eq!(lines[25], "scanDepth 5");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn one_recognized_key_among_garbage() {
        let content = "garbage here\n\nitemSpacing 3.5\n%%% 1 2 3\nwindowSize\n";
        let parsed = Settings::parse(content);
        let expected = Settings {
            item_spacing: 3.5,
            ..Settings::default()
        };
        assert_eq!(parsed, expected);
    }

    #[test]
    fn malformed_payload_keeps_prior_value() {
        let mut settings = mutated();
        let before = settings.clone();

        assert_eq!(settings.apply_line("windowBgColor 0.5 oops 0.5 1"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("windowSize 800"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("alwaysOnTop 2"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("alwaysOnTop true"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("scanDepth 4.5"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("columnWidth"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("columnWidth NaN"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("windowSize inf 720"), FieldParse::Malformed);
        assert_eq!(settings.apply_line("textColor 1 1 -infinity 1"), FieldParse::Malformed);
        assert_eq!(settings, before);
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let mut settings = Settings::default();
        assert_eq!(settings.apply_line("scanDepth 9 10 11"), FieldParse::Applied);
        assert_eq!(settings.apply_line("  useCompactMode   1  "), FieldParse::Applied);
        assert_eq!(settings.scan_depth, 9);
        assert!(settings.use_compact_mode);
    }

    #[test]
    fn unknown_and_blank_lines() {
        let mut settings = Settings::default();
        assert_eq!(settings.apply_line("fontSize 12"), FieldParse::Unknown);
        assert_eq!(settings.apply_line("   "), FieldParse::Empty);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn set_uses_line_rules() {
        let mut settings = Settings::default();
        assert_eq!(
            settings.set("headerColor", &["0", "0.25", "0.5", "1"]),
            FieldParse::Applied
        );
        assert_eq!(settings.header_color, Rgba([0.0, 0.25, 0.5, 1.0]));
        assert_eq!(settings.set("nope", &["1"]), FieldParse::Unknown);
    }

    #[test]
    fn scan_depth_limit_treats_non_positive_as_unbounded() {
        let mut settings = Settings::default();
        assert_eq!(settings.scan_depth_limit(), Some(5));
        settings.scan_depth = 0;
        assert_eq!(settings.scan_depth_limit(), None);
        settings.scan_depth = -3;
        assert_eq!(settings.scan_depth_limit(), None);
    }
}
