use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::constants::*;
use crate::error::ConfigError;

/// Tunables for a desktop instance.
///
/// Every field has a default, so a config file only needs to name the values
/// it overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesktopConfig {
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: u32,
    #[serde(default = "default_taskbar_height")]
    pub taskbar_height: u32,
    #[serde(default)]
    pub chrome: ChromeConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChromeConfig {
    #[serde(default = "default_header_height")]
    pub header_height: u32,
    #[serde(default = "default_handle_thickness")]
    pub handle_thickness: u32,
    #[serde(default = "default_control_width")]
    pub control_width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfig {
    #[serde(default = "default_cascade_origin")]
    pub cascade_origin: i32,
    #[serde(default = "default_cascade_step")]
    pub cascade_step: i32,
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default = "default_min_width")]
    pub min_width: u32,
    #[serde(default = "default_min_height")]
    pub min_height: u32,
}

fn default_snap_threshold() -> u32 {
    DEFAULT_SNAP_THRESHOLD
}
fn default_taskbar_height() -> u32 {
    DEFAULT_TASKBAR_HEIGHT
}
fn default_double_click_ms() -> u64 {
    DOUBLE_CLICK_MS
}
fn default_notification_ms() -> u64 {
    NOTIFICATION_LIFETIME_MS
}
fn default_header_height() -> u32 {
    DEFAULT_HEADER_HEIGHT
}
fn default_handle_thickness() -> u32 {
    DEFAULT_HANDLE_THICKNESS
}
fn default_control_width() -> u32 {
    DEFAULT_CONTROL_WIDTH
}
fn default_cascade_origin() -> i32 {
    CASCADE_ORIGIN
}
fn default_cascade_step() -> i32 {
    CASCADE_STEP
}
fn default_window_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}
fn default_window_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}
fn default_min_width() -> u32 {
    DEFAULT_MIN_WIDTH
}
fn default_min_height() -> u32 {
    DEFAULT_MIN_HEIGHT
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            handle_thickness: DEFAULT_HANDLE_THICKNESS,
            control_width: DEFAULT_CONTROL_WIDTH,
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            cascade_origin: CASCADE_ORIGIN,
            cascade_step: CASCADE_STEP,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            taskbar_height: DEFAULT_TASKBAR_HEIGHT,
            chrome: ChromeConfig::default(),
            placement: PlacementConfig::default(),
            double_click_ms: DOUBLE_CLICK_MS,
            notification_ms: NOTIFICATION_LIFETIME_MS,
        }
    }
}

impl DesktopConfig {
    /// Cell-scale metrics for a terminal surface where one layout unit is one
    /// character cell.
    pub fn terminal() -> Self {
        Self {
            snap_threshold: 2,
            taskbar_height: 1,
            chrome: ChromeConfig {
                header_height: 2,
                handle_thickness: 1,
                control_width: 3,
            },
            placement: PlacementConfig {
                cascade_origin: 2,
                cascade_step: 2,
                window_width: 44,
                window_height: 12,
                min_width: 16,
                min_height: 5,
            },
            ..Self::default()
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let buf = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: DesktopConfig = toml::from_str(&buf).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut issues = Vec::new();
        if self.chrome.header_height == 0 {
            issues.push("chrome.header_height must be at least 1".to_string());
        }
        if self.chrome.handle_thickness >= self.placement.min_width.max(1) {
            issues.push("chrome.handle_thickness must be smaller than placement.min_width".to_string());
        }
        if self.placement.window_width < self.placement.min_width
            || self.placement.window_height < self.placement.min_height
        {
            issues.push("placement window size must not be below the minimum size".to_string());
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues.join("; ")))
        }
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
