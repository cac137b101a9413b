#![forbid(unsafe_code)]

//! Tunable parameters for pinch behavior.
//!
//! Every field defaults to the values the list has always shipped with, so
//! `PinchConfig::default()` reproduces stock behavior. With the `config`
//! feature the struct can also be loaded from TOML or JSON:
//!
//! ```toml
//! collapsed_dp = 2.0
//! expanded_dp = 80.0
//! density = 2.0
//! base_duration_ms = 250
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{PinchError, Result};
use crate::height::{HeightRange, dp_to_px};

/// Default collapsed row height in density-independent units.
pub const DEFAULT_COLLAPSED_DP: f32 = 2.0;
/// Default expanded row height in density-independent units.
pub const DEFAULT_EXPANDED_DP: f32 = 80.0;
/// Scale-factor amplification so small pinches cover the full range.
pub const DEFAULT_SCALE_SENSITIVITY: f32 = 8.0;
/// Duration of a full collapsed-to-expanded settle animation.
pub const DEFAULT_BASE_DURATION_MS: u64 = 200;

/// Pinch configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PinchConfig {
    /// Collapsed height in dp. Default: 2.
    pub collapsed_dp: f32,
    /// Expanded height in dp. Default: 80.
    pub expanded_dp: f32,
    /// Pixels per dp. Default: 1.0.
    pub density: f32,
    /// Multiplier applied to `scale_factor - 1`. Default: 8.
    pub scale_sensitivity: f32,
    /// Release above this fraction always snaps open. Default: 0.85.
    pub snap_expand_above: f32,
    /// Release below this fraction always snaps closed. Default: 0.15.
    pub snap_collapse_below: f32,
    /// Settle duration for a full-range move, in ms. Default: 200.
    pub base_duration_ms: u64,
    /// Anchor grouping radius as a fraction of the expanded height. Default: 1/3.
    pub grouping_vicinity_fraction: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            collapsed_dp: DEFAULT_COLLAPSED_DP,
            expanded_dp: DEFAULT_EXPANDED_DP,
            density: 1.0,
            scale_sensitivity: DEFAULT_SCALE_SENSITIVITY,
            snap_expand_above: 0.85,
            snap_collapse_below: 0.15,
            base_duration_ms: DEFAULT_BASE_DURATION_MS,
            grouping_vicinity_fraction: 1.0 / 3.0,
        }
    }
}

impl PinchConfig {
    /// Set the display density (builder pattern).
    #[must_use]
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set collapsed/expanded heights in dp (builder pattern).
    #[must_use]
    pub fn with_heights_dp(mut self, collapsed: f32, expanded: f32) -> Self {
        self.collapsed_dp = collapsed;
        self.expanded_dp = expanded;
        self
    }

    /// Set the full-range settle duration (builder pattern).
    #[must_use]
    pub fn with_base_duration_ms(mut self, ms: u64) -> Self {
        self.base_duration_ms = ms;
        self
    }

    /// Pixel height range derived from the dp heights and density.
    pub fn height_range(&self) -> Result<HeightRange> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(PinchError::InvalidDensity(self.density));
        }
        HeightRange::new(
            dp_to_px(self.collapsed_dp, self.density),
            dp_to_px(self.expanded_dp, self.density),
        )
    }

    /// Grouping vicinity in pixels for a given expanded height.
    #[must_use]
    pub fn grouping_vicinity_px(&self, expanded: i32) -> i32 {
        (expanded as f32 * self.grouping_vicinity_fraction).round() as i32
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        self.height_range()?;
        if !self.scale_sensitivity.is_finite() || self.scale_sensitivity <= 0.0 {
            return Err(PinchError::InvalidParameter {
                name: "scale_sensitivity",
                value: self.scale_sensitivity,
            });
        }
        // Zero disables collapsed-run grouping.
        if !self.grouping_vicinity_fraction.is_finite() || self.grouping_vicinity_fraction < 0.0 {
            return Err(PinchError::InvalidParameter {
                name: "grouping_vicinity_fraction",
                value: self.grouping_vicinity_fraction,
            });
        }
        let (lo, hi) = (self.snap_collapse_below, self.snap_expand_above);
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(PinchError::InvalidThresholds {
                collapse_below: lo,
                expand_above: hi,
            });
        }
        Ok(())
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(PinchError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PinchError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(PinchError::Json)?;
        config.validate()?;
        Ok(config)
    }
}
