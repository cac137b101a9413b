#![forbid(unsafe_code)]

//! Error model for pinch configuration and host attachment.
//!
//! Only boundary operations fail: configuring heights or thresholds, loading a
//! [`PinchConfig`](crate::config::PinchConfig), and attaching to a host whose
//! rows cannot be classified. Gesture input and animation requests are
//! clamped, never rejected, so none of the per-frame paths return errors.

use std::fmt;

/// Errors produced at configuration or attach time.
#[derive(Debug)]
pub enum PinchError {
    /// `expanded` must be strictly greater than `collapsed`, and both non-negative.
    InvalidHeightRange { collapsed: i32, expanded: i32 },
    /// Snap thresholds must satisfy `0 <= collapse_below <= expand_above <= 1`.
    InvalidThresholds { collapse_below: f32, expand_above: f32 },
    /// Display density must be finite and positive.
    InvalidDensity(f32),
    /// A tuning parameter is non-finite or outside its allowed range.
    InvalidParameter { name: &'static str, value: f32 },
    /// The host exposes no [`PinchAdapter`](crate::host::PinchAdapter).
    AdapterNotPinchable,
    /// I/O error reading a configuration file.
    #[cfg(feature = "config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
}

/// Standard result type for pinch-core APIs.
pub type Result<T> = std::result::Result<T, PinchError>;

impl fmt::Display for PinchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeightRange {
                collapsed,
                expanded,
            } => write!(
                f,
                "invalid height range: expanded ({expanded}px) must exceed collapsed ({collapsed}px) and both must be non-negative"
            ),
            Self::InvalidThresholds {
                collapse_below,
                expand_above,
            } => write!(
                f,
                "invalid snap thresholds: collapse_below={collapse_below}, expand_above={expand_above}"
            ),
            Self::InvalidDensity(density) => write!(f, "invalid display density: {density}"),
            Self::InvalidParameter { name, value } => write!(f, "invalid {name}: {value}"),
            Self::AdapterNotPinchable => {
                write!(f, "host row source does not implement PinchAdapter")
            }
            #[cfg(feature = "config")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

impl std::error::Error for PinchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_both_bounds() {
        let err = PinchError::InvalidHeightRange {
            collapsed: 40,
            expanded: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("40px"));
        assert!(msg.contains("10px"));
    }

    #[test]
    fn boundary_errors_have_no_source() {
        use std::error::Error as _;
        assert!(PinchError::AdapterNotPinchable.source().is_none());
        assert!(PinchError::InvalidDensity(0.0).source().is_none());
    }

    #[test]
    fn display_names_the_parameter() {
        let err = PinchError::InvalidParameter {
            name: "scale_sensitivity",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "invalid scale_sensitivity: 0");
    }
}
