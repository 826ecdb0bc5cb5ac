//! Wheel event normalization.
//!
//! Hosts report wheel motion in several incompatible conventions. Each one is
//! mapped onto a single signed delta where one wheel notch is `1/30` and a
//! positive value means "zoom in".

use serde::{Deserialize, Serialize};

/// Normalized delta for a single wheel notch.
pub const NOTCH_DELTA: f64 = 1.0 / 30.0;

/// Legacy `mousewheel` events report multiples of this per notch.
const WHEEL_DELTA_PER_NOTCH: f64 = 120.0;
/// `DOMMouseScroll` events report multiples of this per notch.
const DETAIL_PER_NOTCH: f64 = 3.0;
/// Typical `deltaY` of a pixel-mode `wheel` event for one notch.
const PIXELS_PER_NOTCH: f64 = 100.0;
/// Lines per page when a `wheel` event is in page mode.
const LINES_PER_PAGE: f64 = 30.0;

/// Unit of `RawWheel::delta_y` (the W3C `deltaMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Map the numeric DOM `deltaMode` value.
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => DeltaMode::Line,
            2 => DeltaMode::Page,
            _ => DeltaMode::Pixel,
        }
    }
}

/// A wheel reading as reported by the host, before normalization.
///
/// Every field is optional because each convention fills a different one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWheel {
    /// `wheelDelta` of a legacy `mousewheel` event (+120 per notch away from the user).
    pub wheel_delta: Option<f64>,
    /// `detail` of a `DOMMouseScroll` event (-3 per notch away from the user).
    pub detail: Option<f64>,
    /// `deltaY` of a W3C `wheel` event (negative away from the user).
    pub delta_y: Option<f64>,
    #[serde(default)]
    pub delta_mode: DeltaMode,
}

impl RawWheel {
    pub fn from_wheel_delta(wheel_delta: f64) -> Self {
        Self { wheel_delta: Some(wheel_delta), ..Self::default() }
    }

    pub fn from_detail(detail: f64) -> Self {
        Self { detail: Some(detail), ..Self::default() }
    }

    pub fn from_delta_y(delta_y: f64, delta_mode: DeltaMode) -> Self {
        Self { delta_y: Some(delta_y), delta_mode, ..Self::default() }
    }
}

/// Strategy for turning a `RawWheel` into a normalized delta.
///
/// Chosen once when the controller is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WheelConvention {
    /// Legacy `mousewheel` (WebKit/Blink/IE).
    WheelDelta,
    /// `DOMMouseScroll` (Gecko).
    Detail,
    /// W3C `wheel` with `deltaY` and `deltaMode`.
    Standard,
    /// Use whichever field the event carries.
    #[default]
    Auto,
}

impl WheelConvention {
    /// Pick the legacy convention a browser with this user agent fires.
    pub fn for_user_agent(user_agent: &str) -> Self {
        if user_agent.to_lowercase().contains("webkit") {
            WheelConvention::WheelDelta
        } else {
            WheelConvention::Detail
        }
    }

    /// DOM event name that carries this convention.
    pub fn event_name(self) -> &'static str {
        match self {
            WheelConvention::WheelDelta => "mousewheel",
            WheelConvention::Detail => "DOMMouseScroll",
            WheelConvention::Standard | WheelConvention::Auto => "wheel",
        }
    }

    /// Normalize a raw reading. Missing fields yield zero.
    pub fn normalize(self, raw: &RawWheel) -> f64 {
        match self {
            WheelConvention::WheelDelta => raw.wheel_delta.map_or(0.0, from_wheel_delta),
            WheelConvention::Detail => raw.detail.map_or(0.0, from_detail),
            WheelConvention::Standard => raw
                .delta_y
                .map_or(0.0, |delta_y| from_delta_y(delta_y, raw.delta_mode)),
            WheelConvention::Auto => {
                if let Some(wheel_delta) = raw.wheel_delta {
                    from_wheel_delta(wheel_delta)
                } else if let Some(detail) = raw.detail {
                    from_detail(detail)
                } else if let Some(delta_y) = raw.delta_y {
                    from_delta_y(delta_y, raw.delta_mode)
                } else {
                    0.0
                }
            }
        }
    }
}

fn from_wheel_delta(wheel_delta: f64) -> f64 {
    wheel_delta / WHEEL_DELTA_PER_NOTCH * NOTCH_DELTA
}

fn from_detail(detail: f64) -> f64 {
    -detail / DETAIL_PER_NOTCH * NOTCH_DELTA
}

fn from_delta_y(delta_y: f64, mode: DeltaMode) -> f64 {
    let notches = match mode {
        DeltaMode::Pixel => delta_y / PIXELS_PER_NOTCH,
        DeltaMode::Line => delta_y / DETAIL_PER_NOTCH,
        DeltaMode::Page => delta_y * LINES_PER_PAGE / DETAIL_PER_NOTCH,
    };
    -notches * NOTCH_DELTA
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_one_notch_is_equal_across_conventions() {
        let conventions = [
            (WheelConvention::WheelDelta, RawWheel::from_wheel_delta(120.0)),
            (WheelConvention::Detail, RawWheel::from_detail(-3.0)),
            (WheelConvention::Standard, RawWheel::from_delta_y(-100.0, DeltaMode::Pixel)),
            (WheelConvention::Standard, RawWheel::from_delta_y(-3.0, DeltaMode::Line)),
            (WheelConvention::Standard, RawWheel::from_delta_y(-0.1, DeltaMode::Page)),
        ];
        for (convention, raw) in conventions {
            assert!(close(convention.normalize(&raw), NOTCH_DELTA), "{convention:?} {raw:?}");
        }
    }

    #[test]
    fn test_wheel_delta_matches_legacy_scale() {
        let delta = WheelConvention::WheelDelta.normalize(&RawWheel::from_wheel_delta(-360.0));
        assert!(close(delta, -360.0 / 3600.0));
    }

    #[test]
    fn test_detail_matches_legacy_scale() {
        let delta = WheelConvention::Detail.normalize(&RawWheel::from_detail(9.0));
        assert!(close(delta, 9.0 / -90.0));
    }

    #[test]
    fn test_fixed_convention_ignores_other_fields() {
        let raw = RawWheel::from_detail(-3.0);
        assert_eq!(WheelConvention::WheelDelta.normalize(&raw), 0.0);
        assert_eq!(WheelConvention::Standard.normalize(&raw), 0.0);
    }

    #[test]
    fn test_auto_picks_present_field() {
        let auto = WheelConvention::Auto;
        assert!(close(auto.normalize(&RawWheel::from_wheel_delta(240.0)), 2.0 * NOTCH_DELTA));
        assert!(close(auto.normalize(&RawWheel::from_detail(3.0)), -NOTCH_DELTA));
        assert!(close(
            auto.normalize(&RawWheel::from_delta_y(200.0, DeltaMode::Pixel)),
            -2.0 * NOTCH_DELTA
        ));
        assert_eq!(auto.normalize(&RawWheel::default()), 0.0);
    }

    #[test]
    fn test_for_user_agent() {
        let chrome = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0";
        let firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";
        assert_eq!(WheelConvention::for_user_agent(chrome), WheelConvention::WheelDelta);
        assert_eq!(WheelConvention::for_user_agent(firefox), WheelConvention::Detail);
    }

    #[test]
    fn test_delta_mode_from_dom() {
        assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
    }
}
