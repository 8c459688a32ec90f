use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;
use crate::horizontal::GimbalBand;
use crate::smoother::AxisSmoothing;
use crate::vertical::TiltWindow;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    #[serde(deserialize_with = "top_axis")]
    pub top: AxisSmoothing,
    #[serde(deserialize_with = "left_axis")]
    pub left: AxisSmoothing,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            top: AxisSmoothing::TOP,
            left: AxisSmoothing::LEFT,
        }
    }
}

/// One smoothing axis as written in JSON. Omitted fields keep the axis preset.
#[derive(Deserialize)]
struct AxisOverride {
    movement_limit: Option<f64>,
    dampening: Option<f64>,
}

impl AxisOverride {
    fn over(self, preset: AxisSmoothing) -> AxisSmoothing {
        AxisSmoothing {
            movement_limit: self.movement_limit.unwrap_or(preset.movement_limit),
            dampening: self.dampening.unwrap_or(preset.dampening),
        }
    }
}

fn top_axis<'de, D>(de: D) -> Result<AxisSmoothing, D::Error>
where
    D: Deserializer<'de>,
{
    AxisOverride::deserialize(de).map(|o| o.over(AxisSmoothing::TOP))
}

fn left_axis<'de, D>(de: D) -> Result<AxisSmoothing, D::Error>
where
    D: Deserializer<'de>,
{
    AxisOverride::deserialize(de).map(|o| o.over(AxisSmoothing::LEFT))
}

/// Delays for the layout recompute chain, in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Quiet period after the last resize event before it is acted on.
    pub resize_debounce_ms: f64,
    /// Wait after a rotation for the platform layout to settle before re-measuring.
    pub settle_delay_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resize_debounce_ms: 10.0,
            settle_delay_ms: 500.0,
        }
    }
}

/// Tunables for the whole pipeline. Every field has a default, so a partial
/// JSON document only overrides what it names.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tilt: TiltWindow,
    pub gimbal: GimbalBand,
    pub smoothing: SmoothingConfig,
    pub timing: TimingConfig,
}

impl PipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("tilt.min_beta", self.tilt.min_beta),
            ("tilt.max_beta", self.tilt.max_beta),
            ("gimbal.lower", self.gimbal.lower),
            ("gimbal.upper", self.gimbal.upper),
            ("smoothing.top.movement_limit", self.smoothing.top.movement_limit),
            ("smoothing.top.dampening", self.smoothing.top.dampening),
            ("smoothing.left.movement_limit", self.smoothing.left.movement_limit),
            ("smoothing.left.dampening", self.smoothing.left.dampening),
            ("timing.resize_debounce_ms", self.timing.resize_debounce_ms),
            ("timing.settle_delay_ms", self.timing.settle_delay_ms),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.tilt.min_beta >= self.tilt.max_beta {
            return Err(ConfigError::TiltWindow {
                min_beta: self.tilt.min_beta,
                max_beta: self.tilt.max_beta,
            });
        }
        if self.gimbal.lower > self.gimbal.upper {
            return Err(ConfigError::GimbalBand {
                lower: self.gimbal.lower,
                upper: self.gimbal.upper,
            });
        }

        for (axis, smoothing) in [("top", self.smoothing.top), ("left", self.smoothing.left)] {
            if !(0.0..=1.0).contains(&smoothing.dampening) {
                return Err(ConfigError::Dampening {
                    axis,
                    value: smoothing.dampening,
                });
            }
            if smoothing.movement_limit < 0.0 {
                return Err(ConfigError::MovementLimit {
                    axis,
                    value: smoothing.movement_limit,
                });
            }
        }

        for (field, value) in [
            ("timing.resize_debounce_ms", self.timing.resize_debounce_ms),
            ("timing.settle_delay_ms", self.timing.settle_delay_ms),
        ] {
            if value < 0.0 {
                return Err(ConfigError::NegativeDelay { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineConfig;
    use crate::error::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_validate() {
        let c = PipelineConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.tilt.min_beta, 50.0);
        assert_eq!(c.tilt.max_beta, 150.0);
        assert_eq!(c.smoothing.top.movement_limit, 5.0);
        assert_eq!(c.smoothing.left.dampening, 0.8);
        assert_eq!(c.timing.settle_delay_ms, 500.0);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let c = PipelineConfig::from_json_str(r#"{ "tilt": { "max_beta": 120 } }"#).unwrap();
        let mut expected = PipelineConfig::default();
        expected.tilt.max_beta = 120.0;
        assert_eq!(c, expected);
    }

    #[test]
    fn partial_smoothing_axis_keeps_its_preset() {
        let c = PipelineConfig::from_json_str(
            r#"{ "smoothing": { "top": { "dampening": 0.5 }, "left": { "movement_limit": 20 } } }"#,
        )
        .unwrap();
        let mut expected = PipelineConfig::default();
        expected.smoothing.top.dampening = 0.5;
        expected.smoothing.left.movement_limit = 20.0;
        assert_eq!(c, expected);
        assert_eq!(c.smoothing.top.movement_limit, 5.0);
        assert_eq!(c.smoothing.left.dampening, 0.8);
    }

    #[test]
    fn empty_smoothing_axis_is_its_preset() {
        let c = PipelineConfig::from_json_str(r#"{ "smoothing": { "left": {} } }"#).unwrap();
        assert_eq!(c, PipelineConfig::default());
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(
            PipelineConfig::from_json_str("{}").unwrap(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn rejects_inverted_tilt_window() {
        let err = PipelineConfig::from_json_str(r#"{ "tilt": { "min_beta": 150, "max_beta": 150 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::TiltWindow { .. }));
    }

    #[test]
    fn rejects_out_of_range_dampening() {
        let err = PipelineConfig::from_json_str(
            r#"{ "smoothing": { "left": { "movement_limit": 10, "dampening": 1.5 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Dampening { axis: "left", .. }));
    }

    #[test]
    fn rejects_negative_delay() {
        let mut c = PipelineConfig::default();
        c.timing.settle_delay_ms = -1.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NegativeDelay { field: "timing.settle_delay_ms", .. })
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ tilt"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn json_round_trips_through_pretty_printer() {
        let c = PipelineConfig::default();
        let text = c.to_json_pretty().unwrap();
        assert_eq!(PipelineConfig::from_json_str(&text).unwrap(), c);
    }
}
