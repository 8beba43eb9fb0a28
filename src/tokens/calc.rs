//! Built-in step calculators.

use serde::{Deserialize, Serialize};

/// Linear size ramp: step `i` is `i * increment` to two decimals, plus a
/// unit.
///
/// ```rust
/// use stylesmith::SizeCalc;
///
/// let calc = SizeCalc::default();
/// assert_eq!(calc.value(3), "0.75rem");
/// assert_eq!(SizeCalc::default().increment(4.0).unit("px").value(2), "8.00px");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeCalc {
    pub increment: f64,
    pub unit: String,
}

impl SizeCalc {
    /// Default number of steps in a size scale.
    pub const DEFAULT_STEPS: u32 = 100;

    pub fn increment(mut self, increment: f64) -> Self {
        self.increment = increment;
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// The CSS literal for a 1-based step.
    pub fn value(&self, index: u32) -> String {
        format!("{:.2}{}", round_hundredths(f64::from(index) * self.increment), self.unit)
    }
}

impl Default for SizeCalc {
    fn default() -> Self {
        Self {
            increment: 0.25,
            unit: "rem".to_string(),
        }
    }
}

/// Fixed-hue color ramp with lightness interpolated from `min_lightness`
/// at step 1 to `max_lightness` at the last step.
///
/// ```rust
/// use stylesmith::HslaCalc;
///
/// let red = HslaCalc::new(0.0, 100.0);
/// assert_eq!(red.value(1, 9), "hsla(0,100%,10.00%,1)");
/// assert_eq!(red.value(9, 9), "hsla(0,100%,90.00%,1)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HslaCalc {
    pub hue: f64,
    pub saturation: f64,
    #[serde(default = "default_min_lightness")]
    pub min_lightness: f64,
    #[serde(default = "default_max_lightness")]
    pub max_lightness: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Lightness change per step; derived from the range when absent.
    #[serde(default)]
    pub increment: Option<f64>,
}

fn default_min_lightness() -> f64 {
    10.0
}

fn default_max_lightness() -> f64 {
    90.0
}

fn default_alpha() -> f64 {
    1.0
}

impl HslaCalc {
    /// Default number of steps in a color scale.
    pub const DEFAULT_STEPS: u32 = 9;

    pub fn new(hue: f64, saturation: f64) -> Self {
        Self {
            hue,
            saturation,
            min_lightness: default_min_lightness(),
            max_lightness: default_max_lightness(),
            alpha: default_alpha(),
            increment: None,
        }
    }

    pub fn lightness(mut self, min: f64, max: f64) -> Self {
        self.min_lightness = min;
        self.max_lightness = max;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn increment(mut self, increment: f64) -> Self {
        self.increment = Some(increment);
        self
    }

    /// Lightness change per step for a scale of `steps` steps.
    pub fn lightness_step(&self, steps: u32) -> f64 {
        match self.increment {
            Some(increment) => increment,
            None if steps > 1 => (self.max_lightness - self.min_lightness) / f64::from(steps - 1),
            None => 0.0,
        }
    }

    /// The CSS literal for a 1-based step of a `steps`-step scale.
    pub fn value(&self, index: u32, steps: u32) -> String {
        let lightness =
            self.min_lightness + f64::from(index.saturating_sub(1)) * self.lightness_step(steps);
        format!(
            "hsla({},{}%,{:.2}%,{})",
            self.hue,
            self.saturation,
            round_hundredths(lightness),
            self.alpha
        )
    }
}

/// Rounds to two decimals, ties away from zero (`0.125` becomes `0.13`).
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
