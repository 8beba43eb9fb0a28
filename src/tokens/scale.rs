//! Lazily computed token scales.
//!
//! A scale declares the keys `{prefix}-1` through `{prefix}-{steps}`. Each
//! value is computed on its first lookup and cached for the life of the
//! scale, so scales held in statics memoize for the life of the process.
//! Only looked-up steps occupy memory.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::calc::{HslaCalc, SizeCalc};
use crate::error::ConfigError;

type Calc = Box<dyn Fn(u32) -> String + Send + Sync>;

/// An indexed family of generated CSS values.
///
/// # Example
///
/// ```rust
/// use stylesmith::ScaleConfig;
///
/// let sizes = ScaleConfig::size("sm-size").steps(5).build().unwrap();
/// assert_eq!(sizes.get("sm-size-3").as_deref(), Some("0.75rem"));
/// assert_eq!(sizes.get("sm-size-6"), None);
/// assert_eq!(sizes.get("md-size-3"), None);
/// ```
pub struct Scale {
    prefix: String,
    steps: u32,
    calc: Calc,
    values: DashMap<u32, Arc<str>>,
}

impl Scale {
    /// Creates a scale from a calculator taking a 1-based step index.
    pub fn new<F>(prefix: impl Into<String>, steps: u32, calc: F) -> Result<Self, ConfigError>
    where
        F: Fn(u32) -> String + Send + Sync + 'static,
    {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyScalePrefix);
        }
        if steps == 0 {
            return Err(ConfigError::ZeroSteps { prefix });
        }

        Ok(Self {
            prefix,
            steps,
            calc: Box::new(calc),
            values: DashMap::new(),
        })
    }

    /// Starts a size scale configuration.
    ///
    /// ```rust
    /// use stylesmith::Scale;
    ///
    /// let sizes = Scale::size("sm-size").steps(5).build().unwrap();
    /// assert_eq!(sizes.get("sm-size-3").as_deref(), Some("0.75rem"));
    /// ```
    pub fn size(prefix: impl Into<String>) -> ScaleConfig {
        ScaleConfig::size(prefix)
    }

    /// Starts a color scale configuration.
    pub fn hsla(prefix: impl Into<String>, hue: f64, saturation: f64) -> ScaleConfig {
        ScaleConfig::hsla(prefix, hue, saturation)
    }

    /// Creates a scale from a declarative configuration.
    pub fn from_config(config: &ScaleConfig) -> Result<Self, ConfigError> {
        let steps = config.resolved_steps();
        match &config.kind {
            ScaleKind::Size(size) => {
                let size = size.clone();
                Scale::new(config.prefix.clone(), steps, move |i| size.value(i))
            }
            ScaleKind::Hsla(hsla) => {
                let hsla = hsla.clone();
                Scale::new(config.prefix.clone(), steps, move |i| hsla.value(i, steps))
            }
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Looks up a key. Keys outside the scale yield `None`.
    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        self.index_of(key).and_then(|index| self.value(index))
    }

    /// Looks up a 1-based step.
    pub fn value(&self, index: u32) -> Option<Arc<str>> {
        if !(1..=self.steps).contains(&index) {
            return None;
        }
        if let Some(value) = self.values.get(&index) {
            return Some(Arc::clone(value.value()));
        }
        // The entry holds its shard lock while computing, so each step is
        // computed at most once.
        let value = self.values.entry(index).or_insert_with(|| {
            let value = (self.calc)(index);
            trace!(prefix = %self.prefix, index, value = %value, "computed scale step");
            value.into()
        });
        Some(Arc::clone(value.value()))
    }

    /// Parses `{prefix}-{index}` into an in-range index. Indices must be
    /// written canonically (no sign, no leading zeros).
    pub fn index_of(&self, key: &str) -> Option<u32> {
        let digits = key.strip_prefix(self.prefix.as_str())?.strip_prefix('-')?;
        if digits.is_empty()
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let index: u32 = digits.parse().ok()?;
        (1..=self.steps).contains(&index).then_some(index)
    }

    /// The declared keys in step order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.steps).map(move |i| format!("{}-{}", self.prefix, i))
    }

    /// Every `(key, value)` pair in step order, computing as needed.
    pub fn entries(&self) -> impl Iterator<Item = (String, Arc<str>)> + '_ {
        (1..=self.steps).filter_map(move |i| {
            self.value(i)
                .map(|value| (format!("{}-{}", self.prefix, i), value))
        })
    }

    /// Number of steps computed so far.
    pub fn computed(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Debug for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scale")
            .field("prefix", &self.prefix)
            .field("steps", &self.steps)
            .field("computed", &self.computed())
            .finish()
    }
}

/// Which built-in calculator a configured scale uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleKind {
    Size(SizeCalc),
    Hsla(HslaCalc),
}

impl ScaleKind {
    pub fn default_steps(&self) -> u32 {
        match self {
            ScaleKind::Size(_) => SizeCalc::DEFAULT_STEPS,
            ScaleKind::Hsla(_) => HslaCalc::DEFAULT_STEPS,
        }
    }
}

impl From<SizeCalc> for ScaleKind {
    fn from(calc: SizeCalc) -> Self {
        ScaleKind::Size(calc)
    }
}

impl From<HslaCalc> for ScaleKind {
    fn from(calc: HslaCalc) -> Self {
        ScaleKind::Hsla(calc)
    }
}

/// Declarative description of a built-in scale.
///
/// ```rust
/// use stylesmith::ScaleConfig;
///
/// let config: ScaleConfig = serde_json::from_str(
///     r#"{"prefix": "sm-color-red", "kind": {"type": "hsla", "hue": 0, "saturation": 100}}"#,
/// ).unwrap();
/// let reds = config.build().unwrap();
/// assert_eq!(reds.steps(), 9);
/// assert_eq!(reds.get("sm-color-red-1").as_deref(), Some("hsla(0,100%,10.00%,1)"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub prefix: String,
    /// Step count; the calculator's default when absent.
    #[serde(default)]
    pub steps: Option<u32>,
    pub kind: ScaleKind,
}

impl ScaleConfig {
    pub fn new(prefix: impl Into<String>, kind: impl Into<ScaleKind>) -> Self {
        Self {
            prefix: prefix.into(),
            steps: None,
            kind: kind.into(),
        }
    }

    /// A size scale with default increment and unit.
    pub fn size(prefix: impl Into<String>) -> Self {
        Self::new(prefix, SizeCalc::default())
    }

    /// A color scale with default lightness range and alpha.
    pub fn hsla(prefix: impl Into<String>, hue: f64, saturation: f64) -> Self {
        Self::new(prefix, HslaCalc::new(hue, saturation))
    }

    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn resolved_steps(&self) -> u32 {
        self.steps.unwrap_or_else(|| self.kind.default_steps())
    }

    pub fn build(&self) -> Result<Scale, ConfigError> {
        Scale::from_config(self)
    }
}
