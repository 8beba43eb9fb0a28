//! Design token scales.
//!
//! - [`Scale`]: a lazily computed `{prefix}-{n}` family of CSS values
//! - [`SizeCalc`] and [`HslaCalc`]: the built-in calculators
//! - [`ScaleConfig`]: declarative, deserializable scale definitions

mod calc;
mod scale;

pub use calc::{HslaCalc, SizeCalc};
pub use scale::{Scale, ScaleConfig, ScaleKind};
