//! Simulation inputs and their numeric domains.
//!
//! Every value the UI can change lives in [`SimulationParameters`], owned by
//! one [`ParameterStore`] per scene. Writes go through the store, which
//! coerces malformed input to zero and clamps to the declared domain, so
//! readers never see NaN or out-of-range values.
//!
//! # Example
//!
//! ```ignore
//! let mut store = ParameterStore::new();
//! store.set(Param::GasDensity, 4.0);
//! assert_eq!(store.get(Param::GasDensity), 4.0);
//!
//! // Slider input arrives as text
//! store.set_str("temperature", "abc")?; // coerced to 0.0
//! ```

use crate::error::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single simulation input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    /// Dissolved gas content. Same units as the regime table's gas axis.
    GasDensity,
    /// Magma chamber depth. Same units as the regime table's depth axis.
    /// Also drives the cross-section stretch.
    Depth,
    Temperature,
    /// Wind speed in m/s.
    WindSpeed,
    /// Multiplier on the smoke's vertical force.
    SmokeSpeed,
    /// Multiplier on the smoke's vertical velocity.
    SmokeHeight,
    /// Base particle lifetime in seconds.
    SmokeLifetime,
}

impl Param {
    /// All parameters in declaration order.
    pub const ALL: [Param; 7] = [
        Param::GasDensity,
        Param::Depth,
        Param::Temperature,
        Param::WindSpeed,
        Param::SmokeSpeed,
        Param::SmokeHeight,
        Param::SmokeLifetime,
    ];

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Param::GasDensity => "gas_density",
            Param::Depth => "depth",
            Param::Temperature => "temperature",
            Param::WindSpeed => "wind_speed",
            Param::SmokeSpeed => "smoke_speed",
            Param::SmokeHeight => "smoke_height",
            Param::SmokeLifetime => "smoke_lifetime",
        }
    }

    /// Declared numeric domain of this parameter.
    pub fn domain(self) -> ParamDomain {
        match self {
            Param::GasDensity => ParamDomain::new(0.0, 6.0, 2.0),
            Param::Depth => ParamDomain::new(2.5, 10.0, 5.0),
            Param::Temperature => ParamDomain::new(0.0, 20.0, 10.0),
            Param::WindSpeed => ParamDomain::new(0.0, 20.0, 0.0),
            Param::SmokeSpeed => ParamDomain::new(0.001, 0.05, 0.01),
            Param::SmokeHeight => ParamDomain::new(0.1, 3.0, 1.0),
            Param::SmokeLifetime => ParamDomain::new(0.5, 10.0, 2.5),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Param {
    type Err = ParameterError;

    /// Accepts snake_case names and the camelCase slider ids used by the web UI.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gas_density" | "gasDensity" | "gas" => Ok(Param::GasDensity),
            "depth" => Ok(Param::Depth),
            "temperature" => Ok(Param::Temperature),
            "wind_speed" | "windSpeed" => Ok(Param::WindSpeed),
            "smoke_speed" | "smokeSpeed" => Ok(Param::SmokeSpeed),
            "smoke_height" | "smokeHeight" => Ok(Param::SmokeHeight),
            "smoke_lifetime" | "smokeLifetime" => Ok(Param::SmokeLifetime),
            other => Err(ParameterError::Unknown(other.to_string())),
        }
    }
}

/// Domain of a parameter: inclusive bounds and the initial value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamDomain {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

/// The domain split into sixths, with low/medium/high at the 1/6, 3/6 and 5/6 marks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ranges {
    pub low: f32,
    pub medium: f32,
    pub high: f32,
    /// Width of one sixth of the domain.
    pub delta: f32,
}

impl ParamDomain {
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp into `[min, max]`. Non-finite input becomes 0 before clamping.
    pub fn clamp(&self, value: f32) -> f32 {
        let value = if value.is_finite() { value } else { 0.0 };
        value.clamp(self.min, self.max)
    }

    /// Map a value to `[0, 1]` across the domain.
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn ranges(&self) -> Ranges {
        let delta = (self.max - self.min) / 6.0;
        Ranges {
            low: self.min + delta,
            medium: self.min + delta * 3.0,
            high: self.min + delta * 5.0,
            delta,
        }
    }
}

/// Parse user text into a number, coercing anything unparsable or non-finite to 0.
pub fn coerce(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// The full set of simulation inputs for one scene.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub gas_density: f32,
    pub depth: f32,
    pub temperature: f32,
    pub wind_speed: f32,
    pub smoke_speed: f32,
    pub smoke_height: f32,
    pub smoke_lifetime: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            gas_density: Param::GasDensity.domain().default,
            depth: Param::Depth.domain().default,
            temperature: Param::Temperature.domain().default,
            wind_speed: Param::WindSpeed.domain().default,
            smoke_speed: Param::SmokeSpeed.domain().default,
            smoke_height: Param::SmokeHeight.domain().default,
            smoke_lifetime: Param::SmokeLifetime.domain().default,
        }
    }
}

impl SimulationParameters {
    pub fn get(&self, param: Param) -> f32 {
        match param {
            Param::GasDensity => self.gas_density,
            Param::Depth => self.depth,
            Param::Temperature => self.temperature,
            Param::WindSpeed => self.wind_speed,
            Param::SmokeSpeed => self.smoke_speed,
            Param::SmokeHeight => self.smoke_height,
            Param::SmokeLifetime => self.smoke_lifetime,
        }
    }

    fn slot_mut(&mut self, param: Param) -> &mut f32 {
        match param {
            Param::GasDensity => &mut self.gas_density,
            Param::Depth => &mut self.depth,
            Param::Temperature => &mut self.temperature,
            Param::WindSpeed => &mut self.wind_speed,
            Param::SmokeSpeed => &mut self.smoke_speed,
            Param::SmokeHeight => &mut self.smoke_height,
            Param::SmokeLifetime => &mut self.smoke_lifetime,
        }
    }

    /// Value of `param` mapped to `[0, 1]` across its domain.
    pub fn normalized(&self, param: Param) -> f32 {
        param.domain().normalize(self.get(param))
    }

    /// Clamp every field into its domain.
    pub fn sanitized(mut self) -> Self {
        for param in Param::ALL {
            let slot = self.slot_mut(param);
            *slot = param.domain().clamp(*slot);
        }
        self
    }
}

/// Single owner of the simulation inputs.
///
/// Each field has one writer (its UI control) and many readers (every
/// component, once per frame).
#[derive(Clone, Debug, Default)]
pub struct ParameterStore {
    values: SimulationParameters,
}

impl ParameterStore {
    /// Create a store with every parameter at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing values, clamping each into its domain.
    pub fn with_values(values: SimulationParameters) -> Self {
        Self {
            values: values.sanitized(),
        }
    }

    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        self.values.get(param)
    }

    /// Store a value and return what was actually stored after coercion and clamping.
    pub fn set(&mut self, param: Param, value: f32) -> f32 {
        let stored = param.domain().clamp(value);
        *self.values.slot_mut(param) = stored;
        stored
    }

    /// Set a parameter from its name and raw text, as delivered by a slider.
    pub fn set_str(&mut self, name: &str, raw: &str) -> Result<f32, ParameterError> {
        let param: Param = name.parse()?;
        Ok(self.set(param, coerce(raw)))
    }

    /// Domain of a parameter.
    pub fn limits(&self, param: Param) -> ParamDomain {
        param.domain()
    }

    /// Low/medium/high marks of a parameter's domain.
    pub fn ranges(&self, param: Param) -> Ranges {
        param.domain().ranges()
    }

    pub fn normalized(&self, param: Param) -> f32 {
        self.values.normalized(param)
    }

    /// Snapshot of all values, consistent for the whole frame.
    #[inline]
    pub fn values(&self) -> &SimulationParameters {
        &self.values
    }

    /// Restore every parameter to its default.
    pub fn reset(&mut self) {
        self.values = SimulationParameters::default();
    }
}
