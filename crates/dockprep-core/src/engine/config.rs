use thiserror::Error;

/// Vina's default energy range (kcal/mol).
pub const DEFAULT_ENERGY_RANGE: f64 = 3.0;
/// Vina's default search exhaustiveness.
pub const DEFAULT_EXHAUSTIVENESS: u32 = 8;
/// Vina's default number of binding modes.
pub const DEFAULT_NUM_MODES: u32 = 9;
/// Padding added to each half-extent of the receptor, in Angstroms.
pub const DEFAULT_PADDING: f64 = 20.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("Parameter '{name}' must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}

/// Search settings written alongside the computed box.
#[derive(Debug, Clone, PartialEq)]
pub struct DockingParams {
    pub energy_range: f64,
    pub exhaustiveness: u32,
    pub num_modes: u32,
    pub cpu: Option<u32>,
    pub padding: f64,
}

impl Default for DockingParams {
    fn default() -> Self {
        Self {
            energy_range: DEFAULT_ENERGY_RANGE,
            exhaustiveness: DEFAULT_EXHAUSTIVENESS,
            num_modes: DEFAULT_NUM_MODES,
            cpu: None,
            padding: DEFAULT_PADDING,
        }
    }
}

/// Builds [`DockingParams`], falling back to Vina defaults for unset values.
#[derive(Default)]
pub struct DockingParamsBuilder {
    energy_range: Option<f64>,
    exhaustiveness: Option<u32>,
    num_modes: Option<u32>,
    cpu: Option<u32>,
    padding: Option<f64>,
}

impl DockingParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn energy_range(mut self, value: f64) -> Self {
        self.energy_range = Some(value);
        self
    }
    pub fn exhaustiveness(mut self, value: u32) -> Self {
        self.exhaustiveness = Some(value);
        self
    }
    pub fn num_modes(mut self, value: u32) -> Self {
        self.num_modes = Some(value);
        self
    }
    pub fn cpu(mut self, value: Option<u32>) -> Self {
        self.cpu = value;
        self
    }
    pub fn padding(mut self, value: f64) -> Self {
        self.padding = Some(value);
        self
    }

    pub fn build(self) -> Result<DockingParams, ConfigError> {
        let defaults = DockingParams::default();

        let energy_range = self.energy_range.unwrap_or(defaults.energy_range);
        if !(energy_range > 0.0 && energy_range.is_finite()) {
            return Err(ConfigError::NotPositive {
                name: "energy_range",
                value: energy_range,
            });
        }
        let exhaustiveness = self.exhaustiveness.unwrap_or(defaults.exhaustiveness);
        if exhaustiveness == 0 {
            return Err(ConfigError::NotPositive {
                name: "exhaustiveness",
                value: 0.0,
            });
        }
        let num_modes = self.num_modes.unwrap_or(defaults.num_modes);
        if num_modes == 0 {
            return Err(ConfigError::NotPositive {
                name: "num_modes",
                value: 0.0,
            });
        }
        if self.cpu == Some(0) {
            return Err(ConfigError::NotPositive {
                name: "cpu",
                value: 0.0,
            });
        }
        let padding = self.padding.unwrap_or(defaults.padding);
        if !(padding >= 0.0 && padding.is_finite()) {
            return Err(ConfigError::Negative {
                name: "padding",
                value: padding,
            });
        }

        Ok(DockingParams {
            energy_range,
            exhaustiveness,
            num_modes,
            cpu: self.cpu,
            padding,
        })
    }
}
