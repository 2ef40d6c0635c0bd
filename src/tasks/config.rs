/* ************************************************************************ **
** This file is part of lupfit, and is licensed under EITHER the MIT        **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! YAML settings.
//!
//! ```yaml
//! degree: 2
//! pivot-tolerance: 1e-12
//! ```

use crate::FailResult;

use lupfit_polyfit::FitOptions;
use std::io::Read;
use std::ops::Deref;

/// Deserialization that warns about unrecognized keys instead of silently
/// dropping them.
pub trait YamlRead: for<'de> ::serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, ::serde_yaml::Error>
    { Self::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, ::serde_yaml::Error> {
        // serde_ignored wants a Deserializer, which serde_yaml only offers via Value
        let value: ::serde_yaml::Value = ::serde_yaml::from_reader(r)?;
        Self::from_value(value)
    }

    fn from_value(value: ::serde_yaml::Value) -> Result<Self, ::serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: ::serde_yaml::Value) -> Result<$Type, ::serde_yaml::Error> {
                ::serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Degree of the fitted polynomial.
    #[serde(default = "defaults::degree")]
    pub degree: u32,

    /// Pivots below this magnitude make the fit fail as degenerate.
    #[serde(default = "defaults::pivot_tolerance")]
    pub pivot_tolerance: f64,
}
derive_yaml_read!{Settings}

mod defaults {
    pub fn degree() -> u32 { 1 }
    pub fn pivot_tolerance() -> f64 { ::lupfit_linalg::DEFAULT_PIVOT_TOL }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            degree: defaults::degree(),
            pivot_tolerance: defaults::pivot_tolerance(),
        }
    }
}

/// Settings that passed `Settings::validate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSettings(Settings);

impl Deref for ValidatedSettings {
    type Target = Settings;

    fn deref(&self) -> &Settings { &self.0 }
}

impl Settings {
    pub fn validate(self) -> FailResult<ValidatedSettings> {
        let tol = self.pivot_tolerance;
        if !(tol.is_finite() && tol > 0.0) {
            bail!("pivot-tolerance must be finite and positive (got {})", tol);
        }
        if tol > 1e-3 {
            warn!("pivot-tolerance of {:e} is unusually large; well-posed fits may be rejected", tol);
        }
        Ok(ValidatedSettings(self))
    }
}

impl ValidatedSettings {
    pub fn fit_options(&self) -> FitOptions {
        FitOptions { pivot_tol: self.pivot_tolerance }
    }
}
