use serde::Deserialize;

/// Earth gravity model used by SGP4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Geopotential {
    #[default]
    Wgs72,
    Wgs84,
}

impl Geopotential {
    pub fn model(&self) -> sgp4::Geopotential {
        match self {
            Geopotential::Wgs72 => sgp4::WGS72,
            Geopotential::Wgs84 => sgp4::WGS84,
        }
    }
}

/// SGP4 operation mode: improved (`'i'`) or AFSPC compatibility (`'a'`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OpsMode {
    #[default]
    Improved,
    Afspc,
}

/// Reference data the propagator needs, built once per run and passed
/// explicitly to every propagation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PropagatorContext {
    pub geopotential: Geopotential,
    pub mode: OpsMode,
}
