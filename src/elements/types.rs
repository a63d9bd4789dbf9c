use chrono::{DateTime, Utc};

/// Mean elements in propagator working units.
///
/// Rates are in rad/s, rad/s² and rad/s³, angles in radians. Eccentricity
/// and the drag term are carried over from the catalog untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElementSet {
    pub epoch: DateTime<Utc>,
    pub mean_motion: f64,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub arg_of_pericenter: f64,
    pub mean_anomaly: f64,
    pub bstar: f64,
}

impl MeanElementSet {
    pub fn is_finite(&self) -> bool {
        [
            self.mean_motion,
            self.mean_motion_dot,
            self.mean_motion_ddot,
            self.eccentricity,
            self.inclination,
            self.raan,
            self.arg_of_pericenter,
            self.mean_anomaly,
            self.bstar,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
