/// One catalog entry, in catalog units (degrees, revolutions per day).
///
/// Mean motion derivatives keep the catalog convention: `mean_motion_dot`
/// is stored divided by 2 and `mean_motion_ddot` divided by 6.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRecord {
    pub name: String,
    pub catalog_id: u32,
    pub bstar: f64,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub mean_motion: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub ra_of_asc_node: f64,
    pub arg_of_pericenter: f64,
    pub mean_anomaly: f64,
    pub epoch: String,
    pub period_minutes: f64,
    pub tle_line1: Option<String>,
    pub tle_line2: Option<String>,
}

impl CatalogRecord {
    /// Checks the hard invariants of a record. Returns a reason on failure.
    pub fn check(&self) -> Result<(), String> {
        let fields = [
            ("BSTAR", self.bstar),
            ("MEAN_MOTION_DOT", self.mean_motion_dot),
            ("MEAN_MOTION_DDOT", self.mean_motion_ddot),
            ("MEAN_MOTION", self.mean_motion),
            ("ECCENTRICITY", self.eccentricity),
            ("INCLINATION", self.inclination),
            ("RA_OF_ASC_NODE", self.ra_of_asc_node),
            ("ARG_OF_PERICENTER", self.arg_of_pericenter),
            ("MEAN_ANOMALY", self.mean_anomaly),
            ("PERIOD", self.period_minutes),
        ];
        if let Some((key, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("{} is not finite ({})", key, value));
        }

        if self.mean_motion <= 0.0 {
            return Err(format!("mean motion must be positive, got {}", self.mean_motion));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            ));
        }
        if self.period_minutes <= 0.0 {
            return Err(format!("period must be positive, got {}", self.period_minutes));
        }
        Ok(())
    }

    /// Relative difference between the catalog period and `1440 / mean_motion`.
    pub fn period_mismatch(&self) -> f64 {
        let derived = 1440.0 / self.mean_motion;
        ((self.period_minutes - derived) / derived).abs()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::iss;

    #[test]
    fn accepts_valid_record() {
        assert!(iss().check().is_ok());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let mut record = iss();
        record.eccentricity = 1.0;
        assert!(record.check().unwrap_err().contains("eccentricity"));

        let mut record = iss();
        record.mean_motion = 0.0;
        assert!(record.check().unwrap_err().contains("mean motion"));

        let mut record = iss();
        record.period_minutes = -1.0;
        assert!(record.check().unwrap_err().contains("period"));

        let mut record = iss();
        record.inclination = f64::NAN;
        assert!(record.check().unwrap_err().contains("INCLINATION"));
    }

    #[test]
    fn period_mismatch_within_catalog_rounding() {
        let record = iss();
        assert!(record.period_mismatch() < 5e-3);

        let mut record = iss();
        record.period_minutes = 95.0;
        assert!(record.period_mismatch() > 5e-3);
    }
}
