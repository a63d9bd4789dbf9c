/// One state vector, `seconds_since_epoch` after the record's epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub seconds_since_epoch: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl Sample {
    pub fn values(&self) -> [f64; 7] {
        [
            self.seconds_since_epoch,
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
        ]
    }

    pub fn from_values(values: [f64; 7]) -> Self {
        Self {
            seconds_since_epoch: values[0],
            position: [values[1], values[2], values[3]],
            velocity: [values[4], values[5], values[6]],
        }
    }
}
