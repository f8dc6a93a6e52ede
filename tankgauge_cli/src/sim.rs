//! Deterministic stand-in for the ultrasonic sensor, used by `watch` when no
//! real hardware is attached and by the integration tests.

use std::time::Duration;

use tankgauge_traits::DepthSensor;

/// Reports a sensor distance that drifts by a fixed step per read, so a run
/// looks like a slowly draining (or refilling, with a negative step) tank.
///
/// Env knobs:
/// - `TANKGAUGE_SIM_START_CM`: initial distance (default: half the diameter)
/// - `TANKGAUGE_SIM_STEP_CM`: distance added after every read (default: 0.05)
pub struct SimulatedDepthSensor {
    distance_cm: f64,
    step_cm: f64,
    max_cm: f64,
}

impl SimulatedDepthSensor {
    pub fn from_env(diameter_cm: f64) -> Self {
        let start = env_f64("TANKGAUGE_SIM_START_CM").unwrap_or(diameter_cm / 2.0);
        let step = env_f64("TANKGAUGE_SIM_STEP_CM").unwrap_or(0.05);
        Self {
            distance_cm: start,
            step_cm: step,
            max_cm: diameter_cm,
        }
    }
}

impl DepthSensor for SimulatedDepthSensor {
    fn read(
        &mut self,
        _timeout: Duration,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        let current = self.distance_cm;
        // Keep the surface inside the tank regardless of the step sign.
        self.distance_cm = (self.distance_cm + self.step_cm).clamp(0.0, self.max_cm);
        Ok(current)
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod sim_tests {
    use super::*;

    #[test]
    fn drifts_by_step_and_stays_inside_the_tank() {
        let mut s = SimulatedDepthSensor {
            distance_cm: 99.0,
            step_cm: 10.0,
            max_cm: 100.0,
        };
        let t = Duration::from_millis(1);
        assert_eq!(s.read(t).unwrap(), 99.0);
        assert_eq!(s.read(t).unwrap(), 100.0);
        assert_eq!(s.read(t).unwrap(), 100.0);
    }

    #[test]
    fn negative_step_models_a_refill() {
        let mut s = SimulatedDepthSensor {
            distance_cm: 1.0,
            step_cm: -5.0,
            max_cm: 100.0,
        };
        let t = Duration::from_millis(1);
        assert_eq!(s.read(t).unwrap(), 1.0);
        assert_eq!(s.read(t).unwrap(), 0.0);
    }
}
