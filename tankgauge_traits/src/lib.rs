pub mod clock;

pub use clock::{Clock, SystemClock};

/// Ultrasonic level sensor mounted at the top of the tank. `read` returns
/// the distance from the sensor down to the liquid surface, in centimetres.
pub trait DepthSensor {
    fn read(
        &mut self,
        timeout: std::time::Duration,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>>;
}
