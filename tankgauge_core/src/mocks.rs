//! Test and helper mocks for tankgauge_core

/// A depth sensor that always errors on read; useful when driving the gauge
/// with externally sourced readings via `TankGauge::record`.
pub struct NoopDepthSensor;

impl tankgauge_traits::DepthSensor for NoopDepthSensor {
    fn read(
        &mut self,
        _timeout: std::time::Duration,
    ) -> Result<f64, Box<dyn std::error::Error + Send + Sync>> {
        Err(Box::new(std::io::Error::other("noop depth sensor")))
    }
}
