//! Human-readable error descriptions and structured JSON error formatting.

use tankgauge_core::error::{BuildError, GaugeError};

pub fn gauge_error_name(e: &GaugeError) -> &'static str {
    match e {
        GaugeError::NonFinite { .. } => "NonFinite",
        GaugeError::OutOfOrder { .. } => "OutOfOrder",
        GaugeError::Timeout => "Timeout",
    }
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingGeometry => {
                "What happened: No tank geometry was provided to the gauge.\nLikely causes: The [tank] section is missing from the config, or the builder was not given dimensions.\nHow to fix: Add [tank] with diameter_cm and length_cm to the config, or pass geometry via with_geometry(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun. See README for a sample."
            ),
        };
    }

    if let Some(ge) = err.downcast_ref::<GaugeError>() {
        return match ge {
            GaugeError::Timeout => {
                "What happened: The depth sensor stopped delivering readings.\nLikely causes: Sensor unplugged, wiring/power issues, or sensor.read_timeout_ms too low.\nHow to fix: Check the sensor cabling and power, and consider raising sensor.read_timeout_ms in the config.".to_string()
            }
            GaugeError::NonFinite { quantity, value } => format!(
                "What happened: A {quantity} reading was not a finite number ({value}).\nLikely causes: Sensor glitch, or a malformed row in the observation log.\nHow to fix: Check the input data; rows must carry plain decimal centimetres."
            ),
            GaugeError::OutOfOrder { at, prev } => format!(
                "What happened: An observation at {at} is earlier than the previous one at {prev}.\nLikely causes: Observation log rows out of order, or the system clock stepped backwards.\nHow to fix: Sort the log by timestamp, or remove the stale rows and rerun."
            ),
        };
    }

    // String-based heuristics for errors coming from init or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("tank.")
        || lower.contains("pricing.")
        || lower.contains("sensor.")
        || lower.contains("logging.")
    {
        return format!(
            "What happened: Configuration is invalid or incomplete ({msg}).\nLikely causes: Missing [tank] dimensions or out-of-range values.\nHow to fix: Edit the TOML config and try again."
        );
    }

    // Observation CSV header special-case
    if lower.contains("observation csv must have headers") {
        return "Invalid headers in observation CSV. Expected 'timestamp,depth_cm'.".to_string();
    }

    if lower.contains("usage snapshot") {
        return format!(
            "What happened: The usage snapshot file could not be used.\nLikely causes: The file is corrupt, truncated, or written by hand.\nHow to fix: Delete the snapshot and rerun; accounting restarts at the next reading. Original: {msg}"
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map GaugeError (if present) to stable exit codes; other errors return 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ge) = err.downcast_ref::<GaugeError>() {
        return match ge {
            GaugeError::OutOfOrder { .. } => 3,
            GaugeError::Timeout => 4,
            GaugeError::NonFinite { .. } => 5,
        };
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(ge) = err.downcast_ref::<GaugeError>() {
        let msg = humanize(err);
        let reason_name = gauge_error_name(ge);

        let detail_obj = match ge {
            GaugeError::OutOfOrder { at, prev } => Some(json!({
                "at": at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                "prev": prev.format("%Y-%m-%dT%H:%M:%S").to_string(),
            })),
            GaugeError::NonFinite { quantity, value } => Some(json!({
                "quantity": quantity,
                "value": value.to_string(),
            })),
            GaugeError::Timeout => None,
        };

        let obj = if let Some(d) = detail_obj {
            json!({ "reason": reason_name, "details": d, "message": msg })
        } else {
            json!({ "reason": reason_name, "message": msg })
        };
        return obj.to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": humanize(err) }).to_string()
}
