//! Inverse CDFs of the continuous distributions.
//!
//! Uniform and triangular use closed forms; PERT rescales a
//! Beta(α, β) quantile from `statrs`:
//! α = 1 + γ(mode − min)/(max − min), β = 1 + γ(max − mode)/(max − min).

use statrs::distribution::{Beta, ContinuousCDF};

pub fn uniform(min: f64, max: f64, u: f64) -> f64 {
    min + u * (max - min)
}

pub fn triangular(min: f64, mode: f64, max: f64, u: f64) -> f64 {
    let range = max - min;
    let split = (mode - min) / range;
    if u < split {
        min + (u * range * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * range * (max - mode)).sqrt()
    }
}

pub fn pert(min: f64, mode: f64, max: f64, gamma: f64, u: f64) -> Result<f64, String> {
    let range = max - min;
    let alpha = 1.0 + gamma * (mode - min) / range;
    let beta = 1.0 + gamma * (max - mode) / range;
    let dist = Beta::new(alpha, beta).map_err(|e| e.to_string())?;
    let x = dist.inverse_cdf(u);
    if !x.is_finite() {
        return Err(format!("beta quantile at {u} is not finite"));
    }
    Ok(min + x.clamp(0.0, 1.0) * range)
}
