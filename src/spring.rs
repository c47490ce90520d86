// Damped harmonic oscillator, semi-implicit Euler.
// Only stable for small steps; the animator clamps and substeps frame deltas.

use serde::{Deserialize, Serialize};

use crate::error::MotionError;

/// Distance and speed below which a spring counts as settled and snaps.
pub const SETTLE_EPSILON: f64 = 0.001;

/// Spring constants. Dimensionless in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Self {
        SpringConfig {
            stiffness,
            damping,
            mass,
        }
    }

    /// Reject configs that would turn every frame into NaN.
    pub fn validate(&self) -> Result<(), MotionError> {
        if !self.stiffness.is_finite() || self.stiffness < 0.0 {
            return Err(MotionError::InvalidConfig(format!(
                "stiffness must be finite and non-negative, got {}",
                self.stiffness
            )));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(MotionError::InvalidConfig(format!(
                "damping must be finite and non-negative, got {}",
                self.damping
            )));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(MotionError::InvalidConfig(format!(
                "mass must be finite and positive, got {}",
                self.mass
            )));
        }
        Ok(())
    }
}

/// Smooths a changing input signal. One instance per animated element/property.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    current: f64,
    target: f64,
    velocity: f64,
}

impl Spring {
    pub fn new(config: SpringConfig) -> Self {
        Spring::with_value(config, 0.0)
    }

    /// Start at rest on `value` instead of 0.
    pub fn with_value(config: SpringConfig, value: f64) -> Self {
        Spring {
            config,
            current: value,
            target: value,
            velocity: 0.0,
        }
    }

    pub fn set_target(&mut self, value: f64) {
        self.target = value;
    }

    /// Advance by `delta_ms` milliseconds and return the new value.
    pub fn update(&mut self, delta_ms: f64) -> f64 {
        if self.snap_if_close() {
            return self.current;
        }

        let dt = delta_ms / 1000.0;
        let force = (self.target - self.current) * self.config.stiffness;
        let damping_force = self.velocity * self.config.damping;
        let acceleration = (force - damping_force) / self.config.mass;

        self.velocity += acceleration * dt;
        self.current += self.velocity * dt;

        self.snap_if_close();
        self.current
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn is_settled(&self) -> bool {
        (self.target - self.current).abs() < SETTLE_EPSILON && self.velocity.abs() < SETTLE_EPSILON
    }

    /// Jump to `value` and stop.
    pub fn snap_to(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
    }

    fn snap_if_close(&mut self) -> bool {
        if self.is_settled() {
            self.current = self.target;
            self.velocity = 0.0;
            true
        } else {
            false
        }
    }
}
