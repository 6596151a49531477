use thiserror::Error;

pub const MAX_DE_ITERATIONS: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SettingsError {
    #[error("iteration budget must be between 1 and {max}, got {value}", max = MAX_DE_ITERATIONS)]
    Iterations { value: u32 },
    #[error("step budget must be greater than zero")]
    ZeroSteps,
    #[error("bailout radius must be finite and greater than 1, got {value}")]
    Bailout { value: f64 },
    #[error("{field} must be finite and greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("step damping must be in (0, 1], got {value}")]
    StepDamping { value: f64 },
    #[error("occlusion strength must be in [0, 1], got {value}")]
    OcclusionStrength { value: f64 },
}

/// Numerical knobs of the estimator, marcher and shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Inner escape-time iterations per distance estimate.
    pub max_iterations: u32,
    /// Escape radius. Must exceed 1 so `ln(r)` is positive at escape.
    pub bailout: f64,
    /// Sphere-tracing steps per ray.
    pub max_steps: u32,
    /// Hit threshold at `t = 0`; grows linearly with distance travelled.
    pub hit_epsilon: f64,
    /// Reach beyond the eye's distance from the origin; rays travelling further miss.
    pub max_distance: f64,
    /// Fraction of the estimated distance advanced per step.
    pub step_damping: f64,
    /// Finite-difference offset for normals.
    pub normal_offset: f64,
    /// How much a ray that used its whole step budget is darkened.
    pub occlusion_strength: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_iterations: 16,
            bailout: 2.0,
            max_steps: 192,
            hit_epsilon: 5e-4,
            max_distance: 12.0,
            step_damping: 0.9,
            normal_offset: 1e-4,
            occlusion_strength: 0.8,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_DE_ITERATIONS).contains(&self.max_iterations) {
            return Err(SettingsError::Iterations {
                value: self.max_iterations,
            });
        }

        if self.max_steps == 0 {
            return Err(SettingsError::ZeroSteps);
        }

        if !self.bailout.is_finite() || self.bailout <= 1.0 {
            return Err(SettingsError::Bailout {
                value: self.bailout,
            });
        }

        for (field, value) in [
            ("hit_epsilon", self.hit_epsilon),
            ("max_distance", self.max_distance),
            ("normal_offset", self.normal_offset),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }

        if !(self.step_damping > 0.0 && self.step_damping <= 1.0) {
            return Err(SettingsError::StepDamping {
                value: self.step_damping,
            });
        }

        if !(0.0..=1.0).contains(&self.occlusion_strength) {
            return Err(SettingsError::OcclusionStrength {
                value: self.occlusion_strength,
            });
        }

        Ok(())
    }
}
