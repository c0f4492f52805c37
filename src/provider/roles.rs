// src/provider/roles.rs — Role-based model assignment
//
// The three loop stages use the same backend but different sampling
// temperatures: a hot generator, a cold critic, and a warm reviser.

use super::ModelRef;

pub const GENERATOR_TEMPERATURE: f32 = 0.9;
pub const EVALUATOR_TEMPERATURE: f32 = 0.3;
pub const REVISER_TEMPERATURE: f32 = 0.7;

/// A model plus the sampling temperature used for one stage.
#[derive(Debug, Clone)]
pub struct RoleModel {
    pub model: ModelRef,
    pub temperature: f32,
}

/// Assigns models to the three stages of the refinement pipeline.
#[derive(Debug, Clone)]
pub struct ModelRoles {
    pub generator: RoleModel,
    pub evaluator: RoleModel,
    pub reviser: RoleModel,
}

impl ModelRoles {
    /// Use one model for all stages, keeping per-stage temperatures.
    pub fn from_single(model: ModelRef) -> Self {
        Self {
            generator: RoleModel {
                model: model.clone(),
                temperature: GENERATOR_TEMPERATURE,
            },
            evaluator: RoleModel {
                model: model.clone(),
                temperature: EVALUATOR_TEMPERATURE,
            },
            reviser: RoleModel {
                model,
                temperature: REVISER_TEMPERATURE,
            },
        }
    }

    /// Build from explicit config, filling gaps with the default model.
    pub fn from_config(
        default: ModelRef,
        generator: Option<&str>,
        evaluator: Option<&str>,
        reviser: Option<&str>,
    ) -> Self {
        let resolve = |s: Option<&str>| {
            s.and_then(ModelRef::parse)
                .unwrap_or_else(|| default.clone())
        };
        Self {
            generator: RoleModel {
                model: resolve(generator),
                temperature: GENERATOR_TEMPERATURE,
            },
            evaluator: RoleModel {
                model: resolve(evaluator),
                temperature: EVALUATOR_TEMPERATURE,
            },
            reviser: RoleModel {
                model: resolve(reviser),
                temperature: REVISER_TEMPERATURE,
            },
        }
    }
}
