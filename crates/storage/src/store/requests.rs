#![forbid(unsafe_code)]

use ds_core::ids::{GenerationId, OwnerId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateGenerationRequest {
    pub owner_id: OwnerId,
    pub from_generation_id: GenerationId,
    pub to_generation_id: GenerationId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteGenerationsRequest {
    pub owner_id: OwnerId,
    pub all_generations: bool,
}
