pub mod creator;
pub mod viewer;

pub use creator::{
    ComponentKey, CreatorFlow, CreatorPhase, DraftAction, DraftComponent, DraftIngredient,
    IngredientKey, RecipeDraft,
};
pub use viewer::ViewerFlow;
