use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::RecipeError;

/// Recipe identifier. New recipes get the creation time in milliseconds.
pub type RecipeId = i64;

/// A named dish made of one or more components.
///
/// Field order matters: it is the order of keys in the persisted JSON and in
/// share codes, which keeps encoding deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub components: Vec<Component>,
}

/// A named part of a recipe (e.g. "dough") with its own ingredients and
/// preparation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub ingredients: Vec<String>,
    pub preparare: String,
}

impl Component {
    /// A freshly added component: no name, one empty ingredient slot.
    pub fn new() -> Self {
        Self {
            name: String::new(),
            ingredients: vec![String::new()],
            preparare: String::new(),
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

impl Recipe {
    pub fn new(id: RecipeId, name: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            id,
            name: name.into(),
            components,
        }
    }

    /// Title shown in lists. Unnamed recipes fall back to their 1-based
    /// position in the list.
    pub fn display_title(&self, index: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Recipe {}", index + 1)
        } else {
            self.name.clone()
        }
    }

    /// Render the recipe as plain text, one block per component.
    pub fn to_text(&self, index: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.display_title(index));
        for component in &self.components {
            out.push('\n');
            if !component.name.is_empty() {
                let _ = writeln!(out, "{}", component.name);
            }
            for ingredient in &component.ingredients {
                let _ = writeln!(out, "- {}", ingredient);
            }
            if !component.preparare.is_empty() {
                let _ = writeln!(out, "{}", component.preparare);
            }
        }
        out
    }
}

/// Id for a recipe created right now.
pub fn new_recipe_id() -> Result<RecipeId, RecipeError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| RecipeError::Clock(format!("system time is before the epoch: {}", e)))?;
    millis_to_id(elapsed.as_millis())
}

fn millis_to_id(millis: u128) -> Result<RecipeId, RecipeError> {
    RecipeId::try_from(millis)
        .map_err(|_| RecipeError::Clock(format!("{} ms does not fit in a recipe id", millis)))
}
