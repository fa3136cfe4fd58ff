use log::{error, info};

use crate::model::{new_recipe_id, Component, Recipe, RecipeId};
use crate::store::RecipeStore;
use crate::RecipeError;

/// Stable identity of a component inside a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKey(u64);

/// Stable identity of an ingredient slot inside a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IngredientKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIngredient {
    pub key: IngredientKey,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftComponent {
    pub key: ComponentKey,
    pub name: String,
    pub ingredients: Vec<DraftIngredient>,
    pub preparare: String,
}

/// One edit the user can make to the recipe form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    SetName(String),
    /// Appends a component with one empty ingredient slot
    AddComponent,
    RemoveComponent(ComponentKey),
    RenameComponent(ComponentKey, String),
    SetPreparare(ComponentKey, String),
    /// Appends an empty ingredient slot to the component
    AddIngredient(ComponentKey),
    RemoveIngredient(ComponentKey, IngredientKey),
    EditIngredient(ComponentKey, IngredientKey, String),
}

/// Unsaved recipe form state
///
/// Items are addressed by keys handed out when they are added, so removing
/// one item never shifts the address of another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDraft {
    name: String,
    components: Vec<DraftComponent>,
    next_key: u64,
}

impl RecipeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> &[DraftComponent] {
        &self.components
    }

    /// Key of the component at `index`
    pub fn component_key(&self, index: usize) -> Result<ComponentKey, RecipeError> {
        self.components
            .get(index)
            .map(|c| c.key)
            .ok_or_else(|| {
                RecipeError::UnknownDraftItem(format!(
                    "component index {} (draft has {})",
                    index,
                    self.components.len()
                ))
            })
    }

    /// Key of the ingredient at `index` within `component`
    pub fn ingredient_key(
        &self,
        component: ComponentKey,
        index: usize,
    ) -> Result<IngredientKey, RecipeError> {
        let component = self.component(component)?;
        component
            .ingredients
            .get(index)
            .map(|i| i.key)
            .ok_or_else(|| {
                RecipeError::UnknownDraftItem(format!(
                    "ingredient index {} (component has {})",
                    index,
                    component.ingredients.len()
                ))
            })
    }

    /// Apply one action and return the resulting draft. `self` is left as it
    /// was, including when the action is rejected.
    pub fn apply(&self, action: DraftAction) -> Result<Self, RecipeError> {
        let mut next = self.clone();
        match action {
            DraftAction::SetName(name) => next.name = name,
            DraftAction::AddComponent => {
                let key = ComponentKey(next.allocate_key());
                let slot = IngredientKey(next.allocate_key());
                next.components.push(DraftComponent {
                    key,
                    name: String::new(),
                    ingredients: vec![DraftIngredient {
                        key: slot,
                        text: String::new(),
                    }],
                    preparare: String::new(),
                });
            }
            DraftAction::RemoveComponent(key) => {
                let index = next.component_index(key)?;
                next.components.remove(index);
            }
            DraftAction::RenameComponent(key, name) => next.component_mut(key)?.name = name,
            DraftAction::SetPreparare(key, text) => next.component_mut(key)?.preparare = text,
            DraftAction::AddIngredient(key) => {
                let slot = IngredientKey(next.allocate_key());
                next.component_mut(key)?.ingredients.push(DraftIngredient {
                    key: slot,
                    text: String::new(),
                });
            }
            DraftAction::RemoveIngredient(key, ingredient) => {
                let component = next.component_mut(key)?;
                let index = ingredient_index(component, ingredient)?;
                component.ingredients.remove(index);
            }
            DraftAction::EditIngredient(key, ingredient, text) => {
                let component = next.component_mut(key)?;
                let index = ingredient_index(component, ingredient)?;
                component.ingredients[index].text = text;
            }
        }
        Ok(next)
    }

    /// Freeze the draft into a recipe with the given id
    pub fn to_recipe(&self, id: RecipeId) -> Recipe {
        let components = self
            .components
            .iter()
            .map(|c| Component {
                name: c.name.clone(),
                ingredients: c.ingredients.iter().map(|i| i.text.clone()).collect(),
                preparare: c.preparare.clone(),
            })
            .collect();

        Recipe::new(id, self.name.clone(), components)
    }

    fn allocate_key(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }

    fn component_index(&self, key: ComponentKey) -> Result<usize, RecipeError> {
        self.components
            .iter()
            .position(|c| c.key == key)
            .ok_or_else(|| RecipeError::UnknownDraftItem(format!("{:?}", key)))
    }

    fn component(&self, key: ComponentKey) -> Result<&DraftComponent, RecipeError> {
        let index = self.component_index(key)?;
        Ok(&self.components[index])
    }

    fn component_mut(&mut self, key: ComponentKey) -> Result<&mut DraftComponent, RecipeError> {
        let index = self.component_index(key)?;
        Ok(&mut self.components[index])
    }
}

fn ingredient_index(
    component: &DraftComponent,
    key: IngredientKey,
) -> Result<usize, RecipeError> {
    component
        .ingredients
        .iter()
        .position(|i| i.key == key)
        .ok_or_else(|| RecipeError::UnknownDraftItem(format!("{:?}", key)))
}

/// Where the create screen is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorPhase {
    /// No components yet
    Empty,
    Editing,
    /// Committed to storage; terminal
    Saved(RecipeId),
}

/// The create screen: a draft plus the store it commits to
pub struct CreatorFlow {
    store: RecipeStore,
    draft: RecipeDraft,
    saved: Option<RecipeId>,
}

impl CreatorFlow {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store,
            draft: RecipeDraft::new(),
            saved: None,
        }
    }

    pub fn draft(&self) -> &RecipeDraft {
        &self.draft
    }

    pub fn phase(&self) -> CreatorPhase {
        match self.saved {
            Some(id) => CreatorPhase::Saved(id),
            None if self.draft.components.is_empty() => CreatorPhase::Empty,
            None => CreatorPhase::Editing,
        }
    }

    /// Apply an edit to the draft
    pub fn apply(&mut self, action: DraftAction) -> Result<(), RecipeError> {
        if let Some(id) = self.saved {
            return Err(RecipeError::AlreadySaved(id));
        }
        self.draft = self.draft.apply(action)?;
        Ok(())
    }

    /// Append a component and return its key
    pub fn add_component(&mut self) -> Result<ComponentKey, RecipeError> {
        self.apply(DraftAction::AddComponent)?;
        self.draft.component_key(self.draft.components.len() - 1)
    }

    /// Append an ingredient slot to `component` and return its key
    pub fn add_ingredient(&mut self, component: ComponentKey) -> Result<IngredientKey, RecipeError> {
        self.apply(DraftAction::AddIngredient(component))?;
        let count = self.draft.component(component)?.ingredients.len();
        self.draft.ingredient_key(component, count - 1)
    }

    /// Commit the draft with a clock-based id
    pub async fn save(&mut self) -> Result<Recipe, RecipeError> {
        self.save_with_id(new_recipe_id()?).await
    }

    /// Commit the draft under `id`
    ///
    /// No field is validated: empty names, no components and empty ingredient
    /// slots are all saved as they are. On failure the draft is kept so the
    /// user can retry.
    pub async fn save_with_id(&mut self, id: RecipeId) -> Result<Recipe, RecipeError> {
        if let Some(saved) = self.saved {
            return Err(RecipeError::AlreadySaved(saved));
        }

        let recipe = self.draft.to_recipe(id);
        match self.store.append(recipe.clone()).await {
            Ok(()) => {
                info!("Saved recipe {} '{}'", recipe.id, recipe.name);
                self.saved = Some(recipe.id);
                Ok(recipe)
            }
            Err(e) => {
                error!("Failed to save recipe: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_component_has_one_empty_ingredient() {
        let draft = RecipeDraft::new().apply(DraftAction::AddComponent).unwrap();
        assert_eq!(draft.components().len(), 1);
        assert_eq!(draft.components()[0].ingredients.len(), 1);
        assert!(draft.components()[0].ingredients[0].text.is_empty());
    }

    #[test]
    fn test_apply_leaves_original_untouched() {
        let draft = RecipeDraft::new();
        let next = draft.apply(DraftAction::SetName("Pie".to_string())).unwrap();
        assert_eq!(draft.name(), "");
        assert_eq!(next.name(), "Pie");
    }

    #[test]
    fn test_keys_stay_stable_after_removal() {
        let draft = RecipeDraft::new()
            .apply(DraftAction::AddComponent)
            .unwrap()
            .apply(DraftAction::AddComponent)
            .unwrap();
        let first = draft.component_key(0).unwrap();
        let second = draft.component_key(1).unwrap();

        let draft = draft
            .apply(DraftAction::RenameComponent(second, "Filling".to_string()))
            .unwrap()
            .apply(DraftAction::RemoveComponent(first))
            .unwrap()
            .apply(DraftAction::SetPreparare(second, "Stir".to_string()))
            .unwrap();

        assert_eq!(draft.components().len(), 1);
        assert_eq!(draft.components()[0].key, second);
        assert_eq!(draft.components()[0].name, "Filling");
        assert_eq!(draft.components()[0].preparare, "Stir");
    }

    #[test]
    fn test_removed_key_is_rejected() {
        let draft = RecipeDraft::new().apply(DraftAction::AddComponent).unwrap();
        let key = draft.component_key(0).unwrap();
        let draft = draft.apply(DraftAction::RemoveComponent(key)).unwrap();

        let result = draft.apply(DraftAction::RenameComponent(key, "x".to_string()));
        assert!(matches!(result, Err(RecipeError::UnknownDraftItem(_))));
    }

    #[test]
    fn test_index_lookup_is_bounds_checked() {
        let draft = RecipeDraft::new().apply(DraftAction::AddComponent).unwrap();
        assert!(draft.component_key(1).is_err());

        let key = draft.component_key(0).unwrap();
        assert!(draft.ingredient_key(key, 0).is_ok());
        assert!(draft.ingredient_key(key, 1).is_err());
    }

    #[test]
    fn test_ingredient_edits() {
        let draft = RecipeDraft::new().apply(DraftAction::AddComponent).unwrap();
        let comp = draft.component_key(0).unwrap();
        let draft = draft.apply(DraftAction::AddIngredient(comp)).unwrap();
        let first = draft.ingredient_key(comp, 0).unwrap();
        let second = draft.ingredient_key(comp, 1).unwrap();

        let draft = draft
            .apply(DraftAction::EditIngredient(comp, first, "flour".to_string()))
            .unwrap()
            .apply(DraftAction::EditIngredient(comp, second, "sugar".to_string()))
            .unwrap()
            .apply(DraftAction::RemoveIngredient(comp, first))
            .unwrap();

        let recipe = draft.to_recipe(5);
        assert_eq!(recipe.components[0].ingredients, vec!["sugar".to_string()]);
    }

    #[test]
    fn test_ingredient_key_from_other_component_is_rejected() {
        let draft = RecipeDraft::new()
            .apply(DraftAction::AddComponent)
            .unwrap()
            .apply(DraftAction::AddComponent)
            .unwrap();
        let a = draft.component_key(0).unwrap();
        let b = draft.component_key(1).unwrap();
        let b_slot = draft.ingredient_key(b, 0).unwrap();

        let result = draft.apply(DraftAction::RemoveIngredient(a, b_slot));
        assert!(matches!(result, Err(RecipeError::UnknownDraftItem(_))));
    }

    #[test]
    fn test_to_recipe_preserves_order() {
        let draft = RecipeDraft::new()
            .apply(DraftAction::SetName("Pie".to_string()))
            .unwrap()
            .apply(DraftAction::AddComponent)
            .unwrap()
            .apply(DraftAction::AddComponent)
            .unwrap();
        let first = draft.component_key(0).unwrap();
        let second = draft.component_key(1).unwrap();
        let draft = draft
            .apply(DraftAction::RenameComponent(first, "Dough".to_string()))
            .unwrap()
            .apply(DraftAction::RenameComponent(second, "Filling".to_string()))
            .unwrap();

        let recipe = draft.to_recipe(9);
        assert_eq!(recipe.id, 9);
        assert_eq!(recipe.name, "Pie");
        let names: Vec<_> = recipe.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Dough", "Filling"]);
        assert_eq!(
            recipe.components[0],
            Component {
                name: "Dough".to_string(),
                ..Component::new()
            }
        );
    }
}
