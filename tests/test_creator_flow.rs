use async_trait::async_trait;
use recipe_book::{
    Component, CreatorPhase, DraftAction, KeyValueStorage, MemoryStorage, Recipe, RecipeBook,
    RecipeError,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Memory storage whose writes can be made to fail
#[derive(Default)]
struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

#[async_trait]
impl KeyValueStorage for FlakyStorage {
    fn backend_name(&self) -> &str {
        "flaky"
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, RecipeError> {
        self.inner.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), RecipeError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("disk full").into());
        }
        self.inner.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), RecipeError> {
        self.inner.remove_item(key).await
    }
}

#[tokio::test]
async fn test_build_cake_through_actions() {
    let book = RecipeBook::builder().in_memory().build().unwrap();
    let mut creator = book.creator();
    assert_eq!(creator.phase(), CreatorPhase::Empty);

    creator
        .apply(DraftAction::SetName("Cake".to_string()))
        .unwrap();
    let batter = creator.add_component().unwrap();
    assert_eq!(creator.phase(), CreatorPhase::Editing);

    creator
        .apply(DraftAction::RenameComponent(batter, "Batter".to_string()))
        .unwrap();
    let first = creator.draft().ingredient_key(batter, 0).unwrap();
    creator
        .apply(DraftAction::EditIngredient(batter, first, "flour".to_string()))
        .unwrap();
    let second = creator.add_ingredient(batter).unwrap();
    creator
        .apply(DraftAction::EditIngredient(batter, second, "sugar".to_string()))
        .unwrap();
    creator
        .apply(DraftAction::SetPreparare(batter, "Mix and bake".to_string()))
        .unwrap();

    let saved = creator.save_with_id(1).await.unwrap();
    assert_eq!(creator.phase(), CreatorPhase::Saved(1));

    let expected = Recipe::new(
        1,
        "Cake",
        vec![Component {
            name: "Batter".to_string(),
            ingredients: vec!["flour".to_string(), "sugar".to_string()],
            preparare: "Mix and bake".to_string(),
        }],
    );
    assert_eq!(saved, expected);
    assert_eq!(book.store().load_all().await.unwrap(), vec![expected]);
}

#[tokio::test]
async fn test_empty_draft_can_be_saved() {
    let book = RecipeBook::builder().in_memory().build().unwrap();
    let mut creator = book.creator();

    let saved = creator.save().await.unwrap();
    assert!(saved.name.is_empty());
    assert!(saved.components.is_empty());
    assert!(saved.id > 0);
    assert_eq!(book.store().load_all().await.unwrap(), vec![saved]);
}

#[tokio::test]
async fn test_unfilled_component_keeps_empty_slot() {
    let book = RecipeBook::builder().in_memory().build().unwrap();
    let mut creator = book.creator();
    creator.add_component().unwrap();

    let saved = creator.save_with_id(3).await.unwrap();
    assert_eq!(saved.components, vec![Component::new()]);
}

#[tokio::test]
async fn test_save_appends_to_existing_collection() {
    let book = RecipeBook::builder().in_memory().build().unwrap();
    book.store()
        .append(Recipe::new(1, "Old", vec![]))
        .await
        .unwrap();

    let mut creator = book.creator();
    creator
        .apply(DraftAction::SetName("New".to_string()))
        .unwrap();
    creator.save_with_id(2).await.unwrap();

    let names: Vec<_> = book
        .store()
        .load_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Old", "New"]);
}

#[tokio::test]
async fn test_saved_flow_is_terminal() {
    let book = RecipeBook::builder().in_memory().build().unwrap();
    let mut creator = book.creator();
    creator.save_with_id(5).await.unwrap();

    let edit = creator.apply(DraftAction::AddComponent);
    assert!(matches!(edit, Err(RecipeError::AlreadySaved(5))));

    let again = creator.save_with_id(6).await;
    assert!(matches!(again, Err(RecipeError::AlreadySaved(5))));
    assert_eq!(book.store().load_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_draft_for_retry() {
    let storage = Arc::new(FlakyStorage::default());
    let book = RecipeBook::builder()
        .storage(storage.clone())
        .build()
        .unwrap();

    let mut creator = book.creator();
    creator
        .apply(DraftAction::SetName("Stew".to_string()))
        .unwrap();
    creator.add_component().unwrap();

    storage.fail_writes.store(true, Ordering::SeqCst);
    let failed = creator.save_with_id(9).await;
    assert!(matches!(failed, Err(RecipeError::Storage(_))));
    assert_eq!(creator.phase(), CreatorPhase::Editing);
    assert_eq!(creator.draft().name(), "Stew");
    assert!(book.store().load_all().await.unwrap().is_empty());

    storage.fail_writes.store(false, Ordering::SeqCst);
    let saved = creator.save_with_id(9).await.unwrap();
    assert_eq!(saved.name, "Stew");
    assert_eq!(creator.phase(), CreatorPhase::Saved(9));
}

#[tokio::test]
async fn test_rejected_action_leaves_draft_unchanged() {
    let book = RecipeBook::builder().in_memory().build().unwrap();
    let mut creator = book.creator();
    let key = creator.add_component().unwrap();
    creator.apply(DraftAction::RemoveComponent(key)).unwrap();
    let before = creator.draft().clone();

    let result = creator.apply(DraftAction::AddIngredient(key));
    assert!(matches!(result, Err(RecipeError::UnknownDraftItem(_))));
    assert_eq!(creator.draft(), &before);
    assert_eq!(creator.phase(), CreatorPhase::Empty);
}

#[tokio::test]
async fn test_save_with_taken_id_keeps_draft_and_store() {
    let storage = Arc::new(MemoryStorage::new());
    let book = RecipeBook::builder()
        .storage(storage.clone())
        .build()
        .unwrap();

    book.creator().save_with_id(1).await.unwrap();
    let before = storage.get_item("recipes").await.unwrap();

    let mut creator = book.creator();
    creator
        .apply(DraftAction::SetName("Second".to_string()))
        .unwrap();
    let result = creator.save_with_id(1).await;
    assert!(matches!(result, Err(RecipeError::DuplicateId(1))));
    assert_eq!(storage.get_item("recipes").await.unwrap(), before);
    assert_eq!(creator.draft().name(), "Second");

    let saved = creator.save_with_id(2).await.unwrap();
    assert_eq!(saved.name, "Second");
    let ids: Vec<_> = book
        .store()
        .load_all()
        .await
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}
