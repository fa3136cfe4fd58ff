//! Create a recipe, share it as a code, and import it on a second "device"
//!
//! Both devices keep their collection in memory, so nothing is written to disk.

use recipe_book::{DraftAction, RecipeBook};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::try_init();

    // Device A: build and save a recipe
    let phone_a = RecipeBook::builder().in_memory().build()?;
    let mut creator = phone_a.creator();
    creator.apply(DraftAction::SetName("Cake".to_string()))?;

    let batter = creator.add_component()?;
    creator.apply(DraftAction::RenameComponent(batter, "Batter".to_string()))?;
    let flour = creator.draft().ingredient_key(batter, 0)?;
    creator.apply(DraftAction::EditIngredient(batter, flour, "flour".to_string()))?;
    let sugar = creator.add_ingredient(batter)?;
    creator.apply(DraftAction::EditIngredient(batter, sugar, "sugar".to_string()))?;
    creator.apply(DraftAction::SetPreparare(batter, "Mix and bake".to_string()))?;

    let recipe = creator.save().await?;
    println!("=== Saved on device A ===");
    print!("{}", recipe.to_text(0));

    // Share it
    let code = phone_a.viewer().export(recipe.id).await?;
    println!("\n=== Share code ===\n{}", code);

    // Device B: paste the code
    let phone_b = RecipeBook::builder().in_memory().build()?;
    let mut viewer = phone_b.viewer();
    viewer.import(&code).await?;
    println!("\n=== Device B now has {} recipe(s) ===", viewer.recipes().len());

    // A second paste is rejected
    if let Err(e) = viewer.import(&code).await {
        println!("Second import rejected: {}", e);
    }

    Ok(())
}
