use clap::{Parser, Subcommand};
use log::error;
use std::process::ExitCode;

use recipe_book::config::StorageBackend;
use recipe_book::{AppConfig, DraftAction, RecipeBook, RecipeError, RecipeId};

#[derive(Parser)]
#[command(name = "recipe-book")]
#[command(version)]
#[command(about = "Create, store and share cooking recipes", long_about = None)]
struct Cli {
    /// Directory holding the recipe collection (overrides configuration)
    #[arg(short, long, global = true)]
    storage_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved recipes
    List,

    /// Print one recipe in full
    Show {
        id: RecipeId,
    },

    /// Create and save a new recipe
    Create {
        /// Recipe name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Component as `name|ingredient;ingredient|preparation`, repeatable
        #[arg(short, long = "component")]
        components: Vec<String>,
    },

    /// Delete a recipe by id
    Delete {
        id: RecipeId,
    },

    /// Print the share code for a recipe
    Export {
        id: RecipeId,
    },

    /// Import a recipe from a share code
    Import {
        code: String,
    },
}

/// A component given on the command line, split into its three fields
#[derive(Debug, PartialEq, Eq)]
struct ComponentSpec {
    name: String,
    ingredients: Vec<String>,
    preparare: String,
}

/// Parse `name|ingredient;ingredient|preparation`. Missing sections are empty;
/// an empty ingredient section still yields the one empty slot a new
/// component starts with.
fn parse_component_spec(spec: &str) -> ComponentSpec {
    let mut parts = spec.splitn(3, '|');
    let name = parts.next().unwrap_or_default().trim().to_string();
    let ingredients = parts
        .next()
        .unwrap_or_default()
        .split(';')
        .map(|s| s.trim().to_string())
        .collect();
    let preparare = parts.next().unwrap_or_default().trim().to_string();

    ComponentSpec {
        name,
        ingredients,
        preparare,
    }
}

fn open_book(storage_dir: Option<String>) -> Result<RecipeBook, RecipeError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = storage_dir {
        config.storage.backend = StorageBackend::File;
        config.storage.dir = dir;
    }
    RecipeBook::builder().config(config).build()
}

async fn run(cli: Cli) -> Result<(), RecipeError> {
    let book = open_book(cli.storage_dir)?;

    match cli.command {
        Commands::List => {
            let mut viewer = book.viewer();
            let recipes = viewer.list().await?;
            if recipes.is_empty() {
                println!("No saved recipes yet");
            }
            for (index, recipe) in recipes.iter().enumerate() {
                println!("{}\t{}", recipe.id, recipe.display_title(index));
            }
        }
        Commands::Show { id } => {
            let recipes = book.store().load_all().await?;
            let (index, recipe) = recipes
                .iter()
                .enumerate()
                .find(|(_, r)| r.id == id)
                .ok_or(RecipeError::NotFound(id))?;
            print!("{}", recipe.to_text(index));
        }
        Commands::Create { name, components } => {
            let mut creator = book.creator();
            creator.apply(DraftAction::SetName(name))?;

            for spec in components.iter().map(|s| parse_component_spec(s)) {
                let key = creator.add_component()?;
                creator.apply(DraftAction::RenameComponent(key, spec.name))?;
                creator.apply(DraftAction::SetPreparare(key, spec.preparare))?;

                let first_slot = creator.draft().ingredient_key(key, 0)?;
                let mut ingredients = spec.ingredients.into_iter();
                if let Some(first) = ingredients.next() {
                    creator.apply(DraftAction::EditIngredient(key, first_slot, first))?;
                }
                for text in ingredients {
                    let slot = creator.add_ingredient(key)?;
                    creator.apply(DraftAction::EditIngredient(key, slot, text))?;
                }
            }

            let recipe = creator.save().await?;
            println!("Saved recipe {}", recipe.id);
        }
        Commands::Delete { id } => {
            if book.viewer().delete(id).await? {
                println!("Deleted recipe {}", id);
            } else {
                println!("No recipe with id {}", id);
            }
        }
        Commands::Export { id } => {
            println!("{}", book.viewer().export(id).await?);
        }
        Commands::Import { code } => {
            let recipe = book.viewer().import(&code).await?;
            println!("Imported recipe {} '{}'", recipe.id, recipe.name);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
