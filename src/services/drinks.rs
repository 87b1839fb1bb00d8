use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError};

use crate::database::models::{Drink, DrinkShort, Ingredient, Recipe};
use crate::database::{DatabaseError, Repository, Stores};
use crate::error::ApiError;
use crate::middleware::{not_blank, InputBody};
use crate::types::DbId;

fn valid_recipe(recipe: &[Ingredient]) -> Result<(), ValidationError> {
    if recipe.is_empty() {
        return Err(ValidationError::new("recipe_empty"));
    }
    let complete = recipe
        .iter()
        .all(|i| !i.name.trim().is_empty() && !i.color.trim().is_empty() && i.parts > 0);
    if !complete {
        return Err(ValidationError::new("ingredient_incomplete"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDrink {
    #[validate(length(max = 80), custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "valid_recipe"))]
    pub recipe: Vec<Ingredient>,
}

impl InputBody for NewDrink {}

/// Either field may be omitted
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DrinkPatch {
    #[validate(length(max = 80), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "valid_recipe"))]
    pub recipe: Option<Vec<Ingredient>>,
}

impl InputBody for DrinkPatch {}

#[derive(Debug, Serialize)]
pub struct DrinkMenu {
    pub drinks: Vec<DrinkShort>,
}

#[derive(Debug, Serialize)]
pub struct DrinkDetails {
    pub drinks: Vec<Drink>,
}

#[derive(Debug, Serialize)]
pub struct DeletedDrink {
    pub delete: DbId,
}

fn title_taken(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::Conflict(_) => ApiError::conflict("This drink name already exists"),
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct DrinkService {
    drinks: Arc<dyn Repository<Drink>>,
}

impl DrinkService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            drinks: stores.drinks.clone(),
        }
    }

    /// Public menu: short form only
    pub async fn menu(&self) -> Result<DrinkMenu, ApiError> {
        let drinks = self.drinks.find_all(&()).await?;
        Ok(DrinkMenu {
            drinks: drinks.iter().map(Drink::short).collect(),
        })
    }

    pub async fn details(&self) -> Result<DrinkDetails, ApiError> {
        Ok(DrinkDetails {
            drinks: self.drinks.find_all(&()).await?,
        })
    }

    pub async fn create(&self, input: NewDrink) -> Result<DrinkDetails, ApiError> {
        let drink = self
            .drinks
            .insert(Drink {
                id: 0,
                title: input.title.trim().to_string(),
                recipe: Recipe(input.recipe),
            })
            .await
            .map_err(title_taken)?;
        info!(id = drink.id, title = %drink.title, "Created drink");
        Ok(DrinkDetails {
            drinks: vec![drink],
        })
    }

    pub async fn update(&self, id: DbId, patch: DrinkPatch) -> Result<DrinkDetails, ApiError> {
        let mut drink = self.drinks.find_404(id).await?;
        if let Some(title) = patch.title {
            drink.title = title.trim().to_string();
        }
        if let Some(recipe) = patch.recipe {
            drink.recipe = Recipe(recipe);
        }
        let drink = self.drinks.update(drink).await.map_err(title_taken)?;
        info!(id, "Updated drink");
        Ok(DrinkDetails {
            drinks: vec![drink],
        })
    }

    pub async fn delete(&self, id: DbId) -> Result<DeletedDrink, ApiError> {
        if !self.drinks.delete(id).await? {
            return Err(ApiError::not_found("resource not found"));
        }
        info!(id, "Deleted drink");
        Ok(DeletedDrink { delete: id })
    }
}
