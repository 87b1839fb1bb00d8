use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;
use crate::types::DbId;

/// One line of a drink recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// Ordered ingredient list, persisted as JSON text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(pub Vec<Ingredient>);

impl Recipe {
    pub fn to_text(&self) -> Result<String, DatabaseError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn from_text(text: &str) -> Result<Self, DatabaseError> {
        Ok(Recipe(serde_json::from_str(text)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: DbId,
    pub title: String,
    pub recipe: Recipe,
}

/// Public listing form: ingredient names are withheld
#[derive(Debug, Clone, Serialize)]
pub struct DrinkShort {
    pub id: DbId,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

impl Drink {
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .0
                .iter()
                .map(|i| ShortIngredient {
                    color: i.color.clone(),
                    parts: i.parts,
                })
                .collect(),
        }
    }
}

/// Storage shape of a drink: the recipe column holds serialized JSON.
#[derive(Debug, Clone, FromRow)]
pub struct DrinkRow {
    pub id: DbId,
    pub title: String,
    pub recipe: String,
}

impl TryFrom<DrinkRow> for Drink {
    type Error = DatabaseError;

    fn try_from(row: DrinkRow) -> Result<Self, Self::Error> {
        Ok(Drink {
            id: row.id,
            title: row.title,
            recipe: Recipe::from_text(&row.recipe)?,
        })
    }
}

impl Entity for Drink {
    type Id = DbId;
    type Filter = ();

    const KIND: &'static str = "drink";

    fn id(&self) -> DbId {
        self.id
    }

    fn assign_id(&mut self, generated: i64) {
        self.id = generated;
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.title)
    }
}
