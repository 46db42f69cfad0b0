// src/db/models/recipe_ingredient.rs

//! Recipe/ingredient association model
//!
//! Each row represents "this recipe uses this ingredient in this quantity".
//! Rows are owned by the recipe side: deleting a recipe removes its rows,
//! never the referenced ingredients.

use crate::error::Result;
use rusqlite::{params, Connection, Row};

/// Association row linking a recipe to an ingredient with a quantity
#[derive(Debug, Clone)]
pub struct RecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: Option<String>,
}

impl RecipeIngredient {
    /// Create a new association row (not yet persisted)
    pub fn new(recipe_id: i64, ingredient_id: i64, quantity: Option<String>) -> Self {
        Self {
            recipe_id,
            ingredient_id,
            quantity,
        }
    }

    /// Insert this association, or update its quantity if the
    /// (recipe, ingredient) pair already exists. Re-supplying the same
    /// ingredient must never duplicate the row.
    pub fn upsert(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO recipe_ingredient (recipe_id, ingredient_id, quantity)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(recipe_id, ingredient_id) DO UPDATE SET quantity = excluded.quantity",
            params![self.recipe_id, self.ingredient_id, &self.quantity],
        )?;
        Ok(())
    }

    /// Find all association rows for a recipe
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT recipe_id, ingredient_id, quantity FROM recipe_ingredient
             WHERE recipe_id = ?1 ORDER BY ingredient_id",
        )?;

        let rows = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Delete all association rows for a recipe, returning how many were
    /// removed. Referenced ingredients are left untouched.
    pub fn delete_by_recipe(conn: &Connection, recipe_id: i64) -> Result<usize> {
        let deleted = conn.execute(
            "DELETE FROM recipe_ingredient WHERE recipe_id = ?1",
            [recipe_id],
        )?;
        Ok(deleted)
    }

    /// Convert a database row to a RecipeIngredient
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            recipe_id: row.get(0)?,
            ingredient_id: row.get(1)?,
            quantity: row.get(2)?,
        })
    }
}

/// One resolved ingredient line for a recipe: the ingredient joined with its
/// per-recipe quantity. This is the eager query detail responses use, so
/// handlers never fall back to one lookup per ingredient.
#[derive(Debug, Clone)]
pub struct IngredientLine {
    pub id: i64,
    pub title: String,
    pub quantity: Option<String>,
}

impl IngredientLine {
    /// Load all ingredient lines for a recipe in a single JOIN
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT i.id, i.title, ri.quantity
             FROM recipe_ingredient ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE ri.recipe_id = ?1
             ORDER BY i.id",
        )?;

        let lines = stmt
            .query_map([recipe_id], |row| {
                Ok(Self {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    quantity: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(lines)
    }
}
