// src/db/models/recipe.rs

//! Recipe model - the primary entity of the cookbook

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// A recipe with a view counter
#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub cook_time: i64,
    pub views: i64,
}

impl Recipe {
    /// Create a new Recipe (not yet persisted, views start at 0)
    pub fn new(title: String, description: Option<String>, cook_time: i64) -> Self {
        Self {
            id: None,
            title,
            description,
            cook_time,
            views: 0,
        }
    }

    /// Insert this recipe into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipes (title, description, cook_time, views)
             VALUES (?1, ?2, ?3, ?4)",
            params![&self.title, &self.description, self.cook_time, self.views],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find a recipe by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, description, cook_time, views FROM recipes WHERE id = ?1",
        )?;

        let recipe = stmt.query_row([id], Self::from_row).optional()?;

        Ok(recipe)
    }

    /// Find a recipe by exact title match
    pub fn find_by_title(conn: &Connection, title: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, description, cook_time, views FROM recipes WHERE title = ?1",
        )?;

        let recipe = stmt.query_row([title], Self::from_row).optional()?;

        Ok(recipe)
    }

    /// List all recipes ordered by views descending; ties broken by
    /// cook_time ascending so faster recipes surface first among equally
    /// popular ones.
    pub fn list_by_popularity(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, description, cook_time, views FROM recipes
             ORDER BY views DESC, cook_time ASC",
        )?;

        let recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Increment the view counter by exactly 1 and return the new value
    pub fn increment_views(conn: &Connection, id: i64) -> Result<i64> {
        let views = conn.query_row(
            "UPDATE recipes SET views = views + 1 WHERE id = ?1 RETURNING views",
            [id],
            |row| row.get(0),
        )?;
        Ok(views)
    }

    /// Persist the scalar fields (title, description, cook_time) of this
    /// recipe. The view counter is deliberately not touched here.
    pub fn update(&self, conn: &Connection) -> Result<()> {
        let id = self
            .id
            .ok_or_else(|| crate::Error::Internal("cannot update a recipe without an id".to_string()))?;

        conn.execute(
            "UPDATE recipes SET title = ?1, description = ?2, cook_time = ?3 WHERE id = ?4",
            params![&self.title, &self.description, self.cook_time, id],
        )?;
        Ok(())
    }

    /// Delete a recipe by ID
    pub fn delete(conn: &Connection, id: i64) -> Result<()> {
        conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Convert a database row to a Recipe
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            description: row.get(2)?,
            cook_time: row.get(3)?,
            views: row.get(4)?,
        })
    }
}
