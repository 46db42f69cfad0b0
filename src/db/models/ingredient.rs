// src/db/models/ingredient.rs

//! Ingredient model
//!
//! Ingredients are shared by any number of recipes and outlive the recipes
//! that reference them; nothing in this service ever deletes one.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, Row};

/// An ingredient, identified globally by its title
#[derive(Debug, Clone)]
pub struct Ingredient {
    pub id: Option<i64>,
    pub title: String,
}

impl Ingredient {
    /// Create a new Ingredient (not yet persisted)
    pub fn new(title: String) -> Self {
        Self { id: None, title }
    }

    /// Insert this ingredient into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute("INSERT INTO ingredients (title) VALUES (?1)", [&self.title])?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// Find an ingredient by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare("SELECT id, title FROM ingredients WHERE id = ?1")?;

        let ingredient = stmt.query_row([id], Self::from_row).optional()?;

        Ok(ingredient)
    }

    /// Find an ingredient by exact title match
    pub fn find_by_title(conn: &Connection, title: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare("SELECT id, title FROM ingredients WHERE title = ?1")?;

        let ingredient = stmt.query_row([title], Self::from_row).optional()?;

        Ok(ingredient)
    }

    /// Insert an ingredient by title, or return the existing row's id.
    ///
    /// Atomic: the UNIQUE constraint on title arbitrates concurrent inserts,
    /// so there is no select-then-insert window. The no-op DO UPDATE makes
    /// RETURNING yield the id on the conflict path as well.
    pub fn upsert(conn: &Connection, title: &str) -> Result<i64> {
        let id = conn.query_row(
            "INSERT INTO ingredients (title) VALUES (?1)
             ON CONFLICT(title) DO UPDATE SET title = excluded.title
             RETURNING id",
            [title],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Convert a database row to an Ingredient
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            title: row.get(1)?,
        })
    }
}
