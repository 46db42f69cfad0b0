// src/db/models/mod.rs

//! Data models for cookbook database entities
//!
//! This module defines Rust structs that correspond to database tables
//! and provides methods for creating, reading, updating, and deleting
//! records. Every query path a handler uses is a named function here; the
//! only nested load (ingredient lines for a recipe) is an explicit JOIN.

mod ingredient;
mod recipe;
mod recipe_ingredient;

pub use ingredient::Ingredient;
pub use recipe::Recipe;
pub use recipe_ingredient::{IngredientLine, RecipeIngredient};
