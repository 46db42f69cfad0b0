// src/server/handlers/recipes.rs
//! Recipe CRUD handlers for the cookbook server
//!
//! Five operations: list, get (incrementing the view counter), create,
//! partial update, delete. Each handler opens a request-scoped connection
//! and runs its queries inside one transaction; NotFound and Conflict
//! propagate as their specific status codes while anything unexpected rolls
//! back and degrades to an opaque 500.

use crate::db;
use crate::db::models::{Ingredient, IngredientLine, Recipe, RecipeIngredient};
use crate::error::Error;
use crate::server::ServerState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared server state type
pub type SharedState = Arc<ServerState>;

/// Maximum length of recipe and ingredient titles, in characters
const MAX_TITLE_LEN: usize = 100;
/// Maximum length of recipe descriptions, in characters
const MAX_DESCRIPTION_LEN: usize = 1000;

/// Error response wrapper mapping crate errors to HTTP status codes
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            Error::Conflict(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            Error::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()),
            err => {
                // Unexpected failure: log the cause, answer with a fixed
                // opaque body
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

fn join_error(err: tokio::task::JoinError) -> ApiError {
    ApiError(Error::Internal(format!("task join error: {}", err)))
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Ingredient as supplied in create/update payloads
#[derive(Debug, Deserialize)]
pub struct IngredientIn {
    pub title: String,
    pub quantity: String,
}

/// Ingredient line in detail responses, with the per-recipe quantity resolved
#[derive(Debug, Serialize)]
pub struct IngredientOut {
    pub id: i64,
    pub title: String,
    pub quantity: Option<String>,
}

impl From<IngredientLine> for IngredientOut {
    fn from(line: IngredientLine) -> Self {
        Self {
            id: line.id,
            title: line.title,
            quantity: line.quantity,
        }
    }
}

/// Recipe summary for the list endpoint
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub cook_time: i64,
    pub views: i64,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.unwrap_or(0),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            cook_time: recipe.cook_time,
            views: recipe.views,
        }
    }
}

/// Full recipe details with resolved ingredient lines
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub cook_time: i64,
    pub views: i64,
    pub ingredients: Vec<IngredientOut>,
}

impl RecipeDetail {
    fn from_parts(recipe: Recipe, lines: Vec<IngredientLine>) -> Self {
        Self {
            id: recipe.id.unwrap_or(0),
            title: recipe.title,
            description: recipe.description,
            cook_time: recipe.cook_time,
            views: recipe.views,
            ingredients: lines.into_iter().map(IngredientOut::from).collect(),
        }
    }
}

/// Request body for recipe creation
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: String,
    pub cook_time: i64,
    pub ingredients: Vec<IngredientIn>,
}

/// Request body for partial update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cook_time: Option<i64>,
    pub ingredients: Option<Vec<IngredientIn>>,
}

/// Query parameters accepted on create
#[derive(Debug, Deserialize)]
pub struct CreateRecipeQuery {
    /// Accepted and discarded; kept as an extension point
    #[serde(default = "default_important")]
    pub important: bool,
}

fn default_important() -> bool {
    true
}

// =============================================================================
// Validation
// =============================================================================

fn validate_title(title: &str) -> crate::Result<()> {
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> crate::Result<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(Error::Validation(format!(
            "description must be at most {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

fn validate_cook_time(cook_time: i64) -> crate::Result<()> {
    if cook_time <= 0 {
        return Err(Error::Validation(
            "cook_time must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[IngredientIn]) -> crate::Result<()> {
    for ingredient in ingredients {
        validate_title(&ingredient.title)?;
    }
    Ok(())
}

fn validate_create(req: &CreateRecipeRequest) -> crate::Result<()> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    validate_cook_time(req.cook_time)?;
    if req.ingredients.is_empty() {
        return Err(Error::Validation(
            "at least one ingredient is required".to_string(),
        ));
    }
    validate_ingredients(&req.ingredients)
}

fn validate_update(req: &UpdateRecipeRequest) -> crate::Result<()> {
    if let Some(title) = &req.title {
        validate_title(title)?;
    }
    if let Some(description) = &req.description {
        validate_description(description)?;
    }
    if let Some(cook_time) = req.cook_time {
        validate_cook_time(cook_time)?;
    }
    // An empty list is allowed on update: it clears the association set
    if let Some(ingredients) = &req.ingredients {
        validate_ingredients(ingredients)?;
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// List all recipes ordered by views descending, cook_time ascending
///
/// GET /recipes/
pub async fn list_recipes(
    State(state): State<SharedState>,
) -> ApiResult<Json<Vec<RecipeSummary>>> {
    let recipes = tokio::task::spawn_blocking(move || {
        let conn = state.open_db()?;
        Recipe::list_by_popularity(&conn)
    })
    .await
    .map_err(join_error)??;

    let summaries: Vec<RecipeSummary> = recipes.iter().map(RecipeSummary::from).collect();
    Ok(Json(summaries))
}

/// Get a single recipe with resolved ingredients, incrementing its view
/// counter. The read and the increment commit together: a failure before
/// commit rolls the increment back rather than returning stale data.
///
/// GET /recipes/:id
pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RecipeDetail>> {
    let detail = tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;
        db::transaction(&mut conn, |tx| {
            let mut recipe = Recipe::find_by_id(tx, id)?
                .ok_or_else(|| Error::NotFound(format!("recipe {}", id)))?;

            recipe.views = Recipe::increment_views(tx, id)?;
            let lines = IngredientLine::find_by_recipe(tx, id)?;

            Ok(RecipeDetail::from_parts(recipe, lines))
        })
    })
    .await
    .map_err(join_error)??;

    Ok(Json(detail))
}

/// Create a recipe together with its ingredient associations
///
/// POST /recipes/?important=<bool>
pub async fn create_recipe(
    State(state): State<SharedState>,
    Query(query): Query<CreateRecipeQuery>,
    Json(req): Json<CreateRecipeRequest>,
) -> ApiResult<Json<RecipeDetail>> {
    validate_create(&req).map_err(ApiError)?;

    // Accepted but not persisted; see the API docs
    debug!("Create recipe '{}' (important={})", req.title, query.important);

    let detail = tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;
        db::transaction(&mut conn, |tx| {
            if Recipe::find_by_title(tx, &req.title)?.is_some() {
                return Err(Error::Conflict(format!(
                    "recipe with title '{}' already exists",
                    req.title
                )));
            }

            let mut recipe = Recipe::new(
                req.title.clone(),
                Some(req.description.clone()),
                req.cook_time,
            );
            let recipe_id = recipe.insert(tx)?;

            for ingredient in &req.ingredients {
                let ingredient_id = Ingredient::upsert(tx, &ingredient.title)?;
                RecipeIngredient::new(recipe_id, ingredient_id, Some(ingredient.quantity.clone()))
                    .upsert(tx)?;
            }

            // Reload so the response reflects exactly what was persisted
            let recipe = Recipe::find_by_id(tx, recipe_id)?
                .ok_or_else(|| Error::Internal("recipe vanished after insert".to_string()))?;
            let lines = IngredientLine::find_by_recipe(tx, recipe_id)?;

            Ok(RecipeDetail::from_parts(recipe, lines))
        })
    })
    .await
    .map_err(join_error)??;

    info!("Created recipe {} '{}'", detail.id, detail.title);
    Ok(Json(detail))
}

/// Partially update a recipe. Scalar fields apply independently; if the
/// ingredients field is supplied (even as an empty list) the entire
/// association set is replaced.
///
/// PATCH /recipes/:id
pub async fn update_recipe(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeDetail>> {
    validate_update(&req).map_err(ApiError)?;

    let detail = tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;
        db::transaction(&mut conn, |tx| {
            let mut recipe = Recipe::find_by_id(tx, id)?
                .ok_or_else(|| Error::NotFound(format!("recipe {}", id)))?;

            if let Some(title) = req.title {
                recipe.title = title;
            }
            if let Some(description) = req.description {
                recipe.description = Some(description);
            }
            if let Some(cook_time) = req.cook_time {
                recipe.cook_time = cook_time;
            }
            recipe.update(tx)?;

            if let Some(ingredients) = &req.ingredients {
                // Replace the whole association set
                RecipeIngredient::delete_by_recipe(tx, id)?;
                for ingredient in ingredients {
                    let ingredient_id = Ingredient::upsert(tx, &ingredient.title)?;
                    RecipeIngredient::new(id, ingredient_id, Some(ingredient.quantity.clone()))
                        .upsert(tx)?;
                }
            }

            let lines = IngredientLine::find_by_recipe(tx, id)?;
            Ok(RecipeDetail::from_parts(recipe, lines))
        })
    })
    .await
    .map_err(join_error)??;

    info!("Updated recipe {}", id);
    Ok(Json(detail))
}

/// Delete a recipe and its association rows; referenced ingredients are left
/// untouched.
///
/// DELETE /recipes/:id
pub async fn delete_recipe(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    tokio::task::spawn_blocking(move || {
        let mut conn = state.open_db()?;
        db::transaction(&mut conn, |tx| {
            Recipe::find_by_id(tx, id)?
                .ok_or_else(|| Error::NotFound(format!("recipe {}", id)))?;

            RecipeIngredient::delete_by_recipe(tx, id)?;
            Recipe::delete(tx, id)?;
            Ok(())
        })
    })
    .await
    .map_err(join_error)??;

    info!("Deleted recipe {}", id);
    Ok(StatusCode::NO_CONTENT)
}
