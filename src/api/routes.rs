use axum::{
    routing::get,
    Router,
    extract::{Json, Path, Query, State},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::api::models::{RecipeDetail, SearchParams, SearchResponse};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/recipes/search", get(search_handler))
        .route("/get-recipe/:id", get(get_recipe_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn home() -> &'static str {
    "Recipe relay is running!"
}

async fn search_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>> {
    let start_time = Instant::now();
    let response = state.translator.search(SearchParams::from_pairs(pairs)).await?;

    let count = response.results.as_ref().map_or(0, Vec::len);
    info!(results = count, elapsed = ?start_time.elapsed(), "search completed");
    Ok(Json(response))
}

async fn get_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<RecipeDetail>> {
    let start_time = Instant::now();
    let recipe = state.translator.get_recipe(id).await?;

    info!(recipe_id = ?recipe.id(), elapsed = ?start_time.elapsed(), "recipe fetched");
    Ok(Json(recipe))
}
