//! Maps inbound search/detail requests onto the upstream recipe API and
//! reshapes what comes back.

use serde_json::Number;
use tracing::{info, warn};

use crate::api::models::{RecipeDetail, RecipeSummary, SearchParams, SearchResponse};
use crate::error::{AppError, Result};
use crate::spoonacular::{SpoonacularClient, UpstreamSearchParams};

pub const RESULT_COUNT: u32 = 10;
pub const ALLOWED_DIETS: [&str; 5] = ["vegan", "vegetarian", "gluten free", "keto", "paleo"];

const SEARCH_FAILED: &str = "Spoonacular request failed";
const DETAIL_FAILED: &str = "Failed to fetch recipe details";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookTime {
    UnderThirty,
    ThirtyToSixty,
    OverSixty,
}

impl CookTime {
    /// Unrecognised buckets yield `None` and apply no constraint.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "<30" => Some(CookTime::UnderThirty),
            "30-60" => Some(CookTime::ThirtyToSixty),
            ">60" => Some(CookTime::OverSixty),
            _ => None,
        }
    }

    /// `(min_ready_time, max_ready_time)` in minutes.
    pub fn ready_time_bounds(self) -> (Option<u32>, Option<u32>) {
        match self {
            CookTime::UnderThirty => (None, Some(30)),
            CookTime::ThirtyToSixty => (Some(30), Some(60)),
            CookTime::OverSixty => (Some(60), None),
        }
    }
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub cook_time: Option<CookTime>,
    pub diet: Option<String>,
    pub cuisine: Option<String>,
}

impl SearchQuery {
    pub fn from_params(params: SearchParams) -> Result<Self> {
        let term = params
            .q
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::Validation("Missing search query".to_string()))?;

        Ok(SearchQuery {
            term,
            cook_time: params.cook_time.as_deref().and_then(CookTime::parse),
            diet: params.dietary.as_deref().and_then(first_allowed_diet),
            cuisine: params.cuisines.filter(|c| !c.is_empty()),
        })
    }

    pub fn to_upstream(&self, api_key: Option<&str>) -> UpstreamSearchParams {
        let (min_ready_time, max_ready_time) = self
            .cook_time
            .map(CookTime::ready_time_bounds)
            .unwrap_or((None, None));

        UpstreamSearchParams {
            query: self.term.clone(),
            number: RESULT_COUNT,
            api_key: api_key.map(str::to_string),
            add_recipe_information: true,
            add_recipe_nutrition: true,
            max_ready_time,
            min_ready_time,
            diet: self.diet.clone(),
            cuisine: self.cuisine.clone(),
        }
    }
}

/// Only the first allow-listed tag survives; everything else is dropped.
pub fn first_allowed_diet(dietary: &str) -> Option<String> {
    dietary
        .split(',')
        .map(|tag| tag.trim().to_lowercase())
        .find(|tag| ALLOWED_DIETS.contains(&tag.as_str()))
}

pub fn calories_of(recipe: &RecipeSummary) -> Option<Number> {
    recipe
        .nutrition()?
        .nutrients()
        .find(|n| n.name.as_deref() == Some("Calories"))
        .and_then(|n| n.amount)
}

pub fn attach_calories(response: &mut SearchResponse) {
    for recipe in response.results.iter_mut().flatten() {
        recipe.extra.remove("calories");
        recipe.calories = calories_of(recipe);
    }
}

#[derive(Clone)]
pub struct Translator {
    client: SpoonacularClient,
    api_key: Option<String>,
}

impl Translator {
    pub fn new(client: SpoonacularClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub async fn search(&self, params: SearchParams) -> Result<SearchResponse> {
        let query = SearchQuery::from_params(params)?;
        let upstream = query.to_upstream(self.api_key.as_deref());
        info!(query = %query.term, cook_time = ?query.cook_time, diet = ?query.diet, cuisine = ?query.cuisine, "searching recipes");

        let mut response = self
            .client
            .complex_search(&upstream)
            .await
            .map_err(|source| AppError::Upstream { context: SEARCH_FAILED, source })?;

        attach_calories(&mut response);
        Ok(response)
    }

    pub async fn get_recipe(&self, id: u64) -> Result<RecipeDetail> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!(recipe_id = id, "recipe lookup without an API key");
            return Err(AppError::Config("API key not configured".to_string()));
        };

        info!(recipe_id = id, "fetching recipe");
        self.client
            .recipe_information(id, api_key)
            .await
            .map_err(|source| AppError::Upstream { context: DETAIL_FAILED, source })
    }
}
