use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::api::models::{RecipeDetail, SearchResponse};
use crate::config::Config;
use crate::error::UpstreamError;

/// Query parameters sent to `/recipes/complexSearch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamSearchParams {
    pub query: String,
    pub number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub add_recipe_information: bool,
    pub add_recipe_nutrition: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ready_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ready_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecipeLookupParams<'a> {
    api_key: &'a str,
    include_nutrition: bool,
}

#[derive(Clone)]
pub struct SpoonacularClient {
    http: Client,
    base_url: String,
}

impl SpoonacularClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(config.spoonacular_base_url.clone(), config.upstream_timeout)
    }

    pub async fn complex_search(
        &self,
        params: &UpstreamSearchParams,
    ) -> Result<SearchResponse, UpstreamError> {
        let url = format!("{}/recipes/complexSearch", self.base_url);
        debug!(query = %params.query, "calling complex search");
        self.get_json(&url, params).await
    }

    pub async fn recipe_information(
        &self,
        id: u64,
        api_key: &str,
    ) -> Result<RecipeDetail, UpstreamError> {
        let url = format!("{}/recipes/{}/information", self.base_url, id);
        let params = RecipeLookupParams {
            api_key,
            include_nutrition: true,
        };
        debug!(recipe_id = id, "calling recipe information");
        self.get_json(&url, &params).await
    }

    async fn get_json<Q, T>(&self, url: &str, query: &Q) -> Result<T, UpstreamError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let response = self.http.get(url).query(query).send().await?;
        let response = check_status(response).await?;
        let body = response.json::<T>().await?;
        debug!(url, elapsed = ?start.elapsed(), "upstream call completed");
        Ok(body)
    }
}

async fn check_status(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            debug!(error = %err, "could not read upstream error body");
            format!("<unreadable body: {}>", err)
        }
    };
    warn!(status = status.as_u16(), "upstream returned non-success status");
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_params_use_upstream_names_and_skip_unset() {
        let params = UpstreamSearchParams {
            query: "soup".into(),
            number: 10,
            api_key: None,
            add_recipe_information: true,
            add_recipe_nutrition: true,
            max_ready_time: Some(30),
            min_ready_time: None,
            diet: None,
            cuisine: Some("thai".into()),
        };

        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "query": "soup",
                "number": 10,
                "addRecipeInformation": true,
                "addRecipeNutrition": true,
                "maxReadyTime": 30,
                "cuisine": "thai",
            })
        );
    }
}
