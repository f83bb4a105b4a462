use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Query string accepted by `/recipes/search`.
#[derive(Debug, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub cook_time: Option<String>,
    pub dietary: Option<String>,
    pub cuisines: Option<String>,
}

impl SearchParams {
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "cook_time" => &mut params.cook_time,
                "dietary" => &mut params.dietary,
                "cuisines" => &mut params.cuisines,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Body returned by the upstream complex search, reshaped before it is sent back.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RecipeSummary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One search result. Upstream fields are kept verbatim in `extra`; only
/// `calories` is added.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(skip_deserializing)]
    pub calories: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecipeSummary {
    /// Typed view of the `nutrition` object, `None` when it is absent, null or malformed.
    pub fn nutrition(&self) -> Option<Nutrition> {
        let raw = self.extra.get("nutrition")?;
        Nutrition::deserialize(raw).ok()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "null_as_default")]
    nutrients: Vec<Value>,
}

impl Nutrition {
    /// Entries that do not decode as a nutrient are skipped.
    pub fn nutrients(&self) -> impl Iterator<Item = Nutrient> + '_ {
        self.nutrients
            .iter()
            .filter_map(|raw| Nutrient::deserialize(raw).ok())
    }
}

#[derive(Debug, Deserialize)]
pub struct Nutrient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<Number>,
    #[serde(default)]
    pub unit: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Single-recipe record, passed through from upstream untouched.
#[derive(Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeDetail(pub Value);

impl RecipeDetail {
    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn summary(raw: Value) -> RecipeSummary {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn repeated_query_keys_keep_first_value() {
        let params = SearchParams::from_pairs([
            ("q".to_string(), "soup".to_string()),
            ("q".to_string(), "stew".to_string()),
            ("cuisines".to_string(), "thai".to_string()),
            ("page".to_string(), "2".to_string()),
        ]);
        assert_eq!(params.q.as_deref(), Some("soup"));
        assert_eq!(params.cuisines.as_deref(), Some("thai"));
        assert_eq!(params.cook_time, None);
        assert_eq!(params.dietary, None);
    }

    #[test]
    fn null_valued_fields_survive_round_trip() {
        let recipe = summary(json!({
            "id": 1,
            "nutrition": null,
            "image": null
        }));
        assert!(recipe.nutrition().is_none());

        let body = serde_json::to_value(&recipe).unwrap();
        assert_eq!(body["nutrition"], Value::Null);
        assert!(body.as_object().unwrap().contains_key("nutrition"));
        assert!(body.as_object().unwrap().contains_key("image"));
    }

    #[test]
    fn null_nutrients_decode_as_empty() {
        let recipe = summary(json!({ "nutrition": { "nutrients": null } }));
        let nutrition = recipe.nutrition().unwrap();
        assert_eq!(nutrition.nutrients().count(), 0);
    }

    #[test]
    fn null_nutrient_name_and_amount_are_tolerated() {
        let recipe = summary(json!({
            "nutrition": { "nutrients": [
                { "name": null, "amount": 3, "unit": null },
                { "name": "Calories", "amount": null },
                { "name": 7 }
            ] }
        }));

        let nutrients: Vec<Nutrient> = recipe.nutrition().unwrap().nutrients().collect();
        assert_eq!(nutrients.len(), 2);
        assert_eq!(nutrients[0].name, None);
        assert_eq!(nutrients[0].unit, None);
        assert_eq!(nutrients[1].name.as_deref(), Some("Calories"));
        assert_eq!(nutrients[1].amount, None);

        let body = serde_json::to_value(&recipe).unwrap();
        assert_eq!(body["nutrition"]["nutrients"][0]["unit"], Value::Null);
        assert!(body["nutrition"]["nutrients"][1].as_object().unwrap().contains_key("amount"));
    }
}
