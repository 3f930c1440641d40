//! External style advisor
//!
//! The advisor is an optional model-backed collaborator. Every call can
//! fail; handlers fall back to the local core when it does.

use crate::config::AdvisorConfig;
use async_trait::async_trait;
use fitcheck_classifiers::RawAnalysis;
use fitcheck_core::{Error, GarmentRecord, OutfitRequest, Result, WeatherBand};
use fitcheck_engine::OutfitResult;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Weather context handed to the advisor for a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    pub band: WeatherBand,
    pub temperature: Option<f64>,
    pub condition: Option<String>,
}

impl WeatherContext {
    fn describe(&self) -> String {
        match self.temperature {
            Some(celsius) => format!(
                "Temperature: {}°C, Condition: {}",
                celsius,
                self.condition.as_deref().unwrap_or("clear")
            ),
            None => format!("Weather: {}", self.band),
        }
    }
}

/// One recommended garment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub reason: String,
}

/// An outfit recommendation in the shape the advisor answers with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub outfit: Vec<RecommendedItem>,
    #[serde(default)]
    pub overall_reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_score: Option<f32>,
    #[serde(default)]
    pub confidence: f32,
}

impl From<&OutfitResult> for Recommendation {
    fn from(result: &OutfitResult) -> Self {
        Self {
            outfit: result
                .items
                .iter()
                .map(|item| RecommendedItem {
                    name: item.name.clone(),
                    category: item.garment_type.to_string(),
                    reason: format!("Suits {} weather and the {} vibe", result.weather, result.vibe),
                })
                .collect(),
            overall_reasoning: result.reasoning.clone(),
            style_score: None,
            weather_score: None,
            confidence: result.confidence,
        }
    }
}

/// Model-backed garment tagging, request interpretation and outfit picking
#[async_trait]
pub trait StyleAdvisor: Send + Sync {
    /// Advisor name for logs and responses
    fn name(&self) -> &str;

    /// Tag a garment from its filename and optional image (base64 or data URL)
    async fn analyze_garment(&self, filename: &str, image_data: Option<&str>) -> Result<RawAnalysis>;

    /// Turn a free-text request into weather, vibe and occasion
    async fn interpret_request(&self, text: &str) -> Result<OutfitRequest>;

    /// Pick one outfit from the wardrobe for the weather, vibe and occasion
    async fn recommend(
        &self,
        wardrobe: &[GarmentRecord],
        weather: &WeatherContext,
        vibe: &str,
        occasion: &str,
    ) -> Result<Recommendation>;
}

/// Inline image payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

/// Split a `data:<mime>;base64,<payload>` URL; plain base64 is taken as JPEG
pub fn parse_image_data(image_data: &str) -> InlineImage {
    if let Some(rest) = image_data.strip_prefix("data:") {
        if let Some((header, payload)) = rest.split_once(',') {
            if let Some(mime) = header.strip_suffix(";base64") {
                let mime_type = if mime.is_empty() { "image/jpeg" } else { mime };
                return InlineImage {
                    mime_type: mime_type.to_string(),
                    data: payload.to_string(),
                };
            }
        }
    }

    InlineImage {
        mime_type: "image/jpeg".to_string(),
        data: image_data.to_string(),
    }
}

/// The outermost `{...}` span of a model reply
pub fn extract_json(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

fn parse_reply<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T> {
    let body = extract_json(reply).ok_or_else(|| Error::upstream("advisor reply held no JSON object"))?;
    Ok(serde_json::from_str(body)?)
}

const PERSONA: &str = "You are a professional fashion stylist with expertise in clothing analysis and outfit coordination.";

fn analysis_prompt(filename: &str) -> String {
    format!(
        r#"You are a fashion product tagger. Analyze the clothing item provided (image attached if present) and the filename "{filename}".
Return ONLY a single JSON object, nothing else. Keys must be exactly:
name, category, color, style, weather_suitability, occasions, confidence, description.
- category must be one of: tops, bottoms, dresses, shoes, accessories.
- color must be one of: black, white, red, blue, green, yellow, purple, pink, brown, gray, orange.
- style must be one of: casual, formal, sporty, vintage, trendy, bohemian.
- weather_suitability entries must be from: hot, warm, mild, cool, cold, rainy, snowy.
If you detect synonyms, normalize them (e.g., navy->blue, denim->blue, beige->brown, grey->gray).
Choose the primary color of the garment (ignore the background and model's skin/shoes if not the product).
Example valid JSON:
{{"name":"Black Jeans","category":"bottoms","color":"black","style":"casual","weather_suitability":["mild","cool"],"occasions":["casual","everyday"],"confidence":0.9,"description":"Denim pants; dark black tone"}}"#
    )
}

fn request_prompt(text: &str) -> String {
    format!(
        r#"Read this outfit request: "{text}"
Return ONLY a single JSON object with keys weather, vibe, occasion.
- weather must be one of: hot, warm, mild, cool, cold, rainy, snowy.
- vibe must be one of: casual, professional, business, trendy, sporty.
- occasion must be one of: date, work, party, casual, general.
Use mild, casual and general when the request does not say."#
    )
}

fn recommendation_prompt(
    wardrobe: &[GarmentRecord],
    weather: &WeatherContext,
    vibe: &str,
    occasion: &str,
) -> String {
    let items = wardrobe
        .iter()
        .map(|item| {
            format!(
                "- {} ({}, {} color, {} style)",
                item.name, item.garment_type, item.color, item.style
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Based on the following information, recommend ONE complete outfit.

WARDROBE ITEMS:
{items}

WEATHER: {weather}
VIBE: {vibe}
OCCASION: {occasion}

Select items from the wardrobe only. Respond in JSON format:
{{"outfit":[{{"name":"item name from wardrobe","category":"category","reason":"why this item was chosen"}}],"overall_reasoning":"Why this outfit works well together","style_score":9,"weather_score":8,"confidence":0.9}}

Choose items that are appropriate for the weather, match the vibe and occasion, work together in style and color, and form a complete, practical outfit."#,
        weather = weather.describe(),
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRequest {
    weather: Option<String>,
    vibe: Option<String>,
    occasion: Option<String>,
}

impl RawRequest {
    fn into_request(self) -> OutfitRequest {
        let defaults = OutfitRequest::default();
        let pick = |value: Option<String>, fallback: String| {
            value
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        OutfitRequest {
            weather: self
                .weather
                .as_deref()
                .map_or(defaults.weather, |w| WeatherBand::parse(w.trim()).band()),
            vibe: pick(self.vibe, defaults.vibe),
            occasion: pick(self.occasion, defaults.occasion),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AdvisorConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::upstream(format!("Failed to build advisor client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, image: Option<InlineImage>) -> Result<String> {
        let mut parts = Vec::new();
        if let Some(image) = image {
            parts.push(json!({
                "inlineData": { "mimeType": image.mime_type, "data": image.data }
            }));
        }
        parts.push(json!({ "text": format!("{} {}", PERSONA, prompt) }));

        let payload = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "temperature": 0.2,
                "topK": 1,
                "topP": 1,
                "maxOutputTokens": 1000,
                "stopSequences": []
            },
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
                { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
            ]
        });

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::upstream(format!("Advisor request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!("Advisor returned {}", status)));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::upstream(format!("Unexpected advisor payload: {}", e.without_url())))?;

        body.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .ok_or_else(|| {
                warn!(model = %self.model, "Advisor reply had no text part");
                Error::upstream("advisor reply had no text")
            })
    }
}

#[async_trait]
impl StyleAdvisor for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze_garment(&self, filename: &str, image_data: Option<&str>) -> Result<RawAnalysis> {
        let image = image_data.filter(|d| !d.is_empty()).map(parse_image_data);
        debug!(filename, with_image = image.is_some(), "Asking advisor to tag garment");

        let reply = self.generate(&analysis_prompt(filename), image).await?;
        parse_reply(&reply)
    }

    async fn interpret_request(&self, text: &str) -> Result<OutfitRequest> {
        let reply = self.generate(&request_prompt(text), None).await?;
        let raw: RawRequest = parse_reply(&reply)?;
        Ok(raw.into_request())
    }

    async fn recommend(
        &self,
        wardrobe: &[GarmentRecord],
        weather: &WeatherContext,
        vibe: &str,
        occasion: &str,
    ) -> Result<Recommendation> {
        if wardrobe.is_empty() {
            return Err(Error::upstream("no wardrobe items to recommend from"));
        }

        let reply = self
            .generate(&recommendation_prompt(wardrobe, weather, vibe, occasion), None)
            .await?;
        let recommendation: Recommendation = parse_reply(&reply)?;

        if recommendation.outfit.is_empty() {
            return Err(Error::upstream("advisor recommended an empty outfit"));
        }
        Ok(recommendation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcheck_core::{GarmentType, Style};

    #[test]
    fn test_parse_data_url() {
        let image = parse_image_data("data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_plain_base64_is_jpeg() {
        let image = parse_image_data("/9j/4AAQSkZJRg==");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "/9j/4AAQSkZJRg==");

        let image = parse_image_data("data:;base64,AAAA");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "AAAA");
    }

    #[test]
    fn test_extract_json() {
        let reply = "Sure! ```json\n{\"name\": \"Tee\", \"meta\": {\"a\": 1}}\n``` Hope that helps";
        assert_eq!(extract_json(reply), Some("{\"name\": \"Tee\", \"meta\": {\"a\": 1}}"));
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_parse_reply_into_raw_analysis() {
        let reply = r#"Here you go: {"name":"Navy Tee","category":"shirt","color":"navy","confidence":0.95}"#;
        let raw: RawAnalysis = parse_reply(reply).unwrap();

        assert_eq!(raw.name.as_deref(), Some("Navy Tee"));
        assert_eq!(raw.category.as_deref(), Some("shirt"));
        assert!(raw.style.is_none());
    }

    #[test]
    fn test_malformed_reply_is_an_error() {
        assert!(parse_reply::<RawAnalysis>("sorry, I can't help").is_err());
        assert!(matches!(
            parse_reply::<RawAnalysis>("{not json}"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_raw_request_defaults() {
        let raw: RawRequest = serde_json::from_str(r#"{"weather":"Freezing","vibe":" Business "}"#).unwrap();
        let request = raw.into_request();

        assert_eq!(request.weather, WeatherBand::Mild);
        assert_eq!(request.vibe, "business");
        assert_eq!(request.occasion, "general");

        let raw: RawRequest = serde_json::from_str(r#"{"weather":"COLD","occasion":"work"}"#).unwrap();
        let request = raw.into_request();
        assert_eq!(request.weather, WeatherBand::Cold);
        assert_eq!(request.vibe, "casual");
        assert_eq!(request.occasion, "work");
    }

    #[test]
    fn test_recommendation_prompt_lists_wardrobe() {
        let wardrobe = vec![GarmentRecord::new(
            "Gray Hoodie",
            GarmentType::Hoodie,
            Style::Casual,
            [WeatherBand::Cool],
            "gray",
        )];
        let weather = WeatherContext {
            band: WeatherBand::Cool,
            temperature: Some(12.0),
            condition: Some("clouds".to_string()),
        };

        let prompt = recommendation_prompt(&wardrobe, &weather, "trendy", "date");
        assert!(prompt.contains("- Gray Hoodie (hoodie, gray color, casual style)"));
        assert!(prompt.contains("Temperature: 12°C, Condition: clouds"));
        assert!(prompt.contains("VIBE: trendy"));
        assert!(prompt.contains("OCCASION: date"));
    }

    #[test]
    fn test_recommendation_from_outfit_result() {
        let result = OutfitResult {
            items: vec![GarmentRecord::new(
                "Basic White Tee",
                GarmentType::TShirt,
                Style::Casual,
                [WeatherBand::Hot],
                "white",
            )],
            reasoning: "Basic White Tee is perfect for hot weather.".to_string(),
            confidence: 1.0,
            weather: WeatherBand::Hot,
            vibe: "casual".to_string(),
            occasion: "general".to_string(),
        };

        let recommendation = Recommendation::from(&result);
        assert_eq!(recommendation.outfit.len(), 1);
        assert_eq!(recommendation.outfit[0].category, "t-shirt");
        assert_eq!(recommendation.confidence, 1.0);
        assert!(recommendation.style_score.is_none());
    }
}
