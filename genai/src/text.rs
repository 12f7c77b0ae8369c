//! Text generation service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    http::HttpClient,
    types::{Candidate, Content},
};

/// Text generation service.
pub struct TextService {
    http: Arc<HttpClient>,
}

impl TextService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Generates a single (non-streamed) completion.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use dialocast_genai::{Client, Content, GenerateRequest, MODEL_TEXT};
    ///
    /// # async fn run() -> dialocast_genai::Result<()> {
    /// let client = Client::new("your-api-key")?;
    /// let response = client.text().generate(&GenerateRequest {
    ///     model: MODEL_TEXT.to_string(),
    ///     contents: vec![Content::user("Say hello.")],
    /// }).await?;
    /// println!("{}", response.first_text().unwrap_or_default());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let path = format!("/v1beta/models/{}:generateContent", request.model);
        self.http.request(&path, &request.body()).await
    }
}

/// Request for text generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Model name.
    pub model: String,

    /// Prompt contents.
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    fn body(&self) -> GenerateBody<'_> {
        GenerateBody {
            contents: &self.contents,
        }
    }
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    contents: &'a [Content],
}

/// Response from text generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    /// Response candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// Returns the first candidate's first text part, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.text.as_deref())
    }
}
