//! Gemini `generateContent` transport for planet facts.

use serde::{Deserialize, Serialize};

use crate::facts::FactError;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub fn prompt(planet_name: &str) -> String {
    format!(
        "Give me a short, fascinating scientific fact (under 60 words) about the planet {planet_name} \
         in Simplified Chinese. Focus on something unique like its weather, composition, or history. \
         Do not use markdown formatting like bolding."
    )
}

pub fn request_url(endpoint: &str, model: &str, api_key: &str) -> String {
    format!(
        "{}/models/{}:generateContent?key={}",
        endpoint.trim_end_matches('/'),
        model,
        api_key
    )
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}

pub fn request_body(prompt: &str) -> Result<String, FactError> {
    let req = GenerateRequest {
        contents: [Content {
            parts: [Part { text: prompt }],
        }],
    };
    Ok(serde_json::to_string(&req)?)
}

/// Extract the trimmed text of the first candidate.
pub fn parse_reply(json: &str) -> Result<String, FactError> {
    let resp: GenerateResponse = serde_json::from_str(json)?;
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        Err(FactError::EmptyReply)
    } else {
        Ok(text.to_owned())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::GeminiSource;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    use super::{parse_reply, prompt, request_body, request_url};
    use crate::facts::{FactError, FactInbox, FactReply, FactSource, FactTicket};

    pub struct GeminiSource {
        endpoint: String,
        model: String,
        api_key: String,
    }

    impl GeminiSource {
        pub fn new(endpoint: String, model: String, api_key: String) -> Self {
            Self {
                endpoint,
                model,
                api_key,
            }
        }
    }

    impl FactSource for GeminiSource {
        fn request(&self, ticket: FactTicket, planet_name: &str, inbox: FactInbox) {
            let url = request_url(&self.endpoint, &self.model, &self.api_key);
            let body = request_body(&prompt(planet_name));
            wasm_bindgen_futures::spawn_local(async move {
                let result = match body {
                    Ok(body) => post_json(&url, &body).await.and_then(|text| parse_reply(&text)),
                    Err(e) => Err(e),
                };
                inbox.borrow_mut().push(FactReply { ticket, result });
            });
        }
    }

    fn js_err(e: JsValue) -> FactError {
        FactError::Transport(format!("{:?}", e))
    }

    async fn post_json(url: &str, body: &str) -> Result<String, FactError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));
        let headers = Headers::new().map_err(js_err)?;
        headers.set("Content-Type", "application/json").map_err(js_err)?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
        let window = web_sys::window().ok_or_else(|| FactError::Transport("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let resp: Response = resp_value.dyn_into().map_err(js_err)?;
        if !resp.ok() {
            return Err(FactError::Http {
                status: resp.status(),
            });
        }

        let text = JsFuture::from(resp.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        text.as_string()
            .ok_or_else(|| FactError::Transport("response body was not text".into()))
    }
}
