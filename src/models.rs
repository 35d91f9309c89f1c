use serde::{Deserialize, Serialize};
use serde_json::Value;

// Inbound request body
#[derive(Clone, Debug, Default)]
pub struct DiagnoseRequest {
    pub prompt: String,
    pub base64_image_data: Option<String>,
    pub image_type: Option<String>,
}

impl DiagnoseRequest {
    // None when the body is not an object or has no non-empty string prompt,
    // image fields of any other type count as absent
    pub fn from_json(value: &Value) -> Option<Self> {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        let prompt = field("prompt").filter(|p| !p.is_empty())?;
        Some(Self {
            prompt,
            base64_image_data: field("base64ImageData"),
            image_type: field("imageType"),
        })
    }

    // image part is only sent when both halves are there
    pub fn image(&self) -> Option<(&str, &str)> {
        match (self.base64_image_data.as_deref(), self.image_type.as_deref()) {
            (Some(data), Some(mime)) if !data.is_empty() && !mime.is_empty() => Some((data, mime)),
            _ => None,
        }
    }
}

// Gemini generateContent request format
#[derive(Serialize, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Debug)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl GenerateContentRequest {
    // single user turn: the prompt, then the image if any (passed through as-is)
    pub fn from_prompt(prompt: &str, image: Option<(&str, &str)>) -> Self {
        let mut parts = vec![Part::Text {
            text: prompt.to_string(),
        }];

        if let Some((data, mime_type)) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.to_string(),
                    data: data.to_string(),
                },
            });
        }

        Self {
            contents: vec![Content { role: "user", parts }],
        }
    }
}

// Gemini generateContent response, kept as raw JSON since any level may be
// missing or of an unexpected type
#[derive(Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct GenerateContentResponse(pub Value);

impl GenerateContentResponse {
    // candidates[0].content.parts[0].text, "" when anything on the way is absent
    pub fn first_text(&self) -> &str {
        self.0
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

pub const DEFAULT_CONFIDENCE: &str = "N/A";
pub const DEFAULT_NEXT_STEPS: &str = "No next steps provided.";
pub const DEFAULT_PREVENTION: &str = "No prevention tips provided.";
pub const DEFAULT_DISCLAIMER: &str =
    "This is an AI-generated assessment. Consult a qualified professional before acting on it.";

// Structured response sent back to the caller
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseResponse {
    pub likely_issues: Vec<String>,
    pub confidence: String,
    pub next_steps: String,
    pub prevention: String,
    pub disclaimer: String,
}

impl Default for DiagnoseResponse {
    fn default() -> Self {
        Self {
            likely_issues: Vec::new(),
            confidence: DEFAULT_CONFIDENCE.to_string(),
            next_steps: DEFAULT_NEXT_STEPS.to_string(),
            prevention: DEFAULT_PREVENTION.to_string(),
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_without_image_has_single_text_part() {
        let req = GenerateContentRequest::from_prompt("why is it dripping", None);

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"contents": [{"role": "user", "parts": [{"text": "why is it dripping"}]}]})
        );
    }

    #[test]
    fn request_with_image_appends_inline_data_verbatim() {
        let req = GenerateContentRequest::from_prompt("look", Some(("aGVsbG8=", "image/png")));

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"contents": [{"role": "user", "parts": [
                {"text": "look"},
                {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
            ]}]})
        );
    }

    #[test]
    fn image_needs_both_data_and_mime_type() {
        let only_data =
            DiagnoseRequest::from_json(&json!({"prompt": "p", "base64ImageData": "abc"})).unwrap();
        let both = DiagnoseRequest::from_json(
            &json!({"prompt": "p", "base64ImageData": "abc", "imageType": "image/jpeg"}),
        )
        .unwrap();

        assert_eq!(only_data.image(), None);
        assert_eq!(both.image(), Some(("abc", "image/jpeg")));
    }

    #[test]
    fn request_needs_non_empty_string_prompt_in_an_object() {
        for body in [
            json!({}),
            json!({"prompt": ""}),
            json!({"prompt": 7}),
            json!({"prompt": null}),
            json!(["tap drips"]),
            json!("tap drips"),
        ] {
            assert!(DiagnoseRequest::from_json(&body).is_none(), "body {body}");
        }
    }

    #[test]
    fn non_string_image_fields_are_ignored() {
        let req = DiagnoseRequest::from_json(
            &json!({"prompt": "tap drips", "imageType": 5, "base64ImageData": {"x": 1}}),
        )
        .unwrap();

        assert_eq!(req.prompt, "tap drips");
        assert_eq!(req.image(), None);
    }

    #[test]
    fn first_text_defaults_to_empty_on_missing_levels() {
        let cases = [
            json!({}),
            json!({"candidates": []}),
            json!({"candidates": [{}]}),
            json!({"candidates": [{"content": {}}]}),
            json!({"candidates": [{"content": {"parts": []}}]}),
            json!({"candidates": [{"content": {"parts": [{"inlineData": {}}]}}]}),
            json!({"candidates": null}),
            json!({"candidates": [null]}),
            json!({"candidates": [{"content": null}]}),
            json!({"candidates": [{"content": {"parts": [null]}}]}),
            json!({"candidates": [{"content": {"parts": [{"text": 5}]}}]}),
            json!({"candidates": {"content": "x"}}),
            json!([1, 2, 3]),
        ];

        for case in cases {
            let resp: GenerateContentResponse = serde_json::from_value(case.clone()).unwrap();
            assert_eq!(resp.first_text(), "", "case {case}");
        }
    }

    #[test]
    fn first_text_picks_first_part_of_first_candidate() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "one"}, {"text": "two"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        }))
        .unwrap();

        assert_eq!(resp.first_text(), "one");
    }

    #[test]
    fn response_serializes_camel_case() {
        let value = serde_json::to_value(DiagnoseResponse::default()).unwrap();

        assert_eq!(value["likelyIssues"], json!([]));
        assert_eq!(value["nextSteps"], DEFAULT_NEXT_STEPS);
        assert_eq!(value["confidence"], "N/A");
    }
}
