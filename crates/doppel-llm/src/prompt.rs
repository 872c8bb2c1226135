//! Prompt templates for attribute extraction.

use doppel_core::types::AttributeSet;

/// Something that renders into an LLM prompt.
pub trait PromptTemplate {
    /// Render the user prompt.
    fn generate(&self) -> String;

    /// Optional system message, none unless overridden.
    fn system_prompt(&self) -> Option<String> {
        None
    }
}

/// Prompt for product attribute extraction.
///
/// Asks for a bare JSON object with the seven attribute keys, each a
/// string or null. The parser tolerates markdown fences and surrounding
/// prose anyway, since models do not always comply.
#[derive(Debug, Clone)]
pub struct AttributePrompt {
    /// The product text to extract attributes from.
    pub text: String,
}

impl AttributePrompt {
    /// Create a new attribute extraction prompt.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl PromptTemplate for AttributePrompt {
    fn generate(&self) -> String {
        format!(
            r#"Extract the following attributes from the product description: brand, item type, size, quantity, packaging, target users (school, grade), purpose.
Return only a valid JSON object with these keys. If an attribute is not mentioned, use null or empty string.

Product: {}

JSON format:
{{
    "brand": "string or null",
    "item_type": "string or null",
    "size": "string or null",
    "quantity": "string or null",
    "packaging": "string or null",
    "target_users": "string or null",
    "purpose": "string or null"
}}"#,
            self.text
        )
    }
}

/// Parse an attribute set from an LLM response.
///
/// Handles markdown code blocks and prose around the JSON object. Keys
/// that are missing, null, or not strings come back as `None`; string
/// values are kept verbatim, empty strings included, so the comparator
/// can apply its own presence rules.
pub fn parse_attributes_json(response: &str) -> Result<AttributeSet, serde_json::Error> {
    let json_str = extract_json_object(response);
    let value: serde_json::Value = serde_json::from_str(json_str)?;

    let field = |key: &str| match value.get(key) {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        _ => None,
    };

    Ok(AttributeSet {
        brand: field("brand"),
        item_type: field("item_type"),
        size: field("size"),
        quantity: field("quantity"),
        packaging: field("packaging"),
        target_users: field("target_users"),
        purpose: field("purpose"),
    })
}

/// Cut a response down to its outermost JSON object, fences and prose removed.
fn extract_json_object(text: &str) -> &str {
    // Peel any markdown fence first
    let mut inner = text.trim();
    for marker in ["```json", "```"] {
        inner = inner.strip_prefix(marker).unwrap_or(inner);
    }
    inner = inner.strip_suffix("```").unwrap_or(inner).trim();

    // Then take the widest brace pair. A closing brace before the first
    // opening one is not a pair; hand the text to serde as-is and let it
    // fail there.
    match (inner.find('{'), inner.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &inner[start..=end],
        _ => inner,
    }
}
