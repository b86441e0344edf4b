//! Prompt templates for the Gemini assistant.

use crate::domain::Boq;

/// System instruction shared by every call.
pub const SYSTEM_INSTRUCTION: &str = "You are an expert quantity surveyor and procurement \
specialist. You prepare accurate, itemised Bills of Quantities for building and fit-out \
projects and you know current products, units of measure and typical market prices. \
Always answer with a single JSON document and nothing else.";

const BOQ_SHAPE: &str = r#"{
  "projectTitle": string,
  "currency": string,
  "items": [
    {
      "category": string,
      "description": string,
      "brand": string,
      "model": string,
      "quantity": number,
      "unit": string,
      "unitPrice": number,
      "totalPrice": number,
      "remarks": string
    }
  ],
  "notes": [string]
}"#;

const PRODUCT_SHAPE: &str = r#"{
  "name": string,
  "brand": string,
  "model": string,
  "category": string,
  "description": string,
  "unit": string,
  "estimatedPrice": number,
  "currency": string,
  "specifications": { string: string },
  "sourceUrls": [string]
}"#;

/// Prompt for a product lookup. Sent with web search grounding enabled.
pub fn product_details(product_name: &str) -> String {
    format!(
        "Search the web for the product \"{product_name}\" and summarise what you find.\n\
         Respond with JSON of exactly this shape:\n{PRODUCT_SHAPE}\n\
         Use an empty string or empty list for anything you cannot find. \
         Do not wrap the JSON in markdown."
    )
}

/// Prompt for generating a new BOQ from requirements.
pub fn generate_boq(requirements: &str) -> String {
    format!(
        "Prepare a Bill of Quantities for the following project requirements.\n\
         Requirements:\n{requirements}\n\n\
         Group items by category, use realistic quantities and units, and include every \
         item needed for a complete installation.\n\
         Respond with JSON of exactly this shape:\n{BOQ_SHAPE}"
    )
}

/// Prompt for revising an existing BOQ.
pub fn refine_boq(current_boq: &Boq, refinement_prompt: &str) -> String {
    let current = serde_json::to_string_pretty(current_boq.as_json())
        .unwrap_or_else(|_| current_boq.as_json().to_string());

    format!(
        "Here is the current Bill of Quantities:\n{current}\n\n\
         Revise it according to this instruction:\n{refinement_prompt}\n\n\
         Keep every item the instruction does not affect unchanged and recompute totals.\n\
         Respond with the complete revised BOQ as JSON of exactly this shape:\n{BOQ_SHAPE}"
    )
}
