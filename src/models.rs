use serde::{Deserialize, Serialize};

// Summarize API request format
#[derive(Deserialize, Serialize, Clone)]
pub struct SummarizeRequest {
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

// Summarize API response format
#[derive(Deserialize, Serialize, Clone)]
pub struct SummarizeResponse {
    pub summary: String,
}

// Hosted inference API request format
#[derive(Serialize)]
pub struct UpstreamRequest<'a> {
    pub inputs: &'a str,
    pub parameters: UpstreamParameters,
}

#[derive(Serialize)]
pub struct UpstreamParameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for UpstreamParameters {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 40,
            do_sample: false,
        }
    }
}

// Hosted inference API response format - one candidate per element
#[derive(Deserialize, Serialize, Clone)]
pub struct UpstreamSummary {
    pub summary_text: String,
}
