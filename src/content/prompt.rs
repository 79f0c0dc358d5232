// Prompt construction for the external generation path.

use crate::config::ai::AiConfig;
use crate::content::backend::{ChatMessage, CompletionRequest};
use crate::content::AFFILIATE_MARKERS;
use crate::seo::SeoMetrics;

pub const SYSTEM_PROMPT: &str =
    "You are a skilled writer who makes complex topics feel like friendly conversations.";

/// How many related keywords the prompt mentions at most.
const PROMPT_RELATED_LIMIT: usize = 5;

pub fn build_prompt(keyword: &str, metrics: &SeoMetrics) -> String {
    let related: Vec<&str> = metrics
        .related_keywords
        .iter()
        .take(PROMPT_RELATED_LIMIT)
        .map(String::as_str)
        .collect();
    let related_line = if related.is_empty() {
        "none".to_string()
    } else {
        related.join(", ")
    };
    let sprinkle = related
        .first()
        .map(|r| format!("5. Work related phrases such as \"{r}\" in where they fit naturally\n"))
        .unwrap_or_default();
    let markers = AFFILIATE_MARKERS.join(", ");

    format!(
        "Write a helpful, conversational guide about \"{keyword}\" for readers who are just getting started.\n\
         \n\
         Keyword data:\n\
         - Monthly searches: {volume}\n\
         - Difficulty: {difficulty}/100\n\
         - Competition: {competition}\n\
         - Average CPC: ${cpc:.2}\n\
         - Related terms: {related_line}\n\
         \n\
         Structure:\n\
         1. A catchy title that contains \"{keyword}\"\n\
         2. An intro of 100-150 words that tells readers this guide is for them\n\
         3. 3-5 main sections of 200-300 words each, every one with a clear heading\n\
         4. Mention \"{keyword}\" naturally 3-5 times, no stuffing\n\
         {sprinkle}\
         6. Place up to three affiliate markers where a resource genuinely helps: {markers}\n\
         7. Close with an encouraging call to action\n\
         8. Format everything in Markdown\n\
         \n\
         Keep the tone warm and practical: solve real problems and make complex ideas simple.\n",
        volume = metrics.search_volume,
        difficulty = metrics.keyword_difficulty,
        competition = metrics.competition,
        cpc = metrics.avg_cpc,
    )
}

/// Full request body with the configured model and fixed sampling parameters.
pub fn build_request(cfg: &AiConfig, keyword: &str, metrics: &SeoMetrics) -> CompletionRequest {
    CompletionRequest {
        model: cfg.model.clone(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_prompt(keyword, metrics)),
        ],
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
        top_p: cfg.top_p,
    }
}
