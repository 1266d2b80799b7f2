//! Prompt templates for research, summarization and pitch generation

use crate::types::SearchHit;
use shared::Document;

/// Query sent to the research agent for a topic
pub fn research_query(topic: &str) -> String {
    format!("market research startup trends competitors {topic}")
}

/// Render search hits as numbered observations for the reasoning prompt
pub fn format_observations(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No search results were found.".to_string();
    }

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let title = if hit.title.trim().is_empty() { "Untitled" } else { hit.title.trim() };
            format!("[{}] {} ({})\n{}", i + 1, title, hit.url, hit.content.trim())
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Reasoning prompt that turns search observations into findings
pub fn research_prompt(query: &str, hits: &[SearchHit]) -> String {
    format!(
        "You are a market research analyst. Answer the research request using the \
         search observations below.\n\n\
         Research request: {query}\n\n\
         Observations:\n{observations}\n\n\
         Report the market size and growth, key competitors, current trends, target \
         customers and main risks. Cite observation numbers where relevant.\n\n\
         Findings:",
        observations = format_observations(hits),
    )
}

/// "Stuff" summarization prompt over every document at once
pub fn summary_prompt(documents: &[Document]) -> String {
    let text = documents
        .iter()
        .map(|doc| doc.page_content.trim())
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("Write a concise summary of the following:\n\n\"{text}\"\n\nCONCISE SUMMARY:")
}

/// Combined insight block handed to the pitch generator
pub fn pitch_insights(research_data: &str, summary: &str) -> String {
    format!("Research Data:\n{research_data}\n\nSummary:\n{summary}")
}

pub fn pitch_prompt(research_data: &str, summary: &str) -> String {
    format!(
        "Using the insights below, generate a pitch outline:\n\n{}\n\n",
        pitch_insights(research_data, summary)
    )
}
