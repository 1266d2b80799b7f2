//! Service implementations backed by hosted APIs and the local filesystem

pub mod ollama;
pub mod tavily;
pub mod vector_store;

pub use ollama::OllamaClient;
pub use tavily::TavilyClient;
pub use vector_store::{LocalVectorStore, DEFAULT_COLLECTION};
