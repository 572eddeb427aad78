// Resume analysis: PDF text extraction, prompt construction, the model call,
// and permissive decoding of its reply.
// All model calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod requester;
pub mod service;
