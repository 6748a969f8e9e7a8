//! Resume analysis: prompt building, the feedback seam, and the request pipeline.
//! All model calls go through llm_client via the FeedbackProvider trait.

pub mod feedback;
pub mod handlers;
pub mod prompts;
pub mod request;
pub mod service;
