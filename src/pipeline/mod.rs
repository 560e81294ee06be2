pub mod advisor;
pub mod openai;
