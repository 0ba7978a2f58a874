pub mod openai;
pub mod traits;
