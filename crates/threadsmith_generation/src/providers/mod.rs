pub mod anthropic;
pub mod mock;

pub use anthropic::AnthropicGenerator;
pub use mock::MockGenerator;
