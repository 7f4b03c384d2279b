pub mod metrics;
pub mod providers;
pub mod text_generator;

pub use text_generator::TextGenerator;
