pub mod mood_analysis;
pub mod mood_resolver;

pub use mood_analysis::MoodAnalyzer;
