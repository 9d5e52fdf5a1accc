pub mod adaptive;
pub mod chain;
pub mod error;
pub mod glitch;
pub mod smoothing;
pub mod translate;

pub use self::adaptive::{AdaptiveSmoothing, MAX_GAP};
pub use self::chain::FilterChain;
pub use self::error::ErrorFilter;
pub use self::glitch::GlitchFilter;
pub use self::smoothing::RadiusSmoothing;
pub use self::translate::TranslateFilter;
