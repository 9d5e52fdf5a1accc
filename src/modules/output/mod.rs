pub mod text;

pub use self::text::TextOutput;
