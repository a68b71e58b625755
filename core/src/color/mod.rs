pub mod alias;
pub mod scheme;

pub use alias::resolve_alias;
pub use scheme::ColorScheme;
