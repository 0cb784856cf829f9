pub mod case;
pub mod extract;
pub mod fallback;
pub mod select;
pub mod templates;
