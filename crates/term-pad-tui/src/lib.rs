//! Terminal front end: a crossterm-backed surface and syntax highlight modes.

pub mod highlight;
pub mod terminal;

pub use highlight::SyntaxMode;
pub use terminal::CrosstermSurface;
