pub mod meeting;
pub mod section;
pub mod term;

pub use meeting::*;
pub use section::*;
pub use term::*;
