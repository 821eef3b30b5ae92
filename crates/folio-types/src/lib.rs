pub mod content;
pub mod dialog;
pub mod markup;

pub use content::*;
pub use dialog::*;
pub use markup::*;
