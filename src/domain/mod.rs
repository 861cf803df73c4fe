pub mod knowledge;
pub mod linkedin;
pub mod page_text;
pub mod prompt;
pub mod row;
pub mod website;

pub use knowledge::*;
pub use linkedin::*;
pub use page_text::*;
pub use prompt::*;
pub use row::*;
pub use website::*;
