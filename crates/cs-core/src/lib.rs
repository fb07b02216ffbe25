pub mod error;
pub mod types;
pub mod value;

pub use error::CutStackError;
pub use types::*;
pub use value::*;
