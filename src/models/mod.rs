mod admin;
mod language;
mod message;
mod product;
mod upload;

pub use admin::*;
pub use language::*;
pub use message::*;
pub use product::*;
pub use upload::*;
