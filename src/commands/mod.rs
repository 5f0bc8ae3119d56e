mod parse;
mod route;

pub use parse::*;
pub use route::*;
