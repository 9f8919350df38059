mod node;
mod syntax;

pub use node::*;
pub use syntax::*;
