pub mod banner;
pub mod category;
pub mod product;

pub use banner::*;
pub use category::*;
pub use product::*;
