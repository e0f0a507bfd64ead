mod class;
mod error;
mod mask;
mod options;
mod polygon;
mod state;
mod surface;
mod tool;

pub use class::*;
pub use error::*;
pub use mask::*;
pub use options::*;
pub use polygon::*;
pub use state::*;
pub use surface::*;
pub use tool::*;
