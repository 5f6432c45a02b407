mod history;
mod persona;
mod role;
mod segment;
mod transcript;
mod turn;

pub use history::*;
pub use persona::*;
pub use role::*;
pub use segment::*;
pub use transcript::*;
pub use turn::*;
