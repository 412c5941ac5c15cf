mod alarm;
mod reading;
mod view;

pub use alarm::*;
pub use reading::*;
pub use view::*;
