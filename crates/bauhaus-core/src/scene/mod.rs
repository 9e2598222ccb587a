mod cmd;
mod list;

pub use cmd::{DrawCmd, Ellipsize, TextAlign};
pub use list::DrawList;
