pub mod encoding;
pub mod layout;

pub use encoding::{Encoding, Gene};
pub use layout::{Layout, Placement};
