mod messages;
pub mod state;
pub mod string;

pub use state::{Detail, ErrorState};
pub use string::{StringRules, StringValidator, string};
