//! Library half of the `ox-menu` binary: argument model and the session that
//! drives a menu against any terminal backend.

pub mod cli;
pub mod session;

pub use cli::{Args, ItemSpec, parse_item, parse_keys};
pub use session::{Outcome, build_menu, run_session, theme_from_config};
