pub mod io;

pub use io::{load_cfg, load_cfg_from, save_cfg, save_cfg_to, settings_path};
