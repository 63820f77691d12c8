pub mod uri;

pub use uri::last_path_segment;
