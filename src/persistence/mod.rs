pub mod files;
pub mod snapshot;

pub use files::{atomic_write, get_data_dir, init_local_dir, log_file};
pub use snapshot::{export_filename, export_json, import_str, SnapshotError, Store};
