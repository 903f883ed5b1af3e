pub mod daily_note;
pub mod files;
pub mod lexer;
pub mod mutate;
pub mod parser;
pub mod settings;
pub mod store;

pub use daily_note::DailyNotes;
pub use files::{
    atomic_write, ensure_config_dir, init_local_config, log_file, report_file, settings_file,
};
pub use mutate::LineMatch;
pub use parser::{build, scan_document, scan_store};
pub use settings::{load_settings, save_settings, Settings};
pub use store::{DocumentStore, StoreError, VaultStore};
