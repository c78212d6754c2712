pub mod formats;
pub mod scanner;
pub mod schema;
pub mod types;

pub use formats::{
    Format,
    TextClientEntry,
    read_strings,
    resolve_text_client,
    text_client_entries,
};

pub use scanner::{
    ResourceScanner,
    collect_resource_files,
    fix_resource_file,
    parse_resource_file,
    verify_files,
    write_resource_file,
};

pub use schema::Schema;

pub use types::{
    FileOutcome,
    FileReport,
    ScanConfig,
    VerifyReport,
};
