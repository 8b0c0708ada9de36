use livelibs_registry::{LibraryName, MAX_NAME_BYTES};

use crate::cli::args::CheckNameArgs;
use crate::exit_codes;

pub fn run(args: CheckNameArgs) -> i32 {
    match LibraryName::parse(&args.name) {
        Ok(name) => {
            println!(
                "ok: {:?} ({} of {} bytes)",
                name.as_str(),
                name.len_bytes(),
                MAX_NAME_BYTES
            );
            exit_codes::SUCCESS
        }
        Err(e) => {
            eprintln!("rejected: {}", e);
            e.exit_code()
        }
    }
}
