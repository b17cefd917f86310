//! Print the OpenAPI document as JSON.

use std::process::ExitCode;

use user_directory::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("failed to serialise OpenAPI document: {e}");
            ExitCode::FAILURE
        }
    }
}
