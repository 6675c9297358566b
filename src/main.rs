//! Binary entrypoint that launches the nutriplan server bootstrap.

use std::process::ExitCode;

use nutriplan_server::start_nutriplan;

fn main() -> ExitCode {
    start_nutriplan::run()
}
