fn main() {
    if let Err(e) = cairn_cli::run() {
        cairn_cli::status::err(&format!("ERR {e:#}"));
        std::process::exit(1);
    }
}
