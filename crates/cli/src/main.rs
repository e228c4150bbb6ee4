fn main() {
    if let Err(err) = traitdex_cli::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
