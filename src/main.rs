fn main() {
    if let Err(err) = domlens::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
