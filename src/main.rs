fn main() {
    if let Err(err) = band_label::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
