fn main() {
    if let Err(err) = lamstep::run() {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
