fn main() {
    if let Err(err) = candidate_ranker::run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
