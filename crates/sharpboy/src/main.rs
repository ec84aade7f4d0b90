fn main() {
    env_logger::init();

    let options = match sharpboy::RunOptions::from_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = sharpboy::run(&options, &mut stdout) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
