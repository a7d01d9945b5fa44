use rust_dl::{cmdline, interpreter, Environment};

fn main() -> std::io::Result<()> {
    pretty_env_logger::init();
    let env = Environment::root();
    cmdline::run(|line: &str| interpreter::rep(line, &env))
}
