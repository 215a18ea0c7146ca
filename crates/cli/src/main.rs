mod args;
mod cli;
mod context;
mod registry;

use registry::Registry;

fn main() {
    tracing_subscriber::fmt::init();

    let mut registry = Registry::new();
    cli::register_global_flags(&mut registry);
    cli::register_global_params(&mut registry);
    cli::check::register(&mut registry);
    cli::rules::register(&mut registry);

    cli::execute(&registry);
}
