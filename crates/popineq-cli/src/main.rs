mod command;
mod logger;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
