use clap::Parser;
use emptax::cmd::assess::AssessCommand;

#[derive(Parser, Debug)]
#[command(name = "emptax", version, about = "Employee Income Tax Calculator")]
struct Opts {
    #[command(flatten)]
    assess: AssessCommand,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    opts.assess.exec()
}
