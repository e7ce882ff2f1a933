use std::path::Path;
use std::process;

use apriori::io::{parse_min_support, read_transactions, TsvRuleWriter};
use apriori::logging::init_tracing;
use apriori::{Apriori, ItemSetMiner, MinerConfig, Result};

const USAGE: &str = "Usage : apriori [min_support] [input_file] [output_file]";

fn run(min_support: &str, input: &Path, output: &Path) -> Result<()> {
    let min_support = parse_min_support(min_support)?;
    let config = MinerConfig::from_env()?;

    let store = read_transactions(input)?;
    tracing::debug!("{:?}", store);

    let mut writer = TsvRuleWriter::create(output)?;
    Apriori::with_config(min_support, config).mine(&store, &mut writer)?;
    writer.finish()?;
    Ok(())
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("{}", USAGE);
        process::exit(2);
    }

    if let Err(err) = run(&args[1], Path::new(&args[2]), Path::new(&args[3])) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
