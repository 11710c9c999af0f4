use clap::Parser;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = outrank::Args::parse();

	outrank::run(args)
}
