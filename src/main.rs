use convert_footage::args::{parse_args, Invocation, EXAMPLES, USAGE};
use convert_footage::classify;
use convert_footage::processor::Processor;
use convert_footage::report;
use convert_footage::transcoder::Ffmpeg;

fn main() {
    if let Err(e) = run() {
        report::error(format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = match parse_args(std::env::args_os()) {
        Ok(Invocation::Help) => {
            report::plain(USAGE);
            return Ok(());
        }
        Ok(Invocation::Examples) => {
            report::plain(EXAMPLES);
            return Ok(());
        }
        Ok(Invocation::Convert(config)) => config,
        Err(e) => {
            report::error(&e);
            report::plain(USAGE);
            std::process::exit(1);
        }
    };

    let mut processor = Processor::new(classify::from_kind(config.classifier), Ffmpeg::default());
    processor.run(&config)?;

    Ok(())
}
