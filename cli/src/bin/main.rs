use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_markdown::MarkdownOptions;
use dotenv::dotenv;
use log::info;

use tipjar_cli::{args::Args, handler::CliHandler, log::init_logger};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let mut args: Args = Args::parse();
    init_logger(args.verbose);

    if args.markdown_help {
        let markdown = clap_markdown::help_markdown_custom::<Args>(
            &MarkdownOptions::new().show_table_of_contents(false),
        );
        println!("{}", markdown);
        return Ok(());
    }

    if args.verbose {
        info!("{}\n", args);
    }

    let Some(command) = args.command.take() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let handler = CliHandler::from_args(&args)?;
    handler.handle(command).await?;

    Ok(())
}
