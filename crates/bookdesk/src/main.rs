use crate::prelude::*;
use clap::Parser;

mod error;
mod list;
mod pages;
mod prelude;
mod source;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search, sort and page bookstore admin records from the command line"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "BOOKDESK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List admins, articles, categories, books or book images
    List(crate::list::ListOptions),

    /// Compute the pagination bar for a page
    Pages(crate::pages::PagesOptions),
}

fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global),
        SubCommands::Pages(options) => crate::pages::run(options, app.global),
    }
}
