//! Summary CLI command

use chrono::Local;
use clap::Args;

use super::{parse_day, print_json};
use crate::display::summary::format_summary;
use crate::error::SpendbookResult;
use crate::services::SummaryService;
use crate::storage::Storage;

/// Summary arguments
#[derive(Args)]
pub struct SummaryArgs {
    /// Day to summarize (YYYY-MM-DD), defaults to today
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub date: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long, requires = "to")]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD)
    #[arg(long, requires = "from")]
    pub to: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Handle the summary command
pub fn handle_summary_command(storage: &Storage, args: SummaryArgs) -> SpendbookResult<()> {
    let service = SummaryService::new(storage);

    let summary = match (&args.from, &args.to) {
        (Some(from), Some(to)) => service.range(parse_day(from)?, parse_day(to)?)?,
        _ => {
            let day = match &args.date {
                Some(d) => parse_day(d)?,
                None => Local::now().date_naive(),
            };
            service.day(day)?
        }
    };

    if args.json {
        print_json(&summary)?;
    } else {
        let symbol = storage.settings.currency_symbol()?;
        print!("{}", format_summary(&summary, &symbol));
    }

    Ok(())
}
