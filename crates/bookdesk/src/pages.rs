use crate::prelude::*;
use bookdesk_core::pagination::{item_range, page_window, PaginationInfo, DEFAULT_MAX_BUTTONS};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, clap::Args, Clone)]
pub struct PagesOptions {
    /// Current page (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub current: usize,

    /// Total number of pages
    #[arg(short, long)]
    pub total: usize,

    /// Maximum number of page buttons
    #[arg(long, env = "BOOKDESK_MAX_BUTTONS", default_value_t = DEFAULT_MAX_BUTTONS)]
    pub max_buttons: usize,

    /// Items per page, for the "Showing X to Y" line
    #[arg(long, requires = "items")]
    pub per_page: Option<usize>,

    /// Total number of items, for the "Showing X to Y" line
    #[arg(long, requires = "per_page")]
    pub items: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct PagesOutput {
    pub current_page: usize,
    pub total_pages: usize,
    pub pages: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_item: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_item: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<usize>,
}

pub fn run(options: PagesOptions, global: crate::Global) -> Result<()> {
    write_pages(
        &options,
        global.verbose,
        &mut anstream::stdout(),
        &mut anstream::stderr(),
    )
}

/// Print the result to `out`; diagnostics go to `err` so `--json` stays
/// parseable.
fn write_pages(
    options: &PagesOptions,
    verbose: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    if verbose {
        writeln!(
            err,
            "Computing window for page {} of {} ({} buttons)",
            options.current, options.total, options.max_buttons
        )?;
    }

    let output = build_pages_output(options);

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write!(out, "{}", format_pages_text(&output))?;
    }

    Ok(())
}

pub fn build_pages_output(options: &PagesOptions) -> PagesOutput {
    let range = match (options.per_page, options.items) {
        (Some(per_page), Some(items)) => Some((item_range(options.current, per_page, items), items)),
        _ => None,
    };

    PagesOutput {
        current_page: options.current,
        total_pages: options.total,
        pages: page_window(options.current, options.total, options.max_buttons),
        start_item: range.map(|((start, _), _)| start),
        end_item: range.map(|((_, end), _)| end),
        total_items: range.map(|(_, items)| items),
    }
}

/// Page numbers as a button row, the current page in brackets.
pub fn format_page_buttons(pages: &[usize], current_page: usize) -> String {
    pages
        .iter()
        .map(|page| {
            if *page == current_page {
                f!("[{page}]").bright_cyan().bold().to_string()
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Previous/next controls around the button row.
pub fn format_pagination_bar(info: &PaginationInfo) -> String {
    let prev = if info.has_prev {
        "« Previous".bright_white().to_string()
    } else {
        "« Previous".bright_black().to_string()
    };
    let next = if info.has_next {
        "Next »".bright_white().to_string()
    } else {
        "Next »".bright_black().to_string()
    };

    f!(
        "{}  {}  {}",
        prev,
        format_page_buttons(&info.pages, info.current_page),
        next
    )
}

fn format_pages_text(output: &PagesOutput) -> String {
    let mut result = String::new();

    if output.pages.is_empty() {
        result.push_str(&f!("{}\n", "No pages.".yellow()));
        return result;
    }

    result.push_str(&f!(
        "{}: {}\n",
        "Pages".green(),
        format_page_buttons(&output.pages, output.current_page)
    ));

    if let (Some(start), Some(end), Some(items)) =
        (output.start_item, output.end_item, output.total_items)
    {
        result.push_str(&f!("Showing {start} to {end} of {items} entries\n"));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_options(current: usize, total: usize) -> PagesOptions {
        PagesOptions {
            current,
            total,
            max_buttons: 5,
            per_page: None,
            items: None,
            json: false,
        }
    }

    #[test]
    fn test_build_pages_output_middle() {
        let output = build_pages_output(&create_test_options(10, 20));

        assert_eq!(output.pages, vec![8, 9, 10, 11, 12]);
        assert!(output.start_item.is_none());
    }

    #[test]
    fn test_build_pages_output_with_range() {
        let mut options = create_test_options(3, 5);
        options.per_page = Some(10);
        options.items = Some(45);

        let output = build_pages_output(&options);

        assert_eq!(output.start_item, Some(21));
        assert_eq!(output.end_item, Some(30));
        assert_eq!(output.total_items, Some(45));
    }

    #[test]
    fn test_format_pages_text() {
        let mut options = create_test_options(1, 3);
        options.per_page = Some(10);
        options.items = Some(25);

        let text = format_pages_text(&build_pages_output(&options));

        assert!(text.contains("[1]"));
        assert!(text.contains("2 3"));
        assert!(text.contains("Showing 1 to 10 of 25 entries"));
    }

    #[test]
    fn test_format_pages_text_no_pages() {
        let text = format_pages_text(&build_pages_output(&create_test_options(1, 0)));

        assert!(text.contains("No pages."));
    }

    #[test]
    fn test_pages_json_skips_missing_range() {
        let output = build_pages_output(&create_test_options(1, 3));
        let json = serde_json::to_string(&output).unwrap();

        assert!(json.contains("\"pages\":[1,2,3]"));
        assert!(!json.contains("start_item"));
    }

    #[test]
    fn test_verbose_json_keeps_stdout_parseable() {
        let mut options = create_test_options(2, 3);
        options.json = true;
        let mut out = Vec::new();
        let mut err = Vec::new();

        write_pages(&options, true, &mut out, &mut err).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["pages"], serde_json::json!([1, 2, 3]));
        assert!(String::from_utf8(err)
            .unwrap()
            .contains("Computing window for page 2 of 3"));
    }

    #[test]
    fn test_quiet_run_writes_nothing_to_stderr() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        write_pages(&create_test_options(1, 3), false, &mut out, &mut err).unwrap();

        assert!(err.is_empty());
        assert!(String::from_utf8(out).unwrap().contains("[1]"));
    }

    #[test]
    fn test_format_pagination_bar() {
        let info = PaginationInfo::new(1, 10, 45, 5);
        let bar = format_pagination_bar(&info);

        assert!(bar.contains("Previous"));
        assert!(bar.contains("Next"));
        assert!(bar.contains("[1]"));
        assert!(bar.contains("2 3 4 5"));
    }
}
