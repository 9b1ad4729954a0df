use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "countrycards",
    version,
    about = "country browser for the REST Countries API",
    long_about = "countrycards fetches country data from the REST Countries API and renders it as cards (listing view) or a detail page.\n\nExamples:\n  countrycards -o countries.html\n  countrycards --search ger -A text\n  countrycards --country deu -o detail.html\n  countrycards --detail 'detail.html?country=fra' --neighbours region\n  countrycards --time UTC+05:30\n\nTip: Use --config to persist settings and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (html, json, text)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 's',
        long = "q",
        visible_alias = "search",
        value_name = "QUERY",
        help_heading = "View",
        help = "Filter the listing by country name (case-insensitive substring)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'c',
        long = "cc",
        visible_alias = "country",
        value_name = "CODE",
        help_heading = "View",
        help = "Render the detail page for an alpha-2 or alpha-3 code."
    )]
    pub country: Option<String>,

    #[arg(
        short = 'd',
        long = "dt",
        visible_alias = "detail",
        value_name = "URL",
        help_heading = "View",
        help = "Render the detail page addressed by a page URL (e.g. detail.html?country=deu)."
    )]
    pub detail: Option<String>,

    #[arg(
        short = 't',
        long = "tz",
        visible_alias = "time",
        value_name = "LABEL",
        help_heading = "View",
        help = "Print the current date and time for a timezone label (e.g. UTC+05:30) and exit."
    )]
    pub time: Option<String>,

    #[arg(
        short = 'N',
        long = "nb",
        visible_alias = "neighbours",
        value_name = "SCOPE",
        help_heading = "View",
        help = "Neighbour grouping on the detail page (subregion or region)."
    )]
    pub neighbours: Option<String>,

    #[arg(
        short = 'L',
        long = "cl",
        visible_alias = "card-line",
        value_name = "LINE",
        help_heading = "View",
        help = "Line shown on each listing card (datetime or region)."
    )]
    pub card_line: Option<String>,

    #[arg(
        short = 'b',
        long = "bu",
        visible_alias = "base-url",
        value_name = "URL",
        help_heading = "HTTP",
        help = "REST Countries base URL."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'w',
        long = "wrk",
        visible_alias = "workers",
        value_name = "N",
        help_heading = "Performance",
        help = "Number of runtime worker threads."
    )]
    pub workers: Option<usize>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.countrycards/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write the default config file if it does not exist yet, then exit."
    )]
    pub init_config: bool,
}
