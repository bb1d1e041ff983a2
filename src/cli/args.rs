use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "blogpager",
    version,
    about = "paginate a CSV of blog posts into a listing",
    long_about = "Blogpager reads a CSV of blog posts (serial, title, date, author, description, reading_time), drops untitled rows, puts the newest post first and renders one page of the listing with windowed, ellipsis-collapsed page controls.\n\nExamples:\n  blogpager -i posts.csv\n  blogpager -i posts.csv -p 4 -A json\n  blogpager -i https://example.com/posts.csv -d ./site\n  blogpager --init-config\n\nTip: Use --config to persist listing settings and keep CLI invocations short."
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
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'i',
        long = "in",
        visible_alias = "input",
        value_name = "FILE|URL",
        help_heading = "Input",
        help = "Posts CSV to read, a local path or an http(s) URL (defaults to posts.csv)."
    )]
    pub input: Option<String>,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.blogpager/config.yml when it exists)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write the default config file (or --config path) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 's',
        long = "ps",
        visible_alias = "page-size",
        value_name = "N",
        help_heading = "Pagination",
        help = "Posts per page (default 3)."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'r',
        long = "rg",
        visible_alias = "range",
        value_name = "N",
        help_heading = "Pagination",
        help = "Page buttons shown either side of the current page (default 2)."
    )]
    pub range: Option<usize>,

    #[arg(
        short = 'p',
        long = "pg",
        visible_alias = "page",
        value_name = "N",
        help_heading = "Pagination",
        help = "Page to render (1-based). Pages outside the listing are ignored."
    )]
    pub page: Option<usize>,

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
        help = "Output format (text, json, html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'd',
        long = "od",
        visible_alias = "output-dir",
        value_name = "DIR",
        help_heading = "Output",
        help = "Write every page as page-N.html (plus index.html) into DIR."
    )]
    pub output_dir: Option<String>,

    #[arg(
        short = 'T',
        long = "tt",
        visible_alias = "title",
        value_name = "TEXT",
        help_heading = "Output",
        help = "Title used for HTML pages (default Blog)."
    )]
    pub title: Option<String>,

    #[arg(
        short = 't',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECS",
        help_heading = "HTTP",
        help = "Request timeout in seconds when the input is a URL."
    )]
    pub timeout: Option<u64>,
}
