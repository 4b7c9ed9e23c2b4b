use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "toolbelt")]
#[command(about = "Color, date, text, unit and protocol helpers", long_about = None)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Color conversions
    #[command(subcommand)]
    Color(ColorCommand),
    /// Date and timestamp formatting
    #[command(subcommand)]
    Date(DateCommand),
    /// Convert an SI value to its imperial/derived unit
    Units(UnitsArgs),
    /// String utilities
    #[command(subcommand)]
    Text(TextCommand),
    /// Classify an HTTP status code
    Http {
        status: u16,
    },
    /// Check whether a URI starts with a known scheme
    Uri {
        uri: String,
    },
    /// WebSocket round trip: send one text frame and print the first reply
    Ws(WsArgs),
}

#[derive(Debug, Subcommand)]
pub enum ColorCommand {
    /// `R G B` to `#rrggbb`
    Hex { r: u32, g: u32, b: u32 },
    /// `#rrggbb` to its RGB channels
    Rgb { hex: String },
    /// Readable text color for a background
    Contrast { hex: String },
    /// Red to yellow to green gradient color for a fraction in [0, 1]
    Gradient {
        #[arg(allow_negative_numbers = true)]
        pct: f64,
    },
    /// Two-digit hex alpha for an opacity in [0, 1]
    Opacity {
        #[arg(allow_negative_numbers = true)]
        opacity: f64,
    },
}

#[derive(Debug, Subcommand)]
pub enum DateCommand {
    /// Format a Unix timestamp in seconds
    Unix {
        #[arg(allow_negative_numbers = true)]
        timestamp: i64,
        /// Override the configured pattern
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// Format an ISO-8601 date or epoch milliseconds
    Format {
        value: String,
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// Current time
    Now {
        #[arg(short, long)]
        pattern: Option<String>,
    },
    /// Whether a Unix timestamp lies in the past
    Expired {
        #[arg(allow_negative_numbers = true)]
        timestamp: i64,
    },
}

#[derive(Debug, Args)]
pub struct UnitsArgs {
    /// Target unit
    #[arg(value_enum)]
    pub kind: UnitKind,
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitKind {
    /// m³/s to gallons per minute
    Gpm,
    /// Pa to feet of head
    Ft,
    /// W to horsepower
    Hp,
    /// m to inches
    Inches,
    /// Hz to RPM
    Rpm,
}

#[derive(Debug, Subcommand)]
pub enum TextCommand {
    /// Strip combining diacritical marks
    Strip { text: String },
    /// Uppercase the first character
    Capitalize { text: String },
    /// Count whitespace-separated words
    Words { text: String },
    /// Shorten to at most `max` characters, ending with an ellipsis
    Truncate {
        text: String,
        #[arg(short, long)]
        max: usize,
    },
    /// Whether the text is only letters, digits, underscores and whitespace
    Alnum { text: String },
}

#[derive(Debug, Args)]
pub struct WsArgs {
    /// `ws://` or `wss://` endpoint
    pub url: String,
    /// Text frame to send
    pub message: String,
    /// Seconds to wait for a reply
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}
