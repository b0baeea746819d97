use crate::tools::finance::debt::{Debt, Strategy};
use crate::tools::health::calorie::{ActivityLevel, BmrFormula};
use crate::tools::health::Sex;
use crate::tools::text::case::CaseStyle;
use crate::tools::text::fonts::FontStyle;
use crate::tools::text::hex::Encoding;
use crate::utils::error::{Result, ToolError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dapsi-tools")]
#[command(version, about = "Text, finance, health and PDF tools from the command line")]
pub struct CliConfig {
    /// Print results as a JSON envelope
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert text between letter cases
    Case {
        #[command(flatten)]
        input: TextInput,
        /// Target style; every style is shown when omitted
        #[arg(short, long, value_enum)]
        style: Option<CaseStyle>,
    },
    /// Count characters, words, sentences and more
    Count {
        #[command(flatten)]
        input: TextInput,
        /// Number of keywords to report
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Render text in Unicode font styles
    Font {
        #[command(flatten)]
        input: TextInput,
        #[arg(short, long, value_enum)]
        style: Option<FontStyle>,
    },
    /// Encode text as hex/binary/decimal/octal, or decode it back
    Hex {
        #[command(flatten)]
        input: TextInput,
        #[arg(short, long, value_enum, default_value_t = Encoding::Hex)]
        encoding: Encoding,
        #[arg(short, long)]
        decode: bool,
        #[arg(long, default_value = " ")]
        separator: String,
        #[arg(long)]
        uppercase: bool,
        /// Prefix each value with 0x / 0b / 0o
        #[arg(long)]
        prefix: bool,
    },
    /// Plan debt payoff with the avalanche or snowball method
    Debt {
        /// NAME:BALANCE:APR:MINIMUM, repeat for each debt
        #[arg(long = "debt", value_parser = parse_debt, required = true)]
        debts: Vec<Debt>,
        /// Extra amount paid every month
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
        #[arg(long, value_enum, default_value_t = Strategy::Avalanche)]
        strategy: Strategy,
        /// Show both strategies side by side
        #[arg(long)]
        compare: bool,
        /// Write the month-by-month schedule to a CSV file
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },
    /// Add or remove VAT/GST
    Vat {
        #[arg(required_unless_present = "list")]
        amount: Option<f64>,
        /// Tax rate in percent
        #[arg(long, conflicts_with = "country")]
        rate: Option<f64>,
        /// Preset code such as uk, de or in-18
        #[arg(long)]
        country: Option<String>,
        /// Treat the amount as tax-inclusive and extract the tax
        #[arg(long)]
        inclusive: bool,
        /// Split the tax into CGST and SGST halves
        #[arg(long)]
        gst_split: bool,
        /// List the preset rates and exit
        #[arg(long)]
        list: bool,
    },
    /// Daily calorie needs by goal
    Calorie {
        #[arg(long)]
        age: u32,
        #[arg(long, value_enum)]
        sex: Sex,
        #[command(flatten)]
        body: BodyArgs,
        #[arg(long, value_enum, default_value_t = ActivityLevel::Sedentary)]
        activity: ActivityLevel,
        #[arg(long, value_enum, default_value_t = BmrFormula::MifflinStJeor)]
        formula: BmrFormula,
    },
    /// Ideal body weight by four formulas
    IdealWeight {
        #[arg(long, value_enum)]
        sex: Sex,
        /// Height in cm, or inches with --unit imperial
        #[arg(long)]
        height: f64,
        /// Current weight in kg, or lb with --unit imperial
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long, value_enum, default_value_t = Unit::Metric)]
        unit: Unit,
    },
    /// Extract text from a PDF
    PdfText {
        file: PathBuf,
        /// Page selection such as 1-3,5
        #[arg(long)]
        pages: Option<String>,
        /// Write the text to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Split a PDF into several documents
    PdfSplit {
        file: PathBuf,
        #[command(flatten)]
        mode: SplitArgs,
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Bundle the outputs into one ZIP archive
        #[arg(long)]
        zip: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Unit {
    Metric,
    Imperial,
}

/// Text from the positional argument, `--file`, or stdin.
#[derive(Debug, Args)]
pub struct TextInput {
    pub text: Option<String>,
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

impl TextInput {
    pub fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return Ok(std::fs::read_to_string(path)?);
        }
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}

#[derive(Debug, Args)]
pub struct BodyArgs {
    /// Weight in kg, or lb with --unit imperial
    #[arg(long)]
    pub weight: f64,
    /// Height in cm, or inches with --unit imperial
    #[arg(long)]
    pub height: f64,
    #[arg(long, value_enum, default_value_t = Unit::Metric)]
    pub unit: Unit,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SplitArgs {
    /// Pages to extract into a single file, e.g. 1-3,5
    #[arg(long)]
    pub extract: Option<String>,
    /// One file per comma-separated group, e.g. 1-3,4-6
    #[arg(long)]
    pub ranges: Option<String>,
    /// One file per page
    #[arg(long)]
    pub every_page: bool,
    /// One file per N pages
    #[arg(long)]
    pub chunk: Option<u32>,
}

/// Parses `NAME:BALANCE:APR:MINIMUM`.
pub fn parse_debt(value: &str) -> std::result::Result<Debt, String> {
    let parts: Vec<&str> = value.rsplitn(4, ':').collect();
    let [minimum, apr, balance, name] = parts.as_slice() else {
        return Err(format!("Expected NAME:BALANCE:APR:MINIMUM, got '{}'", value));
    };

    let number = |field: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid {} '{}'", field, raw))
    };

    Ok(Debt {
        name: name.trim().to_string(),
        balance: number("balance", *balance)?,
        apr: number("apr", *apr)?,
        minimum_payment: number("minimum", *minimum)?,
    })
}

impl SplitArgs {
    pub fn to_mode(&self) -> Result<crate::tools::pdf::split::SplitMode> {
        use crate::tools::pdf::split::{parse_range_groups, parse_ranges, SplitMode};

        if let Some(pages) = &self.extract {
            return Ok(SplitMode::Extract(parse_ranges(pages)?));
        }
        if let Some(groups) = &self.ranges {
            return Ok(SplitMode::Ranges(parse_range_groups(groups)?));
        }
        if let Some(size) = self.chunk {
            return Ok(SplitMode::Chunks(size));
        }
        if self.every_page {
            return Ok(SplitMode::EveryPage);
        }
        Err(ToolError::MissingInputError {
            field: "split mode".to_string(),
        })
    }
}
