//! Stylable String CLI
//!
//! Usage:
//!   stylable-string --resources <FILE> [OPTIONS] <TEMPLATE_ID> [ARGS]...
//!
//! Arguments are strings unless prefixed with `int:`, `float:`, `char:` or
//! `bool:`.
//!
//! Options:
//!   -r, --resources <FILE>    Resource bundle (TOML format)
//!   -t, --style-table <ID>    Style table to annotate with
//!   --no-percent-args         `%%` and `%n` do not take an argument position
//!   --text-only               Print the text without its annotations
//!   -h, --help                Print help

use std::path::PathBuf;

use clap::Parser;
use log::debug;

use stylable_string::{
    format_resource, Argument, FormatConfig, FormatError, ResourceBundle, ResourceSource,
};

#[derive(Parser)]
#[command(name = "stylable-string")]
#[command(about = "Format printf-style templates from a resource bundle into annotated text")]
struct Cli {
    /// Resource bundle (TOML format)
    #[arg(short, long)]
    resources: PathBuf,

    /// Style table to annotate with
    #[arg(short = 't', long)]
    style_table: Option<String>,

    /// `%%` and `%n` do not take a position in the argument order
    #[arg(long)]
    no_percent_args: bool,

    /// Print the text without its annotations
    #[arg(long)]
    text_only: bool,

    /// Template id
    template_id: String,

    /// Arguments, e.g. `Alice`, `int:3`, `float:2.5`, `char:x`, `bool:true`
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,
}

fn parse_argument(raw: &str) -> Result<Argument, String> {
    let Some((kind, value)) = raw.split_once(':') else {
        return Ok(Argument::from(raw));
    };

    match kind {
        "int" => value
            .parse::<i64>()
            .map(Argument::Int)
            .map_err(|e| format!("invalid int '{}': {}", value, e)),
        "float" => value
            .parse::<f64>()
            .map(Argument::Float)
            .map_err(|e| format!("invalid float '{}': {}", value, e)),
        "bool" => value
            .parse::<bool>()
            .map(Argument::Bool)
            .map_err(|e| format!("invalid bool '{}': {}", value, e)),
        "char" => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Argument::Char(c)),
                _ => Err(format!("invalid char '{}': expected exactly one character", value)),
            }
        }
        // Any other prefix is part of a plain string, e.g. `note: hi`
        _ => Ok(Argument::from(raw)),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let bundle = match ResourceBundle::from_file(&cli.resources) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error loading resources '{}': {}", cli.resources.display(), e);
            std::process::exit(1);
        }
    };
    debug!(
        "loaded {} template(s) and {} style(s) from {}",
        bundle.strings.len(),
        bundle.styles.len(),
        cli.resources.display()
    );

    let args = match cli
        .args
        .iter()
        .map(|raw| parse_argument(raw))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let config = FormatConfig::new().with_percent_consumes_argument(!cli.no_percent_args);
    let style_table = cli.style_table.as_deref();

    match format_resource(&bundle, &bundle, &cli.template_id, style_table, &args, &config) {
        Ok(text) => {
            println!("{}", text);
            if !cli.text_only {
                for annotation in text.annotations() {
                    println!("{}", annotation);
                }
            }
        }
        Err(e) => {
            report_error(&bundle, &cli.template_id, style_table, &e);
            std::process::exit(1);
        }
    }
}

fn report_error(
    bundle: &ResourceBundle,
    template_id: &str,
    style_table: Option<&str>,
    error: &FormatError,
) {
    match error {
        FormatError::TemplateNotFound { id } => {
            eprintln!("Error: {}", error);
            print_suggestions(&bundle.similar_templates(id));
        }
        FormatError::StyleTableNotFound { id } => {
            eprintln!("Error: {}", error);
            print_suggestions(&bundle.similar_style_tables(id));
        }
        _ => match (error.span(), bundle.resolve_template(template_id)) {
            (Some(_), Some(template)) => eprint!("{}", error.report(&template, template_id)),
            _ => {
                eprintln!("Error: {}", error);
                if let Some(id) = style_table {
                    eprintln!("  (style table '{}')", id);
                }
            }
        },
    }
}

fn print_suggestions(similar: &[String]) {
    if !similar.is_empty() {
        eprintln!("  Did you mean: {}?", similar.join(", "));
    }
}
