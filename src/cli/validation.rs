use crate::cli::args::CliArgs;
use crate::country::NeighbourScope;
use crate::output::OutputFormat;
use crate::render::listing::CardLine;
use crate::utils;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.country.is_some() && args.detail.is_some() {
        return Err("use either --country or --detail, not both".to_string());
    }
    if args.search.is_some() && (args.country.is_some() || args.detail.is_some()) {
        return Err("--search applies to the listing view only".to_string());
    }
    if let Some(code) = args.country.as_deref() {
        let code = code.trim();
        if !utils::is_country_code(code) {
            return Err(format!("invalid --country '{code}'"));
        }
    }
    if let Some(raw) = args.neighbours.as_deref() {
        NeighbourScope::parse(raw)
            .ok_or_else(|| format!("invalid --neighbours '{raw}', expected subregion or region"))?;
    }
    if let Some(raw) = args.card_line.as_deref() {
        CardLine::parse(raw)
            .ok_or_else(|| format!("invalid --card-line '{raw}', expected datetime or region"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw)
            .ok_or_else(|| format!("invalid --output-format '{raw}', expected html, json or text"))?;
    }
    if args.timeout == Some(0) {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    if args.workers == Some(0) {
        return Err("invalid workers, expected positive integer".to_string());
    }
    Ok(())
}
