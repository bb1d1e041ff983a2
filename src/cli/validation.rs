use crate::cli::args::CliArgs;

pub const MAX_RANGE: usize = 1000;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(size) = args.page_size {
        if size == 0 {
            return Err("invalid page-size, expected positive integer".to_string());
        }
    }
    if let Some(range) = args.range {
        if range > MAX_RANGE {
            return Err(format!("invalid range {range}, expected at most {MAX_RANGE}"));
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json, or html"
            ));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if args.output.is_some() && args.output_dir.is_some() {
        return Err("use either --output or --output-dir, not both".to_string());
    }
    Ok(())
}
