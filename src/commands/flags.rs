//! Command: print the parameter to switch mapping.
use anyhow::Result;

use crate::config::flags::FlagTable;
use crate::params::PARAMETER_NAMES;

/// Render the bundled table, one `name  switch` pair per line, followed by
/// the execution control values.
///
/// # Errors
///
/// Returns an error if the bundled table is invalid.
pub fn render(table: &FlagTable) -> Result<String> {
    let width = PARAMETER_NAMES.iter().map(|n| n.len()).max().unwrap_or(0);
    let mut out = String::new();
    for name in PARAMETER_NAMES {
        let flag = table.flag(name)?;
        out.push_str(&format!("{name:<width$}  {flag}\n"));
    }
    out.push_str(&format!("\nexpected exit code: {}\n", table.exit_value()));
    out.push_str(&format!(
        "default build log:  {}\n",
        table.build_log_file().display()
    ));
    Ok(out)
}

/// Print the bundled flag table to stdout.
///
/// # Errors
///
/// Returns an error if the bundled table is invalid.
#[allow(clippy::print_stdout)]
pub fn run() -> Result<()> {
    print!("{}", render(FlagTable::bundled()?)?);
    Ok(())
}
