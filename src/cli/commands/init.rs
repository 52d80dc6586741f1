//! cli::commands::init
//!
//! Create an empty fleet and write its first snapshot.

use anyhow::Result;

use super::Context;
use crate::fleet::Fleet;
use crate::ui::output;

/// Handle the `init` command.
pub fn init(ctx: &Context, name: Option<String>) -> Result<()> {
    let name = name.unwrap_or_else(|| ctx.company.clone());
    let fleet = Fleet::new(&name);
    let path = fleet.save(&ctx.data_dir, ctx.snapshot.as_deref())?;
    output::print(
        format!("initialized fleet '{}' at {}", name, path.display()),
        ctx.verbosity,
    );
    Ok(())
}
