use anyhow::Result;

use super::CommandContext;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let output = &ctx.output;
    if output.is_quiet() {
        println!("{}", crate::VERSION);
        return Ok(());
    }

    output.header(&format!("{} v{}", crate::NAME, crate::VERSION));
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );
    output.key_value("CPU cores:", &num_cpus::get().to_string(), false);
    output.key_value("Max workers:", &ctx.config.max_workers().to_string(), true);
    Ok(())
}
