use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Validate => commands::validate::handle(ctx, flags),
        Commands::Course(args) => commands::course::handle(&args, ctx, flags),
        Commands::Articulation(args) => commands::articulation::handle(&args, ctx, flags),
        Commands::Department(args) => commands::department::handle(&args, ctx, flags),
        Commands::Program => commands::program::handle(ctx, flags),
        Commands::Matrix(args) => commands::matrix::handle(&args, ctx, flags),
        Commands::Schema => bail!("schema is handled before the dataset is loaded"),
    }
}
