pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod player;
pub(crate) mod versions;

use craftmeta_mojang::{MojangClient, MojangConfig};

use crate::{CliError, Context};

pub(crate) fn mojang_client(ctx: &Context) -> Result<MojangClient, CliError> {
    let config = MojangConfig {
        transport: ctx.transport.clone(),
        ..MojangConfig::default()
    };
    Ok(MojangClient::new(config)?)
}
