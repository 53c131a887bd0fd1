//! Power tools

use crate::error::Result;
use crate::services::Target;
use crate::tools::{ToolArgs, ToolContext};

pub async fn turn_on_device(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    match args.target()? {
        Target::All => context.control.turn_on_all().await,
        Target::Named(name) => {
            let device = context.control.manager().find_device(&name).await?;
            device.turn_on().await?;
            Ok(format!("Turned on {}", device.friendly_name()))
        }
    }
}

pub async fn turn_off_device(context: &ToolContext, args: &ToolArgs) -> Result<String> {
    match args.target()? {
        Target::All => context.control.turn_off_all().await,
        Target::Named(name) => {
            let device = context.control.manager().find_device(&name).await?;
            device.turn_off().await?;
            Ok(format!("Turned off {}", device.friendly_name()))
        }
    }
}
