use super::interface::CommandContext;

#[derive(Debug)]
pub struct BotData {
    pub token: String,
    pub commands: CommandContext,
}
