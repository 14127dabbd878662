use clap::{Args, Parser, Subcommand};
use impera_domain::PipelineStage;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "impera")]
#[command(about = "Impera CRM pipeline board and chat", long_about = None)]
#[command(version, arg_required_else_help = true)]
pub struct Cli {
    /// Path to the CRM data file (or set IMPERA_FILE env var)
    #[arg(long, global = true, value_name = "FILE", env = "IMPERA_FILE")]
    pub file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline board operations
    Board(BoardCommand),
    /// Conversation operations
    Chat(ChatCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// Show the board: all leads grouped into the seven stage columns
    List,
    /// Drag a lead onto a stage column and persist the transition
    Move {
        #[arg(long)]
        id: Uuid,
        /// Target stage (slug or label, e.g. "em-negociacao")
        #[arg(long)]
        stage: PipelineStage,
    },
}

#[derive(Args)]
pub struct ChatCommand {
    #[command(subcommand)]
    pub action: ChatAction,
}

#[derive(Subcommand)]
pub enum ChatAction {
    /// Print the display-filtered transcript for a conversation
    History {
        #[arg(long)]
        phone: String,
    },
    /// Send a message into a conversation
    Send {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },
}
