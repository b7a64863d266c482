use clap::{Parser, Subcommand};
use orbit::command::SOCKET_PATH;
use orbit::{Command, RotationDirection, SkillId, WheelState};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about = "Control a running skill wheel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the wheel.
    Show,
    /// Hide the wheel.
    Hide,
    /// Switch between the contracted and expanded layouts.
    Toggle,
    /// Fan the skills out around the highlight.
    Expand,
    /// Collapse the skills back into a full circle.
    Contract,
    /// Rotate every skill counter-clockwise.
    Left {
        #[arg(default_value_t = 1)]
        steps: usize,
    },
    /// Rotate every skill clockwise.
    Right {
        #[arg(default_value_t = 1)]
        steps: usize,
    },
    /// Bring a skill (zero-based, in config order) to the highlight.
    Select { skill: usize },
}

impl From<Commands> for Command {
    fn from(cmd: Commands) -> Self {
        match cmd {
            Commands::Show => Command::Show,
            Commands::Hide => Command::Hide,
            Commands::Toggle => Command::Toggle,
            Commands::Expand => Command::SetState(WheelState::Expanded),
            Commands::Contract => Command::SetState(WheelState::Contracted),
            Commands::Left { steps } => Command::Rotate {
                direction: RotationDirection::Left,
                steps,
            },
            Commands::Right { steps } => Command::Rotate {
                direction: RotationDirection::Right,
                steps,
            },
            Commands::Select { skill } => Command::Select(SkillId::from(skill)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(&Command::from(cli.command))
}

fn send_command(cmd: &Command) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to skillwheel at {}: {}. Is skillwheel running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
