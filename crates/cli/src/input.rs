use std::path::PathBuf;

/// A player as typed at the prompt: 1-based roster position or name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRef(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Show,
    Players,
    Settings,
    Rounds,
    AddPlayer(String),
    RemovePlayer(PlayerRef),
    ToggleRound(String),
    CardScore { rank: String, value: String },
    ResetSettings,
    Start,
    Continue,
    Discard,
    Winner(PlayerRef),
    Skip,
    Score { player: PlayerRef, raw: String },
    Record,
    Scan { player: PlayerRef, image: Option<PathBuf> },
    Capture(PathBuf),
    Cancel,
    Retry(Option<PathBuf>),
    EditCard {
        index: usize,
        rank: String,
        suit: Option<String>,
    },
    AddCard,
    DeleteCard(usize),
    Confirm,
    Next,
    ChangeRound(String),
    Standings,
    Sheet,
    NewGame,
}

/// Parses one prompt line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let input = line.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let (cmd, rest) = match input.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();
    let command = match cmd.to_ascii_lowercase().as_str() {
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "show" | "ls" => Command::Show,
        "players" => Command::Players,
        "settings" => Command::Settings,
        "rounds" => Command::Rounds,
        "add" => {
            if rest.is_empty() {
                return Err("usage: add <name>".to_string());
            }
            Command::AddPlayer(rest.to_string())
        }
        "remove" | "rm" => Command::RemovePlayer(player_arg(rest, "remove <player>")?),
        "toggle" => Command::ToggleRound(single_arg(&args, "toggle <round_key>")?.to_string()),
        "cardscore" => match args.as_slice() {
            [rank, value] => Command::CardScore {
                rank: rank.to_string(),
                value: value.to_string(),
            },
            _ => return Err("usage: cardscore <rank> <points>".to_string()),
        },
        "reset" => Command::ResetSettings,
        "start" => Command::Start,
        "continue" | "resume" => Command::Continue,
        "discard" => Command::Discard,
        "winner" | "w" => Command::Winner(player_arg(rest, "winner <player>")?),
        "skip" => Command::Skip,
        "score" | "s" => match args.as_slice() {
            [player, raw] => Command::Score {
                player: PlayerRef(player.to_string()),
                raw: raw.to_string(),
            },
            // `score <player>` clears the entry.
            [player] => Command::Score {
                player: PlayerRef(player.to_string()),
                raw: String::new(),
            },
            _ => return Err("usage: score <player> <points>".to_string()),
        },
        "record" => Command::Record,
        "scan" => match args.as_slice() {
            [player] => Command::Scan {
                player: PlayerRef(player.to_string()),
                image: None,
            },
            [player, image] => Command::Scan {
                player: PlayerRef(player.to_string()),
                image: Some(PathBuf::from(image)),
            },
            _ => return Err("usage: scan <player> [image.json]".to_string()),
        },
        "capture" => Command::Capture(PathBuf::from(single_arg(&args, "capture <image.json>")?)),
        "cancel" => Command::Cancel,
        "retry" => match args.as_slice() {
            [] => Command::Retry(None),
            [image] => Command::Retry(Some(PathBuf::from(image))),
            _ => return Err("usage: retry [image.json]".to_string()),
        },
        "edit" => match args.as_slice() {
            [index, rank] => Command::EditCard {
                index: card_index(index)?,
                rank: rank.to_string(),
                suit: None,
            },
            [index, rank, suit] => Command::EditCard {
                index: card_index(index)?,
                rank: rank.to_string(),
                suit: Some(suit.to_string()),
            },
            _ => return Err("usage: edit <card#> <rank> [suit]".to_string()),
        },
        "addcard" => Command::AddCard,
        "delcard" => Command::DeleteCard(card_index(single_arg(&args, "delcard <card#>")?)?),
        "confirm" | "ok" => Command::Confirm,
        "next" | "n" => Command::Next,
        "change" => Command::ChangeRound(single_arg(&args, "change <round_key>")?.to_string()),
        "standings" | "table" => Command::Standings,
        "sheet" => Command::Sheet,
        "new" => Command::NewGame,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

fn single_arg<'a>(args: &[&'a str], usage: &str) -> Result<&'a str, String> {
    match args {
        [value] => Ok(*value),
        _ => Err(format!("usage: {usage}")),
    }
}

fn player_arg(rest: &str, usage: &str) -> Result<PlayerRef, String> {
    if rest.is_empty() {
        return Err(format!("usage: {usage}"));
    }
    Ok(PlayerRef(rest.to_string()))
}

/// Card numbers are 1-based at the prompt.
fn card_index(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value - 1),
        _ => Err(format!("invalid card number: {raw}")),
    }
}
