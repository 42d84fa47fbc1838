use crate::input::{parse_command, Command, PlayerRef};
use crate::persistence::FileStore;
use crate::recognizer::JsonReplayRecognizer;
use crate::view::{self, Ui};
use crate::CliOptions;
use anyhow::Context;
use carioca_core::{
    parse_manual_score, GameAction, GameError, GamePhase, GameSession, PlayerId, ScanImage,
};
use carioca_data::load_locales;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

pub fn run(options: CliOptions) -> anyhow::Result<()> {
    let assets = options.assets.exists().then_some(options.assets.as_path());
    let strings = load_locales(assets, options.locale.as_deref()).context("load locales")?;
    let ui = Ui::new(strings);
    let data_dir = options
        .data_dir
        .clone()
        .or_else(crate::persistence::default_data_dir)
        .context("no data directory: pass --data-dir or set HOME")?;
    let mut session = GameSession::open(FileStore::new(data_dir));
    info!(
        locale = ui.strings.code(),
        data_dir = %session.persistence().store().dir().display(),
        saved_game = session.saved_game_available(),
        "starting"
    );
    let mut recognizer = JsonReplayRecognizer;
    println!("{}", ui.t("title"));
    view::print_help(&ui);
    println!();
    view::print_overview(&ui, &session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}> ", prompt_label(session.game().phase()));
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        let before = session.game().phase();
        execute(&ui, &mut session, &mut recognizer, command);
        announce_events(&ui, &mut session);
        if session.game().phase() != before {
            view::print_overview(&ui, &session);
        }
    }
    Ok(())
}

fn prompt_label(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Setup => "setup",
        GamePhase::WinnerSelection => "winner",
        GamePhase::ScoreInput => "scores",
        GamePhase::Scanning => "scan",
        GamePhase::ScanConfirmation => "confirm",
        GamePhase::Standings => "standings",
        GamePhase::Finished => "finished",
    }
}

/// Why a prompt command did nothing.
#[derive(Debug)]
enum CommandError {
    Game(GameError),
    NoSuchPlayer(String),
}

impl From<GameError> for CommandError {
    fn from(value: GameError) -> Self {
        Self::Game(value)
    }
}

fn execute(
    ui: &Ui,
    session: &mut GameSession<FileStore>,
    recognizer: &mut JsonReplayRecognizer,
    command: Command,
) {
    match dispatch(ui, session, recognizer, command) {
        Err(CommandError::Game(err)) => {
            debug!(error = %err, "command rejected");
            view::print_error(ui, &err);
        }
        Err(CommandError::NoSuchPlayer(name)) => {
            println!("{}: {name}", ui.text("no such player", "no existe el jugador"));
            view::print_roster(ui, session.game().players());
        }
        Ok(()) => {}
    }
}

fn dispatch(
    ui: &Ui,
    session: &mut GameSession<FileStore>,
    recognizer: &mut JsonReplayRecognizer,
    command: Command,
) -> Result<(), CommandError> {
    match command {
        Command::Help => view::print_help(ui),
        Command::Quit => {}
        Command::Show => view::print_overview(ui, session),
        Command::Players => view::print_roster(ui, session.game().players()),
        Command::Settings => view::print_settings(ui, session.settings()),
        Command::Rounds => view::print_round_options(ui, session),
        Command::Standings => view::print_standings(ui, session.game().players()),
        Command::Sheet => view::print_score_sheet(ui, session.game(), session.settings()),
        Command::AddPlayer(name) => session.apply(GameAction::AddPlayer { name })?,
        Command::RemovePlayer(player) => {
            let id = resolve_player(session, &player)?;
            session.apply(GameAction::RemovePlayer { id })?;
            view::print_roster(ui, session.game().players());
        }
        Command::ToggleRound(key) => {
            let enabled = session.toggle_round(&key)?;
            println!("{key}: {}", if enabled { "on" } else { "off" });
        }
        Command::CardScore { rank, value } => {
            let value = session.set_card_score(&rank, &value)?;
            println!("{rank}={value}");
        }
        Command::ResetSettings => {
            session.reset_settings()?;
            view::print_settings(ui, session.settings());
        }
        Command::Start => session.apply(GameAction::StartGame)?,
        Command::Continue => session.continue_game()?,
        Command::Discard => session.discard_saved_game(),
        Command::Winner(player) => {
            let player = resolve_player(session, &player)?;
            session.apply(GameAction::SelectWinner { player })?;
        }
        Command::Skip => session.apply(GameAction::SkipRound)?,
        Command::Score { player, raw } => {
            let player = resolve_player(session, &player)?;
            if !raw.is_empty() {
                if let Err(err) = parse_manual_score(&raw) {
                    println!("! {}", view::describe_score_problem(ui, &err));
                }
            }
            session.apply(GameAction::SetDraftScore { player, raw })?;
            view::print_draft(ui, session.game());
        }
        Command::Record => session.apply(GameAction::RecordScores)?,
        Command::Scan { player, image } => {
            let player = resolve_player(session, &player)?;
            session.apply(GameAction::StartScan { player })?;
            if let Some(image) = image {
                capture(session, recognizer, &image)?;
            }
        }
        Command::Capture(image) => capture(session, recognizer, &image)?,
        Command::Cancel => session.apply(GameAction::CancelScan)?,
        Command::Retry(image) => {
            session.apply(GameAction::RetryScan)?;
            if let Some(image) = image {
                capture(session, recognizer, &image)?;
            }
        }
        Command::EditCard { index, rank, suit } => {
            session.apply(GameAction::EditPendingCard {
                index,
                rank: Some(rank),
                suit,
            })?;
            print_pending(ui, session);
        }
        Command::AddCard => {
            session.apply(GameAction::AddPendingCard)?;
            print_pending(ui, session);
        }
        Command::DeleteCard(index) => {
            session.apply(GameAction::RemovePendingCard { index })?;
            print_pending(ui, session);
        }
        Command::Confirm => session.confirm_pending_scan()?,
        Command::Next => session.apply(GameAction::NextRound)?,
        Command::ChangeRound(key) => session.apply(GameAction::ChangeRound { key })?,
        Command::NewGame => session.apply(GameAction::NewGame)?,
    }
    Ok(())
}

fn print_pending(ui: &Ui, session: &GameSession<FileStore>) {
    if let Some(pending) = session.game().pending_scan() {
        view::print_pending_scan(ui, pending);
    }
}

fn capture(
    session: &mut GameSession<FileStore>,
    recognizer: &mut JsonReplayRecognizer,
    image: &Path,
) -> Result<(), GameError> {
    let image = ScanImage::new(image.to_string_lossy());
    session.scan(recognizer, image)
}

/// Roster position (1-based) or case-insensitive name.
fn resolve_player(
    session: &GameSession<FileStore>,
    player: &PlayerRef,
) -> Result<PlayerId, CommandError> {
    let players = session.game().players();
    let wanted = player.0.trim();
    if let Ok(position) = wanted.parse::<usize>() {
        if let Some(found) = position.checked_sub(1).and_then(|idx| players.get(idx)) {
            return Ok(found.id);
        }
    }
    players
        .iter()
        .find(|candidate| candidate.name.eq_ignore_ascii_case(wanted))
        .map(|found| found.id)
        .ok_or_else(|| CommandError::NoSuchPlayer(wanted.to_string()))
}

fn announce_events(ui: &Ui, session: &mut GameSession<FileStore>) {
    for event in session.drain_events() {
        debug!(?event, "game event");
        if let Some(line) = view::describe_event(ui, session.game(), &event) {
            println!("{line}");
        }
    }
}
