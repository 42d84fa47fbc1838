use crate::UiLocale;
use carioca_core::{
    final_results, score_sheet, standings, Event, Game, GameError, GamePhase, GameSession,
    GameSettings, KeyValueStore, PendingScan, Player, PlayerId, ScoreParseError,
    MAX_ROUND_SCORE,
};
use carioca_data::Locales;

/// Prompt-side text: message bundles for game vocabulary, inline pairs for
/// the command reference.
pub struct Ui {
    pub locale: UiLocale,
    pub strings: Locales,
}

impl Ui {
    pub fn new(strings: Locales) -> Self {
        Self {
            locale: UiLocale::from_code(strings.code()),
            strings,
        }
    }

    pub fn text<'a>(&self, en: &'a str, es: &'a str) -> &'a str {
        self.locale.text(en, es)
    }

    pub fn t(&self, key: &str) -> String {
        self.strings.text(key)
    }
}

pub fn print_help(ui: &Ui) {
    println!("{}", ui.text("Commands:", "Comandos:"));
    let rows: &[(&str, &str, &str)] = &[
        ("help|h|?", "show help", "mostrar ayuda"),
        ("show|ls", "show the current screen", "mostrar la pantalla actual"),
        ("quit|exit", "exit (the game is saved)", "salir (el juego queda guardado)"),
        ("add <name>", "add a player", "agregar un jugador"),
        ("remove <player>", "remove a player", "quitar un jugador"),
        ("players", "list players", "listar jugadores"),
        ("settings", "show rounds and card scores", "ver rondas y puntajes de cartas"),
        ("toggle <round_key>", "enable/disable a round", "activar/desactivar una ronda"),
        ("cardscore <rank> <pts>", "set a card's scanner value", "fijar el valor de una carta"),
        ("reset", "restore default settings", "restaurar ajustes por defecto"),
        ("start", "start the game", "empezar el juego"),
        ("continue", "resume the saved game", "continuar el juego guardado"),
        ("discard", "forget the saved game", "olvidar el juego guardado"),
        ("winner <player>", "declare the round winner", "declarar el ganador de la ronda"),
        ("skip", "skip a 13-card round", "saltar una ronda de 13 cartas"),
        ("score <player> <pts>", "enter points for a player", "ingresar puntos de un jugador"),
        ("record", "record the round", "registrar la ronda"),
        ("scan <player> [file]", "scan a player's hand", "escanear la mano de un jugador"),
        ("capture <file>", "send the captured image", "enviar la imagen capturada"),
        ("cancel", "cancel the scan", "cancelar el escaneo"),
        ("retry [file]", "scan again", "escanear de nuevo"),
        ("edit <n> <rank> [suit]", "correct a detected card", "corregir una carta detectada"),
        ("addcard | delcard <n>", "add/remove a detected card", "añadir/quitar una carta"),
        ("confirm", "accept the scanned score", "aceptar el puntaje escaneado"),
        ("next", "go to the next round", "pasar a la siguiente ronda"),
        ("rounds | change <key>", "list rounds / jump to a round", "listar rondas / cambiar de ronda"),
        ("standings | sheet", "totals / per-round scores", "totales / puntos por ronda"),
        ("new", "abandon and start a new game", "abandonar y empezar de nuevo"),
    ];
    for (usage, en, es) in rows {
        println!("  {usage:<24} {}", ui.text(en, es));
    }
    println!(
        "{}",
        ui.text(
            "Players can be given by number or name.",
            "Los jugadores se indican por número o nombre.",
        )
    );
}

/// Context-aware view of the current phase.
pub fn print_overview<S: KeyValueStore>(ui: &Ui, session: &GameSession<S>) {
    let game = session.game();
    let settings = session.settings();
    match game.phase() {
        GamePhase::Setup => print_setup(ui, session),
        GamePhase::WinnerSelection => {
            print_round_header(ui, game, settings);
            println!("{}", ui.t("whoWonTheRound"));
            println!("{}", ui.t("winnerGetsZero"));
            print_roster(ui, game.players());
            if game.can_skip_round(settings) {
                println!("  skip: {}", ui.t("skipRound"));
            }
        }
        GamePhase::ScoreInput => {
            print_round_header(ui, game, settings);
            print_draft(ui, game);
            if game.is_scan_in_flight() {
                println!("{}", ui.t("analyzingCards"));
            } else if game.can_record_scores() {
                println!("  record: {}", ui.t("recordScores"));
            }
        }
        GamePhase::Scanning => {
            print_round_header(ui, game, settings);
            if let Some(player) = game.scan_target().and_then(|id| game.player(id)) {
                println!("{}: {}", ui.text("Scanning", "Escaneando"), player.name);
            }
            println!("{}", ui.t("scannerHelperText"));
            println!(
                "  capture <file> | cancel: {}",
                ui.t("cancel")
            );
        }
        GamePhase::ScanConfirmation => {
            if let Some(pending) = game.pending_scan() {
                print_pending_scan(ui, pending);
            }
        }
        GamePhase::Standings => {
            println!("{}", ui.t("endOfRound"));
            print_standings(ui, game.players());
            let next = if game.is_last_round(settings) {
                ui.t("viewFinalResults")
            } else {
                ui.t("nextRound")
            };
            println!("  next: {next}");
        }
        GamePhase::Finished => print_final_results(ui, game.players()),
    }
}

pub fn print_setup<S: KeyValueStore>(ui: &Ui, session: &GameSession<S>) {
    println!("{} - {}", ui.t("title"), ui.t("setupSubtitle"));
    if session.saved_game_available() {
        println!("  continue: {}", ui.t("continueGame"));
    }
    print_roster(ui, session.game().players());
    if !session.game().can_start(session.settings()) {
        println!("{}", ui.t("addAtLeastTwo"));
    }
    let active = session.settings().active_rounds();
    println!("{}: {}", ui.t("activeRounds"), active.len());
}

pub fn print_roster(ui: &Ui, players: &[Player]) {
    println!("{}:", ui.t("players"));
    for (idx, player) in players.iter().enumerate() {
        println!("  {}. {}", idx + 1, player.name);
    }
}

pub fn print_settings(ui: &Ui, settings: &GameSettings) {
    println!("{}:", ui.t("activeRounds"));
    for round in carioca_core::catalog() {
        let mark = if settings.is_round_enabled(round.key) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{mark}] {:<20} {} ({})",
            round.key,
            ui.strings.round_name(round),
            ui.strings.round_description(round)
        );
    }
    println!("{}:", ui.t("cardScoresForScanner"));
    let line: Vec<String> = settings
        .card_scores
        .iter()
        .map(|(rank, value)| format!("{rank}={value}"))
        .collect();
    println!("  {}", line.join(" "));
}

pub fn print_round_header(ui: &Ui, game: &Game, settings: &GameSettings) {
    let Some(round) = game.current_round_def(settings) else {
        return;
    };
    let total = settings.active_rounds().len();
    let current = (game.current_round() + 1).to_string();
    let total = total.to_string();
    println!(
        "{}: {}",
        ui.strings
            .translate("roundOf", &[("current", current.as_str()), ("total", total.as_str())]),
        ui.strings.round_name(round)
    );
    println!("  {}", ui.strings.round_description(round));
    if round.can_skip() {
        println!("  {}", ui.t("thirteenCardRoundInfo"));
    }
}

pub fn print_draft(ui: &Ui, game: &Game) {
    let winner = game.round_winner();
    for (idx, player) in game.players().iter().enumerate() {
        let raw = game.draft().get(player.id).unwrap_or("");
        let tag = if Some(player.id) == winner {
            format!(" ({})", ui.t("winner"))
        } else {
            String::new()
        };
        let shown = if raw.is_empty() { "_" } else { raw };
        println!(
            "  {}. {:<16} {} {}{tag}",
            idx + 1,
            player.name,
            shown,
            ui.t("scorePoints")
        );
    }
    if let Some(kind) = game.last_scan_error() {
        println!("! {}", ui.strings.scan_error(kind));
    }
}

pub fn print_pending_scan(ui: &Ui, pending: &PendingScan) {
    println!("{}", ui.t("confirmScore"));
    println!("{}:", ui.t("detectedCardsEditable"));
    if pending.cards.is_empty() {
        println!("  {}", ui.t("noCardsAddOne"));
    }
    for (idx, card) in pending.cards.iter().enumerate() {
        println!("  {}. {} {}", idx + 1, card.rank, card.suit);
    }
    println!("{}: {}", ui.t("totalScore"), pending.score);
    println!(
        "  confirm: {} | retry: {} | edit/addcard/delcard",
        ui.t("confirm"),
        ui.t("scanAgain")
    );
}

pub fn print_standings(ui: &Ui, players: &[Player]) {
    println!("{}:", ui.t("standings"));
    for row in standings(players) {
        let star = if row.leader { "*" } else { " " };
        println!(
            "  {star}{}. {:<16} {} {}",
            row.position,
            row.name,
            row.total,
            ui.t("scorePoints")
        );
    }
}

pub fn print_score_sheet(ui: &Ui, game: &Game, settings: &GameSettings) {
    println!("{}:", ui.t("scoreSheet"));
    let names: Vec<String> = game
        .players()
        .iter()
        .map(|player| format!("{:>8}", truncate(&player.name, 8)))
        .collect();
    println!("  {:<20}{}", ui.t("round"), names.join(""));
    for row in score_sheet(game.players(), settings, game.current_round()) {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|cell| match cell {
                Some(score) => format!("{score:>8}"),
                None if row.upcoming => format!("{:>8}", "."),
                None => format!("{:>8}", "-"),
            })
            .collect();
        println!(
            "  {:<20}{}",
            truncate(&ui.strings.round_name(row.round), 20),
            cells.join("")
        );
    }
    let totals: Vec<String> = game
        .players()
        .iter()
        .map(|player| format!("{:>8}", player.total()))
        .collect();
    println!("  {:<20}{}", ui.t("total"), totals.join(""));
}

pub fn print_final_results(ui: &Ui, players: &[Player]) {
    let results = final_results(players);
    println!("{}", ui.t("gameFinished"));
    let names: Vec<&str> = results
        .winners
        .iter()
        .filter_map(|id| players.iter().find(|player| player.id == *id))
        .map(|player| player.name.as_str())
        .collect();
    let label = if names.len() > 1 {
        ui.t("winnersAre")
    } else {
        ui.t("winnerIs")
    };
    let total = results.winning_total.to_string();
    println!(
        "{label}: {} {}",
        names.join(", "),
        ui.strings.translate("withPoints", &[("score", total.as_str())])
    );
    println!("{}:", ui.t("finalResults"));
    print_standings(ui, players);
    println!("  new: {}", ui.t("playAgain"));
}

pub fn print_round_options<S: KeyValueStore>(ui: &Ui, session: &GameSession<S>) {
    println!("{}:", ui.t("changeRound"));
    for option in session.game().change_round_options(session.settings()) {
        let status = if option.current {
            format!(" ({})", ui.t("current"))
        } else if option.completed {
            format!(" ({})", ui.t("completed"))
        } else {
            String::new()
        };
        println!(
            "  {:<20} {}{status}",
            option.round.key,
            ui.strings.round_name(option.round)
        );
    }
}

/// One line for events worth announcing; the rest are only logged.
pub fn describe_event(ui: &Ui, game: &Game, event: &Event) -> Option<String> {
    let player_name = |id: PlayerId| {
        game.player(id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    match event {
        Event::PlayerAdded { name, .. } => Some(format!("+ {name}")),
        Event::WinnerSelected { winner, .. } => {
            Some(format!("{}: {}", ui.t("winner"), player_name(*winner)))
        }
        Event::ScanFailed { kind } => Some(format!("! {}", ui.strings.scan_error(*kind))),
        Event::ScanConfirmed { player, score } => Some(format!(
            "{} {} {}",
            player_name(*player),
            score,
            ui.t("scorePoints")
        )),
        Event::PhaseCorrected { to, .. } => Some(format!(
            "{} {to:?}",
            ui.text("resumed at", "reanudado en")
        )),
        _ => None,
    }
}

pub fn print_error(ui: &Ui, err: &GameError) {
    println!("{}: {err}", ui.text("error", "error"));
    if let Some(hint) = error_hint(ui, err) {
        println!("{}: {hint}", ui.text("hint", "pista"));
    }
}

fn error_hint(ui: &Ui, err: &GameError) -> Option<String> {
    let hint = match err {
        GameError::NotEnoughPlayers(_) => ui.t("addAtLeastTwo"),
        GameError::InvalidPhase(GamePhase::Setup) => ui
            .text(
                "add players, then 'start' or 'continue'",
                "agrega jugadores, luego 'start' o 'continue'",
            )
            .to_string(),
        GameError::InvalidPhase(GamePhase::WinnerSelection) => ui.t("whoWonTheRound"),
        GameError::InvalidPhase(_) => ui
            .text("use 'show' to see what to do next", "usa 'show' para ver el siguiente paso")
            .to_string(),
        GameError::IncompleteScores(_) => format!(
            "{} (0-{MAX_ROUND_SCORE})",
            ui.text(
                "every player needs a whole number of points",
                "cada jugador necesita un número entero de puntos",
            )
        ),
        GameError::RoundNotSkippable(_) => ui
            .text(
                "only 13-card rounds can be skipped",
                "solo las rondas de 13 cartas se pueden saltar",
            )
            .to_string(),
        GameError::ScanInFlight => ui.t("analyzingCards"),
        _ => return None,
    };
    Some(hint)
}

/// Problem with a typed score, explained before it reaches the draft.
pub fn describe_score_problem(ui: &Ui, err: &ScoreParseError) -> String {
    match err {
        ScoreParseError::Empty => ui.text("no points entered", "sin puntos").to_string(),
        ScoreParseError::NotANumber(raw) => format!(
            "{raw}: {}",
            ui.text("not a whole number", "no es un número entero")
        ),
    }
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
