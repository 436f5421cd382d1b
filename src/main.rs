use core::num::NonZeroU32;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use box_score_stalker::reports::at_bat_log::AtBatLog;
use box_score_stalker::reports::box_score::BoxScore;
use box_score_stalker::reports::game_card::{first_pitch, GameCard};
use box_score_stalker::reports::line_score::LineScore;
use box_score_stalker::reports::spray_chart::SprayChart;
use box_score_stalker::reports::Report;
use box_score_stalker::util::aggregate::aggregate_player_stats;
use box_score_stalker::util::column::BoxScoreColumn;
use box_score_stalker::util::event::{Event, GameId, PlayerId};
use box_score_stalker::util::nth;
use box_score_stalker::util::source::{open_source, EventSource};
use box_score_stalker::util::spray::sequential_hit_numbering;

/// Print a box score, line score and spray chart for one recorded game
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON stats file, or base URL of the stats service
    #[arg(long, env = "BOX_SCORE_SOURCE")]
    source: String,

    #[arg(long, env = "BOX_SCORE_GAME")]
    game: String,

    /// Add this player's at-bats and limit the spray chart to them
    #[arg(long, env = "BOX_SCORE_PLAYER")]
    player: Option<String>,

    /// Limit the spray chart to one inning
    #[arg(long)]
    inning: Option<NonZeroU32>,

    /// Column the box score is sorted by (AB, R, H, RBI, HR, AVG)
    #[arg(long, default_value = "AVG")]
    sort: BoxScoreColumn,

    /// Time zone the first pitch is shown in
    #[arg(long, env = "BOX_SCORE_TIMEZONE", default_value = "America/Toronto")]
    timezone: String,

    /// Copy the report to the clipboard
    #[arg(long, action = clap::ArgAction::SetTrue)]
    copy: bool,

    /// Milliseconds to wait between failed requests
    #[arg(long, default_value_t = 3000)]
    retry_ms: u64,

    /// Requests made before giving up on the stats service
    #[arg(long, default_value_t = 5)]
    attempts: usize,

    #[arg(long, default_value_t = 41)]
    chart_width: usize,

    #[arg(long, default_value_t = 21)]
    chart_height: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = main0(Args::parse()) {
        eprintln!("Error while building box score: {e:#}");
        std::process::exit(1);
    }
}

fn main0(args: Args) -> Result<()> {
    let timezone = args.timezone.parse::<Tz>().map_err(|e| anyhow!("{e}")).context("Could not parse time zone")?;
    let source = open_source(&args.source, Duration::from_millis(args.retry_ms), args.attempts)?;
    let game_id = GameId::new(args.game.as_str())?;
    let player_id = args.player.as_deref().map(PlayerId::new).transpose()?;

    let roster = source.roster().context("Could not load roster")?;
    let events = source.events_for_game(&game_id).with_context(|| format!("Could not load stats for game {game_id}"))?;
    if events.is_empty() {
        warn!(game = %game_id, "No stats recorded for game");
    }
    info!(game = %game_id, stats = events.len(), players = roster.len(), "Building box score");

    let first_pitch_time = events.iter().map(Event::timestamp).min().map(|timestamp| first_pitch(timestamp, timezone));
    let box_score = BoxScore::new("Box Score", &events, &roster, args.sort);
    let line_score = LineScore::new(&events)?;

    let (at_bat_log, player_events) = match &player_id {
        Some(player_id) => {
            let player_events = source.events_for_player_in_game(player_id, &game_id)?;
            let history = source.events_for_player(player_id).with_context(|| format!("Could not load history of player {player_id}"))?;
            debug!(player = %player_id, game_stats = player_events.len(), all_stats = history.len(), "Loaded player stats");
            let log = AtBatLog::new(roster.name(player_id), &player_events).with_season(aggregate_player_stats(&history));
            (Some(log), Some(player_events))
        }
        None => (None, None),
    };

    let charted = player_events.as_deref().unwrap_or(&events);
    let hits = sequential_hit_numbering(charted.iter().filter(|event| args.inning.map_or(true, |inning| event.inning() == Some(inning))));
    let mut scope = Vec::new();
    if let Some(player_id) = &player_id {
        scope.push(roster.name(player_id).to_owned());
    }
    if let Some(inning) = args.inning {
        scope.push(format!("{} inning", nth(inning.get() as usize)));
    }
    let title = if scope.is_empty() { "Spray Chart".to_owned() } else { format!("Spray Chart ({})", scope.join(", ")) };
    let spray_chart = SprayChart::new(title, &hits, &roster, args.chart_width, args.chart_height);
    debug!(hits = spray_chart.len(), "Charted hits");

    let report = Report::GameCard(GameCard::new(game_id.to_string(), first_pitch_time, box_score, line_score, at_bat_log, spray_chart));
    if args.copy {
        report.send_with_settings(true, true)
    } else {
        report.send()
    }
}
