// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Batch entry points for Action Board.
//!
//! The default job recomputes rank badges for the active season and
//! prints a JSON summary of per-category updated counts. The exit code
//! is 0 when every category pass succeeded and 1 otherwise, so the
//! external scheduler can alert on failures. The job is idempotent and
//! safe to re-run.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::{error, info, warn};

use action_board_api::{BadgeCalculationSummary, calculate_all_badges, import_boards_csv};
use action_board_domain::{ArtifactType, BadgeCutoffs, Season};
use action_board_persistence::{NewMission, NewSeason, Persistence};

/// Action Board Batch - scheduled jobs for the Action Board backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over --database.
    #[arg(long)]
    mysql_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute rank badges (the default when no command is given).
    Badges {
        /// Season slug to recompute. Defaults to the active season.
        #[arg(long)]
        season: Option<String>,

        /// Rank cutoff applied to every category.
        #[arg(long, default_value_t = 100)]
        cutoff: u32,
    },
    /// Import poster boards from a CSV file.
    ImportBoards {
        /// Path to the CSV file.
        #[arg(long)]
        csv: std::path::PathBuf,
    },
    /// Create a season (and optionally activate it).
    CreateSeason {
        /// URL-safe identifier (e.g. 2026-summer).
        #[arg(long)]
        slug: String,

        /// Human-readable name.
        #[arg(long)]
        name: String,

        /// First day of the season (ISO 8601, e.g. 2026-06-01).
        #[arg(long)]
        start_date: String,

        /// Last day of the season. Omit for an ongoing season.
        #[arg(long)]
        end_date: Option<String>,

        /// Make this the active season.
        #[arg(long)]
        activate: bool,
    },
    /// Import mission reference data from a JSON file.
    ImportMissions {
        /// Path to the JSON file (array of mission objects).
        #[arg(long)]
        json: std::path::PathBuf,
    },
}

/// One mission record in the import file.
#[derive(Debug, Deserialize)]
struct MissionSeed {
    slug: String,
    title: String,
    difficulty: i32,
    #[serde(default)]
    max_achievement_count: Option<i32>,
    required_artifact_type: String,
    #[serde(default)]
    is_hidden: bool,
}

fn open_persistence(args: &Args) -> Result<Persistence, String> {
    match (&args.mysql_url, &args.database) {
        (Some(url), _) => Persistence::new_with_mysql(url).map_err(|e| e.to_string()),
        (None, Some(path)) => Persistence::new_with_file(path).map_err(|e| e.to_string()),
        (None, None) => Persistence::new_in_memory().map_err(|e| e.to_string()),
    }
}

fn run_badges(
    persistence: &mut Persistence,
    season: Option<&str>,
    cutoff: u32,
) -> Result<BadgeCalculationSummary, String> {
    let cutoffs = BadgeCutoffs {
        all: cutoff,
        daily: cutoff,
        prefecture: cutoff,
        mission: cutoff,
    };
    calculate_all_badges(persistence, cutoffs, season, chrono::Utc::now())
        .map_err(|e| e.to_string())
}

fn run_import(persistence: &mut Persistence, csv_path: &std::path::Path) -> Result<usize, String> {
    let content: String = std::fs::read_to_string(csv_path)
        .map_err(|e| format!("failed to read {}: {e}", csv_path.display()))?;
    import_boards_csv(persistence, &content).map_err(|e| e.to_string())
}

fn parse_date(value: &str) -> Result<time::Date, String> {
    time::Date::parse(value, &time::format_description::well_known::Iso8601::DEFAULT)
        .map_err(|e| format!("'{value}' is not a valid date: {e}"))
}

fn run_create_season(
    persistence: &mut Persistence,
    slug: &str,
    name: &str,
    start_date: &str,
    end_date: Option<&str>,
    activate: bool,
) -> Result<i64, String> {
    let start: time::Date = parse_date(start_date)?;
    let end: Option<time::Date> = end_date.map(parse_date).transpose()?;

    // Domain validation first; the row is only built from a valid Season.
    let season: Season = Season::new(slug, name, start, end).map_err(|e| e.to_string())?;

    if persistence
        .get_season_by_slug(season.slug())
        .map_err(|e| e.to_string())?
        .is_some()
    {
        return Err(format!("season '{slug}' already exists"));
    }

    let season_id: i64 = persistence
        .create_season(&NewSeason {
            slug: season.slug().to_string(),
            name: season.name().to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.map(ToString::to_string),
            is_active: 0,
        })
        .map_err(|e| e.to_string())?;

    if activate {
        persistence
            .set_active_season(season_id)
            .map_err(|e| e.to_string())?;
    }

    Ok(season_id)
}

fn run_import_missions(
    persistence: &mut Persistence,
    json_path: &std::path::Path,
) -> Result<usize, String> {
    let content: String = std::fs::read_to_string(json_path)
        .map_err(|e| format!("failed to read {}: {e}", json_path.display()))?;
    let seeds: Vec<MissionSeed> =
        serde_json::from_str(&content).map_err(|e| format!("invalid mission JSON: {e}"))?;

    let mut imported: usize = 0;
    for seed in seeds {
        let artifact_type: ArtifactType = seed
            .required_artifact_type
            .parse()
            .map_err(|e: action_board_domain::DomainError| {
                format!("mission '{}': {e}", seed.slug)
            })?;

        if persistence
            .get_mission_by_slug(&seed.slug)
            .map_err(|e| e.to_string())?
            .is_some()
        {
            warn!(slug = %seed.slug, "Mission already exists; skipping");
            continue;
        }

        persistence
            .create_mission(&NewMission {
                slug: seed.slug,
                title: seed.title,
                difficulty: seed.difficulty,
                max_achievement_count: seed.max_achievement_count,
                required_artifact_type: artifact_type.as_str().to_string(),
                is_hidden: i32::from(seed.is_hidden),
            })
            .map_err(|e| e.to_string())?;
        imported += 1;
    }

    Ok(imported)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let mut persistence: Persistence = match open_persistence(&args) {
        Ok(persistence) => persistence,
        Err(e) => {
            error!(error = %e, "Failed to open database");
            std::process::exit(1);
        }
    };

    match args.command {
        None => run_badges_and_exit(&mut persistence, None, 100),
        Some(Command::Badges { season, cutoff }) => {
            run_badges_and_exit(&mut persistence, season.as_deref(), cutoff);
        }
        Some(Command::ImportBoards { csv }) => match run_import(&mut persistence, &csv) {
            Ok(imported) => {
                info!(imported, "Board import finished");
            }
            Err(e) => {
                error!(error = %e, "Board import failed");
                std::process::exit(1);
            }
        },
        Some(Command::CreateSeason {
            slug,
            name,
            start_date,
            end_date,
            activate,
        }) => {
            match run_create_season(
                &mut persistence,
                &slug,
                &name,
                &start_date,
                end_date.as_deref(),
                activate,
            ) {
                Ok(season_id) => {
                    info!(season_id, slug, activate, "Season created");
                }
                Err(e) => {
                    error!(error = %e, "Season creation failed");
                    std::process::exit(1);
                }
            }
        }
        Some(Command::ImportMissions { json }) => {
            match run_import_missions(&mut persistence, &json) {
                Ok(imported) => {
                    info!(imported, "Mission import finished");
                }
                Err(e) => {
                    error!(error = %e, "Mission import failed");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn run_badges_and_exit(persistence: &mut Persistence, season: Option<&str>, cutoff: u32) -> ! {
    match run_badges(persistence, season, cutoff) {
        Ok(summary) => {
            // The JSON summary is the machine-readable job output.
            match serde_json::to_string(&summary) {
                Ok(json) => println!("{json}"),
                Err(e) => error!(error = %e, "Failed to serialize summary"),
            }
            info!(
                total_updated = summary.total_updated(),
                success = summary.success(),
                "Badge recomputation finished"
            );
            if summary.success() {
                std::process::exit(0);
            }
            std::process::exit(1);
        }
        Err(e) => {
            error!(error = %e, "Badge recomputation failed");
            std::process::exit(1);
        }
    }
}
