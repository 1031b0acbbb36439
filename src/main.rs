use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, anyhow};

use fixture_stats::aggregate::LeagueFilter;
use fixture_stats::config::{self, Config};
use fixture_stats::export;
use fixture_stats::record::{EnrichedMatch, format_goals};
use fixture_stats::report::{self, Report};
use fixture_stats::sample;
use fixture_stats::source;

const DEMO_SEED: u64 = 2025;

#[derive(Debug, Default)]
struct Args {
    path: Option<PathBuf>,
    demo: Option<Option<usize>>,
    league: Option<String>,
    team: Option<String>,
    top_n: Option<usize>,
    line: Option<f64>,
    xlsx: Option<PathBuf>,
    json: bool,
}

fn main() -> ExitCode {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;
    let cfg = Config::from_env();

    let rows = match (&args.path, args.demo) {
        (Some(path), _) => source::load_rows(path)?,
        (None, Some(count)) => {
            let count = count.unwrap_or(cfg.demo_rows);
            sample::generate_sample_rows(count, DEMO_SEED)
        }
        (None, None) => {
            return Err(anyhow!(
                "usage: fixture_stats [PATH] [--demo[=N]] [--league=L] [--team=T] [--top=N] [--line=X] [--xlsx=PATH] [--json]"
            ));
        }
    };

    let mut options = cfg.report_options();
    if let Some(league) = &args.league {
        options.league = LeagueFilter::from_label(league);
    }
    if let Some(team) = &args.team {
        options.team = Some(team.clone());
    }
    if let Some(top_n) = args.top_n {
        options.top_n = top_n.clamp(1, 50);
    }
    if let Some(line) = args.line {
        options.over_under_line = line;
    }

    let run = report::run_pipeline(&rows, &options);
    for line in &run.logs {
        eprintln!("{line}");
    }

    if args.json {
        println!("{}", export::report_to_json(&run.report)?);
    } else {
        print_report(&run.report);
    }

    if let Some(path) = &args.xlsx {
        let summary = export::export_report_xlsx(path, &run.report)?;
        eprintln!(
            "[INFO] Workbook written to {} ({} matches, {} team rows, {} league rows, {} hours, {} heatmap cells)",
            path.display(),
            summary.matches,
            summary.teams,
            summary.leagues,
            summary.hours,
            summary.heatmap_cells
        );
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Args> {
    let mut out = Args::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        match flag.as_str() {
            "--json" => out.json = true,
            "--demo" => {
                let count = match inline {
                    Some(raw) => Some(
                        raw.trim()
                            .parse::<usize>()
                            .map_err(|_| anyhow!("invalid --demo row count: {raw}"))?
                            .clamp(1, 100_000),
                    ),
                    None => None,
                };
                out.demo = Some(count);
            }
            "--league" => out.league = Some(flag_value(&flag, inline, &mut iter)?),
            "--team" => out.team = Some(flag_value(&flag, inline, &mut iter)?),
            "--top" => {
                let raw = flag_value(&flag, inline, &mut iter)?;
                let n = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid --top value: {raw}"))?;
                out.top_n = Some(n);
            }
            "--line" => {
                let raw = flag_value(&flag, inline, &mut iter)?;
                let line =
                    config::parse_line(&raw).ok_or_else(|| anyhow!("invalid --line value: {raw}"))?;
                out.line = Some(line);
            }
            "--xlsx" => out.xlsx = Some(PathBuf::from(flag_value(&flag, inline, &mut iter)?)),
            other if other.starts_with("--") => return Err(anyhow!("unknown flag {other}")),
            _ => {
                if out.path.is_some() {
                    return Err(anyhow!("more than one input path given"));
                }
                out.path = Some(PathBuf::from(arg));
            }
        }
    }
    Ok(out)
}

fn flag_value(
    flag: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String> {
    inline
        .or_else(|| rest.next())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("{flag} needs a value"))
}

fn print_report(report: &Report) {
    let s = &report.summary;
    println!("Fixture report: {}", report.league);
    println!(
        "Matches: {}  Goals: {}  Avg Goals: {:.2}  Draws: {}",
        s.matches,
        format_goals(s.goals),
        s.avg_goals,
        s.draws
    );
    println!(
        "Home Wins: {}  Away Wins: {}  Clean Sheets: {}  0-0: {}",
        report.outcomes.home_wins,
        report.outcomes.away_wins,
        report.facts.clean_sheets,
        report.facts.goalless_draws
    );
    println!(
        "Over {line}: {}  Under {line}: {}",
        report.over_under.over,
        report.over_under.under,
        line = report.over_under.line
    );

    if s.matches == 0 {
        println!("No data available");
        return;
    }

    println!();
    println!("Highest scoring matches");
    for m in &report.top_scoring {
        println!("  {}", match_line(m));
    }

    println!();
    println!("Biggest goal margins");
    for m in &report.biggest_margins {
        println!("  {} | Diff: {}", match_line(m), format_goals(m.goal_diff));
    }

    println!();
    println!("Top attacking teams (goals scored)");
    for (idx, row) in report.top_attacking.iter().enumerate() {
        println!("  {:>2}. {:<24} {}", idx + 1, row.team, format_goals(row.goals));
    }

    println!();
    println!("Top defensive teams (goals conceded)");
    for (idx, row) in report.top_defensive.iter().enumerate() {
        println!("  {:>2}. {:<24} {}", idx + 1, row.team, format_goals(row.goals));
    }

    println!();
    println!("Goal count distribution");
    for bucket in &report.goal_distribution {
        println!(
            "  {:>4} goals: {}",
            format_goals(bucket.total_goals),
            bucket.matches
        );
    }

    println!();
    println!("Total goals by league");
    for row in &report.goals_by_league {
        println!("  {:<24} {}", row.league, format_goals(row.total_goals));
    }

    println!();
    println!("Most active leagues");
    for row in &report.league_activity {
        println!("  {:<24} {}", row.league, row.matches);
    }

    println!();
    if report.goals_by_hour.is_empty() {
        println!("Match times not parsed.");
    } else {
        println!("Goals by hour");
        for (hour, goals) in &report.goals_by_hour {
            println!("  {hour:02}:00 {}", format_goals(*goals));
        }
    }

    println!();
    println!("Outcomes by league");
    for (league, split) in &report.outcomes_by_league {
        println!(
            "  {:<24} H {}  A {}  D {}",
            league, split.home_wins, split.away_wins, split.draws
        );
    }

    if let Some(team) = &report.team {
        let t = &team.summary;
        println!();
        println!("Team: {}", team.team);
        println!(
            "Matches: {}  Scored: {}  Conceded: {}  W {}  D {}  L {}",
            t.matches,
            format_goals(t.goals_scored),
            format_goals(t.goals_conceded),
            t.wins,
            t.draws,
            t.losses
        );
        for m in &team.matches {
            println!(
                "  {} {:?} vs {:<20} {}-{} {}",
                m.date,
                m.venue,
                m.opponent,
                format_goals(m.scored),
                format_goals(m.conceded),
                m.result.label()
            );
        }
    }
}

fn match_line(m: &EnrichedMatch) -> String {
    format!("{} | {}", m.record.scoreline(), m.record.league)
}
