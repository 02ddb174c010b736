use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use howl_core::{Action, Team};
use howl_rules::{ActionResult, VictoryResult};
use howl_session::GameSession;

pub fn run(path: &Path, seed: Option<u64>, verbose: bool) -> Result<(), String> {
    let scenario = super::load_scenario(path)?;
    let mut session = super::build_session(&scenario, seed)?;

    println!(
        "  {} {}",
        "Howl".bold(),
        format!(
            "({} players, seed={})",
            scenario.players.len(),
            session.state().config.seed
        )
        .dimmed()
    );
    println!();

    for round in &scenario.rounds {
        session.begin_night().map_err(|e| e.to_string())?;
        let night = session.state().night;
        println!("  {}", format!("Night {night}").bold().underline());
        let report = session
            .resolve_night(&round.night)
            .map_err(|e| e.to_string())?;
        print_result(&session, &report.result, verbose);
        if session.is_over() {
            break;
        }
        fire_shots(&mut session, &round.night_shots, verbose)?;
        if session.is_over() {
            break;
        }
        println!();

        session.begin_day().map_err(|e| e.to_string())?;
        let day = session.state().day;
        println!("  {}", format!("Day {day}").bold().underline());
        let report = session.vote(&round.votes).map_err(|e| e.to_string())?;
        if !report.vote.counts.is_empty() {
            let tally: Vec<String> = report
                .vote
                .counts
                .iter()
                .map(|(id, n)| format!("{}: {n}", name(&session, *id)))
                .collect();
            println!("  Votes  {}", tally.join(", ").dimmed());
        }
        if report.vote.tied {
            println!("  {}", "The vote was tied.".yellow());
        }
        if report.expelled.is_none() {
            println!("  Nobody was expelled.");
        }
        for message in &report.messages {
            println!("  {}  {message}", "DEATH".red().bold());
        }
        if session.is_over() {
            break;
        }
        fire_shots(&mut session, &round.day_shots, verbose)?;
        if session.is_over() {
            break;
        }
        println!();
    }

    println!();
    print_roster(&session);
    println!();
    match session.victory() {
        Some(v) if v.has_winner => print_victory(&session, v),
        _ => println!(
            "  {} after {} rounds.",
            "No winner yet".yellow().bold(),
            scenario.rounds.len()
        ),
    }
    if verbose {
        println!();
        print!("{}", session.journal().export_text());
    }
    Ok(())
}

/// Fire the scripted shots, then waive any the script left out.
fn fire_shots(session: &mut GameSession, shots: &[Action], verbose: bool) -> Result<(), String> {
    for shot in shots {
        let report = session
            .resolve_shot(shot.clone())
            .map_err(|e| e.to_string())?;
        println!(
            "  {} {} fires a last shot.",
            "SHOT".magenta().bold(),
            name(session, report.hunter)
        );
        print_result(session, &report.result, verbose);
        if session.is_over() {
            return Ok(());
        }
    }
    for hunter in session.pending_shots().to_vec() {
        println!("  {} holds their fire.", name(session, hunter));
        session.waive_shot(hunter).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn print_result(session: &GameSession, result: &ActionResult, verbose: bool) {
    if result.messages.is_empty() {
        println!("  {}", "Nothing happened.".dimmed());
    }
    for message in &result.messages {
        println!("  {message}");
    }
    if verbose {
        for (investigator, finding) in &result.investigations {
            println!(
                "  {} {} learns: {finding}",
                "PRIVATE".cyan(),
                name(session, *investigator)
            );
        }
        for event in result.events.iter().filter(|e| !e.is_public()) {
            println!("  {} {event}", "PRIVATE".cyan());
        }
    }
}

fn print_roster(session: &GameSession) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Role", "Team", "Status"]);

    for p in session.state().players.iter() {
        let role = match p.original_character {
            Some(original) => format!("{} (was {original})", p.character),
            None => p.character.to_string(),
        };
        let mut status = vec![if p.is_alive { "alive" } else { "dead" }.to_string()];
        if p.is_in_love() {
            status.push("in love".into());
        }
        if p.blood_bond_partner.is_some() {
            status.push("blood-bound".into());
        }
        if p.is_infected {
            status.push("infected".into());
        }
        table.add_row(vec![
            p.id.0.to_string(),
            p.name.clone(),
            role,
            p.team.to_string(),
            status.join(", "),
        ]);
    }
    println!("{table}");
}

fn print_victory(session: &GameSession, victory: &VictoryResult) {
    let team = match victory.winning_team {
        Some(Team::Good) => "Good".green().bold(),
        Some(Team::Evil) => "Evil".red().bold(),
        Some(Team::Neutral) => "Neutral".blue().bold(),
        None => "Nobody".normal(),
    };
    println!("  {}", victory.reason.to_string().bold());
    let winners: Vec<String> = victory.winners.iter().map(|id| name(session, *id)).collect();
    println!("  Winner: {team}  ({})", winners.join(", "));
}

fn name(session: &GameSession, id: howl_core::PlayerId) -> String {
    session
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}
