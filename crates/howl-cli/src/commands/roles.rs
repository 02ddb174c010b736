use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use howl_core::{Character, Team};

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Role", "Team", "Ability"]);

    for character in Character::ALL {
        let team = match character.team() {
            Team::Good => "good".green(),
            Team::Evil => "evil".red(),
            Team::Neutral => "neutral".blue(),
        };
        table.add_row(vec![
            character.label().to_string(),
            team.to_string(),
            character.ability().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} roles", Character::ALL.len());

    Ok(())
}
