use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use countyforge::career::{CareerUpdate, LeaderboardEntry, PlayerStats};
use countyforge::content::DisplayModel;
use countyforge::game::{Achievement, GameSummary, Rarity};
use countyforge::scorer::{Grade, ScoreBreakdown, ScoreTier};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::APlus | Grade::A | Grade::BPlus => Color::Green,
        Grade::B | Grade::CPlus | Grade::C => Color::Yellow,
        Grade::D | Grade::F => Color::Red,
    }
}

pub fn print_breakdown(b: &ScoreBreakdown) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Component").add_attribute(Attribute::Bold),
        Cell::new("Points").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![Cell::new("Base"), Cell::new(b.base_score)]);
    table.add_row(vec![Cell::new("Time bonus"), Cell::new(b.time_bonus)]);
    table.add_row(vec![Cell::new("Accuracy bonus"), Cell::new(b.accuracy_bonus)]);
    table.add_row(vec![
        Cell::new("Perfect game"),
        Cell::new(b.perfect_bonus).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Hints"),
        Cell::new(format!("-{}", b.hints_penalty)).fg(Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Mistakes"),
        Cell::new(format!("-{}", b.mistakes_penalty)).fg(Color::Red),
    ]);
    table.add_row(vec![Cell::new("Subtotal"), Cell::new(b.subtotal)]);
    table.add_row(vec![
        Cell::new("Multiplier"),
        Cell::new(format!("x{:.2}", b.difficulty_multiplier)),
    ]);
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(b.total_score)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 1..=1);

    println!("\n{}", table);
}

pub fn print_ratings(accuracy_percent: u8, grade: Grade, tier: ScoreTier, max_possible: u64) {
    let mut table = new_table();
    table.set_header(vec!["Accuracy", "Grade", "Tier", "Max possible"]);
    table.add_row(vec![
        Cell::new(format!("{}%", accuracy_percent)),
        Cell::new(grade).fg(grade_color(grade)),
        Cell::new(tier),
        Cell::new(max_possible),
    ]);
    right_align(&mut table, 0..=3);
    println!("{}", table);
}

pub fn print_summary(s: &GameSummary) {
    print_breakdown(&s.breakdown);

    let mut table = new_table();
    table.set_header(vec![
        "Mode",
        "Difficulty",
        "Placed",
        "Best streak",
        "Hints",
        "Time (s)",
        "Running",
        "Leaderboard",
    ]);
    table.add_row(vec![
        Cell::new(s.mode),
        Cell::new(s.difficulty),
        Cell::new(format!("{}/{}", s.counties_placed, s.counties_total)),
        Cell::new(s.best_streak),
        Cell::new(s.hints_used),
        Cell::new(format!("{:.1}", s.time_elapsed_seconds)),
        Cell::new(s.running_score),
        Cell::new(s.leaderboard_score).fg(Color::Cyan),
    ]);
    right_align(&mut table, 2..=7);
    println!("{}", table);

    print_ratings(s.accuracy_percent, s.grade, s.tier, s.max_possible_score);
    if !s.completed {
        println!("(game still in progress)");
    }
}

pub fn print_display(d: &DisplayModel) {
    let mut table = new_table();
    table.set_header(vec!["", "County", "Region", "Seat"]);

    let slots = [
        ("Current", &d.current),
        ("Selected", &d.selected),
        ("Highlighted", &d.highlighted),
    ];
    let mut shown = 0;
    for (label, card) in slots {
        let Some(card) = card else { continue };
        shown += 1;
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(&card.name),
            Cell::new(&card.region),
            Cell::new(&card.county_seat),
        ]);
    }

    println!(
        "\nPhase: {}  |  Progress: {}/{} ({}%)  |  Score: {}  |  Hints left: {}",
        d.phase, d.placed, d.total, d.progress_percent, d.score, d.hints_remaining
    );
    if let Some(remaining) = d.time_remaining_seconds {
        println!("Time left: {:.0}s", remaining);
    }
    if shown > 0 {
        println!("{}", table);
    }
    if let Some(aid) = &d.memory_aid {
        println!("Memory aid: {}", aid);
    }
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::White,
        Rarity::Rare => Color::Blue,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::Yellow,
    }
}

pub fn print_achievements<'a>(title: &str, achievements: impl IntoIterator<Item = &'a Achievement>) {
    let mut table = new_table();
    table.set_header(vec!["Achievement", "Rarity", "Points", "Description"]);
    let mut shown = 0;
    for &a in achievements {
        shown += 1;
        table.add_row(vec![
            Cell::new(a.title()).add_attribute(Attribute::Bold),
            Cell::new(a.rarity()).fg(rarity_color(a.rarity())),
            Cell::new(a.points()),
            Cell::new(a.description()),
        ]);
    }
    if shown == 0 {
        return;
    }
    right_align(&mut table, 2..=2);
    println!("\n{}", title);
    println!("{}", table);
}

pub fn print_career_update(update: &CareerUpdate) {
    print_achievements("Unlocked", &update.newly_unlocked);
    match (update.qualified, update.rank) {
        (true, Some(rank)) => println!("Leaderboard rank: #{}", rank),
        (true, None) => println!("Qualified, but below the leaderboard cut"),
        (false, _) => println!("Not qualified for the leaderboard"),
    }
    println!(
        "Games played: {}  |  Best score: {}  |  Counties learned: {}",
        update.stats.games_played,
        update.stats.best_score,
        update.stats.counties_learned.len()
    );
}

pub fn print_player_stats(stats: &PlayerStats) {
    let mut table = new_table();
    table.set_header(vec![
        "Games",
        "Total score",
        "Average",
        "Best",
        "Longest streak",
        "Play time (s)",
        "Counties learned",
        "Achievement points",
    ]);
    table.add_row(vec![
        Cell::new(stats.games_played),
        Cell::new(stats.total_score),
        Cell::new(stats.average_score()),
        Cell::new(stats.best_score).fg(Color::Cyan),
        Cell::new(stats.longest_streak),
        Cell::new(format!("{:.0}", stats.total_play_seconds)),
        Cell::new(stats.counties_learned.len()),
        Cell::new(stats.achievement_points()),
    ]);
    right_align(&mut table, 0..=7);
    println!("\n{}", table);
    print_achievements("Achievements", stats.achievements.keys());
}

pub fn print_leaderboard(entries: &[&LeaderboardEntry]) {
    if entries.is_empty() {
        println!("Leaderboard is empty");
        return;
    }
    let mut table = new_table();
    table.set_header(vec![
        "#", "Player", "Rating", "Score", "Accuracy", "Time (s)", "Difficulty", "Tier",
    ]);
    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&e.player_name),
            Cell::new(e.leaderboard_score).fg(Color::Cyan),
            Cell::new(e.score),
            Cell::new(format!("{:.0}%", e.accuracy * 100.0)),
            Cell::new(format!("{:.1}", e.time_seconds)),
            Cell::new(e.difficulty),
            Cell::new(e.tier),
        ]);
    }
    right_align(&mut table, 0..=0);
    right_align(&mut table, 2..=5);
    println!("\n{}", table);
}
