mod common;

use common::{id, started};
use countyforge::content::{derive_display_content, ContentProvider, Roster};
use countyforge::types::{Difficulty, GameMode, Region};
use rstest::rstest;
use std::io::Write;

#[rstest]
#[case(Region::BayArea, 9)]
#[case(Region::CentralCoast, 5)]
#[case(Region::CentralValley, 16)]
#[case(Region::Southern, 8)]
#[case(Region::Northern, 20)]
fn test_region_sizes(#[case] region: Region, #[case] expected: usize) {
    let roster = Roster::california().unwrap();
    assert_eq!(roster.ids_in(Some(region)).len(), expected);
}

#[rstest]
#[case("los-angeles", "Los Angeles", Region::Southern)]
#[case("san-francisco", "San Francisco", Region::BayArea)]
#[case("fresno", "Fresno", Region::CentralValley)]
#[case("monterey", "Salinas", Region::CentralCoast)]
#[case("modoc", "Alturas", Region::Northern)]
fn test_county_seats(#[case] county: &str, #[case] seat: &str, #[case] region: Region) {
    let roster = Roster::california().unwrap();
    let record = roster.county(&id(county)).unwrap();
    assert_eq!(record.county_seat, seat);
    assert_eq!(record.region, region);
}

#[test]
fn test_load_from_csv_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "id,name,region,county_seat,memory_aid").unwrap();
    writeln!(file, "alpha,Alpha,northern,A Town,Think of the letter A").unwrap();
    writeln!(file, "beta,Beta,southern,B Town,").unwrap();
    writeln!(file, "gamma,Gamma,somewhere,G Town,").unwrap();

    let roster = Roster::load_from_csv(file.path()).unwrap();
    assert_eq!(roster.ids_in(None), vec![id("alpha"), id("beta")]);
    assert_eq!(
        roster.county(&id("alpha")).unwrap().memory_aid.as_deref(),
        Some("Think of the letter A")
    );
}

#[test]
fn test_display_follows_selection() {
    let roster = Roster::california().unwrap();
    let mut m = started(
        roster.ids_in(Some(Region::BayArea)),
        GameMode::Timed,
        Difficulty::Medium,
    );
    m.update_timer(100.0);

    let view = derive_display_content(m.state(), &roster);
    assert_eq!(view.phase, "active");
    assert_eq!(view.current.as_ref().unwrap().name, "Alameda");
    assert_eq!(view.current.as_ref().unwrap().county_seat, "Oakland");
    assert!(view.memory_aid.as_deref().unwrap().contains("Oakland"));
    assert_eq!(view.time_remaining_seconds, Some(200.0));
    assert_eq!(view.total, 9);
    assert_eq!(view.hints_remaining, 3);

    m.select_county(Some(id("marin")));
    m.highlight_county(Some(id("napa")));
    let view = derive_display_content(m.state(), &roster);
    assert_eq!(view.selected.as_ref().unwrap().name, "Marin");
    assert_eq!(view.highlighted.as_ref().unwrap().region, "Bay Area");
    assert!(view.memory_aid.as_deref().unwrap().contains("Golden Gate"));

    m.toggle_hints();
    assert_eq!(derive_display_content(m.state(), &roster).memory_aid, None);
}

#[test]
fn test_display_is_pure() {
    let roster = Roster::california().unwrap();
    let m = started(roster.ids_in(None), GameMode::Practice, Difficulty::Easy);
    let a = derive_display_content(m.state(), &roster);
    let b = derive_display_content(m.state(), &roster);
    assert_eq!(a, b);
    assert_eq!(a.progress_percent, 0);
    assert_eq!(a.total, 58);
}
