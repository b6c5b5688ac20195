use crate::error::CfResult;
use crate::game::{GameState, Phase};
use crate::scorer::calculate_accuracy_percent;
use crate::types::{CountyId, Region};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{info, warn};

const CALIFORNIA_CSV: &str = include_str!("../data/counties.csv");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyRecord {
    pub id: CountyId,
    pub name: String,
    pub region: Region,
    pub county_seat: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub memory_aid: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Lookup of per-county display content.
pub trait ContentProvider {
    fn county(&self, id: &CountyId) -> Option<&CountyRecord>;
}

/// The ordered set of counties a session can be built from.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<CountyRecord>,
    index: HashMap<CountyId, usize>,
}

impl Roster {
    /// Keeps the first record of every id.
    pub fn new(records: Vec<CountyRecord>) -> Self {
        let mut roster = Self::default();
        for record in records {
            if roster.index.contains_key(&record.id) {
                warn!(county = %record.id, "duplicate county in roster, keeping the first");
                continue;
            }
            roster.index.insert(record.id.clone(), roster.records.len());
            roster.records.push(record);
        }
        roster
    }

    /// All 58 California counties, bundled with the crate.
    pub fn california() -> CfResult<Self> {
        Self::from_reader(CALIFORNIA_CSV.as_bytes())
    }

    pub fn load_from_csv<P: AsRef<Path>>(path: P) -> CfResult<Self> {
        let file = File::open(path.as_ref())?;
        let roster = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            counties = roster.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    /// Reads `id,name,region,county_seat,memory_aid` rows. Malformed rows are
    /// skipped with a warning; a broken header is an error.
    pub fn from_reader<R: Read>(reader: R) -> CfResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        rdr.headers()?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (row_idx, result) in rdr.deserialize::<CountyRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => {
                    skipped += 1;
                    warn!(row = row_idx + 1, error = %e, "skipping roster row");
                }
            }
        }
        if skipped > 0 {
            warn!(skipped, "some roster rows were invalid");
        }
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CountyRecord] {
        &self.records
    }

    /// Quiz order for a region, or the whole roster.
    pub fn ids_in(&self, region: Option<Region>) -> Vec<CountyId> {
        self.records
            .iter()
            .filter(|r| region.map_or(true, |wanted| r.region == wanted))
            .map(|r| r.id.clone())
            .collect()
    }

    /// Regions whose every county in this roster is placed in `state`.
    pub fn regions_cleared(&self, state: &GameState) -> Vec<Region> {
        Region::iter()
            .filter(|&region| {
                let mut counties = self.records.iter().filter(|r| r.region == region).peekable();
                counties.peek().is_some()
                    && counties.all(|r| state.placed_counties.contains(&r.id))
            })
            .collect()
    }

    /// Same ids as `ids_in`, in a seeded random order.
    pub fn shuffled(&self, region: Option<Region>, seed: u64) -> Vec<CountyId> {
        let mut ids = self.ids_in(region);
        fastrand::Rng::with_seed(seed).shuffle(&mut ids);
        ids
    }
}

impl ContentProvider for Roster {
    fn county(&self, id: &CountyId) -> Option<&CountyRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountyCard {
    pub id: CountyId,
    pub name: String,
    pub region: String,
    pub county_seat: String,
}

impl From<&CountyRecord> for CountyCard {
    fn from(record: &CountyRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            region: record.region.label().to_string(),
            county_seat: record.county_seat.clone(),
        }
    }
}

/// Everything a UI needs to render one frame of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayModel {
    pub phase: String,
    pub current: Option<CountyCard>,
    pub selected: Option<CountyCard>,
    pub highlighted: Option<CountyCard>,
    /// Shown for the selected county, or the current one, while hints are on.
    pub memory_aid: Option<String>,
    pub placed: usize,
    pub total: usize,
    pub progress_percent: u8,
    pub score: u64,
    pub streak: u32,
    pub hints_remaining: u32,
    pub time_remaining_seconds: Option<f64>,
    pub show_hints: bool,
    pub show_labels: bool,
    pub sound_enabled: bool,
}

/// Pure view derivation; call it after every state change.
pub fn derive_display_content(state: &GameState, content: &dyn ContentProvider) -> DisplayModel {
    let card = |id: &Option<CountyId>| {
        id.as_ref()
            .and_then(|id| content.county(id))
            .map(CountyCard::from)
    };

    let memory_aid = if state.show_hints && state.phase() != Phase::Completed {
        state
            .selected_county
            .as_ref()
            .or(state.current_county.as_ref())
            .and_then(|id| content.county(id))
            .and_then(|record| record.memory_aid.clone())
    } else {
        None
    };

    let placed = state.placed_counties.len();
    let total = state.available_counties.len();

    DisplayModel {
        phase: state.phase().to_string(),
        current: card(&state.current_county),
        selected: card(&state.selected_county),
        highlighted: card(&state.highlighted_county),
        memory_aid,
        placed,
        total,
        progress_percent: calculate_accuracy_percent(placed as u32, total as u32),
        score: state.score,
        streak: state.streak,
        hints_remaining: state.hints_remaining(),
        time_remaining_seconds: state.time_remaining_seconds(),
        show_hints: state.show_hints,
        show_labels: state.show_labels,
        sound_enabled: state.sound_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_roster_has_every_county() {
        let roster = Roster::california().unwrap();
        assert_eq!(roster.len(), 58);
        let orange = roster.county(&CountyId::from("orange")).unwrap();
        assert_eq!(orange.county_seat, "Santa Ana");
        assert_eq!(orange.region, Region::Southern);
        assert_eq!(roster.ids_in(Some(Region::BayArea)).len(), 9);
    }

    #[test]
    fn shuffle_is_a_seeded_permutation() {
        let roster = Roster::california().unwrap();
        let a = roster.shuffled(None, 7);
        let b = roster.shuffled(None, 7);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        let mut in_order = roster.ids_in(None);
        in_order.sort();
        assert_eq!(sorted, in_order);
    }

    #[test]
    fn regions_clear_once_every_county_is_placed() {
        let roster = Roster::california().unwrap();
        let mut state = GameState::new(roster.ids_in(None));
        state.placed_counties = roster.ids_in(Some(Region::Southern)).into_iter().collect();
        assert_eq!(roster.regions_cleared(&state), vec![Region::Southern]);

        state.placed_counties.remove(&CountyId::from("orange"));
        assert!(roster.regions_cleared(&state).is_empty());
    }

    #[test]
    fn bad_rows_are_skipped() {
        let csv = "id,name,region,county_seat,memory_aid\n\
                   kern,Kern,central_valley,Bakersfield,\n\
                   atlantis,Atlantis,under_sea,Nowhere,\n\
                   kern,Kern again,southern,Elsewhere,\n";
        let roster = Roster::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.records()[0].memory_aid, None);
        assert_eq!(roster.records()[0].name, "Kern");
    }
}
