//! Prompt construction and the line-oriented parser that turns a free-form
//! model completion into an [`AnimalInfo`] record.

use crate::api::models::AnimalInfo;

/// Fields a recognized label can route text into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    BriefSummary,
    InterestingFacts,
    ScientificName,
    PhysicalDescription,
    Habitat,
    Diet,
    SocialStructure,
    ConservationStatus,
    Behavior,
}

/// Recognized labels in match order. Matching is a case-sensitive substring
/// test and the first hit wins, so a line mentioning both "Diet" and
/// "Behavior" belongs to the diet section.
const LABELS: [(&str, Section); 9] = [
    ("Brief Summary", Section::BriefSummary),
    ("Interesting Facts", Section::InterestingFacts),
    ("Scientific Name", Section::ScientificName),
    ("Physical Description", Section::PhysicalDescription),
    ("Habitat", Section::Habitat),
    ("Diet", Section::Diet),
    ("Social Structure", Section::SocialStructure),
    ("Conservation Status", Section::ConservationStatus),
    ("Behavior", Section::Behavior),
];

enum Slot<'a> {
    Text(&'a mut String),
    List(&'a mut Vec<String>),
}

impl Section {
    fn slot(self, info: &mut AnimalInfo) -> Slot<'_> {
        match self {
            Section::BriefSummary => Slot::Text(&mut info.brief_summary),
            Section::InterestingFacts => Slot::List(&mut info.interesting_facts),
            Section::ScientificName => Slot::Text(&mut info.scientific_name),
            Section::PhysicalDescription => Slot::Text(&mut info.physical_description),
            Section::Habitat => Slot::Text(&mut info.habitat),
            Section::Diet => Slot::Text(&mut info.diet),
            Section::SocialStructure => Slot::Text(&mut info.social_structure),
            Section::ConservationStatus => Slot::Text(&mut info.conservation_status),
            Section::Behavior => Slot::Text(&mut info.behavior),
        }
    }
}

pub fn build_prompt(query: &str) -> String {
    format!(
        "Provide a one-line brief summary and three interesting facts about {}. \
         Additionally, provide information in the following categories: \
         Scientific name: Physical description: Habitat: Diet: Social structure: \
         Conservation status: Behavior:.",
        query
    )
}

/// Parses a completion into an [`AnimalInfo`]. Never fails: labels the
/// completion omits leave their fields empty, and lines seen before the
/// first label are dropped. Interesting-fact entries are stored trimmed.
pub fn parse_completion(text: &str) -> AnimalInfo {
    let mut info = AnimalInfo::default();
    let mut current: Option<Section> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(&(label, section)) = LABELS.iter().find(|(label, _)| line.contains(label)) {
            current = Some(section);

            let remainder = line.replace(label, "");
            let remainder = remainder
                .trim_start_matches(|c: char| c == ':' || c == '*' || c.is_whitespace())
                .trim_end();
            if remainder.is_empty() {
                continue;
            }

            let sentence = format!("{}. ", remainder.trim_end_matches('.'));
            match section.slot(&mut info) {
                Slot::Text(field) => field.push_str(&sentence),
                Slot::List(entries) => entries.push(sentence.trim_end().to_string()),
            }
            continue;
        }

        let Some(section) = current else {
            continue;
        };

        let continuation = line.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
        if continuation.is_empty() {
            continue;
        }

        match section.slot(&mut info) {
            Slot::Text(field) => {
                if !field.is_empty() && !field.ends_with(' ') {
                    field.push(' ');
                }
                field.push_str(continuation);
            }
            Slot::List(entries) => entries.push(continuation.to_string()),
        }
    }

    for field in info.scalar_fields_mut() {
        *field = field.replace('*', "").trim().to_string();
    }

    info
}

impl AnimalInfo {
    fn scalar_fields_mut(&mut self) -> [&mut String; 8] {
        [
            &mut self.brief_summary,
            &mut self.scientific_name,
            &mut self.physical_description,
            &mut self.habitat,
            &mut self.diet,
            &mut self.social_structure,
            &mut self.conservation_status,
            &mut self.behavior,
        ]
    }
}
