//! Bundled person registry, relationships, biographies and timeline.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

const SAHABA_JSON: &str = include_str!("../data/sahaba.json");
const RELATIONSHIPS_JSON: &str = include_str!("../data/relationships.json");
const BIOGRAPHIES_JSON: &str = include_str!("../data/biographies.json");
const TIMELINE_JSON: &str = include_str!("../data/timeline.json");

/// Failure to load the bundled data files.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
	#[error("failed to parse {file}: {source}")]
	Parse {
		file: &'static str,
		#[source]
		source: serde_json::Error,
	},
	#[error("person id `{0}` appears more than once in the registry")]
	DuplicatePerson(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Person {
	pub id: String,
	pub name: String,
	/// Category label such as "companion" or "wife".
	#[serde(rename = "type")]
	pub category: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
	/// Companionship.
	Suhbah,
	/// Kinship, optionally qualified by a family type.
	Family,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Relationship {
	pub source: String,
	pub target: String,
	#[serde(rename = "type")]
	pub kind: RelationshipKind,
	#[serde(rename = "familyType", default)]
	pub family_type: Option<String>,
}

impl Relationship {
	/// Text shown on the rendered edge.
	pub fn label(&self) -> String {
		match self.kind {
			RelationshipKind::Suhbah => "Suhbah".into(),
			RelationshipKind::Family => self.family_type.clone().unwrap_or_else(|| "Family".into()),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Biography {
	pub name: String,
	pub title: String,
	pub history: String,
	#[serde(rename = "wikipedia")]
	pub reference_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TimelineEvent {
	pub id: String,
	pub year: i32,
	pub age: u32,
	pub title: String,
	pub description: String,
	pub details: String,
}

#[derive(Deserialize)]
struct SahabaFile {
	sahaba: Vec<Person>,
}

#[derive(Deserialize)]
struct RelationshipsFile {
	relationships: Vec<Relationship>,
}

#[derive(Deserialize)]
struct BiographiesFile {
	biographies: HashMap<String, Biography>,
}

#[derive(Deserialize)]
struct TimelineFile {
	events: Vec<TimelineEvent>,
}

/// Raw JSON documents a [`Dataset`] is built from.
#[derive(Clone, Copy, Debug)]
pub struct DataSources<'a> {
	pub sahaba: &'a str,
	pub relationships: &'a str,
	pub biographies: &'a str,
	pub timeline: &'a str,
}

impl DataSources<'static> {
	/// The documents compiled into the binary.
	pub fn bundled() -> Self {
		Self {
			sahaba: SAHABA_JSON,
			relationships: RELATIONSHIPS_JSON,
			biographies: BIOGRAPHIES_JSON,
			timeline: TIMELINE_JSON,
		}
	}
}

/// Everything the application reads, loaded once per session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
	pub persons: Vec<Person>,
	pub relationships: Vec<Relationship>,
	pub biographies: HashMap<String, Biography>,
	/// Chronological; the slider position indexes into it.
	pub timeline: Vec<TimelineEvent>,
}

fn parse<'a, T: Deserialize<'a>>(file: &'static str, text: &'a str) -> Result<T, DataError> {
	serde_json::from_str(text).map_err(|source| DataError::Parse { file, source })
}

impl Dataset {
	pub fn bundled() -> Result<Self, DataError> {
		Self::from_sources(DataSources::bundled())
	}

	pub fn from_sources(sources: DataSources<'_>) -> Result<Self, DataError> {
		let SahabaFile { sahaba: persons } = parse("sahaba.json", sources.sahaba)?;
		let RelationshipsFile { relationships } =
			parse("relationships.json", sources.relationships)?;
		let BiographiesFile { biographies } = parse("biographies.json", sources.biographies)?;
		let TimelineFile { events: timeline } = parse("timeline.json", sources.timeline)?;

		let mut seen = HashSet::new();
		for person in &persons {
			if !seen.insert(person.id.as_str()) {
				return Err(DataError::DuplicatePerson(person.id.clone()));
			}
		}

		Ok(Self {
			persons,
			relationships,
			biographies,
			timeline,
		})
	}

	pub fn person(&self, id: &str) -> Option<&Person> {
		self.persons.iter().find(|p| p.id == id)
	}

	pub fn biography(&self, id: &str) -> Option<&Biography> {
		self.biographies.get(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn sources<'a>(sahaba: &'a str, relationships: &'a str) -> DataSources<'a> {
		DataSources {
			sahaba,
			relationships,
			biographies: r#"{ "biographies": {} }"#,
			timeline: r#"{ "events": [] }"#,
		}
	}

	#[test]
	fn bundled_data_loads() {
		let dataset = Dataset::bundled().unwrap();
		assert!(dataset.person("prophet").is_some());
		assert!(!dataset.relationships.is_empty());
		assert!(dataset.biography("prophet").is_some());
		assert!(!dataset.timeline.is_empty());
	}

	#[test]
	fn bundled_relationships_reference_known_persons() {
		let dataset = Dataset::bundled().unwrap();
		for rel in &dataset.relationships {
			assert!(dataset.person(&rel.source).is_some(), "unknown source {}", rel.source);
			assert!(dataset.person(&rel.target).is_some(), "unknown target {}", rel.target);
		}
	}

	#[test]
	fn bundled_timeline_is_chronological() {
		let dataset = Dataset::bundled().unwrap();
		assert!(dataset.timeline.windows(2).all(|w| w[0].year <= w[1].year));
	}

	#[test]
	fn parses_relationship_kinds_and_family_type() {
		let dataset = Dataset::from_sources(sources(
			r#"{ "sahaba": [ { "id": "a", "name": "A", "type": "companion" } ] }"#,
			r#"{ "relationships": [
				{ "source": "a", "target": "b", "type": "suhbah" },
				{ "source": "a", "target": "c", "type": "family", "familyType": "spouse" },
				{ "source": "a", "target": "d", "type": "family" }
			] }"#,
		))
		.unwrap();

		let kinds: Vec<_> = dataset.relationships.iter().map(|r| r.kind).collect();
		assert_eq!(
			kinds,
			vec![RelationshipKind::Suhbah, RelationshipKind::Family, RelationshipKind::Family]
		);
		let labels: Vec<_> = dataset.relationships.iter().map(Relationship::label).collect();
		assert_eq!(labels, vec!["Suhbah", "spouse", "Family"]);
		assert_eq!(dataset.persons[0].category, "companion");
	}

	#[test]
	fn reports_the_file_that_failed() {
		let err = Dataset::from_sources(sources(
			r#"{ "sahaba": [] }"#,
			r#"{ "relationships": [ { "source": "a", "target": "b", "type": "rivalry" } ] }"#,
		))
		.unwrap_err();
		assert!(matches!(err, DataError::Parse { file: "relationships.json", .. }));
	}

	#[test]
	fn rejects_duplicate_person_ids() {
		let err = Dataset::from_sources(sources(
			r#"{ "sahaba": [
				{ "id": "a", "name": "A", "type": "companion" },
				{ "id": "a", "name": "A again", "type": "companion" }
			] }"#,
			r#"{ "relationships": [] }"#,
		))
		.unwrap_err();
		assert!(matches!(err, DataError::DuplicatePerson(id) if id == "a"));
	}
}
