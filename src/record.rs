//! The person record and the built-in sample roster

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Fault, Result};

/// One subject with a weight and a height.
///
/// Construction does not validate the height. Degenerate heights surface as a
/// [`Fault::Data`] from [`Person::bmi`], so a dataset with one bad entry can
/// still be summed by weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    name: String,
    /// Weight in kilograms
    weight_kg: u32,
    /// Height in meters
    height_m: f64,
}

impl Person {
    pub fn new(name: impl Into<String>, weight_kg: u32, height_m: f64) -> Self {
        Self {
            name: name.into(),
            weight_kg,
            height_m,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u32 {
        self.weight_kg
    }

    pub fn height(&self) -> f64 {
        self.height_m
    }

    /// Body-mass index, weight / height²
    pub fn bmi(&self) -> Result<f64> {
        if !self.height_m.is_finite() || self.height_m <= 0.0 {
            return Err(Fault::data(
                &self.name,
                format!("cannot derive BMI from height {}m", self.height_m),
            ));
        }
        Ok(self.weight_kg as f64 / (self.height_m * self.height_m))
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}kg, {:.2}m)", self.name, self.weight_kg, self.height_m)
    }
}

/// The five-person roster used by the demo command
pub fn sample_roster() -> Vec<Person> {
    vec![
        Person::new("Dirk", 110, 1.90),
        Person::new("Piet", 75, 1.73),
        Person::new("Kees", 93, 1.80),
        Person::new("Bubba", 140, 1.75),
        Person::new("Tweety", 45, 1.65),
    ]
}

/// Load a list of people from a JSON, YAML or TOML file.
///
/// The format follows the file extension. TOML files hold the list under a
/// top-level `people` array since TOML has no bare top-level arrays.
pub fn load_people(path: &Path) -> Result<Vec<Person>> {
    let content = std::fs::read_to_string(path).map_err(|e| Fault::resource(path, e))?;
    let malformed = |reason: String| Fault::Malformed {
        resource: path.to_path_buf(),
        reason,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yml::from_str(&content).map_err(|e| malformed(e.to_string()))
        }
        Some("toml") => {
            #[derive(Deserialize)]
            struct Roster {
                people: Vec<Person>,
            }
            toml::from_str::<Roster>(&content)
                .map(|roster| roster.people)
                .map_err(|e| malformed(e.to_string()))
        }
        _ => serde_json::from_str(&content).map_err(|e| malformed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bmi() {
        let bubba = Person::new("Bubba", 140, 1.75);
        let bmi = bubba.bmi().unwrap();
        assert!((bmi - 45.714).abs() < 0.01);
    }

    #[test]
    fn test_bmi_rejects_degenerate_height() {
        for height in [0.0, -1.7, f64::NAN, f64::INFINITY] {
            let ghost = Person::new("Ghost", 70, height);
            assert!(matches!(ghost.bmi(), Err(Fault::Data { .. })));
        }
    }

    #[test]
    fn test_fields_read_through_accessors() {
        let kees = Person::new("Kees", 93, 1.80);
        assert_eq!(kees.name(), "Kees");
        assert_eq!(kees.weight(), 93);
        assert_eq!(kees.height(), 1.80);
        // Serialized names stay stable for record files
        let json = serde_json::to_value(&kees).unwrap();
        assert_eq!(json["weight_kg"], 93);
        assert_eq!(json["height_m"], 1.80);
    }

    #[test]
    fn test_sample_roster() {
        let roster = sample_roster();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster[4].name(), "Tweety");
    }

    #[test]
    fn test_load_people_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("people.json");
        std::fs::write(
            &json,
            r#"[{"name":"Dirk","weight_kg":110,"height_m":1.9}]"#,
        )
        .unwrap();
        assert_eq!(load_people(&json).unwrap(), vec![Person::new("Dirk", 110, 1.9)]);

        let yaml = dir.path().join("people.yaml");
        let mut file = std::fs::File::create(&yaml).unwrap();
        writeln!(file, "- name: Piet\n  weight_kg: 75\n  height_m: 1.73").unwrap();
        assert_eq!(load_people(&yaml).unwrap(), vec![Person::new("Piet", 75, 1.73)]);
    }

    #[test]
    fn test_load_people_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.toml");
        std::fs::write(
            &path,
            "[[people]]\nname = \"Kees\"\nweight_kg = 93\nheight_m = 1.8\n",
        )
        .unwrap();
        assert_eq!(load_people(&path).unwrap(), vec![Person::new("Kees", 93, 1.8)]);
    }

    #[test]
    fn test_load_people_missing_file() {
        let err = load_people(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Fault::Resource { .. }));
    }

    #[test]
    fn test_load_people_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_people(&path), Err(Fault::Malformed { .. })));
    }
}
