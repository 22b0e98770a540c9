//! Workout plans keyed by body shape.
//!
//! The built-in table is static data kept apart from the classifier so it
//! can be edited (or replaced by a TOML file) without touching the rules.

use crate::{BodyShape, Error, Exercise, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<WorkoutCatalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static WorkoutCatalog {
    &DEFAULT_CATALOG
}

/// Mapping from body shape to an ordered exercise list
#[derive(Clone, Debug, Default)]
pub struct WorkoutCatalog {
    plans: HashMap<BodyShape, Vec<Exercise>>,
}

/// On-disk catalog format
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    plans: Vec<PlanEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PlanEntry {
    shape: BodyShape,
    exercises: Vec<Exercise>,
}

/// Builds the built-in catalog
pub fn build_default_catalog() -> WorkoutCatalog {
    let mut plans = HashMap::new();

    plans.insert(
        BodyShape::Hourglass,
        vec![
            Exercise::new("Squat", "3", "10-12", "Squat.gif"),
            Exercise::new("Hip Thrust", "3", "10-12", "Hip Thrust.gif"),
            Exercise::new("Push-up", "3", "8-12", "Push-up.gif"),
            Exercise::new("Plank", "3", "30-45 วินาที", "Plank.gif"),
            Exercise::new("เดินเร็ว", "-", "15-20 นาที", "Walk.gif"),
        ],
    );

    plans.insert(
        BodyShape::InvertedTriangle,
        vec![
            Exercise::new("Shoulder Press", "4", "10-12", "Shoulder Press.gif"),
            Exercise::new("Lateral Raise", "3", "12-15", "Lateral Raise.gif"),
            Exercise::new("Glute Bridge", "3", "12-15", "Glute Bridge.gif"),
            Exercise::new("Step-up", "3", "10/ข้าง", "Step-up.gif"),
            Exercise::new("เดินชัน", "-", "20 นาที", "เดินชัน.gif"),
        ],
    );

    plans.insert(
        BodyShape::Rectangle,
        vec![
            Exercise::new("Hip Thrust", "4", "8-12", "Hip Thrust.gif"),
            Exercise::new("Romanian Deadlift", "3", "8-12", "Romanian Dead.gif"),
            Exercise::new("Lateral Raise", "3", "12-15", "Lateral Raise.gif"),
            Exercise::new("Russian Twist", "3", "12-16", "Russian Twist.gif"),
            Exercise::new("Walk", "-", "15-20 นาที", "Walk.gif"),
        ],
    );

    plans.insert(
        BodyShape::UpperTriangle,
        vec![
            Exercise::new("Squat", "4", "8-12", "squat.gif"),
            Exercise::new("Hip Thrust", "4", "10-12", "Hip Thrust.gif"),
            Exercise::new("Bulgarian Split Squat", "3", "8/ข้าง", "Bulgarian Split Squat.gif"),
            Exercise::new("Side Plank", "3", "25-40 วินาที", "Side Plank.gif"),
            Exercise::new("เดินชันเบา", "-", "15 นาที", "เดินชัน.gif"),
        ],
    );

    plans.insert(
        BodyShape::Apple,
        vec![
            Exercise::new("Walk", "-", "20-30 นาที", "Walk.gif"),
            Exercise::new("Lat Pulldown", "3", "12-15", "Lat Pulldown.gif"),
            Exercise::new("Dead Bug", "3", "10-12", "Dead Bug.gif"),
            Exercise::new("Plank (เข่า)", "3", "20-30 วินาที", "Knee Plank .JPG"),
            Exercise::new("Glute Bridge", "3", "12-15", "Glute Bridge.gif"),
        ],
    );

    WorkoutCatalog { plans }
}

impl WorkoutCatalog {
    /// Workout plan for a shape; empty for `Undefined` or unmapped shapes
    pub fn plan_for(&self, shape: BodyShape) -> &[Exercise] {
        if shape == BodyShape::Undefined {
            return &[];
        }
        self.plans.get(&shape).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of shapes with a plan
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Load a catalog from a TOML file and validate it
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let file: CatalogFile = toml::from_str(&contents)?;

        let mut plans = HashMap::new();
        for entry in file.plans {
            if plans.insert(entry.shape, entry.exercises).is_some() {
                return Err(Error::CatalogValidation(format!(
                    "duplicate plan for shape '{}'",
                    entry.shape
                )));
            }
        }

        let catalog = WorkoutCatalog { plans };
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }

        tracing::info!("Loaded workout catalog from {:?}", path);
        Ok(catalog)
    }

    /// Use the catalog file at `path` if given, otherwise the built-in one
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(get_default_catalog().clone()),
        }
    }

    /// Write the catalog as TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let plans = BodyShape::CLASSIFIED
            .iter()
            .filter_map(|shape| {
                self.plans.get(shape).map(|exercises| PlanEntry {
                    shape: *shape,
                    exercises: exercises.clone(),
                })
            })
            .collect();

        let contents = toml::to_string_pretty(&CatalogFile { plans })
            .map_err(|e| Error::Config(format!("Failed to serialize catalog: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for shape in BodyShape::CLASSIFIED {
            match self.plans.get(&shape) {
                None => errors.push(format!("No plan for shape '{}'", shape)),
                Some(exercises) if exercises.is_empty() => {
                    errors.push(format!("Plan for shape '{}' is empty", shape))
                }
                Some(_) => {}
            }
        }

        if self.plans.contains_key(&BodyShape::Undefined) {
            errors.push("Shape 'undefined' must not have a plan".to_string());
        }

        for (shape, exercises) in &self.plans {
            for (i, exercise) in exercises.iter().enumerate() {
                if exercise.name.trim().is_empty() {
                    errors.push(format!("Plan '{}' exercise {} has empty name", shape, i + 1));
                }
                if exercise.image.trim().is_empty() {
                    errors.push(format!(
                        "Plan '{}' exercise '{}' has empty image",
                        shape, exercise.name
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_five_exercises() {
        let catalog = get_default_catalog();
        assert_eq!(catalog.len(), 5);
        for shape in BodyShape::CLASSIFIED {
            assert_eq!(catalog.plan_for(shape).len(), 5, "shape {}", shape);
        }
    }

    #[test]
    fn test_undefined_has_empty_plan() {
        assert!(get_default_catalog().plan_for(BodyShape::Undefined).is_empty());
        assert!(WorkoutCatalog::default()
            .plan_for(BodyShape::Apple)
            .is_empty());
    }

    #[test]
    fn test_plan_order_is_preserved() {
        let plan = get_default_catalog().plan_for(BodyShape::Apple);
        let names: Vec<_> = plan.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Walk", "Lat Pulldown", "Dead Bug", "Plank (เข่า)", "Glute Bridge"]
        );
        assert_eq!(plan[0].sets, "-");
        assert_eq!(plan[3].image, "Knee Plank .JPG");
    }

    #[test]
    fn test_default_catalog_validates() {
        let errors = build_default_catalog().validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_catalog_file_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plans.toml");

        build_default_catalog().save_to(&path).unwrap();
        let loaded = WorkoutCatalog::load_from(&path).unwrap();

        for shape in BodyShape::CLASSIFIED {
            assert_eq!(
                loaded.plan_for(shape),
                get_default_catalog().plan_for(shape)
            );
        }
    }

    #[test]
    fn test_incomplete_catalog_file_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plans.toml");
        std::fs::write(
            &path,
            r#"
[[plans]]
shape = "apple"

[[plans.exercises]]
name = "Walk"
sets = "-"
reps = "30 นาที"
image = "Walk.gif"
"#,
        )
        .unwrap();

        let result = WorkoutCatalog::load_from(&path);
        assert!(matches!(result, Err(Error::CatalogValidation(_))));
    }

    #[test]
    fn test_resolve_without_path_uses_default() {
        let catalog = WorkoutCatalog::resolve(None).unwrap();
        assert_eq!(
            catalog.plan_for(BodyShape::Rectangle)[1].name,
            "Romanian Deadlift"
        );
    }
}
