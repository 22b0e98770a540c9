//! Core domain types for the body-shape analyzer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Measurement input (anthropometrics, gender, activity level)
//! - Derived labels (BMI band, body shape)
//! - Workout exercises
//! - Analysis results and the persisted record

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Measurement Types
// ============================================================================

/// Biological sex as recorded on the measurement form
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    #[default]
    Female,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(Error::InvalidInput(format!("unknown gender '{}'", other))),
        }
    }
}

/// Weekly activity level
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl FromStr for ActivityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "lightly" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" | "very" => Ok(ActivityLevel::VeryActive),
            "extra_active" | "extra" => Ok(ActivityLevel::ExtraActive),
            other => Err(Error::InvalidInput(format!(
                "unknown activity level '{}'",
                other
            ))),
        }
    }
}

/// Anthropometric measurements submitted for one analysis
///
/// Lengths are in centimetres, weight in kilograms.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    pub bust: f64,
    pub waist: f64,
    pub hip: f64,
}

// ============================================================================
// Derived Labels
// ============================================================================

/// BMI band (Asian/Thai clinical cut-offs)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiStatus {
    Underweight,
    Normal,
    Overweight,
    #[serde(rename = "obese_1")]
    Obese1,
    #[serde(rename = "obese_2")]
    Obese2,
}

impl BmiStatus {
    /// Display label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "น้ำหนักต่ำกว่าเกณฑ์",
            BmiStatus::Normal => "สมส่วน",
            BmiStatus::Overweight => "น้ำหนักเกิน",
            BmiStatus::Obese1 => "อ้วนระดับ 1",
            BmiStatus::Obese2 => "อ้วนระดับ 2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "underweight",
            BmiStatus::Normal => "normal",
            BmiStatus::Overweight => "overweight",
            BmiStatus::Obese1 => "obese_1",
            BmiStatus::Obese2 => "obese_2",
        }
    }
}

impl fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Prefix shared by every body-shape display label
const SHAPE_LABEL_PREFIX: &str = "หุ่น";

/// Silhouette classification
///
/// `InvertedTriangle` is the broader-hip ("pear") silhouette and
/// `UpperTriangle` the broader-bust one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    Hourglass,
    InvertedTriangle,
    Rectangle,
    UpperTriangle,
    Apple,
    Undefined,
}

impl BodyShape {
    /// The five shapes the classifier can produce
    pub const CLASSIFIED: [BodyShape; 5] = [
        BodyShape::Hourglass,
        BodyShape::InvertedTriangle,
        BodyShape::Rectangle,
        BodyShape::UpperTriangle,
        BodyShape::Apple,
    ];

    /// Display label shown to users (empty for `Undefined`)
    pub fn label(&self) -> &'static str {
        match self {
            BodyShape::Hourglass => "หุ่นนาฬิกาทราย",
            BodyShape::InvertedTriangle => "หุ่นสามเหลี่ยมล่าง",
            BodyShape::Rectangle => "หุ่นทรงกระบอก",
            BodyShape::UpperTriangle => "หุ่นสามเหลี่ยมบน",
            BodyShape::Apple => "หุ่นแอปเปิ้ล",
            BodyShape::Undefined => "",
        }
    }

    /// Asset folder holding this shape's exercise images
    pub fn image_folder(&self) -> &'static str {
        let label = self.label();
        label.strip_prefix(SHAPE_LABEL_PREFIX).unwrap_or(label)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyShape::Hourglass => "hourglass",
            BodyShape::InvertedTriangle => "inverted_triangle",
            BodyShape::Rectangle => "rectangle",
            BodyShape::UpperTriangle => "upper_triangle",
            BodyShape::Apple => "apple",
            BodyShape::Undefined => "undefined",
        }
    }
}

impl fmt::Display for BodyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BodyShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        BodyShape::CLASSIFIED
            .iter()
            .chain(std::iter::once(&BodyShape::Undefined))
            .find(|shape| shape.as_str() == wanted || shape.label() == s.trim())
            .copied()
            .ok_or_else(|| Error::InvalidInput(format!("unknown body shape '{}'", s)))
    }
}

// ============================================================================
// Workout Types
// ============================================================================

/// One entry of a workout plan
///
/// `sets` is `-` for continuous activities such as walking; `reps` is
/// free-form (ranges, per-side counts, durations).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub image: String,
}

impl Exercise {
    pub fn new(name: &str, sets: &str, reps: &str, image: &str) -> Self {
        Self {
            name: name.into(),
            sets: sets.into(),
            reps: reps.into(),
            image: image.into(),
        }
    }
}

// ============================================================================
// Result and Record Types
// ============================================================================

/// Everything derived from a `Measurement`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub bmi: f64,
    pub bmi_status: BmiStatus,
    pub whr: f64,
    pub body_shape: BodyShape,
    pub workout_plan: Vec<Exercise>,
}

/// A persisted analysis: created once at submission, never updated
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub measurement: Measurement,
    pub result: AnalysisResult,
}

impl AnalysisRecord {
    /// Wrap a freshly computed result for storage
    pub fn new(user: impl Into<String>, measurement: Measurement, result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user: user.into(),
            created_at: Utc::now(),
            measurement,
            result,
        }
    }

    /// Path of an exercise image relative to the asset root
    pub fn image_path(&self, exercise: &Exercise) -> String {
        format!("{}/{}", self.result.body_shape.image_folder(), exercise.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gender() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("F".parse::<Gender>().unwrap(), Gender::Female);
        assert!("x".parse::<Gender>().is_err());
    }

    #[test]
    fn test_parse_activity_levels() {
        assert_eq!(
            "SEDENTARY".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::Sedentary
        );
        assert_eq!(
            "lightly".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::LightlyActive
        );
        assert_eq!(
            "moderately-active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert_eq!(
            "VERY".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        assert_eq!(
            "extra_active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ExtraActive
        );
        assert!(matches!(
            "couch".parse::<ActivityLevel>(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_image_folder_strips_prefix() {
        assert_eq!(BodyShape::Hourglass.image_folder(), "นาฬิกาทราย");
        assert_eq!(BodyShape::Apple.image_folder(), "แอปเปิ้ล");
        assert_eq!(BodyShape::Undefined.image_folder(), "");
    }

    #[test]
    fn test_body_shape_parses_code_and_label() {
        assert_eq!(
            "inverted_triangle".parse::<BodyShape>().unwrap(),
            BodyShape::InvertedTriangle
        );
        assert_eq!(
            "หุ่นทรงกระบอก".parse::<BodyShape>().unwrap(),
            BodyShape::Rectangle
        );
        assert!("banana".parse::<BodyShape>().is_err());
    }

    #[test]
    fn test_bmi_status_serde_names() {
        let json = serde_json::to_string(&BmiStatus::Obese1).unwrap();
        assert_eq!(json, "\"obese_1\"");
        let parsed: BmiStatus = serde_json::from_str("\"obese_2\"").unwrap();
        assert_eq!(parsed, BmiStatus::Obese2);
    }

    #[test]
    fn test_measurement_defaults_gender_and_activity() {
        let json = r#"{"age":30,"weight":60.0,"height":165.0,"bust":88.0,"waist":70.0,"hip":95.0}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!(m.gender, Gender::Female);
        assert_eq!(m.activity_level, ActivityLevel::Sedentary);
    }
}
