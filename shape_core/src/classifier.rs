//! Body-shape classifier.
//!
//! This module turns a `Measurement` into an `AnalysisResult`:
//! - BMI and its clinical band
//! - Waist-to-hip ratio (WHR)
//! - Body shape, from an ordered rule table over WHR with the
//!   bust-to-hip ratio (BHR) breaking ties inside overlapping bands
//!
//! Everything here is pure: identical input always yields an identical result.

use crate::{
    AnalysisResult, BmiStatus, BodyShape, Error, Measurement, Result, WorkoutCatalog,
};

/// Lower bounds (inclusive) of the BMI bands above `Underweight`
const BMI_NORMAL_FROM: f64 = 18.5;
const BMI_OVERWEIGHT_FROM: f64 = 23.0;
const BMI_OBESE_1_FROM: f64 = 25.0;
const BMI_OBESE_2_FROM: f64 = 30.0;

/// Round to two decimals using the exact binary value of `value`
///
/// Scaling by 100 first would itself round, turning e.g. 0.82500000000000007
/// into an exact 82.5. Decimal formatting sees the true digits, and only
/// exactly representable ties (0.8125) fall back to even.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Compute BMI from weight (kg) and height (cm)
///
/// Returns `InvalidInput` unless both values are finite and positive.
pub fn compute_bmi(weight: f64, height: f64) -> Result<(f64, BmiStatus)> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "weight must be positive, got {}",
            weight
        )));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "height must be positive, got {}",
            height
        )));
    }

    let height_m = height / 100.0;
    let bmi = round2(weight / height_m.powi(2));
    Ok((bmi, bmi_status(bmi)))
}

/// Map a BMI value onto its band
pub fn bmi_status(bmi: f64) -> BmiStatus {
    if bmi < BMI_NORMAL_FROM {
        BmiStatus::Underweight
    } else if bmi < BMI_OVERWEIGHT_FROM {
        BmiStatus::Normal
    } else if bmi < BMI_OBESE_1_FROM {
        BmiStatus::Overweight
    } else if bmi < BMI_OBESE_2_FROM {
        BmiStatus::Obese1
    } else {
        BmiStatus::Obese2
    }
}

/// Waist-to-hip ratio, rounded to two decimals (0 when hip ≤ 0)
pub fn compute_whr(waist: f64, hip: f64) -> f64 {
    if hip > 0.0 {
        round2(waist / hip)
    } else {
        0.0
    }
}

/// Bust-to-hip ratio, unrounded (1.0 when hip ≤ 0)
pub fn bust_hip_ratio(bust: f64, hip: f64) -> f64 {
    if hip > 0.0 {
        bust / hip
    } else {
        1.0
    }
}

// ============================================================================
// Shape Rule Table
// ============================================================================

/// Secondary test on the bust-to-hip ratio
#[derive(Clone, Copy, Debug)]
enum BhrTest {
    Any,
    Above(f64),
    Below(f64),
}

/// Secondary test on the WHR inside its band
#[derive(Clone, Copy, Debug)]
enum WhrTest {
    Any,
    AtMost(f64),
}

/// One row of the decision table: `[from, below)` band plus tie-breaks
#[derive(Clone, Copy, Debug)]
struct ShapeRule {
    from: f64,
    below: f64,
    bhr: BhrTest,
    whr: WhrTest,
    shape: BodyShape,
}

impl ShapeRule {
    const fn new(from: f64, below: f64, bhr: BhrTest, whr: WhrTest, shape: BodyShape) -> Self {
        Self {
            from,
            below,
            bhr,
            whr,
            shape,
        }
    }

    fn matches(&self, whr: f64, bhr: f64) -> bool {
        let in_band = whr >= self.from && whr < self.below;
        let bhr_ok = match self.bhr {
            BhrTest::Any => true,
            BhrTest::Above(limit) => bhr > limit,
            BhrTest::Below(limit) => bhr < limit,
        };
        let whr_ok = match self.whr {
            WhrTest::Any => true,
            WhrTest::AtMost(limit) => whr <= limit,
        };
        in_band && bhr_ok && whr_ok
    }
}

/// Evaluated top to bottom, first match wins. The bands overlap on purpose:
/// within [0.78, 0.85) and [0.68, 0.78) the BHR is consulted before the WHR.
const SHAPE_RULES: [ShapeRule; 8] = [
    ShapeRule::new(0.85, f64::INFINITY, BhrTest::Any, WhrTest::Any, BodyShape::Apple),
    ShapeRule::new(0.78, 0.85, BhrTest::Above(1.05), WhrTest::Any, BodyShape::UpperTriangle),
    ShapeRule::new(0.78, 0.85, BhrTest::Any, WhrTest::AtMost(0.82), BodyShape::Rectangle),
    ShapeRule::new(0.78, 0.85, BhrTest::Any, WhrTest::Any, BodyShape::UpperTriangle),
    ShapeRule::new(0.68, 0.78, BhrTest::Below(0.95), WhrTest::Any, BodyShape::InvertedTriangle),
    ShapeRule::new(0.68, 0.78, BhrTest::Any, WhrTest::AtMost(0.75), BodyShape::Hourglass),
    ShapeRule::new(0.68, 0.78, BhrTest::Any, WhrTest::Any, BodyShape::InvertedTriangle),
    ShapeRule::new(f64::NEG_INFINITY, 0.68, BhrTest::Any, WhrTest::Any, BodyShape::Hourglass),
];

/// Shape returned when no rule matches (only reachable for NaN today)
const FALLBACK_SHAPE: BodyShape = BodyShape::Rectangle;

/// Classify the silhouette from WHR, bust and hip
pub fn classify_body_shape(whr: f64, bust: f64, hip: f64) -> BodyShape {
    let bhr = bust_hip_ratio(bust, hip);
    match SHAPE_RULES.iter().find(|rule| rule.matches(whr, bhr)) {
        Some(rule) => rule.shape,
        None => {
            tracing::debug!("No shape rule matched whr={} bhr={}, using fallback", whr, bhr);
            FALLBACK_SHAPE
        }
    }
}

/// Run the full analysis for one measurement
///
/// Fails with `InvalidInput` before computing anything if weight or height
/// is not positive. A hip of zero is tolerated (WHR 0, BHR 1.0).
pub fn analyze(measurement: &Measurement, catalog: &WorkoutCatalog) -> Result<AnalysisResult> {
    let (bmi, bmi_status) = compute_bmi(measurement.weight, measurement.height)?;
    let whr = compute_whr(measurement.waist, measurement.hip);
    let body_shape = classify_body_shape(whr, measurement.bust, measurement.hip);
    let workout_plan = catalog.plan_for(body_shape).to_vec();

    tracing::debug!(
        "Analyzed measurement: bmi={} ({}), whr={}, shape={}",
        bmi,
        bmi_status,
        whr,
        body_shape
    );

    Ok(AnalysisResult {
        bmi,
        bmi_status,
        whr,
        body_shape,
        workout_plan,
    })
}
