//! Inbound detection request and its validation.
//!
//! Validation happens before any remote work: dates must parse and be
//! ordered, and exactly one region-of-interest source must be present --
//! either a drawn GeoJSON polygon or a (state, district) pair.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::Date;
use crate::window::AnalysisWindows;

/// Raw detection request body as received over the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionRequest {
    /// Inclusive lower bound of the post-fire window, ISO date.
    pub start_date: String,
    /// Inclusive upper bound of the post-fire window, ISO date.
    pub end_date: String,
    pub state: Option<String>,
    pub district: Option<String>,
    /// User-drawn region of interest: a GeoJSON Feature or bare geometry.
    pub roi: Option<Value>,
}

/// Region-of-interest source, after exactly-one-of validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RoiSelection {
    /// User-drawn polygon geometry (GeoJSON).
    Drawn(Value),
    /// Administrative boundary lookup by exact name match.
    District { state: String, district: String },
}

/// A validated request, ready for boundary resolution and the pipeline.
#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    pub windows: AnalysisWindows,
    pub roi: RoiSelection,
}

impl DetectionRequest {
    /// Validate dates and the ROI source.
    pub fn validate(&self) -> Result<ValidatedRequest, CoreError> {
        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(CoreError::Validation(
                "end_date must not precede start_date".into(),
            ));
        }

        let has_district = self.state.is_some() && self.district.is_some();
        let roi = match (&self.roi, has_district) {
            (Some(_), true) => {
                return Err(CoreError::Validation(
                    "Provide either a custom ROI or a state/district, not both".into(),
                ))
            }
            (Some(roi), false) => RoiSelection::Drawn(extract_geometry(roi)?),
            (None, true) => RoiSelection::District {
                state: self.state.clone().unwrap_or_default(),
                district: self.district.clone().unwrap_or_default(),
            },
            (None, false) => {
                return Err(CoreError::Validation(
                    "Either a state/district or a custom ROI must be provided".into(),
                ))
            }
        };

        Ok(ValidatedRequest {
            windows: AnalysisWindows::from_post_fire(start, end),
            roi,
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<Date, CoreError> {
    value
        .parse::<Date>()
        .map_err(|_| CoreError::Validation(format!("{field} must be an ISO date (YYYY-MM-DD)")))
}

/// Accept either a GeoJSON Feature (take its `geometry`) or a bare geometry.
///
/// Map-drawing widgets emit Features; API clients typically send the
/// geometry directly. Both must carry a geometry `type`.
fn extract_geometry(roi: &Value) -> Result<Value, CoreError> {
    let geometry = match roi.get("geometry") {
        Some(inner) => inner,
        None => roi,
    };
    if geometry.get("type").and_then(Value::as_str).is_none() {
        return Err(CoreError::Validation(
            "roi must be a GeoJSON geometry or Feature".into(),
        ));
    }
    Ok(geometry.clone())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn base_request() -> DetectionRequest {
        DetectionRequest {
            start_date: "2023-11-01".into(),
            end_date: "2023-11-30".into(),
            state: None,
            district: None,
            roi: None,
        }
    }

    fn polygon() -> Value {
        json!({
            "type": "Polygon",
            "coordinates": [[[75.0, 30.0], [75.5, 30.0], [75.5, 30.5], [75.0, 30.0]]]
        })
    }

    // -- exactly-one-of ROI source --

    #[test]
    fn neither_roi_nor_district_rejected() {
        let err = base_request().validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(_));
    }

    #[test]
    fn both_roi_and_district_rejected() {
        let mut request = base_request();
        request.state = Some("Punjab".into());
        request.district = Some("Sangrur".into());
        request.roi = Some(polygon());

        assert_matches!(request.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn district_without_state_is_not_a_selection() {
        let mut request = base_request();
        request.district = Some("Sangrur".into());

        assert_matches!(request.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn district_mode_accepted() {
        let mut request = base_request();
        request.state = Some("Punjab".into());
        request.district = Some("Sangrur".into());

        let validated = request.validate().unwrap();
        assert_eq!(
            validated.roi,
            RoiSelection::District {
                state: "Punjab".into(),
                district: "Sangrur".into()
            }
        );
    }

    // -- ROI geometry extraction --

    #[test]
    fn bare_geometry_accepted() {
        let mut request = base_request();
        request.roi = Some(polygon());

        let validated = request.validate().unwrap();
        assert_eq!(validated.roi, RoiSelection::Drawn(polygon()));
    }

    #[test]
    fn feature_geometry_unwrapped() {
        let mut request = base_request();
        request.roi = Some(json!({
            "type": "Feature",
            "properties": {},
            "geometry": polygon()
        }));

        let validated = request.validate().unwrap();
        assert_eq!(validated.roi, RoiSelection::Drawn(polygon()));
    }

    #[test]
    fn roi_without_geometry_type_rejected() {
        let mut request = base_request();
        request.roi = Some(json!({ "coordinates": [] }));

        assert_matches!(request.validate(), Err(CoreError::Validation(_)));
    }

    // -- dates --

    #[test]
    fn malformed_date_rejected() {
        let mut request = base_request();
        request.start_date = "11/01/2023".into();
        request.roi = Some(polygon());

        assert_matches!(request.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reversed_range_rejected() {
        let mut request = base_request();
        request.start_date = "2023-11-30".into();
        request.end_date = "2023-11-01".into();
        request.roi = Some(polygon());

        assert_matches!(request.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn windows_derived_from_dates() {
        let mut request = base_request();
        request.roi = Some(polygon());

        let validated = request.validate().unwrap();
        assert_eq!(validated.windows.post_fire.to_string(), "2023-11-01 to 2023-11-30");
        assert_eq!(validated.windows.pre_fire.to_string(), "2023-09-02 to 2023-10-17");
    }
}
