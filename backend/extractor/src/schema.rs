//! Wire schema for the model's JSON output and its normalization into a
//! [`FeatureRecord`].
//!
//! The decode fails closed: every key is required, unknown keys are
//! rejected, and enum-valued fields only accept the values the prompt
//! allows. Sentinel strings the prompt mandates for absence ("Not found",
//! `["missing"]`, "n/a") are turned into explicit nulls so consumers never
//! have to string-match sentinels.

use serde::Deserialize;

use packlens_core::{ExtractError, FeatureRecord};

const NOT_FOUND: &str = "not found";
const MISSING: &str = "missing";

/// The model's output, exactly as the prompt specifies it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireRecord {
    flavors_list: Vec<String>,
    multiple_descriptors: DescriptorCount,
    extraction_evidence: String,
    brand_name: String,
    nicotine_content: String,
    size_or_volume: String,
    warning_label_present: YesNo,
    warning_label_location: String,
    main_color: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq)]
enum DescriptorCount {
    #[serde(rename = "1")]
    Multiple,
    #[serde(rename = "0")]
    Single,
    #[serde(rename = "n/a")]
    NotApplicable,
}

#[derive(Debug, Deserialize, PartialEq)]
enum YesNo {
    Yes,
    No,
}

/// Decode the model's output text into a validated [`FeatureRecord`].
///
/// Any mismatch against the schema (missing key, wrong type, unknown key,
/// out-of-vocabulary enum value) is a [`ExtractError::MalformedResponse`].
pub fn parse_feature_record(output_text: &str) -> Result<FeatureRecord, ExtractError> {
    let wire: WireRecord = serde_json::from_str(output_text).map_err(|e| {
        ExtractError::MalformedResponse(format!("model output does not match the feature schema: {e}"))
    })?;
    Ok(normalize(wire))
}

fn normalize(wire: WireRecord) -> FeatureRecord {
    FeatureRecord {
        flavors: normalize_list(wire.flavors_list, MISSING),
        multiple_descriptors: match wire.multiple_descriptors {
            DescriptorCount::Multiple => Some(true),
            DescriptorCount::Single => Some(false),
            DescriptorCount::NotApplicable => None,
        },
        brand_name: normalize_text(wire.brand_name),
        extraction_evidence: normalize_text(wire.extraction_evidence),
        nicotine_content: normalize_text(wire.nicotine_content),
        size_or_volume: normalize_text(wire.size_or_volume),
        warning_label_present: wire.warning_label_present == YesNo::Yes,
        warning_label_location: normalize_text(wire.warning_label_location),
        main_colors: normalize_list(wire.main_color, NOT_FOUND),
    }
}

fn normalize_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_FOUND) {
        None
    } else {
        Some(value)
    }
}

fn normalize_list(values: Vec<String>, sentinel: &str) -> Option<Vec<String>> {
    if values.is_empty() {
        return None;
    }
    if values.len() == 1 && values[0].trim().eq_ignore_ascii_case(sentinel) {
        return None;
    }
    Some(values)
}
