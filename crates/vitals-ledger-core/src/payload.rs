//! Payload: the named numeric values a block carries.
//!
//! A payload always belongs to a [`PayloadSchema`]. The schema fixes the field
//! set and the field order, so canonical encoding never depends on map
//! iteration order.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConstructionError;

mod fields {
    pub const HEART_RATE: &str = "heart_rate";
    pub const HEART_RATE_MEAN: &str = "heart_rate_mean";
    pub const HEART_RATE_STD: &str = "heart_rate_std";
    pub const GLUCOSE: &str = "glucose";
    pub const GLUCOSE_MEAN: &str = "glucose_mean";
    pub const GLUCOSE_STD: &str = "glucose_std";
}

const READINGS_FIELDS: &[&str] = &[fields::HEART_RATE, fields::GLUCOSE];

const STATISTICS_FIELDS: &[&str] = &[
    fields::HEART_RATE_MEAN,
    fields::HEART_RATE_STD,
    fields::GLUCOSE_MEAN,
    fields::GLUCOSE_STD,
];

const DETAILED_FIELDS: &[&str] = &[
    fields::HEART_RATE,
    fields::HEART_RATE_MEAN,
    fields::HEART_RATE_STD,
    fields::GLUCOSE,
    fields::GLUCOSE_MEAN,
    fields::GLUCOSE_STD,
];

/// The versioned field layout of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSchema {
    /// One reading per sensor: `heart_rate`, `glucose`.
    Readings,
    /// Summary statistics: `heart_rate_mean`, `heart_rate_std`, `glucose_mean`, `glucose_std`.
    Statistics,
    /// Reading plus rolling statistics for both sensors.
    Detailed,
}

impl PayloadSchema {
    /// All known schemas, in version order.
    pub const ALL: [PayloadSchema; 3] = [Self::Readings, Self::Statistics, Self::Detailed];

    /// Ordered field names.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Readings => READINGS_FIELDS,
            Self::Statistics => STATISTICS_FIELDS,
            Self::Detailed => DETAILED_FIELDS,
        }
    }

    /// Schema version number.
    pub fn version(self) -> u16 {
        match self {
            Self::Readings => 1,
            Self::Statistics => 2,
            Self::Detailed => 3,
        }
    }

    /// Stable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Readings => "readings",
            Self::Statistics => "statistics",
            Self::Detailed => "detailed",
        }
    }

    /// Number of fields.
    pub fn width(self) -> usize {
        self.fields().len()
    }

    /// Position of a field, if the schema has it.
    pub fn position(self, field: &str) -> Option<usize> {
        self.fields().iter().position(|f| *f == field)
    }

    /// The genesis payload: every field present with value 0.
    pub fn default_payload(self) -> Payload {
        Payload {
            schema: self,
            values: vec![0.0; self.width()],
        }
    }

    /// Find the schema whose field set equals `names`, ignoring order.
    pub fn from_field_names<'a, I>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<&str> = names.into_iter().collect();
        names.sort_unstable();
        Self::ALL.into_iter().find(|schema| {
            let mut expected: Vec<&str> = schema.fields().to_vec();
            expected.sort_unstable();
            expected == names
        })
    }
}

impl fmt::Display for PayloadSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/v{}", self.name(), self.version())
    }
}

impl FromStr for PayloadSchema {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.split('/').next().unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|schema| schema.name() == name)
            .ok_or_else(|| ConstructionError::UnknownSchema(s.to_string()))
    }
}

/// An ordered set of named, finite numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    schema: PayloadSchema,
    values: Vec<f64>,
}

impl Payload {
    /// Build from values given in schema order.
    pub fn new(schema: PayloadSchema, values: Vec<f64>) -> Result<Self, ConstructionError> {
        if values.len() != schema.width() {
            return Err(ConstructionError::FieldCount {
                schema,
                expected: schema.width(),
                got: values.len(),
            });
        }

        let values = schema
            .fields()
            .iter()
            .zip(values)
            .map(|(field, value)| normalize(*field, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { schema, values })
    }

    /// Build from `(field, value)` pairs, which must follow schema order.
    pub fn from_pairs<'a, I>(schema: PayloadSchema, pairs: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let pairs: Vec<(&str, f64)> = pairs.into_iter().collect();
        if pairs.len() != schema.width() {
            return Err(ConstructionError::FieldCount {
                schema,
                expected: schema.width(),
                got: pairs.len(),
            });
        }

        let mut values = Vec::with_capacity(pairs.len());
        let expected_fields = schema.fields().iter().copied();
        for (position, ((name, value), expected)) in
            pairs.into_iter().zip(expected_fields).enumerate()
        {
            if name != expected {
                return Err(ConstructionError::UnexpectedField {
                    schema,
                    position,
                    expected,
                    got: name.to_string(),
                });
            }
            values.push(value);
        }

        Self::new(schema, values)
    }

    /// Build from named values in any order; the schema is inferred from the field set.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, ConstructionError> {
        let schema = PayloadSchema::from_field_names(map.keys().map(String::as_str)).ok_or_else(
            || {
                let names: Vec<&str> = map.keys().map(String::as_str).collect();
                ConstructionError::UnknownSchema(names.join(","))
            },
        )?;

        let values = schema.fields().iter().map(|f| map[*f]).collect();
        Self::new(schema, values)
    }

    /// `Readings` payload.
    pub fn readings(heart_rate: f64, glucose: f64) -> Result<Self, ConstructionError> {
        Self::new(PayloadSchema::Readings, vec![heart_rate, glucose])
    }

    /// `Statistics` payload.
    pub fn statistics(
        heart_rate_mean: f64,
        heart_rate_std: f64,
        glucose_mean: f64,
        glucose_std: f64,
    ) -> Result<Self, ConstructionError> {
        Self::new(
            PayloadSchema::Statistics,
            vec![heart_rate_mean, heart_rate_std, glucose_mean, glucose_std],
        )
    }

    /// The payload's schema.
    pub fn schema(&self) -> PayloadSchema {
        self.schema
    }

    /// Values in schema order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.schema.position(field).map(|i| self.values[i])
    }

    /// Iterate `(field, value)` in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.schema.fields().iter().copied().zip(self.values.iter().copied())
    }

    /// True if every value is zero, as in the genesis payload.
    pub fn is_default(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    /// Overwrite a field without any validation.
    #[cfg(any(test, feature = "tamper"))]
    pub(crate) fn set_unchecked(&mut self, field: &str, value: f64) -> bool {
        match self.schema.position(field) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }
}

/// Reject non-finite values and fold negative zero into zero.
fn normalize(field: &'static str, value: f64) -> Result<f64, ConstructionError> {
    if !value.is_finite() {
        return Err(ConstructionError::NonFiniteValue { field, value });
    }
    Ok(value + 0.0)
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field, &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, f64>::deserialize(deserializer)?;
        Payload::from_map(&map).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_field_order() {
        assert_eq!(PayloadSchema::Readings.fields(), &["heart_rate", "glucose"]);
        assert_eq!(
            PayloadSchema::Statistics.fields(),
            &["heart_rate_mean", "heart_rate_std", "glucose_mean", "glucose_std"]
        );
        assert_eq!(PayloadSchema::Detailed.width(), 6);
    }

    #[test]
    fn test_schema_display_and_parse() {
        assert_eq!(PayloadSchema::Statistics.to_string(), "statistics/v2");
        assert_eq!(
            "statistics/v2".parse::<PayloadSchema>().unwrap(),
            PayloadSchema::Statistics
        );
        assert_eq!("readings".parse::<PayloadSchema>().unwrap(), PayloadSchema::Readings);
        assert!("bogus".parse::<PayloadSchema>().is_err());
    }

    #[test]
    fn test_default_payload_is_all_zero() {
        for schema in PayloadSchema::ALL {
            let p = schema.default_payload();
            assert_eq!(p.values().len(), schema.width());
            assert!(p.is_default());
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let err = Payload::new(PayloadSchema::Readings, vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::FieldCount {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = Payload::readings(f64::NAN, 100.0).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::NonFiniteValue {
                field: "heart_rate",
                ..
            }
        ));
        assert!(Payload::readings(72.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_negative_zero_normalized() {
        let p = Payload::readings(-0.0, 0.0).unwrap();
        assert!(p.values()[0].is_sign_positive());
    }

    #[test]
    fn test_from_pairs_requires_schema_order() {
        let ok = Payload::from_pairs(
            PayloadSchema::Readings,
            [("heart_rate", 72.0), ("glucose", 110.0)],
        )
        .unwrap();
        assert_eq!(ok.get("glucose"), Some(110.0));

        let err = Payload::from_pairs(
            PayloadSchema::Readings,
            [("glucose", 110.0), ("heart_rate", 72.0)],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::UnexpectedField { position: 0, .. }
        ));
    }

    #[test]
    fn test_from_map_infers_schema() {
        let mut map = BTreeMap::new();
        map.insert("glucose_std".to_string(), 4.0);
        map.insert("heart_rate_mean".to_string(), 71.0);
        map.insert("glucose_mean".to_string(), 105.0);
        map.insert("heart_rate_std".to_string(), 2.5);

        let p = Payload::from_map(&map).unwrap();
        assert_eq!(p.schema(), PayloadSchema::Statistics);
        assert_eq!(p.values(), &[71.0, 2.5, 105.0, 4.0]);
    }

    #[test]
    fn test_serialize_keeps_schema_order() {
        let p = Payload::readings(72.0, 110.0).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"heart_rate":72.0,"glucose":110.0}"#);

        let back: Payload = serde_json::from_str(r#"{"glucose":110,"heart_rate":72}"#).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_get_unknown_field() {
        let p = Payload::readings(72.0, 110.0).unwrap();
        assert_eq!(p.get("heart_rate"), Some(72.0));
        assert_eq!(p.get("pressure"), None);
    }
}
