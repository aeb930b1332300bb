use serde::{Deserialize, Serialize};

/// A rectangular cut piece placed on a sheet.
///
/// Coordinates are in source units (centimeters). The renderer reads parts
/// but never mutates or keeps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub label: String,
    /// Pre-formatted dimension text, without unit suffix.
    pub dims: String,
}

impl Part {
    pub fn new(x: f64, y: f64, w: f64, h: f64, label: &str, dims: &str) -> Self {
        Self {
            x,
            y,
            w,
            h,
            label: label.to_string(),
            dims: dims.to_string(),
        }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// One sheet of material and the parts placed on it, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Percentage of the sheet covered by parts.
    #[serde(default)]
    pub efficiency: f64,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Sheet {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            efficiency: 0.0,
            parts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn used_area(&self) -> f64 {
        self.parts.iter().map(Part::area).sum()
    }
}

/// Sheets cut from material of one thickness:
/// `{ "sheets": [ { "efficiency": .., "parts": [..] } ] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetSet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

impl SheetSet {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn total_parts(&self) -> usize {
        self.sheets.iter().map(Sheet::part_count).sum()
    }
}

/// Optimizer output for one material thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetGroup {
    pub thickness: f64,
    pub result: SheetSet,
}

/// Response of the optimizer's `/calculate` endpoint:
/// `{ "groups": [ { "thickness": .., "result": { "sheets": [..] } } ] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerResponse {
    pub groups: Vec<SheetGroup>,
}

impl OptimizerResponse {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Every sheet across all thickness groups, in response order.
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.groups.iter().flat_map(|g| g.result.sheets.iter())
    }

    pub fn total_parts(&self) -> usize {
        self.groups.iter().map(|g| g.result.total_parts()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optimizer_response() {
        let json = r#"{ "sheets": [
            { "efficiency": 81.25, "parts": [
                {"x":0,"y":0,"w":120,"h":60,"label":"Side","dims":"120x60"},
                {"x":120,"y":0,"w":5,"h":30,"label":"Rail","dims":"5x30"}
            ]},
            { "efficiency": 12.5 }
        ] }"#;
        let set = SheetSet::from_json(json).unwrap();
        assert_eq!(set.sheets.len(), 2);
        assert_eq!(set.total_parts(), 2);
        assert_eq!(set.sheets[0].parts[1].label, "Rail");
        assert!((set.sheets[0].efficiency - 81.25).abs() < 1e-10);
        // Missing parts array is an empty sheet, not an error.
        assert!(set.sheets[1].is_empty());
    }

    #[test]
    fn test_parse_calculate_endpoint_envelope() {
        let json = r#"{ "groups": [{"thickness":18,"result":{ "sheets": [{ "efficiency": 50, "parts": [
                {"x":0,"y":0,"w":20,"h":5,"label":"Shelf","dims":"20x5"}
            ]}] }},{"thickness":12,"result":{ "sheets": [] }}] }"#;
        let response = OptimizerResponse::from_json(json).unwrap();
        assert_eq!(response.groups.len(), 2);
        assert!((response.groups[0].thickness - 18.0).abs() < 1e-10);
        assert_eq!(response.total_parts(), 1);
        let sheets: Vec<&Sheet> = response.sheets().collect();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].parts[0].label, "Shelf");
    }

    #[test]
    fn test_envelope_is_not_a_sheet_set() {
        // The grouped envelope must not silently parse as an empty sheet set.
        let json = r#"{ "groups": [{"thickness":18,"result":{ "sheets": [] }}] }"#;
        assert!(SheetSet::from_json(json).is_err());
        assert!(OptimizerResponse::from_json(r#"{ "sheets": [] }"#).is_err());
    }

    #[test]
    fn test_used_area() {
        let sheet = Sheet::new(vec![
            Part::new(0.0, 0.0, 10.0, 5.0, "A", "10x5"),
            Part::new(10.0, 0.0, 2.0, 3.0, "B", "2x3"),
        ]);
        assert!((sheet.used_area() - 56.0).abs() < 1e-10);
    }

    #[test]
    fn test_part_missing_field_is_rejected() {
        let json = r#"{ "sheets": [ { "parts": [ {"x":0,"y":0,"w":1,"label":"A","dims":"1"} ] } ] }"#;
        assert!(SheetSet::from_json(json).is_err());
    }
}
